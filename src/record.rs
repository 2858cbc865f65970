use std::sync::Arc;

use crate::error::Result;
use crate::metadata::same_name;
use crate::value::Value;

/// One result row: the statement's column names plus this row's values
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values:  Vec<Value>,
}

impl Record {
    /// Missing trailing values are filled with null
    pub fn new(columns: Arc<[String]>, mut values: Vec<Value>) -> Self {
        if values.len() < columns.len() {
            values.resize(columns.len(), Value::Null);
        }
        Self { columns, values }
    }

    pub(crate) fn from_row(columns: &Arc<[String]>, row: &turso::Row) -> Result<Self> {
        let mut values = Vec::with_capacity(row.column_count());
        for idx in 0..row.column_count() {
            values.push(row.get_value(idx)?);
        }
        Ok(Self::new(columns.clone(), values))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Case-insensitive lookup by column name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().position(|column| same_name(column, name)).and_then(|idx| self.values.get(idx))
    }

    pub fn value(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record::new(
            Arc::from(vec!["Id".to_string(), "Name".to_string()]),
            vec![Value::Integer(1), Value::Text("Clark".into())],
        )
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let record = record();
        assert_eq!(record.get("name"), Some(&Value::Text("Clark".into())));
        assert_eq!(record.get("ID"), Some(&Value::Integer(1)));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_get_folds_non_ascii_names() {
        let record = Record::new(Arc::from(vec!["Ärger".to_string()]), vec![Value::Integer(3)]);
        assert_eq!(record.get("ÄRGER"), Some(&Value::Integer(3)));
        assert_eq!(record.get("ärger"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_iter_pairs_columns_with_values() {
        let record = record();
        let pairs: Vec<_> = record.iter().collect();
        assert_eq!(pairs, vec![("Id", &Value::Integer(1)), ("Name", &Value::Text("Clark".into()))]);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_short_rows_are_padded_with_null() {
        let record = Record::new(Arc::from(vec!["A".to_string(), "B".to_string()]), vec![Value::Integer(1)]);
        assert_eq!(record.value(1), Some(&Value::Null));
    }
}
