//! Schema-less result rows
//!
//! A [`DynamicRow`] keeps column order and looks names up without regard to
//! case. Database null is stored as `None`.

use std::ops::Index;

use crate::error::Result;
use crate::metadata::same_name;
use crate::record::Record;
use crate::value::FromValue;
use crate::value::Value;

static NULL: Value = Value::Null;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DynamicRow {
    entries: Vec<(String, Option<Value>)>,
}

impl DynamicRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: &Record) -> Self {
        let entries = record
            .iter()
            .map(|(name, value)| {
                let value = if matches!(value, Value::Null) { None } else { Some(value.clone()) };
                (name.to_string(), value)
            })
            .collect();
        Self { entries }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| same_name(key, name))
    }

    /// The value under `name`; `None` both for missing keys and null entries
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).and_then(|idx| self.entries[idx].1.as_ref())
    }

    /// Converts the value under `name`, treating a missing key as null
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T> {
        T::from_value(self.get(name).cloned().unwrap_or(Value::Null))
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Inserts or replaces an entry; a replaced entry keeps its position and original name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Option<Value>>) -> &mut Self {
        let name = name.into();
        let value = value.into().filter(|v| !matches!(v, Value::Null));
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.position(name).and_then(|idx| self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for DynamicRow {
    type Output = Value;

    /// Member-style access; missing and null entries read as [`Value::Null`]
    fn index(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&NULL)
    }
}

impl<K: Into<String>, V: Into<Option<Value>>> FromIterator<(K, V)> for DynamicRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = DynamicRow::new();
        for (name, value) in iter {
            row.set(name, value);
        }
        row
    }
}

#[cfg(feature = "with-json")]
mod json_impl {
    use serde::Serialize;
    use serde::Serializer;
    use serde::ser::SerializeMap;

    use super::*;

    struct SerializableValue<'a>(Option<&'a Value>);

    impl Serialize for SerializableValue<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            match self.0 {
                None | Some(Value::Null) => serializer.serialize_none(),
                Some(Value::Integer(v)) => serializer.serialize_i64(*v),
                Some(Value::Real(v)) => serializer.serialize_f64(*v),
                Some(Value::Text(s)) => serializer.serialize_str(s),
                Some(Value::Blob(b)) => serializer.serialize_bytes(b),
            }
        }
    }

    impl Serialize for DynamicRow {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (name, value) in self.iter() {
                map.serialize_entry(name, &SerializableValue(value))?;
            }
            map.end()
        }
    }

    impl DynamicRow {
        pub fn to_json(&self) -> crate::error::Result<serde_json::Value> {
            Ok(serde_json::to_value(self)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let mut row = DynamicRow::new();
        row.set("FirstName", Value::Text("Clark".into()));
        assert_eq!(row.get("firstname"), Some(&Value::Text("Clark".into())));
        assert_eq!(row["FIRSTNAME"], Value::Text("Clark".into()));
    }

    #[test]
    fn test_lookup_folds_non_ascii_names() {
        let mut row = DynamicRow::new();
        row.set("Ölpreis", Value::Real(80.5));
        row.set("ÖLPREIS", Value::Real(81.0));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("ölpreis"), Some(&Value::Real(81.0)));
    }

    #[test]
    fn test_missing_key_reads_as_null() {
        let row = DynamicRow::new();
        assert_eq!(row.get("Nope"), None);
        assert_eq!(row["Nope"], Value::Null);
        assert_eq!(row.get_as::<i64>("Nope").unwrap(), 0);
        assert_eq!(row.get_as::<Option<String>>("Nope").unwrap(), None);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut row: DynamicRow =
            vec![("A", Some(Value::Integer(1))), ("B", Some(Value::Integer(2)))].into_iter().collect();
        row.set("a", Value::Integer(10));
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(row["A"], Value::Integer(10));
    }

    #[test]
    fn test_remove() {
        let mut row: DynamicRow = vec![("A", Value::Integer(1)), ("B", Value::Integer(2))].into_iter().collect();
        assert_eq!(row.remove("a"), Some(Value::Integer(1)));
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["B"]);
        assert!(!row.contains_key("A"));
    }

    #[test]
    fn test_from_record_maps_null_to_none() {
        let record = Record::new(
            Arc::from(vec!["Id".to_string(), "Nickname".to_string()]),
            vec![Value::Integer(5), Value::Null],
        );
        let row = DynamicRow::from_record(&record);
        assert_eq!(row.len(), 2);
        assert!(row.contains_key("nickname"));
        assert_eq!(row.get("Nickname"), None);
        assert_eq!(row.iter().map(|(_, v)| v.is_some()).collect::<Vec<_>>(), vec![true, false]);
    }

    #[cfg(feature = "with-json")]
    #[test]
    fn test_to_json() {
        let row: DynamicRow = vec![("Id", Some(Value::Integer(1))), ("Name", None)].into_iter().collect();
        assert_eq!(row.to_json().unwrap(), serde_json::json!({ "Id": 1, "Name": null }));
    }
}
