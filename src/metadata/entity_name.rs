use std::fmt;

use crate::query::KeywordEscape;

/// A one or two part object name: optional schema plus table
///
/// Stored unescaped; escaping is applied to every part when SQL is generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityName {
    pub schema: Option<String>,
    pub table:  String,
}

impl EntityName {
    pub fn new(table: impl Into<String>) -> Self {
        Self { schema: None, table: table.into() }
    }

    /// Blank schemas are dropped
    pub fn with_schema(schema: impl Into<String>, table: impl Into<String>) -> Self {
        let schema = schema.into();
        let schema = if schema.trim().is_empty() { None } else { Some(schema) };
        Self { schema, table: table.into() }
    }

    pub fn escaped(&self, escape: KeywordEscape) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", escape.wrap(schema), escape.wrap(&self.table)),
            None => escape.wrap(&self.table),
        }
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.escaped(KeywordEscape::None))
    }
}
