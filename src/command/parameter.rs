use crate::error::Result;
use crate::value::ColumnType;
use crate::value::IntoValue;
use crate::value::Value;

/// A named value bound to a command
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub(crate) name:        String,
    pub(crate) value:       Value,
    pub(crate) column_type: Option<ColumnType>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl IntoValue) -> Self {
        Self { name: name.into(), value: value.into_value(), column_type: None }
    }

    /// Coerces `value` into `column_type` up front
    pub fn typed(name: impl Into<String>, value: impl IntoValue, column_type: ColumnType) -> Result<Self> {
        let value = column_type.coerce(value.into_value())?;
        Ok(Self { name: name.into(), value, column_type: Some(column_type) })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn column_type(&self) -> Option<ColumnType> {
        self.column_type
    }

    /// Whether a `@name`, `:name` or `$name` token in SQL refers to this parameter
    pub(crate) fn answers_to(&self, token: &str) -> bool {
        if self.name == token {
            return true;
        }
        let bare = token.get(1..).unwrap_or_default();
        !self.name.starts_with(['@', ':', '$']) && self.name == bare
    }
}
