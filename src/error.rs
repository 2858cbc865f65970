use thiserror::Error;

use crate::metadata::MemberKind;
use crate::naming::NamingConvention;
use crate::value::Value;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error carried as the source of conversion and assignment failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),

    #[error("Type conversion error: unable to convert {value} to {target}. Error: {source}")]
    TypeConversion {
        value:  String,
        target: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Unable to assign {value} to {kind} {owner}.{member} of type {declared_type}. Error: {source}")]
    MemberAssignment {
        kind:          MemberKind,
        member:        String,
        declared_type: &'static str,
        owner:         &'static str,
        value:         String,
        #[source]
        source:        BoxError,
    },

    #[error("Cannot generate a statement without an item")]
    MissingItem,

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("A table name must be supplied for an item without a type name")]
    MissingTableName,

    #[error("Parameter expansion error: {0}")]
    ParameterExpansion(#[from] ExpansionError),

    #[error("The command has been released; pass keep_alive to reuse it")]
    CommandReleased,

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Cannot register a conversion from {0:?} to itself")]
    SameConvention(NamingConvention),

    #[error("No conversion registered from {from:?} to {to:?}")]
    MissingConversion { from: NamingConvention, to: NamingConvention },

    #[cfg(feature = "with-json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by list parameter expansion before the command is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("placeholder name is blank")]
    BlankPlaceholder,

    #[error("no values supplied for {placeholder}")]
    EmptyValues { placeholder: String },

    #[error("command text has not been set")]
    CommandTextUnset,

    #[error("{placeholder} does not appear in the command text")]
    PlaceholderNotFound { placeholder: String },

    #[error("{placeholder} appears {occurrences} times in the command text")]
    PlaceholderRepeated { placeholder: String, occurrences: usize },
}

impl Error {
    /// Builds a [`Error::TypeConversion`] naming the rejected value and target type
    pub fn conversion(value: &Value, target: &'static str, source: impl Into<BoxError>) -> Self {
        Error::TypeConversion { value: crate::value::render(value), target, source: source.into() }
    }
}
