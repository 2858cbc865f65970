//! Traits connecting user types to metadata, statement generation and row mapping
//!
//! - [`Entity`] - Describes a type's members and naming marker
//! - [`ColumnSource`] - Anything that can produce ordered column/value pairs
//! - [`FromRecord`] - Builds a value from a result row
//!
//! `Entity` and `FromRecord` are normally implemented by `#[derive(Entity)]`.

use std::any::type_name;

use crate::dynamic::DynamicRow;
use crate::error::Error;
use crate::error::Result;
use crate::metadata::EntityName;
use crate::metadata::TypeMetadata;
use crate::metadata::metadata;
use crate::record::Record;
use crate::value::Value;

/// A type with a member table
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Default, Entity)]
/// #[dal(table = "Person", rename_all = "PascalCase")]
/// pub struct Person {
///     pub person_id: Option<i64>,
///     pub first_name: String,
///     #[dal(ignore)]
///     pub traits: Vec<String>,
/// }
/// ```
pub trait Entity: Default + Sized + 'static {
    /// Builds the member table. Called once per type; the result is cached.
    fn describe() -> TypeMetadata<Self>;

    /// Conversion used when a single-column row matched no member
    fn from_scalar(value: Value) -> Result<Self> {
        Err(Error::conversion(&value, type_name::<Self>(), "no member matched and the type has no scalar conversion"))
    }
}

/// Source of ordered column/value pairs for statement generation
pub trait ColumnSource {
    /// Target name derived from the item, `None` for anonymous shapes
    fn entity_name(&self) -> Option<EntityName>;

    fn column_value_pairs(&self) -> Vec<(String, Value)>;
}

impl<T: Entity> ColumnSource for T {
    fn entity_name(&self) -> Option<EntityName> {
        metadata::<T>().entity_name()
    }

    fn column_value_pairs(&self) -> Vec<(String, Value)> {
        metadata::<T>().column_value_pairs(self)
    }
}

impl ColumnSource for DynamicRow {
    fn entity_name(&self) -> Option<EntityName> {
        None
    }

    fn column_value_pairs(&self) -> Vec<(String, Value)> {
        self.iter().map(|(name, value)| (name.to_string(), value.cloned().unwrap_or(Value::Null))).collect()
    }
}

/// Trait for building values from a result row
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> Result<Self>;
}
