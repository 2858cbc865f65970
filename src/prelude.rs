//! Prelude module for tursodal
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use tursodal::prelude::*;
//! ```

// Re-export the derive macros
pub use turso::EncryptionOpts;
pub use tursodal_macros::DbEnum;
pub use tursodal_macros::Entity;

pub use crate::client::Client;
pub use crate::client::ClientOptions;
pub use crate::command::Command;
pub use crate::command::CommandType;
pub use crate::command::DatabaseCommand;
pub use crate::command::Parameter;
pub use crate::connection::Builder;
pub use crate::connection::Connection;
pub use crate::connection::Transaction;
pub use crate::dynamic::DynamicRow;
pub use crate::entity::ColumnSource;
pub use crate::entity::Entity;
pub use crate::entity::FromRecord;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::naming::NameConverter;
pub use crate::naming::NamingConvention;
pub use crate::query::ANSI_INSERT;
pub use crate::query::Dialect;
pub use crate::query::KeywordEscape;
pub use crate::query::SQLITE_INSERT;
pub use crate::query::SQLITE_RETURNING_INSERT;
pub use crate::record::Record;
pub use crate::value::ColumnType;
pub use crate::value::DbEnum;
pub use crate::value::FromValue;
pub use crate::value::IntoValue;
// Re-export optional types
#[cfg(feature = "with-json")]
pub use crate::value::Json;
pub use crate::value::Value;
