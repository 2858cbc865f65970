//! # tursodal
//!
//! A data-access layer for [Turso](https://turso.tech): fluent parameterized
//! commands, row-to-object mapping through cached type metadata, and INSERT /
//! SELECT-by-id generation for several SQL dialects.
//!
//! ## Features
//!
//! - Derive macros describing entities and database enums
//! - Fluent command building with typed parameters and list expansion
//! - Case-insensitive mapping of rows into structs, scalars or dynamic rows
//! - Execution observers and annotated command text for diagnostics
//! - Naming-convention conversion for identifier lists
//! - Optional support for chrono, uuid, and JSON types
//!
//! ## Quick Start
//!
//! ```ignore
//! use tursodal::prelude::*;
//!
//! #[derive(Debug, Default, Entity)]
//! #[dal(rename_all = "PascalCase")]
//! pub struct Customer {
//!     pub customer_id: Option<i64>,
//!     pub first_name: String,
//!     pub last_name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let db = Builder::in_memory().build().await?;
//!     let client = Client::new(db);
//!
//!     let conn = client.connect()?;
//!     conn.execute(
//!         "CREATE TABLE Customer (
//!             CustomerId INTEGER PRIMARY KEY AUTOINCREMENT,
//!             FirstName TEXT NOT NULL,
//!             LastName TEXT NOT NULL
//!         )",
//!         ()
//!     ).await?;
//!
//!     // Insert, returning the new row
//!     let clark = Customer { first_name: "Clark".into(), last_name: "Kent".into(), ..Default::default() };
//!     let mut command = DatabaseCommand::from_connection(conn.clone());
//!     command.generate_insert(&clark, SQLITE_RETURNING_INSERT, None, KeywordEscape::DoubleQuote)?;
//!     let inserted: Option<Customer> = command.execute_to_object(false).await?;
//!
//!     // Query with an expanded list parameter
//!     let mut command = DatabaseCommand::from_connection(conn);
//!     command
//!         .set_text("SELECT * FROM Customer WHERE LastName IN (@Names)")
//!         .expand_list_parameter("@Names", ["Kent", "Wayne"], None)?;
//!     let customers: Vec<Customer> = command.execute_to_list(false).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Entity Attributes
//!
//! The `#[dal(...)]` attribute supports, on the struct:
//!
//! - `schema = "..."`, `table = "..."` - Naming marker used by statement generation
//! - `rename_all = "..."` - `PascalCase`, `camelCase`, `snake_case` or `UPPER_SNAKE_CASE`
//! - `anonymous` - The type name is not a usable table name
//! - `from_value` - Single-column rows fall back to the type's `FromValue`
//!
//! and on fields:
//!
//! - `name = "..."` - Member name
//! - `ignore` - Exclude the field from mapping and generation
//! - `property`, `read_only`, `setter = "path"` - Property semantics

extern crate self as tursodal;

pub mod client;
pub mod command;
pub mod connection;
pub mod dynamic;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod metadata;
pub mod naming;
pub mod prelude;
pub mod query;
pub mod record;
pub mod value;
// Re-export main types at crate root
pub use client::Client;
pub use client::ClientOptions;
pub use command::Command;
pub use command::CommandType;
pub use command::DatabaseCommand;
pub use command::Observers;
pub use command::Parameter;
pub use connection::Builder;
pub use connection::Connection;
pub use connection::Database;
pub use connection::Transaction;
pub use dynamic::DynamicRow;
pub use entity::ColumnSource;
pub use entity::Entity;
pub use entity::FromRecord;
pub use error::Error;
pub use error::ExpansionError;
pub use error::Result;
pub use metadata::EntityName;
pub use metadata::MemberDescriptor;
pub use metadata::TypeMetadata;
pub use naming::NameConverter;
pub use naming::NamingConvention;
pub use query::Dialect;
pub use query::KeywordEscape;
pub use record::Record;
// Re-export the derive macros
pub use tursodal_macros::DbEnum;
pub use tursodal_macros::Entity;
pub use value::ColumnType;
pub use value::DbEnum;
pub use value::FromValue;
pub use value::IntoValue;
// Re-export optional types
#[cfg(feature = "with-json")]
pub use value::Json;
pub use value::Value;
