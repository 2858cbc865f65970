//! SQL generation for tursodal: INSERT and select-by-id statements, list parameter expansion

pub mod expand;
pub mod insert;
pub mod select;
pub mod template;

pub use expand::expand_list_parameter;
pub use insert::generate_insert;
pub use insert::generate_inserts;
pub use select::generate_select_by_id;
pub use template::ANSI_INSERT;
pub use template::Dialect;
pub use template::KeywordEscape;
pub use template::MYSQL_INSERT;
pub use template::SELECT_BY_ID;
pub use template::SQL_SERVER_INSERT;
pub use template::SQLITE_INSERT;
pub use template::SQLITE_RETURNING_INSERT;
pub use template::format_template;
