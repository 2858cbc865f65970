//! SQL statement templates and identifier escaping
//!
//! Insert templates take three positional slots: `{0}` table, `{1}` columns,
//! `{2}` values. The select-by-id template takes `{0}` (escaped table) and
//! `{1}` (bare table).

use crate::error::Error;
use crate::error::Result;

pub const ANSI_INSERT: &str = "INSERT INTO {0}({1}) VALUES({2});\n";

/// Echoes the inserted row back in the same round trip
pub const SQL_SERVER_INSERT: &str = "INSERT INTO {0}({1}) OUTPUT Inserted.* VALUES({2});\n";

pub const MYSQL_INSERT: &str = "INSERT INTO {0}({1}) VALUES({2});\nSELECT LAST_INSERT_ID() AS LastInsertedId;\n";

pub const SQLITE_INSERT: &str = "INSERT INTO {0}({1}) VALUES({2});\nSELECT last_insert_rowid() AS [LastInsertedId];\n";

pub const SQLITE_RETURNING_INSERT: &str = "INSERT INTO {0}({1}) VALUES({2}) RETURNING *;\n";

pub const SELECT_BY_ID: &str = "SELECT * FROM {0} WHERE ({1}Id = @{1}Id);\n";

/// Affixes wrapped around every generated identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeywordEscape {
    #[default]
    None,
    /// `[name]`
    SquareBracket,
    /// `"name"`
    DoubleQuote,
    /// `` `name` ``
    Backtick,
}

impl KeywordEscape {
    pub fn affixes(self) -> (&'static str, &'static str) {
        match self {
            KeywordEscape::None => ("", ""),
            KeywordEscape::SquareBracket => ("[", "]"),
            KeywordEscape::DoubleQuote => ("\"", "\""),
            KeywordEscape::Backtick => ("`", "`"),
        }
    }

    pub fn wrap(self, identifier: &str) -> String {
        let (prefix, suffix) = self.affixes();
        format!("{prefix}{identifier}{suffix}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    Ansi,
    MySql,
    Sqlite,
    SqlServer,
}

impl Dialect {
    pub fn insert_template(self) -> &'static str {
        match self {
            Dialect::Ansi => ANSI_INSERT,
            Dialect::MySql => MYSQL_INSERT,
            Dialect::Sqlite => SQLITE_INSERT,
            Dialect::SqlServer => SQL_SERVER_INSERT,
        }
    }

    pub fn escape(self) -> KeywordEscape {
        match self {
            Dialect::Ansi => KeywordEscape::DoubleQuote,
            Dialect::MySql => KeywordEscape::Backtick,
            Dialect::Sqlite | Dialect::SqlServer => KeywordEscape::SquareBracket,
        }
    }
}

/// Fails unless `template` is non-blank and contains every `{n}` slot below `slots`
pub(crate) fn validate(template: &str, slots: usize) -> Result<()> {
    if template.trim().is_empty() {
        return Err(Error::InvalidTemplate("template is blank".to_string()));
    }
    for slot in 0..slots {
        let marker = format!("{{{slot}}}");
        if !template.contains(&marker) {
            return Err(Error::InvalidTemplate(format!("template is missing the {marker} slot: {template}")));
        }
    }
    Ok(())
}

/// Substitutes `{n}` slots in a single pass; `{{` and `}}` produce literal braces.
///
/// Substituted text is never rescanned, and slots without an argument are kept as written.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some(end) = tail.find('}') {
                if let Ok(slot) = tail[1..end].parse::<usize>() {
                    if let Some(arg) = args.get(slot) {
                        out.push_str(arg);
                        rest = &tail[end + 1..];
                        continue;
                    }
                }
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(KeywordEscape::None.wrap("Name"), "Name");
        assert_eq!(KeywordEscape::SquareBracket.wrap("Name"), "[Name]");
        assert_eq!(KeywordEscape::DoubleQuote.wrap("Name"), "\"Name\"");
        assert_eq!(KeywordEscape::Backtick.wrap("Name"), "`Name`");
    }

    #[test]
    fn test_format_template() {
        assert_eq!(format_template(ANSI_INSERT, &["T", "A,B", "@A,@B"]), "INSERT INTO T(A,B) VALUES(@A,@B);\n");
        assert_eq!(format_template("{1}-{0}-{1}", &["a", "b"]), "b-a-b");
    }

    #[test]
    fn test_format_template_does_not_rescan_arguments() {
        assert_eq!(format_template("{0} {1}", &["{1}", "x"]), "{1} x");
    }

    #[test]
    fn test_format_template_braces() {
        assert_eq!(format_template("{{{0}}}", &["x"]), "{x}");
        assert_eq!(format_template("{5} {name}", &["x"]), "{5} {name}");
    }

    #[test]
    fn test_validate() {
        assert!(validate(ANSI_INSERT, 3).is_ok());
        assert!(validate(SELECT_BY_ID, 2).is_ok());
        assert!(matches!(validate("   ", 3), Err(Error::InvalidTemplate(_))));
        assert!(matches!(validate("INSERT INTO {0}({1})", 3), Err(Error::InvalidTemplate(_))));
    }

    #[test]
    fn test_dialects() {
        assert_eq!(Dialect::MySql.escape(), KeywordEscape::Backtick);
        assert_eq!(Dialect::SqlServer.escape(), KeywordEscape::SquareBracket);
        assert!(Dialect::SqlServer.insert_template().contains("OUTPUT Inserted.*"));
        assert!(Dialect::Sqlite.insert_template().contains("last_insert_rowid()"));
        assert!(Dialect::MySql.insert_template().contains("LAST_INSERT_ID()"));
    }
}
