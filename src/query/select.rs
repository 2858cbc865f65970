use super::KeywordEscape;
use super::template;
use crate::command::Command;
use crate::command::Parameter;
use crate::error::Error;
use crate::error::Result;
use crate::value::IntoValue;

/// Appends a select-by-id statement and binds `id` as `@{table}Id`
///
/// `{0}` receives the escaped table, `{1}` the bare one.
pub fn generate_select_by_id(
    command: &mut Command,
    template: &str,
    table: &str,
    id: impl IntoValue,
    escape: KeywordEscape,
) -> Result<()> {
    template::validate(template, 2)?;
    if table.trim().is_empty() {
        return Err(Error::MissingTableName);
    }

    let statement = template::format_template(template, &[&escape.wrap(table), table]);
    tracing::debug!("Select SQL: {}", statement.trim_end());
    command.append_text(&statement);
    command.push_parameter(Parameter::new(format!("@{table}Id"), id.into_value()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SELECT_BY_ID;
    use crate::value::Value;

    #[test]
    fn test_select_by_id() {
        let mut command = Command::new();
        generate_select_by_id(&mut command, SELECT_BY_ID, "Customer", 42, KeywordEscape::SquareBracket).unwrap();

        assert_eq!(command.text(), Some("SELECT * FROM [Customer] WHERE (CustomerId = @CustomerId);\n"));
        assert_eq!(command.parameters().len(), 1);
        assert_eq!(command.parameters()[0].name(), "@CustomerId");
        assert_eq!(command.parameters()[0].value(), &Value::Integer(42));
    }

    #[test]
    fn test_select_by_id_without_escaping() {
        let mut command = Command::new();
        generate_select_by_id(&mut command, SELECT_BY_ID, "Person", "abc", KeywordEscape::None).unwrap();
        assert_eq!(command.text(), Some("SELECT * FROM Person WHERE (PersonId = @PersonId);\n"));
    }

    #[test]
    fn test_select_by_id_validation() {
        let mut command = Command::new();
        assert!(matches!(
            generate_select_by_id(&mut command, "SELECT * FROM {0}", "Person", 1, KeywordEscape::None),
            Err(Error::InvalidTemplate(_))
        ));
        assert!(matches!(
            generate_select_by_id(&mut command, SELECT_BY_ID, " ", 1, KeywordEscape::None),
            Err(Error::MissingTableName)
        ));
        assert_eq!(command.text(), None);
        assert!(command.parameters().is_empty());
    }
}
