use super::KeywordEscape;
use super::template;
use crate::command::Command;
use crate::command::Parameter;
use crate::entity::ColumnSource;
use crate::error::Error;
use crate::error::Result;
use crate::value::Value;

/// Appends one INSERT statement for `item` to `command`
///
/// Null members are left out of both the column and the value list. An
/// explicit `table` is used as given; otherwise the item's entity name is
/// escaped with `escape`. Every check runs before the command is touched.
pub fn generate_insert<S: ColumnSource + ?Sized>(
    command: &mut Command,
    item: Option<&S>,
    template: &str,
    table: Option<&str>,
    escape: KeywordEscape,
) -> Result<()> {
    let item = item.ok_or(Error::MissingItem)?;
    template::validate(template, 3)?;

    let table = match table.filter(|t| !t.trim().is_empty()) {
        Some(table) => table.to_string(),
        None => item.entity_name().ok_or(Error::MissingTableName)?.escaped(escape),
    };

    let mut columns = Vec::new();
    let mut placeholders = Vec::new();

    for (name, value) in item.column_value_pairs() {
        if matches!(value, Value::Null) {
            continue;
        }
        let placeholder = format!("@{}_p{}", name, command.parameters().len());
        columns.push(escape.wrap(&name));
        placeholders.push(placeholder.clone());
        command.push_parameter(Parameter::new(placeholder, value));
    }

    let statement = template::format_template(template, &[&table, &columns.join(","), &placeholders.join(",")]);
    tracing::debug!("Insert SQL: {}", statement.trim_end());
    command.append_text(&statement);

    Ok(())
}

/// One statement per item against the same command; on failure the command is left as it was
pub fn generate_inserts<'a, S, I>(
    command: &mut Command,
    items: I,
    template: &str,
    table: Option<&str>,
    escape: KeywordEscape,
) -> Result<()>
where
    S: ColumnSource + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let text = command.text().map(str::to_string);
    let parameter_count = command.parameters().len();

    for item in items {
        if let Err(e) = generate_insert(command, Some(item), template, table, escape) {
            command.restore(text, parameter_count);
            return Err(e);
        }
    }

    Ok(())
}
