use crate::command::Command;
use crate::command::Parameter;
use crate::command::script;
use crate::command::script::LexemeKind;
use crate::error::ExpansionError;
use crate::error::Result;
use crate::value::ColumnType;
use crate::value::IntoValue;
use crate::value::Value;

/// Byte offsets where `token` occurs as a whole parameter name outside quotes and comments
fn occurrences(text: &str, token: &str) -> Result<Vec<usize>> {
    let lexemes = script::lex(text)?;
    Ok(lexemes
        .into_iter()
        .filter(|lexeme| matches!(lexeme.kind, LexemeKind::Parameter | LexemeKind::Sql) && lexeme.text == token)
        .map(|lexeme| lexeme.start)
        .collect())
}

/// Rewrites the single `placeholder` in the command text into one parameter per value
///
/// `IN (@Ids)` with three values becomes `IN (@Ids_p0,@Ids_p1,@Ids_p2)`, the
/// suffix continuing from the command's current parameter count. Nothing is
/// bound or rewritten unless every check passes.
pub fn expand_list_parameter<I, V>(
    command: &mut Command,
    placeholder: &str,
    values: I,
    column_type: Option<ColumnType>,
) -> Result<()>
where
    I: IntoIterator<Item = V>,
    V: IntoValue,
{
    if placeholder.trim().is_empty() {
        return Err(ExpansionError::BlankPlaceholder.into());
    }

    let values: Vec<Value> = values.into_iter().map(IntoValue::into_value).collect();
    if values.is_empty() {
        return Err(ExpansionError::EmptyValues { placeholder: placeholder.to_string() }.into());
    }

    let text = command.text().ok_or(ExpansionError::CommandTextUnset)?;
    let found = occurrences(text, placeholder)?;
    let start = match found.as_slice() {
        [] => return Err(ExpansionError::PlaceholderNotFound { placeholder: placeholder.to_string() }.into()),
        [start] => *start,
        _ => {
            return Err(ExpansionError::PlaceholderRepeated {
                placeholder: placeholder.to_string(),
                occurrences: found.len(),
            }
            .into());
        }
    };

    let values = match column_type {
        Some(column_type) => values.into_iter().map(|v| column_type.coerce(v)).collect::<Result<Vec<_>>>()?,
        None => values,
    };

    let base = command.parameters().len();
    let names: Vec<String> = (0..values.len()).map(|idx| format!("{}_p{}", placeholder, base + idx)).collect();

    let mut rewritten = String::with_capacity(text.len() + names.iter().map(|n| n.len() + 1).sum::<usize>());
    rewritten.push_str(&text[..start]);
    rewritten.push_str(&names.join(","));
    rewritten.push_str(&text[start + placeholder.len()..]);

    tracing::trace!(placeholder, count = names.len(), "Expanded list parameter");
    command.set_text(rewritten);
    for (name, value) in names.into_iter().zip(values) {
        command.push_parameter(Parameter { name, value, column_type });
    }

    Ok(())
}
