//! Commands: SQL text, bound parameters and execution settings
//!
//! A [`Command`] is built fluently and is a single-threaded unit of work.
//! [`DatabaseCommand`] pairs one with a connection and runs it.

mod database_command;
mod observers;
mod parameter;
pub(crate) mod script;

use std::time::Duration;

pub use database_command::CommandDebugInfo;
pub use database_command::DatabaseCommand;
pub use observers::CommandObserver;
pub use observers::FailureObserver;
pub use observers::Observers;
pub use parameter::Parameter;

use script::LexemeKind;

use crate::entity::ColumnSource;
use crate::error::Result;
use crate::query;
use crate::query::Dialect;
use crate::query::KeywordEscape;
use crate::value::ColumnType;
use crate::value::IntoValue;
use crate::value::render;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommandType {
    #[default]
    Text,
    StoredProcedure,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Command {
    text:         Option<String>,
    parameters:   Vec<Parameter>,
    timeout:      Option<Duration>,
    command_type: CommandType,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// Appends to the current text, setting it when none exists yet
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn command_type(&self) -> CommandType {
        self.command_type
    }

    pub fn set_type(&mut self, command_type: CommandType) -> &mut Self {
        self.command_type = command_type;
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub(crate) fn push_parameter(&mut self, parameter: Parameter) {
        tracing::trace!(name = parameter.name(), value = ?parameter.value(), "Binding parameter");
        self.parameters.push(parameter);
    }

    /// Rolls text and parameters back to an earlier snapshot
    pub(crate) fn restore(&mut self, text: Option<String>, parameter_count: usize) {
        self.text = text;
        self.parameters.truncate(parameter_count);
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl IntoValue) -> &mut Self {
        self.push_parameter(Parameter::new(name, value));
        self
    }

    pub fn add_typed_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl IntoValue,
        column_type: ColumnType,
    ) -> Result<&mut Self> {
        self.push_parameter(Parameter::typed(name, value, column_type)?);
        Ok(self)
    }

    pub fn add_parameters(&mut self, parameters: impl IntoIterator<Item = Parameter>) -> &mut Self {
        for parameter in parameters {
            self.push_parameter(parameter);
        }
        self
    }

    /// Binds every name/value pair of a map or list
    pub fn add_parameter_map<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: IntoValue,
    {
        for (name, value) in values {
            self.add_parameter(name, value);
        }
        self
    }

    pub fn clear_parameters(&mut self) -> &mut Self {
        self.parameters.clear();
        self
    }

    /// See [`query::generate_insert`]
    pub fn generate_insert<S: ColumnSource + ?Sized>(
        &mut self,
        item: &S,
        template: &str,
        table: Option<&str>,
        escape: KeywordEscape,
    ) -> Result<&mut Self> {
        query::generate_insert(self, Some(item), template, table, escape)?;
        Ok(self)
    }

    /// See [`query::generate_inserts`]
    pub fn generate_inserts<'a, S, I>(
        &mut self,
        items: I,
        template: &str,
        table: Option<&str>,
        escape: KeywordEscape,
    ) -> Result<&mut Self>
    where
        S: ColumnSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        query::generate_inserts(self, items, template, table, escape)?;
        Ok(self)
    }

    /// Insert with the dialect's template and escaping
    pub fn generate_insert_for<S: ColumnSource + ?Sized>(
        &mut self,
        dialect: Dialect,
        item: &S,
        table: Option<&str>,
    ) -> Result<&mut Self> {
        self.generate_insert(item, dialect.insert_template(), table, dialect.escape())
    }

    pub fn generate_inserts_for<'a, S, I>(&mut self, dialect: Dialect, items: I, table: Option<&str>) -> Result<&mut Self>
    where
        S: ColumnSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        self.generate_inserts(items, dialect.insert_template(), table, dialect.escape())
    }

    pub fn generate_select_by_id(
        &mut self,
        template: &str,
        table: &str,
        id: impl IntoValue,
        escape: KeywordEscape,
    ) -> Result<&mut Self> {
        query::generate_select_by_id(self, template, table, id, escape)?;
        Ok(self)
    }

    /// See [`query::expand_list_parameter`]
    pub fn expand_list_parameter<I, V>(
        &mut self,
        placeholder: &str,
        values: I,
        column_type: Option<ColumnType>,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: IntoValue,
    {
        query::expand_list_parameter(self, placeholder, values, column_type)?;
        Ok(self)
    }

    /// The text with each bound parameter token replaced by `/*@name=*/'value'`
    ///
    /// Tokens inside quotes or comments, and names embedded in longer
    /// identifiers, are left alone. Text that cannot be tokenized is returned as is.
    pub fn annotated_text(&self) -> Option<String> {
        let text = self.text.as_deref()?;
        let Ok(lexemes) = script::lex(text) else {
            return Some(text.to_string());
        };

        let mut annotated = String::with_capacity(text.len());
        for lexeme in lexemes {
            let bound = match lexeme.kind {
                LexemeKind::Parameter => self.parameters.iter().find(|p| p.answers_to(lexeme.text)),
                _ => None,
            };
            match bound {
                Some(parameter) => {
                    let value = render(parameter.value()).replace('\'', "''");
                    annotated.push_str(&format!("/*{}=*/'{value}'", lexeme.text));
                }
                None => annotated.push_str(lexeme.text),
            }
        }
        Some(annotated)
    }
}
