//! Splits command text into statements and binds named parameters positionally
//!
//! The text is lexed with the SQLite tokenizer from `sqlparser`. Quoted text
//! (`'..'`, `".."`, `[..]`, `` `..` ``) is copied verbatim, comments are
//! dropped, and each `@name`, `:name` or `$name` outside quotes becomes a `?`
//! bound to the matching parameter.

use sqlparser::dialect::SQLiteDialect;
use sqlparser::tokenizer::Location;
use sqlparser::tokenizer::Token;
use sqlparser::tokenizer::Tokenizer;
use sqlparser::tokenizer::Whitespace;

use super::Parameter;
use crate::error::Error;
use crate::error::Result;
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LexemeKind {
    Sql,
    Blank,
    LineComment,
    BlockComment,
    Separator,
    Parameter,
}

/// A slice of the command text, `start` being its byte offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Lexeme<'a> {
    pub kind:  LexemeKind,
    pub text:  &'a str,
    pub start: usize,
}

/// Maps tokenizer locations (1-based line and char column) back to byte offsets
struct Cursor<'a> {
    chars:  std::str::CharIndices<'a>,
    offset: usize,
    line:   u64,
    column: u64,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { chars: text.char_indices(), offset: 0, line: 1, column: 1 }
    }

    fn advance_to(&mut self, location: Location) -> usize {
        while (self.line, self.column) < (location.line, location.column) {
            let Some((index, c)) = self.chars.next() else {
                break;
            };
            self.offset = index + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset
    }
}

fn is_word_like(token: &Token) -> bool {
    matches!(token, Token::Word(_) | Token::Number(..))
}

fn is_bare_word(token: &Token) -> bool {
    matches!(token, Token::Word(word) if word.quote_style.is_none())
}

fn is_named_placeholder(name: &str) -> bool {
    name.strip_prefix('$').is_some_and(|rest| rest.starts_with(|c: char| c.is_alphabetic() || c == '_'))
}

pub(crate) fn lex(text: &str) -> Result<Vec<Lexeme<'_>>> {
    let dialect = SQLiteDialect {};
    let tokens = Tokenizer::new(&dialect, text).tokenize_with_location().map_err(|e| {
        tracing::warn!(error = %e, "Command text could not be tokenized");
        Error::Query(format!("Malformed command text: {e}"))
    })?;

    let mut lexemes = Vec::with_capacity(tokens.len());
    let mut cursor = Cursor::new(text);
    let mut i = 0;
    while i < tokens.len() {
        let start = cursor.offset;
        let mut end = cursor.advance_to(tokens[i].span.end);
        // `a@b` and `a:b` are not parameters
        let follows_word = i > 0 && is_word_like(&tokens[i - 1].token);

        let kind = match &tokens[i].token {
            Token::AtSign | Token::Colon
                if !follows_word && tokens.get(i + 1).is_some_and(|next| is_bare_word(&next.token)) =>
            {
                i += 1;
                end = cursor.advance_to(tokens[i].span.end);
                LexemeKind::Parameter
            }
            Token::Placeholder(name) if !follows_word && is_named_placeholder(name) => LexemeKind::Parameter,
            Token::SemiColon => LexemeKind::Separator,
            Token::Whitespace(Whitespace::SingleLineComment { .. }) => LexemeKind::LineComment,
            Token::Whitespace(Whitespace::MultiLineComment(_)) => LexemeKind::BlockComment,
            Token::Whitespace(_) => LexemeKind::Blank,
            _ => LexemeKind::Sql,
        };

        lexemes.push(Lexeme { kind, text: &text[start..end], start });
        i += 1;
    }

    Ok(lexemes)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Statement {
    pub sql:    String,
    pub values: Vec<Value>,
}

impl Statement {
    /// Whether the statement modifies rows, so rows it returns are `RETURNING` echoes
    pub fn writes(&self) -> bool {
        let keyword = self.sql.split_whitespace().next().unwrap_or_default();
        ["INSERT", "UPDATE", "DELETE", "REPLACE"].iter().any(|k| keyword.eq_ignore_ascii_case(k))
    }
}

#[derive(Default)]
struct Builder {
    sql:         String,
    values:      Vec<Value>,
    has_content: bool,
}

impl Builder {
    fn finish(&mut self, statements: &mut Vec<Statement>) {
        let builder = std::mem::take(self);
        if builder.has_content {
            statements.push(Statement { sql: builder.sql.trim().to_string(), values: builder.values });
        }
    }
}

pub(crate) fn split(text: &str, parameters: &[Parameter]) -> Result<Vec<Statement>> {
    let mut statements = Vec::new();
    let mut current = Builder::default();

    for lexeme in lex(text)? {
        match lexeme.kind {
            LexemeKind::Separator => current.finish(&mut statements),
            LexemeKind::LineComment => {
                if lexeme.text.ends_with('\n') {
                    current.sql.push('\n');
                }
            }
            LexemeKind::BlockComment => current.sql.push(' '),
            LexemeKind::Blank => current.sql.push_str(lexeme.text),
            LexemeKind::Parameter => {
                let token = lexeme.text;
                let parameter = parameters.iter().find(|p| p.answers_to(token)).ok_or_else(|| {
                    tracing::warn!(token = %token, "Command text references an unbound parameter");
                    Error::Query(format!("No value bound for parameter {token}"))
                })?;
                current.sql.push('?');
                current.values.push(parameter.value().clone());
                current.has_content = true;
            }
            LexemeKind::Sql => {
                current.sql.push_str(lexeme.text);
                current.has_content = true;
            }
        }
    }

    current.finish(&mut statements);
    Ok(statements)
}
