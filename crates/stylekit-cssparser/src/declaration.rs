//! Declaration block parser.

use crate::reader::{CssReader, Token};
use crate::{ParseError, ParseResult};
use std::fmt;
use tracing::debug;

/// A parsed declaration: property name and raw value text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclarationAst {
    pub property: String,
    pub value: String,
    pub important: bool,
}

impl DeclarationAst {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }
}

impl fmt::Display for DeclarationAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        f.write_str(";")
    }
}

/// Parse `name: value;` pairs up to `terminator`.
///
/// The terminator is consumed. When `require_terminator` is false, end of
/// input also ends the block; otherwise it is an error.
pub fn parse_declarations(
    reader: &mut CssReader,
    terminator: char,
    require_terminator: bool,
) -> ParseResult<Vec<DeclarationAst>> {
    let mut declarations = Vec::new();

    loop {
        reader.skip_whitespace()?;
        match reader.next_token()? {
            Token::Eof if require_terminator => {
                return Err(ParseError::UnexpectedEof {
                    context: "declaration block",
                })
            }
            Token::Eof => break,
            Token::Delim(c) if c == terminator => break,
            Token::Delim(';') => continue,
            Token::Ident(property) => {
                reader.skip_whitespace()?;
                if reader.next_token()? != Token::Delim(':') {
                    return Err(reader.syntax_error(format!("expected ':' after '{}'", property)));
                }

                let raw = reader.read_value(terminator)?;
                if reader.peek_token()? == Token::Delim(';') {
                    reader.next_token()?;
                }

                let (value, important) = strip_important(&raw);
                if value.is_empty() {
                    debug!(%property, "Dropping declaration with empty value");
                    continue;
                }
                declarations.push(DeclarationAst {
                    property,
                    value: value.to_string(),
                    important,
                });
            }
            other => {
                return Err(reader.syntax_error(format!("expected property name, found {:?}", other)))
            }
        }
    }

    Ok(declarations)
}

fn strip_important(value: &str) -> (&str, bool) {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(idx) if lower[idx..].trim_end() == "!important" => (value[..idx].trim_end(), true),
        _ => (value, false),
    }
}
