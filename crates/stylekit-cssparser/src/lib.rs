//! # StyleKit CSS Parser
//!
//! Tokenizer and grammar for the StyleKit stylesheet language: a subset of
//! CSS made of selector lists and `property: value;` declaration blocks.
//!
//! The parser is pure. The same text always produces the same AST, and
//! nothing here knows about element types or property semantics; value text
//! is kept verbatim for later stages to interpret.

pub mod declaration;
pub mod reader;
pub mod selector;

pub use declaration::{parse_declarations, DeclarationAst};
pub use reader::{CssReader, Token};
pub use selector::{
    parse_selector_list, Combinator, Compound, Selector, SelectorList, SimpleSelector,
    Specificity,
};

use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while parsing CSS.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input in {context}")]
    UnexpectedEof { context: &'static str },

    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// A parsed stylesheet AST.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StylesheetAst {
    pub rules: Vec<RuleAst>,
}

/// A parsed rule: a selector list and its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleAst {
    pub selectors: SelectorList,
    pub declarations: Vec<DeclarationAst>,
}

impl fmt::Display for RuleAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selectors)?;
        for decl in &self.declarations {
            write!(f, " {}", decl)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for StylesheetAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Parse a stylesheet from a string.
pub fn parse_stylesheet(css: &str) -> ParseResult<StylesheetAst> {
    parse_stylesheet_from(&mut CssReader::new(css))
}

/// Parse a stylesheet: a sequence of `selector-list { declarations }` rules.
///
/// At-rules are not supported and are skipped.
pub fn parse_stylesheet_from(reader: &mut CssReader) -> ParseResult<StylesheetAst> {
    let mut out = StylesheetAst::default();

    loop {
        reader.skip_whitespace()?;
        match reader.peek_token()? {
            Token::Eof => break,
            Token::Delim('@') => {
                reader.next_token()?;
                let name = match reader.next_token()? {
                    Token::Ident(name) => name,
                    _ => return Err(reader.syntax_error("expected at-rule name")),
                };
                warn!(at_rule = %name, line = reader.line(), "Skipping unsupported at-rule");
                reader.skip_at_rule()?;
            }
            _ => {
                let selectors = parse_selector_list(reader)?;
                // consume '{'
                reader.next_token()?;
                let declarations = parse_declarations(reader, '}', true)?;
                out.rules.push(RuleAst {
                    selectors,
                    declarations,
                });
            }
        }
    }

    debug!(rule_count = out.rules.len(), "Stylesheet parsed");
    Ok(out)
}

/// Parse a bare declaration block, ending at `terminator` or end of input.
pub fn parse_declaration_block(
    reader: &mut CssReader,
    terminator: char,
) -> ParseResult<Vec<DeclarationAst>> {
    parse_declarations(reader, terminator, false)
}
