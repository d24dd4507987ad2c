//! Character reader and tokenizer.
//!
//! The reader owns its input and hands out one token at a time. Parsers can
//! stop on a caller-supplied terminator, so a declaration block may be read
//! out of a larger stream (for example up to the closing `}` of a rule).

use crate::{ParseError, ParseResult};
use std::io::Read;

/// Lexical tokens produced by [`CssReader::next_token`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifier made of letters, digits, `-` and `_` (e.g. `label`, `-xf-button-border-color`).
    Ident(String),
    /// Numeric literal (e.g. `16`, `4.2`).
    Number(String),
    /// Quoted string, quotes removed.
    Str(String),
    /// A single punctuation character.
    Delim(char),
    /// A run of whitespace (comments in between are folded in).
    Whitespace,
    /// End of input.
    Eof,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    pos: usize,
    line: usize,
    column: usize,
}

/// Streaming CSS reader.
pub struct CssReader {
    input: Vec<char>,
    cursor: Cursor,
}

impl CssReader {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            cursor: Cursor {
                pos: 0,
                line: 1,
                column: 1,
            },
        }
    }

    /// Read all of `source` and wrap it.
    pub fn from_reader<R: Read>(mut source: R) -> ParseResult<Self> {
        let mut text = String::new();
        source
            .read_to_string(&mut text)
            .map_err(|e| ParseError::Io(e.to_string()))?;
        Ok(Self::new(&text))
    }

    /// Current line (1-based).
    pub fn line(&self) -> usize {
        self.cursor.line
    }

    /// Current column (1-based).
    pub fn column(&self) -> usize {
        self.cursor.column
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.pos >= self.input.len()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.cursor.pos).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.cursor.pos + offset).copied()
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.cursor.pos += 1;
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 1;
        } else {
            self.cursor.column += 1;
        }
        Some(ch)
    }

    /// Build a syntax error at the current position.
    pub fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.cursor.line,
            column: self.cursor.column,
            message: message.into(),
        }
    }

    /// Skip whitespace and comments. Returns true if any whitespace was seen.
    fn skip_trivia(&mut self) -> ParseResult<bool> {
        let mut saw_space = false;
        loop {
            match self.current_char() {
                Some(c) if c.is_whitespace() => {
                    self.consume();
                    saw_space = true;
                }
                Some('/') if self.peek_char(1) == Some('*') => self.skip_comment()?,
                _ => return Ok(saw_space),
            }
        }
    }

    fn skip_comment(&mut self) -> ParseResult<()> {
        let err = self.syntax_error("unterminated comment");
        self.consume();
        self.consume();
        while let Some(c) = self.consume() {
            if c == '*' && self.current_char() == Some('/') {
                self.consume();
                return Ok(());
            }
        }
        Err(err)
    }

    /// Skip whitespace and comments.
    pub fn skip_whitespace(&mut self) -> ParseResult<()> {
        self.skip_trivia().map(|_| ())
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> ParseResult<Token> {
        if self.skip_trivia()? {
            return Ok(Token::Whitespace);
        }
        let Some(c) = self.current_char() else {
            return Ok(Token::Eof);
        };

        if c == '"' || c == '\'' {
            return self.read_string(c).map(Token::Str);
        }
        if c.is_ascii_digit() || (c == '.' && self.peek_char(1).is_some_and(|n| n.is_ascii_digit()))
        {
            return Ok(Token::Number(self.read_number()));
        }
        if is_ident_start(c, self.peek_char(1)) {
            return Ok(Token::Ident(self.read_ident()));
        }

        self.consume();
        Ok(Token::Delim(c))
    }

    /// Return the next token without consuming it.
    pub fn peek_token(&mut self) -> ParseResult<Token> {
        let saved = self.cursor;
        let token = self.next_token();
        self.cursor = saved;
        token
    }

    fn read_string(&mut self, quote: char) -> ParseResult<String> {
        let err = self.syntax_error("unterminated string");
        self.consume();
        let mut out = String::new();
        loop {
            match self.consume() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.consume() {
                    Some(escaped) => out.push(escaped),
                    None => return Err(err),
                },
                Some('\n') | None => return Err(err),
                Some(c) => out.push(c),
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut out = String::new();
        let mut seen_dot = false;
        while let Some(c) = self.current_char() {
            if c.is_ascii_digit() {
                out.push(c);
            } else if c == '.'
                && !seen_dot
                && self.peek_char(1).is_some_and(|n| n.is_ascii_digit())
            {
                seen_dot = true;
                out.push(c);
            } else {
                break;
            }
            self.consume();
        }
        out
    }

    fn read_ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.current_char() {
            if !is_ident_char(c) {
                break;
            }
            out.push(c);
            self.consume();
        }
        out
    }

    /// Read a declaration value up to `;`, `terminator` or end of input.
    ///
    /// The stop character is left unconsumed. Quoted strings and parentheses
    /// are kept intact, comments are dropped, and whitespace runs collapse to
    /// a single space.
    pub fn read_value(&mut self, terminator: char) -> ParseResult<String> {
        let mut out = String::new();
        let mut depth = 0usize;
        let mut pending_space = false;

        loop {
            if self.skip_trivia()? {
                pending_space = true;
            }
            let Some(c) = self.current_char() else {
                break;
            };
            if depth == 0 && (c == ';' || c == terminator) {
                break;
            }
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;

            match c {
                '"' | '\'' => {
                    let text = self.read_string(c)?;
                    out.push(c);
                    for ch in text.chars() {
                        if ch == c || ch == '\\' {
                            out.push('\\');
                        }
                        out.push(ch);
                    }
                    out.push(c);
                }
                '(' => {
                    depth += 1;
                    self.consume();
                    out.push(c);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    self.consume();
                    out.push(c);
                }
                _ => {
                    self.consume();
                    out.push(c);
                }
            }
        }

        Ok(out)
    }

    /// Skip the rest of an at-rule: a statement ending in `;` or a balanced block.
    pub fn skip_at_rule(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        loop {
            self.skip_trivia()?;
            match self.current_char() {
                None if depth == 0 => return Ok(()),
                None => {
                    return Err(ParseError::UnexpectedEof {
                        context: "at-rule block",
                    })
                }
                Some(q @ ('"' | '\'')) => {
                    self.read_string(q)?;
                }
                Some(';') if depth == 0 => {
                    self.consume();
                    return Ok(());
                }
                Some('{') => {
                    depth += 1;
                    self.consume();
                }
                Some('}') => {
                    self.consume();
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.consume();
                }
            }
        }
    }
}

fn is_ident_start(c: char, next: Option<char>) -> bool {
    if c == '-' {
        return next.is_some_and(|n| n == '-' || n == '_' || n.is_alphabetic());
    }
    c == '_' || c.is_alphabetic() || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c == '-' || c == '_' || c.is_alphanumeric() || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(css: &str) -> Vec<Token> {
        let mut reader = CssReader::new(css);
        let mut out = Vec::new();
        loop {
            let token = reader.next_token().unwrap();
            if token == Token::Eof {
                break;
            }
            out.push(token);
        }
        out
    }

    #[test]
    fn tokenizes_selector_punctuation() {
        assert_eq!(
            tokens("label.title > #main, *"),
            vec![
                Token::Ident("label".into()),
                Token::Delim('.'),
                Token::Ident("title".into()),
                Token::Whitespace,
                Token::Delim('>'),
                Token::Whitespace,
                Token::Delim('#'),
                Token::Ident("main".into()),
                Token::Delim(','),
                Token::Whitespace,
                Token::Delim('*'),
            ]
        );
    }

    #[test]
    fn vendor_names_are_single_identifiers() {
        assert_eq!(
            tokens("-xf-button-border-color:"),
            vec![
                Token::Ident("-xf-button-border-color".into()),
                Token::Delim(':')
            ]
        );
    }

    #[test]
    fn numbers_and_strings() {
        assert_eq!(
            tokens("4.2 'a b' \"q\\\"\""),
            vec![
                Token::Number("4.2".into()),
                Token::Whitespace,
                Token::Str("a b".into()),
                Token::Whitespace,
                Token::Str("q\"".into()),
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            tokens("/* lead */label/* x */{"),
            vec![Token::Ident("label".into()), Token::Delim('{')]
        );
    }

    #[test]
    fn unterminated_literals_are_errors() {
        let mut reader = CssReader::new("'open");
        assert!(matches!(
            reader.next_token(),
            Err(ParseError::Syntax { line: 1, column: 1, .. })
        ));

        let mut reader = CssReader::new("a /* open");
        assert_eq!(reader.next_token().unwrap(), Token::Ident("a".into()));
        assert!(matches!(reader.next_token(), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn peek_does_not_advance() {
        let mut reader = CssReader::new("a b");
        assert_eq!(reader.peek_token().unwrap(), Token::Ident("a".into()));
        assert_eq!(reader.next_token().unwrap(), Token::Ident("a".into()));
        assert_eq!(reader.next_token().unwrap(), Token::Whitespace);
    }

    #[test]
    fn read_value_stops_at_terminators() {
        let mut reader = CssReader::new("  rgb(1, 2;3)  /* c */ red ;rest");
        assert_eq!(reader.read_value('}').unwrap(), "rgb(1, 2;3) red");
        assert_eq!(reader.next_token().unwrap(), Token::Delim(';'));

        let mut reader = CssReader::new("your   name here}");
        assert_eq!(reader.read_value('}').unwrap(), "your name here");
        assert_eq!(reader.next_token().unwrap(), Token::Delim('}'));
    }

    #[test]
    fn read_value_keeps_quoted_text() {
        let mut reader = CssReader::new("\"a;b\";");
        assert_eq!(reader.read_value('}').unwrap(), "\"a;b\"");
    }

    #[test]
    fn tracks_lines() {
        let mut reader = CssReader::new("a\n  b");
        reader.next_token().unwrap();
        reader.next_token().unwrap();
        assert_eq!(reader.line(), 2);
        assert_eq!(reader.column(), 3);
    }

    #[test]
    fn skips_at_rules() {
        let mut reader = CssReader::new(" screen { a { b: c; } } label");
        reader.skip_at_rule().unwrap();
        reader.skip_whitespace().unwrap();
        assert_eq!(reader.next_token().unwrap(), Token::Ident("label".into()));

        let mut reader = CssReader::new(" url('x;y'); label");
        reader.skip_at_rule().unwrap();
        assert_eq!(reader.next_token().unwrap(), Token::Whitespace);
    }

    #[test]
    fn from_reader_reads_everything() {
        let mut reader = CssReader::from_reader("label".as_bytes()).unwrap();
        assert_eq!(reader.next_token().unwrap(), Token::Ident("label".into()));
        assert!(reader.is_eof());
    }
}
