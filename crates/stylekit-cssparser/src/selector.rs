//! Selector model and parser.
//!
//! Supported forms: type names, `^base` type names, `#id`, `.class`, `*`,
//! compounds of those (`label.title#main`), descendant (whitespace) and
//! child (`>`) combinators, and comma-separated lists.

use crate::reader::{CssReader, Token};
use crate::{ParseError, ParseResult};
use smallvec::SmallVec;
use std::fmt;

/// One atomic match test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// `*`
    Universal,
    /// Concrete element type, e.g. `label`.
    Type(String),
    /// Element type or any of its base types, e.g. `^view`.
    BaseType(String),
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Universal => f.write_str("*"),
            SimpleSelector::Type(name) => f.write_str(name),
            SimpleSelector::BaseType(name) => write!(f, "^{}", name),
            SimpleSelector::Id(id) => write!(f, "#{}", id),
            SimpleSelector::Class(class) => write!(f, ".{}", class),
        }
    }
}

/// Simple selectors that must all match the same element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Compound {
    pub parts: SmallVec<[SimpleSelector; 2]>,
}

impl Compound {
    pub fn universal() -> Self {
        Self {
            parts: SmallVec::from_elem(SimpleSelector::Universal, 1),
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// Relation between two adjacent compounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: the parent.
    Child,
}

/// Selector precedence: (ids, classes, types), compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity {
    pub ids: u16,
    pub classes: u16,
    pub types: u16,
}

impl Specificity {
    pub const ZERO: Specificity = Specificity {
        ids: 0,
        classes: 0,
        types: 0,
    };

    pub fn new(ids: u16, classes: u16, types: u16) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.ids, self.classes, self.types)
    }
}

/// A complex selector.
///
/// `compounds` is in source order; `combinators[i]` joins `compounds[i]`
/// and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    compounds: SmallVec<[Compound; 2]>,
    combinators: SmallVec<[Combinator; 1]>,
    specificity: Specificity,
}

impl Selector {
    /// Build a selector from its parts. `combinators` must be one shorter than `compounds`.
    pub(crate) fn new(compounds: Vec<Compound>, combinators: Vec<Combinator>) -> Self {
        debug_assert_eq!(compounds.len(), combinators.len() + 1);
        let specificity = compute_specificity(&compounds);
        Self {
            compounds: compounds.into_iter().collect(),
            combinators: combinators.into_iter().collect(),
            specificity,
        }
    }

    /// `*`, specificity zero. Stands in for the selector of a bare declaration block.
    pub fn universal() -> Self {
        Self::new(vec![Compound::universal()], Vec::new())
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn combinators(&self) -> &[Combinator] {
        &self.combinators
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }
}

fn compute_specificity(compounds: &[Compound]) -> Specificity {
    let mut spec = Specificity::default();
    for part in compounds.iter().flat_map(|c| c.parts.iter()) {
        match part {
            SimpleSelector::Id(_) => spec.ids = spec.ids.saturating_add(1),
            SimpleSelector::Class(_) => spec.classes = spec.classes.saturating_add(1),
            SimpleSelector::Type(_) | SimpleSelector::BaseType(_) => {
                spec.types = spec.types.saturating_add(1)
            }
            SimpleSelector::Universal => {}
        }
    }
    spec
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                match self.combinators[i - 1] {
                    Combinator::Descendant => f.write_str(" ")?,
                    Combinator::Child => f.write_str(" > ")?,
                }
            }
            write!(f, "{}", compound)?;
        }
        Ok(())
    }
}

/// Comma-separated selectors sharing one declaration block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn single(selector: Selector) -> Self {
        Self {
            selectors: vec![selector],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.selectors.iter()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// Parse a selector list up to (not including) the opening `{`.
pub fn parse_selector_list(reader: &mut CssReader) -> ParseResult<SelectorList> {
    let mut list = SelectorList::default();
    reader.skip_whitespace()?;

    loop {
        list.selectors.push(parse_selector(reader)?);
        match reader.peek_token()? {
            Token::Delim(',') => {
                reader.next_token()?;
                reader.skip_whitespace()?;
            }
            Token::Delim('{') => return Ok(list),
            Token::Eof => {
                return Err(ParseError::UnexpectedEof {
                    context: "selector list",
                })
            }
            other => return Err(reader.syntax_error(format!("unexpected {:?} in selector", other))),
        }
    }
}

fn parse_selector(reader: &mut CssReader) -> ParseResult<Selector> {
    let mut compounds = vec![parse_compound(reader)?];
    let mut combinators = Vec::new();

    loop {
        let combinator = match reader.peek_token()? {
            Token::Whitespace => {
                reader.next_token()?;
                match reader.peek_token()? {
                    Token::Delim('>') => {
                        reader.next_token()?;
                        reader.skip_whitespace()?;
                        Combinator::Child
                    }
                    Token::Delim(',') | Token::Delim('{') | Token::Eof => break,
                    Token::Delim(c @ ('+' | '~')) => return Err(unsupported_combinator(reader, c)),
                    _ => Combinator::Descendant,
                }
            }
            Token::Delim('>') => {
                reader.next_token()?;
                reader.skip_whitespace()?;
                Combinator::Child
            }
            Token::Delim(c @ ('+' | '~')) => return Err(unsupported_combinator(reader, c)),
            _ => break,
        };
        combinators.push(combinator);
        compounds.push(parse_compound(reader)?);
    }

    Ok(Selector::new(compounds, combinators))
}

fn unsupported_combinator(reader: &CssReader, c: char) -> ParseError {
    reader.syntax_error(format!("unsupported combinator '{}'", c))
}

fn parse_compound(reader: &mut CssReader) -> ParseResult<Compound> {
    let mut compound = Compound::default();

    match reader.peek_token()? {
        Token::Delim('*') => {
            reader.next_token()?;
            compound.parts.push(SimpleSelector::Universal);
        }
        Token::Ident(name) => {
            reader.next_token()?;
            compound.parts.push(SimpleSelector::Type(name));
        }
        Token::Delim('^') => {
            reader.next_token()?;
            let name = expect_ident(reader, "base type name after '^'")?;
            compound.parts.push(SimpleSelector::BaseType(name));
        }
        _ => {}
    }

    loop {
        match reader.peek_token()? {
            Token::Delim('#') => {
                reader.next_token()?;
                let id = expect_ident(reader, "id after '#'")?;
                compound.parts.push(SimpleSelector::Id(id));
            }
            Token::Delim('.') => {
                reader.next_token()?;
                let class = expect_ident(reader, "class name after '.'")?;
                compound.parts.push(SimpleSelector::Class(class));
            }
            _ => break,
        }
    }

    if compound.parts.is_empty() {
        return Err(match reader.peek_token()? {
            Token::Eof => ParseError::UnexpectedEof {
                context: "selector",
            },
            _ => reader.syntax_error("expected selector"),
        });
    }
    Ok(compound)
}

fn expect_ident(reader: &mut CssReader, what: &str) -> ParseResult<String> {
    match reader.next_token()? {
        Token::Ident(name) => Ok(name),
        _ => Err(reader.syntax_error(format!("expected {}", what))),
    }
}
