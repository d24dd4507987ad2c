//! Stylesheets and bare styles.

use crate::cascade::{Cascade, Scope};
use crate::element::StyleTree;
use crate::options::{ApplyReport, StyleContext};
use crate::CssError;
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use stylekit_cssparser::{
    parse_declaration_block, parse_stylesheet_from, CssReader, DeclarationAst, RuleAst, Selector,
    SelectorList,
};
use tracing::debug;

/// CSS property value (keyword or unparsed text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Reset to the property's declared default.
    Initial,
    /// Text converted against the target property's type at apply time.
    Specified(String),
}

impl PropertyValue {
    fn from_text(text: &str) -> Self {
        if text.eq_ignore_ascii_case("initial") {
            PropertyValue::Initial
        } else {
            PropertyValue::Specified(text.to_string())
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Initial => f.write_str("initial"),
            PropertyValue::Specified(text) => f.write_str(text),
        }
    }
}

/// A CSS declaration (property: value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub property: String,
    pub value: PropertyValue,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_ascii_lowercase(),
            value: PropertyValue::from_text(value),
            important: false,
        }
    }
}

impl From<DeclarationAst> for Declaration {
    fn from(ast: DeclarationAst) -> Self {
        Self {
            important: ast.important,
            ..Declaration::new(&ast.property, &ast.value)
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        f.write_str(";")
    }
}

/// A CSS rule (selectors + declarations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selectors: SelectorList,
    pub declarations: Vec<Declaration>,
}

impl From<RuleAst> for Rule {
    fn from(ast: RuleAst) -> Self {
        Self {
            selectors: ast.selectors,
            declarations: ast.declarations.into_iter().map(Declaration::from).collect(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.selectors)?;
        for decl in &self.declarations {
            write!(f, " {}", decl)?;
        }
        f.write_str(" }")
    }
}

/// A parsed stylesheet: rules in source order.
///
/// Immutable once parsed; one stylesheet can be applied to any number of trees.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parse a CSS string into a stylesheet.
    pub fn parse(css: &str) -> Result<Self, CssError> {
        debug!(len = css.len(), "Parsing stylesheet");
        Self::parse_from(&mut CssReader::new(css))
    }

    /// Parse the rest of `reader` as a stylesheet.
    pub fn parse_from(reader: &mut CssReader) -> Result<Self, CssError> {
        let ast = parse_stylesheet_from(reader)?;
        Ok(Self {
            rules: ast.rules.into_iter().map(Rule::from).collect(),
        })
    }

    /// Parse a stylesheet from any byte source.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, CssError> {
        Self::parse_from(&mut CssReader::from_reader(source)?)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Get the number of rules in this stylesheet.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Apply to every element under (and including) `root` that a rule matches.
    pub fn apply<E: StyleTree>(&self, root: &E, ctx: &StyleContext) -> ApplyReport {
        Cascade::new(&self.rules, Scope::Selectors, ctx).run(root)
    }
}

impl FromStr for StyleSheet {
    type Err = CssError;

    fn from_str(css: &str) -> Result<Self, Self::Err> {
        Self::parse(css)
    }
}

/// Later rules follow earlier ones in source order.
impl FromIterator<Rule> for StyleSheet {
    fn from_iter<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

impl Extend<Rule> for StyleSheet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, rules: I) {
        self.rules.extend(rules);
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// A selector-less declaration block.
///
/// Applies unconditionally to the element it is applied to; descendants only
/// receive its inheritable properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    rule: Rule,
}

impl Style {
    /// Parse declarations up to `terminator` (consumed) or end of input.
    pub fn parse(reader: &mut CssReader, terminator: char) -> Result<Self, CssError> {
        let declarations = parse_declaration_block(reader, terminator)?;
        Ok(Self::from_declarations(
            declarations.into_iter().map(Declaration::from).collect(),
        ))
    }

    pub fn from_declarations(declarations: Vec<Declaration>) -> Self {
        Self {
            rule: Rule {
                selectors: SelectorList::single(Selector::universal()),
                declarations,
            },
        }
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.rule.declarations
    }

    pub fn apply<E: StyleTree>(&self, root: &E, ctx: &StyleContext) -> ApplyReport {
        Cascade::new(std::slice::from_ref(&self.rule), Scope::Root, ctx).run(root)
    }
}

impl FromStr for Style {
    type Err = CssError;

    fn from_str(css: &str) -> Result<Self, Self::Err> {
        Self::parse(&mut CssReader::new(css), '}')
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, decl) in self.rule.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", decl)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylekit_cssparser::ParseError;

    #[test]
    fn test_parse_stylesheet() {
        let css = r#"
            label {
                color: black;
            }
            .container, #main {
                width: 100;
                margin: initial;
            }
        "#;

        let stylesheet = StyleSheet::parse(css).unwrap();
        assert_eq!(stylesheet.rule_count(), 2);
        assert_eq!(stylesheet.rules()[1].selectors.len(), 2);
        assert_eq!(
            stylesheet.rules()[1].declarations[1].value,
            PropertyValue::Initial
        );
    }

    #[test]
    fn property_names_are_lowercased() {
        let style: Style = "Background-Color: #ff0000;".parse().unwrap();
        assert_eq!(style.declarations()[0].property, "background-color");
        assert_eq!(
            style.declarations()[0].value,
            PropertyValue::Specified("#ff0000".into())
        );
    }

    #[test]
    fn syntax_errors_surface() {
        assert!(matches!(
            StyleSheet::parse("label { color red; }"),
            Err(CssError::Parse(ParseError::Syntax { .. }))
        ));
        assert!(matches!(
            StyleSheet::parse("label { color: red;"),
            Err(CssError::Parse(ParseError::UnexpectedEof { .. }))
        ));
        assert!(matches!(
            "color".parse::<Style>(),
            Err(CssError::Parse(ParseError::Syntax { .. }))
        ));
    }

    #[test]
    fn style_stops_at_terminator() {
        let mut reader = CssReader::new("color: red; } label { color: blue; }");
        let style = Style::parse(&mut reader, '}').unwrap();
        assert_eq!(style.declarations().len(), 1);
        let rest = StyleSheet::parse_from(&mut reader).unwrap();
        assert_eq!(rest.rule_count(), 1);
    }

    #[test]
    fn display_round_trips() {
        let sheet = StyleSheet::parse("label,entry{color:red;opacity:.5 !important}").unwrap();
        assert_eq!(StyleSheet::parse(&sheet.to_string()).unwrap(), sheet);

        let style: Style = "color: red; margin: 1 2".parse().unwrap();
        assert_eq!(style.to_string(), "color: red; margin: 1 2;");
        assert_eq!(style.to_string().parse::<Style>().unwrap(), style);
    }

    #[test]
    fn from_reader() {
        let sheet = StyleSheet::from_reader("label { color: red; }".as_bytes()).unwrap();
        assert_eq!(sheet.rule_count(), 1);
    }

    #[test]
    fn sheets_concatenate_in_order() {
        let first = StyleSheet::parse("label { color: red; }").unwrap();
        let second = StyleSheet::parse("entry { color: blue; } button { color: lime; }").unwrap();
        let mut combined: StyleSheet = first.rules().iter().cloned().collect();
        combined.extend(second.rules().iter().cloned());
        assert_eq!(combined.rule_count(), 3);
        assert_eq!(combined.rules()[2].selectors.to_string(), "button");
    }
}
