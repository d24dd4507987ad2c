//! Selector matching.

use crate::element::Stylable;
use std::collections::HashSet;
use stylekit_cssparser::{Combinator, Compound, Selector, SimpleSelector};

/// What selector matching needs to know about an element, captured once per visit.
#[derive(Debug, Clone, Default)]
pub(crate) struct ElementInfo {
    types: Vec<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl ElementInfo {
    pub(crate) fn of<E: Stylable>(element: &E) -> Self {
        Self {
            types: element.type_names().iter().map(|t| t.to_string()).collect(),
            id: element.style_id(),
            classes: element.style_classes(),
        }
    }
}

/// Selector matcher. `ancestors` runs from the traversal root down to the parent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Matcher {
    pub case_sensitive_types: bool,
}

impl Matcher {
    pub(crate) fn matches(
        &self,
        selector: &Selector,
        element: &ElementInfo,
        ancestors: &[ElementInfo],
    ) -> bool {
        let Some(last) = selector.compounds().len().checked_sub(1) else {
            return false;
        };
        let mut failed = HashSet::new();
        self.matches_from(selector, last, element, ancestors, &mut failed)
    }

    /// `ancestors` is always a prefix of the full chain, so its length identifies
    /// `element`. `failed` caches (compound, element) pairs known not to match.
    fn matches_from(
        &self,
        selector: &Selector,
        index: usize,
        element: &ElementInfo,
        ancestors: &[ElementInfo],
        failed: &mut HashSet<(usize, usize)>,
    ) -> bool {
        let state = (index, ancestors.len());
        if failed.contains(&state) {
            return false;
        }
        let matched = self.compound_matches(&selector.compounds()[index], element)
            && (index == 0
                || match selector.combinators()[index - 1] {
                    Combinator::Child => match ancestors.split_last() {
                        Some((parent, rest)) => {
                            self.matches_from(selector, index - 1, parent, rest, failed)
                        }
                        None => false,
                    },
                    Combinator::Descendant => (0..ancestors.len()).rev().any(|i| {
                        self.matches_from(selector, index - 1, &ancestors[i], &ancestors[..i], failed)
                    }),
                });
        if !matched {
            failed.insert(state);
        }
        matched
    }

    fn compound_matches(&self, compound: &Compound, element: &ElementInfo) -> bool {
        compound.parts.iter().all(|part| match part {
            SimpleSelector::Universal => true,
            SimpleSelector::Type(name) => element
                .types
                .first()
                .is_some_and(|t| self.type_eq(t, name)),
            SimpleSelector::BaseType(name) => element.types.iter().any(|t| self.type_eq(t, name)),
            SimpleSelector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            SimpleSelector::Class(class) => element.classes.iter().any(|c| c == class),
        })
    }

    fn type_eq(&self, type_name: &str, selector: &str) -> bool {
        if self.case_sensitive_types {
            type_name == selector
        } else {
            type_name.eq_ignore_ascii_case(selector)
        }
    }
}
