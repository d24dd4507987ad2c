//! Cascade resolution and apply.
//!
//! One depth-first pass over the tree. At every element:
//!
//! 1. collect declarations of rules with a selector matching the element;
//! 2. order them by importance, specificity, then source order, and keep the
//!    best convertible declaration per resolved property;
//! 3. fill remaining inheritable properties from declarations matched on
//!    ancestors (nearest ancestor first);
//! 4. write the winners, except over user-set values;
//! 5. hand inheritable declarations down to the children, best first, so a
//!    descendant falls back past an unconvertible one the same way a direct
//!    match does.

use crate::element::{PropertyDescriptor, Stylable, StyleTree, ValueOrigin};
use crate::matching::{ElementInfo, Matcher};
use crate::options::{ApplyReport, Diagnostic, StyleContext};
use crate::stylesheet::{Declaration, PropertyValue, Rule};
use crate::values::{convert, Value};
use crate::CssError;
use std::collections::BTreeMap;
use stylekit_cssparser::Specificity;
use tracing::{debug, trace, warn};

/// Which elements the rules may match directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Any element a selector matches.
    Selectors,
    /// Only the element the apply starts at.
    Root,
}

/// Importance, then specificity, then source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Priority {
    important: bool,
    specificity: Specificity,
    order: (usize, usize),
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'r> {
    decl: &'r Declaration,
    priority: Priority,
}

/// An inheritable declaration matched on an ancestor.
#[derive(Debug, Clone, Copy)]
struct Inherited<'r> {
    decl: &'r Declaration,
    depth: usize,
    priority: Priority,
}

/// Per css name, the declarations of the nearest ancestor that matched it, best first.
type InheritedMap<'r> = BTreeMap<String, Vec<Inherited<'r>>>;

/// `None` restores the property default.
type Resolved = Option<Value>;

pub(crate) struct Cascade<'a, 'r> {
    rules: &'r [Rule],
    scope: Scope,
    ctx: &'a StyleContext,
    matcher: Matcher,
    report: ApplyReport,
}

impl<'a, 'r> Cascade<'a, 'r> {
    pub(crate) fn new(rules: &'r [Rule], scope: Scope, ctx: &'a StyleContext) -> Self {
        Self {
            rules,
            scope,
            ctx,
            matcher: Matcher {
                case_sensitive_types: ctx.options().case_sensitive_type_selectors,
            },
            report: ApplyReport::default(),
        }
    }

    pub(crate) fn run<E: StyleTree>(mut self, root: &E) -> ApplyReport {
        let mut ancestors = Vec::new();
        self.visit(root, &mut ancestors, &InheritedMap::new(), 0);
        debug!(
            visited = self.report.visited,
            applied = self.report.applied,
            skipped_user_set = self.report.skipped_user_set,
            diagnostics = self.report.diagnostics.len(),
            "Styles applied"
        );
        self.report
    }

    fn visit<E: StyleTree>(
        &mut self,
        element: &E,
        ancestors: &mut Vec<ElementInfo>,
        inherited: &InheritedMap<'r>,
        depth: usize,
    ) {
        self.report.visited += 1;
        let ctx = self.ctx;
        let info = ElementInfo::of(element);

        let mut candidates = self.matching_declarations(&info, ancestors, depth);
        candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut winners: BTreeMap<&'static str, Resolved> = BTreeMap::new();
        let mut handed_down: InheritedMap<'r> = InheritedMap::new();

        for candidate in &candidates {
            let registry = ctx.registry();
            let name = registry.classify(&candidate.decl.property);
            let descriptor = registry.resolve_name(element, &name, false);

            let inheritable = name
                .inherited()
                .unwrap_or_else(|| descriptor.as_ref().is_some_and(|d| d.inherited));
            if inheritable {
                handed_down
                    .entry(candidate.decl.property.clone())
                    .or_default()
                    .push(Inherited {
                        decl: candidate.decl,
                        depth,
                        priority: candidate.priority,
                    });
            }

            let Some(descriptor) = descriptor else {
                if inheritable {
                    trace!(
                        element = %element.describe(),
                        property = %candidate.decl.property,
                        "Property not exposed, handing down only"
                    );
                } else {
                    let error = CssError::PropertyNotFound {
                        property: candidate.decl.property.clone(),
                        element: element.describe(),
                    };
                    self.diagnose(element, candidate.decl, error);
                }
                continue;
            };

            if winners.contains_key(descriptor.name) {
                continue;
            }
            match resolve_value(candidate.decl, &descriptor) {
                Ok(value) => {
                    winners.insert(descriptor.name, value);
                }
                Err(error) => self.diagnose(element, candidate.decl, error),
            }
        }

        let mut from_ancestors: Vec<&Inherited<'r>> = inherited.values().flatten().collect();
        from_ancestors.sort_by(|a, b| {
            b.depth
                .cmp(&a.depth)
                .then_with(|| b.priority.cmp(&a.priority))
        });
        for entry in from_ancestors {
            let registry = ctx.registry();
            let name = registry.classify(&entry.decl.property);
            let Some(descriptor) = registry.resolve_name(element, &name, true) else {
                continue;
            };
            if winners.contains_key(descriptor.name) {
                continue;
            }
            match resolve_value(entry.decl, &descriptor) {
                Ok(value) => {
                    winners.insert(descriptor.name, value);
                }
                Err(error) => self.diagnose(element, entry.decl, error),
            }
        }

        for (property, value) in winners {
            if element.value_origin(property) == ValueOrigin::UserSet {
                trace!(element = %element.describe(), property, "Keeping user-set value");
                self.report.skipped_user_set += 1;
                continue;
            }
            let written = match value {
                Some(value) => element.set_style_value(property, value),
                None => {
                    element.clear_style_value(property);
                    true
                }
            };
            if written {
                self.report.applied += 1;
            } else {
                trace!(element = %element.describe(), property, "Style write refused");
            }
        }

        let merged;
        let next = if handed_down.is_empty() {
            inherited
        } else {
            let mut map = inherited.clone();
            map.extend(handed_down);
            merged = map;
            &merged
        };

        let children = element.style_children();
        ancestors.push(info);
        for child in &children {
            self.visit(child, ancestors, next, depth + 1);
        }
        ancestors.pop();
    }

    fn matching_declarations(
        &self,
        info: &ElementInfo,
        ancestors: &[ElementInfo],
        depth: usize,
    ) -> Vec<Candidate<'r>> {
        let mut out = Vec::new();
        for (rule_index, rule) in self.rules.iter().enumerate() {
            let specificity = match self.scope {
                Scope::Root if depth > 0 => None,
                Scope::Root => Some(Specificity::ZERO),
                Scope::Selectors => rule
                    .selectors
                    .iter()
                    .filter(|s| self.matcher.matches(s, info, ancestors))
                    .map(|s| s.specificity())
                    .max(),
            };
            let Some(specificity) = specificity else {
                continue;
            };
            trace!(rule = rule_index, %specificity, "Rule matched");

            for (decl_index, decl) in rule.declarations.iter().enumerate() {
                out.push(Candidate {
                    decl,
                    priority: Priority {
                        important: decl.important,
                        specificity,
                        order: (rule_index, decl_index),
                    },
                });
            }
        }
        out
    }

    fn diagnose<E: Stylable>(&mut self, element: &E, decl: &Declaration, error: CssError) {
        let element = element.describe();
        warn!(%element, property = %decl.property, %error, "Skipping declaration");
        let diagnostic = Diagnostic {
            element,
            property: decl.property.clone(),
            value: decl.value.to_string(),
            error,
        };
        self.report
            .push_diagnostic(diagnostic, self.ctx.options().max_diagnostics);
    }
}

fn resolve_value(decl: &Declaration, descriptor: &PropertyDescriptor) -> Result<Resolved, CssError> {
    match &decl.value {
        PropertyValue::Initial => Ok(descriptor.default.clone()),
        PropertyValue::Specified(text) => Ok(Some(convert(text, &descriptor.value_type)?)),
    }
}

/// Clear every style-set value in the tree rooted at `root`, leaving user-set values alone.
pub fn reset_styles<E: StyleTree>(root: &E) {
    root.clear_style_values();
    for child in root.style_children() {
        reset_styles(&child);
    }
}
