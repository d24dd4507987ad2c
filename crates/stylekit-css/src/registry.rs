//! Property name resolution.
//!
//! Declaration names come in two forms:
//!
//! - generic names (`background-color`, `color`) looked up in a built-in
//!   table that lists the canonical identifiers each name may target;
//! - vendor names (`-xf-button-border-color`) of the form
//!   `<prefix><type>-<kebab-property>`, scoped to one type in the element's
//!   type chain.
//!
//! The element has the last word: it decides whether it exposes the
//! resolved identifier and what type, default and inheritability it has.

use crate::element::{PropertyDescriptor, Stylable};

/// A row of the generic property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericProperty {
    pub css_name: &'static str,
    /// Canonical identifiers tried in order.
    pub targets: &'static [&'static str],
    pub inherited: bool,
}

const fn generic(
    css_name: &'static str,
    targets: &'static [&'static str],
    inherited: bool,
) -> GenericProperty {
    GenericProperty {
        css_name,
        targets,
        inherited,
    }
}

static GENERIC_PROPERTIES: &[GenericProperty] = &[
    generic("background-color", &["BackgroundColor"], false),
    generic("border-color", &["BorderColor"], false),
    generic("border-radius", &["CornerRadius"], false),
    generic("border-width", &["BorderWidth"], false),
    generic("color", &["TextColor", "Color"], true),
    generic("column-gap", &["ColumnSpacing"], false),
    generic("direction", &["FlowDirection"], true),
    generic("font-family", &["FontFamily"], true),
    generic("font-size", &["FontSize"], true),
    generic("height", &["HeightRequest"], false),
    generic("line-height", &["LineHeight"], true),
    generic("margin", &["Margin"], false),
    generic("min-height", &["MinimumHeightRequest"], false),
    generic("min-width", &["MinimumWidthRequest"], false),
    generic("opacity", &["Opacity"], false),
    generic("padding", &["Padding"], false),
    generic("placeholder-color", &["PlaceholderColor"], true),
    generic("row-gap", &["RowSpacing"], false),
    generic("text-align", &["HorizontalTextAlignment"], true),
    generic("visibility", &["IsVisible"], true),
    generic("width", &["WidthRequest"], false),
];

/// Look up a generic css property name.
pub fn generic_property(css_name: &str) -> Option<&'static GenericProperty> {
    GENERIC_PROPERTIES
        .iter()
        .find(|p| p.css_name.eq_ignore_ascii_case(css_name))
}

/// A classified declaration property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
    Generic(&'static GenericProperty),
    /// Lowercased remainder after the vendor prefix, e.g. `button-border-color`.
    Vendor(String),
    Unknown(String),
}

impl PropertyName {
    /// Inheritability known from the name alone. Vendor names depend on the element.
    pub fn inherited(&self) -> Option<bool> {
        match self {
            PropertyName::Generic(p) => Some(p.inherited),
            PropertyName::Vendor(_) => None,
            PropertyName::Unknown(_) => Some(false),
        }
    }
}

/// Resolves declaration names against element capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRegistry {
    vendor_prefix: String,
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::new("-xf-")
    }
}

impl PropertyRegistry {
    pub fn new(vendor_prefix: impl Into<String>) -> Self {
        Self {
            vendor_prefix: vendor_prefix.into().to_ascii_lowercase(),
        }
    }

    pub fn vendor_prefix(&self) -> &str {
        &self.vendor_prefix
    }

    pub fn classify(&self, raw: &str) -> PropertyName {
        let lower = raw.trim().to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix(self.vendor_prefix.as_str()) {
            if !rest.is_empty() {
                return PropertyName::Vendor(rest.to_string());
            }
        }
        match generic_property(&lower) {
            Some(p) => PropertyName::Generic(p),
            None => PropertyName::Unknown(lower),
        }
    }

    /// Resolve a raw declaration name for `element`.
    pub fn resolve<E: Stylable>(&self, element: &E, raw: &str) -> Option<PropertyDescriptor> {
        self.resolve_name(element, &self.classify(raw), false)
    }

    /// Resolve a classified name. Inheriting lookups only accept inheritable properties.
    pub fn resolve_name<E: Stylable>(
        &self,
        element: &E,
        name: &PropertyName,
        inheriting: bool,
    ) -> Option<PropertyDescriptor> {
        let found = match name {
            PropertyName::Generic(p) => p.targets.iter().find_map(|t| element.style_property(t)),
            PropertyName::Vendor(rest) => resolve_vendor(element, rest),
            PropertyName::Unknown(_) => None,
        }?;
        if inheriting && !found.inherited {
            return None;
        }
        Some(found)
    }

    /// Build the vendor name for `property` on `type_name`.
    pub fn vendor_name(&self, type_name: &str, property: &str) -> String {
        to_vendor_name(&self.vendor_prefix, type_name, property)
    }
}

fn resolve_vendor<E: Stylable>(element: &E, rest: &str) -> Option<PropertyDescriptor> {
    if let Some((scope, property)) = rest.split_once('-') {
        let in_chain = element
            .type_names()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(scope));
        if in_chain {
            if let Some(found) = element.style_property(&kebab_to_pascal(property)) {
                return Some(found);
            }
        }
    }
    element.style_property(&kebab_to_pascal(rest))
}

/// `<prefix><lowercased type>-<kebab property>`, e.g. `-xf-button-border-color`.
pub fn to_vendor_name(prefix: &str, type_name: &str, property: &str) -> String {
    format!(
        "{}{}-{}",
        prefix,
        type_name.to_ascii_lowercase(),
        pascal_to_kebab(property)
    )
}

/// `BorderColor` -> `border-color`; every uppercase letter starts a new segment.
pub fn pascal_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// `border-color` -> `BorderColor`, `anchor-x` -> `AnchorX`.
pub fn kebab_to_pascal(name: &str) -> String {
    name.split('-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
