//! Capabilities the style engine needs from the element tree.

use crate::values::{Value, ValueType};

/// Where a property's current value came from.
///
/// `UserSet` always wins: the engine never writes over it. `StyleSet` may be
/// replaced by a later style write or cleared back to `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrigin {
    #[default]
    Unset,
    StyleSet,
    UserSet,
}

/// Declared metadata of one stylable property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    /// Canonical property identifier, e.g. `BackgroundColor`.
    pub name: &'static str,
    pub value_type: ValueType,
    /// `None` when the default is decided by the platform.
    pub default: Option<Value>,
    /// Whether descendants pick up the value.
    pub inherited: bool,
}

/// An element whose properties can be styled.
pub trait Stylable {
    /// Concrete type name followed by its base types, most derived first.
    fn type_names(&self) -> Vec<&str>;

    fn style_id(&self) -> Option<String>;

    fn style_classes(&self) -> Vec<String>;

    /// Descriptor for a canonical property identifier, if this element exposes it.
    fn style_property(&self, name: &str) -> Option<PropertyDescriptor>;

    fn value_origin(&self, property: &str) -> ValueOrigin;

    /// Write `value` with origin [`ValueOrigin::StyleSet`].
    ///
    /// Returns whether the value was stored.
    fn set_style_value(&self, property: &str, value: Value) -> bool;

    /// Drop a style-set value, restoring the default. User-set values are kept.
    fn clear_style_value(&self, property: &str);

    /// Drop every style-set value on this element.
    fn clear_style_values(&self);

    /// Short description for diagnostics.
    fn describe(&self) -> String {
        self.type_names()
            .first()
            .map(|name| name.to_string())
            .unwrap_or_else(|| "<element>".to_string())
    }
}

/// Child enumeration for traversal, in stable order.
pub trait StyleTree: Stylable + Sized {
    fn style_children(&self) -> Vec<Self>;
}
