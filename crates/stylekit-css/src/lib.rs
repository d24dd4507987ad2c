//! # StyleKit CSS
//!
//! Style resolution for StyleKit element trees.
//!
//! ## Design Goals
//!
//! 1. **Property resolution**: Map generic and vendor-prefixed names to the
//!    properties an element declares
//! 2. **Value conversion**: Turn declaration text into typed values
//! 3. **Cascade**: Apply importance, specificity and source order
//! 4. **Inheritance**: Propagate inheritable properties to descendants
//! 5. **User intent**: Never overwrite a value the application set itself

pub mod cascade;
pub mod color;
pub mod element;
mod matching;
pub mod options;
pub mod registry;
pub mod stylesheet;
pub mod values;

#[cfg(test)]
mod testing;

pub use cascade::reset_styles;
pub use color::{parse_color, Color};
pub use element::{PropertyDescriptor, Stylable, StyleTree, ValueOrigin};
pub use options::{ApplyReport, Diagnostic, StyleContext, StyleOptions};
pub use registry::{
    generic_property, kebab_to_pascal, pascal_to_kebab, to_vendor_name, GenericProperty,
    PropertyName, PropertyRegistry,
};
pub use stylesheet::{Declaration, PropertyValue, Rule, Style, StyleSheet};
pub use values::{
    convert, ConversionError, EnumType, EnumValue, StyleEnum, Thickness, Value, ValueType,
};

pub use stylekit_cssparser::{CssReader, ParseError, Specificity};

use thiserror::Error;

/// Errors that can occur in CSS operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CssError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Property '{property}' not found on {element}")]
    PropertyNotFound { property: String, element: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Config error: {0}")]
    Config(String),
}
