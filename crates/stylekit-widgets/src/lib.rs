//! # StyleKit Widgets
//!
//! A concrete widget tree the StyleKit style engine can style.
//!
//! ## Design Goals
//!
//! 1. **Finite kinds**: Every widget type and its properties are declared up front
//! 2. **User intent**: Values set by application code are never overwritten by styles
//! 3. **Application resources**: Stylesheets attached to an application style its main page

pub mod application;
pub mod enums;
pub mod kinds;
pub mod store;
pub mod widget;

pub use application::Application;
pub use enums::{FlowDirection, ScrollBarVisibility, ScrollOrientation, StackOrientation, TextAlignment};
pub use kinds::{ContentModel, WidgetKind};
pub use store::PropertyStore;
pub use widget::Widget;

use stylekit_css::{CssError, ValueType};
use thiserror::Error;

/// Errors that can occur in widget operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WidgetError {
    #[error("{kind} has no property '{property}'")]
    PropertyNotFound { kind: WidgetKind, property: String },

    #[error("Property '{property}' expects a {expected} value")]
    TypeMismatch {
        property: String,
        expected: ValueType,
    },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error(transparent)]
    Css(#[from] CssError),
}
