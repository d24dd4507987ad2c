//! Typed property values and the text-to-value converter.

use crate::color::{parse_color, Color};
use std::fmt;
use thiserror::Error;

/// Errors raised when declaration text cannot be converted to a property type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid value '{value}' for {target}")]
    InvalidValue { value: String, target: String },

    #[error("Value '{value}' is out of range for {target}")]
    OutOfRange { value: String, target: String },

    #[error("'{value}' is not a member of {enum_name}")]
    UnknownMember {
        value: String,
        enum_name: &'static str,
    },
}

/// Thickness of the four edges of a box (margin, padding).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub const ZERO: Thickness = Thickness::uniform(0.0);

    pub const fn uniform(size: f64) -> Self {
        Self {
            left: size,
            top: size,
            right: size,
            bottom: size,
        }
    }

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Member names of an enumeration property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumType {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

/// A member of an [`EnumType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    pub enum_name: &'static str,
    pub member: &'static str,
}

/// Native type of a stylable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
    Color,
    Thickness,
    Enum(EnumType),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => f.write_str("bool"),
            ValueType::Int => f.write_str("int"),
            ValueType::Float => f.write_str("float"),
            ValueType::String => f.write_str("string"),
            ValueType::Color => f.write_str("color"),
            ValueType::Thickness => f.write_str("thickness"),
            ValueType::Enum(e) => f.write_str(e.name),
        }
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f64),
    String(String),
    Color(Color),
    Thickness(Thickness),
    Enum(EnumValue),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_thickness(&self) -> Option<Thickness> {
        match self {
            Value::Thickness(t) => Some(*t),
            _ => None,
        }
    }

    /// Whether this value has the shape of `value_type`.
    pub fn is_of(&self, value_type: &ValueType) -> bool {
        match (self, value_type) {
            (Value::Enum(v), ValueType::Enum(e)) => v.enum_name == e.name,
            (Value::Bool(_), ValueType::Bool)
            | (Value::Int(_), ValueType::Int)
            | (Value::Float(_), ValueType::Float)
            | (Value::String(_), ValueType::String)
            | (Value::Color(_), ValueType::Color)
            | (Value::Thickness(_), ValueType::Thickness) => true,
            _ => false,
        }
    }
}

/// Rust enums exposed as enumeration properties.
pub trait StyleEnum: Sized + Copy {
    const TYPE: EnumType;

    fn from_member(member: &str) -> Option<Self>;

    fn member(self) -> &'static str;

    fn to_value(self) -> Value {
        Value::Enum(EnumValue {
            enum_name: Self::TYPE.name,
            member: self.member(),
        })
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Enum(e) if e.enum_name == Self::TYPE.name => Self::from_member(e.member),
            _ => None,
        }
    }
}

/// Convert declaration text to a value of `target`.
pub fn convert(text: &str, target: &ValueType) -> Result<Value, ConversionError> {
    let text = text.trim();
    let invalid = || ConversionError::InvalidValue {
        value: text.to_string(),
        target: target.to_string(),
    };

    match target {
        ValueType::Bool => parse_bool(text).map(Value::Bool).ok_or_else(invalid),
        ValueType::Int => parse_int(text, target).map(Value::Int),
        ValueType::Float => parse_float(text).map(Value::Float).ok_or_else(invalid),
        ValueType::String => Ok(Value::String(unquote(text).to_string())),
        ValueType::Color => parse_color(text).map(Value::Color).ok_or_else(invalid),
        ValueType::Thickness => parse_thickness(text).map(Value::Thickness).ok_or_else(invalid),
        ValueType::Enum(e) => parse_enum(text, e).map(Value::Enum),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "visible" => Some(true),
        "false" | "hidden" => Some(false),
        _ => None,
    }
}

fn parse_int(text: &str, target: &ValueType) -> Result<i32, ConversionError> {
    let wide = text
        .parse::<i64>()
        .map_err(|_| ConversionError::InvalidValue {
            value: text.to_string(),
            target: target.to_string(),
        })?;
    i32::try_from(wide).map_err(|_| ConversionError::OutOfRange {
        value: text.to_string(),
        target: target.to_string(),
    })
}

fn parse_float(text: &str) -> Option<f64> {
    let number = text.strip_suffix("px").unwrap_or(text).trim_end();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 1 to 4 lengths in CSS order: top, right, bottom, left.
fn parse_thickness(text: &str) -> Option<Thickness> {
    let parts = text
        .split_whitespace()
        .map(parse_float)
        .collect::<Option<Vec<f64>>>()?;
    match parts.as_slice() {
        [all] => Some(Thickness::uniform(*all)),
        [vertical, horizontal] => Some(Thickness::new(*horizontal, *vertical, *horizontal, *vertical)),
        [top, horizontal, bottom] => Some(Thickness::new(*horizontal, *top, *horizontal, *bottom)),
        [top, right, bottom, left] => Some(Thickness::new(*left, *top, *right, *bottom)),
        _ => None,
    }
}

fn parse_enum(text: &str, enum_type: &EnumType) -> Result<EnumValue, ConversionError> {
    let wanted = normalize_member(text);
    enum_type
        .members
        .iter()
        .find(|member| normalize_member(member) == wanted)
        .map(|member| EnumValue {
            enum_name: enum_type.name,
            member: *member,
        })
        .ok_or_else(|| ConversionError::UnknownMember {
            value: text.to_string(),
            enum_name: enum_type.name,
        })
}

fn normalize_member(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}
