//! Enumerations exposed as stylable properties.

use std::fmt;
use stylekit_css::{EnumType, StyleEnum};

macro_rules! style_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $default:ident $(, $member:ident)* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $default,
            $($member,)*
        }

        impl StyleEnum for $name {
            const TYPE: EnumType = EnumType {
                name: stringify!($name),
                members: &[stringify!($default) $(, stringify!($member))*],
            };

            fn from_member(member: &str) -> Option<Self> {
                match member {
                    stringify!($default) => Some($name::$default),
                    $(stringify!($member) => Some($name::$member),)*
                    _ => None,
                }
            }

            fn member(self) -> &'static str {
                match self {
                    $name::$default => stringify!($default),
                    $($name::$member => stringify!($member),)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.member())
            }
        }
    };
}

style_enum! {
    /// Horizontal or vertical placement of text within its box.
    pub enum TextAlignment { Start, Center, End }
}

style_enum! {
    /// Directions a scroll view scrolls in.
    pub enum ScrollOrientation { Vertical, Horizontal, Both, Neither }
}

style_enum! {
    pub enum ScrollBarVisibility { Default, Always, Never }
}

style_enum! {
    /// Stacking direction of a stack layout.
    pub enum StackOrientation { Vertical, Horizontal }
}

style_enum! {
    /// Layout direction; `MatchParent` follows the parent element.
    pub enum FlowDirection { MatchParent, LeftToRight, RightToLeft }
}
