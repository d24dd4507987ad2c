//! Per-widget property values tagged with their origin.

use std::collections::HashMap;
use stylekit_css::{Value, ValueOrigin};

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    value: Value,
    origin: ValueOrigin,
}

/// Values explicitly written to a widget. Absent properties are `Unset`.
#[derive(Debug, Default, Clone)]
pub struct PropertyStore {
    slots: HashMap<&'static str, Slot>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.slots.get(property).map(|slot| &slot.value)
    }

    pub fn origin(&self, property: &str) -> ValueOrigin {
        self.slots
            .get(property)
            .map_or(ValueOrigin::Unset, |slot| slot.origin)
    }

    /// Write a user value. Always succeeds.
    pub fn set_user(&mut self, property: &'static str, value: Value) {
        self.slots.insert(
            property,
            Slot {
                value,
                origin: ValueOrigin::UserSet,
            },
        );
    }

    /// Write a style value unless the user already set the property.
    ///
    /// Returns whether the value was stored.
    pub fn set_style(&mut self, property: &'static str, value: Value) -> bool {
        if self.origin(property) == ValueOrigin::UserSet {
            return false;
        }
        self.slots.insert(
            property,
            Slot {
                value,
                origin: ValueOrigin::StyleSet,
            },
        );
        true
    }

    /// Remove a value regardless of origin.
    pub fn clear(&mut self, property: &str) {
        self.slots.remove(property);
    }

    /// Remove a style-set value. Returns whether one was removed.
    pub fn clear_style(&mut self, property: &str) -> bool {
        if self.origin(property) == ValueOrigin::StyleSet {
            self.slots.remove(property);
            true
        } else {
            false
        }
    }

    pub fn clear_all_style(&mut self) {
        self.slots
            .retain(|_, slot| slot.origin != ValueOrigin::StyleSet);
    }

    /// Number of properties with a value.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
