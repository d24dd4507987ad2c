//! Widget tree handle.

use crate::kinds::{ContentModel, WidgetKind};
use crate::store::PropertyStore;
use crate::WidgetError;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use stylekit_css::{
    Color, PropertyDescriptor, StyleEnum, StyleTree, Stylable, Thickness, Value, ValueOrigin,
};
use tracing::trace;

struct WidgetNode {
    kind: WidgetKind,
    style_id: RefCell<Option<String>>,
    classes: RefCell<Vec<String>>,
    /// Parent widget (weak reference to avoid cycles).
    parent: RefCell<Option<Weak<WidgetNode>>>,
    children: RefCell<Vec<Widget>>,
    store: RefCell<PropertyStore>,
}

/// Shared handle to a widget. Clones refer to the same widget.
#[derive(Clone)]
pub struct Widget(Rc<WidgetNode>);

impl Widget {
    pub fn new(kind: WidgetKind) -> Self {
        Widget(Rc::new(WidgetNode {
            kind,
            style_id: RefCell::new(None),
            classes: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
            store: RefCell::new(PropertyStore::new()),
        }))
    }

    pub fn kind(&self) -> WidgetKind {
        self.0.kind
    }

    /// Set the id matched by `#id` selectors.
    pub fn set_style_id(&self, id: impl Into<String>) {
        *self.0.style_id.borrow_mut() = Some(id.into());
    }

    /// Add a class matched by `.class` selectors. Duplicates are ignored.
    pub fn add_class(&self, class: impl Into<String>) {
        let class = class.into();
        let mut classes = self.0.classes.borrow_mut();
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|c| c != class);
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.classes.borrow().clone()
    }

    /// Builder form of [`Widget::set_style_id`].
    pub fn with_style_id(self, id: impl Into<String>) -> Self {
        self.set_style_id(id);
        self
    }

    /// Builder form of [`Widget::add_class`].
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    // Tree

    /// Get parent widget.
    pub fn parent(&self) -> Option<Widget> {
        self.0
            .parent
            .borrow()
            .as_ref()
            .and_then(|w| w.upgrade())
            .map(Widget)
    }

    /// Get child widgets.
    pub fn children(&self) -> Vec<Widget> {
        self.0.children.borrow().clone()
    }

    /// Single child of a page or scroll view.
    pub fn content(&self) -> Option<Widget> {
        match self.kind().content_model() {
            ContentModel::Single => self.0.children.borrow().first().cloned(),
            _ => None,
        }
    }

    /// Append a child, checking the kind's content model.
    pub fn add_child(&self, child: &Widget) -> Result<(), WidgetError> {
        match self.kind().content_model() {
            ContentModel::Leaf => {
                return Err(invalid(format!("{} cannot have children", self.kind())))
            }
            ContentModel::Single if !self.0.children.borrow().is_empty() => {
                return Err(invalid(format!(
                    "{} already has content; use set_content",
                    self.kind()
                )))
            }
            ContentModel::Pages if !child.kind().is_page() => {
                return Err(invalid(format!("{} only holds pages", self.kind())))
            }
            ContentModel::Single | ContentModel::Views if child.kind().is_page() => {
                return Err(invalid(format!(
                    "a {} cannot be placed inside {}",
                    child.kind(),
                    self.kind()
                )))
            }
            _ => {}
        }
        if child.parent().is_some() {
            return Err(invalid(format!("{} already has a parent", child.kind())));
        }
        if self.has_ancestor_or_self(child) {
            return Err(invalid("a widget cannot contain its own ancestor".to_string()));
        }

        *child.0.parent.borrow_mut() = Some(Rc::downgrade(&self.0));
        self.0.children.borrow_mut().push(child.clone());
        Ok(())
    }

    /// Replace the single child of a page or scroll view.
    pub fn set_content(&self, content: &Widget) -> Result<(), WidgetError> {
        if self.kind().content_model() != ContentModel::Single {
            return Err(invalid(format!("{} has no content slot", self.kind())));
        }
        let previous = self.content();
        if let Some(previous) = &previous {
            if previous == content {
                return Ok(());
            }
            self.remove_child(previous);
        }
        let result = self.add_child(content);
        if result.is_err() {
            if let Some(previous) = previous {
                *previous.0.parent.borrow_mut() = Some(Rc::downgrade(&self.0));
                self.0.children.borrow_mut().push(previous);
            }
        }
        result
    }

    /// Detach `child`. Returns whether it was a child of this widget.
    pub fn remove_child(&self, child: &Widget) -> bool {
        let mut children = self.0.children.borrow_mut();
        let Some(index) = children.iter().position(|c| c == child) else {
            return false;
        };
        children.remove(index);
        *child.0.parent.borrow_mut() = None;
        true
    }

    fn has_ancestor_or_self(&self, other: &Widget) -> bool {
        let mut current = Some(self.clone());
        while let Some(widget) = current {
            if &widget == other {
                return true;
            }
            current = widget.parent();
        }
        false
    }

    /// Visit this widget and all descendants, depth-first.
    pub fn traverse<F: FnMut(&Widget)>(&self, f: &mut F) {
        f(self);
        for child in self.children() {
            child.traverse(f);
        }
    }

    /// First widget in the subtree with the given style id.
    pub fn find_by_style_id(&self, id: &str) -> Option<Widget> {
        if self.0.style_id.borrow().as_deref() == Some(id) {
            return Some(self.clone());
        }
        self.children()
            .iter()
            .find_map(|child| child.find_by_style_id(id))
    }

    // Properties

    fn descriptor(&self, property: &str) -> Result<&'static PropertyDescriptor, WidgetError> {
        self.kind()
            .property(property)
            .ok_or_else(|| WidgetError::PropertyNotFound {
                kind: self.kind(),
                property: property.to_string(),
            })
    }

    /// Current value: the stored one, else the declared default.
    ///
    /// `None` for undeclared properties and for platform-default values.
    pub fn get(&self, property: &str) -> Option<Value> {
        let descriptor = self.kind().property(property)?;
        self.0
            .store
            .borrow()
            .get(property)
            .cloned()
            .or_else(|| descriptor.default.clone())
    }

    /// Origin of the current value.
    pub fn origin(&self, property: &str) -> ValueOrigin {
        self.0.store.borrow().origin(property)
    }

    /// Set a property from application code. Styles never overwrite it.
    pub fn set(&self, property: &str, value: Value) -> Result<(), WidgetError> {
        let descriptor = self.descriptor(property)?;
        if !value.is_of(&descriptor.value_type) {
            return Err(WidgetError::TypeMismatch {
                property: property.to_string(),
                expected: descriptor.value_type,
            });
        }
        self.0.store.borrow_mut().set_user(descriptor.name, value);
        Ok(())
    }

    /// Drop the value set by application code, whatever its origin.
    pub fn clear(&self, property: &str) {
        self.0.store.borrow_mut().clear(property);
    }

    pub fn get_enum<T: StyleEnum>(&self, property: &str) -> Option<T> {
        self.get(property).as_ref().and_then(T::from_value)
    }

    pub fn set_enum<T: StyleEnum>(&self, property: &str, value: T) -> Result<(), WidgetError> {
        self.set(property, value.to_value())
    }

    pub fn background_color(&self) -> Option<Color> {
        self.get("BackgroundColor")?.as_color()
    }

    pub fn set_background_color(&self, color: Color) -> Result<(), WidgetError> {
        self.set("BackgroundColor", Value::Color(color))
    }

    /// `None` when the kind has no text or the platform default applies.
    pub fn text_color(&self) -> Option<Color> {
        self.get("TextColor")?.as_color()
    }

    pub fn set_text_color(&self, color: Color) -> Result<(), WidgetError> {
        self.set("TextColor", Value::Color(color))
    }

    pub fn opacity(&self) -> f64 {
        self.get("Opacity").and_then(|v| v.as_float()).unwrap_or(1.0)
    }

    pub fn is_visible(&self) -> bool {
        self.get("IsVisible").and_then(|v| v.as_bool()).unwrap_or(true)
    }

    pub fn margin(&self) -> Thickness {
        self.get("Margin")
            .and_then(|v| v.as_thickness())
            .unwrap_or_default()
    }
}

fn invalid(message: String) -> WidgetError {
    WidgetError::InvalidOperation(message)
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Widget {}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("kind", &self.0.kind)
            .field("style_id", &self.0.style_id.borrow())
            .field("classes", &self.0.classes.borrow())
            .field("children", &self.0.children.borrow().len())
            .finish()
    }
}

impl Stylable for Widget {
    fn type_names(&self) -> Vec<&str> {
        self.kind().type_chain().to_vec()
    }

    fn style_id(&self) -> Option<String> {
        self.0.style_id.borrow().clone()
    }

    fn style_classes(&self) -> Vec<String> {
        self.classes()
    }

    fn style_property(&self, name: &str) -> Option<PropertyDescriptor> {
        self.kind().property(name).cloned()
    }

    fn value_origin(&self, property: &str) -> ValueOrigin {
        self.origin(property)
    }

    fn set_style_value(&self, property: &str, value: Value) -> bool {
        let Some(descriptor) = self.kind().property(property) else {
            trace!(kind = %self.kind(), property, "Ignoring style write to undeclared property");
            return false;
        };
        if !value.is_of(&descriptor.value_type) {
            trace!(kind = %self.kind(), property, "Ignoring mistyped style write");
            return false;
        }
        self.0.store.borrow_mut().set_style(descriptor.name, value)
    }

    fn clear_style_value(&self, property: &str) {
        self.0.store.borrow_mut().clear_style(property);
    }

    fn clear_style_values(&self) {
        self.0.store.borrow_mut().clear_all_style();
    }

    fn describe(&self) -> String {
        match self.0.style_id.borrow().as_deref() {
            Some(id) => format!("{}#{}", self.kind(), id),
            None => self.kind().to_string(),
        }
    }
}

impl StyleTree for Widget {
    fn style_children(&self) -> Vec<Self> {
        self.children()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::StackOrientation;

    #[test]
    fn test_node_relationships() {
        let layout = Widget::new(WidgetKind::StackLayout);
        let first = Widget::new(WidgetKind::Label);
        let second = Widget::new(WidgetKind::Button);
        layout.add_child(&first).unwrap();
        layout.add_child(&second).unwrap();

        assert_eq!(layout.children(), vec![first.clone(), second.clone()]);
        assert_eq!(first.parent(), Some(layout.clone()));
        assert!(layout.parent().is_none());

        assert!(layout.remove_child(&first));
        assert!(first.parent().is_none());
        assert!(!layout.remove_child(&first));
    }

    #[test]
    fn content_model_is_enforced() {
        let label = Widget::new(WidgetKind::Label);
        let page = Widget::new(WidgetKind::ContentPage);
        let tabs = Widget::new(WidgetKind::TabbedPage);
        let layout = Widget::new(WidgetKind::StackLayout);

        assert!(label.add_child(&Widget::new(WidgetKind::Label)).is_err());
        assert!(layout.add_child(&page).is_err());
        assert!(tabs.add_child(&label).is_err());
        tabs.add_child(&page).unwrap();

        page.add_child(&layout).unwrap();
        assert!(matches!(
            page.add_child(&label),
            Err(WidgetError::InvalidOperation(_))
        ));
        assert!(layout.add_child(&layout).is_err());
    }

    #[test]
    fn set_content_replaces() {
        let page = Widget::new(WidgetKind::ContentPage);
        let first = Widget::new(WidgetKind::Label);
        let second = Widget::new(WidgetKind::Entry);

        page.set_content(&first).unwrap();
        page.set_content(&second).unwrap();
        assert_eq!(page.content(), Some(second));
        assert!(first.parent().is_none());

        let layout = Widget::new(WidgetKind::Grid);
        assert!(layout.set_content(&first).is_err());
    }

    #[test]
    fn failed_set_content_keeps_previous() {
        let page = Widget::new(WidgetKind::ContentPage);
        let label = Widget::new(WidgetKind::Label);
        page.set_content(&label).unwrap();

        let other = Widget::new(WidgetKind::ContentPage);
        assert!(page.set_content(&other).is_err());
        assert_eq!(page.content(), Some(label.clone()));
        assert_eq!(label.parent(), Some(page));
    }

    #[test]
    fn cycles_are_rejected() {
        let outer = Widget::new(WidgetKind::StackLayout);
        let inner = Widget::new(WidgetKind::StackLayout);
        outer.add_child(&inner).unwrap();
        let detached = outer.clone();
        // `outer` has no parent, so only the ancestry check can catch this
        assert!(inner.add_child(&detached).is_err());
    }

    #[test]
    fn user_values_and_defaults() {
        let stack = Widget::new(WidgetKind::StackLayout);
        assert_eq!(stack.get("Spacing"), Some(Value::Float(6.0)));
        assert_eq!(stack.origin("Spacing"), ValueOrigin::Unset);
        assert_eq!(stack.background_color(), None);
        assert_eq!(
            stack.get_enum::<StackOrientation>("Orientation"),
            Some(StackOrientation::Vertical)
        );

        stack.set_background_color(Color::PINK).unwrap();
        assert_eq!(stack.background_color(), Some(Color::PINK));
        assert_eq!(stack.origin("BackgroundColor"), ValueOrigin::UserSet);

        stack
            .set_enum("Orientation", StackOrientation::Horizontal)
            .unwrap();
        assert_eq!(
            stack.get_enum::<StackOrientation>("Orientation"),
            Some(StackOrientation::Horizontal)
        );

        assert!(matches!(
            stack.set("Spacing", Value::Int(3)),
            Err(WidgetError::TypeMismatch { .. })
        ));
        assert!(matches!(
            stack.set_text_color(Color::RED),
            Err(WidgetError::PropertyNotFound { .. })
        ));
        assert_eq!(stack.get("TextColor"), None);

        stack.clear("BackgroundColor");
        assert_eq!(stack.background_color(), None);
    }

    #[test]
    fn style_writes_respect_user_values() {
        let label = Widget::new(WidgetKind::Label);
        assert!(label.set_style_value("TextColor", Value::Color(Color::RED)));
        assert_eq!(label.origin("TextColor"), ValueOrigin::StyleSet);

        label.set_text_color(Color::BLUE).unwrap();
        assert!(!label.set_style_value("TextColor", Value::Color(Color::RED)));
        assert_eq!(label.text_color(), Some(Color::BLUE));

        assert!(!label.set_style_value("Opacity", Value::String("half".into())));
        assert_eq!(label.opacity(), 1.0);
        assert!(!label.set_style_value("Spacing", Value::Float(4.0)));

        label.clear_style_values();
        assert_eq!(label.text_color(), Some(Color::BLUE));
    }

    #[test]
    fn find_and_describe() {
        let page = Widget::new(WidgetKind::ContentPage);
        let layout = Widget::new(WidgetKind::StackLayout);
        let label = Widget::new(WidgetKind::Label).with_style_id("title").with_class("big");
        layout.add_child(&label).unwrap();
        page.set_content(&layout).unwrap();

        assert_eq!(page.find_by_style_id("title"), Some(label.clone()));
        assert_eq!(label.describe(), "Label#title");
        assert_eq!(label.classes(), vec!["big".to_string()]);
        assert_eq!(label.type_names(), vec!["Label", "View", "VisualElement", "Element"]);

        let mut count = 0;
        page.traverse(&mut |_| count += 1);
        assert_eq!(count, 3);
    }
}
