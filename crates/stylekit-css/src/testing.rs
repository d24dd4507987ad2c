//! Minimal stylable tree for unit tests.

use crate::element::{PropertyDescriptor, Stylable, StyleTree, ValueOrigin};
use crate::values::{Value, ValueType};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

struct NodeData {
    types: Vec<&'static str>,
    id: Option<String>,
    classes: Vec<String>,
    properties: Vec<PropertyDescriptor>,
    values: RefCell<HashMap<&'static str, (Value, ValueOrigin)>>,
    frozen: Cell<bool>,
    children: RefCell<Vec<Node>>,
}

#[derive(Clone)]
pub(crate) struct Node(Rc<NodeData>);

pub(crate) fn color(name: &'static str, inherited: bool) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Color,
        default: None,
        inherited,
    }
}

pub(crate) fn float(name: &'static str, default: f64) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Float,
        default: Some(Value::Float(default)),
        inherited: false,
    }
}

impl Node {
    pub(crate) fn new(types: &[&'static str], properties: Vec<PropertyDescriptor>) -> Self {
        Node(Rc::new(NodeData {
            types: types.to_vec(),
            id: None,
            classes: Vec::new(),
            properties,
            values: RefCell::new(HashMap::new()),
            frozen: Cell::new(false),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Layout without text properties.
    pub(crate) fn layout() -> Self {
        Self::new(
            &["StackLayout", "Layout", "View", "VisualElement"],
            vec![color("BackgroundColor", false), float("Opacity", 1.0)],
        )
    }

    /// Text element with an inheritable text color.
    pub(crate) fn label() -> Self {
        Self::new(
            &["Label", "View", "VisualElement"],
            vec![
                color("BackgroundColor", false),
                color("TextColor", true),
                float("Opacity", 1.0),
            ],
        )
    }

    pub(crate) fn with_id(self, id: &str) -> Self {
        let mut data = Rc::try_unwrap(self.0).ok().expect("unshared node");
        data.id = Some(id.to_string());
        Node(Rc::new(data))
    }

    pub(crate) fn with_class(self, class: &str) -> Self {
        let mut data = Rc::try_unwrap(self.0).ok().expect("unshared node");
        data.classes.push(class.to_string());
        Node(Rc::new(data))
    }

    /// Refuse all further style writes.
    pub(crate) fn freeze(&self) {
        self.0.frozen.set(true);
    }

    pub(crate) fn add(&self, child: Node) -> &Self {
        self.0.children.borrow_mut().push(child);
        self
    }

    pub(crate) fn value(&self, property: &str) -> Option<Value> {
        self.0.values.borrow().get(property).map(|(v, _)| v.clone())
    }

    pub(crate) fn set_user(&self, property: &'static str, value: Value) {
        self.0
            .values
            .borrow_mut()
            .insert(property, (value, ValueOrigin::UserSet));
    }
}

impl Stylable for Node {
    fn type_names(&self) -> Vec<&str> {
        self.0.types.clone()
    }

    fn style_id(&self) -> Option<String> {
        self.0.id.clone()
    }

    fn style_classes(&self) -> Vec<String> {
        self.0.classes.clone()
    }

    fn style_property(&self, name: &str) -> Option<PropertyDescriptor> {
        self.0.properties.iter().find(|p| p.name == name).cloned()
    }

    fn value_origin(&self, property: &str) -> ValueOrigin {
        self.0
            .values
            .borrow()
            .get(property)
            .map(|(_, origin)| *origin)
            .unwrap_or_default()
    }

    fn set_style_value(&self, property: &str, value: Value) -> bool {
        if self.0.frozen.get() {
            return false;
        }
        let Some(descriptor) = self.style_property(property) else {
            return false;
        };
        self.0
            .values
            .borrow_mut()
            .insert(descriptor.name, (value, ValueOrigin::StyleSet));
        true
    }

    fn clear_style_value(&self, property: &str) {
        let mut values = self.0.values.borrow_mut();
        if values.get(property).is_some_and(|(_, o)| *o == ValueOrigin::StyleSet) {
            values.remove(property);
        }
    }

    fn clear_style_values(&self) {
        self.0
            .values
            .borrow_mut()
            .retain(|_, (_, origin)| *origin != ValueOrigin::StyleSet);
    }
}

impl StyleTree for Node {
    fn style_children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }
}
