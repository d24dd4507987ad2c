//! Widget kinds, their type chains and declared style properties.

use crate::enums::{
    FlowDirection, ScrollBarVisibility, ScrollOrientation, StackOrientation, TextAlignment,
};
use std::fmt;
use stylekit_css::{EnumValue, PropertyDescriptor, StyleEnum, Thickness, Value, ValueType};

const fn color(name: &'static str, inherited: bool) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Color,
        default: None,
        inherited,
    }
}

const fn float(name: &'static str, default: f64) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Float,
        default: Some(Value::Float(default)),
        inherited: false,
    }
}

/// Float with a platform-decided default.
const fn float_unset(name: &'static str, inherited: bool) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Float,
        default: None,
        inherited,
    }
}

const fn int(name: &'static str, default: i32) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Int,
        default: Some(Value::Int(default)),
        inherited: false,
    }
}

const fn boolean(name: &'static str, default: bool, inherited: bool) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Bool,
        default: Some(Value::Bool(default)),
        inherited,
    }
}

const fn string(name: &'static str, inherited: bool) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::String,
        default: None,
        inherited,
    }
}

const fn thickness(name: &'static str) -> PropertyDescriptor {
    PropertyDescriptor {
        name,
        value_type: ValueType::Thickness,
        default: Some(Value::Thickness(Thickness::ZERO)),
        inherited: false,
    }
}

/// Enumeration property defaulting to the first member.
const fn enumeration<T: StyleEnum>(name: &'static str, inherited: bool) -> PropertyDescriptor {
    let ty = T::TYPE;
    PropertyDescriptor {
        name,
        value_type: ValueType::Enum(ty),
        default: Some(Value::Enum(EnumValue {
            enum_name: ty.name,
            member: ty.members[0],
        })),
        inherited,
    }
}

const VISUAL_ELEMENT: &[PropertyDescriptor] = &[
    color("BackgroundColor", false),
    float("Opacity", 1.0),
    boolean("IsVisible", true, true),
    float("WidthRequest", -1.0),
    float("HeightRequest", -1.0),
    float("MinimumWidthRequest", -1.0),
    float("MinimumHeightRequest", -1.0),
    enumeration::<FlowDirection>("FlowDirection", true),
    float("AnchorX", 0.5),
    float("AnchorY", 0.5),
    float("TranslationX", 0.0),
    float("TranslationY", 0.0),
    float("Rotation", 0.0),
    float("RotationX", 0.0),
    float("RotationY", 0.0),
    float("Scale", 1.0),
    float("ScaleX", 1.0),
    float("ScaleY", 1.0),
];

const VIEW: &[PropertyDescriptor] = &[thickness("Margin")];

const LAYOUT: &[PropertyDescriptor] = &[thickness("Padding")];

const PAGE: &[PropertyDescriptor] = &[thickness("Padding"), string("Title", false)];

const LABEL: &[PropertyDescriptor] = &[
    color("TextColor", true),
    string("FontFamily", true),
    float_unset("FontSize", true),
    float("LineHeight", -1.0),
    enumeration::<TextAlignment>("HorizontalTextAlignment", true),
    enumeration::<TextAlignment>("VerticalTextAlignment", false),
    string("Text", false),
];

const BUTTON: &[PropertyDescriptor] = &[
    color("TextColor", true),
    string("FontFamily", true),
    float_unset("FontSize", true),
    color("BorderColor", false),
    float("BorderWidth", -1.0),
    int("CornerRadius", -1),
    thickness("Padding"),
    string("Text", false),
];

const INPUT_VIEW: &[PropertyDescriptor] = &[
    int("MaxLength", i32::MAX),
    color("TextColor", true),
    color("PlaceholderColor", true),
    string("Placeholder", false),
    string("FontFamily", true),
    float_unset("FontSize", true),
    string("Text", false),
];

const ENTRY: &[PropertyDescriptor] = &[
    boolean("IsPassword", false, false),
    enumeration::<TextAlignment>("HorizontalTextAlignment", true),
];

const SEARCH_BAR: &[PropertyDescriptor] = &[
    color("CancelButtonColor", false),
    enumeration::<TextAlignment>("HorizontalTextAlignment", true),
];

const BOX_VIEW: &[PropertyDescriptor] = &[color("Color", true)];

const ACTIVITY_INDICATOR: &[PropertyDescriptor] =
    &[color("Color", true), boolean("IsRunning", false, false)];

const PROGRESS_BAR: &[PropertyDescriptor] =
    &[color("ProgressColor", false), float("Progress", 0.0)];

const SWITCH: &[PropertyDescriptor] = &[color("OnColor", false), boolean("IsToggled", false, false)];

const STACK_LAYOUT: &[PropertyDescriptor] = &[
    float("Spacing", 6.0),
    enumeration::<StackOrientation>("Orientation", false),
];

const GRID: &[PropertyDescriptor] = &[float("RowSpacing", 6.0), float("ColumnSpacing", 6.0)];

const SCROLL_VIEW: &[PropertyDescriptor] = &[
    enumeration::<ScrollOrientation>("Orientation", false),
    enumeration::<ScrollBarVisibility>("HorizontalScrollBarVisibility", false),
    enumeration::<ScrollBarVisibility>("VerticalScrollBarVisibility", false),
];

const TABLE_VIEW: &[PropertyDescriptor] = &[int("RowHeight", -1)];

const TABBED_PAGE: &[PropertyDescriptor] =
    &[color("BarBackgroundColor", false), color("BarTextColor", false)];

type Layers = &'static [&'static [PropertyDescriptor]];

/// What a widget may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentModel {
    /// No children.
    Leaf,
    /// A single view, replaced through `set_content`.
    Single,
    /// Any number of views.
    Views,
    /// Any number of pages.
    Pages,
}

/// The finite set of widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    VisualElement,
    Label,
    Button,
    Entry,
    Editor,
    SearchBar,
    BoxView,
    ActivityIndicator,
    ProgressBar,
    Switch,
    StackLayout,
    Grid,
    ScrollView,
    TableView,
    ContentPage,
    TabbedPage,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 16] = [
        WidgetKind::VisualElement,
        WidgetKind::Label,
        WidgetKind::Button,
        WidgetKind::Entry,
        WidgetKind::Editor,
        WidgetKind::SearchBar,
        WidgetKind::BoxView,
        WidgetKind::ActivityIndicator,
        WidgetKind::ProgressBar,
        WidgetKind::Switch,
        WidgetKind::StackLayout,
        WidgetKind::Grid,
        WidgetKind::ScrollView,
        WidgetKind::TableView,
        WidgetKind::ContentPage,
        WidgetKind::TabbedPage,
    ];

    /// Look up a kind by type name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        self.type_chain()[0]
    }

    /// The kind's type name followed by its base types, most derived first.
    pub fn type_chain(self) -> &'static [&'static str] {
        match self {
            WidgetKind::VisualElement => &["VisualElement", "Element"],
            WidgetKind::Label => &["Label", "View", "VisualElement", "Element"],
            WidgetKind::Button => &["Button", "View", "VisualElement", "Element"],
            WidgetKind::Entry => &["Entry", "InputView", "View", "VisualElement", "Element"],
            WidgetKind::Editor => &["Editor", "InputView", "View", "VisualElement", "Element"],
            WidgetKind::SearchBar => {
                &["SearchBar", "InputView", "View", "VisualElement", "Element"]
            }
            WidgetKind::BoxView => &["BoxView", "View", "VisualElement", "Element"],
            WidgetKind::ActivityIndicator => {
                &["ActivityIndicator", "View", "VisualElement", "Element"]
            }
            WidgetKind::ProgressBar => &["ProgressBar", "View", "VisualElement", "Element"],
            WidgetKind::Switch => &["Switch", "View", "VisualElement", "Element"],
            WidgetKind::StackLayout => {
                &["StackLayout", "Layout", "View", "VisualElement", "Element"]
            }
            WidgetKind::Grid => &["Grid", "Layout", "View", "VisualElement", "Element"],
            WidgetKind::ScrollView => &["ScrollView", "Layout", "View", "VisualElement", "Element"],
            WidgetKind::TableView => &["TableView", "View", "VisualElement", "Element"],
            WidgetKind::ContentPage => &["ContentPage", "Page", "VisualElement", "Element"],
            WidgetKind::TabbedPage => &["TabbedPage", "Page", "VisualElement", "Element"],
        }
    }

    fn layers(self) -> Layers {
        const VISUAL_ELEMENT_LAYERS: Layers = &[VISUAL_ELEMENT];
        const LABEL_LAYERS: Layers = &[LABEL, VIEW, VISUAL_ELEMENT];
        const BUTTON_LAYERS: Layers = &[BUTTON, VIEW, VISUAL_ELEMENT];
        const ENTRY_LAYERS: Layers = &[ENTRY, INPUT_VIEW, VIEW, VISUAL_ELEMENT];
        const EDITOR_LAYERS: Layers = &[INPUT_VIEW, VIEW, VISUAL_ELEMENT];
        const SEARCH_BAR_LAYERS: Layers = &[SEARCH_BAR, INPUT_VIEW, VIEW, VISUAL_ELEMENT];
        const BOX_VIEW_LAYERS: Layers = &[BOX_VIEW, VIEW, VISUAL_ELEMENT];
        const ACTIVITY_INDICATOR_LAYERS: Layers = &[ACTIVITY_INDICATOR, VIEW, VISUAL_ELEMENT];
        const PROGRESS_BAR_LAYERS: Layers = &[PROGRESS_BAR, VIEW, VISUAL_ELEMENT];
        const SWITCH_LAYERS: Layers = &[SWITCH, VIEW, VISUAL_ELEMENT];
        const STACK_LAYOUT_LAYERS: Layers = &[STACK_LAYOUT, LAYOUT, VIEW, VISUAL_ELEMENT];
        const GRID_LAYERS: Layers = &[GRID, LAYOUT, VIEW, VISUAL_ELEMENT];
        const SCROLL_VIEW_LAYERS: Layers = &[SCROLL_VIEW, LAYOUT, VIEW, VISUAL_ELEMENT];
        const TABLE_VIEW_LAYERS: Layers = &[TABLE_VIEW, VIEW, VISUAL_ELEMENT];
        const CONTENT_PAGE_LAYERS: Layers = &[PAGE, VISUAL_ELEMENT];
        const TABBED_PAGE_LAYERS: Layers = &[TABBED_PAGE, PAGE, VISUAL_ELEMENT];

        match self {
            WidgetKind::VisualElement => VISUAL_ELEMENT_LAYERS,
            WidgetKind::Label => LABEL_LAYERS,
            WidgetKind::Button => BUTTON_LAYERS,
            WidgetKind::Entry => ENTRY_LAYERS,
            WidgetKind::Editor => EDITOR_LAYERS,
            WidgetKind::SearchBar => SEARCH_BAR_LAYERS,
            WidgetKind::BoxView => BOX_VIEW_LAYERS,
            WidgetKind::ActivityIndicator => ACTIVITY_INDICATOR_LAYERS,
            WidgetKind::ProgressBar => PROGRESS_BAR_LAYERS,
            WidgetKind::Switch => SWITCH_LAYERS,
            WidgetKind::StackLayout => STACK_LAYOUT_LAYERS,
            WidgetKind::Grid => GRID_LAYERS,
            WidgetKind::ScrollView => SCROLL_VIEW_LAYERS,
            WidgetKind::TableView => TABLE_VIEW_LAYERS,
            WidgetKind::ContentPage => CONTENT_PAGE_LAYERS,
            WidgetKind::TabbedPage => TABBED_PAGE_LAYERS,
        }
    }

    /// Descriptor of a property declared by this kind or one of its base types.
    pub fn property(self, name: &str) -> Option<&'static PropertyDescriptor> {
        self.properties().find(|p| p.name == name)
    }

    /// Every declared property, most derived layer first.
    pub fn properties(self) -> impl Iterator<Item = &'static PropertyDescriptor> {
        self.layers().iter().flat_map(|layer| layer.iter())
    }

    pub fn is_page(self) -> bool {
        matches!(self, WidgetKind::ContentPage | WidgetKind::TabbedPage)
    }

    pub fn content_model(self) -> ContentModel {
        match self {
            WidgetKind::StackLayout | WidgetKind::Grid => ContentModel::Views,
            WidgetKind::ScrollView | WidgetKind::ContentPage => ContentModel::Single,
            WidgetKind::TabbedPage => ContentModel::Pages,
            _ => ContentModel::Leaf,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
