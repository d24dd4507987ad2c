//! End-to-end styling of widget trees.

use stylekit_common::init_test_logging;
use stylekit_css::{Color, CssError, CssReader, Style, StyleContext, Value, ValueOrigin};
use stylekit_widgets::{Application, TextAlignment, Widget, WidgetKind};

fn style(css: &str) -> Style {
    Style::parse(&mut CssReader::new(css), '}').unwrap()
}

#[test]
fn test_properties_are_applied() {
    init_test_logging();
    let style = style("background-color: #ff0000;");
    let element = Widget::new(WidgetKind::VisualElement);
    assert_eq!(element.background_color(), None);

    style.apply(&element, &StyleContext::default());
    assert_eq!(element.background_color(), Some(Color::RED));
    assert_eq!(element.origin("BackgroundColor"), ValueOrigin::StyleSet);
}

#[test]
fn test_style_does_not_override_user_value() {
    init_test_logging();
    let style = style("background-color: #ff0000;");
    let element = Widget::new(WidgetKind::VisualElement);
    element.set_background_color(Color::PINK).unwrap();

    let report = style.apply(&element, &StyleContext::default());
    assert_eq!(element.background_color(), Some(Color::PINK));
    assert_eq!(report.skipped_user_set, 1);
}

#[test]
fn test_styles_are_cascading() {
    init_test_logging();
    // color cascades, background-color does not
    let style = style("background-color: #ff0000; color: #00ff00;");
    let label = Widget::new(WidgetKind::Label);
    let layout = Widget::new(WidgetKind::StackLayout);
    layout.add_child(&label).unwrap();

    style.apply(&layout, &StyleContext::default());
    assert_eq!(layout.background_color(), Some(Color::RED));
    assert_eq!(label.background_color(), None);
    assert_eq!(label.text_color(), Some(Color::LIME));
}

#[test]
fn test_properties_only_set_on_elements_that_have_them() {
    init_test_logging();
    let style = style("background-color: #ff0000; color: #00ff00;");
    let layout = Widget::new(WidgetKind::StackLayout);

    let report = style.apply(&layout, &StyleContext::default());
    assert_eq!(layout.get("TextColor"), None);
    assert!(report.is_clean());
}

#[test]
fn test_stylesheets_on_app_are_applied() {
    init_test_logging();
    let mut app = Application::new();
    app.add_stylesheet_str("label{ color: red;}").unwrap();

    let label = Widget::new(WidgetKind::Label);
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&label).unwrap();
    app.set_main_page(page).unwrap();

    assert_eq!(label.text_color(), Some(Color::RED));
}

#[test]
fn test_non_matching_sibling_is_unaffected() {
    init_test_logging();
    let mut app = Application::new();
    app.add_stylesheet_str("label { color: red; }").unwrap();

    let label = Widget::new(WidgetKind::Label);
    let button = Widget::new(WidgetKind::Button);
    let layout = Widget::new(WidgetKind::StackLayout);
    layout.add_child(&label).unwrap();
    layout.add_child(&button).unwrap();
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&layout).unwrap();
    app.set_main_page(page).unwrap();

    assert_eq!(label.text_color(), Some(Color::RED));
    assert_eq!(button.text_color(), None);
    assert_eq!(button.origin("TextColor"), ValueOrigin::Unset);
}

#[test]
fn test_invalid_value_skips_only_that_declaration() {
    init_test_logging();
    let mut app = Application::new();
    app.add_stylesheet_str(
        "button { -xf-button-corner-radius: round; -xf-button-border-color: red; border-width: 2; }",
    )
    .unwrap();

    let button = Widget::new(WidgetKind::Button);
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&button).unwrap();
    let report = app.set_main_page(page).unwrap();

    assert_eq!(button.get("CornerRadius"), Some(Value::Int(-1)));
    assert_eq!(button.origin("CornerRadius"), ValueOrigin::Unset);
    assert_eq!(button.get("BorderColor"), Some(Value::Color(Color::RED)));
    assert_eq!(button.get("BorderWidth"), Some(Value::Float(2.0)));

    assert_eq!(report.diagnostics.len(), 1);
    let diagnostic = &report.diagnostics[0];
    assert_eq!(diagnostic.property, "-xf-button-corner-radius");
    assert_eq!(diagnostic.value, "round");
    assert!(matches!(diagnostic.error, CssError::Conversion(_)));
}

#[test]
fn test_out_of_range_int_is_skipped() {
    init_test_logging();
    let mut app = Application::new();
    app.add_stylesheet_str("tableview { -xf-tableview-row-height: 99999999999; opacity: 0.5; }")
        .unwrap();

    let table = Widget::new(WidgetKind::TableView);
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&table).unwrap();
    let report = app.set_main_page(page).unwrap();

    assert_eq!(table.get("RowHeight"), Some(Value::Int(-1)));
    assert_eq!(table.opacity(), 0.5);
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn test_selectors_in_widget_tree() {
    init_test_logging();
    let css = r#"
        /* page chrome */
        ^layout > label { text-align: center; }
        .form entry { -xf-placeholder-color: gray; }
        #submit { background-color: rgb(0, 128, 0); }
        @media (min-width: 600px) { label { color: red; } }
    "#;
    let mut app = Application::new();
    app.add_stylesheet_str(css).unwrap();

    let form = Widget::new(WidgetKind::Grid).with_class("form");
    let caption = Widget::new(WidgetKind::Label);
    let entry = Widget::new(WidgetKind::Entry);
    let submit = Widget::new(WidgetKind::Button).with_style_id("submit");
    form.add_child(&caption).unwrap();
    form.add_child(&entry).unwrap();
    form.add_child(&submit).unwrap();
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&form).unwrap();
    let report = app.set_main_page(page).unwrap();

    assert!(report.is_clean(), "{:?}", report.diagnostics);
    assert_eq!(
        caption.get_enum::<TextAlignment>("HorizontalTextAlignment"),
        Some(TextAlignment::Center)
    );
    assert_eq!(caption.text_color(), None);
    assert_eq!(
        entry.get("PlaceholderColor"),
        Some(Value::Color(Color::from_rgb(128, 128, 128)))
    );
    assert_eq!(submit.background_color(), Some(Color::from_rgb(0, 128, 0)));
}

#[test]
fn test_inherited_through_page() {
    init_test_logging();
    let mut app = Application::new();
    app.add_stylesheet_str("contentpage { color: blue; visibility: hidden; }")
        .unwrap();

    let label = Widget::new(WidgetKind::Label);
    let entry = Widget::new(WidgetKind::Entry);
    entry.set_text_color(Color::PINK).unwrap();
    let layout = Widget::new(WidgetKind::StackLayout);
    layout.add_child(&label).unwrap();
    layout.add_child(&entry).unwrap();
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&layout).unwrap();
    app.set_main_page(page.clone()).unwrap();

    assert!(!page.is_visible());
    assert!(!layout.is_visible());
    assert_eq!(label.text_color(), Some(Color::BLUE));
    assert_eq!(entry.text_color(), Some(Color::PINK));
}

#[test]
fn test_apply_twice_is_idempotent() {
    init_test_logging();
    let mut app = Application::new();
    app.add_stylesheet_str("label { color: red; opacity: 0.5; }")
        .unwrap();

    let label = Widget::new(WidgetKind::Label);
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&label).unwrap();
    let first = app.set_main_page(page).unwrap();
    let second = app.restyle();

    assert_eq!(first, second);
    assert_eq!(label.text_color(), Some(Color::RED));
    assert_eq!(label.opacity(), 0.5);
}

#[test]
fn test_bad_declaration_does_not_block_inheritance() {
    init_test_logging();
    let mut app = Application::new();
    app.add_stylesheet_str("stacklayout { color: red; } #outer { color: bogus; }")
        .unwrap();

    let label = Widget::new(WidgetKind::Label);
    let layout = Widget::new(WidgetKind::StackLayout).with_style_id("outer");
    layout.add_child(&label).unwrap();
    let page = Widget::new(WidgetKind::ContentPage);
    page.set_content(&layout).unwrap();
    let report = app.set_main_page(page).unwrap();

    assert_eq!(label.text_color(), Some(Color::RED));
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].element, "Label");
    assert_eq!(report.diagnostics[0].value, "bogus");
}
