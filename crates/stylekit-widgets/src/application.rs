//! Application: stylesheet resources and the main page.

use crate::widget::Widget;
use crate::WidgetError;
use std::io::Read;
use stylekit_css::{reset_styles, ApplyReport, StyleContext, StyleOptions, StyleSheet};
use tracing::debug;

/// Owns the stylesheets applied to the main page.
///
/// Resources apply in insertion order as one cascade: on equal specificity a
/// rule from a later resource wins.
#[derive(Debug, Default)]
pub struct Application {
    resources: Vec<StyleSheet>,
    context: StyleContext,
    main_page: Option<Widget>,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: StyleOptions) -> Result<Self, WidgetError> {
        Ok(Self {
            resources: Vec::new(),
            context: StyleContext::new(options)?,
            main_page: None,
        })
    }

    /// Add a stylesheet resource.
    ///
    /// Takes effect on the next `set_main_page` or `restyle`.
    pub fn add_stylesheet(&mut self, sheet: StyleSheet) {
        debug!(rule_count = sheet.rule_count(), "Stylesheet resource added");
        self.resources.push(sheet);
    }

    /// Parse `css` and add it as a resource.
    pub fn add_stylesheet_str(&mut self, css: &str) -> Result<(), WidgetError> {
        self.add_stylesheet(StyleSheet::parse(css)?);
        Ok(())
    }

    /// Parse a stylesheet from any byte source and add it as a resource.
    pub fn add_stylesheet_from<R: Read>(&mut self, source: R) -> Result<(), WidgetError> {
        self.add_stylesheet(StyleSheet::from_reader(source)?);
        Ok(())
    }

    pub fn resources(&self) -> &[StyleSheet] {
        &self.resources
    }

    pub fn context(&self) -> &StyleContext {
        &self.context
    }

    pub fn main_page(&self) -> Option<&Widget> {
        self.main_page.as_ref()
    }

    /// Attach `page` and apply every resource to it.
    ///
    /// A previously attached page loses its style-set values.
    pub fn set_main_page(&mut self, page: Widget) -> Result<ApplyReport, WidgetError> {
        if !page.kind().is_page() {
            return Err(WidgetError::InvalidOperation(format!(
                "{} cannot be a main page",
                page.kind()
            )));
        }
        if let Some(previous) = self.main_page.take() {
            if previous != page {
                reset_styles(&previous);
            }
        }
        debug!(page = %page.kind(), resources = self.resources.len(), "Main page attached");
        self.main_page = Some(page);
        Ok(self.apply())
    }

    /// Clear style-set values on the main page tree and apply the resources again.
    ///
    /// Picks up tree changes and resources added since the last apply.
    pub fn restyle(&self) -> ApplyReport {
        if let Some(page) = &self.main_page {
            reset_styles(page);
        }
        self.apply()
    }

    fn apply(&self) -> ApplyReport {
        let Some(page) = &self.main_page else {
            return ApplyReport::default();
        };
        let combined: StyleSheet = self
            .resources
            .iter()
            .flat_map(|sheet| sheet.rules().iter().cloned())
            .collect();
        combined.apply(page, &self.context)
    }
}
