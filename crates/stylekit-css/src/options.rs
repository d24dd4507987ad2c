//! Configuration and the per-apply context.

use crate::registry::PropertyRegistry;
use crate::CssError;
use serde::{Deserialize, Serialize};

/// Style engine options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Prefix of toolkit-specific property names.
    pub vendor_prefix: String,
    /// Match type selectors against type names case-sensitively.
    pub case_sensitive_type_selectors: bool,
    /// Diagnostics kept per apply; later ones are only logged.
    pub max_diagnostics: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            vendor_prefix: "-xf-".to_string(),
            case_sensitive_type_selectors: false,
            max_diagnostics: 256,
        }
    }
}

impl StyleOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CssError> {
        let options: StyleOptions =
            serde_json::from_str(json).map_err(|e| CssError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), CssError> {
        let prefix = &self.vendor_prefix;
        if prefix.len() < 2 || !prefix.starts_with('-') || !prefix.ends_with('-') {
            return Err(CssError::Config(format!(
                "vendor prefix '{}' must start and end with '-'",
                prefix
            )));
        }
        Ok(())
    }
}

/// Explicit context for parse/apply calls: options plus the registry built from them.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    options: StyleOptions,
    registry: PropertyRegistry,
}

impl StyleContext {
    pub fn new(options: StyleOptions) -> Result<Self, CssError> {
        options.validate()?;
        let registry = PropertyRegistry::new(options.vendor_prefix.clone());
        Ok(Self { options, registry })
    }

    pub fn options(&self) -> &StyleOptions {
        &self.options
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }
}

/// A declaration skipped during apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub element: String,
    pub property: String,
    pub value: String,
    pub error: CssError,
}

/// Summary of one apply pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Elements visited.
    pub visited: usize,
    /// Property writes performed.
    pub applied: usize,
    /// Winning values not written because the user set the property.
    pub skipped_user_set: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics beyond `max_diagnostics`.
    pub dropped_diagnostics: usize,
}

impl ApplyReport {
    /// No declaration was skipped for a bad name or value.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.dropped_diagnostics == 0
    }

    pub(crate) fn push_diagnostic(&mut self, diagnostic: Diagnostic, limit: usize) {
        if self.diagnostics.len() < limit {
            self.diagnostics.push(diagnostic);
        } else {
            self.dropped_diagnostics += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = StyleOptions::default();
        assert_eq!(options.vendor_prefix, "-xf-");
        assert!(!options.case_sensitive_type_selectors);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let options = StyleOptions::from_json(r#"{ "case_sensitive_type_selectors": true }"#).unwrap();
        assert!(options.case_sensitive_type_selectors);
        assert_eq!(options.vendor_prefix, "-xf-");
        assert_eq!(options.max_diagnostics, 256);
    }

    #[test]
    fn rejects_bad_prefix() {
        assert!(matches!(
            StyleOptions::from_json(r#"{ "vendor_prefix": "xf" }"#),
            Err(CssError::Config(_))
        ));
        assert!(matches!(
            StyleOptions::from_json("not json"),
            Err(CssError::Config(_))
        ));
    }

    #[test]
    fn context_uses_prefix() {
        let options = StyleOptions {
            vendor_prefix: "-app-".into(),
            ..Default::default()
        };
        let ctx = StyleContext::new(options).unwrap();
        assert_eq!(ctx.registry().vendor_prefix(), "-app-");
    }

    #[test]
    fn report_caps_diagnostics() {
        let mut report = ApplyReport::default();
        let diag = Diagnostic {
            element: "Label".into(),
            property: "float".into(),
            value: "left".into(),
            error: CssError::PropertyNotFound {
                property: "float".into(),
                element: "Label".into(),
            },
        };
        report.push_diagnostic(diag.clone(), 1);
        report.push_diagnostic(diag, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.dropped_diagnostics, 1);
        assert!(!report.is_clean());
    }
}
