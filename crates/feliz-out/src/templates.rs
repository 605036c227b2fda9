//! Quote template files.
//!
//! A templates file is YAML with a version and named Handlebars templates:
//!
//! ```yaml
//! version: "1.0"
//! templates:
//!   quote_card:
//!     description: One karat tier
//!     template: "{{label}}: {{money finalTotal}}"
//! ```

use crate::RenderError;
use serde::Deserialize;
use std::collections::HashMap;

/// Templates shipped with the crate
const BUILTIN_TEMPLATES: &str = include_str!("../templates/quote-templates.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RenderError::Template(format!("failed to read {}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        serde_yaml::from_str(yaml).map_err(|e| RenderError::Template(e.to_string()))
    }

    /// The compiled-in default set
    pub fn builtin() -> Self {
        Self::from_yaml(BUILTIN_TEMPLATES).unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in quote templates are malformed");
            Self {
                version: "0".to_string(),
                templates: HashMap::new(),
            }
        })
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_parse() {
        let file = TemplatesFile::from_yaml(BUILTIN_TEMPLATES).unwrap();
        assert_eq!(
            file.list_templates(),
            vec!["quote_card", "quote_summary", "stone_line"]
        );
    }

    #[test]
    fn test_custom_file() {
        let yaml = r#"
version: "2.0"
templates:
  quote_summary:
    description: Totals only
    template: "{{money serviceTotal}}"
"#;
        let file = TemplatesFile::from_yaml(yaml).unwrap();
        assert_eq!(file.version, "2.0");
        assert!(file.get("quote_summary").is_some());
    }

    #[test]
    fn test_malformed_file() {
        assert!(matches!(
            TemplatesFile::from_yaml("templates: 12"),
            Err(RenderError::Template(_))
        ));
    }
}
