//! Server configuration from the environment.
//!
//! - `FELIZ_ADDR`: listen address (default `0.0.0.0:8787`)
//! - `FELIZ_RULES`: optional pricing rules YAML
//! - `FELIZ_TEMPLATES`: optional quote templates YAML
//! - `FELIZ_CURRENCY`: currency label on rendered quotes (default `PHP`)

use feliz_out::DEFAULT_CURRENCY;

const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub addr: String,
    pub rules_path: Option<String>,
    pub templates_path: Option<String>,
    pub currency: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            addr: get("FELIZ_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            rules_path: get("FELIZ_RULES"),
            templates_path: get("FELIZ_TEMPLATES"),
            currency: get("FELIZ_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
