//! Template rendering for quotations.
//!
//! Uses Handlebars with two helpers:
//! - money: fixed two-decimal amount (14549.999 -> "14550.00")
//! - percent: fraction as a whole percentage (0.7 -> "70%")
//!
//! Output is plain text, so HTML escaping is disabled.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};

use crate::templates::TemplatesFile;
use crate::RenderError;

/// Templates every renderer must provide
const REQUIRED_TEMPLATES: [&str; 2] = ["quote_card", "quote_summary"];

/// Compiled renderer with registered helpers
pub struct QuoteRenderer {
    handlebars: Handlebars<'static>,
    templates: TemplatesFile,
}

impl QuoteRenderer {
    /// Create a renderer from a templates file
    pub fn new(templates: TemplatesFile) -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("money", Box::new(MoneyHelper));
        handlebars.register_helper("percent", Box::new(PercentHelper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| RenderError::Template(format!("{}: {}", name, e)))?;
        }

        for name in REQUIRED_TEMPLATES {
            if templates.get(name).is_none() {
                return Err(RenderError::Template(format!("missing template {}", name)));
            }
        }

        Ok(Self { handlebars, templates })
    }

    /// Renderer over the compiled-in templates
    pub fn builtin() -> Result<Self, RenderError> {
        Self::new(TemplatesFile::builtin())
    }

    /// Load from a file path
    pub fn load(path: &str) -> Result<Self, RenderError> {
        let renderer = Self::new(TemplatesFile::load(path)?)?;
        tracing::info!(path, templates = renderer.templates.templates.len(), "loaded quote templates");
        Ok(renderer)
    }

    /// Render a named template with serializable data
    pub fn render<T: serde::Serialize>(
        &self,
        template_name: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| RenderError::Render(e.to_string()))
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Two-decimal amount; non-numeric or missing values print as 0.00
struct MoneyHelper;

impl HelperDef for MoneyHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h
            .param(0)
            .and_then(|v| v.value().as_f64())
            .unwrap_or(0.0);

        out.write(&format_money(value))?;
        Ok(())
    }
}

/// Fraction as a whole percentage (0.85 -> "85%")
struct PercentHelper;

impl HelperDef for PercentHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h
            .param(0)
            .and_then(|v| v.value().as_f64())
            .unwrap_or(0.0);

        let percent = (value * 100.0).round() as i64;
        out.write(&format!("{}%", percent))?;
        Ok(())
    }
}

/// Display rounding for monetary amounts
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    let formatted = format!("{:.2}", value);
    // -0.001 would otherwise print as "-0.00"
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}
