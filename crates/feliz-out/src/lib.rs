//! Feliz Out: human-readable quotations
//!
//! Renders engine results through Handlebars templates. This is the only
//! place amounts are rounded, and only for display.
//!
//! # Example
//!
//! ```
//! use feliz_core::{compute_quotation, GoldAlloy, PricingRules, QuotationInput};
//! use feliz_out::{render_quote, QuoteRenderer};
//!
//! let input = QuotationInput::new(2000.0, 10.0, GoldAlloy::Yellow).with_stone(100.0, 400.0, 1.0);
//! let quote = compute_quotation(&input);
//!
//! let renderer = QuoteRenderer::builtin().unwrap();
//! let text = render_quote(&renderer, &quote, &PricingRules::default(), "PHP").unwrap();
//! assert!(text.contains("Final quote"));
//! ```

pub mod renderer;
pub mod templates;
pub mod view;

pub use renderer::{format_money, QuoteRenderer};
pub use templates::TemplatesFile;
pub use view::{QuoteView, StoneLineView, TierView};

use feliz_core::{PricingRules, QuotationPair, QuotationResult};
use thiserror::Error;

/// Currency label used on printed quotes
pub const DEFAULT_CURRENCY: &str = "PHP";

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Render failed: {0}")]
    Render(String),
}

/// Render shared totals and both tier cards
pub fn render_quote(
    renderer: &QuoteRenderer,
    pair: &QuotationPair,
    rules: &PricingRules,
    currency: &str,
) -> Result<String, RenderError> {
    let view = QuoteView::new(pair, rules, currency);
    renderer.render("quote_summary", &view)
}

/// Render a single tier card
pub fn render_tier(
    renderer: &QuoteRenderer,
    result: &QuotationResult,
    rules: &PricingRules,
    currency: &str,
) -> Result<String, RenderError> {
    let view = TierView::new(result, rules, currency);
    renderer.render("quote_card", &view)
}

/// Render the priced total shown beside one stone row
pub fn render_stone_line(
    renderer: &QuoteRenderer,
    priced: f64,
    rules: &PricingRules,
) -> Result<String, RenderError> {
    let view = StoneLineView {
        priced,
        stone_margin: rules.stone_margin_multiplier - 1.0,
    };
    renderer.render("stone_line", &view)
}
