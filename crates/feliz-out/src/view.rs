//! Template data built from engine results
use feliz_core::{KaratTier, PricingRules, QuotationPair, QuotationResult};
use serde::Serialize;

/// One tier card
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierView {
    #[serde(flatten)]
    pub result: QuotationResult,
    pub label: String,
    pub gold_formula: String,
    pub margin_rate: f64,
    /// Stone margin as a fraction (0.5 for a 1.5 multiplier)
    pub stone_margin: f64,
    pub currency: String,
}

/// Whole quotation: shared totals plus both tier cards
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub currency: String,
    pub service_total: f64,
    pub stone_cost: f64,
    pub stone_margin: f64,
    pub tiers: Vec<TierView>,
}

impl QuoteView {
    pub fn new(pair: &QuotationPair, rules: &PricingRules, currency: &str) -> Self {
        let tiers = pair
            .iter()
            .map(|result| TierView::new(result, rules, currency))
            .collect();

        Self {
            currency: currency.to_string(),
            service_total: pair.k14.service_total,
            stone_cost: pair.k14.stone_cost,
            stone_margin: stone_margin(rules),
            tiers,
        }
    }
}

impl TierView {
    pub fn new(result: &QuotationResult, rules: &PricingRules, currency: &str) -> Self {
        let profile = rules.tier(result.tier);
        let label = match result.tier {
            KaratTier::K14 => "14k estimate".to_string(),
            KaratTier::K18 => "18k".to_string(),
        };
        let gold_formula = if profile.gold_offset > 0.0 {
            format!("(price − {}) × grams", profile.gold_offset)
        } else {
            "price × grams".to_string()
        };

        Self {
            result: result.clone(),
            label,
            gold_formula,
            margin_rate: profile.margin_rate(),
            stone_margin: stone_margin(rules),
            currency: currency.to_string(),
        }
    }
}

/// Priced stone row for the per-row display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoneLineView {
    pub priced: f64,
    pub stone_margin: f64,
}

fn stone_margin(rules: &PricingRules) -> f64 {
    rules.stone_margin_multiplier - 1.0
}
