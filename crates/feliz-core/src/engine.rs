//! Quotation engine
//!
//! Turns gold weight, market price, service lines and stones into a 14k and
//! an 18k quote. Shared figures (effective grams, services, stones) are
//! computed once; each tier then applies its own gold price and margin.
//! Nothing is rounded here.

use crate::model::QuotationInput;
use crate::rules::{KaratTier, PricingRules};
use serde::{Deserialize, Serialize};

/// Cost breakdown and payment split for one karat tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationResult {
    pub tier: KaratTier,
    /// Grams inflated by the alloy's loss allowance
    pub effective_grams: f64,
    pub gold_unit_price: f64,
    pub gold_cost: f64,
    pub service_total: f64,
    /// Gold plus services, before margin
    pub raw_cost: f64,
    pub profit_amount: f64,
    pub raw_cost_with_margin: f64,
    /// Stones with their own margin already applied
    pub stone_cost: f64,
    pub final_total: f64,
    pub downpayment_rate: f64,
    pub downpayment_amount: f64,
    pub balance_due: f64,
}

/// The two alternative quotes for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationPair {
    pub k14: QuotationResult,
    pub k18: QuotationResult,
}

impl QuotationPair {
    pub fn get(&self, tier: KaratTier) -> &QuotationResult {
        match tier {
            KaratTier::K14 => &self.k14,
            KaratTier::K18 => &self.k18,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuotationResult> {
        [&self.k14, &self.k18].into_iter()
    }
}

/// Figures that do not depend on the karat tier
struct SharedCosts {
    effective_grams: f64,
    service_total: f64,
    stone_cost: f64,
}

/// Stateless engine bound to a rate card
#[derive(Debug, Clone, Default)]
pub struct QuotationEngine {
    rules: PricingRules,
}

impl QuotationEngine {
    pub fn new(rules: PricingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    /// Compute both tier quotes. Never fails: non-finite inputs count as zero.
    pub fn compute(&self, input: &QuotationInput) -> QuotationPair {
        let input = input.sanitized();
        let shared = self.shared_costs(&input);

        let pair = QuotationPair {
            k14: self.price_tier(KaratTier::K14, &input, &shared),
            k18: self.price_tier(KaratTier::K18, &input, &shared),
        };

        tracing::debug!(
            alloy = %input.gold_alloy,
            effective_grams = shared.effective_grams,
            final_14k = pair.k14.final_total,
            final_18k = pair.k18.final_total,
            "computed quotation"
        );

        pair
    }

    fn shared_costs(&self, input: &QuotationInput) -> SharedCosts {
        let loss_rate = self.rules.loss_rates.for_alloy(input.gold_alloy);
        let effective_grams = input.grams * (1.0 + loss_rate);

        let service_total: f64 = input.service_lines.iter().map(|line| line.subtotal()).sum();

        let stone_raw: f64 = input.stone_rows.iter().map(|row| row.subtotal()).sum();
        let stone_cost = stone_raw * self.rules.stone_margin_multiplier;

        SharedCosts {
            effective_grams,
            service_total,
            stone_cost,
        }
    }

    fn price_tier(
        &self,
        tier: KaratTier,
        input: &QuotationInput,
        shared: &SharedCosts,
    ) -> QuotationResult {
        let profile = self.rules.tier(tier);

        let gold_unit_price = profile.gold_unit_price(input.price_per_gram);
        let gold_cost = gold_unit_price * shared.effective_grams;
        let raw_cost = gold_cost + shared.service_total;
        let profit_amount = raw_cost * profile.margin_rate();
        let raw_cost_with_margin = raw_cost + profit_amount;
        let final_total = raw_cost_with_margin + shared.stone_cost;

        let downpayment_rate = self.rules.downpayment.rate_for(final_total);
        let downpayment_amount = final_total * downpayment_rate;
        // complement of the downpayment so the two always add up to the total
        let balance_due = final_total - downpayment_amount;

        QuotationResult {
            tier,
            effective_grams: shared.effective_grams,
            gold_unit_price,
            gold_cost,
            service_total: shared.service_total,
            raw_cost,
            profit_amount,
            raw_cost_with_margin,
            stone_cost: shared.stone_cost,
            final_total,
            downpayment_rate,
            downpayment_amount,
            balance_due,
        }
    }
}

/// Compute a quotation with the standard rate card
pub fn compute_quotation(input: &QuotationInput) -> QuotationPair {
    QuotationEngine::default().compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GoldAlloy, ServiceKind};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn scenario_a() -> QuotationInput {
        QuotationInput::new(2000.0, 10.0, GoldAlloy::Yellow)
            .with_service(ServiceKind::Goldsmith, 500.0, 1.0)
            .with_service(ServiceKind::PolishPlating, 300.0, 1.0)
            .with_service(ServiceKind::LaserEngrave, 200.0, 1.0)
            .with_stone(100.0, 400.0, 1.0)
    }

    #[test]
    fn test_scenario_a_14k() {
        let k14 = compute_quotation(&scenario_a()).k14;
        assert_close(k14.effective_grams, 11.0);
        assert_eq!(k14.gold_unit_price, 1000.0);
        assert_close(k14.gold_cost, 11_000.0);
        assert_eq!(k14.service_total, 1000.0);
        assert_close(k14.raw_cost, 12_000.0);
        assert_close(k14.profit_amount, 1800.0);
        assert_eq!(k14.stone_cost, 750.0);
        assert_close(k14.final_total, 14_550.0);
        assert_eq!(k14.downpayment_rate, 0.50);
        assert_close(k14.downpayment_amount, 7275.0);
        assert_close(k14.balance_due, 7275.0);
    }

    #[test]
    fn test_scenario_a_18k() {
        let k18 = compute_quotation(&scenario_a()).k18;
        assert_eq!(k18.gold_unit_price, 2000.0);
        assert_close(k18.gold_cost, 22_000.0);
        assert_close(k18.raw_cost, 23_000.0);
        assert_close(k18.profit_amount, 5750.0);
        assert_close(k18.final_total, 29_500.0);
        assert_eq!(k18.downpayment_rate, 0.50);
        assert_close(k18.downpayment_amount, 14_750.0);
        assert_close(k18.balance_due, 14_750.0);
    }

    #[test]
    fn test_shared_figures_match_across_tiers() {
        let pair = compute_quotation(&scenario_a());
        assert_eq!(pair.k14.effective_grams, pair.k18.effective_grams);
        assert_eq!(pair.k14.service_total, pair.k18.service_total);
        assert_eq!(pair.k14.stone_cost, pair.k18.stone_cost);
    }

    #[test]
    fn test_white_gold_loss() {
        let input = QuotationInput::new(2000.0, 10.0, GoldAlloy::WhiteOrRose);
        let pair = compute_quotation(&input);
        assert_eq!(pair.k14.effective_grams, 10.0 * (1.0 + 0.20));
        assert_close(pair.k18.gold_cost, 24_000.0);
    }

    #[test]
    fn test_non_finite_input_counts_as_zero() {
        let input = QuotationInput::new(f64::NAN, f64::INFINITY, GoldAlloy::Yellow)
            .with_stone(f64::NAN, 100.0, 1.0);
        let pair = compute_quotation(&input);
        assert_eq!(pair.k18.gold_cost, 0.0);
        assert_eq!(pair.k18.stone_cost, 150.0);
        assert_eq!(pair.k18.final_total, 150.0);
    }

    #[test]
    fn test_custom_rules() {
        let mut rules = PricingRules::default();
        rules.stone_margin_multiplier = 2.0;
        rules.downpayment.threshold = 1000.0;

        let engine = QuotationEngine::new(rules);
        let pair = engine.compute(&QuotationInput::default().with_stone(0.0, 600.0, 1.0));
        assert_eq!(pair.k14.stone_cost, 1200.0);
        assert_eq!(pair.k14.downpayment_rate, 0.70);
    }

    #[test]
    fn test_pair_lookup() {
        let pair = compute_quotation(&scenario_a());
        assert_eq!(pair.get(KaratTier::K14).tier, KaratTier::K14);
        assert_eq!(pair.get(KaratTier::K18).tier, KaratTier::K18);
        let tiers: Vec<_> = pair.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![KaratTier::K14, KaratTier::K18]);
    }
}
