//! Pricing rules
//!
//! The rate card used by the engine: loss allowance per alloy, stone margin,
//! the two karat tiers and the downpayment policy. Defaults reproduce the
//! shop's standard rate card; a YAML document can override any section.

use crate::error::QuoteError;
use crate::model::GoldAlloy;
use serde::{Deserialize, Deserializer, Serialize};

/// Gold purity tier a quote is issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KaratTier {
    #[serde(rename = "14k")]
    K14,
    #[serde(rename = "18k")]
    K18,
}

impl KaratTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            KaratTier::K14 => "14k",
            KaratTier::K18 => "18k",
        }
    }
}

impl std::fmt::Display for KaratTier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fractional weight added to cover fabrication loss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossRates {
    pub yellow: f64,
    pub white_or_rose: f64,
}

impl LossRates {
    pub fn for_alloy(&self, alloy: GoldAlloy) -> f64 {
        match alloy {
            GoldAlloy::Yellow => self.yellow,
            GoldAlloy::WhiteOrRose => self.white_or_rose,
        }
    }
}

impl Default for LossRates {
    fn default() -> Self {
        Self {
            yellow: 0.10,
            white_or_rose: 0.20,
        }
    }
}

/// Costing parameters of one karat tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierProfile {
    /// Subtracted from the market gold price before costing
    pub gold_offset: f64,

    /// Margin applied to gold plus services, in percent
    pub margin_pct: f64,

    /// Floor the discounted gold price at zero
    pub clamp_gold_price: bool,
}

/// Tier section of a rules document; absent fields keep the tier's own values
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TierOverride {
    gold_offset: Option<f64>,
    margin_pct: Option<f64>,
    clamp_gold_price: Option<bool>,
}

impl TierOverride {
    fn apply(self, base: TierProfile) -> TierProfile {
        TierProfile {
            gold_offset: self.gold_offset.unwrap_or(base.gold_offset),
            margin_pct: self.margin_pct.unwrap_or(base.margin_pct),
            clamp_gold_price: self.clamp_gold_price.unwrap_or(base.clamp_gold_price),
        }
    }
}

fn k14_profile<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TierProfile, D::Error> {
    Ok(TierOverride::deserialize(deserializer)?.apply(TierProfile::k14()))
}

fn k18_profile<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TierProfile, D::Error> {
    Ok(TierOverride::deserialize(deserializer)?.apply(TierProfile::k18()))
}

impl TierProfile {
    /// 14k: gold priced 1,000 below market, 15% on raw cost
    pub fn k14() -> Self {
        Self {
            gold_offset: 1000.0,
            margin_pct: 15.0,
            clamp_gold_price: true,
        }
    }

    /// 18k: market gold price, 25% on raw cost
    pub fn k18() -> Self {
        Self {
            gold_offset: 0.0,
            margin_pct: 25.0,
            clamp_gold_price: false,
        }
    }

    /// Per-gram gold price used for this tier
    pub fn gold_unit_price(&self, price_per_gram: f64) -> f64 {
        let discounted = price_per_gram - self.gold_offset;
        if self.clamp_gold_price {
            discounted.max(0.0)
        } else {
            discounted
        }
    }

    pub fn margin_rate(&self) -> f64 {
        self.margin_pct / 100.0
    }
}

/// Downpayment split: the higher rate applies strictly above the threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownpaymentPolicy {
    pub threshold: f64,
    pub rate_above: f64,
    pub rate_at_or_below: f64,
}

impl DownpaymentPolicy {
    pub fn rate_for(&self, final_total: f64) -> f64 {
        if final_total > self.threshold {
            self.rate_above
        } else {
            self.rate_at_or_below
        }
    }
}

impl Default for DownpaymentPolicy {
    fn default() -> Self {
        Self {
            threshold: 50_000.0,
            rate_above: 0.70,
            rate_at_or_below: 0.50,
        }
    }
}

/// Complete rate card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    pub loss_rates: LossRates,

    /// Stones carry their own flat margin (1.5 = 50%)
    pub stone_margin_multiplier: f64,

    #[serde(deserialize_with = "k14_profile")]
    pub k14: TierProfile,
    #[serde(deserialize_with = "k18_profile")]
    pub k18: TierProfile,

    pub downpayment: DownpaymentPolicy,
}

impl PricingRules {
    pub fn tier(&self, tier: KaratTier) -> &TierProfile {
        match tier {
            KaratTier::K14 => &self.k14,
            KaratTier::K18 => &self.k18,
        }
    }

    /// Parse rules from YAML, filling missing sections with defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, QuoteError> {
        let rules: PricingRules =
            serde_yaml::from_str(yaml).map_err(|e| QuoteError::Config(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a YAML file
    pub fn load(path: &str) -> Result<Self, QuoteError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| QuoteError::Config(format!("failed to read {}: {}", path, e)))?;
        let rules = Self::from_yaml(&content)?;
        tracing::info!(path, "loaded pricing rules");
        Ok(rules)
    }

    /// Reject rate cards that would produce negative or undefined prices
    pub fn validate(&self) -> Result<(), QuoteError> {
        let non_negative = [
            ("loss_rates.yellow", self.loss_rates.yellow),
            ("loss_rates.white_or_rose", self.loss_rates.white_or_rose),
            ("stone_margin_multiplier", self.stone_margin_multiplier),
            ("k14.gold_offset", self.k14.gold_offset),
            ("k14.margin_pct", self.k14.margin_pct),
            ("k18.gold_offset", self.k18.gold_offset),
            ("k18.margin_pct", self.k18.margin_pct),
            ("downpayment.threshold", self.downpayment.threshold),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(QuoteError::InvalidRules(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        // An offset without the clamp can price gold below zero
        for (name, tier) in [("k14", &self.k14), ("k18", &self.k18)] {
            if tier.gold_offset > 0.0 && !tier.clamp_gold_price {
                return Err(QuoteError::InvalidRules(format!(
                    "{}.clamp_gold_price must be true when gold_offset is {}",
                    name, tier.gold_offset
                )));
            }
        }

        // Below one half, final_total - downpayment is no longer exact
        let rates = [
            ("downpayment.rate_above", self.downpayment.rate_above),
            ("downpayment.rate_at_or_below", self.downpayment.rate_at_or_below),
        ];
        for (name, value) in rates {
            if !(0.5..=1.0).contains(&value) {
                return Err(QuoteError::InvalidRules(format!(
                    "{} must be between 0.5 and 1, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            loss_rates: LossRates::default(),
            stone_margin_multiplier: 1.5,
            k14: TierProfile::k14(),
            k18: TierProfile::k18(),
            downpayment: DownpaymentPolicy::default(),
        }
    }
}
