//! Input data model for the quotation engine
//!
//! Two shapes of the same input exist:
//! - [`RawQuotationInput`]: text as collected from a form, may be garbage
//! - [`QuotationInput`]: finite numbers, ready for the engine

use crate::numeric::{parse_numeric_or_zero, sanitize};
use serde::{Deserialize, Serialize};

/// Gold alloy family, which decides the fabrication loss allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GoldAlloy {
    #[default]
    Yellow,
    #[serde(alias = "whiteRose")]
    WhiteOrRose,
}

impl GoldAlloy {
    pub const ALL: [GoldAlloy; 2] = [GoldAlloy::Yellow, GoldAlloy::WhiteOrRose];

    pub fn label(&self) -> &'static str {
        match self {
            GoldAlloy::Yellow => "Yellow Gold",
            GoldAlloy::WhiteOrRose => "White Gold & Rose Gold",
        }
    }
}

impl std::fmt::Display for GoldAlloy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Predefined labor and finishing services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceKind {
    Goldsmith,
    PolishPlating,
    LaserEngrave,
}

impl ServiceKind {
    /// Display order of the service lines on a quote
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::Goldsmith,
        ServiceKind::PolishPlating,
        ServiceKind::LaserEngrave,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::Goldsmith => "Labor: Goldsmith",
            ServiceKind::PolishPlating => "Polish & Gold Plating",
            ServiceKind::LaserEngrave => "Laser Engrave",
        }
    }
}

/// A single service line (rate × qty)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub kind: ServiceKind,
    pub rate: f64,
    pub qty: f64,
}

impl ServiceLine {
    pub fn new(kind: ServiceKind, rate: f64, qty: f64) -> Self {
        Self { kind, rate, qty }
    }

    /// Line cost before any margin
    pub fn subtotal(&self) -> f64 {
        self.rate * self.qty
    }
}

/// A gemstone row: the quantity multiplies setting cost plus stone price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoneRow {
    pub setting_cost: f64,
    pub stone_price: f64,
    pub qty: f64,
}

impl StoneRow {
    pub fn new(setting_cost: f64, stone_price: f64, qty: f64) -> Self {
        Self {
            setting_cost,
            stone_price,
            qty,
        }
    }

    /// Row cost before the stone margin
    pub fn subtotal(&self) -> f64 {
        (self.setting_cost + self.stone_price) * self.qty
    }

    /// Row cost with the stone margin multiplier applied
    pub fn priced(&self, multiplier: f64) -> f64 {
        self.subtotal() * multiplier
    }
}

/// Numeric engine input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuotationInput {
    pub price_per_gram: f64,
    pub grams: f64,
    #[serde(default)]
    pub gold_alloy: GoldAlloy,
    #[serde(default)]
    pub service_lines: Vec<ServiceLine>,
    #[serde(default)]
    pub stone_rows: Vec<StoneRow>,
}

impl QuotationInput {
    pub fn new(price_per_gram: f64, grams: f64, gold_alloy: GoldAlloy) -> Self {
        Self {
            price_per_gram,
            grams,
            gold_alloy,
            service_lines: Vec::new(),
            stone_rows: Vec::new(),
        }
    }

    pub fn with_service(mut self, kind: ServiceKind, rate: f64, qty: f64) -> Self {
        self.service_lines.push(ServiceLine::new(kind, rate, qty));
        self
    }

    pub fn with_stone(mut self, setting_cost: f64, stone_price: f64, qty: f64) -> Self {
        self.stone_rows.push(StoneRow::new(setting_cost, stone_price, qty));
        self
    }

    /// Copy of this input with every non-finite number replaced by zero
    pub fn sanitized(&self) -> Self {
        Self {
            price_per_gram: sanitize(self.price_per_gram),
            grams: sanitize(self.grams),
            gold_alloy: self.gold_alloy,
            service_lines: self
                .service_lines
                .iter()
                .map(|line| ServiceLine::new(line.kind, sanitize(line.rate), sanitize(line.qty)))
                .collect(),
            stone_rows: self
                .stone_rows
                .iter()
                .map(|row| {
                    StoneRow::new(
                        sanitize(row.setting_cost),
                        sanitize(row.stone_price),
                        sanitize(row.qty),
                    )
                })
                .collect(),
        }
    }
}

// ============================================================================
// Raw (text) input
// ============================================================================

/// A form value that may be a JSON number, raw text, or absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    #[default]
    Blank,
}

impl NumericField {
    /// Coerced value; anything unusable is zero
    pub fn value(&self) -> f64 {
        match self {
            NumericField::Number(n) => sanitize(*n),
            NumericField::Text(text) => parse_numeric_or_zero(text),
            NumericField::Blank => 0.0,
        }
    }
}

impl From<&str> for NumericField {
    fn from(text: &str) -> Self {
        NumericField::Text(text.to_string())
    }
}

impl From<String> for NumericField {
    fn from(text: String) -> Self {
        NumericField::Text(text)
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        NumericField::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawServiceLine {
    pub kind: ServiceKind,
    #[serde(default)]
    pub rate: NumericField,
    #[serde(default)]
    pub qty: NumericField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawStoneRow {
    #[serde(default, alias = "stoneSetting")]
    pub setting_cost: NumericField,
    #[serde(default)]
    pub stone_price: NumericField,
    #[serde(default)]
    pub qty: NumericField,
}

impl RawStoneRow {
    pub fn coerce(&self) -> StoneRow {
        StoneRow::new(
            self.setting_cost.value(),
            self.stone_price.value(),
            self.qty.value(),
        )
    }
}

/// Text-valued engine input, as supplied by an input collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawQuotationInput {
    #[serde(default, alias = "priceOfGold")]
    pub price_per_gram: NumericField,
    #[serde(default)]
    pub grams: NumericField,
    #[serde(default)]
    pub gold_alloy: GoldAlloy,
    #[serde(default)]
    pub service_lines: Vec<RawServiceLine>,
    #[serde(default)]
    pub stone_rows: Vec<RawStoneRow>,
}

impl RawQuotationInput {
    /// Apply numeric coercion to every field
    pub fn coerce(&self) -> QuotationInput {
        QuotationInput {
            price_per_gram: self.price_per_gram.value(),
            grams: self.grams.value(),
            gold_alloy: self.gold_alloy,
            service_lines: self
                .service_lines
                .iter()
                .map(|line| ServiceLine::new(line.kind, line.rate.value(), line.qty.value()))
                .collect(),
            stone_rows: self.stone_rows.iter().map(RawStoneRow::coerce).collect(),
        }
    }
}
