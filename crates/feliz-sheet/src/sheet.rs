//! Quote sheet: the editable form behind a quotation
//!
//! Holds every field exactly as typed. The sheet is owned by whoever drives
//! the form; the engine only ever sees a coerced snapshot of it.

use crate::error::SheetError;
use feliz_core::{
    GoldAlloy, NumericField, PricingRules, QuotationEngine, QuotationPair, RawQuotationInput,
    RawServiceLine, RawStoneRow, ServiceKind, parse_numeric_or_zero,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier of a stone row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoneId(Uuid);

impl StoneId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for StoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Rate,
    Qty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoneField {
    Setting,
    Price,
    Qty,
}

/// Rate and quantity of a service line, as typed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineEntry {
    pub rate: String,
    pub qty: String,
}

/// One stone row, as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoneEntry {
    pub id: StoneId,
    pub stone_setting: String,
    pub stone_price: String,
    pub qty: String,
}

impl StoneEntry {
    fn blank() -> Self {
        Self {
            id: StoneId::generate(),
            stone_setting: String::new(),
            stone_price: String::new(),
            qty: String::new(),
        }
    }

    fn to_raw(&self) -> RawStoneRow {
        RawStoneRow {
            setting_cost: NumericField::from(self.stone_setting.as_str()),
            stone_price: NumericField::from(self.stone_price.as_str()),
            qty: NumericField::from(self.qty.as_str()),
        }
    }
}

/// Mutable form state for one quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SheetSnapshot")]
pub struct QuoteSheet {
    price_of_gold: String,
    grams: String,
    gold_alloy: GoldAlloy,
    lines: BTreeMap<ServiceKind, LineEntry>,
    stones: Vec<StoneEntry>,
}

/// Serialized sheet, before the one-stone-row minimum is restored
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetSnapshot {
    #[serde(default)]
    price_of_gold: String,
    #[serde(default)]
    grams: String,
    #[serde(default)]
    gold_alloy: GoldAlloy,
    #[serde(default)]
    lines: BTreeMap<ServiceKind, LineEntry>,
    #[serde(default)]
    stones: Vec<StoneEntry>,
}

impl From<SheetSnapshot> for QuoteSheet {
    fn from(snapshot: SheetSnapshot) -> Self {
        let mut lines = snapshot.lines;
        for kind in ServiceKind::ALL {
            lines.entry(kind).or_default();
        }

        let mut stones = snapshot.stones;
        if stones.is_empty() {
            stones.push(StoneEntry::blank());
        }

        Self {
            price_of_gold: snapshot.price_of_gold,
            grams: snapshot.grams,
            gold_alloy: snapshot.gold_alloy,
            lines,
            stones,
        }
    }
}

impl QuoteSheet {
    /// Blank sheet: yellow gold, empty service lines, one empty stone row
    pub fn new() -> Self {
        Self {
            price_of_gold: String::new(),
            grams: String::new(),
            gold_alloy: GoldAlloy::Yellow,
            lines: ServiceKind::ALL
                .iter()
                .map(|kind| (*kind, LineEntry::default()))
                .collect(),
            stones: vec![StoneEntry::blank()],
        }
    }

    pub fn price_of_gold(&self) -> &str {
        &self.price_of_gold
    }

    pub fn grams(&self) -> &str {
        &self.grams
    }

    pub fn gold_alloy(&self) -> GoldAlloy {
        self.gold_alloy
    }

    pub fn line(&self, kind: ServiceKind) -> Option<&LineEntry> {
        self.lines.get(&kind)
    }

    pub fn stones(&self) -> &[StoneEntry] {
        &self.stones
    }

    pub fn set_price_of_gold(&mut self, text: impl Into<String>) {
        self.price_of_gold = text.into();
    }

    pub fn set_grams(&mut self, text: impl Into<String>) {
        self.grams = text.into();
    }

    pub fn select_alloy(&mut self, alloy: GoldAlloy) {
        self.gold_alloy = alloy;
    }

    pub fn update_line(&mut self, kind: ServiceKind, field: LineField, text: impl Into<String>) {
        let entry = self.lines.entry(kind).or_default();
        match field {
            LineField::Rate => entry.rate = text.into(),
            LineField::Qty => entry.qty = text.into(),
        }
    }

    /// Append an empty stone row and return its id
    pub fn add_stone(&mut self) -> StoneId {
        let entry = StoneEntry::blank();
        let id = entry.id;
        self.stones.push(entry);
        id
    }

    pub fn update_stone(
        &mut self,
        id: StoneId,
        field: StoneField,
        text: impl Into<String>,
    ) -> Result<(), SheetError> {
        let entry = self
            .stones
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(SheetError::UnknownStone(id))?;

        match field {
            StoneField::Setting => entry.stone_setting = text.into(),
            StoneField::Price => entry.stone_price = text.into(),
            StoneField::Qty => entry.qty = text.into(),
        }
        Ok(())
    }

    /// Remove a stone row; the last remaining row is kept
    pub fn remove_stone(&mut self, id: StoneId) -> Result<(), SheetError> {
        let index = self
            .stones
            .iter()
            .position(|row| row.id == id)
            .ok_or(SheetError::UnknownStone(id))?;

        if self.stones.len() == 1 {
            tracing::debug!(%id, "refusing to remove the last stone row");
            return Err(SheetError::LastStone);
        }

        self.stones.remove(index);
        Ok(())
    }

    /// Snapshot of the sheet as engine input text, ids dropped
    pub fn to_raw(&self) -> RawQuotationInput {
        RawQuotationInput {
            price_per_gram: NumericField::from(self.price_of_gold.as_str()),
            grams: NumericField::from(self.grams.as_str()),
            gold_alloy: self.gold_alloy,
            service_lines: ServiceKind::ALL
                .iter()
                .map(|kind| {
                    let entry = self.lines.get(kind).cloned().unwrap_or_default();
                    RawServiceLine {
                        kind: *kind,
                        rate: NumericField::from(entry.rate),
                        qty: NumericField::from(entry.qty),
                    }
                })
                .collect(),
            stone_rows: self.stones.iter().map(StoneEntry::to_raw).collect(),
        }
    }

    /// Run the engine on the current sheet contents
    pub fn quote(&self, engine: &QuotationEngine) -> QuotationPair {
        engine.compute(&self.to_raw().coerce())
    }

    /// Rate × qty of one service line, for display beside the line
    pub fn line_subtotal(&self, kind: ServiceKind) -> f64 {
        self.lines
            .get(&kind)
            .map(|entry| parse_numeric_or_zero(&entry.rate) * parse_numeric_or_zero(&entry.qty))
            .unwrap_or(0.0)
    }

    /// Priced total of one stone row, stone margin included
    pub fn stone_total(&self, id: StoneId, rules: &PricingRules) -> Result<f64, SheetError> {
        let entry = self
            .stones
            .iter()
            .find(|row| row.id == id)
            .ok_or(SheetError::UnknownStone(id))?;

        Ok(entry.to_raw().coerce().priced(rules.stone_margin_multiplier))
    }
}

impl Default for QuoteSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sheet_has_one_stone() {
        let sheet = QuoteSheet::new();
        assert_eq!(sheet.stones().len(), 1);
        assert_eq!(sheet.gold_alloy(), GoldAlloy::Yellow);
        for kind in ServiceKind::ALL {
            assert_eq!(sheet.line(kind), Some(&LineEntry::default()));
        }
    }

    #[test]
    fn test_last_stone_is_kept() {
        let mut sheet = QuoteSheet::new();
        let only = sheet.stones()[0].id;
        assert!(matches!(sheet.remove_stone(only), Err(SheetError::LastStone)));
        assert_eq!(sheet.stones().len(), 1);
    }

    #[test]
    fn test_add_and_remove_stone() {
        let mut sheet = QuoteSheet::new();
        let first = sheet.stones()[0].id;
        let second = sheet.add_stone();
        assert_ne!(first, second);
        assert_eq!(sheet.stones().len(), 2);

        sheet.remove_stone(first).unwrap();
        assert_eq!(sheet.stones().len(), 1);
        assert_eq!(sheet.stones()[0].id, second);
    }

    #[test]
    fn test_unknown_stone() {
        let mut other = QuoteSheet::new();
        let foreign = other.add_stone();

        let mut sheet = QuoteSheet::new();
        sheet.add_stone();
        assert!(matches!(
            sheet.update_stone(foreign, StoneField::Qty, "1"),
            Err(SheetError::UnknownStone(id)) if id == foreign
        ));
        assert!(matches!(
            sheet.remove_stone(foreign),
            Err(SheetError::UnknownStone(_))
        ));
    }

    #[test]
    fn test_line_subtotal() {
        let mut sheet = QuoteSheet::new();
        sheet.update_line(ServiceKind::PolishPlating, LineField::Rate, "300");
        sheet.update_line(ServiceKind::PolishPlating, LineField::Qty, "2");
        assert_eq!(sheet.line_subtotal(ServiceKind::PolishPlating), 600.0);
        assert_eq!(sheet.line_subtotal(ServiceKind::Goldsmith), 0.0);
    }

    #[test]
    fn test_stone_total_includes_margin() {
        let mut sheet = QuoteSheet::new();
        let id = sheet.stones()[0].id;
        sheet.update_stone(id, StoneField::Setting, "100").unwrap();
        sheet.update_stone(id, StoneField::Price, "400").unwrap();
        sheet.update_stone(id, StoneField::Qty, "2").unwrap();
        assert_eq!(sheet.stone_total(id, &PricingRules::default()).unwrap(), 1500.0);
    }

    #[test]
    fn test_stone_totals_match_engine_stone_cost() {
        let mut sheet = QuoteSheet::new();
        let first = sheet.stones()[0].id;
        sheet.update_stone(first, StoneField::Setting, "100").unwrap();
        sheet.update_stone(first, StoneField::Price, "400").unwrap();
        sheet.update_stone(first, StoneField::Qty, "1").unwrap();
        let second = sheet.add_stone();
        sheet.update_stone(second, StoneField::Price, "250.5").unwrap();
        sheet.update_stone(second, StoneField::Qty, "3").unwrap();

        let rules = PricingRules {
            stone_margin_multiplier: 1.4,
            ..PricingRules::default()
        };
        let shown: f64 = [first, second]
            .iter()
            .map(|id| sheet.stone_total(*id, &rules).unwrap())
            .sum();
        let pair = sheet.quote(&QuotationEngine::new(rules));
        assert!((shown - pair.k14.stone_cost).abs() < 1e-9);
    }
}
