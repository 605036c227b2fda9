//! End-to-end editing flows: type into a sheet, re-quote after every edit.

use feliz_core::{GoldAlloy, QuotationEngine, ServiceKind};
use feliz_sheet::{LineEntry, LineField, QuoteSheet, SheetError, StoneField};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn scenario_a_sheet() -> QuoteSheet {
    let mut sheet = QuoteSheet::new();
    sheet.set_price_of_gold("2000");
    sheet.set_grams("10");
    for (kind, rate) in [
        (ServiceKind::Goldsmith, "500"),
        (ServiceKind::PolishPlating, "300"),
        (ServiceKind::LaserEngrave, "200"),
    ] {
        sheet.update_line(kind, LineField::Rate, rate);
        sheet.update_line(kind, LineField::Qty, "1");
    }
    let stone = sheet.stones()[0].id;
    sheet.update_stone(stone, StoneField::Setting, "100").unwrap();
    sheet.update_stone(stone, StoneField::Price, "400").unwrap();
    sheet.update_stone(stone, StoneField::Qty, "1").unwrap();
    sheet
}

#[test]
fn test_scenario_a_from_typed_text() {
    let engine = QuotationEngine::default();
    let quote = scenario_a_sheet().quote(&engine);

    assert_close(quote.k14.final_total, 14_550.0);
    assert_close(quote.k14.downpayment_amount, 7275.0);
    assert_close(quote.k18.final_total, 29_500.0);
    assert_close(quote.k18.balance_due, 14_750.0);
}

#[test]
fn test_mid_typing_values_never_fail() {
    let engine = QuotationEngine::default();
    let mut sheet = scenario_a_sheet();

    for partial in ["", "-", "2", "2.", "2.5", "2.5e", "abc"] {
        sheet.set_grams(partial);
        let quote = sheet.quote(&engine);
        assert!(quote.k18.final_total.is_finite(), "failed while typing {:?}", partial);
    }
}

#[test]
fn test_alloy_switch_changes_only_gold() {
    let engine = QuotationEngine::default();
    let mut sheet = scenario_a_sheet();
    let yellow = sheet.quote(&engine);

    sheet.select_alloy(GoldAlloy::WhiteOrRose);
    let white = sheet.quote(&engine);

    assert_close(white.k18.effective_grams, 12.0);
    assert!(white.k18.gold_cost > yellow.k18.gold_cost);
    assert_eq!(white.k18.stone_cost, yellow.k18.stone_cost);
    assert_eq!(white.k18.service_total, yellow.k18.service_total);
}

#[test]
fn test_adding_and_removing_stones() {
    let engine = QuotationEngine::default();
    let mut sheet = scenario_a_sheet();
    let base = sheet.quote(&engine).k14.stone_cost;

    let extra = sheet.add_stone();
    assert_eq!(sheet.quote(&engine).k14.stone_cost, base);

    sheet.update_stone(extra, StoneField::Price, "1000").unwrap();
    sheet.update_stone(extra, StoneField::Qty, "2").unwrap();
    assert_eq!(sheet.quote(&engine).k14.stone_cost, base + 3000.0);

    sheet.remove_stone(extra).unwrap();
    assert_eq!(sheet.quote(&engine).k14.stone_cost, base);
}

#[test]
fn test_raw_snapshot_keeps_order() {
    let mut sheet = QuoteSheet::new();
    let second = sheet.add_stone();
    sheet.update_stone(second, StoneField::Price, "42").unwrap();

    let raw = sheet.to_raw();
    assert_eq!(raw.stone_rows.len(), 2);
    assert_eq!(raw.stone_rows[1].stone_price.value(), 42.0);

    let kinds: Vec<_> = raw.service_lines.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, ServiceKind::ALL.to_vec());
}

#[test]
fn test_sheet_json_round_trip() {
    let sheet = scenario_a_sheet();
    let json = serde_json::to_string(&sheet).unwrap();
    let restored: QuoteSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, sheet);
}

#[test]
fn test_sheet_json_without_stones_gets_blank_row() {
    let json = r#"{
        "priceOfGold": "2000",
        "grams": "10",
        "goldAlloy": "yellow",
        "lines": { "goldsmith": { "rate": "500", "qty": "1" } },
        "stones": []
    }"#;
    let mut sheet: QuoteSheet = serde_json::from_str(json).unwrap();
    assert_eq!(sheet.stones().len(), 1);
    assert_eq!(sheet.stones()[0].stone_price, "");
    assert_eq!(sheet.line(ServiceKind::LaserEngrave), Some(&LineEntry::default()));

    let only = sheet.stones()[0].id;
    assert!(matches!(sheet.remove_stone(only), Err(SheetError::LastStone)));

    let pair = sheet.quote(&QuotationEngine::default());
    assert_eq!(pair.k14.stone_cost, 0.0);
    assert_eq!(pair.k18.service_total, 500.0);
}
