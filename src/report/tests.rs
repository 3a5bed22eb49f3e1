//! Tests for report formatting functions.

use super::*;
use crate::calculator::calculate;
use rust_decimal_macros::dec;

fn scenario(margin_limit: Decimal) -> (TradeInputs, TradeResult) {
    let inputs = TradeInputs::new(dec!(100), dec!(5), dec!(2), dec!(10), margin_limit);
    let result = calculate(&inputs).unwrap();
    (inputs, result)
}

// ==================== Helper function tests ====================

#[test]
fn test_add_thousand_separators_small() {
    assert_eq!(add_thousand_separators("42"), "42");
}

#[test]
fn test_add_thousand_separators_millions() {
    assert_eq!(add_thousand_separators("1234567"), "1,234,567");
}

#[test]
fn test_format_amount_pads_decimals() {
    assert_eq!(format_amount(dec!(4000), 2), "4,000.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-1234.5), 2), "-1,234.50");
}

#[test]
fn test_format_amount_negative_zero() {
    assert_eq!(format_amount(dec!(-0.00), 2), "0.00");
}

#[test]
fn test_format_amount_without_decimals() {
    assert_eq!(format_amount(dec!(12345.6), 0), "12,346");
}

#[test]
fn test_format_percent_trims_trailing_zeros() {
    assert_eq!(format_percent(dec!(2.50)), "2.5%");
}

// ==================== Report tests ====================

#[test]
fn test_format_report_rows() {
    let (inputs, result) = scenario(dec!(1000));
    let text = format_report(&Report::new(&inputs, &result));

    assert!(text.starts_with("Trade Calculations\n"));
    assert!(text.contains("Actual Risk:"));
    assert!(text.contains("100.00"));
    assert!(text.contains("5%"));
    assert!(text.contains("10x"));
    assert!(text.contains("4,807.69"));
    assert!(text.contains("480.77"));
    assert!(text.contains("3.85"));
    assert!(text.contains("236.54"));
    assert!(!text.contains("Warning"));
}

#[test]
fn test_format_report_with_advisory() {
    let (inputs, result) = scenario(dec!(400));
    let text = format_report(&Report::new(&inputs, &result));

    assert!(text.contains("4,000.00"));
    assert!(text.contains(
        "Warning: position size adjusted due to margin limit (requested 480.77, limit 400)"
    ));
}

#[test]
fn test_format_report_with_more_decimals() {
    let inputs = TradeInputs::new(dec!(100), dec!(5), dec!(2), dec!(10), dec!(1000));
    let result = crate::calculator::TradeCalculator::new()
        .with_decimal_places(4)
        .calculate(&inputs)
        .unwrap();
    let text = format_report(&Report::new(&inputs, &result).with_decimal_places(4));

    assert!(text.contains("4,807.6923"));
}

#[test]
fn test_report_json() {
    let (inputs, result) = scenario(dec!(400));
    let json = Report::new(&inputs, &result).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["result"]["margin_required"], "400");
    assert_eq!(value["result"]["advisory"]["margin_limit"], "400");
    assert_eq!(value["inputs"]["leverage"], "10");
}

#[test]
fn test_report_json_omits_missing_advisory() {
    let (inputs, result) = scenario(dec!(1000));
    let json = Report::new(&inputs, &result).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value["result"].get("advisory").is_none());
}
