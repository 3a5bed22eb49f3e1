//! Text and JSON rendering of a calculated trade.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::calculator::DEFAULT_DECIMAL_PLACES;
use crate::domain::{TradeInputs, TradeResult};

/// Report bundles the inputs with the calculated figures for display.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub inputs: &'a TradeInputs,
    pub result: &'a TradeResult,
    /// Decimal places shown for currency amounts in the text table.
    #[serde(skip)]
    pub decimal_places: u32,
}

impl<'a> Report<'a> {
    pub fn new(inputs: &'a TradeInputs, result: &'a TradeResult) -> Self {
        Self {
            inputs,
            result,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }

    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// === Formatting functions ===

/// Formats the "Trade Calculations" table.
pub fn format_report(report: &Report<'_>) -> String {
    let inputs = report.inputs;
    let result = report.result;
    let amount = |value: Decimal| format_amount(value, report.decimal_places as usize);

    let rows = [
        ("Actual Risk", amount(result.actual_risk)),
        ("Expected Profit %", format_percent(inputs.profit_percent)),
        ("Stop Loss %", format_percent(inputs.stop_loss_percent)),
        ("Leverage", format!("{}x", inputs.leverage.normalize())),
        ("Position Size", amount(result.position_size)),
        ("Margin Required", amount(result.margin_required)),
        ("Total Fees", amount(result.total_fees)),
        ("Expected Profit", amount(result.expected_profit)),
    ];

    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;

    let mut out = String::from("Trade Calculations\n");
    for (label, value) in rows {
        out.push_str(&format!("  {:<width$} {:>14}\n", format!("{}:", label), value));
    }

    if let Some(advisory) = result.advisory {
        out.push_str(&format!("\nWarning: {}\n", advisory));
    }

    out
}

/// Formats a currency amount with fixed decimals and thousand separators.
fn format_amount(value: Decimal, decimals: usize) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(decimals as u32, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.*}", decimals, rounded);
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    match fixed.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}.{}", sign, add_thousand_separators(int_part), frac_part)
        }
        None => format!("{}{}", sign, add_thousand_separators(&fixed)),
    }
}

fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

/// Adds thousand separators to a string of digits.
fn add_thousand_separators(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests;
