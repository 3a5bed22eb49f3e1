//! Trade parameters as supplied by the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calculator::ValidationError;

/// InputField names one of the five calculator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    MaxRisk,
    ProfitPercent,
    StopLossPercent,
    Leverage,
    MarginLimit,
}

impl InputField {
    /// All fields in form order.
    pub const ALL: [InputField; 5] = [
        InputField::MaxRisk,
        InputField::ProfitPercent,
        InputField::StopLossPercent,
        InputField::Leverage,
        InputField::MarginLimit,
    ];
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::MaxRisk => write!(f, "max_risk"),
            InputField::ProfitPercent => write!(f, "profit_percent"),
            InputField::StopLossPercent => write!(f, "stop_loss_percent"),
            InputField::Leverage => write!(f, "leverage"),
            InputField::MarginLimit => write!(f, "margin_limit"),
        }
    }
}

/// RawTradeInputs holds the five parameters exactly as typed into a form
/// or passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTradeInputs {
    pub max_risk: String,
    pub profit_percent: String,
    pub stop_loss_percent: String,
    pub leverage: String,
    pub margin_limit: String,
}

impl RawTradeInputs {
    /// Returns the raw text of a field.
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::MaxRisk => &self.max_risk,
            InputField::ProfitPercent => &self.profit_percent,
            InputField::StopLossPercent => &self.stop_loss_percent,
            InputField::Leverage => &self.leverage,
            InputField::MarginLimit => &self.margin_limit,
        }
    }

    /// Returns a mutable reference to the raw text of a field.
    pub fn get_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::MaxRisk => &mut self.max_risk,
            InputField::ProfitPercent => &mut self.profit_percent,
            InputField::StopLossPercent => &mut self.stop_loss_percent,
            InputField::Leverage => &mut self.leverage,
            InputField::MarginLimit => &mut self.margin_limit,
        }
    }

    /// Parses every field, failing on the first one that is not a finite number.
    pub fn parse(&self) -> Result<TradeInputs, ValidationError> {
        let field = |f: InputField| parse_number(f, self.get(f));

        Ok(TradeInputs {
            max_risk: field(InputField::MaxRisk)?,
            profit_percent: field(InputField::ProfitPercent)?,
            stop_loss_percent: field(InputField::StopLossPercent)?,
            leverage: field(InputField::Leverage)?,
            margin_limit: field(InputField::MarginLimit)?,
        })
    }
}

/// TradeInputs are the validated numeric parameters of a single trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInputs {
    /// Maximum amount the trader is willing to lose, in currency.
    pub max_risk: Decimal,
    /// Expected profit as a percentage of position size.
    pub profit_percent: Decimal,
    /// Stop-loss distance as a percentage of position size.
    pub stop_loss_percent: Decimal,
    /// Leverage multiplier.
    pub leverage: Decimal,
    /// Maximum margin allowed, in currency.
    pub margin_limit: Decimal,
}

impl TradeInputs {
    /// Creates a new TradeInputs instance.
    pub fn new(
        max_risk: Decimal,
        profit_percent: Decimal,
        stop_loss_percent: Decimal,
        leverage: Decimal,
        margin_limit: Decimal,
    ) -> Self {
        Self {
            max_risk,
            profit_percent,
            stop_loss_percent,
            leverage,
            margin_limit,
        }
    }

    /// Builds inputs from floats, rejecting NaN and infinities.
    /// Tiny magnitudes round to 28 decimal places; huge ones are `TooLarge`.
    pub fn from_f64(
        max_risk: f64,
        profit_percent: f64,
        stop_loss_percent: f64,
        leverage: f64,
        margin_limit: f64,
    ) -> Result<Self, ValidationError> {
        let convert = |field: InputField, value: f64| {
            if !value.is_finite() {
                return Err(ValidationError::InvalidNumber {
                    field,
                    value: value.to_string(),
                });
            }
            decimal_from_f64(field, value, &value.to_string())
        };

        Ok(Self {
            max_risk: convert(InputField::MaxRisk, max_risk)?,
            profit_percent: convert(InputField::ProfitPercent, profit_percent)?,
            stop_loss_percent: convert(InputField::StopLossPercent, stop_loss_percent)?,
            leverage: convert(InputField::Leverage, leverage)?,
            margin_limit: convert(InputField::MarginLimit, margin_limit)?,
        })
    }

    /// Returns the value of a field.
    pub fn get(&self, field: InputField) -> Decimal {
        match field {
            InputField::MaxRisk => self.max_risk,
            InputField::ProfitPercent => self.profit_percent,
            InputField::StopLossPercent => self.stop_loss_percent,
            InputField::Leverage => self.leverage,
            InputField::MarginLimit => self.margin_limit,
        }
    }
}

/// Largest magnitude a `Decimal` can hold, as a float.
const DECIMAL_MAX_F64: f64 = 7.922_816_251_426_434e28;

/// Parses a decimal number, accepting plain ("12.5") and scientific ("1.25e1")
/// notation. Surrounding whitespace is ignored.
///
/// Magnitudes below the smallest representable step are rounded to 28
/// decimal places (so `1e-40` becomes zero); magnitudes above `Decimal::MAX`
/// are reported as `TooLarge`.
fn parse_number(field: InputField, raw: &str) -> Result<Decimal, ValidationError> {
    let s = raw.trim();
    if !is_numeric_literal(s) {
        return Err(ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        });
    }

    if let Ok(value) = Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
        return Ok(value);
    }

    // Syntactically a number, but outside what Decimal parses directly.
    let float: f64 = s.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })?;
    decimal_from_f64(field, float, raw)
}

fn decimal_from_f64(field: InputField, value: f64, raw: &str) -> Result<Decimal, ValidationError> {
    let too_large = || ValidationError::TooLarge {
        field,
        value: raw.to_string(),
    };

    if !value.is_finite() || value.abs() >= DECIMAL_MAX_F64 {
        return Err(too_large());
    }

    if value.abs() < 1.0 {
        // At most 28 fractional digits, which always fits.
        return Decimal::from_str(&format!("{:.28}", value)).map_err(|_| too_large());
    }

    Decimal::try_from(value).map_err(|_| too_large())
}

/// Checks for `[+-]digits[.digits][(e|E)[+-]digits]` with at least one digit
/// in the mantissa. Digit separators, `NaN` and `inf` are rejected.
fn is_numeric_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}
