//! Calculator configuration.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use super::ConfigError;
use crate::calculator::{DEFAULT_DECIMAL_PLACES, Rounding, TradeCalculator};
use crate::domain::{DEFAULT_FEE_PERCENT_PER_SIDE, FeeSchedule};

/// Highest accepted `decimal_places`.
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Fee, rounding and validation settings for the trade calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorConfig {
    /// Fee per side in percent as a decimal string (e.g., "0.04" for 0.04%).
    pub fee_percent_per_side: Option<String>,
    /// Decimal places kept in every output figure.
    pub decimal_places: Option<u32>,
    /// Midpoint rounding: "half_away_from_zero" or "half_even".
    #[serde(default)]
    pub rounding: Rounding,
    /// Reject negative risk or stop loss and non-positive leverage or margin limit.
    #[serde(default = "default_strict_domain")]
    pub strict_domain: bool,
}

fn default_strict_domain() -> bool {
    true
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            fee_percent_per_side: None,
            decimal_places: None,
            rounding: Rounding::default(),
            strict_domain: default_strict_domain(),
        }
    }
}

impl CalculatorConfig {
    /// Parsed fee per side, falling back to the 0.04% default.
    pub fn fee_percent(&self) -> Result<Decimal, ConfigError> {
        match self.fee_percent_per_side.as_deref() {
            None => Ok(DEFAULT_FEE_PERCENT_PER_SIDE),
            Some(raw) => Decimal::from_str(raw.trim()).map_err(|_| {
                ConfigError::invalid(
                    "calculator.fee_percent_per_side",
                    format!("is not a decimal: {:?}", raw),
                )
            }),
        }
    }

    /// Builds a calculator from these settings.
    pub fn build(&self) -> Result<TradeCalculator, ConfigError> {
        let fee = self.fee_percent()?;
        if fee < Decimal::ZERO {
            return Err(ConfigError::invalid(
                "calculator.fee_percent_per_side",
                "must not be negative",
            ));
        }

        let decimal_places = self.decimal_places.unwrap_or(DEFAULT_DECIMAL_PLACES);
        if decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::invalid(
                "calculator.decimal_places",
                format!("must be at most {}", MAX_DECIMAL_PLACES),
            ));
        }

        Ok(TradeCalculator::new()
            .with_fees(FeeSchedule::new(fee))
            .with_decimal_places(decimal_places)
            .with_rounding(self.rounding)
            .with_strict_domain(self.strict_domain))
    }
}
