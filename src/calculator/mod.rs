//! Position sizing for a single leveraged trade.
//!
//! Sizes the position so that the loss at the stop plus the round-trip fee
//! equals the risk budget, then caps the margin at the configured limit.
//! All arithmetic is done in `Decimal` with checked operations; only the
//! final figures are rounded.

mod error;

pub use error::ValidationError;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{
    FeeSchedule, InputField, MarginAdvisory, RawTradeInputs, TradeInputs, TradeResult,
};

/// Default number of decimal places in every output figure.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// How midpoints are rounded when outputs are cut to their decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// 0.125 -> 0.13, -0.125 -> -0.13.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 0.125 -> 0.12, 0.135 -> 0.14.
    HalfEven,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// TradeCalculator turns trade parameters into position size, margin,
/// fees, risk and profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeCalculator {
    fees: FeeSchedule,
    decimal_places: u32,
    rounding: Rounding,
    strict_domain: bool,
}

impl Default for TradeCalculator {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::default(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            rounding: Rounding::default(),
            strict_domain: true,
        }
    }
}

impl TradeCalculator {
    /// Creates a calculator with the default 0.04% fee per side, two decimal
    /// places, half-away-from-zero rounding and strict range checks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Enables or disables the range checks on risk, stop loss, leverage
    /// and margin limit. Finite-number validation always applies.
    pub fn with_strict_domain(mut self, strict: bool) -> Self {
        self.strict_domain = strict;
        self
    }

    pub fn fees(&self) -> FeeSchedule {
        self.fees
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    pub fn is_strict(&self) -> bool {
        self.strict_domain
    }

    /// Parses raw form values and calculates the trade.
    pub fn calculate_raw(&self, raw: &RawTradeInputs) -> Result<TradeResult, ValidationError> {
        let inputs = raw.parse()?;
        self.calculate(&inputs)
    }

    /// Calculates position size, margin, fees, risk and expected profit.
    ///
    /// When the margin needed for the full position exceeds
    /// `inputs.margin_limit`, the margin is capped at the limit, the position
    /// is rebuilt from it and the result carries a [`MarginAdvisory`].
    pub fn calculate(&self, inputs: &TradeInputs) -> Result<TradeResult, ValidationError> {
        if self.strict_domain {
            check_domain(inputs)?;
        }

        let risk_percent = inputs
            .stop_loss_percent
            .checked_add(self.fees.round_trip_percent())
            .ok_or(ValidationError::Overflow)?;
        if risk_percent.is_zero() {
            return Err(ValidationError::OutOfRange {
                field: InputField::StopLossPercent,
                requirement: "different from the negated round-trip fee",
                value: inputs.stop_loss_percent,
            });
        }

        let unclamped_size = inputs
            .max_risk
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|v| v.checked_div(risk_percent))
            .ok_or(ValidationError::Overflow)?;

        // None: zero leverage, the margin is unbounded.
        let requested_margin = if inputs.leverage.is_zero() {
            None
        } else {
            Some(
                unclamped_size
                    .checked_div(inputs.leverage)
                    .ok_or(ValidationError::Overflow)?,
            )
        };

        debug!(
            position_size = %unclamped_size,
            requested_margin = ?requested_margin,
            margin_limit = %inputs.margin_limit,
            "Sized position from risk budget"
        );

        let (position_size, margin_required, advisory) = match requested_margin {
            Some(margin) if margin <= inputs.margin_limit => (unclamped_size, margin, None),
            requested => {
                let position_size = inputs
                    .margin_limit
                    .checked_mul(inputs.leverage)
                    .ok_or(ValidationError::Overflow)?;
                let advisory = MarginAdvisory {
                    requested_margin: requested.map(|m| self.round(m)),
                    margin_limit: inputs.margin_limit,
                };

                warn!(
                    requested_margin = ?advisory.requested_margin,
                    margin_limit = %inputs.margin_limit,
                    position_size = %position_size,
                    "Position size adjusted due to margin limit"
                );

                (position_size, inputs.margin_limit, Some(advisory))
            }
        };

        let total_fees = self
            .fees
            .round_trip_fee(position_size)
            .ok_or(ValidationError::Overflow)?;
        let position_loss = percent_of(position_size, inputs.stop_loss_percent)?;
        let actual_risk = total_fees
            .checked_add(position_loss)
            .ok_or(ValidationError::Overflow)?;
        let expected_profit = percent_of(position_size, inputs.profit_percent)?
            .checked_sub(total_fees)
            .ok_or(ValidationError::Overflow)?;

        Ok(TradeResult {
            position_size: self.round(position_size),
            margin_required: self.round_margin(margin_required, inputs.margin_limit),
            total_fees: self.round(total_fees),
            actual_risk: self.round(actual_risk),
            expected_profit: self.round(expected_profit),
            advisory,
        })
    }

    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.decimal_places, self.rounding.strategy())
    }

    /// Rounds the margin without letting it cross the limit.
    fn round_margin(&self, margin: Decimal, limit: Decimal) -> Decimal {
        let rounded = self.round(margin);
        if rounded > limit {
            margin.round_dp_with_strategy(self.decimal_places, RoundingStrategy::ToNegativeInfinity)
        } else {
            rounded
        }
    }
}

/// Calculates a trade with the default calculator settings.
pub fn calculate(inputs: &TradeInputs) -> Result<TradeResult, ValidationError> {
    TradeCalculator::default().calculate(inputs)
}

fn percent_of(value: Decimal, percent: Decimal) -> Result<Decimal, ValidationError> {
    value
        .checked_mul(percent)
        .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(ValidationError::Overflow)
}

fn check_domain(inputs: &TradeInputs) -> Result<(), ValidationError> {
    let out_of_range = |field: InputField, requirement: &'static str| -> Result<(), ValidationError> {
        Err(ValidationError::OutOfRange {
            field,
            requirement,
            value: inputs.get(field),
        })
    };

    if inputs.max_risk < Decimal::ZERO {
        return out_of_range(InputField::MaxRisk, "zero or greater");
    }
    if inputs.stop_loss_percent < Decimal::ZERO {
        return out_of_range(InputField::StopLossPercent, "zero or greater");
    }
    if inputs.leverage <= Decimal::ZERO {
        return out_of_range(InputField::Leverage, "greater than zero");
    }
    if inputs.margin_limit <= Decimal::ZERO {
        return out_of_range(InputField::MarginLimit, "greater than zero");
    }

    Ok(())
}
