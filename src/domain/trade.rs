//! Calculated trade metrics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message attached to every margin advisory.
pub const MARGIN_ADVISORY_MESSAGE: &str = "position size adjusted due to margin limit";

/// MarginAdvisory reports that the margin limit reshaped the trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginAdvisory {
    /// Margin the unconstrained position would have needed (rounded).
    /// None when it is unbounded (zero leverage).
    pub requested_margin: Option<Decimal>,
    /// The cap that was applied.
    pub margin_limit: Decimal,
}

impl MarginAdvisory {
    pub fn message(&self) -> &'static str {
        MARGIN_ADVISORY_MESSAGE
    }
}

impl fmt::Display for MarginAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.requested_margin {
            Some(requested) => write!(
                f,
                "{} (requested {}, limit {})",
                MARGIN_ADVISORY_MESSAGE, requested, self.margin_limit
            ),
            None => write!(
                f,
                "{} (requested unbounded, limit {})",
                MARGIN_ADVISORY_MESSAGE, self.margin_limit
            ),
        }
    }
}

/// TradeResult holds the derived metrics for a single trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeResult {
    /// Notional size of the trade.
    pub position_size: Decimal,
    /// Collateral consumed, never above the margin limit.
    pub margin_required: Decimal,
    /// Round-trip fee in currency.
    pub total_fees: Decimal,
    /// Fees plus loss at the stop.
    pub actual_risk: Decimal,
    /// Profit at target minus fees.
    pub expected_profit: Decimal,
    /// Set when the margin limit was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<MarginAdvisory>,
}

impl TradeResult {
    /// Returns true if the position was shrunk to fit the margin limit.
    pub fn is_adjusted(&self) -> bool {
        self.advisory.is_some()
    }

    /// Returns true if the expected profit exceeds the actual risk.
    pub fn is_favorable(&self) -> bool {
        self.expected_profit > self.actual_risk
    }

    /// Expected profit divided by actual risk, if risk is non-zero.
    pub fn reward_to_risk(&self) -> Option<Decimal> {
        if self.actual_risk.is_zero() {
            return None;
        }
        self.expected_profit.checked_div(self.actual_risk)
    }
}
