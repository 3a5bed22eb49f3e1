//! Trading fee structures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Default fee charged on each side of a trade, in percent of position size.
pub const DEFAULT_FEE_PERCENT_PER_SIDE: Decimal = dec!(0.04);

/// FeeSchedule represents the taker fee paid on entry and again on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fee per side in percent units (e.g., 0.04 for 0.04%).
    pub percent_per_side: Decimal,
}

impl FeeSchedule {
    /// Creates a new FeeSchedule instance.
    pub fn new(percent_per_side: Decimal) -> Self {
        Self { percent_per_side }
    }

    /// Combined entry + exit fee in percent units.
    pub fn round_trip_percent(&self) -> Decimal {
        Decimal::TWO * self.percent_per_side
    }

    /// Round-trip fee in currency units for the given notional size.
    /// Returns None on overflow.
    pub fn round_trip_fee(&self, position_size: Decimal) -> Option<Decimal> {
        self.round_trip_percent()
            .checked_mul(position_size)?
            .checked_div(Decimal::ONE_HUNDRED)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_FEE_PERCENT_PER_SIDE)
    }
}
