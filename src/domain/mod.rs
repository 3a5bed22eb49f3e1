//! Domain models for trade sizing.

mod fees;
mod inputs;
mod trade;

pub use fees::{DEFAULT_FEE_PERCENT_PER_SIDE, FeeSchedule};
pub use inputs::{InputField, RawTradeInputs, TradeInputs};
pub use trade::{MARGIN_ADVISORY_MESSAGE, MarginAdvisory, TradeResult};
