//! Position sizing and risk metrics for a single leveraged trade.
//!
//! Given a risk budget, profit target, stop loss, leverage and margin cap,
//! [`TradeCalculator`] derives the position size, margin required, round-trip
//! fees, actual risk and expected profit.

pub mod calculator;
pub mod config;
pub mod domain;
pub mod report;

pub use calculator::{Rounding, TradeCalculator, ValidationError, calculate};
pub use domain::{
    FeeSchedule, InputField, MarginAdvisory, RawTradeInputs, TradeInputs, TradeResult,
};
