//! Calculation error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::InputField;

/// Inputs that cannot produce a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("all inputs must be valid numbers: {field} is {value:?}")]
    InvalidNumber { field: InputField, value: String },
    #[error("{field} must be {requirement}, got {value}")]
    OutOfRange {
        field: InputField,
        requirement: &'static str,
        value: Decimal,
    },
    #[error("{field} is too large to calculate with: {value}")]
    TooLarge { field: InputField, value: String },
    #[error("calculation overflowed the decimal range")]
    Overflow,
}

impl ValidationError {
    /// Returns the offending input, if the error is tied to one.
    pub fn field(&self) -> Option<InputField> {
        match self {
            ValidationError::InvalidNumber { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLarge { field, .. } => Some(*field),
            ValidationError::Overflow => None,
        }
    }
}
