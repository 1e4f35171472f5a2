use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Field;

/// Every way a solve attempt can fail. Each variant renders the message the
/// user sees; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("Please enter a valid positive number for {}.", .0.display_name())]
    InvalidInput(Field),

    #[error("Interest rate seems too high. Please enter a reasonable annual percentage rate.")]
    RateTooHigh,

    #[error("Years must be greater than 0.")]
    NonPositiveYears,

    #[error("Interest rate must be greater than 0 for time calculations.")]
    NonPositiveRate,

    #[error("Future Value must be greater than Principal for meaningful calculations.")]
    FutureValueNotGreater,

    #[error("Calculation resulted in an invalid value. Please check your inputs.")]
    InvalidResult,

    #[error("Invalid calculation field selected.")]
    UnknownTarget(String),
}

impl SolveError {
    /// Stable machine-readable tag for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::InvalidInput(_) => "invalid_input",
            SolveError::RateTooHigh => "rate_too_high",
            SolveError::NonPositiveYears => "non_positive_years",
            SolveError::NonPositiveRate => "non_positive_rate",
            SolveError::FutureValueNotGreater => "future_value_not_greater",
            SolveError::InvalidResult => "invalid_result",
            SolveError::UnknownTarget(_) => "unknown_target",
        }
    }

    /// The input field the error points at, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            SolveError::InvalidInput(field) => Some(*field),
            SolveError::RateTooHigh | SolveError::NonPositiveRate => Some(Field::Rate),
            SolveError::NonPositiveYears => Some(Field::Years),
            SolveError::FutureValueNotGreater => Some(Field::FutureValue),
            SolveError::InvalidResult | SolveError::UnknownTarget(_) => None,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            field: self.field(),
            message: self.to_string(),
        }
    }
}

/// Serialisable form of a [`SolveError`] for JSON front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    pub message: String,
}

impl From<&SolveError> for ErrorReport {
    fn from(e: &SolveError) -> Self {
        e.report()
    }
}
