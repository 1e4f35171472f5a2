//! Compound interest solver: given three of principal, annual rate, years
//! and future value, find the fourth.

pub mod error;
pub mod form;
pub mod format;
pub mod solver;
pub mod types;
pub mod validation;

pub use error::{ErrorReport, SolveError};
pub use form::{CalculatorForm, FormStatus};
pub use format::{format_result, normalize_input, round_result};
pub use solver::{calculate, solve, solve_inputs, solve_with_policy};
pub use types::*;
pub use validation::validate;

/// Standard result type for all solver operations
pub type SolveResult<T> = Result<T, SolveError>;
