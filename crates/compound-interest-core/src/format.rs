use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Field;
use crate::validation::parse_number;

/// Round a solved value to the precision shown for `field`.
pub fn round_result(field: Field, value: Decimal) -> Decimal {
    value.round_dp_with_strategy(field.result_dp(), RoundingStrategy::MidpointAwayFromZero)
}

/// Render a solved value for display: whole currency units, rate to 2 dp,
/// years to 1 dp.
pub fn format_result(field: Field, value: Decimal) -> String {
    fixed(round_result(field, value), field.result_dp())
}

/// Tidy a typed-in value when the field loses focus. Only parseable,
/// non-negative values are rewritten.
pub fn normalize_input(field: Field, raw: &str) -> Option<String> {
    let value = parse_number(raw)?;
    if value < Decimal::ZERO {
        return None;
    }
    let dp = field.input_dp();
    Some(fixed(
        value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        dp,
    ))
}

/// Render with exactly `dp` decimal places, padding with zeros.
fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value)
}
