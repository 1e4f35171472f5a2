use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::SolveError;
use crate::types::{CalculationInputs, Field, RawInputs, SolverPolicy};
use crate::SolveResult;

/// Parse one raw form value: trimmed, plain or scientific notation.
/// Returns `None` for blank or unparseable text.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    // rust_decimal skips '_' separators, a typed number never contains one
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// A known value must be present, numeric and non-negative.
pub fn parse_known(field: Field, raw: Option<&str>) -> SolveResult<Decimal> {
    match raw.and_then(parse_number) {
        Some(value) if value >= Decimal::ZERO => Ok(value),
        _ => Err(SolveError::InvalidInput(field)),
    }
}

/// Check the three knowns for `target` and convert the rate to decimal form.
///
/// Checks run in a fixed order and the first failure wins: per-field parsing
/// (principal, rate, years, future value), rate cap, years > 0, growth
/// requirement for rate/years targets, and rate > 0 for a years target.
pub fn validate(
    target: Field,
    raw: &RawInputs,
    policy: &SolverPolicy,
) -> SolveResult<CalculationInputs> {
    let mut inputs = CalculationInputs {
        target,
        principal: None,
        rate: None,
        years: None,
        future_value: None,
    };

    for field in Field::ALL {
        if field == target {
            continue;
        }
        let value = parse_known(field, raw.get(field))?;
        match field {
            Field::Principal => inputs.principal = Some(value),
            Field::Rate => inputs.rate = Some(value),
            Field::Years => inputs.years = Some(value),
            Field::FutureValue => inputs.future_value = Some(value),
        }
    }

    if let Some(pct) = inputs.rate {
        if let Some(cap) = policy.max_rate_percent {
            if pct > cap {
                return Err(SolveError::RateTooHigh);
            }
        }
        inputs.rate = Some(pct / dec!(100));
    }

    if let Some(years) = inputs.years {
        if years <= Decimal::ZERO {
            return Err(SolveError::NonPositiveYears);
        }
    }

    if matches!(target, Field::Rate | Field::Years) {
        let grows = match (inputs.future_value, inputs.principal) {
            (Some(fv), Some(p)) => fv > p,
            _ => false,
        };
        if !grows {
            return Err(SolveError::FutureValueNotGreater);
        }
    }

    if target == Field::Years && inputs.rate.map_or(true, |r| r <= Decimal::ZERO) {
        return Err(SolveError::NonPositiveRate);
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(p: &str, r: &str, y: &str, fv: &str) -> RawInputs {
        RawInputs {
            principal: Some(p.into()),
            rate: Some(r.into()),
            years: Some(y.into()),
            future_value: Some(fv.into()),
        }
    }

    #[test]
    fn test_parse_number_variants() {
        assert_eq!(parse_number(" 1000 "), Some(dec!(1000)));
        assert_eq!(parse_number("1.5e3"), Some(dec!(1500)));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("1_000"), None);
        assert_eq!(parse_number("1e_3"), None);
    }

    #[test]
    fn test_digit_separator_is_invalid_input() {
        let err = validate(
            Field::FutureValue,
            &raw("1_000", "5", "10", ""),
            &SolverPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, SolveError::InvalidInput(Field::Principal));
    }

    #[test]
    fn test_validate_converts_rate_to_decimal() {
        let inputs = validate(
            Field::FutureValue,
            &raw("1000", "5", "10", ""),
            &SolverPolicy::default(),
        )
        .unwrap();
        assert_eq!(inputs.rate, Some(dec!(0.05)));
        assert_eq!(inputs.principal, Some(dec!(1000)));
        assert_eq!(inputs.future_value, None);
    }

    #[test]
    fn test_target_value_is_ignored() {
        // A stale or garbage value in the target field must not matter
        let inputs = validate(
            Field::FutureValue,
            &raw("1000", "5", "10", "not a number"),
            &SolverPolicy::default(),
        );
        assert!(inputs.is_ok());
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let err = validate(
            Field::FutureValue,
            &raw("-1", "abc", "10", ""),
            &SolverPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, SolveError::InvalidInput(Field::Principal));
    }

    #[test]
    fn test_missing_known_is_invalid_input() {
        let mut r = raw("1000", "5", "10", "");
        r.years = None;
        let err = validate(Field::FutureValue, &r, &SolverPolicy::default()).unwrap_err();
        assert_eq!(err, SolveError::InvalidInput(Field::Years));
    }

    #[test]
    fn test_rate_cap_checked_before_years() {
        let err = validate(
            Field::FutureValue,
            &raw("1000", "150", "0", ""),
            &SolverPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, SolveError::RateTooHigh);
    }

    #[test]
    fn test_rate_at_cap_is_accepted() {
        let inputs = validate(
            Field::FutureValue,
            &raw("1000", "100", "1", ""),
            &SolverPolicy::default(),
        )
        .unwrap();
        assert_eq!(inputs.rate, Some(Decimal::ONE));
    }

    #[test]
    fn test_zero_years_rejected() {
        let err = validate(
            Field::Principal,
            &raw("", "5", "0", "1000"),
            &SolverPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, SolveError::NonPositiveYears);
    }

    #[test]
    fn test_equal_values_do_not_grow() {
        let err = validate(
            Field::Rate,
            &raw("1000", "", "5", "1000"),
            &SolverPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, SolveError::FutureValueNotGreater);
    }

    #[test]
    fn test_growth_checked_before_rate_sign() {
        let err = validate(
            Field::Years,
            &raw("1000", "0", "", "900"),
            &SolverPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err, SolveError::FutureValueNotGreater);
    }
}
