//! Closed-form inversion of `FV = P(1+r)^t` for whichever quantity is
//! missing.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::error::SolveError;
use crate::format::{format_result, round_result};
use crate::types::{
    with_metadata, CalculationInputs, ComputationOutput, Field, RawInputs, SolveOutput,
    SolveRequest, SolverPolicy,
};
use crate::validation::validate;
use crate::SolveResult;

/// Solve for `target` from raw form values under the default policy.
pub fn solve(target: Field, knowns: &RawInputs) -> SolveResult<Decimal> {
    solve_with_policy(target, knowns, &SolverPolicy::default())
}

pub fn solve_with_policy(
    target: Field,
    knowns: &RawInputs,
    policy: &SolverPolicy,
) -> SolveResult<Decimal> {
    let inputs = validate(target, knowns, policy)?;
    solve_inputs(&inputs)
}

/// Apply the formula for `inputs.target` to already validated knowns. The
/// rate is read and, when solved for, reported as a percentage.
pub fn solve_inputs(inputs: &CalculationInputs) -> SolveResult<Decimal> {
    let known = |field: Field| inputs.get(field).ok_or(SolveError::InvalidInput(field));

    let result = match inputs.target {
        Field::FutureValue => {
            let growth = growth_factor(known(Field::Rate)?, known(Field::Years)?)?;
            known(Field::Principal)?.checked_mul(growth)
        }
        Field::Principal => {
            let growth = growth_factor(known(Field::Rate)?, known(Field::Years)?)?;
            known(Field::FutureValue)?.checked_div(growth)
        }
        Field::Rate => {
            let principal = known(Field::Principal)?;
            let future_value = known(Field::FutureValue)?;
            let years = known(Field::Years)?;
            future_value
                .checked_div(principal)
                .zip(Decimal::ONE.checked_div(years))
                .and_then(|(ratio, inv_years)| ratio.checked_powd(inv_years))
                .and_then(|g| (g - Decimal::ONE).checked_mul(dec!(100)))
        }
        Field::Years => {
            let principal = known(Field::Principal)?;
            let future_value = known(Field::FutureValue)?;
            let rate = known(Field::Rate)?;
            if rate <= Decimal::ZERO {
                return Err(SolveError::NonPositiveRate);
            }
            future_value
                .checked_div(principal)
                .and_then(|ratio| ratio.checked_ln())
                .zip(Decimal::ONE.checked_add(rate).and_then(|base| base.checked_ln()))
                .and_then(|(num, den)| num.checked_div(den))
        }
    };

    match result {
        Some(value) if value >= Decimal::ZERO => Ok(value),
        _ => Err(SolveError::InvalidResult),
    }
}

/// (1 + r)^t, or `InvalidResult` when it cannot be represented.
fn growth_factor(rate: Decimal, years: Decimal) -> SolveResult<Decimal> {
    Decimal::ONE
        .checked_add(rate)
        .and_then(|base| base.checked_powd(years))
        .filter(|g| !g.is_zero())
        .ok_or(SolveError::InvalidResult)
}

/// Run a full request: parse the target, validate, solve and wrap the
/// answer in the standard computation envelope.
pub fn calculate(request: &SolveRequest) -> SolveResult<ComputationOutput<SolveOutput>> {
    let start = Instant::now();
    let target: Field = request.target.parse()?;

    let mut warnings: Vec<String> = Vec::new();
    if let Some(stale) = request.inputs.get(target).filter(|s| !s.trim().is_empty()) {
        warnings.push(format!(
            "{} value '{}' ignored: it is the field being solved for",
            target.display_name(),
            stale.trim()
        ));
    }

    let outcome = validate(target, &request.inputs, &request.policy)
        .and_then(|inputs| solve_inputs(&inputs).map(|value| (inputs, value)));

    let (inputs, value) = match outcome {
        Ok(ok) => ok,
        Err(e) => {
            tracing::debug!(target_field = %target, error = e.code(), "solve rejected");
            return Err(e);
        }
    };
    tracing::debug!(target_field = %target, %value, "solve succeeded");

    if target == Field::Rate {
        if let Some(cap) = request.policy.max_rate_percent {
            if value > cap {
                warnings.push(format!(
                    "Solved rate {}% exceeds the {}% cap applied to entered rates",
                    format_result(Field::Rate, value),
                    cap
                ));
            }
        }
    }

    let output = SolveOutput {
        target,
        value,
        rounded: round_result(target, value),
        display: format_result(target, value),
        inputs,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology(target),
        request,
        warnings,
        elapsed,
        output,
    ))
}

fn methodology(target: Field) -> &'static str {
    match target {
        Field::FutureValue => "Compound growth: FV = P x (1 + r)^t",
        Field::Principal => "Present value: P = FV / (1 + r)^t",
        Field::Rate => "Implied annual rate: r = (FV / P)^(1/t) - 1",
        Field::Years => "Time to grow: t = ln(FV / P) / ln(1 + r)",
    }
}
