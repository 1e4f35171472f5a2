use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use compound_interest_core::{calculate, Field, RawInputs, SolveRequest, SolverPolicy};

use crate::input;

/// Arguments for solving the compound interest equation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SolveArgs {
    /// Field to solve for: principal, rate, years or futureValue
    #[arg(long, default_value = "futureValue")]
    pub target: String,

    /// Starting principal
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long)]
    pub rate: Option<String>,

    /// Years to grow
    #[arg(long)]
    pub years: Option<String>,

    /// Future value
    #[arg(long)]
    pub future_value: Option<String>,

    /// Largest accepted annual rate in percent
    #[arg(long, conflicts_with = "no_rate_cap")]
    pub max_rate: Option<Decimal>,

    /// Accept any non-negative annual rate
    #[arg(long)]
    pub no_rate_cap: bool,

    /// Path to a JSON or YAML request (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl SolveArgs {
    fn raw_inputs(&self) -> RawInputs {
        let mut raw = RawInputs::default();
        let flags = [
            (Field::Principal, &self.principal),
            (Field::Rate, &self.rate),
            (Field::Years, &self.years),
            (Field::FutureValue, &self.future_value),
        ];
        for (field, value) in flags {
            if let Some(v) = value {
                raw.set(field, v.as_str());
            }
        }
        raw
    }

    fn has_value_flags(&self) -> bool {
        self.principal.is_some()
            || self.rate.is_some()
            || self.years.is_some()
            || self.future_value.is_some()
    }

    /// Command-line policy flags, if any were given.
    fn policy_override(&self) -> Option<SolverPolicy> {
        if self.no_rate_cap {
            Some(SolverPolicy::uncapped())
        } else {
            self.max_rate.map(|cap| SolverPolicy {
                max_rate_percent: Some(cap),
            })
        }
    }
}

pub fn build_request(args: &SolveArgs) -> Result<SolveRequest, Box<dyn std::error::Error>> {
    let mut request: SolveRequest = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(piped) = stdin_request(args)? {
        piped
    } else {
        SolveRequest {
            target: args.target.clone(),
            inputs: args.raw_inputs(),
            policy: SolverPolicy::default(),
        }
    };

    if let Some(policy) = args.policy_override() {
        request.policy = policy;
    }
    Ok(request)
}

/// Only look at stdin when no value flags were passed.
fn stdin_request(args: &SolveArgs) -> Result<Option<SolveRequest>, Box<dyn std::error::Error>> {
    if args.has_value_flags() {
        return Ok(None);
    }
    input::stdin::read_piped()
}

pub fn run_solve(args: SolveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(&args)?;
    tracing::info!(target_field = %request.target, "solving");
    let result = calculate(&request)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args() -> SolveArgs {
        SolveArgs {
            target: "rate".into(),
            principal: Some("1000".into()),
            rate: None,
            years: Some("10".into()),
            future_value: Some("1628.89".into()),
            max_rate: None,
            no_rate_cap: false,
            input: None,
        }
    }

    #[test]
    fn test_flags_become_raw_inputs() {
        let request = build_request(&args()).unwrap();
        assert_eq!(request.target, "rate");
        assert_eq!(request.inputs.get(Field::Principal), Some("1000"));
        assert_eq!(request.inputs.get(Field::Rate), None);
        assert_eq!(request.inputs.get(Field::FutureValue), Some("1628.89"));
        assert_eq!(request.policy, SolverPolicy::default());
    }

    #[test]
    fn test_policy_flags_override_default() {
        let mut a = args();
        a.max_rate = Some(dec!(250));
        let request = build_request(&a).unwrap();
        assert_eq!(request.policy.max_rate_percent, Some(dec!(250)));

        let mut a = args();
        a.no_rate_cap = true;
        assert_eq!(build_request(&a).unwrap().policy, SolverPolicy::uncapped());
    }

    #[test]
    fn test_run_solve_outputs_envelope() {
        let value = run_solve(args()).unwrap();
        assert_eq!(value["result"]["target"], "rate");
        assert_eq!(value["result"]["display"], "5.00");
    }
}
