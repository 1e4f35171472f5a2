use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SolveError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Percentages only exist at the
/// input/output boundary.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// One of the four quantities of `FV = P(1+r)^t`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Principal,
    Rate,
    Years,
    #[default]
    #[serde(alias = "future_value", alias = "future-value")]
    FutureValue,
}

impl Field {
    /// Canonical order: the order in which inputs are validated.
    pub const ALL: [Field; 4] = [
        Field::Principal,
        Field::Rate,
        Field::Years,
        Field::FutureValue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Principal => "principal",
            Field::Rate => "rate",
            Field::Years => "years",
            Field::FutureValue => "futureValue",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Field::Principal => "Starting Principal",
            Field::Rate => "Interest Rate",
            Field::Years => "Years to Grow",
            Field::FutureValue => "Future Value",
        }
    }

    /// Decimal places used when showing a solved value of this field.
    pub fn result_dp(self) -> u32 {
        match self {
            Field::Principal | Field::FutureValue => 0,
            Field::Rate => 2,
            Field::Years => 1,
        }
    }

    /// Decimal places used when tidying a typed-in value of this field.
    pub fn input_dp(self) -> u32 {
        match self {
            Field::Principal | Field::FutureValue | Field::Rate => 2,
            Field::Years => 1,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "principal" => Ok(Field::Principal),
            "rate" => Ok(Field::Rate),
            "years" => Ok(Field::Years),
            "futurevalue" => Ok(Field::FutureValue),
            _ => Err(SolveError::UnknownTarget(s.to_string())),
        }
    }
}

/// Raw, unvalidated values as typed into the form. Any of them may be
/// missing; the target's own value is ignored by the solver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputs {
    #[serde(default, deserialize_with = "raw_value", skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
    #[serde(default, deserialize_with = "raw_value", skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    #[serde(default, deserialize_with = "raw_value", skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
    #[serde(
        default,
        alias = "future_value",
        deserialize_with = "raw_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub future_value: Option<String>,
}

impl RawInputs {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Principal => self.principal.as_deref(),
            Field::Rate => self.rate.as_deref(),
            Field::Years => self.years.as_deref(),
            Field::FutureValue => self.future_value.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            Field::Principal => self.principal = value,
            Field::Rate => self.rate = value,
            Field::Years => self.years = value,
            Field::FutureValue => self.future_value = value,
        }
    }

    /// Builder-style `set`.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Number(Decimal),
}

/// Accept either a string or a bare number for a raw input value.
fn raw_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<RawValue> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        RawValue::Text(s) => s,
        RawValue::Number(n) => n.normalize().to_string(),
    }))
}

/// Validated knowns for one solve attempt. The target is `None`; every other
/// field is populated. `rate` is in decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInputs {
    pub target: Field,
    pub principal: Option<Money>,
    pub rate: Option<Rate>,
    pub years: Option<Years>,
    pub future_value: Option<Money>,
}

impl CalculationInputs {
    pub fn get(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::Principal => self.principal,
            Field::Rate => self.rate,
            Field::Years => self.years,
            Field::FutureValue => self.future_value,
        }
    }
}

/// Tunable validation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverPolicy {
    /// Upper bound on a known annual rate, in percent. `None` disables the
    /// check.
    #[serde(default = "default_max_rate_percent", alias = "max_rate_percent")]
    pub max_rate_percent: Option<Decimal>,
}

pub const DEFAULT_MAX_RATE_PERCENT: Decimal = dec!(100);

fn default_max_rate_percent() -> Option<Decimal> {
    Some(DEFAULT_MAX_RATE_PERCENT)
}

impl Default for SolverPolicy {
    fn default() -> Self {
        Self {
            max_rate_percent: default_max_rate_percent(),
        }
    }
}

impl SolverPolicy {
    pub fn uncapped() -> Self {
        Self {
            max_rate_percent: None,
        }
    }
}

/// A complete solve request as a front end submits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Field identifier to solve for; parsed with [`Field::from_str`].
    pub target: String,
    #[serde(flatten)]
    pub inputs: RawInputs,
    #[serde(default)]
    pub policy: SolverPolicy,
}

/// Result of a successful solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOutput {
    pub target: Field,
    /// Unrounded solution; percent when the target is the rate.
    pub value: Decimal,
    /// `value` rounded for display.
    pub rounded: Decimal,
    pub display: String,
    pub inputs: CalculationInputs,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
