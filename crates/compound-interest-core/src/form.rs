//! Presentation-free model of the calculator form: which field is being
//! solved for, what the user has typed, and the outcome of the last submit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{format_result, normalize_input};
use crate::solver::solve_with_policy;
use crate::types::{Field, RawInputs, SolverPolicy};
use crate::SolveResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Idle,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorForm {
    target: Field,
    values: RawInputs,
    policy: SolverPolicy,
    status: FormStatus,
}

impl CalculatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SolverPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn target(&self) -> Field {
        self.target
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn values(&self) -> &RawInputs {
        &self.values
    }

    /// Current text of a field; empty when never set.
    pub fn value(&self, field: Field) -> &str {
        self.values.get(field).unwrap_or("")
    }

    /// Switch the solved-for field. Existing values, including an earlier
    /// result, stay in place.
    pub fn select_target(&mut self, field: Field) {
        self.target = field;
        self.status = FormStatus::Idle;
    }

    /// The target is read-only; every other field accepts input.
    pub fn is_editable(&self, field: Field) -> bool {
        field != self.target
    }

    pub fn set_value(&mut self, field: Field, raw: impl Into<String>) {
        self.values.set(field, raw);
        self.status = FormStatus::Idle;
    }

    /// Tidy the field's text if it holds a valid non-negative number.
    pub fn blur(&mut self, field: Field) {
        if let Some(tidy) = normalize_input(field, self.value(field)) {
            self.values.set(field, tidy);
        }
    }

    /// Solve for the target. On success the formatted answer replaces the
    /// target's text; on failure every value is left as it was.
    pub fn submit(&mut self) -> SolveResult<Decimal> {
        match solve_with_policy(self.target, &self.values, &self.policy) {
            Ok(value) => {
                self.values.set(self.target, format_result(self.target, value));
                self.status = FormStatus::Success;
                Ok(value)
            }
            Err(e) => {
                self.status = FormStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Same as [`submit`](Self::submit) but first switches to the target
    /// named by `raw_target`.
    pub fn submit_for(&mut self, raw_target: &str) -> SolveResult<Decimal> {
        match raw_target.parse::<Field>() {
            Ok(field) => {
                self.select_target(field);
                self.submit()
            }
            Err(e) => {
                self.status = FormStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Empty every field and drop any status message.
    pub fn clear(&mut self) {
        self.values = RawInputs::default();
        self.status = FormStatus::Idle;
    }
}
