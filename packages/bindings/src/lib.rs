use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use compound_interest_core::{Field, SolveRequest};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_field(field: &str) -> NapiResult<Field> {
    field.parse::<Field>().map_err(to_napi_error)
}

/// Solve a request such as
/// `{"target": "rate", "principal": "1000", "years": "10", "futureValue": "1628.89"}`.
/// Returns the computation envelope as JSON; solve errors are thrown with
/// their user-facing message.
#[napi]
pub fn solve(request_json: String) -> NapiResult<String> {
    let request: SolveRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let output = compound_interest_core::calculate(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Solve a request and return either the envelope or an error report,
/// never throwing for solve failures.
#[napi]
pub fn try_solve(request_json: String) -> NapiResult<String> {
    let request: SolveRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    match compound_interest_core::calculate(&request) {
        Ok(output) => serde_json::to_string(&output).map_err(to_napi_error),
        Err(e) => serde_json::to_string(&e.report()).map_err(to_napi_error),
    }
}

/// Display string for a solved value, e.g. `formatResult("rate", "4.99999")`
/// gives `"5.00"`.
#[napi]
pub fn format_result(field: String, value: String) -> NapiResult<String> {
    let field = parse_field(&field)?;
    let value = Decimal::from_str(value.trim()).map_err(to_napi_error)?;
    Ok(compound_interest_core::format_result(field, value))
}

/// Tidied form text for a typed-in value, or `null` when it should be left
/// alone.
#[napi]
pub fn normalize_input(field: String, raw: String) -> NapiResult<Option<String>> {
    let field = parse_field(&field)?;
    Ok(compound_interest_core::normalize_input(field, &raw))
}
