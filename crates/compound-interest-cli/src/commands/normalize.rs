use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use compound_interest_core::{normalize_input, Field};

/// Arguments for tidying a typed-in value
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct NormalizeArgs {
    /// Field the value belongs to: principal, rate, years or futureValue
    #[arg(long)]
    pub field: String,

    /// Raw value as typed
    #[arg(long)]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct NormalizeOutput {
    field: Field,
    input: String,
    normalized: String,
    changed: bool,
}

pub fn run_normalize(args: NormalizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let field: Field = args.field.parse()?;
    let normalized = normalize_input(field, &args.value);
    let output = NormalizeOutput {
        field,
        changed: normalized.as_deref().is_some_and(|n| n != args.value),
        normalized: normalized.unwrap_or_else(|| args.value.clone()),
        input: args.value,
    };
    Ok(serde_json::to_value(output)?)
}

#[derive(Debug, Serialize)]
struct FieldInfo {
    field: Field,
    display_name: &'static str,
    result_decimals: u32,
    input_decimals: u32,
}

pub fn run_fields() -> Result<Value, Box<dyn std::error::Error>> {
    let fields: Vec<FieldInfo> = Field::ALL
        .iter()
        .map(|&field| FieldInfo {
            field,
            display_name: field.display_name(),
            result_decimals: field.result_dp(),
            input_decimals: field.input_dp(),
        })
        .collect();
    Ok(serde_json::to_value(fields)?)
}
