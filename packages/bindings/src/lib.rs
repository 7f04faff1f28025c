use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use finproj_core::amortization::{self, LoanParameters, MonthlyPaymentEntry};
use finproj_core::growth::{self, GrowthParameters};
use finproj_core::scenarios::{self, ScenarioSet};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn to_json(value: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct MonthlyPaymentOutput {
    monthly_payment: rust_decimal::Decimal,
}

/// Only the three rate inputs of `LoanParameters` are read.
#[napi]
pub fn derive_monthly_payment(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    to_json(&MonthlyPaymentOutput {
        monthly_payment: amortization::derive_monthly_payment(
            input.principal,
            input.annual_interest_rate_percent,
            input.initial_amortization_rate_percent,
        ),
    })
}

#[napi]
pub fn generate_amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    to_json(&amortization::generate_schedule(&input))
}

/// Takes the JSON array produced by `generate_amortization_schedule`.
#[napi]
pub fn aggregate_yearly(schedule_json: String) -> NapiResult<String> {
    let schedule: Vec<MonthlyPaymentEntry> =
        serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    to_json(&amortization::aggregate_yearly(&schedule))
}

#[napi]
pub fn project_loan(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::project_loan(&input).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Savings growth
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_growth_schedule(input_json: String) -> NapiResult<String> {
    let input: GrowthParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    to_json(&growth::generate_growth_schedule(&input))
}

#[napi]
pub fn project_savings(input_json: String) -> NapiResult<String> {
    let input: GrowthParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = growth::project_savings(&input).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_scenarios(input_json: String) -> NapiResult<String> {
    let input: ScenarioSet = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = scenarios::evaluate_scenarios(&input).map_err(to_napi_error)?;
    to_json(&output)
}
