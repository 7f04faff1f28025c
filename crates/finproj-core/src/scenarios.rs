//! Side-by-side evaluation of independent loan and savings scenarios.
//!
//! Every scenario is a pure computation over its own parameters, so the
//! batch fans out across the rayon pool with no coordination. Results keep
//! the input order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

use crate::amortization::{self, LoanParameters, LoanProjection};
use crate::error::FinProjError;
use crate::growth::{self, GrowthParameters, SavingsProjection};
use crate::types::{with_metadata, ComputationOutput};
use crate::FinProjResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a scenario computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioKind {
    Loan(LoanParameters),
    Savings(GrowthParameters),
}

/// A named parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(flatten)]
    pub kind: ScenarioKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub scenarios: Vec<Scenario>,
}

/// Projection produced for a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioResult {
    Loan(LoanProjection),
    Savings(SavingsProjection),
}

/// Outcome for one scenario. Exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<ScenarioOutcome>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Evaluate every scenario in parallel.
///
/// The set itself must be non-empty with unique names. A scenario whose
/// parameters fail validation is reported in its outcome and does not
/// abort the rest of the batch.
pub fn evaluate_scenarios(
    set: &ScenarioSet,
) -> FinProjResult<ComputationOutput<ScenarioReport>> {
    let start = Instant::now();

    if set.scenarios.is_empty() {
        return Err(FinProjError::invalid(
            "scenarios",
            "at least one scenario is required",
        ));
    }
    let mut seen = HashSet::new();
    for scenario in &set.scenarios {
        if scenario.name.trim().is_empty() {
            return Err(FinProjError::invalid("name", "scenario name must not be empty"));
        }
        if !seen.insert(scenario.name.as_str()) {
            return Err(FinProjError::invalid(
                "name",
                format!("duplicate scenario name '{}'", scenario.name),
            ));
        }
    }

    let outcomes: Vec<ScenarioOutcome> = set.scenarios.par_iter().map(evaluate_one).collect();

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    let succeeded = outcomes.len() - failed;

    let warnings: Vec<String> = outcomes
        .iter()
        .flat_map(|o| o.warnings.iter().map(move |w| format!("{}: {}", o.name, w)))
        .chain(
            outcomes
                .iter()
                .filter_map(|o| o.error.as_ref().map(|e| format!("{}: {}", o.name, e))),
        )
        .collect();

    tracing::debug!(succeeded, failed, "scenario batch evaluated");

    let report = ScenarioReport {
        succeeded,
        failed,
        outcomes,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Independent loan and savings scenarios evaluated in parallel",
        &serde_json::json!({
            "scenario_count": set.scenarios.len(),
            "names": set.scenarios.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        }),
        warnings,
        elapsed,
        report,
    ))
}

fn evaluate_one(scenario: &Scenario) -> ScenarioOutcome {
    let evaluated = match &scenario.kind {
        ScenarioKind::Loan(params) => amortization::project_loan(params)
            .map(|out| (ScenarioResult::Loan(out.result), out.warnings)),
        ScenarioKind::Savings(params) => growth::project_savings(params)
            .map(|out| (ScenarioResult::Savings(out.result), out.warnings)),
    };

    match evaluated {
        Ok((result, warnings)) => ScenarioOutcome {
            name: scenario.name.clone(),
            result: Some(result),
            error: None,
            warnings,
        },
        Err(e) => {
            tracing::warn!(scenario = %scenario.name, error = %e, "scenario rejected");
            ScenarioOutcome {
                name: scenario.name.clone(),
                result: None,
                error: Some(e.to_string()),
                warnings: Vec::new(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
