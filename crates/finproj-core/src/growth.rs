use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinProjError;
use crate::rounding::{checked_round2_add, checked_round2_mul, round2};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::FinProjResult;

const ROOT_TOLERANCE: Decimal = dec!(0.000000000000000000000000001);
const MAX_ROOT_ITERATIONS: u32 = 200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a recurring-contribution savings plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthParameters {
    #[serde(default)]
    pub initial_balance: Money,
    pub monthly_contribution: Money,
    /// Effective annual return, e.g. 7 for 7% per year.
    pub annual_return_rate_percent: Percent,
    pub years: i32,
}

/// A single year of the savings projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyGrowthEntry {
    pub year: u32,
    pub start_balance: Money,
    pub invested_this_year: Money,
    pub interest_earned_this_year: Money,
    pub end_balance: Money,
    pub cumulative_invested: Money,
    pub cumulative_interest: Money,
}

/// Top-level output from `project_savings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub monthly_return_rate: Rate,
    pub summary: SavingsSummary,
    pub yearly_schedule: Vec<YearlyGrowthEntry>,
}

/// End-of-plan totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsSummary {
    pub final_balance: Money,
    pub total_invested: Money,
    pub total_interest: Money,
    pub interest_share_percent: Percent,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Geometric monthly rate: `(1 + annual%/100)^(1/12) - 1`.
///
/// Twelve months compounded at this rate reproduce the annual rate. A
/// non-positive base (annual rate at or below -100%) gives -1.
pub fn monthly_return_rate(annual_return_rate_percent: Percent) -> Rate {
    if annual_return_rate_percent.is_zero() {
        return Decimal::ZERO;
    }
    twelfth_root(Decimal::ONE + annual_return_rate_percent / dec!(100)) - Decimal::ONE
}

/// x^(1/12) as the cube root of the double square root.
fn twelfth_root(x: Decimal) -> Decimal {
    if x <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    x.sqrt()
        .and_then(|r| r.sqrt())
        .map(cube_root)
        .unwrap_or(Decimal::ZERO)
}

/// Newton-Raphson cube root for s > 0.
///
/// The start `1 + (s - 1) / 3` lies above the root, so iterates fall
/// monotonically and never cross zero.
fn cube_root(s: Decimal) -> Decimal {
    let three = dec!(3);
    let mut y = Decimal::ONE + (s - Decimal::ONE) / three;
    for _ in 0..MAX_ROOT_ITERATIONS {
        let next = (dec!(2) * y + s / (y * y)) / three;
        if (next - y).abs() < ROOT_TOLERANCE {
            return next;
        }
        y = next;
    }
    y
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Simulate the plan month by month and report one entry per year.
///
/// Each month earns interest on the running balance and then receives the
/// contribution; every step is rounded to the cent. `years <= 0` yields an
/// empty schedule. A plan whose balance outgrows the decimal range stops
/// after the last year that still fits.
pub fn generate_growth_schedule(params: &GrowthParameters) -> Vec<YearlyGrowthEntry> {
    if params.years <= 0 {
        return Vec::new();
    }

    let monthly_rate = monthly_return_rate(params.annual_return_rate_percent);
    let contribution = round2(params.monthly_contribution);

    let mut balance = round2(params.initial_balance);
    let mut cumulative_invested = round2(params.initial_balance);
    let mut cumulative_interest = Decimal::ZERO;
    let mut schedule = Vec::new();

    for year in 1..=params.years as u32 {
        let start_balance = balance;

        let Some(entry) = compound_year(start_balance, monthly_rate, contribution).and_then(
            |(interest_earned, invested, end_balance)| {
                Some(YearlyGrowthEntry {
                    year,
                    start_balance,
                    invested_this_year: invested,
                    interest_earned_this_year: interest_earned,
                    end_balance,
                    cumulative_invested: checked_round2_add(cumulative_invested, invested)?,
                    cumulative_interest: checked_round2_add(cumulative_interest, interest_earned)?,
                })
            },
        ) else {
            tracing::warn!(
                year,
                start_balance = %start_balance,
                "balance leaves the decimal range; schedule stops"
            );
            break;
        };

        balance = entry.end_balance;
        cumulative_invested = entry.cumulative_invested;
        cumulative_interest = entry.cumulative_interest;
        schedule.push(entry);
    }

    schedule
}

/// Twelve months of interest then contribution.
///
/// Returns `(interest_earned, invested, end_balance)`, or `None` as soon as
/// a step overflows.
fn compound_year(
    start_balance: Money,
    monthly_rate: Rate,
    contribution: Money,
) -> Option<(Money, Money, Money)> {
    let mut balance = start_balance;
    let mut interest_earned = Decimal::ZERO;
    let mut invested = Decimal::ZERO;

    for _ in 0..12 {
        let interest = checked_round2_mul(balance, monthly_rate)?;
        interest_earned = checked_round2_add(interest_earned, interest)?;
        balance = checked_round2_add(balance, interest)?;

        balance = checked_round2_add(balance, contribution)?;
        invested = checked_round2_add(invested, contribution)?;
    }

    Some((interest_earned, invested, balance))
}

// ---------------------------------------------------------------------------
// Validated projection
// ---------------------------------------------------------------------------

/// Validate the parameters, run the plan, and summarise the final year.
pub fn project_savings(
    params: &GrowthParameters,
) -> FinProjResult<ComputationOutput<SavingsProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(params)?;

    if params.annual_return_rate_percent < Decimal::ZERO {
        warnings.push(format!(
            "Negative annual return ({}%) shrinks the balance over time",
            params.annual_return_rate_percent
        ));
    }

    let monthly_rate = monthly_return_rate(params.annual_return_rate_percent);
    let yearly_schedule = generate_growth_schedule(params);
    if yearly_schedule.len() < params.years as usize {
        return Err(FinProjError::overflow(format!(
            "savings projection: balance exceeds the decimal range after year {} of {}",
            yearly_schedule.len(),
            params.years
        )));
    }

    let summary = match yearly_schedule.last() {
        Some(last) => SavingsSummary {
            final_balance: last.end_balance,
            total_invested: last.cumulative_invested,
            total_interest: last.cumulative_interest,
            interest_share_percent: last
                .cumulative_interest
                .checked_div(last.end_balance)
                .and_then(|share| share.checked_mul(dec!(100)))
                .map(round2)
                .unwrap_or(Decimal::ZERO),
        },
        None => SavingsSummary {
            final_balance: round2(params.initial_balance),
            total_invested: round2(params.initial_balance),
            total_interest: Decimal::ZERO,
            interest_share_percent: Decimal::ZERO,
        },
    };

    tracing::debug!(
        years = params.years,
        final_balance = %summary.final_balance,
        total_interest = %summary.total_interest,
        "savings schedule generated"
    );

    let output = SavingsProjection {
        monthly_return_rate: monthly_rate,
        summary,
        yearly_schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Savings plan with monthly contributions (geometric monthly compounding, cent rounding per step)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(params: &GrowthParameters) -> FinProjResult<()> {
    if params.initial_balance < Decimal::ZERO {
        return Err(FinProjError::invalid(
            "initial_balance",
            "initial balance must be >= 0",
        ));
    }
    if params.monthly_contribution < Decimal::ZERO {
        return Err(FinProjError::invalid(
            "monthly_contribution",
            "monthly contribution must be >= 0",
        ));
    }
    if params.years < 1 {
        return Err(FinProjError::invalid("years", "years must be >= 1"));
    }
    if params.annual_return_rate_percent <= dec!(-100) {
        return Err(FinProjError::invalid(
            "annual_return_rate_percent",
            "annual return must be greater than -100%",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
