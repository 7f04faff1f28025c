use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinProjError;
use crate::rounding::{
    checked_round2_add, checked_round2_mul, checked_round2_sub, round2, round2_add,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::FinProjResult;

/// Hard ceiling on schedule length (100 years of monthly payments).
pub const MAX_PERIODS: u32 = 1200;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an annuity loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    /// Nominal annual interest rate, e.g. 3.5 for 3.5% per year.
    #[serde(alias = "nominal_annual_interest_rate")]
    pub annual_interest_rate_percent: Percent,
    /// Initial amortization (repayment) rate as a yearly percentage of the principal.
    #[serde(alias = "initial_amortization_rate")]
    pub initial_amortization_rate_percent: Percent,
    /// Own funds brought into the purchase. Reported, never amortized.
    #[serde(default)]
    pub equity: Money,
    /// Due date of the first instalment; dates the schedule when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

/// A single month of the repayment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPaymentEntry {
    pub month: u32,
    pub year: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
}

/// Up to twelve consecutive months folded into one schedule year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyPaymentEntry {
    pub year: u32,
    pub months: u32,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
}

/// Top-level output from `project_loan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanProjection {
    pub monthly_payment: Money,
    pub summary: LoanSummary,
    pub yearly_schedule: Vec<YearlyPaymentEntry>,
    pub monthly_schedule: Vec<MonthlyPaymentEntry>,
}

/// Totals over the whole schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummary {
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
    pub number_of_payments: u32,
    pub payoff_years: u32,
    pub payoff_months: u32,
    pub remaining_balance: Money,
    pub fully_amortized: bool,
    pub purchase_price: Money,
    pub equity_ratio_percent: Percent,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Fixed annuity instalment: `round2(principal * (interest% + amortization%) / 100 / 12)`.
///
/// Rounded once; the rounded value is paid every month until the balance is gone.
/// Instalments beyond the decimal range saturate at `Decimal::MAX` / `Decimal::MIN`.
pub fn derive_monthly_payment(
    principal: Money,
    annual_interest_rate_percent: Percent,
    initial_amortization_rate_percent: Percent,
) -> Money {
    let annual_percent =
        annual_interest_rate_percent.saturating_add(initial_amortization_rate_percent);
    let payment = principal
        .checked_mul(annual_percent)
        .map(|yearly| yearly / dec!(100) / dec!(12))
        // Large principals: divide first, at the cost of the last digit
        .or_else(|| (principal / dec!(1200)).checked_mul(annual_percent));

    match payment {
        Some(payment) => round2(payment),
        None if principal.is_sign_negative() != annual_percent.is_sign_negative() => {
            Decimal::MIN
        }
        None => Decimal::MAX,
    }
}

/// Monthly multiplier `annual% / 100 / 12`. A ratio, so never rounded.
pub fn monthly_interest_rate(annual_interest_rate_percent: Percent) -> Rate {
    annual_interest_rate_percent / dec!(100) / dec!(12)
}

/// Build the month-by-month repayment schedule.
///
/// Stops once the balance reaches zero or after [`MAX_PERIODS`] months,
/// whichever comes first. A loan whose instalment never outgrows the
/// interest is returned truncated at the ceiling with its balance still
/// open. A negative amortization rate grows the balance; such a schedule
/// ends early, after the last month whose amounts fit the decimal range.
/// `principal <= 0` yields an empty schedule.
pub fn generate_schedule(params: &LoanParameters) -> Vec<MonthlyPaymentEntry> {
    let fixed_payment = derive_monthly_payment(
        params.principal,
        params.annual_interest_rate_percent,
        params.initial_amortization_rate_percent,
    );
    let monthly_rate = monthly_interest_rate(params.annual_interest_rate_percent);

    let mut remaining = round2(params.principal);
    let mut schedule = Vec::new();
    let mut month: u32 = 0;

    while remaining > Decimal::ZERO && month < MAX_PERIODS {
        month += 1;

        let Some(entry) = repay_month(remaining, monthly_rate, fixed_payment) else {
            tracing::warn!(
                month,
                remaining = %remaining,
                "balance leaves the decimal range; schedule stops"
            );
            break;
        };
        remaining = entry.remaining_balance;

        schedule.push(MonthlyPaymentEntry {
            month,
            year: year_of_month(month),
            payment_date: params
                .first_payment_date
                .and_then(|first| first.checked_add_months(Months::new(month - 1))),
            ..entry
        });
    }

    schedule
}

/// One instalment against `remaining`, or `None` if any amount overflows.
fn repay_month(
    remaining: Money,
    monthly_rate: Rate,
    fixed_payment: Money,
) -> Option<MonthlyPaymentEntry> {
    let interest_portion = checked_round2_mul(remaining, monthly_rate)?;
    let mut principal_portion = checked_round2_sub(fixed_payment, interest_portion)?;
    // Final instalment pays off exactly what is left
    if remaining < principal_portion {
        principal_portion = remaining;
    }
    let total_payment = checked_round2_add(interest_portion, principal_portion)?;
    let remaining_balance = checked_round2_sub(remaining, principal_portion)?.max(Decimal::ZERO);

    Some(MonthlyPaymentEntry {
        month: 0,
        year: 0,
        payment_date: None,
        interest_portion,
        principal_portion,
        total_payment,
        remaining_balance,
    })
}

/// Fold a monthly schedule into schedule years.
///
/// A year closes on every twelfth month and at the last entry, so a short
/// final year is kept. Sums are rounded after each addition.
pub fn aggregate_yearly(schedule: &[MonthlyPaymentEntry]) -> Vec<YearlyPaymentEntry> {
    let mut years = Vec::with_capacity(schedule.len() / 12 + 1);
    let mut interest = Decimal::ZERO;
    let mut principal = Decimal::ZERO;
    let mut total = Decimal::ZERO;
    let mut months: u32 = 0;

    for (idx, entry) in schedule.iter().enumerate() {
        interest = round2_add(interest, entry.interest_portion);
        principal = round2_add(principal, entry.principal_portion);
        total = round2_add(total, entry.total_payment);
        months += 1;

        if entry.month % 12 == 0 || idx == schedule.len() - 1 {
            years.push(YearlyPaymentEntry {
                year: entry.year,
                months,
                interest_portion: interest,
                principal_portion: principal,
                total_payment: total,
                remaining_balance: entry.remaining_balance,
            });
            interest = Decimal::ZERO;
            principal = Decimal::ZERO;
            total = Decimal::ZERO;
            months = 0;
        }
    }

    years
}

fn year_of_month(month: u32) -> u32 {
    month.div_ceil(12)
}

// ---------------------------------------------------------------------------
// Validated projection
// ---------------------------------------------------------------------------

/// Validate the parameters, build both schedules, and summarise them.
///
/// Loans that do not pay off inside [`MAX_PERIODS`] are still returned,
/// truncated, with `fully_amortized = false` and a warning. Amounts beyond
/// the decimal range fail with [`FinProjError::NumericOverflow`].
pub fn project_loan(params: &LoanParameters) -> FinProjResult<ComputationOutput<LoanProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(params)?;

    let monthly_payment = derive_monthly_payment(
        params.principal,
        params.annual_interest_rate_percent,
        params.initial_amortization_rate_percent,
    );
    let monthly_schedule = generate_schedule(params);
    let summary = summarise(params, &monthly_schedule)?;
    if !summary.fully_amortized && summary.number_of_payments < MAX_PERIODS {
        return Err(FinProjError::overflow(format!(
            "loan schedule: amounts exceed the decimal range after month {}",
            summary.number_of_payments
        )));
    }
    let yearly_schedule = aggregate_yearly(&monthly_schedule);

    if !summary.fully_amortized {
        let first_interest = checked_round2_mul(
            round2(params.principal),
            monthly_interest_rate(params.annual_interest_rate_percent),
        );
        let message = if first_interest.is_some_and(|interest| monthly_payment <= interest) {
            format!(
                "Monthly payment {monthly_payment} does not exceed first-month interest \
                 {}; the loan never amortizes (schedule stops after {MAX_PERIODS} months)",
                first_interest.unwrap_or_default()
            )
        } else {
            format!(
                "Loan is not repaid within {MAX_PERIODS} months; remaining balance {}",
                summary.remaining_balance
            )
        };
        tracing::warn!(
            principal = %params.principal,
            remaining = %summary.remaining_balance,
            "{message}"
        );
        warnings.push(message);
    }

    tracing::debug!(
        months = summary.number_of_payments,
        monthly_payment = %monthly_payment,
        total_interest = %summary.total_interest,
        "loan schedule generated"
    );

    let output = LoanProjection {
        monthly_payment,
        summary,
        yearly_schedule,
        monthly_schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity loan amortization (fixed monthly instalment, cent rounding per step)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(params: &LoanParameters) -> FinProjResult<()> {
    if params.principal <= Decimal::ZERO {
        return Err(FinProjError::invalid("principal", "principal must be > 0"));
    }
    if params.annual_interest_rate_percent < Decimal::ZERO {
        return Err(FinProjError::invalid(
            "annual_interest_rate_percent",
            "interest rate must be >= 0",
        ));
    }
    if params.initial_amortization_rate_percent < Decimal::ZERO {
        return Err(FinProjError::invalid(
            "initial_amortization_rate_percent",
            "amortization rate must be >= 0",
        ));
    }
    if params.equity < Decimal::ZERO {
        return Err(FinProjError::invalid("equity", "equity must be >= 0"));
    }
    Ok(())
}

fn summarise(
    params: &LoanParameters,
    schedule: &[MonthlyPaymentEntry],
) -> FinProjResult<LoanSummary> {
    let overflow = || FinProjError::overflow("loan summary: totals exceed the decimal range");

    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    for entry in schedule {
        total_interest =
            checked_round2_add(total_interest, entry.interest_portion).ok_or_else(overflow)?;
        total_principal =
            checked_round2_add(total_principal, entry.principal_portion).ok_or_else(overflow)?;
        total_paid = checked_round2_add(total_paid, entry.total_payment).ok_or_else(overflow)?;
    }

    let number_of_payments = schedule.len() as u32;
    let remaining_balance = schedule
        .last()
        .map(|e| e.remaining_balance)
        .unwrap_or_else(|| round2(params.principal));

    let purchase_price =
        checked_round2_add(params.principal, params.equity).ok_or_else(overflow)?;
    let equity_ratio_percent = if purchase_price.is_zero() {
        Decimal::ZERO
    } else {
        round2(params.equity / purchase_price * dec!(100))
    };

    Ok(LoanSummary {
        total_interest,
        total_principal,
        total_paid,
        number_of_payments,
        payoff_years: number_of_payments / 12,
        payoff_months: number_of_payments % 12,
        remaining_balance,
        fully_amortized: remaining_balance.is_zero(),
        purchase_price,
        equity_ratio_percent,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
