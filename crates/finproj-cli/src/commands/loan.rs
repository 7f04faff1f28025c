use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use finproj_core::amortization::{self, LoanParameters};

use crate::input;

/// Arguments for the fixed monthly instalment
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Decimal,

    /// Nominal annual interest rate in percent (3.5 = 3.5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Decimal,

    /// Initial annual amortization rate in percent
    #[arg(long, alias = "amortization")]
    pub amortization_rate: Decimal,
}

/// Which schedule(s) to keep in the output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScheduleView {
    Monthly,
    Yearly,
    Both,
    None,
}

/// Arguments for a full repayment schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (3.5 = 3.5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Initial annual amortization rate in percent
    #[arg(long, alias = "amortization")]
    pub amortization_rate: Option<Decimal>,

    /// Own funds brought into the purchase
    #[arg(long, default_value = "0")]
    pub equity: Decimal,

    /// Due date of the first instalment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,

    /// Schedule(s) to include in the output
    #[arg(long, value_enum, default_value = "both")]
    pub schedule: ScheduleView,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_payment = amortization::derive_monthly_payment(
        args.principal,
        args.interest_rate,
        args.amortization_rate,
    );
    Ok(json!({
        "monthly_payment": monthly_payment,
        "annual_payment": monthly_payment * Decimal::from(12),
        "monthly_interest_rate": amortization::monthly_interest_rate(args.interest_rate),
    }))
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanParameters {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate_percent: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            initial_amortization_rate_percent: args
                .amortization_rate
                .ok_or("--amortization-rate is required (or provide --input)")?,
            equity: args.equity,
            first_payment_date: args.first_payment_date,
        }
    };

    let result = amortization::project_loan(&loan_input)?;
    let mut value = serde_json::to_value(result)?;
    select_schedules(&mut value, args.schedule);
    Ok(value)
}

/// Drop the schedules the caller did not ask for from the envelope.
pub fn select_schedules(value: &mut Value, view: ScheduleView) {
    let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) else {
        return;
    };
    match view {
        ScheduleView::Monthly => {
            result.remove("yearly_schedule");
        }
        ScheduleView::Yearly => {
            result.remove("monthly_schedule");
        }
        ScheduleView::Both => {}
        ScheduleView::None => {
            result.remove("yearly_schedule");
            result.remove("monthly_schedule");
        }
    }
}
