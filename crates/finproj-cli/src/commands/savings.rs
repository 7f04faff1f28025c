use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finproj_core::growth::{self, GrowthParameters};

use crate::input;

/// Arguments for a savings-plan projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SavingsArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Starting balance
    #[arg(long, default_value = "0")]
    pub initial_balance: Decimal,

    /// Contribution paid in every month
    #[arg(long, alias = "contribution")]
    pub monthly_contribution: Option<Decimal>,

    /// Effective annual return in percent (7 = 7%)
    #[arg(long, alias = "rate")]
    pub return_rate: Option<Decimal>,

    /// Plan length in years
    #[arg(long)]
    pub years: Option<i32>,
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan: GrowthParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        GrowthParameters {
            initial_balance: args.initial_balance,
            monthly_contribution: args
                .monthly_contribution
                .ok_or("--monthly-contribution is required (or provide --input)")?,
            annual_return_rate_percent: args
                .return_rate
                .ok_or("--return-rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        }
    };

    let result = growth::project_savings(&plan)?;
    Ok(serde_json::to_value(result)?)
}
