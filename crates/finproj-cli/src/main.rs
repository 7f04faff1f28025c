mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::loan::{AmortizationArgs, PaymentArgs};
use commands::savings::SavingsArgs;
use commands::scenarios::ScenariosArgs;

/// Loan amortization and savings-plan projections
#[derive(Parser)]
#[command(
    name = "finproj",
    version,
    about = "Loan amortization and savings-plan projections",
    long_about = "A CLI for annuity loan repayment schedules and compound-interest \
                  savings plans with cent-exact decimal rounding. Parameters come \
                  from flags, a JSON/YAML file (--input), or piped stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine diagnostics to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed monthly instalment of an annuity loan
    Payment(PaymentArgs),
    /// Full repayment schedule of an annuity loan
    Amortization(AmortizationArgs),
    /// Year-by-year projection of a savings plan
    Savings(SavingsArgs),
    /// Evaluate a file of loan and savings scenarios in parallel
    Scenarios(ScenariosArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "finproj=debug,finproj_core=debug"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Amortization(args) => commands::loan::run_amortization(args),
        Commands::Savings(args) => commands::savings::run_savings(args),
        Commands::Scenarios(args) => commands::scenarios::run_scenarios(args),
        Commands::Version => {
            println!("finproj {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
