//! Sweep downpayments for one house price and report ROI outcomes as JSON
//!
//! Each downpayment is projected in parallel with the same rate, term and
//! ROI settings.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;

use mortgage_roi::{LoanTerm, MortgageFactory, RoiConfig, ScenarioOutcome, ScenarioRunner};

#[derive(Parser)]
#[command(name = "downpayment_sweep", about = "Compare ROI across downpayments")]
struct Cli {
    /// Annual interest rate in percent
    #[arg(short = 'i', long, default_value_t = 6.0)]
    interest: f64,

    /// Loan term in years
    #[arg(short = 'y', long = "loan-years", default_value_t = 30)]
    years: u32,

    /// House price
    #[arg(long)]
    house_price: Decimal,

    /// Downpayments to compare (comma separated)
    #[arg(long, value_delimiter = ',', required = true)]
    downpayments: Vec<Decimal>,

    /// JSON file with ROI settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct SweepResponse {
    rate: f64,
    loan_years: u32,
    house_price: Decimal,
    outcomes: Vec<ScenarioOutcome>,
    execution_time_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.downpayments.is_empty() {
        bail!("at least one downpayment is required");
    }

    let start = Instant::now();
    let config = match &cli.config {
        Some(path) => RoiConfig::from_json_path(path)
            .with_context(|| format!("Failed to load ROI config {}", path.display()))?,
        None => RoiConfig::default(),
    };

    let rate = cli.interest / 100.0;
    let factory = MortgageFactory::new(rate, LoanTerm::Years(cli.years));
    let runner = ScenarioRunner::new(factory, config);
    let outcomes = runner.downpayment_sweep(cli.house_price, &cli.downpayments)?;

    let response = SweepResponse {
        rate,
        loan_years: cli.years,
        house_price: cli.house_price,
        outcomes,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
