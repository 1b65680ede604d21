//! Mortgage ROI CLI
//!
//! Prints a mortgage summary, its amortization schedule, or a monthly ROI projection

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use mortgage_roi::mortgage::{load_prepayment_table, MONTHS_IN_YEAR};
use mortgage_roi::report::{format_summary, write_csv};
use mortgage_roi::{
    AmortizationRow, Financing, LoanTerm, Mortgage, PrepaymentStrategy, RoiConfig, RoiProjector,
};

/// Rows echoed to the console before eliding the rest
const CONSOLE_ROWS: usize = 24;

#[derive(Parser)]
#[command(name = "mortgage_roi", version, about = "Mortgage Amortization Tools")]
struct Cli {
    #[command(flatten)]
    loan: LoanArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args)]
struct LoanArgs {
    /// Annual interest rate in percent
    #[arg(short = 'i', long, default_value_t = 6.0)]
    interest: f64,

    /// Loan term in years
    #[arg(short = 'y', long = "loan-years", default_value_t = 30)]
    years: u32,

    /// Loan term in months (overrides --loan-years)
    #[arg(short = 'm', long = "loan-months")]
    months: Option<u32>,

    /// Loan amount
    #[arg(short = 'a', long, default_value = "100000")]
    amount: Decimal,

    /// House price (defaults to the loan amount)
    #[arg(long)]
    house_price: Option<Decimal>,

    /// Downpayment; the loan amount becomes house price minus downpayment
    #[arg(long)]
    downpayment: Option<Decimal>,

    /// CSV file with Period,Prepayment columns
    #[arg(long)]
    prepayment_csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the mortgage summary
    Summary,
    /// Print the amortization schedule
    Schedule {
        /// Write every row to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the monthly return-on-investment projection
    Roi {
        /// JSON file with ROI settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write every row to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

impl LoanArgs {
    fn term(&self) -> LoanTerm {
        match self.months {
            Some(months) => LoanTerm::Months(months),
            None => LoanTerm::Years(self.years),
        }
    }

    fn financing(&self) -> Financing {
        match self.downpayment {
            Some(downpayment) => Financing {
                house_price: self.house_price,
                downpayment: Some(downpayment),
                amount: None,
            },
            None => Financing::with_amount(self.house_price.unwrap_or(self.amount), self.amount),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let rate = cli.loan.interest / 100.0;
    let term = cli.loan.term();
    let financing = cli.loan.financing();
    let command = cli.command.unwrap_or(Command::Summary);

    match &cli.loan.prepayment_csv {
        Some(path) => {
            let table = load_prepayment_table(path)
                .with_context(|| format!("Failed to load prepayment table {}", path.display()))?;
            let mortgage = Mortgage::with_prepayment(rate, term, &financing, table)?;
            run(&mortgage, command)
        }
        None => run(&Mortgage::new(rate, term, &financing)?, command),
    }
}

fn run<P: PrepaymentStrategy>(mortgage: &Mortgage<P>, command: Command) -> Result<()> {
    print!("{}", format_summary(mortgage));

    match command {
        Command::Summary => Ok(()),
        Command::Schedule { csv } => {
            let rows = mortgage
                .amortization_schedule()
                .collect::<mortgage_roi::Result<Vec<AmortizationRow>>>()?;

            println!("\nAmortization Schedule ({} months):", rows.len());
            println!("{:>6} {:>14} {:>14} {:>16}", "Period", "Principal", "Interest", "Balance");
            println!("{}", "-".repeat(53));
            for row in rows.iter().take(CONSOLE_ROWS) {
                println!(
                    "{:>6} {:>14} {:>14} {:>16}",
                    row.period,
                    format!("{:.2}", row.principal),
                    format!("{:.2}", row.interest),
                    format!("{:.2}", row.remaining_balance),
                );
            }
            elided(rows.len());

            if let Some(path) = csv {
                export(&path, &rows)?;
            }
            Ok(())
        }
        Command::Roi { config, csv } => {
            let config = match config {
                Some(path) => RoiConfig::from_json_path(&path)
                    .with_context(|| format!("Failed to load ROI config {}", path.display()))?,
                None => RoiConfig::default(),
            };
            let result = RoiProjector::new(mortgage, &config)?.project()?;

            println!("\nROI Projection ({} months):", result.rows.len());
            println!(
                "{:>4} {:>3} {:>10} {:>10} {:>14} {:>10} {:>14} {:>14}",
                "Year", "Mo", "Principal", "Interest", "Price", "WriteOff", "NetWorth", "ApprNetWorth"
            );
            println!("{}", "-".repeat(86));
            for row in result.rows.iter().take(CONSOLE_ROWS) {
                println!(
                    "{:>4} {:>3} {:>10} {:>10} {:>14} {:>10} {:>14} {:>14}",
                    row.year,
                    row.month,
                    format!("{:.2}", row.principal),
                    format!("{:.2}", row.interest),
                    format!("{:.2}", row.appreciated_price),
                    format!("{:.2}", row.monthly_writeoff_gain),
                    format!("{:.2}", row.net_worth_gain),
                    format!("{:.2}", row.appreciated_net_worth_gain),
                );
            }
            elided(result.rows.len());

            let summary = &result.summary;
            println!("\nSummary:");
            println!("  Total Months: {}", summary.total_months);
            println!("  Years: {:.1}", f64::from(summary.total_months) / f64::from(MONTHS_IN_YEAR));
            println!("  Total Interest: ${:.2}", summary.total_interest);
            println!("  Total Write-off Gain: ${:.2}", summary.total_writeoff_gain);
            println!("  Final Net Worth Gain: ${:.2}", summary.final_net_worth_gain);
            println!(
                "  Final Appreciated Net Worth Gain: ${:.2}",
                summary.final_appreciated_net_worth_gain
            );
            println!(
                "  Average Monthly Net Worth Gain: ${:.2}",
                summary.average_monthly_net_worth_gain
            );

            if let Some(path) = csv {
                export(&path, &result.rows)?;
            }
            Ok(())
        }
    }
}

fn elided(total: usize) {
    if total > CONSOLE_ROWS {
        println!("... ({} more months)", total - CONSOLE_ROWS);
    }
}

fn export<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Unable to create CSV file {}", path.display()))?;
    write_csv(file, rows)?;
    println!("\nFull results written to: {}", path.display());
    Ok(())
}
