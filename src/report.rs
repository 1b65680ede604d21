//! Text summaries and CSV export

use std::fmt::Write as _;
use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::error::Result;
use crate::mortgage::{Mortgage, PrepaymentStrategy};

/// Fixed-width summary of a mortgage's derived quantities
pub fn format_summary<P: PrepaymentStrategy>(mortgage: &Mortgage<P>) -> String {
    let mut out = String::new();
    let mut ratio = |label: &str, value: f64| {
        let _ = writeln!(out, "{label:>25}:  {value:>12.6}");
    };
    ratio("Rate", mortgage.rate());
    ratio("Month Growth", mortgage.month_growth());
    ratio("APY", mortgage.apy());

    let _ = writeln!(out, "{:>25}:  {:>12.0}", "Payoff Years", mortgage.loan_years());
    let _ = writeln!(out, "{:>25}:  {:>12}", "Payoff Months", mortgage.loan_months());

    for (label, amount) in [
        ("Amount", mortgage.principal()),
        ("Monthly Payment", mortgage.monthly_payment()),
        ("Annual Payment", mortgage.annual_payment()),
        ("Mortgage Payout", mortgage.total_payout()),
    ] {
        let amount = format!("{amount:.2}");
        let _ = writeln!(out, "{label:>25}:  {amount:>12}");
    }
    out
}

/// Write serializable rows as CSV with a header line
pub fn write_csv<W, T>(writer: W, rows: &[T]) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut csv = Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::mortgage::{AmortizationRow, Financing, LoanTerm};
    use rust_decimal_macros::dec;

    fn standard() -> Mortgage {
        Mortgage::new(
            0.06,
            LoanTerm::Years(30),
            &Financing::with_amount(dec!(100000), dec!(100000)),
        )
        .unwrap()
    }

    #[test]
    fn test_summary_lines() {
        let summary = format_summary(&standard());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], format!("{:>25}:  {:>12}", "Rate", "0.060000"));
        assert_eq!(lines[1], format!("{:>25}:  {:>12}", "Month Growth", "1.005000"));
        assert_eq!(lines[3], format!("{:>25}:  {:>12}", "Payoff Years", "30"));
        assert_eq!(lines[4], format!("{:>25}:  {:>12}", "Payoff Months", "360"));
        assert_eq!(lines[5], format!("{:>25}:  {:>12}", "Amount", "100000.00"));
        assert_eq!(lines[6], format!("{:>25}:  {:>12}", "Monthly Payment", "599.56"));
        assert_eq!(lines[7], format!("{:>25}:  {:>12}", "Annual Payment", "7194.72"));
        assert_eq!(lines[8], format!("{:>25}:  {:>12}", "Mortgage Payout", "215841.60"));
    }

    #[test]
    fn test_schedule_csv_has_header_and_rows() {
        let m = standard();
        let rows: Vec<AmortizationRow> = m
            .amortization_schedule()
            .take(2)
            .collect::<Result<_>>()
            .unwrap();

        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "period,principal,interest,remaining_balance");
        assert_eq!(lines[1], "1,99.56,500.00,99900.44");
        assert_eq!(lines.len(), 3);
    }
}
