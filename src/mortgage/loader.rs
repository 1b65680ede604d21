//! Load prepayment tables from CSV
//!
//! Expected columns: `Period,Prepayment`, one row per month starting at 1.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use log::debug;

use super::prepayment::PrepaymentTable;
use crate::error::{MortgageError, Result};
use crate::money::Money;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "Prepayment")]
    prepayment: Money,
}

/// Load a prepayment table from a CSV file
pub fn load_prepayment_table(path: &Path) -> Result<PrepaymentTable> {
    let file = File::open(path)?;
    let table = read_prepayment_table(file)?;
    debug!("loaded {} prepayment periods from {}", table.len(), path.display());
    Ok(table)
}

/// Read a prepayment table from any CSV source
pub fn read_prepayment_table<R: Read>(source: R) -> Result<PrepaymentTable> {
    let mut reader = Reader::from_reader(source);
    let mut amounts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let expected = amounts.len() as u32 + 1;
        if row.period != expected {
            return Err(MortgageError::invalid(
                "Period",
                format!("expected period {expected}, found {}", row.period),
            ));
        }
        amounts.push(row.prepayment);
    }

    Ok(PrepaymentTable::new(amounts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reads_consecutive_periods() {
        let data = "Period,Prepayment\n1,100.00\n2,0\n3,250.50\n";
        let table = read_prepayment_table(data.as_bytes()).unwrap();
        assert_eq!(table.amounts(), &[dec!(100.00), dec!(0), dec!(250.50)]);
    }

    #[test]
    fn test_rejects_gaps() {
        let data = "Period,Prepayment\n1,100\n3,100\n";
        assert!(matches!(
            read_prepayment_table(data.as_bytes()),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_amounts() {
        let data = "Period,Prepayment\n1,lots\n";
        assert!(matches!(
            read_prepayment_table(data.as_bytes()),
            Err(MortgageError::Csv(_))
        ));
    }
}
