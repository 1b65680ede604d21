//! Mortgage ROI - fixed-rate amortization and return-on-investment projections
//!
//! This library provides:
//! - Cent-exact currency rounding
//! - Fixed-rate mortgages with lazy amortization schedules
//! - Prepayment strategies and mortgage factories
//! - Monthly ROI projection (appreciation, property tax, insurance, tax write-offs)
//! - Parallel scenario sweeps over financing choices

pub mod error;
pub mod money;
pub mod mortgage;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{MortgageError, Result};
pub use money::{dollar, Money, Rounding};
pub use mortgage::{
    AmortizationRow, Financing, LoanTerm, Mortgage, MortgageFactory, NoPrepayment,
    PrepaymentStrategy, PrepaymentTable,
};
pub use projection::{RoiConfig, RoiProjector, RoiResult, RoiRow};
pub use scenario::{ScenarioOutcome, ScenarioRunner};
