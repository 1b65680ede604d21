//! Fixed-rate mortgages, prepayment variants and their amortization schedules

mod factory;
pub mod loader;
mod loan;
mod prepayment;
mod schedule;

pub use factory::MortgageFactory;
pub use loader::load_prepayment_table;
pub use loan::{Financing, LoanTerm, Mortgage, MONTHS_IN_YEAR};
pub use prepayment::{NoPrepayment, PrepaymentStrategy, PrepaymentTable};
pub use schedule::{AmortizationRow, AmortizationSchedule};
