//! Running accumulators for one ROI projection run

use rust_decimal::Decimal;

use crate::money::Money;
use crate::mortgage::{AmortizationRow, MONTHS_IN_YEAR};

/// State of a projection after the rows produced so far
#[derive(Debug, Clone, PartialEq)]
pub struct RoiState {
    /// Rows consumed so far
    pub periods: u32,

    /// Whole years elapsed at the current row (0-indexed)
    pub year: u32,

    /// Month within the current year (1-12)
    pub month: u32,

    /// Loan balance not yet repaid
    pub principal_remaining: Money,

    pub principal_paid: Money,
    pub interest_paid: Money,
    pub insurance_paid: Money,

    /// Principal plus interest paid to the lender
    pub mortgage_paid: Money,

    /// Cumulative tax benefit from deducting interest and property tax
    pub writeoff_gain: Money,
}

impl RoiState {
    /// Initialize state at the start of a projection
    pub fn new(principal: Money) -> Self {
        Self {
            periods: 0,
            year: 0,
            month: 0,
            principal_remaining: principal,
            principal_paid: Decimal::ZERO,
            interest_paid: Decimal::ZERO,
            insurance_paid: Decimal::ZERO,
            mortgage_paid: Decimal::ZERO,
            writeoff_gain: Decimal::ZERO,
        }
    }

    /// Fold one amortization row and its monthly costs into the state
    pub fn advance(&mut self, row: &AmortizationRow, monthly_insurance: Money, writeoff: Money) {
        let index = self.periods;
        self.month = index % MONTHS_IN_YEAR + 1;
        self.year = index / MONTHS_IN_YEAR;
        self.periods += 1;

        self.principal_remaining -= row.principal;
        self.principal_paid += row.principal;
        self.interest_paid += row.interest;
        self.mortgage_paid += row.principal + row.interest;
        self.insurance_paid += monthly_insurance;
        self.writeoff_gain += writeoff;
    }
}
