//! Builds families of mortgages that share rate, term and prepayment variant

use super::loan::{Financing, LoanTerm, Mortgage};
use super::prepayment::{NoPrepayment, PrepaymentStrategy};
use crate::error::Result;

/// Mortgage factory closed over the shared construction parameters
///
/// Every mortgage it builds receives its own copy of the prepayment
/// strategy, so variant parameters supplied here always reach the loan.
#[derive(Debug, Clone)]
pub struct MortgageFactory<P = NoPrepayment> {
    rate: f64,
    term: LoanTerm,
    prepayment: P,
}

impl MortgageFactory<NoPrepayment> {
    pub fn new(rate: f64, term: LoanTerm) -> Self {
        Self::with_prepayment(rate, term, NoPrepayment)
    }
}

impl<P: PrepaymentStrategy + Clone> MortgageFactory<P> {
    pub fn with_prepayment(rate: f64, term: LoanTerm, prepayment: P) -> Self {
        Self {
            rate,
            term,
            prepayment,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn term(&self) -> LoanTerm {
        self.term
    }

    pub fn prepayment(&self) -> &P {
        &self.prepayment
    }

    /// Build one mortgage for the given financing
    pub fn mortgage(&self, financing: &Financing) -> Result<Mortgage<P>> {
        Mortgage::with_prepayment(self.rate, self.term, financing, self.prepayment.clone())
    }
}
