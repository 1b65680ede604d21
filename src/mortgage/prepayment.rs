//! Extra-payment strategies injected into the amortization schedule

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, Result};
use crate::money::Money;

/// Supplies the extra amount paid on top of the regular monthly payment
pub trait PrepaymentStrategy: Debug {
    /// Extra payment for a 1-indexed period
    fn extra_payment(&self, period: u32) -> Result<Money>;
}

/// Plain mortgage: never pays anything beyond the scheduled payment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPrepayment;

impl PrepaymentStrategy for NoPrepayment {
    fn extra_payment(&self, _period: u32) -> Result<Money> {
        Ok(Money::ZERO)
    }
}

/// Per-period prepayment amounts, one entry per month starting at period 1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentTable {
    amounts: Vec<Money>,
}

impl PrepaymentTable {
    pub fn new(amounts: Vec<Money>) -> Self {
        Self { amounts }
    }

    /// Same extra amount every month for `months` periods
    pub fn uniform(amount: Money, months: u32) -> Self {
        Self {
            amounts: vec![amount; months as usize],
        }
    }

    pub fn amounts(&self) -> &[Money] {
        &self.amounts
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl PrepaymentStrategy for PrepaymentTable {
    fn extra_payment(&self, period: u32) -> Result<Money> {
        let out_of_range = || MortgageError::PrepaymentOutOfRange {
            period,
            available: self.amounts.len(),
        };
        let idx = (period as usize).checked_sub(1).ok_or_else(out_of_range)?;
        self.amounts.get(idx).copied().ok_or_else(out_of_range)
    }
}
