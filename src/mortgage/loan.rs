//! Fixed-rate loan definition and its derived payment quantities

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::prepayment::{NoPrepayment, PrepaymentStrategy};
use super::schedule::AmortizationSchedule;
use crate::error::{MortgageError, Result};
use crate::money::{decimal_from_f64, decimal_to_f64, dollar, dollar_f64, Money, Rounding};

pub const MONTHS_IN_YEAR: u32 = 12;

/// Precision of the rate used for interest accrual
const RATE_PLACES: u32 = 6;

/// Loan term, entered either in months or whole years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanTerm {
    Months(u32),
    Years(u32),
}

impl LoanTerm {
    pub fn months(self) -> u32 {
        match self {
            LoanTerm::Months(months) => months,
            LoanTerm::Years(years) => years.saturating_mul(MONTHS_IN_YEAR),
        }
    }
}

/// How the purchase is financed
///
/// A house price is always required, together with exactly one of a
/// downpayment or a direct loan amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Financing {
    pub house_price: Option<Money>,
    pub downpayment: Option<Money>,
    pub amount: Option<Money>,
}

impl Financing {
    pub fn with_downpayment(house_price: Money, downpayment: Money) -> Self {
        Self {
            house_price: Some(house_price),
            downpayment: Some(downpayment),
            amount: None,
        }
    }

    pub fn with_amount(house_price: Money, amount: Money) -> Self {
        Self {
            house_price: Some(house_price),
            downpayment: None,
            amount: Some(amount),
        }
    }

    /// Resolve to (house price, principal), both rounded up to the cent
    fn resolve(&self) -> Result<(Money, Money)> {
        let missing = || {
            MortgageError::MissingValue(
                "need to specify house price and either loan amount or downpayment".into(),
            )
        };
        let house_price = dollar(self.house_price.ok_or_else(missing)?, Rounding::Ceiling);

        let principal = match (self.downpayment, self.amount) {
            (Some(downpayment), None) => house_price - dollar(downpayment, Rounding::Ceiling),
            (None, Some(amount)) => dollar(amount, Rounding::Ceiling),
            (Some(_), Some(_)) => return Err(MortgageError::AmbiguousFinancing),
            (None, None) => return Err(missing()),
        };

        if house_price < Money::ZERO {
            return Err(MortgageError::invalid("house_price", "must not be negative"));
        }
        if principal < Money::ZERO {
            return Err(MortgageError::invalid("principal", "must not be negative"));
        }
        Ok((house_price, principal))
    }
}

/// Immutable fixed-rate mortgage
///
/// The prepayment strategy decides how much is paid on top of the regular
/// monthly payment each period; the plain mortgage uses [`NoPrepayment`].
#[derive(Debug, Clone)]
pub struct Mortgage<P = NoPrepayment> {
    rate: f64,
    term_months: u32,
    house_price: Money,
    principal: Money,
    monthly_payment: Money,
    accrual_rate: Decimal,
    prepayment: P,
}

impl Mortgage<NoPrepayment> {
    pub fn new(rate: f64, term: LoanTerm, financing: &Financing) -> Result<Self> {
        Self::with_prepayment(rate, term, financing, NoPrepayment)
    }
}

impl<P: PrepaymentStrategy> Mortgage<P> {
    /// Build a mortgage whose extra payments come from `prepayment`
    pub fn with_prepayment(
        rate: f64,
        term: LoanTerm,
        financing: &Financing,
        prepayment: P,
    ) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(MortgageError::invalid("rate", format!("must be positive and finite, got {rate}")));
        }
        let term_months = term.months();
        if term_months == 0 {
            return Err(MortgageError::invalid("term", "must be at least one month"));
        }

        let (house_price, principal) = financing.resolve()?;
        let monthly_payment = annuity_payment(principal, rate, term_months)?;
        let accrual_rate = decimal_from_f64(rate, "rate")?
            .round_dp_with_strategy(RATE_PLACES, RoundingStrategy::MidpointNearestEven)
            / Decimal::from(MONTHS_IN_YEAR);

        Ok(Self {
            rate,
            term_months,
            house_price,
            principal,
            monthly_payment,
            accrual_rate,
            prepayment,
        })
    }

    /// Nominal annual rate
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// One plus the monthly rate
    pub fn month_growth(&self) -> f64 {
        month_growth(self.rate)
    }

    /// Effective annual yield of monthly compounding
    pub fn apy(&self) -> f64 {
        self.month_growth().powi(MONTHS_IN_YEAR as i32) - 1.0
    }

    pub fn loan_years(&self) -> f64 {
        f64::from(self.term_months) / f64::from(MONTHS_IN_YEAR)
    }

    pub fn loan_months(&self) -> u32 {
        self.term_months
    }

    pub fn house_price(&self) -> Money {
        self.house_price
    }

    /// Amount financed
    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn downpayment(&self) -> Money {
        self.house_price - self.principal
    }

    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    pub fn annual_payment(&self) -> Money {
        self.monthly_payment * Decimal::from(MONTHS_IN_YEAR)
    }

    /// Nominal payout; ignores the final-period adjustment
    pub fn total_payout(&self) -> Money {
        self.monthly_payment * Decimal::from(self.term_months)
    }

    /// Monthly interest rate on the balance, from the rate quantized to six places
    pub(crate) fn accrual_rate(&self) -> Decimal {
        self.accrual_rate
    }

    pub fn prepayment(&self) -> &P {
        &self.prepayment
    }

    /// Extra payment for a 1-indexed period within the loan term
    pub fn monthly_prepayment(&self, period: u32) -> Result<Money> {
        if period == 0 || period > self.term_months {
            return Err(MortgageError::PeriodOutOfRange {
                period,
                term_months: self.term_months,
            });
        }
        self.prepayment.extra_payment(period)
    }

    /// Principal that `payment` per month would amortize over this term
    pub fn principal_for_payment(&self, payment: Money) -> Result<Money> {
        let payment = decimal_to_f64(payment, "payment")?;
        let principal = payment / self.rate * f64::from(MONTHS_IN_YEAR) * self.discount_complement();
        dollar_f64(principal, Rounding::HalfUp, "principal for payment")
    }

    /// Lazy, single-pass amortization schedule
    pub fn amortization_schedule(&self) -> AmortizationSchedule<'_, P> {
        AmortizationSchedule::new(self)
    }

    /// 1 - month_growth^-term
    fn discount_complement(&self) -> f64 {
        1.0 - (1.0 / self.month_growth()).powf(f64::from(self.term_months))
    }
}

fn month_growth(rate: f64) -> f64 {
    1.0 + rate / f64::from(MONTHS_IN_YEAR)
}

/// Level payment that amortizes `principal` over `term_months`, rounded up to the cent
fn annuity_payment(principal: Money, rate: f64, term_months: u32) -> Result<Money> {
    let principal = decimal_to_f64(principal, "principal")?;
    let complement = 1.0 - (1.0 / month_growth(rate)).powf(f64::from(term_months));
    let payment = principal * rate / (f64::from(MONTHS_IN_YEAR) * complement);
    dollar_f64(payment, Rounding::Ceiling, "monthly payment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn standard() -> Mortgage {
        Mortgage::new(
            0.06,
            LoanTerm::Months(360),
            &Financing::with_amount(dec!(100000), dec!(100000)),
        )
        .unwrap()
    }

    #[test]
    fn test_derived_ratios() {
        let m = standard();
        assert_relative_eq!(m.month_growth(), 1.005, epsilon = 1e-12);
        assert_relative_eq!(m.apy(), 1.005_f64.powi(12) - 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.loan_years(), 30.0);
        assert_eq!(m.loan_months(), 360);
    }

    #[test]
    fn test_monthly_payment_matches_annuity_formula() {
        let m = standard();
        let oracle = 100000.0 * 0.06 / (12.0 * (1.0 - 1.005_f64.powi(-360)));
        let oracle_cents = (oracle * 100.0).ceil() / 100.0;
        assert_relative_eq!(oracle_cents, 599.56, epsilon = 1e-9);
        assert_eq!(m.monthly_payment(), dec!(599.56));
    }

    #[test]
    fn test_annual_payment_and_payout() {
        let m = standard();
        assert_eq!(m.annual_payment(), dec!(7194.72));
        assert_eq!(m.total_payout(), m.monthly_payment() * Decimal::from(360));
        assert_eq!(m.total_payout(), dec!(215841.60));
    }

    #[test]
    fn test_downpayment_and_amount_give_same_payment() {
        let by_downpayment = Mortgage::new(
            0.045,
            LoanTerm::Years(15),
            &Financing::with_downpayment(dec!(350000), dec!(70000)),
        )
        .unwrap();
        let by_amount = Mortgage::new(
            0.045,
            LoanTerm::Months(180),
            &Financing::with_amount(dec!(350000), dec!(280000)),
        )
        .unwrap();

        assert_eq!(by_downpayment.principal(), dec!(280000));
        assert_eq!(by_downpayment.downpayment(), dec!(70000));
        assert_eq!(by_downpayment.monthly_payment(), by_amount.monthly_payment());
    }

    #[test]
    fn test_inputs_rounded_up_to_cent() {
        let m = Mortgage::new(
            0.05,
            LoanTerm::Years(30),
            &Financing::with_amount(dec!(200000.001), dec!(150000.001)),
        )
        .unwrap();
        assert_eq!(m.house_price(), dec!(200000.01));
        assert_eq!(m.principal(), dec!(150000.01));
    }

    #[test]
    fn test_missing_financing_is_rejected() {
        let house_only = Financing {
            house_price: Some(dec!(300000)),
            ..Default::default()
        };
        let err = Mortgage::new(0.06, LoanTerm::Years(30), &house_only).unwrap_err();
        assert!(matches!(err, MortgageError::MissingValue(_)));

        let no_house = Financing {
            amount: Some(dec!(100000)),
            ..Default::default()
        };
        let err = Mortgage::new(0.06, LoanTerm::Years(30), &no_house).unwrap_err();
        assert!(matches!(err, MortgageError::MissingValue(_)));
    }

    #[test]
    fn test_both_principal_sources_rejected() {
        let both = Financing {
            house_price: Some(dec!(300000)),
            downpayment: Some(dec!(60000)),
            amount: Some(dec!(240000)),
        };
        let err = Mortgage::new(0.06, LoanTerm::Years(30), &both).unwrap_err();
        assert!(matches!(err, MortgageError::AmbiguousFinancing));
    }

    #[test]
    fn test_zero_rate_and_term_rejected() {
        let financing = Financing::with_amount(dec!(100000), dec!(100000));
        assert!(matches!(
            Mortgage::new(0.0, LoanTerm::Years(30), &financing),
            Err(MortgageError::InvalidInput { .. })
        ));
        assert!(matches!(
            Mortgage::new(0.06, LoanTerm::Months(0), &financing),
            Err(MortgageError::InvalidInput { .. })
        ));
        assert!(matches!(
            Mortgage::new(f64::NAN, LoanTerm::Years(30), &financing),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_downpayment_above_price_rejected() {
        let financing = Financing::with_downpayment(dec!(100000), dec!(150000));
        assert!(matches!(
            Mortgage::new(0.06, LoanTerm::Years(30), &financing),
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_base_prepayment_is_zero_within_term() {
        let m = standard();
        assert_eq!(m.monthly_prepayment(1).unwrap(), Money::ZERO);
        assert_eq!(m.monthly_prepayment(360).unwrap(), Money::ZERO);
        assert!(matches!(
            m.monthly_prepayment(361),
            Err(MortgageError::PeriodOutOfRange { period: 361, term_months: 360 })
        ));
        assert!(m.monthly_prepayment(0).is_err());
    }

    #[test]
    fn test_principal_for_payment_inverts_payment() {
        let m = standard();
        let principal = m.principal_for_payment(m.monthly_payment()).unwrap();
        // Ceiling on the payment means the inverse lands slightly above the loan
        assert!(principal >= dec!(100000));
        assert!(principal - dec!(100000) < dec!(2));
    }
}
