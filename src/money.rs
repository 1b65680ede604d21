//! Currency quantization
//!
//! All currency amounts are `rust_decimal::Decimal` values carried at cent
//! precision. Dimensionless ratios (rates, growth and appreciation factors)
//! stay `f64` and are converted here when they meet a currency amount.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, Result};

/// Currency amount
pub type Money = Decimal;

/// Decimal places of the smallest currency unit (cents)
pub const CENT_PLACES: u32 = 2;

/// Rounding mode used when quantizing to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rounding {
    /// Round toward positive infinity (payments, principal)
    #[default]
    Ceiling,
    /// Round to nearest, ties away from zero (interest)
    HalfUp,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        }
    }
}

/// Quantize a decimal value to cents
pub fn dollar(value: Decimal, rounding: Rounding) -> Money {
    value.round_dp_with_strategy(CENT_PLACES, rounding.strategy())
}

/// Quantize a float to cents, going through its shortest decimal form first
pub fn dollar_f64(value: f64, rounding: Rounding, context: &str) -> Result<Money> {
    Ok(dollar(decimal_from_f64(value, context)?, rounding))
}

/// Convert a float ratio or amount into a decimal
pub fn decimal_from_f64(value: f64, context: &str) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(MortgageError::NonFinite {
            context: context.to_string(),
        });
    }
    Decimal::try_from(value).map_err(|_| MortgageError::OutOfRange {
        context: context.to_string(),
    })
}

/// Convert a decimal amount into a float for ratio arithmetic
pub fn decimal_to_f64(value: Decimal, context: &str) -> Result<f64> {
    value.to_f64().ok_or_else(|| MortgageError::OutOfRange {
        context: context.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ceiling_rounds_up_partial_cents() {
        assert_eq!(dollar(dec!(599.5505), Rounding::Ceiling), dec!(599.56));
        assert_eq!(dollar(dec!(10.001), Rounding::Ceiling), dec!(10.01));
    }

    #[test]
    fn test_half_up_ties_away_from_zero() {
        assert_eq!(dollar(dec!(2.345), Rounding::HalfUp), dec!(2.35));
        assert_eq!(dollar(dec!(2.344), Rounding::HalfUp), dec!(2.34));
        assert_eq!(dollar(dec!(-2.345), Rounding::HalfUp), dec!(-2.35));
    }

    #[test]
    fn test_exact_cents_are_unchanged() {
        assert_eq!(dollar(dec!(1234.56), Rounding::Ceiling), dec!(1234.56));
        assert_eq!(dollar(dec!(1234.56), Rounding::HalfUp), dec!(1234.56));
        assert_eq!(dollar_f64(0.1, Rounding::Ceiling, "test").unwrap(), dec!(0.10));
    }

    #[test]
    fn test_default_rounding_is_ceiling() {
        assert_eq!(Rounding::default(), Rounding::Ceiling);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            dollar_f64(f64::NAN, Rounding::Ceiling, "nan"),
            Err(MortgageError::NonFinite { .. })
        ));
        assert!(matches!(
            decimal_from_f64(f64::INFINITY, "inf"),
            Err(MortgageError::NonFinite { .. })
        ));
    }
}
