//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount, unrounded.
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "VES").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    #[default]
    Usd,
    /// Venezuelan Bolívar
    Ves,
    /// Euro
    Eur,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the amount rounded half away from zero to `decimal_places`.
    #[must_use]
    pub fn rounded(&self, decimal_places: u32) -> Decimal {
        self.amount
            .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats the amount for documents, e.g. `USD1278.97`.
    ///
    /// Always renders exactly `decimal_places` digits after the point.
    #[must_use]
    pub fn format(&self, decimal_places: u32) -> String {
        let mut rounded = self.rounded(decimal_places);
        rounded.rescale(decimal_places);
        format!("{}{}", self.currency, rounded)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Ves => write!(f, "VES"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "VES" => Ok(Self::Ves),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_money_zero() {
        let money = Money::zero(Currency::Ves);
        assert!(money.is_zero());
        assert_eq!(money.amount, Decimal::ZERO);
        assert_eq!(money.currency, Currency::Ves);
    }

    #[test]
    fn test_money_is_negative() {
        assert!(!Money::new(dec!(10), Currency::Usd).is_negative());
        assert!(Money::new(dec!(-10), Currency::Usd).is_negative());
        assert!(!Money::new(dec!(0), Currency::Usd).is_negative());
    }

    #[test]
    fn test_money_rounded_half_away_from_zero() {
        assert_eq!(Money::new(dec!(13.315), Currency::Usd).rounded(2), dec!(13.32));
        assert_eq!(Money::new(dec!(-13.315), Currency::Usd).rounded(2), dec!(-13.32));
        assert_eq!(Money::new(dec!(17.7689681), Currency::Usd).rounded(2), dec!(17.77));
    }

    #[rstest]
    #[case(dec!(50), Currency::Usd, "USD50.00")]
    #[case(dec!(161.2), Currency::Usd, "USD161.20")]
    #[case(dec!(3.12348263), Currency::Usd, "USD3.12")]
    #[case(dec!(-25.5), Currency::Eur, "EUR-25.50")]
    fn test_money_format_pads_decimals(
        #[case] amount: Decimal,
        #[case] currency: Currency,
        #[case] expected: &str,
    ) {
        assert_eq!(Money::new(amount, currency).format(2), expected);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Ves.to_string(), "VES");
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("VES").unwrap(), Currency::Ves);
        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }
}
