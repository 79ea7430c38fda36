//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront works in a single implied currency, so a [`Price`] is just a
//! non-negative decimal amount. Prices are read from product card text such as
//! `"$1,200.00"` and persisted as plain JSON numbers so that other pages
//! sharing the cart storage key can read them. The persisted number carries
//! every digit of the amount, so a saved cart reloads unchanged.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency symbols stripped from displayed prices before parsing.
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£'];

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input contained no digits after stripping symbols.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative monetary amount in the storefront currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Parse a price as displayed on a product card.
    ///
    /// Currency symbols, whitespace and thousands separators are ignored, so
    /// `"$1,200.00"`, `"1200"` and `" $ 1 200 "` all parse to 1200.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing numeric remains, the remainder is not a
    /// decimal number, or the amount is negative.
    pub fn parse_display(text: &str) -> Result<Self, PriceError> {
        let cleaned: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',' && !CURRENCY_SYMBOLS.contains(c))
            .collect();

        if cleaned.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(&cleaned).map_err(|_| PriceError::Invalid(text.trim().to_owned()))?;
        Self::new(amount)
    }

    /// Add two prices, returning `None` if the sum is not representable.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Add two prices, clamping at the largest representable amount.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with two decimal places (e.g., `"$1,200.00"`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self.0.round_dp(2);
        let whole = rounded.trunc().to_string();
        let cents = ((rounded - rounded.trunc()) * Decimal::ONE_HUNDRED)
            .to_u32()
            .unwrap_or(0);

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!("${grouped}.{cents:02}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Saturates; see `Price::checked_add` to detect overflow.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// Persisted as an exact JSON number, trailing zeros dropped.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0.normalize(), serializer)
    }
}

// Accepts integers, floats and numeric strings, rejects negatives.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::arbitrary_precision::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_strips_symbols_and_separators() {
        assert_eq!(
            Price::parse_display("$1,200.00").unwrap(),
            Price::from_units(1200)
        );
        assert_eq!(Price::parse_display("500").unwrap(), Price::from_units(500));
        assert_eq!(
            Price::parse_display(" $ 1 200 ").unwrap(),
            Price::from_units(1200)
        );
        assert_eq!(
            Price::parse_display("€19.5").unwrap().amount(),
            Decimal::new(195, 1)
        );
    }

    #[test]
    fn test_parse_display_rejects_bad_input() {
        assert_eq!(Price::parse_display("$"), Err(PriceError::Empty));
        assert_eq!(Price::parse_display(""), Err(PriceError::Empty));
        assert!(matches!(
            Price::parse_display("call us"),
            Err(PriceError::Invalid(_))
        ));
        assert_eq!(Price::parse_display("-$5"), Err(PriceError::Negative));
    }

    #[test]
    fn test_sum() {
        let prices = [Price::from_units(500), Price::from_units(1200)];
        assert_eq!(prices.iter().sum::<Price>(), Price::from_units(1700));
        assert_eq!(
            core::iter::empty::<Price>().sum::<Price>(),
            Price::ZERO
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_units(1200).display(), "$1,200.00");
        assert_eq!(Price::from_units(5).display(), "$5.00");
        assert_eq!(
            Price::new(Decimal::new(1_234_567_89, 2)).unwrap().display(),
            "$1,234,567.89"
        );
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        let max = Price::new(Decimal::MAX).unwrap();
        assert_eq!(max.checked_add(Price::from_units(1)), None);
        assert_eq!(
            Price::from_units(2).checked_add(Price::from_units(3)),
            Some(Price::from_units(5))
        );
    }

    #[test]
    fn test_sum_saturates_at_max() {
        let max = Price::parse_display("$79,228,162,514,264,337,593,543,950,335").unwrap();
        assert_eq!(max.amount(), Decimal::MAX);

        let prices = [max, max, Price::from_units(1)];
        assert_eq!(prices.iter().sum::<Price>(), max);
        assert_eq!(max + Price::from_units(1), max);
    }

    #[test]
    fn test_serializes_as_exact_number() {
        let json = serde_json::to_string(&Price::from_units(500)).unwrap();
        assert_eq!(json, "500");

        let json = serde_json::to_string(&Price::new(Decimal::new(12_500, 3)).unwrap()).unwrap();
        assert_eq!(json, "12.5");

        let fine = Price::parse_display("$19.999999999999999999").unwrap();
        assert_eq!(serde_json::to_string(&fine).unwrap(), "19.999999999999999999");

        let large = Price::parse_display("$12,345,678,901,234,567,890").unwrap();
        assert_eq!(
            serde_json::to_string(&large).unwrap(),
            "12345678901234567890"
        );
    }

    #[test]
    fn test_json_round_trip_keeps_every_digit() {
        for text in [
            "$19.999999999999999999",
            "$12,345,678,901,234,567,890",
            "$79,228,162,514,264,337,593,543,950,335",
            "0.01",
        ] {
            let price = Price::parse_display(text).unwrap();
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "{text} came back as {json}");
        }
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_int: Price = serde_json::from_str("1200").unwrap();
        assert_eq!(from_int, Price::from_units(1200));

        let from_str: Price = serde_json::from_str("\"1200\"").unwrap();
        assert_eq!(from_str, Price::from_units(1200));

        let from_float: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(from_float.amount(), Decimal::new(1999, 2));

        assert!(serde_json::from_str::<Price>("-3").is_err());
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
    }
}
