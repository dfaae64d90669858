//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the shop's currency.
///
/// Amounts are kept in the currency's standard unit (dollars, not cents)
/// with decimal arithmetic throughout, so `19.99 * 3` never picks up float
/// noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a cent count.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The whole-cent representation, rounded half-up.
    ///
    /// Used when talking to payment providers that want integer minor units.
    #[must_use]
    pub fn as_cents(&self) -> i64 {
        use rust_decimal::prelude::ToPrimitive;
        (self.0 * Decimal::ONE_HUNDRED)
            .round()
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// Add a per-unit delta (e.g. a variant's additional price).
    #[must_use]
    pub fn plus(&self, delta: Decimal) -> Self {
        Self(self.0 + delta)
    }

    /// Multiply by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g. "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_formatting() {
        assert_eq!(Price::new(dec!(19.99)).display(), "$19.99");
        assert_eq!(Price::new(dec!(5)).display(), "$5.00");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_line_arithmetic() {
        let base = Price::new(dec!(24.00));
        let with_delta = base.plus(dec!(5.50));
        assert_eq!(with_delta.amount(), dec!(29.50));
        assert_eq!(with_delta.times(3).amount(), dec!(88.50));
    }

    #[test]
    fn test_cents_round_trip() {
        assert_eq!(Price::from_cents(1999).amount(), dec!(19.99));
        assert_eq!(Price::new(dec!(19.99)).as_cents(), 1999);
        assert_eq!(Price::new(dec!(19.995)).as_cents(), 2000);
    }
}
