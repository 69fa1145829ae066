//! Money amounts in integer cents.
//!
//! Prices are stored as `i64` cents to avoid floating point issues; floats
//! only appear at display boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

/// Money amount in cents (to avoid floating point issues)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Zero amount
    pub const ZERO: Self = Self(0);

    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new money amount from dollars (converted to cents)
    #[must_use]
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value in dollars (as floating point, for display only)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // i64 to f64 precision loss is acceptable for display
    pub fn dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiplies the amount by a quantity
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.dollars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dollars_converts_to_cents() {
        assert_eq!(Money::from_dollars(10).cents(), 1000);
    }

    #[test]
    fn times_scales_by_quantity() {
        assert_eq!(Money::from_dollars(10).times(5), Money::from_dollars(50));
    }

    #[test]
    fn sum_over_amounts() {
        let total: Money = [Money::from_cents(250), Money::from_cents(750)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_dollars(10));
    }

    #[test]
    fn display_as_dollars() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
    }
}
