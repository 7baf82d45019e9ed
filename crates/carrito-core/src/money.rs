//! # Money Module
//!
//! Monetary values in whole Chilean pesos.
//!
//! CLP has no minor unit in practice, so the smallest currency unit is one
//! peso and every amount is an `i64` peso count. Percentage math is done in
//! basis points with integer round-half-up, matching `Math.round` on
//! non-negative inputs:
//!
//! ```text
//! (amount × bps + 5000) / 10000
//! ```
//!
//! ## Usage
//! ```rust
//! use carrito_core::money::Money;
//!
//! let price = Money::from_pesos(15_000);
//! let line_total = price * 2;
//! assert_eq!(line_total.pesos(), 30_000);
//!
//! // 10% of $20.001
//! assert_eq!(Money::from_pesos(20_001).percentage(1_000).pesos(), 2_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole Chilean pesos.
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for refunds and savings lines
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support, serialized as a bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole peso count.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos)
    }

    /// Returns the value as a peso count.
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0
    }

    /// Zero pesos.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Takes a percentage of this amount, expressed in basis points.
    ///
    /// ## Rounding
    /// Integer round-half-up: `(amount × bps + 5000) / 10000`. On non-negative
    /// amounts this matches `Math.round(amount × rate)`.
    ///
    /// ## Example
    /// ```rust
    /// use carrito_core::money::Money;
    ///
    /// // 19% VAT on $10.000 = $1.900
    /// assert_eq!(Money::from_pesos(10_000).percentage(1_900).pesos(), 1_900);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 to prevent overflow on large carts
        let part = (self.0 as i128 * bps as i128 + 5_000) / 10_000;
        Money(part as i64)
    }

    /// Multiplies by a quantity, for line totals.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as es-CL currency, e.g. `$15.000 CLP`.
///
/// Debug/log formatting only. The frontend owns user-facing localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}${grouped} CLP")
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pesos() {
        let money = Money::from_pesos(15_000);
        assert_eq!(money.pesos(), 15_000);
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(format!("{}", Money::from_pesos(15_000)), "$15.000 CLP");
        assert_eq!(format!("{}", Money::from_pesos(500)), "$500 CLP");
        assert_eq!(format!("{}", Money::from_pesos(1_234_567)), "$1.234.567 CLP");
        assert_eq!(format!("{}", Money::from_pesos(-3_000)), "-$3.000 CLP");
        assert_eq!(format!("{}", Money::zero()), "$0 CLP");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesos(1_000);
        let b = Money::from_pesos(500);

        assert_eq!((a + b).pesos(), 1_500);
        assert_eq!((a - b).pesos(), 500);
        assert_eq!((a * 3).pesos(), 3_000);
        assert_eq!(a.multiply_quantity(4).pesos(), 4_000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1_000, 2_000, 3_000]
            .into_iter()
            .map(Money::from_pesos)
            .sum();
        assert_eq!(total.pesos(), 6_000);
    }

    #[test]
    fn test_percentage_exact() {
        // 10% of $20.000 = $2.000
        assert_eq!(Money::from_pesos(20_000).percentage(1_000).pesos(), 2_000);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 5% of $15.001 = 750.05 → $750
        assert_eq!(Money::from_pesos(15_001).percentage(500).pesos(), 750);
        // 5% of $15.010 = 750.5 → $751
        assert_eq!(Money::from_pesos(15_010).percentage(500).pesos(), 751);
        // 19% of $99 = 18.81 → $19
        assert_eq!(Money::from_pesos(99).percentage(1_900).pesos(), 19);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(Money::from_pesos(1).is_positive());
        assert_eq!(Money::default(), Money::zero());
    }
}
