//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    0.30 - 0.20 >= 0.10 ?  → false   ❌ change machine gets stuck        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 20 = 30 cents, 30 - 20 = 10 cents, 10 >= 10 ✔                  │
//! │    Every comparison the change engine makes is exact                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vending_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(130); // 1.30
//!
//! // Or parse an exact decimal string
//! let tendered: Money = "2.00".parse().unwrap();
//!
//! assert_eq!((tendered - price).cents(), 70);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Minor units per major unit (cents per euro).
pub const MINOR_PER_MAJOR: i64 = 100;

/// Longest digit run accepted by the parser; keeps `i64` cents from overflowing.
const MAX_DIGITS: usize = 15;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps; callers can detect a
///   negative difference (tendered below bill) instead of underflowing
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as cents**: `130` on the wire, never `1.3`
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► BasketItem.unit_price ──► bill
///                                                    │
/// inserted coins ───────► tendered ──────────────────┤
///                                                    ▼
///                                  compute_change(bill, tendered, coins)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let coin = Money::from_cents(50); // 0.50
    /// assert_eq!(coin.cents(), 50);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(3, 47).cents(), 347);
    /// assert_eq!(Money::from_major_minor(-1, 30).cents(), -130);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (euros), truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(130);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 390);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// How many whole `unit`s fit into this amount.
    ///
    /// This is the exact `floor(remaining / d)` step of the change engine.
    /// Returns 0 when `unit` is not positive or `self` is negative.
    ///
    /// ## Example
    /// ```rust
    /// use vending_core::money::Money;
    ///
    /// let remaining = Money::from_cents(153);
    /// assert_eq!(remaining.fits(Money::from_cents(50)), 3);
    /// assert_eq!(remaining.fits(Money::from_cents(200)), 0);
    /// ```
    #[inline]
    pub const fn fits(&self, unit: Money) -> i64 {
        if unit.0 <= 0 || self.0 < 0 {
            return 0;
        }
        self.0 / unit.0
    }

    /// Parses a decimal amount such as `"1.30"`, `"2"` or `".5"`.
    ///
    /// The string is read digit by digit into cents, so no binary float is
    /// ever involved. Digits past the second decimal place are rounded half
    /// away from zero (`"0.125"` → `0.13`).
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = input.trim();
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let (whole, frac) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits with an optional decimal point"));
        }
        if whole.len() > MAX_DIGITS {
            return Err(invalid("amount is too large"));
        }

        let mut cents: i64 = 0;
        for c in whole.chars() {
            cents = cents * 10 + digit(c);
        }

        let mut frac_digits = frac.chars();
        let tens = frac_digits.next().map(digit).unwrap_or(0);
        let ones = frac_digits.next().map(digit).unwrap_or(0);
        let round_up = frac_digits.next().map(digit).unwrap_or(0) >= 5;

        cents = cents * MINOR_PER_MAJOR + tens * 10 + ones;
        if round_up {
            cents += 1;
        }

        Ok(Money(if negative { -cents } else { cents }))
    }
}

#[inline]
fn digit(c: char) -> i64 {
    c.to_digit(10).unwrap_or(0) as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two places and no currency symbol (`"1.30"`).
///
/// The currency symbol and placement belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
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

/// Multiplication by a count (coin counts, basket quantities).
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

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(347);
        assert_eq!(money.cents(), 347);
        assert_eq!(money.major(), 3);
        assert_eq!(money.minor(), 47);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(130).to_string(), "1.30");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(200).to_string(), "2.00");
        assert_eq!(Money::from_cents(-70).to_string(), "-0.70");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(m("1.30").cents(), 130);
        assert_eq!(m("1.3").cents(), 130);
        assert_eq!(m("2").cents(), 200);
        assert_eq!(m(".5").cents(), 50);
        assert_eq!(m("0.01").cents(), 1);
        assert_eq!(m(" 3.47 ").cents(), 347);
        assert_eq!(m("-0.70").cents(), -70);
    }

    #[test]
    fn test_parse_decimal_rounds_third_place() {
        assert_eq!(m("0.125").cents(), 13);
        assert_eq!(m("0.1249").cents(), 12);
        assert_eq!(m("0.30000000000000004").cents(), 30);
        assert_eq!(m("0.009999999").cents(), 1);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1,30".parse::<Money>().is_err());
        assert!("1e-2".parse::<Money>().is_err());
        assert!("1234567890123456".parse::<Money>().is_err());
    }

    /// The classic float failure: 0.1 + 0.2 must be exactly 0.30.
    #[test]
    fn test_no_float_drift() {
        let sum = m("0.1") + m("0.2");
        assert_eq!(sum, m("0.30"));
        assert_eq!(sum.to_string(), "0.30");

        let remaining = m("0.30") - m("0.20");
        assert!(remaining >= m("0.10"));
        assert_eq!(remaining.fits(m("0.10")), 1);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_cents(1);
        assert_eq!(c.cents(), 1499);
    }

    #[test]
    fn test_sum() {
        let total: Money = [10, 20, 50].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 80);
    }

    #[test]
    fn test_fits() {
        assert_eq!(Money::from_cents(70).fits(Money::from_cents(20)), 3);
        assert_eq!(Money::from_cents(70).fits(Money::zero()), 0);
        assert_eq!(Money::from_cents(-70).fits(Money::from_cents(20)), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(130)).unwrap();
        assert_eq!(json, "130");
        let back: Money = serde_json::from_str("130").unwrap();
        assert_eq!(back, Money::from_cents(130));
    }
}
