//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    25 * 0.9 + 30 * 0.9 = 49.50000000000001  ❌ WRONG!                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2250 + 2700 = 4950 cents = $49.50                                    │
//! │    Percentages use basis points and explicit rounding                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(2500); // $25.00
//! let total = price + Money::from_cents(1500);
//! assert_eq!(total.to_decimal_string(), "40.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Item.price_cents ──► CartLine.final_price ──► Cart.subtotal           │
/// │                                                    │                    │
/// │                         coupon redemption ◄────────┤                    │
/// │                                                    ▼                    │
/// │                                               Cart.total ──► Order     │
/// │                                                                         │
/// │  Order.total ──► trailing-window sales in the admin report             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(30).cents(), 3000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Calculates how much a percentage discount takes off this amount.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 rounds half a cent up.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::DiscountRate;
    ///
    /// let total = Money::from_cents(10000); // $100.00
    /// let off = total.discount_amount(DiscountRate::from_percent(10));
    /// assert_eq!(off.cents(), 1000); // $10.00
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        // i128 so large totals cannot overflow the intermediate product
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## User Workflow
    /// ```text
    /// Item: Pantene $30.00 (discount applicable)
    ///      │
    ///      ▼
    /// apply_discount(10%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Cart line: $27.00
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.discount_amount(rate)
    }

    /// Formats the value as a plain decimal with two places, no symbol.
    ///
    /// This is the format stored in `Order::total_cost`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(8100).to_decimal_string(), "81.00");
    /// assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign. The app layer formats with the
/// configured currency symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(9000).to_decimal_string(), "90.00");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_cents(250);
        assert_eq!(c.cents(), 1250);
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_cents(2250), Money::from_cents(2700)];
        let total: Money = prices.iter().sum();
        assert_eq!(total.cents(), 4950);
    }

    #[test]
    fn test_item_discount() {
        let rate = DiscountRate::from_percent(10);
        assert_eq!(Money::from_major(30).apply_discount(rate).cents(), 2700);
        assert_eq!(Money::from_major(25).apply_discount(rate).cents(), 2250);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // $0.15 at 10% = 1.5 cents → 2 cents off
        let off = Money::from_cents(15).discount_amount(DiscountRate::from_percent(10));
        assert_eq!(off.cents(), 2);
    }

    #[test]
    fn test_full_and_zero_discount() {
        let total = Money::from_cents(4321);
        assert!(total
            .apply_discount(DiscountRate::from_percent(100))
            .is_zero());
        assert_eq!(total.apply_discount(DiscountRate::zero()), total);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }
}
