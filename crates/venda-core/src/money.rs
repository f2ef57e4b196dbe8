//! # Money and Quantity
//!
//! Exact decimal arithmetic for monetary values and product quantities.
//!
//! ## Why Scaled Integers?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                     │
//! │                                                                 │
//! │  In floating point:                                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                   │
//! │                                                                 │
//! │  OUR SOLUTION: scaled integers                                  │
//! │    Money    — i64 cents        (2 decimal places)               │
//! │    Quantity — i64 thousandths  (3 decimal places)               │
//! │                                                                 │
//! │  $50.00 × 2.000 kg = 5000 cents × 2000 mills = $100.00 exact   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use venda_core::money::{Money, Quantity};
//!
//! let price = Money::from_cents(5000);       // $50.00
//! let qty = Quantity::from_millis(2_000);    // 2.000
//!
//! assert_eq!(price.times(qty).cents(), 10_000); // $100.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Scale factor between quantity thousandths and whole units.
const QUANTITY_SCALE: i64 = 1000;

/// Basis points in 100% (used for profit margins).
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals such as `subtotal − discount + tax` can dip
///   negative transiently and must not wrap
/// - **Single-field tuple struct**: zero-cost abstraction over i64
///
/// Every monetary value in the system flows through this type: product
/// prices, purchase costs, order subtotals, discounts, taxes, and profits.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use venda_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit amount by a three-decimal quantity, rounding
    /// half-up at the cent.
    ///
    /// Uses i128 intermediates so `price × quantity` cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use venda_core::money::{Money, Quantity};
    ///
    /// // $9.99 × 0.333 = $3.32667 → $3.33
    /// let total = Money::from_cents(999).times(Quantity::from_millis(333));
    /// assert_eq!(total.cents(), 333);
    /// ```
    pub fn times(&self, qty: Quantity) -> Money {
        let raw = self.0 as i128 * qty.millis() as i128;
        let half = QUANTITY_SCALE as i128 / 2;
        // Round half away from zero so negative unit profits mirror
        // positive ones.
        let cents = if raw >= 0 {
            (raw + half) / QUANTITY_SCALE as i128
        } else {
            (raw - half) / QUANTITY_SCALE as i128
        };
        Money(cents as i64)
    }

    /// Expresses `self` as a fraction of `whole`, in basis points
    /// (10000 = 100%), rounding half-up. Returns 0 when `whole` is zero.
    ///
    /// ## Example
    /// ```rust
    /// use venda_core::money::Money;
    ///
    /// let profit = Money::from_cents(6000);     // $60.00
    /// let subtotal = Money::from_cents(16000);  // $160.00
    /// assert_eq!(profit.ratio_bps(subtotal), 3750); // 37.5%
    /// ```
    pub fn ratio_bps(&self, whole: Money) -> i64 {
        if whole.0 == 0 {
            return 0;
        }
        let raw = self.0 as i128 * BPS_SCALE;
        let denom = whole.0 as i128;
        ((raw + denom / 2) / denom) as i64
    }
}

/// Display implementation for diagnostics: `$10.99`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
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

// =============================================================================
// Quantity
// =============================================================================

/// A product quantity in thousandths of a unit (3 decimal places).
///
/// Covers both countable products (2 units = 2000 mills) and weighed or
/// measured ones (1.250 kg = 1250 mills). Stock levels use the same
/// representation, so stock checks compare like with like.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Quantity(millis)
    }

    /// Creates a quantity from whole units.
    ///
    /// ## Example
    /// ```rust
    /// use venda_core::money::Quantity;
    ///
    /// assert_eq!(Quantity::from_units(2).millis(), 2000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Quantity(units * QUANTITY_SCALE)
    }

    /// Returns the quantity in thousandths.
    #[inline]
    pub const fn millis(&self) -> i64 {
        self.0
    }

    /// Zero quantity.
    #[inline]
    pub const fn zero() -> Self {
        Quantity(0)
    }

    /// Checks if the quantity is strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

/// Displays the quantity as a decimal with trailing zeros trimmed:
/// `2`, `0.5`, `1.255`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / QUANTITY_SCALE;
        let frac = abs % QUANTITY_SCALE;
        if frac == 0 {
            write!(f, "{}{}", sign, whole)
        } else {
            let s = format!("{:03}", frac);
            write!(f, "{}{}.{}", sign, whole, s.trim_end_matches('0'))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
