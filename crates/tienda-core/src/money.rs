//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A sales report summing thousands of float totals drifts by cents.     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices, line totals, order totals and revenue are all i64 cents.    │
//! │    Sums are exact; report revenue only clamps past i64::MAX.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two kinds of addition exist. A single order is bounded by the price,
//! quantity and cart-size limits, so `Sum` over its lines is exact. Revenue
//! accumulated across orders has no such bound and uses
//! [`Money::saturating_add`].

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;
use ts_rs::TS;

/// A monetary value in the smallest currency unit (cents).
///
/// ```text
/// Product.price_cents ──► OrderLine.unit_price_cents ──► OrderLine.line_total_cents
///                                                              │
///                                   Order.total_cents ◄────────┘
///                                          │
///                                          ▼
///                          SalesSummary.total_revenue_cents
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000); // $10.00
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 3000); // $30.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Adds, clamping at `i64::MIN` / `i64::MAX` instead of overflowing.
    ///
    /// ```rust
    /// use tienda_core::money::Money;
    ///
    /// let near_max = Money::from_cents(i64::MAX - 1);
    /// assert_eq!(near_max.saturating_add(Money::from_cents(5)).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Summing the line totals of one order.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::default(), Add::add)
    }
}
