//! # Money Module
//!
//! Provides the `Money` type for the amounts shown in the order table.
//!
//! ## Rounding Only At Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  Row VAT amount  (12 × 3 / 100) × 21 = 7.56     ──► bucket[21] += 7.56  │
//! │  Row subtotal    36 + 7.56           = 43.56    ──► total_inc += 43.56  │
//! │                                                                         │
//! │  Buckets and totals accumulate UNROUNDED amounts, so                   │
//! │    Σ bucket amounts == Σ row VAT amounts   (exactly, before display)    │
//! │                                                                         │
//! │  Only `format()` rounds, to 2 decimals: "€ 7.56"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup prices arrive as arbitrary JSON numbers (fractional costs and
//! rates), so amounts are kept as `f64`. A `Money` value is always finite:
//! `Money::new` refuses NaN and infinities, which is how a row with missing
//! data is kept out of the totals.
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::money::Money;
//!
//! let vat = Money::new(7.56).unwrap();
//! let total = vat + Money::new(36.0).unwrap();
//! assert_eq!(total.format("€"), "€ 43.56");
//!
//! assert!(Money::new(f64::NAN).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::DEFAULT_CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A finite currency amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value, or `None` when the amount is NaN or infinite.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    ///
    /// assert_eq!(Money::new(12.5).unwrap().amount(), 12.5);
    /// assert!(Money::new(f64::INFINITY).is_none());
    /// ```
    #[inline]
    pub fn new(amount: f64) -> Option<Self> {
        amount.is_finite().then_some(Money(amount))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the unrounded amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Returns the amount rounded to whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    ///
    /// assert_eq!(Money::new(7.56).unwrap().cents(), 756);
    /// assert_eq!(Money::new(-1.005).unwrap().cents(), -100);
    /// ```
    #[inline]
    pub fn cents(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    /// Formats the amount as `"{symbol} {amount:.2}"`.
    ///
    /// Amounts that round to zero are shown without a sign.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    ///
    /// assert_eq!(Money::new(1.2).unwrap().format("€"), "€ 1.20");
    /// assert_eq!(Money::new(-0.001).unwrap().format("€"), "€ 0.00");
    /// ```
    pub fn format(&self, symbol: &str) -> String {
        let amount = if self.cents() == 0 { 0.0 } else { self.0 };
        format!("{} {:.2}", symbol, amount)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_CURRENCY_SYMBOL))
    }
}

/// Default money is zero.
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
