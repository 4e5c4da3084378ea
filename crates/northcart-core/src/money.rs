//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The original storefront priced carts in JavaScript floats:             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Subtotals, taxes, shipping, discounts and totals are all i64 cents.  │
//! │    Percent rates (tax, discount, FX) are integer basis points, and      │
//! │    every rate application rounds once, explicitly.                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use northcart_core::money::{FxRate, Money};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // $21.98
//! let total = price + Money::from_cents(500);    // $15.99
//!
//! // Fixed-rate conversion (CAD → USD at 1.35)
//! let usd = Money::from_cents(2000).convert(FxRate::from_bps(13_500));
//! assert_eq!(usd.cents(), 1481); // $14.81
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discount lines
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Currency-agnostic**: the same cents flow through CAD and USD math;
///   the [`crate::types::Currency`] travels next to the amount, not in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use northcart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
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

    /// Calculates tax on this amount at the given rate.
    ///
    /// ## Implementation
    /// Integer math with explicit rounding: `(amount * bps + 5000) / 10000`.
    /// The +5000 rounds the half-cent up (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use northcart_core::money::Money;
    /// use northcart_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(2000);  // $20.00
    /// let hst = TaxRate::from_bps(1300);       // 13% (Ontario HST)
    ///
    /// assert_eq!(subtotal.calculate_tax(hst).cents(), 260); // $2.60
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 intermediate prevents overflow on large amounts
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Returns the given percentage of this amount, in basis points.
    ///
    /// Used for the promo discount line: the discount is a percentage of the
    /// converted subtotal, computed for display.
    ///
    /// ## Example
    /// ```rust
    /// use northcart_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10_000); // $100.00
    /// assert_eq!(subtotal.percentage_of(1000).cents(), 1000); // 10% = $10.00
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }

    /// Converts this amount by dividing by a fixed FX rate.
    ///
    /// ## Direction
    /// The store's base currency is CAD and the rate is quoted as USD→CAD
    /// (13500 bps = 1.35 CAD per USD), so the USD amount is
    /// `cad_cents / rate` with a single rounding step.
    ///
    /// ## Example
    /// ```rust
    /// use northcart_core::money::{FxRate, Money};
    ///
    /// let cad = Money::from_cents(2000); // $20.00 CAD
    /// let usd = cad.convert(FxRate::from_bps(13_500));
    /// assert_eq!(usd.cents(), 1481);     // $14.81 USD
    /// ```
    pub fn convert(&self, rate: FxRate) -> Money {
        let bps = rate.bps() as i128;
        let converted = (self.0 as i128 * 10000 + bps / 2) / bps;
        Money::from_cents(converted as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use northcart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000); // $10.00
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 2000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// FX Rate
// =============================================================================

/// A fixed currency conversion rate in basis points.
///
/// ## Why Basis Points?
/// 10000 bps = 1.0, so 13500 bps = 1.35. Keeping the rate as an integer
/// keeps the whole pricing path float-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxRate(u32);

impl FxRate {
    /// Creates an FX rate from basis points (13500 = 1.35).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        FxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and email bodies. The currency symbol prefix
/// ("CAD $" vs "$") is supplied by [`crate::types::Currency`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
