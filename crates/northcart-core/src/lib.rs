//! # northcart-core: Pure Business Logic for the Northcart Storefront
//!
//! This crate is the **heart** of Northcart. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Northcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  View Layer (external)                          │   │
//! │  │   Product pages ──► Cart UI ──► Checkout form ──► Admin table   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain function calls                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  northcart-checkout                             │   │
//! │  │    place_order, admin filters, email notifications              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ northcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐  │   │
//! │  │  │  money  │ │ locale  │ │ pricing │ │  promo  │ │   cart   │  │   │
//! │  │  │  Money  │ │ tax/    │ │ engine  │ │  state  │ │ LineItem │  │   │
//! │  │  │  FxRate │ │ shipping│ │         │ │ +lookup │ │          │  │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              northcart-store (Persistence Layer)                │   │
//! │  │           Key-value port, order ledger, user accounts           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Order, Locale, PromoCode, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`locale`] - Static tax and shipping tables for CA/US
//! - [`pricing`] - The pricing engine: cart + locale + shipping + promo → totals
//! - [`promo`] - Promo code state and the injectable validation lookup
//! - [`cart`] - The shopping cart container
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout form validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use northcart_core::cart::Cart;
//! use northcart_core::pricing::compute_order_pricing;
//! use northcart_core::types::{Country, Locale};
//!
//! let mut cart = Cart::new();
//! cart.add_item("pad-a", "Pad A", 1000, 2).unwrap(); // 2 × $10.00
//!
//! let locale = Locale::new(Country::Ca, "Ontario");
//! let pricing = compute_order_pricing(&cart.items, Some(&locale), "standard", None);
//!
//! // Ontario is 13% HST: $20.00 + $2.60 tax + $5.00 shipping
//! assert_eq!(pricing.total_cents, 2760);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod locale;
pub mod money;
pub mod pricing;
pub mod promo;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use northcart_core::Money` instead of
// `use northcart_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::{FxRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed USD→CAD conversion rate in basis points (13500 = 1.35).
///
/// ## Known Limitation
/// This is a compile-time constant, not a live exchange rate. US subtotals
/// are derived by dividing the CAD subtotal by this rate. Replacing it with
/// a rate feed is out of scope for the current store.
pub const USD_TO_CAD: FxRate = FxRate::from_bps(13_500);

/// Maximum unique line items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Length of a generated order token (uppercase alphanumeric).
///
/// Collision probability over 36^9 tokens is treated as negligible; the
/// ledger does not re-check new ids against existing entries.
pub const ORDER_ID_LEN: usize = 9;
