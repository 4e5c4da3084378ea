//! # Shopping Cart
//!
//! The in-memory cart container the storefront session mutates.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Cart Lifecycle                                 │
//! │                                                                         │
//! │  add_item("pad-a", ...) ──► existing id? merge quantities              │
//! │                             new id?      push a frozen line             │
//! │                                                                         │
//! │  update_quantity(id, 0) ──► removes the line entirely                   │
//! │  remove_item(id)        ──► removes the line                            │
//! │                                                                         │
//! │  place order succeeds   ──► clear()                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items freeze the name and unit price at the moment of adding; later
//! catalog edits never reprice a cart.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart: an ordered list of line items, merged by product id.
///
/// Items keep their insertion order so the checkout summary renders
/// deterministically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// The line items, in the order they were first added.
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart, merging with an existing line by id.
    ///
    /// The name and unit price are frozen from the first add; a merge only
    /// bumps the quantity.
    ///
    /// ## Errors
    /// - [`CoreError::QuantityTooLarge`] when the requested or merged
    ///   quantity exceeds [`MAX_ITEM_QUANTITY`]
    /// - [`CoreError::CartTooLarge`] when a new line would exceed
    ///   [`MAX_CART_ITEMS`] unique items
    pub fn add_item(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price_cents: i64,
        quantity: i64,
    ) -> CoreResult<()> {
        let id = id.into();

        if quantity < 1 || quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == id) {
            let merged = existing.quantity + quantity;
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = merged;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(LineItem {
            id,
            name: name.into(),
            unit_price_cents,
            quantity,
        });
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity of zero (or less) removes the line, matching the cart
    /// view's stepper reaching zero.
    ///
    /// ## Errors
    /// - [`CoreError::ItemNotInCart`] when no line has the id
    /// - [`CoreError::QuantityTooLarge`] above [`MAX_ITEM_QUANTITY`]
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> CoreResult<()> {
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CoreError::ItemNotInCart(id.to_string()))?;

        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line item by id.
    ///
    /// ## Errors
    /// - [`CoreError::ItemNotInCart`] when no line has the id
    pub fn remove_item(&mut self, id: &str) -> CoreResult<()> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CoreError::ItemNotInCart(id.to_string()))?;
        self.items.remove(pos);
        Ok(())
    }

    /// Empties the cart. Called after a successful order.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Pre-tax subtotal in the base currency (CAD cents).
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }

    /// Total unit count across all lines (the cart badge number).
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Whether the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
