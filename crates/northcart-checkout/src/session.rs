//! # Checkout Session State
//!
//! The mutable state one browsing session carries: the cart and the active
//! promo code, shared behind a mutex so UI handlers can clone the handle.
//!
//! Lock scope discipline: callers get closure-scoped access and the lock is
//! released when the closure returns. Never hold it across an await.

use std::sync::{Arc, Mutex};

use northcart_core::cart::Cart;
use northcart_core::error::CoreResult;
use northcart_core::promo::{PromoLookup, PromoState};
use northcart_core::types::PromoCode;

/// Inner session state guarded by the mutex.
#[derive(Debug, Default)]
struct SessionInner {
    cart: Cart,
    promo: PromoState,
}

/// Shared handle to one session's cart and promo state.
#[derive(Clone, Default)]
pub struct CheckoutSession {
    inner: Arc<Mutex<SessionInner>>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        CheckoutSession::default()
    }

    /// Read-only access to the cart.
    pub fn with_cart<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        let inner = self.inner.lock().expect("session mutex poisoned");
        f(&inner.cart)
    }

    /// Mutable access to the cart.
    pub fn with_cart_mut<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut inner = self.inner.lock().expect("session mutex poisoned");
        f(&mut inner.cart)
    }

    /// Applies a promo code against a lookup, replacing the active one.
    pub fn apply_promo(&self, code: &str, lookup: &dyn PromoLookup) -> CoreResult<PromoCode> {
        let mut inner = self.inner.lock().expect("session mutex poisoned");
        inner.promo.apply(code, lookup).map(PromoCode::clone)
    }

    /// Clears the active promo code.
    pub fn remove_promo(&self) {
        let mut inner = self.inner.lock().expect("session mutex poisoned");
        inner.promo.remove();
    }

    /// The active promo code, if any.
    pub fn active_promo(&self) -> Option<PromoCode> {
        let inner = self.inner.lock().expect("session mutex poisoned");
        inner.promo.active().cloned()
    }

    /// Snapshot of the cart and active promo in one lock acquisition,
    /// so checkout prices a consistent pair.
    pub fn snapshot(&self) -> (Cart, Option<PromoCode>) {
        let inner = self.inner.lock().expect("session mutex poisoned");
        (inner.cart.clone(), inner.promo.active().cloned())
    }

    /// Empties the cart and drops the promo. Called after a placed order.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("session mutex poisoned");
        inner.cart.clear();
        inner.promo.remove();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use northcart_core::promo::StaticPromoList;

    #[test]
    fn test_clones_share_state() {
        let session = CheckoutSession::new();
        let handle = session.clone();

        session
            .with_cart_mut(|cart| cart.add_item("pad-a", "Pad A", 1000, 2))
            .unwrap();
        assert_eq!(handle.with_cart(|cart| cart.total_quantity()), 2);
    }

    #[test]
    fn test_snapshot_pairs_cart_and_promo() {
        let session = CheckoutSession::new();
        session
            .with_cart_mut(|cart| cart.add_item("pad-a", "Pad A", 1000, 1))
            .unwrap();
        session
            .apply_promo("WELCOME10", &StaticPromoList::standard())
            .unwrap();

        let (cart, promo) = session.snapshot();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(promo.unwrap().code, "WELCOME10");
    }

    #[test]
    fn test_invalid_promo_keeps_previous() {
        let session = CheckoutSession::new();
        let lookup = StaticPromoList::standard();
        session.apply_promo("SAVE20", &lookup).unwrap();

        assert!(session.apply_promo("NOPE", &lookup).is_err());
        assert_eq!(session.active_promo().unwrap().code, "SAVE20");
    }

    #[test]
    fn test_reset() {
        let session = CheckoutSession::new();
        session
            .with_cart_mut(|cart| cart.add_item("pad-a", "Pad A", 1000, 1))
            .unwrap();
        session
            .apply_promo("WELCOME10", &StaticPromoList::standard())
            .unwrap();

        session.reset();
        assert!(session.with_cart(|cart| cart.is_empty()));
        assert!(session.active_promo().is_none());
    }
}
