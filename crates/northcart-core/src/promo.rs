//! # Promo Codes
//!
//! Promo code validation and the per-session promo state.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Promo Code Flow                                  │
//! │                                                                         │
//! │  user types "WELCOME10"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PromoState::apply(code, lookup)                                        │
//! │       │                                                                 │
//! │       ├── lookup hit  ──► state holds the PromoCode, old one replaced   │
//! │       │                                                                 │
//! │       └── lookup miss ──► InvalidPromoCode, state UNCHANGED             │
//! │                           (a bad entry never clears a good one)         │
//! │                                                                         │
//! │  The active code feeds the pricing engine's display-only discount       │
//! │  line and is frozen onto the order at checkout.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching is case-insensitive on the lookup side; the state stores the
//! canonical definition, not the user's casing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::PromoCode;

// =============================================================================
// Lookup Port
// =============================================================================

/// Resolves a user-entered token to a promo definition.
///
/// The storefront ships a static list; the trait exists so tests and a
/// future backend can substitute their own source.
pub trait PromoLookup {
    /// Returns the canonical definition for a token, if the token is valid.
    fn find(&self, code: &str) -> Option<PromoCode>;
}

/// A fixed in-memory promo list.
#[derive(Debug, Clone, Default)]
pub struct StaticPromoList {
    codes: Vec<PromoCode>,
}

impl StaticPromoList {
    pub fn new(codes: Vec<PromoCode>) -> Self {
        StaticPromoList { codes }
    }

    /// The store's standing promotions.
    pub fn standard() -> Self {
        StaticPromoList::new(vec![
            PromoCode::new("WELCOME10", 10),
            PromoCode::new("SAVE20", 20),
        ])
    }
}

impl PromoLookup for StaticPromoList {
    fn find(&self, code: &str) -> Option<PromoCode> {
        self.codes
            .iter()
            .find(|promo| promo.code.eq_ignore_ascii_case(code.trim()))
            .cloned()
    }
}

// =============================================================================
// Promo State
// =============================================================================

/// The session's active promo code, at most one at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoState {
    #[serde(default)]
    active: Option<PromoCode>,
}

impl PromoState {
    /// Creates a state with no active code.
    pub fn new() -> Self {
        PromoState::default()
    }

    /// Validates a token against the lookup and makes it the active code.
    ///
    /// Replaces any previously active code on success. On an invalid token
    /// the state is left unchanged.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidPromoCode`] when the lookup has no match
    pub fn apply(&mut self, code: &str, lookup: &dyn PromoLookup) -> CoreResult<&PromoCode> {
        let promo = lookup
            .find(code)
            .ok_or_else(|| CoreError::InvalidPromoCode(code.trim().to_string()))?;
        Ok(self.active.insert(promo))
    }

    /// Clears the active code.
    pub fn remove(&mut self) {
        self.active = None;
    }

    /// The currently active code, if any.
    pub fn active(&self) -> Option<&PromoCode> {
        self.active.as_ref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
