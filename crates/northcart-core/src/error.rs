//! # Error Types
//!
//! Domain-specific error types for northcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  northcart-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Checkout input validation failures             │
//! │                                                                         │
//! │  northcart-store errors (separate crate)                               │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  northcart-checkout errors (orchestration)                             │
//! │  └── CheckoutError    - What the view layer sees                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CheckoutError → user message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, field, id)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is fatal: every variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart has no items, so there is nothing to price or submit.
    #[error("Cart is empty")]
    EmptyCart,

    /// Promo code was not recognized by the lookup collaborator.
    ///
    /// ## When This Occurs
    /// - User typo
    /// - Expired or retired code
    ///
    /// The promo state is left unchanged; the caller shows "invalid code".
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// Cart has exceeded maximum allowed unique items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Referenced line item is not in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout input validation errors.
///
/// These errors occur when the submitted form doesn't meet requirements.
/// They block submission and are reported to the user; nothing is persisted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A required selection (shipping method, country, region) is missing.
    #[error("Please select a {selection}")]
    MissingSelection { selection: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., a malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The region does not belong to the selected country.
    ///
    /// ## When This Occurs
    /// Should be unreachable through the UI (changing country clears the
    /// region), but a stale or hand-built request can still carry a
    /// mismatched pair.
    #[error("{region} is not a region of {country}")]
    RegionMismatch { region: String, country: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPromoCode("SAVE99".to_string());
        assert_eq!(err.to_string(), "Invalid promo code: SAVE99");

        let err = CoreError::CartTooLarge { max: 100 };
        assert_eq!(err.to_string(), "Cart cannot have more than 100 items");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::MissingSelection {
            selection: "shipping method".to_string(),
        };
        assert_eq!(err.to_string(), "Please select a shipping method");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "address".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
