//! # Checkout Error Types
//!
//! The error surface the view layer sees. Lower-layer errors convert in via
//! `From`; every variant's Display text is suitable to show a user.

use thiserror::Error;

use northcart_core::CoreError;
use northcart_store::StoreError;

/// Orchestration layer errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Domain rule or validation failure (empty cart, bad form field, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failure while placing the order or loading state.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The admin panel was opened without an admin account.
    #[error("Admin access required")]
    AdminRequired,
}

impl From<northcart_core::ValidationError> for CheckoutError {
    fn from(err: northcart_core::ValidationError) -> Self {
        CheckoutError::Core(err.into())
    }
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;
