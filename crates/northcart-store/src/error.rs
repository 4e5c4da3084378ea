//! # Store Error Types
//!
//! Persistence-layer errors. Domain errors stay in northcart-core; this
//! enum covers what can go wrong between a repository and its backing
//! key-value store.

use thiserror::Error;

/// Persistence layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure in the JSON-file backend.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value we are about to WRITE failed to serialize.
    ///
    /// Note the asymmetry: unreadable STORED values are tolerated and
    /// defaulted (see the ledger), never surfaced as this error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Registration with an email that already has an account.
    #[error("An account already exists for {0}")]
    DuplicateEmail(String),

    /// Sign-in with an unknown email or a wrong password.
    ///
    /// One variant for both cases so the caller cannot tell an attacker
    /// which half was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An operation that needs a signed-in user found none.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Backend-specific failure that is not an I/O error.
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::DuplicateEmail("a@b.co".to_string());
        assert_eq!(err.to_string(), "An account already exists for a@b.co");
        assert_eq!(
            StoreError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
