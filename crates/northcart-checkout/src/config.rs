//! Store-level configuration for the orchestration layer.
//!
//! Covers the values that vary between deployments: the store's display
//! name and the addresses notification emails go to and from. Everything
//! else (tax tables, shipping tables, promo list) is compiled in.

use serde::{Deserialize, Serialize};

/// Deployment configuration for checkout and notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Display name used in email subjects and bodies.
    pub store_name: String,

    /// Where the new-order notification goes.
    pub admin_email: String,

    /// The reply-to address shown to customers.
    pub support_email: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Northcart".to_string(),
            admin_email: "orders@northcart.example".to_string(),
            support_email: "support@northcart.example".to_string(),
        }
    }
}

impl StoreConfig {
    /// Reads overrides from the environment, falling back to defaults.
    ///
    /// Recognized variables: `NORTHCART_STORE_NAME`, `NORTHCART_ADMIN_EMAIL`,
    /// `NORTHCART_SUPPORT_EMAIL`.
    pub fn from_env() -> Self {
        let defaults = StoreConfig::default();
        StoreConfig {
            store_name: std::env::var("NORTHCART_STORE_NAME").unwrap_or(defaults.store_name),
            admin_email: std::env::var("NORTHCART_ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            support_email: std::env::var("NORTHCART_SUPPORT_EMAIL")
                .unwrap_or(defaults.support_email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.store_name, "Northcart");
        assert!(config.admin_email.contains('@'));
    }
}
