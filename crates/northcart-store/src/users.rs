//! # User Accounts
//!
//! Registration, sign-in and the signed-in profile, persisted under the
//! `"users"` and `"currentUser"` keys.
//!
//! ## Password Storage - READ THIS
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Passwords are stored BASE64-ENCODED, which is plaintext-equivalent.    │
//! │                                                                         │
//! │  This reproduces the live store's behavior for data compatibility and   │
//! │  is NOT a security measure. Anyone who can read the backing store can   │
//! │  read every password. Real credential handling (argon2, server-side     │
//! │  sessions) is a documented follow-up, not something this layer claims   │
//! │  to provide.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Profile Merge
//! A checkout with non-empty contact fields updates the signed-in profile:
//! the storefront treats the checkout form as the freshest copy of the
//! customer's details.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use northcart_core::types::CustomerDetails;

use crate::error::{StoreError, StoreResult};
use crate::kv::{keys, KvStore};

/// Role string marking an account with admin panel access.
pub const ROLE_ADMIN: &str = "admin";
/// Default role for new registrations.
pub const ROLE_CUSTOMER: &str = "customer";

// =============================================================================
// Records
// =============================================================================

/// An account as persisted in the `"users"` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: Uuid,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Base64-encoded password. See the module docs.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub created_at: DateTime<Utc>,
}

fn default_role() -> String {
    ROLE_CUSTOMER.to_string()
}

impl StoredUser {
    /// The password-free view handed to callers.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            country: self.country.clone(),
            region: self.region.clone(),
            role: self.role.clone(),
        }
    }
}

/// The signed-in user as stored under `"currentUser"` - no password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl UserProfile {
    /// Whether this account may open the admin panel.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

// =============================================================================
// Accounts Repository
// =============================================================================

/// Repository over the `"users"` and `"currentUser"` keys.
#[derive(Clone)]
pub struct UserAccounts {
    store: Arc<dyn KvStore>,
}

impl UserAccounts {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        UserAccounts { store }
    }

    /// Registers a new account and signs it in.
    ///
    /// ## Errors
    /// - [`StoreError::DuplicateEmail`] when the email already has an account
    pub fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> StoreResult<UserProfile> {
        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let user = StoredUser {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: BASE64.encode(password),
            phone: String::new(),
            address: String::new(),
            country: String::new(),
            region: String::new(),
            role: ROLE_CUSTOMER.to_string(),
            created_at: Utc::now(),
        };
        let profile = user.profile();

        users.push(user);
        self.save_users(&users)?;
        self.set_current(&profile)?;

        info!(email, "account registered");
        Ok(profile)
    }

    /// Signs in with email and password.
    ///
    /// ## Errors
    /// - [`StoreError::InvalidCredentials`] for an unknown email OR a wrong
    ///   password - callers cannot distinguish the two
    pub fn authenticate(&self, email: &str, password: &str) -> StoreResult<UserProfile> {
        let users = self.load_users()?;
        let encoded = BASE64.encode(password);

        let user = users
            .iter()
            .find(|u| u.email == email && u.password == encoded)
            .ok_or(StoreError::InvalidCredentials)?;

        let profile = user.profile();
        self.set_current(&profile)?;
        info!(email, "signed in");
        Ok(profile)
    }

    /// The signed-in profile, if any. An unreadable stored profile is
    /// treated as signed-out.
    pub fn current_user(&self) -> StoreResult<Option<UserProfile>> {
        let Some(raw) = self.store.read(keys::CURRENT_USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, "stored currentUser is unreadable, treating as signed out");
                Ok(None)
            }
        }
    }

    /// Signs the current user out.
    pub fn logout(&self) -> StoreResult<()> {
        self.store.remove(keys::CURRENT_USER)
    }

    /// Saves edits to the signed-in user's profile (the account page).
    ///
    /// Writes both `"currentUser"` and the matching `"users"` entry. The
    /// email on file stays the sign-in identity even if edited here.
    ///
    /// ## Errors
    /// - [`StoreError::NotAuthenticated`] when nobody is signed in or the
    ///   profile belongs to a different account
    pub fn save_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let current = self.current_user()?.ok_or(StoreError::NotAuthenticated)?;
        if current.id != profile.id {
            return Err(StoreError::NotAuthenticated);
        }

        let mut users = self.load_users()?;
        if let Some(user) = users.iter_mut().find(|u| u.id == profile.id) {
            user.first_name = profile.first_name.clone();
            user.last_name = profile.last_name.clone();
            user.email = profile.email.clone();
            user.phone = profile.phone.clone();
            user.address = profile.address.clone();
            user.country = profile.country.clone();
            user.region = profile.region.clone();
            self.save_users(&users)?;
        }
        self.set_current(profile)
    }

    /// Overwrites the signed-in profile's contact fields with the non-empty
    /// fields from a checkout form.
    ///
    /// A guest checkout (no signed-in user) is a no-op, not an error. The
    /// update is written to both `"currentUser"` and the account entry in
    /// `"users"`.
    pub fn merge_checkout_details(&self, details: &CustomerDetails) -> StoreResult<()> {
        let Some(mut profile) = self.current_user()? else {
            return Ok(());
        };

        merge_field(&mut profile.first_name, &details.first_name);
        merge_field(&mut profile.last_name, &details.last_name);
        merge_field(&mut profile.email, &details.email);
        merge_field(&mut profile.phone, &details.phone);
        merge_field(&mut profile.address, &details.address);
        merge_field(&mut profile.country, &details.country);
        merge_field(&mut profile.region, &details.region);

        let mut users = self.load_users()?;
        if let Some(user) = users.iter_mut().find(|u| u.id == profile.id) {
            user.first_name = profile.first_name.clone();
            user.last_name = profile.last_name.clone();
            user.email = profile.email.clone();
            user.phone = profile.phone.clone();
            user.address = profile.address.clone();
            user.country = profile.country.clone();
            user.region = profile.region.clone();
            self.save_users(&users)?;
        }

        self.set_current(&profile)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn set_current(&self, profile: &UserProfile) -> StoreResult<()> {
        self.store
            .write(keys::CURRENT_USER, &serde_json::to_string(profile)?)
    }

    /// Loads the account list. Missing, unparsable, or non-array values
    /// load as empty, same policy as the order ledger.
    fn load_users(&self) -> StoreResult<Vec<StoredUser>> {
        let Some(raw) = self.store.read(keys::USERS)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => Ok(entries
                .into_iter()
                .filter_map(|entry| match serde_json::from_value(entry) {
                    Ok(user) => Some(user),
                    Err(e) => {
                        warn!(error = %e, "unreadable account entry dropped");
                        None
                    }
                })
                .collect()),
            Ok(_) | Err(_) => {
                warn!("stored users value is not an array, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn save_users(&self, users: &[StoredUser]) -> StoreResult<()> {
        self.store
            .write(keys::USERS, &serde_json::to_string(users)?)
    }
}

fn merge_field(target: &mut String, source: &str) {
    if !source.trim().is_empty() {
        *target = source.to_string();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn accounts() -> UserAccounts {
        UserAccounts::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_register_signs_in() {
        let accounts = accounts();
        let profile = accounts
            .register("Ada", "Lovelace", "ada@example.com", "hunter2")
            .unwrap();

        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.role, ROLE_CUSTOMER);
        assert!(!profile.is_admin());

        let current = accounts.current_user().unwrap().unwrap();
        assert_eq!(current.id, profile.id);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let accounts = accounts();
        accounts
            .register("Ada", "Lovelace", "ada@example.com", "hunter2")
            .unwrap();

        let err = accounts
            .register("Imposter", "L", "ada@example.com", "other")
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
    }

    #[test]
    fn test_authenticate() {
        let accounts = accounts();
        accounts
            .register("Ada", "Lovelace", "ada@example.com", "hunter2")
            .unwrap();
        accounts.logout().unwrap();
        assert!(accounts.current_user().unwrap().is_none());

        let profile = accounts.authenticate("ada@example.com", "hunter2").unwrap();
        assert_eq!(profile.first_name, "Ada");
        assert!(accounts.current_user().unwrap().is_some());
    }

    #[test]
    fn test_bad_credentials_are_indistinguishable() {
        let accounts = accounts();
        accounts
            .register("Ada", "Lovelace", "ada@example.com", "hunter2")
            .unwrap();

        let wrong_password = accounts
            .authenticate("ada@example.com", "wrong")
            .unwrap_err();
        let unknown_email = accounts
            .authenticate("nobody@example.com", "hunter2")
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn test_password_stored_encoded_not_plaintext() {
        let store = Arc::new(MemoryStore::new());
        let accounts = UserAccounts::new(store.clone());
        accounts
            .register("Ada", "Lovelace", "ada@example.com", "hunter2")
            .unwrap();

        let raw = store.read(keys::USERS).unwrap().unwrap();
        assert!(!raw.contains("hunter2"));
        assert!(raw.contains(&BASE64.encode("hunter2")));
        // currentUser never carries the password at all
        let current = store.read(keys::CURRENT_USER).unwrap().unwrap();
        assert!(!current.contains("password"));
    }

    #[test]
    fn test_merge_checkout_details() {
        let accounts = accounts();
        accounts
            .register("Ada", "Lovelace", "ada@example.com", "hunter2")
            .unwrap();

        let details = CustomerDetails {
            first_name: "Ada".to_string(),
            last_name: String::new(), // empty fields leave the profile alone
            email: "ada@example.com".to_string(),
            phone: "416-555-0199".to_string(),
            address: "1 Queen St".to_string(),
            country: "CA".to_string(),
            region: "Ontario".to_string(),
        };
        accounts.merge_checkout_details(&details).unwrap();

        let profile = accounts.current_user().unwrap().unwrap();
        assert_eq!(profile.last_name, "Lovelace");
        assert_eq!(profile.phone, "416-555-0199");
        assert_eq!(profile.region, "Ontario");

        // The merge survives a sign-out / sign-in cycle (it hit "users" too)
        accounts.logout().unwrap();
        let profile = accounts.authenticate("ada@example.com", "hunter2").unwrap();
        assert_eq!(profile.address, "1 Queen St");
    }

    #[test]
    fn test_save_profile_requires_matching_session() {
        let accounts = accounts();
        let mut profile = accounts
            .register("Ada", "Lovelace", "ada@example.com", "hunter2")
            .unwrap();

        profile.address = "2 King St".to_string();
        accounts.save_profile(&profile).unwrap();
        assert_eq!(
            accounts.current_user().unwrap().unwrap().address,
            "2 King St"
        );

        accounts.logout().unwrap();
        assert!(matches!(
            accounts.save_profile(&profile),
            Err(StoreError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_merge_without_session_is_noop() {
        let accounts = accounts();
        let details = CustomerDetails {
            email: "guest@example.com".to_string(),
            ..Default::default()
        };
        accounts.merge_checkout_details(&details).unwrap();
        assert!(accounts.current_user().unwrap().is_none());
    }

    #[test]
    fn test_admin_role_gate() {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            first_name: "Root".to_string(),
            last_name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            country: String::new(),
            region: String::new(),
            role: ROLE_ADMIN.to_string(),
        };
        assert!(profile.is_admin());
    }
}
