//! # Key-Value Port
//!
//! The storage abstraction every repository sits on: named string keys
//! holding whole JSON documents, read and rewritten in full.
//!
//! ## Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Whole-Value Storage                               │
//! │                                                                         │
//! │  "orders"      ──► JSON array of every order ever placed                │
//! │  "users"       ──► JSON array of registered accounts                    │
//! │  "currentUser" ──► JSON object, the signed-in profile                   │
//! │  "lastOrder"   ──► JSON object, the most recent confirmation            │
//! │                                                                         │
//! │  No partial updates, no queries, no indexes. A change to one order      │
//! │  rewrites the whole "orders" value. Single-session model: no cross-     │
//! │  process locking.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two backends ship: [`MemoryStore`] for tests and [`JsonFileStore`] for
//! durable local state (one file per key).

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Well-Known Keys
// =============================================================================

/// Storage keys used by the repositories.
pub mod keys {
    /// The full order history (JSON array).
    pub const ORDERS: &str = "orders";
    /// The registered account list (JSON array).
    pub const USERS: &str = "users";
    /// The signed-in user's profile (JSON object).
    pub const CURRENT_USER: &str = "currentUser";
    /// The most recently placed order (JSON object).
    pub const LAST_ORDER: &str = "lastOrder";
}

// =============================================================================
// The Port
// =============================================================================

/// Whole-value key/value storage.
///
/// Implementations must be safe to share behind an `Arc` across the
/// repositories that hold them.
pub trait KvStore: Send + Sync {
    /// Reads the raw value under a key, `None` when the key is absent.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes (or replaces) the value under a key.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Whether the key currently holds a value.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// HashMap-backed store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self.values.lock().expect("memory store mutex poisoned");
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.values.lock().expect("memory store mutex poisoned");
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut values = self.values.lock().expect("memory store mutex poisoned");
        values.remove(key);
        Ok(())
    }
}

// =============================================================================
// JSON-File Backend
// =============================================================================

/// One-file-per-key store rooted at a directory.
///
/// `"orders"` lives at `<root>/orders.json`, and so on. The directory is
/// created on first write.
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `root`. The directory need not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileStore { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        debug!(key, bytes = value.len(), "writing store key");
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.read("orders").unwrap(), None);
        assert!(!store.contains("orders").unwrap());

        store.write("orders", "[]").unwrap();
        assert_eq!(store.read("orders").unwrap().as_deref(), Some("[]"));
        assert!(store.contains("orders").unwrap());

        store.remove("orders").unwrap();
        assert_eq!(store.read("orders").unwrap(), None);
        // Removing again is fine
        store.remove("orders").unwrap();
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state"));

        // Missing directory reads as absent, not an error
        assert_eq!(store.read("orders").unwrap(), None);

        store.write("orders", r#"[{"orderId":"ABC123XYZ"}]"#).unwrap();
        assert!(store.contains("orders").unwrap());
        assert!(dir.path().join("state/orders.json").exists());

        store.remove("orders").unwrap();
        assert_eq!(store.read("orders").unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.write("lastOrder", "{\"a\":1}").unwrap();
        store.write("lastOrder", "{\"b\":2}").unwrap();
        assert_eq!(store.read("lastOrder").unwrap().as_deref(), Some("{\"b\":2}"));
    }
}
