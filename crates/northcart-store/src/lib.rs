//! # northcart-store: Persistence Layer for Northcart
//!
//! Everything persisted lives behind a whole-value key/value port: a small
//! set of named keys, each holding one JSON document that is read and
//! rewritten in full.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     northcart-store                                     │
//! │                                                                         │
//! │  ┌──────────────┐      ┌───────────────────────────────────────────┐   │
//! │  │    Store     │      │              Repositories                 │   │
//! │  │  ──────────  │      │                                           │   │
//! │  │  Arc<dyn     │─────►│  orders() ──► OrderLedger                 │   │
//! │  │   KvStore>   │      │               append / list / patch       │   │
//! │  │              │      │                                           │   │
//! │  │              │─────►│  users()  ──► UserAccounts                │   │
//! │  └──────┬───────┘      │               register / sign-in / merge  │   │
//! │         │              └───────────────────────────────────────────┘   │
//! │         ▼                                                               │
//! │  ┌──────────────┐  ┌──────────────┐                                    │
//! │  │ MemoryStore  │  │JsonFileStore │   backends (pick one at startup)   │
//! │  └──────────────┘  └──────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use northcart_store::Store;
//!
//! let store = Store::in_memory();
//! let orders = store.orders().list_all().unwrap();
//! assert!(orders.is_empty());
//! ```

pub mod error;
pub mod kv;
pub mod ledger;
pub mod users;

pub use error::{StoreError, StoreResult};
pub use kv::{keys, JsonFileStore, KvStore, MemoryStore};
pub use ledger::{generate_order_id, OrderLedger};
pub use users::{StoredUser, UserAccounts, UserProfile, ROLE_ADMIN, ROLE_CUSTOMER};

use std::path::PathBuf;
use std::sync::Arc;

/// Handle to the backing store, cloned freely across the app.
///
/// Construct once at startup with [`Store::in_memory`] or
/// [`Store::json_files`], then hand out repositories.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KvStore>,
}

impl Store {
    /// Store over any backend.
    pub fn new(backend: Arc<dyn KvStore>) -> Self {
        Store { backend }
    }

    /// Ephemeral in-memory store (tests, previews).
    pub fn in_memory() -> Self {
        Store::new(Arc::new(MemoryStore::new()))
    }

    /// Durable store writing one JSON file per key under `root`.
    pub fn json_files(root: impl Into<PathBuf>) -> Self {
        Store::new(Arc::new(JsonFileStore::new(root)))
    }

    /// The order history repository.
    pub fn orders(&self) -> OrderLedger {
        OrderLedger::new(self.backend.clone())
    }

    /// The account repository.
    pub fn users(&self) -> UserAccounts {
        UserAccounts::new(self.backend.clone())
    }
}
