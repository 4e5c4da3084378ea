//! # northcart-checkout: Orchestration Layer for Northcart
//!
//! The thin layer the view code calls. Domain math lives in
//! northcart-core; persistence lives in northcart-store; this crate wires
//! them together and adds the two concerns neither owns: email
//! notifications and the admin role gate.
//!
//! ## Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      northcart-checkout                                 │
//! │                                                                         │
//! │  CheckoutSession   shared cart + promo state for one session            │
//! │  CheckoutService   place_order: validate ► price ► persist ► notify     │
//! │  AdminPanel        role-gated order table (search/status/date filters)  │
//! │  EmailNotifier     async delivery port + HTML rendering                 │
//! │  StoreConfig       store name and notification addresses               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use northcart_checkout::{CheckoutService, CheckoutSession, LoggingNotifier, StoreConfig};
//! use northcart_store::Store;
//!
//! let service = CheckoutService::new(Store::in_memory(), LoggingNotifier, StoreConfig::default());
//! let session = CheckoutSession::new();
//! session.with_cart_mut(|cart| cart.add_item("pad-a", "Pad A", 1000, 2)).unwrap();
//! // service.place_order(&session, &form).await drives the rest
//! # let _ = service.config();
//! ```

pub mod admin;
pub mod checkout;
pub mod config;
pub mod email;
pub mod error;
pub mod session;

pub use admin::{AdminPanel, DateRange, OrderFilter};
pub use checkout::{CheckoutForm, CheckoutService, PlacedOrder};
pub use config::StoreConfig;
pub use email::{EmailError, EmailMessage, EmailNotifier, LoggingNotifier};
pub use error::{CheckoutError, CheckoutResult};
pub use session::CheckoutSession;
