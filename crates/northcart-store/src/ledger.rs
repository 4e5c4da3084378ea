//! # Order Ledger
//!
//! The persisted order history: one JSON array under the `"orders"` key,
//! read in full and rewritten in full on every change.
//!
//! ## Access Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Order Ledger                                    │
//! │                                                                         │
//! │  append(order)        read all ──► push one ──► rewrite all             │
//! │  list_all()           read all ──► normalize each entry                 │
//! │  list_by_email(e)     list_all ──► exact-match filter                   │
//! │  update_status(id,s)  read all ──► patch one ──► rewrite all            │
//! │                                                                         │
//! │  TOLERANT LOADING: the stored value not being an array, or an entry     │
//! │  missing fields, NEVER fails a read. Bad values default; the order      │
//! │  history degrades, it does not error.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;
use tracing::{debug, info, warn};

use northcart_core::types::{Order, OrderStatus, PaymentStatus};
use northcart_core::ORDER_ID_LEN;

use crate::error::StoreResult;
use crate::kv::{keys, KvStore};

// =============================================================================
// Order Id Generation
// =============================================================================

/// Generates a 9-character uppercase alphanumeric order token.
///
/// Tokens are NOT checked against existing ledger entries; the space is
/// large enough that the ledger accepts the residual collision odds.
pub fn generate_order_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ORDER_ID_LEN)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase()
}

// =============================================================================
// Ledger Repository
// =============================================================================

/// Repository over the `"orders"` and `"lastOrder"` keys.
#[derive(Clone)]
pub struct OrderLedger {
    store: Arc<dyn KvStore>,
}

impl OrderLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        OrderLedger { store }
    }

    /// Appends an order to the ledger and returns it as stored.
    ///
    /// An empty `order_id` is replaced with a freshly generated token;
    /// a caller-supplied id is kept as-is.
    pub fn append(&self, mut order: Order) -> StoreResult<Order> {
        if order.order_id.is_empty() {
            order.order_id = generate_order_id();
        }

        let mut entries = self.load_raw()?;
        entries.push(serde_json::to_value(&order)?);
        self.store
            .write(keys::ORDERS, &serde_json::to_string(&entries)?)?;

        info!(
            order_id = %order.order_id,
            total_cents = order.total_cents,
            "order appended to ledger"
        );
        Ok(order)
    }

    /// Loads every order, oldest first.
    ///
    /// Entries that cannot be repaired by defaulting are dropped with a
    /// warning rather than failing the whole read.
    pub fn list_all(&self) -> StoreResult<Vec<Order>> {
        let entries = self.load_raw()?;
        let orders = entries.into_iter().filter_map(normalize_entry).collect();
        Ok(orders)
    }

    /// Orders whose customer email exactly matches `email`.
    ///
    /// Matching is case-sensitive, mirroring how the account email was
    /// stored at checkout.
    pub fn list_by_email(&self, email: &str) -> StoreResult<Vec<Order>> {
        let orders = self
            .list_all()?
            .into_iter()
            .filter(|order| order.customer_details.email == email)
            .collect();
        Ok(orders)
    }

    /// Sets the fulfillment status of an order.
    ///
    /// An unknown id is a silent no-op (logged, not an error): the admin
    /// table the caller is rendering is already stale in that case.
    pub fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        self.patch(order_id, |order| order.status = status)
    }

    /// Sets the payment status of an order. Unknown ids are a silent no-op.
    pub fn update_payment_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> StoreResult<()> {
        self.patch(order_id, |order| order.payment_status = payment_status)
    }

    /// Stores the order confirmation shown after checkout.
    pub fn save_last_order(&self, order: &Order) -> StoreResult<()> {
        self.store
            .write(keys::LAST_ORDER, &serde_json::to_string(order)?)
    }

    /// The most recently placed order, if one is stored and readable.
    pub fn last_order(&self) -> StoreResult<Option<Order>> {
        let Some(raw) = self.store.read(keys::LAST_ORDER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(order) => Ok(Some(order)),
            Err(e) => {
                warn!(error = %e, "stored lastOrder is unreadable, treating as absent");
                Ok(None)
            }
        }
    }

    /// Removes the entire order history.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(keys::ORDERS)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// The stored array as raw JSON values.
    ///
    /// A missing key, unparsable JSON, or a non-array value all load as an
    /// empty ledger.
    fn load_raw(&self) -> StoreResult<Vec<Value>> {
        let Some(raw) = self.store.read(keys::ORDERS)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(other) => {
                warn!(
                    found = other_kind(&other),
                    "stored orders value is not an array, treating as empty"
                );
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(error = %e, "stored orders value is unparsable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn patch(&self, order_id: &str, apply: impl FnOnce(&mut Order)) -> StoreResult<()> {
        let mut orders = self.list_all()?;
        match orders.iter_mut().find(|o| o.order_id == order_id) {
            Some(order) => {
                apply(order);
                debug!(order_id, "order patched");
            }
            None => {
                warn!(order_id, "status update for unknown order id, ignoring");
                return Ok(());
            }
        }
        self.store
            .write(keys::ORDERS, &serde_json::to_string(&orders)?)
    }
}

fn other_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Entry Normalization
// =============================================================================

/// Repairs a stored ledger entry into an [`Order`].
///
/// Missing `orderId` gets a generated token; a missing or unreadable `date`
/// becomes now; every other field falls back to its default. Entries that
/// are not objects are dropped.
fn normalize_entry(entry: Value) -> Option<Order> {
    let Value::Object(mut map) = entry else {
        warn!("non-object ledger entry dropped");
        return None;
    };

    let has_id = map
        .get("orderId")
        .and_then(Value::as_str)
        .is_some_and(|id| !id.is_empty());
    if !has_id {
        let id = generate_order_id();
        warn!(generated = %id, "ledger entry missing orderId, assigning one");
        map.insert("orderId".to_string(), Value::String(id));
    }

    let has_date = map
        .get("date")
        .and_then(Value::as_str)
        .is_some_and(|d| d.parse::<chrono::DateTime<Utc>>().is_ok());
    if !has_date {
        map.insert(
            "date".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
    }

    match serde_json::from_value::<Order>(Value::Object(map)) {
        Ok(order) => Some(order),
        Err(e) => {
            warn!(error = %e, "unrepairable ledger entry dropped");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use northcart_core::types::{Currency, CustomerDetails};

    fn ledger() -> OrderLedger {
        OrderLedger::new(Arc::new(MemoryStore::new()))
    }

    fn sample_order(email: &str) -> Order {
        Order {
            order_id: String::new(),
            date: Utc::now(),
            items: Vec::new(),
            subtotal_cents: 2000,
            taxes: Default::default(),
            tax_cents: 260,
            shipping: None,
            discount: None,
            total_cents: 2760,
            currency: Currency::Cad,
            customer_details: CustomerDetails {
                email: email.to_string(),
                ..Default::default()
            },
            status: OrderStatus::Processing,
            payment_status: PaymentStatus::Paid,
        }
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_order_id();
        assert_eq!(id.len(), ORDER_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_append_assigns_id_and_persists() {
        let ledger = ledger();
        let stored = ledger.append(sample_order("a@b.co")).unwrap();
        assert_eq!(stored.order_id.len(), ORDER_ID_LEN);

        let all = ledger.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].order_id, stored.order_id);
        assert_eq!(all[0].total_cents, 2760);
    }

    #[test]
    fn test_append_preserves_order() {
        let ledger = ledger();
        let first = ledger.append(sample_order("a@b.co")).unwrap();
        let second = ledger.append(sample_order("c@d.co")).unwrap();

        let all = ledger.list_all().unwrap();
        assert_eq!(all[0].order_id, first.order_id);
        assert_eq!(all[1].order_id, second.order_id);
    }

    #[test]
    fn test_list_by_email_is_exact_and_case_sensitive() {
        let ledger = ledger();
        ledger.append(sample_order("ada@example.com")).unwrap();
        ledger.append(sample_order("Ada@example.com")).unwrap();
        ledger.append(sample_order("grace@example.com")).unwrap();

        let mine = ledger.list_by_email("ada@example.com").unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].customer_details.email, "ada@example.com");
    }

    #[test]
    fn test_update_status() {
        let ledger = ledger();
        let stored = ledger.append(sample_order("a@b.co")).unwrap();

        ledger
            .update_status(&stored.order_id, OrderStatus::Shipped)
            .unwrap();
        let all = ledger.list_all().unwrap();
        assert_eq!(all[0].status, OrderStatus::Shipped);
    }

    #[test]
    fn test_update_status_is_idempotent() {
        let ledger = ledger();
        let stored = ledger.append(sample_order("a@b.co")).unwrap();

        ledger
            .update_status(&stored.order_id, OrderStatus::Shipped)
            .unwrap();
        let after_first = ledger.list_all().unwrap();

        // Applying the same status again changes nothing
        ledger
            .update_status(&stored.order_id, OrderStatus::Shipped)
            .unwrap();
        let after_second = ledger.list_all().unwrap();

        assert_eq!(after_first, after_second);
        assert_eq!(after_second.len(), 1);
        assert_eq!(after_second[0].status, OrderStatus::Shipped);
    }

    #[test]
    fn test_update_status_unknown_id_is_noop() {
        let ledger = ledger();
        ledger.append(sample_order("a@b.co")).unwrap();

        // Does not error, does not change anything
        ledger
            .update_status("NOSUCHID1", OrderStatus::Cancelled)
            .unwrap();
        let all = ledger.list_all().unwrap();
        assert_eq!(all[0].status, OrderStatus::Processing);
    }

    #[test]
    fn test_corrupt_stored_value_loads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        let ledger = OrderLedger::new(store.clone());

        store.write(keys::ORDERS, "not json at all").unwrap();
        assert!(ledger.list_all().unwrap().is_empty());

        store.write(keys::ORDERS, r#"{"orders": []}"#).unwrap();
        assert!(ledger.list_all().unwrap().is_empty());

        // Appending over the corrupt value starts a fresh ledger
        ledger.append(sample_order("a@b.co")).unwrap();
        assert_eq!(ledger.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_partial_entry_is_repaired() {
        let store = Arc::new(MemoryStore::new());
        let ledger = OrderLedger::new(store.clone());

        // Historical entry missing id, date, status and most amounts
        store
            .write(
                keys::ORDERS,
                r#"[{"totalCents": 999, "customerDetails": {"email": "old@b.co"}}]"#,
            )
            .unwrap();

        let all = ledger.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].order_id.len(), ORDER_ID_LEN);
        assert_eq!(all[0].total_cents, 999);
        assert_eq!(all[0].status, OrderStatus::Processing);
        assert_eq!(all[0].payment_status, PaymentStatus::Paid);
        assert_eq!(all[0].currency, Currency::Cad);
        assert!(all[0].items.is_empty());
    }

    #[test]
    fn test_non_object_entries_are_dropped() {
        let store = Arc::new(MemoryStore::new());
        let ledger = OrderLedger::new(store.clone());

        store.write(keys::ORDERS, r#"[42, "hello", null]"#).unwrap();
        assert!(ledger.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_last_order_round_trip() {
        let ledger = ledger();
        assert!(ledger.last_order().unwrap().is_none());

        let stored = ledger.append(sample_order("a@b.co")).unwrap();
        ledger.save_last_order(&stored).unwrap();
        let last = ledger.last_order().unwrap().unwrap();
        assert_eq!(last.order_id, stored.order_id);
    }

    #[test]
    fn test_clear() {
        let ledger = ledger();
        ledger.append(sample_order("a@b.co")).unwrap();
        ledger.clear().unwrap();
        assert!(ledger.list_all().unwrap().is_empty());
    }
}
