//! # Admin Order Management
//!
//! The role-gated view over the order ledger: list, filter, and update
//! order statuses.
//!
//! ## Filters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search   substring match (case-insensitive) against order id,          │
//! │           customer name, and customer email                             │
//! │  status   exact fulfillment status                                      │
//! │  date     placed today / last 7 days / last 30 days                     │
//! │                                                                         │
//! │  Filters AND together; an empty filter returns everything,              │
//! │  newest first.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Status updates here are unguarded writes: the panel trusts its operator
//! and the ledger does not consult `OrderStatus::can_transition_to`.

use chrono::{DateTime, Duration, Utc};

use northcart_core::types::{Order, OrderStatus, PaymentStatus};
use northcart_store::{Store, UserProfile};

use crate::error::{CheckoutError, CheckoutResult};

// =============================================================================
// Filters
// =============================================================================

/// Relative placement window for the date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// Since local midnight, approximated as the last 24 hours.
    Today,
    LastWeek,
    LastMonth,
}

impl DateRange {
    fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = match self {
            DateRange::Today => 1,
            DateRange::LastWeek => 7,
            DateRange::LastMonth => 30,
        };
        now - Duration::days(days)
    }
}

/// The admin table's filter bar. `Default` matches everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub placed_within: Option<DateRange>,
}

fn matches_filter(order: &Order, filter: &OrderFilter, now: DateTime<Utc>) -> bool {
    if let Some(needle) = filter.search.as_deref() {
        let needle = needle.to_lowercase();
        let haystack = format!(
            "{} {} {}",
            order.order_id,
            order.customer_details.full_name(),
            order.customer_details.email
        )
        .to_lowercase();
        if !haystack.contains(&needle) {
            return false;
        }
    }

    if let Some(status) = filter.status {
        if order.status != status {
            return false;
        }
    }

    if let Some(range) = filter.placed_within {
        if order.date < range.cutoff(now) {
            return false;
        }
    }

    true
}

// =============================================================================
// The Panel
// =============================================================================

/// Admin operations over the order ledger.
///
/// Constructed through [`AdminPanel::open`], which enforces the role gate;
/// there is no other constructor on purpose.
pub struct AdminPanel {
    store: Store,
}

impl AdminPanel {
    /// Opens the panel for a signed-in profile.
    ///
    /// ## Errors
    /// - [`CheckoutError::AdminRequired`] unless the profile's role is admin
    pub fn open(store: Store, profile: &UserProfile) -> CheckoutResult<Self> {
        if !profile.is_admin() {
            return Err(CheckoutError::AdminRequired);
        }
        Ok(AdminPanel { store })
    }

    /// Orders matching the filter, newest first.
    pub fn orders(&self, filter: &OrderFilter) -> CheckoutResult<Vec<Order>> {
        let now = Utc::now();
        let mut orders: Vec<Order> = self
            .store
            .orders()
            .list_all()?
            .into_iter()
            .filter(|order| matches_filter(order, filter, now))
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    /// Sets an order's fulfillment status. Unknown ids are a silent no-op.
    pub fn update_status(&self, order_id: &str, status: OrderStatus) -> CheckoutResult<()> {
        self.store.orders().update_status(order_id, status)?;
        Ok(())
    }

    /// Sets an order's payment status. Unknown ids are a silent no-op.
    pub fn update_payment_status(
        &self,
        order_id: &str,
        payment_status: PaymentStatus,
    ) -> CheckoutResult<()> {
        self.store
            .orders()
            .update_payment_status(order_id, payment_status)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
