//! End-to-end checkout flows over an in-memory store.

use std::sync::{Arc, Mutex};

use northcart_checkout::{
    AdminPanel, CheckoutError, CheckoutForm, CheckoutService, CheckoutSession, EmailError,
    EmailMessage, EmailNotifier, LoggingNotifier, OrderFilter, StoreConfig,
};
use northcart_core::promo::StaticPromoList;
use northcart_core::types::{Country, Currency, OrderStatus};
use northcart_store::{Store, UserProfile, ROLE_ADMIN};

/// Notifier that records messages and can be told to fail.
#[derive(Default)]
struct RecordingNotifier {
    fail: bool,
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl EmailNotifier for RecordingNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::Delivery("provider down".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "northcart=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn ontario_form() -> CheckoutForm {
    CheckoutForm {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "416-555-0199".to_string(),
        address: "1 Queen St".to_string(),
        country: Some(Country::Ca),
        region: "Ontario".to_string(),
        shipping_option_id: "standard".to_string(),
    }
}

fn session_with_pads() -> CheckoutSession {
    let session = CheckoutSession::new();
    session
        .with_cart_mut(|cart| cart.add_item("pad-a", "Pad A", 1000, 2))
        .unwrap();
    session
}

fn admin_profile() -> UserProfile {
    UserProfile {
        id: uuid::Uuid::new_v4(),
        first_name: "Root".to_string(),
        last_name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        phone: String::new(),
        address: String::new(),
        country: String::new(),
        region: String::new(),
        role: ROLE_ADMIN.to_string(),
    }
}

#[tokio::test]
async fn full_checkout_sends_both_emails() {
    init_tracing();
    let store = Store::in_memory();
    let sent = Arc::new(Mutex::new(Vec::new()));
    let service = CheckoutService::new(
        store.clone(),
        RecordingNotifier {
            fail: false,
            sent: sent.clone(),
        },
        StoreConfig::default(),
    );
    let session = session_with_pads();
    session
        .apply_promo("WELCOME10", &StaticPromoList::standard())
        .unwrap();

    let placed = service.place_order(&session, &ontario_form()).await.unwrap();

    // Reference totals: $20.00 + 13% HST + $5.00 shipping
    assert_eq!(placed.total_cents, 2760);
    assert_eq!(placed.currency, Currency::Cad);
    assert!(placed.email_delivered);

    // Customer confirmation first, then the admin notification
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].recipients, vec!["ada@example.com".to_string()]);
    assert_eq!(
        sent[1].recipients,
        vec![StoreConfig::default().admin_email]
    );
    assert!(sent[0].html_body.contains(&placed.order_id));

    let orders = store.orders().list_all().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].discount.as_ref().unwrap().code, "WELCOME10");
    assert_eq!(orders[0].customer_details.email, "ada@example.com");

    // Session fully reset
    assert!(session.with_cart(|cart| cart.is_empty()));
    assert!(session.active_promo().is_none());
}

#[tokio::test]
async fn email_failure_does_not_lose_the_order() {
    init_tracing();
    let store = Store::in_memory();
    let service = CheckoutService::new(
        store.clone(),
        RecordingNotifier {
            fail: true,
            ..Default::default()
        },
        StoreConfig::default(),
    );
    let session = session_with_pads();

    let placed = service.place_order(&session, &ontario_form()).await.unwrap();

    // Delivery failed but the order stands and the cart is cleared anyway
    assert!(!placed.email_delivered);
    let orders = store.orders().list_all().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, placed.order_id);
    assert!(session.with_cart(|cart| cart.is_empty()));
    assert!(store.orders().last_order().unwrap().is_some());
}

#[tokio::test]
async fn us_checkout_prices_in_usd() {
    init_tracing();
    let store = Store::in_memory();
    let service = CheckoutService::new(store.clone(), LoggingNotifier, StoreConfig::default());
    let session = session_with_pads();

    let mut form = ontario_form();
    form.country = Some(Country::Us);
    form.region = "Oregon".to_string();

    let placed = service.place_order(&session, &form).await.unwrap();

    // $20.00 CAD / 1.35 = $14.81, no tax in Oregon, $8.00 US standard shipping
    assert_eq!(placed.currency, Currency::Usd);
    assert_eq!(placed.total_cents, 1481 + 800);

    let orders = store.orders().list_all().unwrap();
    assert_eq!(orders[0].subtotal_cents, 1481);
    assert_eq!(orders[0].customer_details.country, "US");
}

#[tokio::test]
async fn placed_orders_flow_into_the_admin_panel() {
    init_tracing();
    let store = Store::in_memory();
    let service = CheckoutService::new(store.clone(), LoggingNotifier, StoreConfig::default());

    let session = session_with_pads();
    let placed = service.place_order(&session, &ontario_form()).await.unwrap();

    let panel = AdminPanel::open(store.clone(), &admin_profile()).unwrap();
    let orders = panel.orders(&OrderFilter::default()).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Processing);

    panel
        .update_status(&placed.order_id, OrderStatus::Shipped)
        .unwrap();
    let refreshed = panel
        .orders(&OrderFilter {
            status: Some(OrderStatus::Shipped),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(refreshed.len(), 1);
    assert_eq!(refreshed[0].order_id, placed.order_id);

    // The customer's own order history sees it too
    let mine = store.orders().list_by_email("ada@example.com").unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn non_admin_cannot_open_the_panel() {
    init_tracing();
    let store = Store::in_memory();
    let mut profile = admin_profile();
    profile.role = "customer".to_string();

    assert!(matches!(
        AdminPanel::open(store, &profile),
        Err(CheckoutError::AdminRequired)
    ));
}
