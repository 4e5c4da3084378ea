//! # Checkout
//!
//! Order placement: the one path that turns session state into a ledger
//! entry.
//!
//! ## Placement Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       place_order                                       │
//! │                                                                         │
//! │  1. VALIDATE   empty cart? selections? required fields? formats?        │
//! │        │       any failure ──► error, NOTHING persisted                 │
//! │        ▼                                                                │
//! │  2. PRICE      compute_order_pricing on a (cart, promo) snapshot        │
//! │        ▼                                                                │
//! │  3. FREEZE     build the Order: amounts, items, customer details        │
//! │        ▼                                                                │
//! │  4. PERSIST    merge profile ──► append ledger ──► save lastOrder       │
//! │        ▼                                                                │
//! │  5. NOTIFY     customer + admin emails, BEST-EFFORT                     │
//! │        │       failures logged; the order stands either way             │
//! │        ▼                                                                │
//! │  6. RESET      clear the cart and promo                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reset in step 6 happens whether or not the emails went out: the
//! customer's order exists, so the cart must not.

use tracing::{info, warn};

use northcart_core::error::CoreError;
use northcart_core::pricing::compute_order_pricing;
use northcart_core::types::{Country, CustomerDetails, Currency, Order};
use northcart_core::validation::{
    validate_country, validate_email, validate_phone, validate_region, validate_required,
    validate_shipping_selected,
};
use northcart_core::ValidationError;
use northcart_store::Store;

use crate::config::StoreConfig;
use crate::email::{
    render_admin_notification, render_customer_confirmation, EmailNotifier,
};
use crate::error::CheckoutResult;
use crate::session::CheckoutSession;

// =============================================================================
// Form & Result
// =============================================================================

/// The submitted checkout form, as entered.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: Option<Country>,
    pub region: String,
    pub shipping_option_id: String,
}

impl CheckoutForm {
    fn customer_details(&self, country: Country) -> CustomerDetails {
        CustomerDetails {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            country: country.code().to_string(),
            region: self.region.clone(),
        }
    }
}

/// What the confirmation page needs from a successful placement.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: String,
    pub total_cents: i64,
    pub currency: Currency,
    /// False when one or both notification emails failed to send.
    pub email_delivered: bool,
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Orchestrates order placement over a store and an email notifier.
pub struct CheckoutService<N: EmailNotifier> {
    store: Store,
    notifier: N,
    config: StoreConfig,
}

impl<N: EmailNotifier> CheckoutService<N> {
    pub fn new(store: Store, notifier: N, config: StoreConfig) -> Self {
        CheckoutService {
            store,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Places an order from the session's cart and the submitted form.
    ///
    /// ## Errors
    /// Validation and persistence failures abort with nothing written.
    /// Email failures do NOT abort; see [`PlacedOrder::email_delivered`].
    pub async fn place_order(
        &self,
        session: &CheckoutSession,
        form: &CheckoutForm,
    ) -> CheckoutResult<PlacedOrder> {
        let (cart, promo) = session.snapshot();

        // 1. Validate
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }
        let country = self.validate_form(form)?;
        let details = form.customer_details(country);

        // 2. Price the snapshot
        let locale = northcart_core::types::Locale::new(country, form.region.clone());
        let pricing =
            compute_order_pricing(&cart.items, Some(&locale), &form.shipping_option_id, promo.as_ref());
        if pricing.shipping.is_none() {
            // Selected id does not exist in this country's table
            return Err(CoreError::from(ValidationError::MissingSelection {
                selection: "shipping method".to_string(),
            })
            .into());
        }

        // 3. Freeze the order; the ledger assigns the id
        let order = Order {
            order_id: String::new(),
            date: chrono::Utc::now(),
            items: cart.items.clone(),
            subtotal_cents: pricing.subtotal_cents,
            taxes: pricing.taxes.rates,
            tax_cents: pricing.tax_cents(),
            shipping: pricing.shipping.clone(),
            discount: promo,
            total_cents: pricing.total_cents,
            currency: pricing.currency,
            customer_details: details,
            status: Default::default(),
            payment_status: Default::default(),
        };

        // 4. Persist
        self.store.users().merge_checkout_details(&order.customer_details)?;
        let ledger = self.store.orders();
        let order = ledger.append(order)?;
        ledger.save_last_order(&order)?;

        // 5. Notify, best-effort
        let email_delivered = self.send_order_emails(&order).await;

        // 6. The order exists; the session must not still hold it
        session.reset();

        info!(
            order_id = %order.order_id,
            total_cents = order.total_cents,
            currency = %order.currency.code(),
            email_delivered,
            "order placed"
        );
        Ok(PlacedOrder {
            order_id: order.order_id,
            total_cents: order.total_cents,
            currency: order.currency,
            email_delivered,
        })
    }

    /// Runs every form check, selections before free-text fields.
    fn validate_form(&self, form: &CheckoutForm) -> CheckoutResult<Country> {
        validate_shipping_selected(&form.shipping_option_id)?;
        let country = validate_country(form.country)?;
        validate_region(country, &form.region)?;

        validate_required("firstName", &form.first_name)?;
        validate_required("lastName", &form.last_name)?;
        validate_email(&form.email)?;
        validate_phone(&form.phone)?;
        validate_required("address", &form.address)?;
        Ok(country)
    }

    /// Sends both order emails; returns whether both were delivered.
    async fn send_order_emails(&self, order: &Order) -> bool {
        let mut delivered = true;

        let confirmation = render_customer_confirmation(order, &self.config);
        if let Err(e) = self.notifier.send(confirmation).await {
            warn!(order_id = %order.order_id, error = %e, "customer confirmation email failed");
            delivered = false;
        }

        let notification = render_admin_notification(order, &self.config);
        if let Err(e) = self.notifier.send(notification).await {
            warn!(order_id = %order.order_id, error = %e, "admin notification email failed");
            delivered = false;
        }

        delivered
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::LoggingNotifier;
    use northcart_core::CoreError;
    use northcart_store::Store;

    fn service() -> CheckoutService<LoggingNotifier> {
        CheckoutService::new(Store::in_memory(), LoggingNotifier, StoreConfig::default())
    }

    fn valid_form() -> CheckoutForm {
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

    fn seeded_session() -> CheckoutSession {
        let session = CheckoutSession::new();
        session
            .with_cart_mut(|cart| cart.add_item("pad-a", "Pad A", 1000, 2))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let service = service();
        let session = CheckoutSession::new();

        let err = service.place_order(&session, &valid_form()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::CheckoutError::Core(CoreError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn test_validation_failure_persists_nothing() {
        let service = service();
        let session = seeded_session();
        let mut form = valid_form();
        form.email = "not-an-email".to_string();

        assert!(service.place_order(&session, &form).await.is_err());
        // Cart untouched, ledger empty
        assert!(!session.with_cart(|cart| cart.is_empty()));
        assert!(service.store.orders().list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_region_from_wrong_country_rejected() {
        let service = service();
        let session = seeded_session();
        let mut form = valid_form();
        form.country = Some(Country::Us);
        // Ontario is not a US state

        let err = service.place_order(&session, &form).await.unwrap_err();
        assert!(err.to_string().contains("Ontario"));
    }

    #[tokio::test]
    async fn test_unknown_shipping_id_rejected() {
        let service = service();
        let session = seeded_session();
        let mut form = valid_form();
        form.shipping_option_id = "overnight".to_string();
        form.country = Some(Country::Us);
        form.region = "Oregon".to_string();
        // US has no overnight option

        assert!(service.place_order(&session, &form).await.is_err());
    }

    #[tokio::test]
    async fn test_successful_placement() {
        let service = service();
        let session = seeded_session();

        let placed = service.place_order(&session, &valid_form()).await.unwrap();
        assert_eq!(placed.total_cents, 2760);
        assert_eq!(placed.currency, Currency::Cad);
        assert_eq!(placed.order_id.len(), 9);
        assert!(placed.email_delivered);

        // Ledger has the frozen order
        let all = service.store.orders().list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].order_id, placed.order_id);
        assert_eq!(all[0].subtotal_cents, 2000);
        assert_eq!(all[0].tax_cents, 260);
        assert_eq!(all[0].customer_details.country, "CA");

        // lastOrder saved, session reset
        assert!(service.store.orders().last_order().unwrap().is_some());
        assert!(session.with_cart(|cart| cart.is_empty()));
    }

    #[tokio::test]
    async fn test_promo_is_frozen_but_total_unchanged() {
        let service = service();
        let session = seeded_session();
        session
            .apply_promo(
                "WELCOME10",
                &northcart_core::promo::StaticPromoList::standard(),
            )
            .unwrap();

        let placed = service.place_order(&session, &valid_form()).await.unwrap();
        assert_eq!(placed.total_cents, 2760);

        let all = service.store.orders().list_all().unwrap();
        assert_eq!(all[0].discount.as_ref().unwrap().code, "WELCOME10");
        assert!(session.active_promo().is_none());
    }

    #[tokio::test]
    async fn test_signed_in_profile_absorbs_checkout_details() {
        let service = service();
        service
            .store
            .users()
            .register("A", "L", "ada@example.com", "pw")
            .unwrap();
        let session = seeded_session();

        service.place_order(&session, &valid_form()).await.unwrap();

        let profile = service.store.users().current_user().unwrap().unwrap();
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.address, "1 Queen St");
        assert_eq!(profile.region, "Ontario");
    }
}
