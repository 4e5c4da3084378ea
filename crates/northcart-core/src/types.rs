//! # Domain Types
//!
//! Core domain types used throughout the Northcart storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │      Order      │   │ CustomerDetails │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  order_id       │   │  first_name     │       │
//! │  │  name           │   │  date, items    │   │  last_name      │       │
//! │  │  unit_price     │   │  totals, status │   │  email, address │       │
//! │  │  quantity       │   │  customer       │   │  country/region │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   OrderStatus   │   │    Currency     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Processing     │   │  Cad → "CAD $"  │       │
//! │  │  1300 = 13%     │   │  Shipped        │   │  Usd → "$"      │       │
//! │  └─────────────────┘   │  Delivered      │   └─────────────────┘       │
//! │                        │  Cancelled      │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Shape
//! Every type that ends up under a storage key serializes with camelCase
//! field names (`orderId`, `customerDetails`, …), matching the ledger's
//! on-disk JSON. Fields carry `#[serde(default)]` where historical records
//! are allowed to omit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// A single tax rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1300 bps = 13% (Ontario HST), 998 bps = 9.98% (Quebec QST, rounded)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// The GST/PST/HST triple resolved for a (country, region) pair.
///
/// Canada uses GST+PST or HST depending on province; the US flat state rate
/// rides in the `pst` slot. A missing lookup resolves to all-zero, never an
/// error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    #[serde(default)]
    pub gst: TaxRate,
    #[serde(default)]
    pub pst: TaxRate,
    #[serde(default)]
    pub hst: TaxRate,
}

impl TaxRates {
    /// Creates a rate triple from basis points.
    pub const fn new(gst_bps: u32, pst_bps: u32, hst_bps: u32) -> Self {
        TaxRates {
            gst: TaxRate::from_bps(gst_bps),
            pst: TaxRate::from_bps(pst_bps),
            hst: TaxRate::from_bps(hst_bps),
        }
    }

    /// All-zero rates (no locale selected, or unknown region).
    pub const fn zero() -> Self {
        TaxRates::new(0, 0, 0)
    }

    /// The combined rate applied to the taxable subtotal.
    pub const fn combined(&self) -> TaxRate {
        TaxRate::from_bps(self.gst.bps() + self.pst.bps() + self.hst.bps())
    }

    /// True when no component carries a rate.
    pub const fn is_zero(&self) -> bool {
        self.combined().is_zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A product line in a cart or a placed order.
///
/// Uses the snapshot pattern: once an order is placed, its items are frozen
/// copies; later catalog changes never rewrite order history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identifier.
    #[serde(default)]
    pub id: String,

    /// Display name at time of adding (frozen).
    #[serde(default)]
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    #[serde(default)]
    pub unit_price_cents: i64,

    /// Quantity ordered (≥ 1 in a live cart).
    #[serde(default)]
    pub quantity: i64,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total before tax (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Country / Currency / Locale
// =============================================================================

/// The two countries the store ships to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    /// Canada - the store's home market (base currency).
    #[serde(rename = "CA")]
    Ca,
    /// United States - priced via the fixed USD→CAD rate.
    #[serde(rename = "US")]
    Us,
}

impl Country {
    /// ISO-ish country code as stored.
    pub const fn code(&self) -> &'static str {
        match self {
            Country::Ca => "CA",
            Country::Us => "US",
        }
    }

    /// The display currency for carts shipped to this country.
    pub const fn currency(&self) -> Currency {
        match self {
            Country::Ca => Currency::Cad,
            Country::Us => Currency::Usd,
        }
    }

    /// Parses a stored country code. Unknown codes resolve to None.
    pub fn parse(code: &str) -> Option<Country> {
        match code {
            "CA" => Some(Country::Ca),
            "US" => Some(Country::Us),
            _ => None,
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The display currency of a priced cart or placed order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// Canadian dollars (base currency).
    #[default]
    #[serde(rename = "CAD")]
    Cad,
    /// US dollars, derived at the fixed rate.
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// Symbol prefix shown next to every amount.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD $",
            Currency::Usd => "$",
        }
    }

    /// Currency code as stored on orders.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD",
            Currency::Usd => "USD",
        }
    }
}

/// The (country, region) pair driving tax and shipping lookups.
///
/// ## Invariant
/// `region` must belong to the selected country's region list. Changing the
/// country through [`Locale::set_country`] clears the region, so a stale
/// province can never be priced under a US state table (or vice versa).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub country: Country,
    #[serde(default)]
    pub region: String,
}

impl Locale {
    /// Creates a locale for a country and region.
    pub fn new(country: Country, region: impl Into<String>) -> Self {
        Locale {
            country,
            region: region.into(),
        }
    }

    /// Switches country, clearing any previously selected region.
    pub fn set_country(&mut self, country: Country) {
        if self.country != country {
            self.region.clear();
        }
        self.country = country;
    }

    /// True when a region has been picked.
    pub fn has_region(&self) -> bool {
        !self.region.is_empty()
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// A shipping method offered for a country.
///
/// Prices are quoted in the country's display currency and added to the
/// total as-is (no FX conversion on shipping).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    /// Stable identifier referenced by the checkout form.
    pub id: String,
    /// Display name ("Standard Shipping").
    pub name: String,
    /// Price in cents of the display currency.
    pub price_cents: i64,
}

impl ShippingOption {
    /// Returns the shipping price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Promo Code
// =============================================================================

/// A promo code granting a percentage discount.
///
/// At most one code is active per cart; see [`crate::promo::PromoState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    /// The user-entered token, stored as validated.
    pub code: String,
    /// Discount percentage, 0-100.
    pub discount_percent: u8,
}

impl PromoCode {
    /// Creates a promo code definition.
    pub fn new(code: impl Into<String>, discount_percent: u8) -> Self {
        PromoCode {
            code: code.into(),
            discount_percent,
        }
    }

    /// Discount as basis points for Money math (10% → 1000 bps).
    #[inline]
    pub const fn discount_bps(&self) -> u32 {
        self.discount_percent as u32 * 100
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Fulfillment status of a placed order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order received, not yet shipped.
    #[default]
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Confirmed received by the customer.
    Delivered,
    /// Cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    /// The documented lifecycle transitions.
    ///
    /// ```text
    /// Processing ──► Shipped ──► Delivered (terminal)
    ///      │            │
    ///      └────────────┴──────► Cancelled (terminal)
    /// ```
    ///
    /// ## Note
    /// The order ledger does NOT enforce this table: status updates are an
    /// open set operation, matching the admin panel's current behavior.
    /// UIs that want guarded transitions can consult this helper.
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Processing, OrderStatus::Cancelled)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
                | (OrderStatus::Shipped, OrderStatus::Cancelled)
        )
    }

    /// True for statuses with no outgoing transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Parses a stored status string. Unknown values resolve to None.
    pub fn parse(s: &str) -> Option<OrderStatus> {
        match s {
            "Processing" => Some(OrderStatus::Processing),
            "Shipped" => Some(OrderStatus::Shipped),
            "Delivered" => Some(OrderStatus::Delivered),
            "Cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Payment state of a placed order.
///
/// The store has no payment processor; orders are recorded as Paid at
/// placement and the admin panel can flip the flag by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    Paid,
    Pending,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Failed => "Failed",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Customer Details
// =============================================================================

/// Customer details frozen onto an order at checkout.
///
/// Every field defaults to empty: historical ledger entries are allowed to
/// omit any of them and still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
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
}

impl CustomerDetails {
    /// "First Last" for emails and the admin table.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order as persisted in the ledger.
///
/// ## Mutability
/// Immutable once placed, except `status` and `payment_status`, which the
/// admin panel updates in place. Orders are never deleted individually;
/// only clearing the whole ledger removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Generated order token (9 uppercase alphanumeric chars).
    pub order_id: String,

    /// When the order was placed.
    pub date: DateTime<Utc>,

    /// Frozen copies of the cart's line items.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Subtotal in cents of `currency`, after FX conversion.
    #[serde(default)]
    pub subtotal_cents: i64,

    /// The tax rates the order was priced under.
    #[serde(default)]
    pub taxes: TaxRates,

    /// Tax amount in cents of `currency`.
    #[serde(default)]
    pub tax_cents: i64,

    /// The shipping method chosen at checkout.
    /// Optional only to tolerate partially-formed historical records.
    #[serde(default)]
    pub shipping: Option<ShippingOption>,

    /// The promo code active when the order was placed, if any.
    ///
    /// The discount is a display line; it is not subtracted from `total_cents`.
    #[serde(default)]
    pub discount: Option<PromoCode>,

    /// Grand total in cents of `currency` (subtotal + tax + shipping).
    #[serde(default)]
    pub total_cents: i64,

    /// Display currency the order was priced in.
    #[serde(default)]
    pub currency: Currency,

    /// Customer contact and shipping details.
    #[serde(default)]
    pub customer_details: CustomerDetails,

    /// Fulfillment status (admin-mutable).
    #[serde(default)]
    pub status: OrderStatus,

    /// Payment status (admin-mutable).
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl Order {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rates_combined() {
        // Quebec: GST 5% + QST 9.98%
        let rates = TaxRates::new(500, 998, 0);
        assert_eq!(rates.combined().bps(), 1498);
        assert!(!rates.is_zero());
        assert!(TaxRates::zero().is_zero());
    }

    #[test]
    fn test_line_item_total() {
        let item = LineItem {
            id: "pad-a".into(),
            name: "Pad A".into(),
            unit_price_cents: 1000,
            quantity: 2,
        };
        assert_eq!(item.line_total().cents(), 2000);
    }

    #[test]
    fn test_country_currency_and_symbols() {
        assert_eq!(Country::Ca.currency().symbol(), "CAD $");
        assert_eq!(Country::Us.currency().symbol(), "$");
        assert_eq!(Country::parse("CA"), Some(Country::Ca));
        assert_eq!(Country::parse("GB"), None);
    }

    #[test]
    fn test_locale_country_switch_clears_region() {
        let mut locale = Locale::new(Country::Ca, "Ontario");
        locale.set_country(Country::Us);
        assert!(!locale.has_region());
        assert_eq!(locale.country, Country::Us);

        // Re-selecting the same country keeps the region
        let mut locale = Locale::new(Country::Ca, "Quebec");
        locale.set_country(Country::Ca);
        assert_eq!(locale.region, "Quebec");
    }

    #[test]
    fn test_status_transition_table() {
        use OrderStatus::*;
        assert!(Processing.can_transition_to(Shipped));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Shipped));
        assert!(!Cancelled.can_transition_to(Processing));
        assert!(Delivered.is_terminal());
        assert!(!Processing.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(&status.to_string()), Some(status));
        }
        assert_eq!(OrderStatus::parse("Returned"), None);
    }

    #[test]
    fn test_order_serializes_camel_case() {
        let order = Order {
            order_id: "A1B2C3D4E".into(),
            date: Utc::now(),
            items: vec![],
            subtotal_cents: 2000,
            taxes: TaxRates::new(0, 0, 1300),
            tax_cents: 260,
            shipping: None,
            discount: None,
            total_cents: 2260,
            currency: Currency::Cad,
            customer_details: CustomerDetails::default(),
            status: OrderStatus::Processing,
            payment_status: PaymentStatus::Paid,
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderId"], "A1B2C3D4E");
        assert_eq!(json["currency"], "CAD");
        assert_eq!(json["status"], "Processing");
        assert!(json["customerDetails"].is_object());
    }
}
