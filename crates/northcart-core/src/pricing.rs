//! # Pricing Engine
//!
//! The pure computation that turns a cart, a locale selection, a shipping
//! choice and an optional promo code into a priced order summary.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_order_pricing                              │
//! │                                                                         │
//! │  1. Subtotal (CAD)      Σ unit_price × quantity                         │
//! │         │                                                               │
//! │  2. FX conversion       US ──► subtotal / 1.35 (fixed rate)             │
//! │         │               CA ──► unchanged                                │
//! │         ▼                                                               │
//! │  3. Tax                 converted subtotal × (gst + pst + hst)          │
//! │         │               unknown region ──► all zero                     │
//! │         ▼                                                               │
//! │  4. Shipping            table price, or 0 when the id is unknown        │
//! │         │                                                               │
//! │  5. Discount line       converted subtotal × discount%                  │
//! │         │               DISPLAY ONLY - see below                        │
//! │         ▼                                                               │
//! │  6. Total               subtotal + tax + shipping                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Discount Line Is Display-Only
//! The discount amount is computed and carried on the result, but it is
//! neither subtracted from the taxable base nor from the total. That is the
//! store's live behavior, reproduced deliberately; see DESIGN.md before
//! "fixing" it.
//!
//! ## No Failures
//! Absent locale or an unknown shipping id yield zeroed components, never
//! errors. Blocking submission on missing selections is the checkout
//! layer's job, not the engine's.

use serde::{Deserialize, Serialize};

use crate::locale::{shipping_option, tax_rates_for};
use crate::money::Money;
use crate::types::{Currency, LineItem, Locale, PromoCode, ShippingOption, TaxRates};
use crate::USD_TO_CAD;

// =============================================================================
// Tax Breakdown
// =============================================================================

/// Per-component tax amounts alongside the rates that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    /// The resolved rate triple.
    pub rates: TaxRates,
    /// GST amount in cents.
    pub gst_cents: i64,
    /// PST (or US state rate) amount in cents.
    pub pst_cents: i64,
    /// HST amount in cents.
    pub hst_cents: i64,
}

impl TaxBreakdown {
    /// Computes the breakdown on a taxable base.
    ///
    /// The order's tax is `subtotal × combined rate`, rounded ONCE. The GST
    /// and HST lines round directly and the PST line takes the remainder,
    /// so the display lines always sum to the charged amount. (PST is the
    /// only component that ever coexists with another rate, in the GST+PST
    /// provinces.)
    pub fn on(subtotal: Money, rates: TaxRates) -> Self {
        let total = subtotal.calculate_tax(rates.combined());
        let gst = subtotal.calculate_tax(rates.gst);
        let hst = subtotal.calculate_tax(rates.hst);
        let pst = total - gst - hst;
        TaxBreakdown {
            rates,
            gst_cents: gst.cents(),
            pst_cents: pst.cents(),
            hst_cents: hst.cents(),
        }
    }

    /// Combined tax amount in cents.
    pub fn total_cents(&self) -> i64 {
        self.gst_cents + self.pst_cents + self.hst_cents
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// The fully priced order summary the checkout view renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    /// Subtotal in cents of `currency` (post-FX, pre-discount).
    pub subtotal_cents: i64,

    /// Tax components computed on the subtotal.
    pub taxes: TaxBreakdown,

    /// The resolved shipping option, if the id matched the country's table.
    pub shipping: Option<ShippingOption>,

    /// Shipping cost in cents (0 when unresolved).
    pub shipping_cents: i64,

    /// Discount line in cents. Display-only: not subtracted from `total_cents`.
    pub discount_cents: i64,

    /// Grand total in cents: subtotal + tax + shipping.
    pub total_cents: i64,

    /// Display currency of every amount above.
    pub currency: Currency,
}

impl Pricing {
    /// Combined tax amount in cents.
    pub fn tax_cents(&self) -> i64 {
        self.taxes.total_cents()
    }

    /// The symbol prefix for rendering amounts ("CAD $" / "$").
    pub fn currency_symbol(&self) -> &'static str {
        self.currency.symbol()
    }

    /// Whether the selections required for submission were all resolved.
    ///
    /// The engine still prices an incomplete cart (with zeroed components);
    /// the checkout form uses this to disable the submit button.
    pub fn is_submittable(&self) -> bool {
        self.shipping.is_some()
    }
}

// =============================================================================
// The Engine
// =============================================================================

/// Prices a cart against a locale, shipping selection and promo code.
///
/// ## Arguments
/// * `items` - cart line items (an empty slice prices to all-zero)
/// * `locale` - country + region; `None` means no selection yet
/// * `shipping_option_id` - id within the country's shipping table
/// * `promo` - the active promo code, if any
///
/// ## Example
/// ```rust
/// use northcart_core::pricing::compute_order_pricing;
/// use northcart_core::types::{Country, LineItem, Locale};
///
/// let items = vec![LineItem {
///     id: "pad-a".into(),
///     name: "Pad A".into(),
///     unit_price_cents: 1000,
///     quantity: 2,
/// }];
/// let locale = Locale::new(Country::Ca, "Ontario");
///
/// let pricing = compute_order_pricing(&items, Some(&locale), "standard", None);
/// assert_eq!(pricing.subtotal_cents, 2000); // $20.00
/// assert_eq!(pricing.tax_cents(), 260);     // 13% HST
/// assert_eq!(pricing.total_cents, 2760);    // + $5.00 shipping
/// ```
pub fn compute_order_pricing(
    items: &[LineItem],
    locale: Option<&Locale>,
    shipping_option_id: &str,
    promo: Option<&PromoCode>,
) -> Pricing {
    // 1. Base-currency subtotal
    let base_subtotal: Money = items
        .iter()
        .fold(Money::zero(), |acc, item| acc + item.line_total());

    // 2. FX conversion - US carts are priced in USD at the fixed rate
    let currency = locale
        .map(|l| l.country.currency())
        .unwrap_or(Currency::Cad);
    let subtotal = match currency {
        Currency::Cad => base_subtotal,
        Currency::Usd => base_subtotal.convert(USD_TO_CAD),
    };

    // 3. Tax on the converted, pre-discount subtotal
    let rates = locale
        .filter(|l| l.has_region())
        .map(|l| tax_rates_for(l.country, &l.region))
        .unwrap_or(TaxRates::zero());
    let taxes = TaxBreakdown::on(subtotal, rates);

    // 4. Shipping from the country's table; unknown id costs nothing
    //    (and leaves the pricing non-submittable)
    let shipping = locale.and_then(|l| shipping_option(l.country, shipping_option_id));
    let shipping_cents = shipping.as_ref().map(|s| s.price_cents).unwrap_or(0);

    // 5. Discount line, computed on the same subtotal as the taxes
    let discount_cents = promo
        .map(|p| subtotal.percentage_of(p.discount_bps()).cents())
        .unwrap_or(0);

    // 6. Total - the discount line is intentionally absent here
    let total_cents = subtotal.cents() + taxes.total_cents() + shipping_cents;

    Pricing {
        subtotal_cents: subtotal.cents(),
        taxes,
        shipping,
        shipping_cents,
        discount_cents,
        total_cents,
        currency,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
