//! # Locale Tables
//!
//! Static tax and shipping lookup data for the two supported countries.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Locale-Driven Lookups                               │
//! │                                                                         │
//! │  Checkout form selects (country, region)                                │
//! │       │                                                                 │
//! │       ├──► tax_rates_for(country, region) ──► TaxRates {gst, pst, hst}  │
//! │       │        CA: GST+PST or HST per province                          │
//! │       │        US: flat state rate in the PST slot                      │
//! │       │        unknown region ──► all zero (never an error)             │
//! │       │                                                                 │
//! │       └──► shipping_options_for(country) ──► [ShippingOption]           │
//! │                one list per country, priced in display currency         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rates are integer basis points (1300 = 13%). Quebec's 9.975% QST is
//! carried as 998 bps, the store's accepted rounding.

use crate::types::{Country, ShippingOption, TaxRates};

// =============================================================================
// Region Lists
// =============================================================================

/// The ten Canadian provinces the store ships to (territories excluded).
pub const CA_PROVINCES: [&str; 10] = [
    "Alberta",
    "British Columbia",
    "Manitoba",
    "New Brunswick",
    "Newfoundland and Labrador",
    "Nova Scotia",
    "Ontario",
    "Prince Edward Island",
    "Quebec",
    "Saskatchewan",
];

/// All fifty US states.
pub const US_STATES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// The valid region list for a country.
pub fn regions_for(country: Country) -> &'static [&'static str] {
    match country {
        Country::Ca => &CA_PROVINCES,
        Country::Us => &US_STATES,
    }
}

/// Checks that a region belongs to the country's region list.
pub fn is_valid_region(country: Country, region: &str) -> bool {
    regions_for(country).contains(&region)
}

// =============================================================================
// Tax Tables
// =============================================================================

/// Canadian rates: (province, gst_bps, pst_bps, hst_bps).
///
/// HST provinces carry everything in the HST slot; the others split
/// GST + provincial tax.
const CANADIAN_TAX_RATES: [(&str, u32, u32, u32); 10] = [
    ("Alberta", 500, 0, 0),
    ("British Columbia", 500, 700, 0),
    ("Manitoba", 500, 700, 0),
    ("New Brunswick", 0, 0, 1500),
    ("Newfoundland and Labrador", 0, 0, 1500),
    ("Nova Scotia", 0, 0, 1500),
    ("Ontario", 0, 0, 1300),
    ("Prince Edward Island", 0, 0, 1500),
    ("Quebec", 500, 998, 0),
    ("Saskatchewan", 500, 600, 0),
];

/// US state base rates: (state, rate_bps) in the PST slot.
///
/// Local/county surcharges are out of scope; zero-rate states carry 0.
const US_TAX_RATES: [(&str, u32); 50] = [
    ("Alabama", 400),
    ("Alaska", 0),
    ("Arizona", 560),
    ("Arkansas", 650),
    ("California", 725),
    ("Colorado", 290),
    ("Connecticut", 635),
    ("Delaware", 0),
    ("Florida", 600),
    ("Georgia", 400),
    ("Hawaii", 400),
    ("Idaho", 600),
    ("Illinois", 625),
    ("Indiana", 700),
    ("Iowa", 600),
    ("Kansas", 650),
    ("Kentucky", 600),
    ("Louisiana", 445),
    ("Maine", 550),
    ("Maryland", 600),
    ("Massachusetts", 625),
    ("Michigan", 600),
    ("Minnesota", 688),
    ("Mississippi", 700),
    ("Missouri", 423),
    ("Montana", 0),
    ("Nebraska", 550),
    ("Nevada", 685),
    ("New Hampshire", 0),
    ("New Jersey", 663),
    ("New Mexico", 513),
    ("New York", 400),
    ("North Carolina", 475),
    ("North Dakota", 500),
    ("Ohio", 575),
    ("Oklahoma", 450),
    ("Oregon", 0),
    ("Pennsylvania", 600),
    ("Rhode Island", 700),
    ("South Carolina", 600),
    ("South Dakota", 420),
    ("Tennessee", 700),
    ("Texas", 625),
    ("Utah", 485),
    ("Vermont", 600),
    ("Virginia", 530),
    ("Washington", 650),
    ("West Virginia", 600),
    ("Wisconsin", 500),
    ("Wyoming", 400),
];

/// Resolves the tax rate triple for a (country, region) pair.
///
/// ## Missing Lookup Policy
/// An unknown or empty region resolves to all-zero rates. The checkout form
/// blocks submission on a missing region; the pricing engine itself never
/// fails on one.
pub fn tax_rates_for(country: Country, region: &str) -> TaxRates {
    match country {
        Country::Ca => CANADIAN_TAX_RATES
            .iter()
            .find(|(province, _, _, _)| *province == region)
            .map(|&(_, gst, pst, hst)| TaxRates::new(gst, pst, hst))
            .unwrap_or(TaxRates::zero()),
        Country::Us => US_TAX_RATES
            .iter()
            .find(|(state, _)| *state == region)
            .map(|&(_, rate)| TaxRates::new(0, rate, 0))
            .unwrap_or(TaxRates::zero()),
    }
}

// =============================================================================
// Shipping Tables
// =============================================================================

/// The shipping methods offered for a country.
///
/// Prices are in cents of the country's display currency and are charged
/// as listed, with no FX conversion.
pub fn shipping_options_for(country: Country) -> Vec<ShippingOption> {
    let table: &[(&str, &str, i64)] = match country {
        Country::Ca => &[
            ("standard", "Standard Shipping", 500),
            ("express", "Express Shipping", 1500),
            ("overnight", "Overnight Shipping", 2500),
        ],
        Country::Us => &[
            ("standard", "Standard Shipping", 800),
            ("express", "Express Shipping", 2000),
        ],
    };

    table
        .iter()
        .map(|&(id, name, price_cents)| ShippingOption {
            id: id.to_string(),
            name: name.to_string(),
            price_cents,
        })
        .collect()
}

/// Finds a shipping option by id within a country's table.
pub fn shipping_option(country: Country, option_id: &str) -> Option<ShippingOption> {
    shipping_options_for(country)
        .into_iter()
        .find(|opt| opt.id == option_id)
}

// =============================================================================
// Unit Tests
// =============================================================================
