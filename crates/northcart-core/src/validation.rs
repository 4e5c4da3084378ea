//! # Checkout Validation
//!
//! Field-level validation primitives the checkout layer composes into a
//! full form check. Each function validates one thing and returns the
//! first failure it finds.
//!
//! Validation runs before pricing is frozen onto an order; a failure here
//! means nothing is persisted and no email is sent.

use crate::error::ValidationError;
use crate::locale::is_valid_region;
use crate::types::Country;

/// Maximum length accepted for any free-text field.
pub const MAX_FIELD_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a required free-text field is present and within bounds.
///
/// Whitespace-only input counts as missing.
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LEN,
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// Deliberately shallow: one `@` with a non-empty local part and a domain
/// containing a dot. Real deliverability is the mail provider's problem.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    validate_required("email", value)?;

    let trimmed = value.trim();
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = trimmed
        .split_once('@')
        .ok_or_else(|| invalid("missing @"))?;
    if local.is_empty() {
        return Err(invalid("missing local part"));
    }
    if domain.contains('@') {
        return Err(invalid("multiple @ signs"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("invalid domain"));
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    Ok(())
}

/// Validates a phone number: required, and at least seven digits once
/// separators are stripped.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    validate_required("phone", value)?;

    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 7 {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "too few digits".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Selection Validators
// =============================================================================

/// Validates that a country has been selected.
pub fn validate_country(country: Option<Country>) -> Result<Country, ValidationError> {
    country.ok_or_else(|| ValidationError::MissingSelection {
        selection: "country".to_string(),
    })
}

/// Validates that a region is selected and belongs to the country.
pub fn validate_region(country: Country, region: &str) -> Result<(), ValidationError> {
    if region.trim().is_empty() {
        return Err(ValidationError::MissingSelection {
            selection: "province/state".to_string(),
        });
    }
    if !is_valid_region(country, region) {
        return Err(ValidationError::RegionMismatch {
            region: region.to_string(),
            country: country.code().to_string(),
        });
    }
    Ok(())
}

/// Validates that a shipping method id was selected.
///
/// Whether the id resolves within the country's table is checked by the
/// caller against the priced result.
pub fn validate_shipping_selected(option_id: &str) -> Result<(), ValidationError> {
    if option_id.trim().is_empty() {
        return Err(ValidationError::MissingSelection {
            selection: "shipping method".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
