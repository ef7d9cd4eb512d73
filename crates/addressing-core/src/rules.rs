// crates/addressing-core/src/rules.rs

//! Address-level rules on top of a provider's predicates.
//!
//! This layer adds no metadata logic of its own: postal codes are checked
//! with [`AddressMetadataProvider::is_valid_postal`] and everything else is
//! a presence or shape check.

use crate::provider::AddressMetadataProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A postal address with common international fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street address, house number or P.O. Box.
    pub line1: String,
    /// Apartment, suite, unit or floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state_or_province: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 code, e.g. "US" or "NG".
    pub country_code: String,
}

/// One failed rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path, e.g. `PostalCode`.
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validates `address` against `provider`.
///
/// Checks, in order: `line1`, `city` and `state_or_province` are non-blank;
/// `country_code` is exactly two characters (when it is not, the postal code
/// is not checked); `postal_code` is non-blank and valid for the country.
pub fn validate_address(
    address: &Address,
    provider: &dyn AddressMetadataProvider,
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    if address.line1.trim().is_empty() {
        violations.push(Violation {
            field: "Line1",
            message: "Line1 is required.",
        });
    }
    if address.city.trim().is_empty() {
        violations.push(Violation {
            field: "City",
            message: "City is required.",
        });
    }
    if address.state_or_province.trim().is_empty() {
        violations.push(Violation {
            field: "StateOrProvince",
            message: "State/Province is required.",
        });
    }

    let country = address.country_code.as_str();
    if country.trim().is_empty() || country.chars().count() != 2 {
        violations.push(Violation {
            field: "CountryCode",
            message: "CountryCode must be ISO alpha-2 (e.g., NG, US).",
        });
        return Err(violations);
    }

    if address.postal_code.trim().is_empty() {
        violations.push(Violation {
            field: "PostalCode",
            message: "PostalCode is required.",
        });
    } else if !provider.is_valid_postal(country, &address.postal_code) {
        violations.push(Violation {
            field: "PostalCode",
            message: "Invalid postal code.",
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
