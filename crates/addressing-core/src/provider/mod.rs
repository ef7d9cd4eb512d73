// crates/addressing-core/src/provider/mod.rs

//! # Metadata Providers
//!
//! All providers answer the same synchronous contract. They differ only in
//! where the per-country data comes from:
//!
//! | provider              | data source                       |
//! |-----------------------|-----------------------------------|
//! | [`NoDataProvider`]    | none (presence/length checks)     |
//! | [`EmbeddedProvider`]  | snapshot loaded at construction   |
//! | [`RemoteProvider`]    | fetched per country, then cached  |
//!
//! [`NoDataProvider`]: nodata::NoDataProvider
//! [`EmbeddedProvider`]: embedded::EmbeddedProvider
//! [`RemoteProvider`]: remote::RemoteProvider

mod bundled;
pub mod embedded;
pub mod nodata;
pub mod remote;

use crate::index::CountryEntry;
use crate::subdivision::SubdivisionNames;
use regex::Regex;
use std::sync::Arc;

/// Address metadata and validation predicates for a country code.
///
/// Country codes are matched case-insensitively. None of these methods fail:
/// an unknown country means "no metadata", which the predicates treat
/// permissively.
///
/// The provided `is_valid_*` methods implement the policy for providers that
/// carry country data. A postal pattern, when present, must match the whole
/// trimmed value, and a country without a pattern accepts any non-blank
/// value. A subdivision code is valid only if it is one of the country's
/// keys, so a country without subdivision data accepts none.
pub trait AddressMetadataProvider: Send + Sync {
    /// Anchored, case-insensitive postal matcher for the country, if it has a pattern.
    fn postal_regex(&self, country_code: &str) -> Option<Regex>;

    /// Subdivision codes in source order. Empty for unknown countries.
    fn subdivision_keys(&self, country_code: &str) -> Vec<String>;

    /// Subdivision code -> display name. Empty for unknown countries.
    fn subdivision_names(&self, country_code: &str) -> SubdivisionNames;

    fn is_valid_postal(&self, country_code: &str, postal: &str) -> bool {
        let postal = postal.trim();
        if postal.is_empty() {
            return false;
        }
        self.postal_regex(country_code)
            .map_or(true, |rx| rx.is_match(postal))
    }

    fn is_valid_subdivision(&self, country_code: &str, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        self.subdivision_names(country_code).contains_key(code)
    }
}

impl<P: AddressMetadataProvider + ?Sized> AddressMetadataProvider for Arc<P> {
    fn postal_regex(&self, country_code: &str) -> Option<Regex> {
        (**self).postal_regex(country_code)
    }

    fn subdivision_keys(&self, country_code: &str) -> Vec<String> {
        (**self).subdivision_keys(country_code)
    }

    fn subdivision_names(&self, country_code: &str) -> SubdivisionNames {
        (**self).subdivision_names(country_code)
    }

    fn is_valid_postal(&self, country_code: &str, postal: &str) -> bool {
        (**self).is_valid_postal(country_code, postal)
    }

    fn is_valid_subdivision(&self, country_code: &str, code: &str) -> bool {
        (**self).is_valid_subdivision(country_code, code)
    }
}

impl<P: AddressMetadataProvider + ?Sized> AddressMetadataProvider for Box<P> {
    fn postal_regex(&self, country_code: &str) -> Option<Regex> {
        (**self).postal_regex(country_code)
    }

    fn subdivision_keys(&self, country_code: &str) -> Vec<String> {
        (**self).subdivision_keys(country_code)
    }

    fn subdivision_names(&self, country_code: &str) -> SubdivisionNames {
        (**self).subdivision_names(country_code)
    }

    fn is_valid_postal(&self, country_code: &str, postal: &str) -> bool {
        (**self).is_valid_postal(country_code, postal)
    }

    fn is_valid_subdivision(&self, country_code: &str, code: &str) -> bool {
        (**self).is_valid_subdivision(country_code, code)
    }
}

// -----------------------------------------------------------------------------
// SHARED ENTRY HELPERS (used by the data-backed providers)
// -----------------------------------------------------------------------------

fn entry_postal_regex(entry: Option<&CountryEntry>) -> Option<Regex> {
    entry.and_then(CountryEntry::postal_regex)
}

fn entry_subdivision_keys(entry: Option<&CountryEntry>) -> Vec<String> {
    entry
        .map(|e| e.subdivisions().keys.clone())
        .unwrap_or_default()
}

fn entry_subdivision_names(entry: Option<&CountryEntry>) -> SubdivisionNames {
    entry
        .map(|e| e.subdivisions().names.clone())
        .unwrap_or_default()
}
