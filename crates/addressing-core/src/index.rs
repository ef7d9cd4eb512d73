// crates/addressing-core/src/index.rs
use crate::error::{AddressError, Result};
use crate::model::{normalize_code, CountryRecord};
use crate::pattern;
use crate::subdivision::{self, Subdivisions};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashMap;

/// A country record plus the matcher and subdivision lookup derived from it.
///
/// Both derived values are computed on first access. The matcher is only
/// stored once it compiles; a failing pattern is recompiled (and reported)
/// on every access.
#[derive(Debug)]
pub struct CountryEntry {
    record: CountryRecord,
    regex: OnceCell<Option<Regex>>,
    subdivisions: OnceCell<Subdivisions>,
}

impl CountryEntry {
    pub fn new(record: CountryRecord) -> Self {
        Self {
            record,
            regex: OnceCell::new(),
            subdivisions: OnceCell::new(),
        }
    }

    pub fn record(&self) -> &CountryRecord {
        &self.record
    }

    /// Anchored postal matcher, or the compile failure tagged with the country code.
    pub fn try_postal_regex(&self) -> Result<Option<Regex>> {
        let raw = self.record.postal_pattern.as_deref().unwrap_or_default();
        self.regex
            .get_or_try_init(|| pattern::compile(raw))
            .cloned()
            .map_err(|source| AddressError::Pattern {
                country: self.record.code.clone(),
                source,
            })
    }

    /// Anchored postal matcher. A malformed pattern is logged and reads as
    /// "no pattern".
    pub fn postal_regex(&self) -> Option<Regex> {
        match self.try_postal_regex() {
            Ok(rx) => rx,
            Err(e) => {
                tracing::warn!(
                    country = %self.record.code,
                    error = %e,
                    "postal pattern does not compile; treating as no pattern"
                );
                None
            }
        }
    }

    pub fn subdivisions(&self) -> &Subdivisions {
        self.subdivisions.get_or_init(|| {
            subdivision::split(
                self.record.subdivision_keys.as_deref(),
                self.record.subdivision_names.as_deref(),
            )
        })
    }
}

/// Immutable mapping from normalized country code to [`CountryEntry`].
#[derive(Debug, Default)]
pub struct CountryIndex {
    map: HashMap<String, CountryEntry>,
}

impl CountryIndex {
    /// Builds the index from `(lookup key, record)` pairs.
    ///
    /// Keys are normalized; entries with a blank key are dropped. A later
    /// duplicate replaces an earlier one.
    pub fn new<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, CountryRecord)>,
    {
        let map = records
            .into_iter()
            .filter_map(|(key, record)| {
                normalize_code(&key).map(|code| (code, CountryEntry::new(record)))
            })
            .collect();
        Self { map }
    }

    /// Builds the index keyed by each record's own code.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CountryRecord>,
    {
        Self::new(records.into_iter().map(|r| (r.code.clone(), r)))
    }

    /// Case-insensitive lookup. `None` means "no metadata", not an error.
    pub fn get(&self, country_code: &str) -> Option<&CountryEntry> {
        normalize_code(country_code).and_then(|cc| self.map.get(&cc))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All indexed codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.map.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Every postal pattern that fails to compile, sorted by country code.
    pub fn pattern_diagnostics(&self) -> Vec<AddressError> {
        self.codes()
            .into_iter()
            .filter_map(|cc| self.map.get(cc))
            .filter_map(|entry| entry.try_postal_regex().err())
            .collect()
    }
}
