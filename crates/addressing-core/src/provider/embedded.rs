// crates/addressing-core/src/provider/embedded.rs
use super::bundled::SNAPSHOT;
use super::{
    entry_postal_regex, entry_subdivision_keys, entry_subdivision_names, AddressMetadataProvider,
};
use crate::error::{AddressError, Result};
use crate::index::CountryIndex;
use crate::model::CountryRecord;
use crate::snapshot;
use crate::subdivision::SubdivisionNames;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

// Single in-process copy of the bundled snapshot, parsed on first use.
static BUNDLED: Lazy<EmbeddedProvider> = Lazy::new(EmbeddedProvider::bundled);

/// Provider backed by an in-memory [`CountryIndex`] built once at construction.
///
/// Lookups are pure and synchronous; there is no network dependency.
#[derive(Debug, Default)]
pub struct EmbeddedProvider {
    index: CountryIndex,
}

impl EmbeddedProvider {
    /// Builds from the snapshot compiled into the crate.
    ///
    /// A malformed bundled entry is logged and skipped.
    pub fn bundled() -> Self {
        let records = snapshot::parse_entries(SNAPSHOT.iter().copied());
        tracing::debug!(countries = records.len(), "loaded bundled snapshot");
        Self::from_index(CountryIndex::new(records))
    }

    /// Process-wide shared instance of [`EmbeddedProvider::bundled`].
    pub fn shared() -> &'static EmbeddedProvider {
        &BUNDLED
    }

    /// Loads every `<CC>.json` (and `<CC>.json.gz` with `compact`) file in `dir`.
    ///
    /// Only an unreadable directory is an error; bad files are skipped.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let records = snapshot::read_dir(dir.as_ref())?;
        Ok(Self::from_index(CountryIndex::new(records)))
    }

    /// Builds from a caller-supplied `lookup key -> record` mapping.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, CountryRecord)>,
    {
        Self::from_index(CountryIndex::new(records))
    }

    pub fn from_index(index: CountryIndex) -> Self {
        Self { index }
    }

    /// Directory holding the snapshot files shipped with this crate.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn index(&self) -> &CountryIndex {
        &self.index
    }

    /// The raw record for a country, if present.
    pub fn country(&self, country_code: &str) -> Option<&CountryRecord> {
        self.index.get(country_code).map(|e| e.record())
    }

    /// Like [`AddressMetadataProvider::postal_regex`] but reports a malformed
    /// pattern instead of reading it as "no pattern".
    pub fn try_postal_regex(&self, country_code: &str) -> Result<Option<Regex>> {
        match self.index.get(country_code) {
            Some(entry) => entry.try_postal_regex(),
            None => Ok(None),
        }
    }

    /// Every postal pattern in the snapshot that fails to compile.
    pub fn pattern_diagnostics(&self) -> Vec<AddressError> {
        self.index.pattern_diagnostics()
    }
}

impl AddressMetadataProvider for EmbeddedProvider {
    fn postal_regex(&self, country_code: &str) -> Option<Regex> {
        entry_postal_regex(self.index.get(country_code))
    }

    fn subdivision_keys(&self, country_code: &str) -> Vec<String> {
        entry_subdivision_keys(self.index.get(country_code))
    }

    fn subdivision_names(&self, country_code: &str) -> SubdivisionNames {
        entry_subdivision_names(self.index.get(country_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_snapshot_covers_us_and_ng() {
        let p = EmbeddedProvider::bundled();
        assert!(p.is_valid_postal("US", "94043"));
        assert!(p.is_valid_postal("US", "94043-1351"));
        assert!(!p.is_valid_postal("US", "ABCDE"));
        assert!(p.is_valid_postal("NG", "100001"));
        assert!(!p.is_valid_postal("NG", "ABC123"));
        assert!(p.subdivision_names("US").contains_key("CA"));
        assert!(p.pattern_diagnostics().is_empty());
    }

    #[test]
    fn unknown_country_has_no_data() {
        let p = EmbeddedProvider::bundled();
        assert!(p.postal_regex("XX").is_none());
        assert!(p.is_valid_postal("XX", "whatever"));
        assert!(!p.is_valid_postal("XX", "  "));
        assert!(!p.is_valid_subdivision("XX", "ZZ"));
        assert!(p.subdivision_keys("XX").is_empty());
    }

    #[test]
    fn country_without_subdivisions_rejects_every_code() {
        let p = EmbeddedProvider::shared();
        assert!(p.subdivision_keys("DE").is_empty());
        for code in ["BY", "by", "NOT-A-STATE", "DE"] {
            assert!(!p.is_valid_subdivision("DE", code), "{code}");
        }
        assert!(!p.is_valid_subdivision("FR", "IDF"));
    }

    #[test]
    fn patternless_country_accepts_any_postal() {
        let p = EmbeddedProvider::bundled();
        assert!(p.postal_regex("AE").is_none());
        assert!(p.is_valid_postal("AE", "x"));
        assert!(p.is_valid_subdivision("AE", "dubai"));
        assert!(!p.is_valid_subdivision("AE", "Doha"));
    }

    #[test]
    fn subdivision_checks_ignore_case() {
        let p = EmbeddedProvider::shared();
        assert!(p.is_valid_subdivision("US", "ca"));
        assert!(p.is_valid_subdivision("us", " Ny "));
        assert!(!p.is_valid_subdivision("US", "ZZ"));
        assert!(!p.is_valid_subdivision("US", ""));
        assert_eq!(p.subdivision_names("CA").get("qc"), Some("Quebec"));
    }

    #[test]
    fn gb_alternations_are_fully_anchored() {
        let p = EmbeddedProvider::shared();
        assert!(p.is_valid_postal("GB", "SW1A 1AA"));
        assert!(p.is_valid_postal("GB", "gir 0aa"));
        assert!(p.is_valid_postal("GB", "BFPO 801"));
        assert!(!p.is_valid_postal("GB", "GIR 0AA X"));
    }

    #[test]
    fn malformed_pattern_is_surfaced_by_try_postal_regex() {
        let bad = CountryRecord::new(Some("ZZ"), "ZZ").with_postal_pattern(Some("[0-9".into()));
        let p = EmbeddedProvider::from_records([("ZZ".to_string(), bad)]);
        assert!(p.is_valid_postal("ZZ", "anything"));
        assert!(matches!(
            p.try_postal_regex("zz"),
            Err(AddressError::Pattern { ref country, .. }) if country == "ZZ"
        ));
        assert_eq!(p.pattern_diagnostics().len(), 1);
    }

    #[test]
    fn repeated_calls_agree() {
        let p = EmbeddedProvider::bundled();
        for _ in 0..3 {
            assert!(p.is_valid_postal("CA", "K1A 0B1"));
            assert!(!p.is_valid_postal("CA", "K1A 0B"));
            assert_eq!(p.subdivision_keys("AU").len(), 8);
        }
    }

    #[test]
    fn default_data_dir_matches_bundled() {
        let from_disk = EmbeddedProvider::from_dir(EmbeddedProvider::default_data_dir()).unwrap();
        let bundled = EmbeddedProvider::bundled();
        assert_eq!(from_disk.index().codes(), bundled.index().codes());
    }
}
