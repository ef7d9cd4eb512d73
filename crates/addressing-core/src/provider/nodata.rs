// crates/addressing-core/src/provider/nodata.rs
use super::AddressMetadataProvider;
use crate::subdivision::SubdivisionNames;
use regex::Regex;
use std::ops::RangeInclusive;

/// Trimmed postal length accepted when no country data is available.
pub const POSTAL_LENGTH: RangeInclusive<usize> = 3..=16;

/// Provider without any country data.
///
/// Postal codes only need 3 to 16 trimmed characters and any non-blank
/// subdivision code is accepted. This is the safe default when no dataset
/// is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDataProvider;

impl NoDataProvider {
    pub fn new() -> Self {
        Self
    }
}

impl AddressMetadataProvider for NoDataProvider {
    fn postal_regex(&self, _country_code: &str) -> Option<Regex> {
        None
    }

    fn subdivision_keys(&self, _country_code: &str) -> Vec<String> {
        Vec::new()
    }

    fn subdivision_names(&self, _country_code: &str) -> SubdivisionNames {
        SubdivisionNames::default()
    }

    fn is_valid_postal(&self, _country_code: &str, postal: &str) -> bool {
        POSTAL_LENGTH.contains(&postal.trim().chars().count())
    }

    fn is_valid_subdivision(&self, _country_code: &str, code: &str) -> bool {
        !code.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_needs_three_to_sixteen_characters() {
        let p = NoDataProvider::new();
        assert!(p.is_valid_postal("US", "94043"));
        assert!(p.is_valid_postal("XX", "  abc  "));
        assert!(p.is_valid_postal("XX", "1234567890123456"));
        assert!(!p.is_valid_postal("US", "A"));
        assert!(!p.is_valid_postal("US", "   "));
        assert!(!p.is_valid_postal("US", "12345678901234567"));
    }

    #[test]
    fn any_non_blank_subdivision_passes() {
        let p = NoDataProvider::new();
        assert!(p.is_valid_subdivision("US", "anything"));
        assert!(!p.is_valid_subdivision("US", " "));
        assert!(p.subdivision_keys("US").is_empty());
        assert!(p.subdivision_names("US").is_empty());
        assert!(p.postal_regex("US").is_none());
    }
}
