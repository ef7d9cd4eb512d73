// crates/addressing-core/src/subdivision.rs

//! Subdivision splitting.
//!
//! Keys and names arrive as `~`-joined strings that are positionally aligned:
//! `"CA~NY~TX"` / `"California~~Texas"`. Empty key segments are dropped.
//! A missing or blank name falls back to the key at the same position.

use std::collections::HashMap;

pub const DELIMITER: char = '~';

/// Ordered subdivision codes plus their display names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subdivisions {
    pub keys: Vec<String>,
    pub names: SubdivisionNames,
}

impl Subdivisions {
    /// `true` if `code` matches one of the keys, ignoring case.
    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Code -> display name mapping with case-insensitive lookup.
///
/// Iteration follows source order. Lookups fold both sides with
/// `to_lowercase`, so `"ca"`, `"Ca"` and `"CA"` resolve to the same entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubdivisionNames {
    entries: Vec<(String, String)>,
    by_folded: HashMap<String, usize>,
}

impl SubdivisionNames {
    /// Inserts or replaces the name for `code`. A replaced entry keeps its
    /// original position and spelling.
    fn insert(&mut self, code: &str, name: &str) {
        match self.by_folded.get(&fold(code)) {
            Some(&slot) => self.entries[slot].1 = name.to_owned(),
            None => {
                self.by_folded.insert(fold(code), self.entries.len());
                self.entries.push((code.to_owned(), name.to_owned()));
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.by_folded
            .get(&fold(code))
            .map(|&slot| self.entries[slot].1.as_str())
    }

    pub fn contains_key(&self, code: &str) -> bool {
        self.by_folded.contains_key(&fold(code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(code, name)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn fold(code: &str) -> String {
    code.to_lowercase()
}

/// Splits raw key/name strings into [`Subdivisions`].
///
/// ```rust
/// use addressing_core::subdivision::split;
///
/// let subs = split(Some("CA~NY~TX"), Some("California~~Texas"));
/// assert_eq!(subs.keys, ["CA", "NY", "TX"]);
/// assert_eq!(subs.names.get("ny"), Some("NY"));
/// ```
pub fn split(keys_raw: Option<&str>, names_raw: Option<&str>) -> Subdivisions {
    let keys_raw = match keys_raw {
        Some(k) if !k.trim().is_empty() => k,
        _ => return Subdivisions::default(),
    };

    let keys: Vec<String> = keys_raw
        .split(DELIMITER)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect();
    let names: Vec<&str> = names_raw.unwrap_or_default().split(DELIMITER).collect();

    let mut mapping = SubdivisionNames::default();
    for (i, key) in keys.iter().enumerate() {
        let display = match names.get(i) {
            Some(name) if !name.trim().is_empty() => *name,
            _ => key.as_str(),
        };
        mapping.insert(key, display);
    }

    Subdivisions {
        keys,
        names: mapping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_middle_name_falls_back_to_key() {
        let subs = split(Some("CA~NY~TX"), Some("California~~Texas"));
        let pairs: Vec<_> = subs.names.iter().collect();
        assert_eq!(
            pairs,
            [("CA", "California"), ("NY", "NY"), ("TX", "Texas")]
        );
    }

    #[test]
    fn short_or_absent_names_fall_back_positionally() {
        let subs = split(Some("AB~BC~MB"), Some("Alberta"));
        assert_eq!(subs.names.get("AB"), Some("Alberta"));
        assert_eq!(subs.names.get("BC"), Some("BC"));
        assert_eq!(subs.names.get("MB"), Some("MB"));

        let subs = split(Some("AB~BC"), None);
        assert_eq!(subs.names.get("bc"), Some("BC"));
    }

    #[test]
    fn blank_keys_yield_nothing() {
        assert!(split(None, Some("California")).is_empty());
        assert!(split(Some("  "), Some("California")).names.is_empty());
    }

    #[test]
    fn empty_key_segments_are_dropped() {
        let subs = split(Some("~CA~~NY~"), None);
        assert_eq!(subs.keys, ["CA", "NY"]);
        assert_eq!(subs.names.len(), 2);
    }

    #[test]
    fn lookup_ignores_case() {
        let subs = split(Some("Lagos~Ogun State"), None);
        assert!(subs.contains("lagos"));
        assert!(subs.contains("OGUN STATE"));
        assert!(!subs.contains("Ogun"));
    }

    #[test]
    fn blank_name_is_treated_as_missing() {
        let subs = split(Some("CA~NY"), Some("California~   "));
        assert_eq!(subs.names.get("NY"), Some("NY"));
    }
}
