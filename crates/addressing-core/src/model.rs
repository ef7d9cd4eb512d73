// crates/addressing-core/src/model.rs
use serde::Deserialize;

/// Address metadata for one country.
///
/// `subdivision_keys` and `subdivision_names` keep the `~`-joined form used
/// by both the snapshot files and the remote dataset; see
/// [`crate::subdivision::split`] for how they are read. The on-disk shape is
/// [`crate::snapshot::SnapshotRecord`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountryRecord {
    /// Normalized (trimmed, uppercase) ISO alpha-2 code. Never empty.
    pub code: String,
    pub display_name: Option<String>,
    /// Raw regular expression body, without anchors.
    pub postal_pattern: Option<String>,
    pub subdivision_keys: Option<String>,
    pub subdivision_names: Option<String>,
}

impl CountryRecord {
    /// Creates a record, normalizing `code`.
    ///
    /// When `code` is blank the record takes `fallback` (the key it was looked
    /// up or loaded under) instead, so the code is never empty.
    pub fn new(code: Option<&str>, fallback: &str) -> Self {
        let code = code
            .and_then(normalize_code)
            .or_else(|| normalize_code(fallback))
            .unwrap_or_default();
        Self {
            code,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.display_name = non_blank(name);
        self
    }

    pub fn with_postal_pattern(mut self, pattern: Option<String>) -> Self {
        self.postal_pattern = non_blank(pattern);
        self
    }

    pub fn with_subdivisions(mut self, keys: Option<String>, names: Option<String>) -> Self {
        self.subdivision_keys = keys;
        self.subdivision_names = names;
        self
    }

    /// Display name, or the code when the source supplied none.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.code)
    }
}

/// Trims and uppercases a country code. Returns `None` for blank input.
///
/// ```rust
/// use addressing_core::normalize_code;
///
/// assert_eq!(normalize_code(" us ").as_deref(), Some("US"));
/// assert_eq!(normalize_code("   "), None);
/// ```
pub fn normalize_code(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Country payload as served by the remote dataset
/// (`{base_url}/{CC}`), e.g. `{"id":"data/US","key":"US","zip":"\\d{5}(-\\d{4})?",...}`.
///
/// NOTE: This type mirrors the external dataset. Unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RemoteCountryData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub sub_keys: Option<String>,
    #[serde(default)]
    pub sub_names: Option<String>,
}

impl RemoteCountryData {
    /// Maps the remote payload into the internal record shape.
    pub fn into_record(self, requested: &str) -> CountryRecord {
        CountryRecord::new(self.key.as_deref(), requested)
            .with_name(self.name)
            .with_postal_pattern(self.zip)
            .with_subdivisions(self.sub_keys, self.sub_names)
    }
}
