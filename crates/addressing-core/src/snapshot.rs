// crates/addressing-core/src/snapshot.rs

//! # Snapshot Files
//!
//! Handles the Physical Layer of the embedded provider: one JSON file per
//! country (`US.json`, or `US.json.gz` with the `compact` feature).
//!
//! ```json
//! {
//!   "code": "US",
//!   "name": "UNITED STATES",
//!   "postalCodePattern": "\\d{5}(-\\d{4})?",
//!   "subKeys": "AL~AK~...",
//!   "subNames": "Alabama~Alaska~..."
//! }
//! ```
//!
//! Field names are matched case-insensitively on read and `key` is accepted
//! in place of `code`. Unknown fields are ignored.

use crate::error::{AddressError, Result};
use crate::model::CountryRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

pub const JSON_SUFFIX: &str = ".json";
pub const GZIP_SUFFIX: &str = ".json.gz";

/// On-disk shape of one country.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    #[serde(default, alias = "key", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "postalcodepattern", skip_serializing_if = "Option::is_none")]
    pub postal_code_pattern: Option<String>,
    #[serde(default, alias = "subkeys", skip_serializing_if = "Option::is_none")]
    pub sub_keys: Option<String>,
    #[serde(default, alias = "subnames", skip_serializing_if = "Option::is_none")]
    pub sub_names: Option<String>,
}

impl SnapshotRecord {
    /// Converts into a record. `file_key` (the file stem) backs a blank `code`.
    pub fn into_record(self, file_key: &str) -> CountryRecord {
        CountryRecord::new(self.code.as_deref(), file_key)
            .with_name(self.name)
            .with_postal_pattern(self.postal_code_pattern)
            .with_subdivisions(self.sub_keys, self.sub_names)
    }
}

impl From<&CountryRecord> for SnapshotRecord {
    fn from(record: &CountryRecord) -> Self {
        Self {
            code: Some(record.code.clone()),
            name: record.display_name.clone(),
            postal_code_pattern: record.postal_pattern.clone(),
            sub_keys: record.subdivision_keys.clone(),
            sub_names: record.subdivision_names.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// DECODING
// -----------------------------------------------------------------------------

pub fn parse_str(json: &str) -> Result<SnapshotRecord> {
    from_value_folded(serde_json::from_str(json)?)
}

pub fn parse_reader<R: Read>(reader: R) -> Result<SnapshotRecord> {
    from_value_folded(serde_json::from_reader(reader)?)
}

/// Deserializes `value` after lowercasing the top-level field names.
pub(crate) fn from_value_folded<T: DeserializeOwned>(value: Value) -> Result<T> {
    let Value::Object(fields) = value else {
        return Err(AddressError::InvalidData("expected a JSON object".into()));
    };
    let mut folded = Map::with_capacity(fields.len());
    for (k, v) in fields {
        folded.insert(k.to_lowercase(), v);
    }
    if folded.contains_key("code") {
        folded.remove("key");
    }
    Ok(serde_json::from_value(Value::Object(folded))?)
}

/// Parses in-memory `(file key, json)` pairs. Malformed entries are logged and skipped.
pub fn parse_entries<'a, I>(entries: I) -> Vec<(String, CountryRecord)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    entries
        .into_iter()
        .filter_map(|(key, json)| match parse_str(json) {
            Ok(snap) => Some((key.to_uppercase(), snap.into_record(key))),
            Err(e) => {
                tracing::warn!(country = key, error = %e, "skipping malformed snapshot entry");
                None
            }
        })
        .collect()
}

/// Loads every snapshot file in `dir`.
///
/// Fails only when the directory itself cannot be read. Individual files
/// that cannot be opened or parsed are logged and skipped.
pub fn read_dir(dir: &Path) -> Result<Vec<(String, CountryRecord)>> {
    let listing = fs::read_dir(dir).map_err(|e| {
        AddressError::NotFound(format!("Snapshot directory not found at {}: {}", dir.display(), e))
    })?;

    let mut out = Vec::new();
    for item in listing {
        let path = match item {
            Ok(item) => item.path(),
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "skipping unreadable directory entry"
                );
                continue;
            }
        };
        let Some(key) = file_key(&path) else {
            continue;
        };
        match open_stream(&path).and_then(parse_reader) {
            Ok(snap) => out.push((key.clone(), snap.into_record(&key))),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "skipping malformed snapshot file"
                );
            }
        }
    }
    tracing::debug!(dir = %dir.display(), countries = out.len(), "loaded snapshot directory");
    Ok(out)
}

/// Country key for a snapshot file path (`us.json` -> `US`), or `None` for other files.
pub fn file_key(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let lower = name.to_lowercase();
    let suffix = if lower.ends_with(GZIP_SUFFIX) {
        GZIP_SUFFIX
    } else if lower.ends_with(JSON_SUFFIX) {
        JSON_SUFFIX
    } else {
        return None;
    };
    let stem_len = name.len().checked_sub(suffix.len())?;
    let stem = name.get(..stem_len)?.trim();
    (!stem.is_empty()).then(|| stem.to_uppercase())
}

/// Opens a file, buffers it, and unwraps gzip when the name ends in `.gz`.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let gzipped = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    if !gzipped {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }
    #[cfg(not(feature = "compact"))]
    {
        Err(AddressError::InvalidData(format!(
            "{} is gzip but 'compact' is disabled",
            path.display()
        )))
    }
}

// -----------------------------------------------------------------------------
// ENCODING
// -----------------------------------------------------------------------------

pub fn to_json_pretty(record: &SnapshotRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Target path for `code` inside `dir`.
pub fn snapshot_path(dir: &Path, code: &str, compress: bool) -> PathBuf {
    let suffix = if compress { GZIP_SUFFIX } else { JSON_SUFFIX };
    dir.join(format!("{}{suffix}", code.to_uppercase()))
}

/// Writes `record` as the snapshot file for `code` and returns its path.
pub fn write_file(
    dir: &Path,
    code: &str,
    record: &SnapshotRecord,
    compress: bool,
) -> Result<PathBuf> {
    let path = snapshot_path(dir, code, compress);
    let json = to_json_pretty(record)?;

    if compress {
        #[cfg(feature = "compact")]
        {
            let writer = BufWriter::new(File::create(&path)?);
            let mut encoder = GzEncoder::new(writer, Compression::default());
            encoder.write_all(json.as_bytes())?;
            encoder.finish()?.flush()?;
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(AddressError::InvalidData(
                "Gzip requested but 'compact' disabled".into(),
            ));
        }
    } else {
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_case_insensitive() {
        let snap = parse_str(
            r#"{"Key":"US","NAME":"United States","PostalCodePattern":"\\d{5}",
                "SUBKEYS":"CA","subnames":"California","extra":1}"#,
        )
        .unwrap();
        assert_eq!(snap.code.as_deref(), Some("US"));
        assert_eq!(snap.name.as_deref(), Some("United States"));
        assert_eq!(snap.postal_code_pattern.as_deref(), Some(r"\d{5}"));
        assert_eq!(snap.sub_keys.as_deref(), Some("CA"));
        assert_eq!(snap.sub_names.as_deref(), Some("California"));
    }

    #[test]
    fn code_wins_over_key() {
        let snap = parse_str(r#"{"code":"NG","key":"XX"}"#).unwrap();
        assert_eq!(snap.code.as_deref(), Some("NG"));
    }

    #[test]
    fn blank_code_takes_file_key() {
        let record = parse_str(r#"{"code":"","postalCodePattern":"\\d{6}"}"#)
            .unwrap()
            .into_record("ng");
        assert_eq!(record.code, "NG");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let records = parse_entries([
            ("US", r#"{"code":"US"}"#),
            ("XX", "{ not json"),
            ("YY", "[1,2,3]"),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "US");
    }

    #[test]
    fn writes_camel_case_without_absent_fields() {
        let json = to_json_pretty(&SnapshotRecord {
            code: Some("DE".into()),
            postal_code_pattern: Some(r"\d{5}".into()),
            ..SnapshotRecord::default()
        })
        .unwrap();
        assert!(json.contains("\"postalCodePattern\""));
        assert!(!json.contains("subKeys"));
        assert!(!json.contains("name"));
    }

    #[test]
    fn file_keys() {
        assert_eq!(file_key(Path::new("/tmp/us.json")).as_deref(), Some("US"));
        assert_eq!(file_key(Path::new("NG.JSON.GZ")).as_deref(), Some("NG"));
        assert_eq!(file_key(Path::new("README.md")), None);
        assert_eq!(file_key(Path::new(".json")), None);
    }
}
