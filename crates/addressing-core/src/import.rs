// crates/addressing-core/src/import.rs
#![cfg(feature = "remote")]

//! Offline snapshot import.
//!
//! Fetches each country from a [`CountryDataSource`] and writes one snapshot
//! file per country in the format [`EmbeddedProvider::from_dir`] reads.
//! A failing country is logged and counted; it never aborts the batch.
//!
//! [`EmbeddedProvider::from_dir`]: crate::EmbeddedProvider::from_dir

use crate::error::Result;
use crate::model::normalize_code;
use crate::provider::remote::CountryDataSource;
use crate::snapshot::{self, SnapshotRecord};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Client timeout used for import runs.
pub const IMPORT_TIMEOUT: Duration = Duration::from_secs(15);
/// Pause after each successful fetch.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// ISO 3166-1 alpha-2 codes attempted by an import run.
#[rustfmt::skip]
pub const ALL_ISO2: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR",
    "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL",
    "CM", "CN", "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO",
    "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA",
    "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT",
    "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO",
    "IQ", "IR", "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP",
    "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY",
    "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ", "MR",
    "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI", "NL",
    "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM", "PN",
    "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC", "SD",
    "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV", "SX",
    "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR", "TT",
    "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI", "VN",
    "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

#[derive(Clone, Debug)]
pub struct ImportOptions {
    pub out_dir: PathBuf,
    /// Restrict the run to these codes; empty means all of [`ALL_ISO2`].
    pub only: HashSet<String>,
    /// Replace files that already exist.
    pub overwrite: bool,
    /// Write `<CC>.json.gz` instead of `<CC>.json`.
    pub compress: bool,
    pub delay: Duration,
}

impl ImportOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            only: HashSet::new(),
            overwrite: false,
            compress: false,
            delay: DEFAULT_DELAY,
        }
    }

    /// Sets the country filter; codes are normalized and blanks dropped.
    pub fn with_only<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.only = codes
            .into_iter()
            .filter_map(|c| normalize_code(c.as_ref()))
            .collect();
        self
    }
}

/// Per-run counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub ok: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Runs one import batch.
///
/// Only failing to create the output directory is fatal.
pub fn run_import(
    source: &dyn CountryDataSource,
    options: &ImportOptions,
) -> Result<ImportReport> {
    fs::create_dir_all(&options.out_dir)?;
    let mut report = ImportReport::default();

    for &cc in ALL_ISO2 {
        if !options.only.is_empty() && !options.only.contains(cc) {
            report.skipped += 1;
            continue;
        }

        let path = snapshot::snapshot_path(&options.out_dir, cc, options.compress);
        if !options.overwrite && path.exists() {
            tracing::info!(country = cc, "skip (exists)");
            report.skipped += 1;
            continue;
        }

        let data = match source.fetch(cc) {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::warn!(country = cc, "no dataset");
                report.skipped += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!(country = cc, error = %e, "fetch failed");
                report.failed += 1;
                continue;
            }
        };

        let mut record = SnapshotRecord::from(&data.into_record(cc));
        record.name.get_or_insert_with(|| cc.to_string());

        match snapshot::write_file(&options.out_dir, cc, &record, options.compress) {
            Ok(written) => {
                tracing::info!(country = cc, path = %written.display(), "ok");
                report.ok += 1;
            }
            Err(e) => {
                tracing::warn!(country = cc, error = %e, "write failed");
                report.failed += 1;
            }
        }

        if !options.delay.is_zero() {
            std::thread::sleep(options.delay);
        }
    }

    tracing::info!(
        ok = report.ok,
        skipped = report.skipped,
        failed = report.failed,
        out = %options.out_dir.display(),
        "import finished"
    );
    Ok(report)
}
