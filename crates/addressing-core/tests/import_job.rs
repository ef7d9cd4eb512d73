//! Import batch behavior against an in-memory data source.
#![cfg(feature = "remote")]

use addressing_core::import::{run_import, ImportOptions, ImportReport, ALL_ISO2};
use addressing_core::{
    AddressError, AddressMetadataProvider, CountryDataSource, EmbeddedProvider, RemoteCountryData,
};
use std::fs;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct FakeSource {
    fetched: Mutex<Vec<String>>,
}

impl CountryDataSource for FakeSource {
    fn fetch(&self, country_code: &str) -> addressing_core::Result<Option<RemoteCountryData>> {
        self.fetched.lock().unwrap().push(country_code.to_string());
        match country_code {
            "US" => Ok(Some(RemoteCountryData {
                key: Some("US".into()),
                name: Some("UNITED STATES".into()),
                zip: Some(r"\d{5}(-\d{4})?".into()),
                sub_keys: Some("CA~NY".into()),
                sub_names: Some("California~New York".into()),
                ..RemoteCountryData::default()
            })),
            "NG" => Ok(Some(RemoteCountryData {
                key: None,
                zip: Some(r"\d{6}".into()),
                ..RemoteCountryData::default()
            })),
            "DE" => Err(AddressError::Http("connection reset".into())),
            _ => Ok(None),
        }
    }
}

fn options(dir: &std::path::Path) -> ImportOptions {
    let mut options = ImportOptions::new(dir).with_only(["us", "NG", "de", "AQ", " "]);
    options.delay = Duration::ZERO;
    options
}

#[test]
fn filtered_run_writes_loadable_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeSource::default();

    let report = run_import(&source, &options(dir.path())).unwrap();
    assert_eq!(
        report,
        ImportReport {
            ok: 2,
            skipped: ALL_ISO2.len() - 3,
            failed: 1,
        }
    );
    assert_eq!(*source.fetched.lock().unwrap(), ["DE", "NG", "US"]);

    let provider = EmbeddedProvider::from_dir(dir.path()).unwrap();
    assert!(provider.is_valid_postal("US", "94043"));
    assert!(provider.is_valid_subdivision("US", "ny"));
    assert!(!provider.is_valid_postal("NG", "ABC123"));
    assert_eq!(provider.country("NG").unwrap().name(), "NG");
}

#[test]
fn existing_files_are_kept_unless_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let us = dir.path().join("US.json");
    fs::write(&us, r#"{"code":"US"}"#).unwrap();

    let source = FakeSource::default();
    let report = run_import(&source, &options(dir.path())).unwrap();
    assert_eq!(report.ok, 1);
    assert_eq!(fs::read_to_string(&us).unwrap(), r#"{"code":"US"}"#);
    assert!(!source.fetched.lock().unwrap().contains(&"US".to_string()));

    let mut overwrite = options(dir.path());
    overwrite.overwrite = true;
    let report = run_import(&FakeSource::default(), &overwrite).unwrap();
    assert_eq!(report.ok, 2);
    assert!(fs::read_to_string(&us).unwrap().contains("postalCodePattern"));
}
