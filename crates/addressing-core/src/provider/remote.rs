// crates/addressing-core/src/provider/remote.rs

//! Remote provider: per-country fetch with a write-once cache.
//!
//! Each country code moves through `unqueried -> fetching -> resolved | absent`.
//! The first predicate call for a code fetches it; the outcome, including
//! "no data upstream", error statuses and failed or timed-out requests, is
//! cached for the life of the provider and never refreshed.
//!
//! The contract stays synchronous. [`HttpDataSource`] uses the blocking
//! `reqwest` client, so inside an async runtime call the provider from a
//! blocking context (`tokio::task::spawn_blocking`).

use super::{
    entry_postal_regex, entry_subdivision_keys, entry_subdivision_names, AddressMetadataProvider,
};
use crate::error::Result;
use crate::index::CountryEntry;
use crate::model::{normalize_code, CountryRecord, RemoteCountryData};
use crate::subdivision::SubdivisionNames;
use dashmap::DashMap;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://chromium-i18n.appspot.com/ssl-address/data";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_BASE_URL: &str = "ADDRESSING_DATA_URL";
pub const ENV_TIMEOUT_SECS: &str = "ADDRESSING_HTTP_TIMEOUT_SECS";

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// Settings for the HTTP data source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Dataset root; requests go to `{base_url}/{CC}`.
    pub base_url: String,
    /// Client-level bound on each request.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("addressing-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RemoteConfig {
    /// Defaults overridden by `ADDRESSING_DATA_URL` and
    /// `ADDRESSING_HTTP_TIMEOUT_SECS` when set. An unparsable timeout is ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(e) => tracing::warn!(
                    var = ENV_TIMEOUT_SECS,
                    value = %secs,
                    error = %e,
                    "ignoring invalid timeout"
                ),
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn country_url(&self, country_code: &str) -> String {
        format!("{}/{}", self.base_url, country_code.trim().to_uppercase())
    }
}

// -----------------------------------------------------------------------------
// DATA SOURCE
// -----------------------------------------------------------------------------

/// Where the remote provider gets per-country data from.
pub trait CountryDataSource: Send + Sync {
    /// Fetches one country by normalized code.
    ///
    /// `Ok(None)` means the service has no dataset for this country. Any other
    /// failure is an `Err`; [`RemoteProvider`] caches both as absent, while
    /// the import job counts only the latter as failed.
    fn fetch(&self, country_code: &str) -> Result<Option<RemoteCountryData>>;
}

impl<S: CountryDataSource + ?Sized> CountryDataSource for Arc<S> {
    fn fetch(&self, country_code: &str) -> Result<Option<RemoteCountryData>> {
        (**self).fetch(country_code)
    }
}

/// Blocking HTTP client for the remote dataset protocol.
#[cfg(feature = "remote")]
#[derive(Clone, Debug)]
pub struct HttpDataSource {
    client: reqwest::blocking::Client,
    config: RemoteConfig,
}

#[cfg(feature = "remote")]
impl HttpDataSource {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let config = RemoteConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }
}

#[cfg(feature = "remote")]
impl CountryDataSource for HttpDataSource {
    fn fetch(&self, country_code: &str) -> Result<Option<RemoteCountryData>> {
        let url = self.config.country_url(country_code);
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(%url, "no dataset for country");
            return Ok(None);
        }
        if !status.is_success() {
            let message = format!("GET {url} returned {status}");
            return Err(crate::error::AddressError::Http(message));
        }
        let body = resp.bytes()?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        crate::snapshot::from_value_folded(value).map(Some)
    }
}

// -----------------------------------------------------------------------------
// PROVIDER
// -----------------------------------------------------------------------------

/// Provider that fetches country data on first use and memoizes the outcome.
///
/// Safe to share across threads. Two threads that miss on the same code at
/// the same time may both fetch; the first result stored is the one every
/// later call sees.
pub struct RemoteProvider<S> {
    source: S,
    // `None` = queried, no data upstream.
    cache: DashMap<String, Option<Arc<CountryEntry>>>,
}

#[cfg(feature = "remote")]
impl RemoteProvider<HttpDataSource> {
    /// Provider over the HTTP source configured from the environment
    /// (see [`RemoteConfig::from_env`]).
    pub fn new() -> Result<Self> {
        Self::with_config(RemoteConfig::from_env())
    }

    pub fn with_config(config: RemoteConfig) -> Result<Self> {
        Ok(Self::with_source(HttpDataSource::new(config)?))
    }
}

impl<S: CountryDataSource> RemoteProvider<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            cache: DashMap::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves a country, fetching it on a cache miss.
    fn lookup(&self, country_code: &str) -> Option<Arc<CountryEntry>> {
        let cc = normalize_code(country_code)?;

        if let Some(hit) = self.cache.get(&cc) {
            tracing::trace!(country = %cc, "cache hit");
            return hit.value().clone();
        }

        tracing::debug!(country = %cc, "cache miss; fetching");
        let fetched = match self.source.fetch(&cc) {
            Ok(Some(data)) => Some(Arc::new(CountryEntry::new(data.into_record(&cc)))),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(country = %cc, error = %e, "fetch failed; caching as no data");
                None
            }
        };

        // First completed fetch wins; a racing fetch adopts the stored outcome.
        self.cache.entry(cc).or_insert(fetched).value().clone()
    }

    /// The record for a country, fetching it if needed.
    pub fn country(&self, country_code: &str) -> Option<CountryRecord> {
        self.lookup(country_code).map(|e| e.record().clone())
    }

    /// Like [`AddressMetadataProvider::postal_regex`] but reports a malformed
    /// pattern instead of reading it as "no pattern".
    pub fn try_postal_regex(&self, country_code: &str) -> Result<Option<Regex>> {
        match self.lookup(country_code) {
            Some(entry) => entry.try_postal_regex(),
            None => Ok(None),
        }
    }

    /// `true` once `country_code` has been resolved or confirmed absent.
    pub fn is_cached(&self, country_code: &str) -> bool {
        normalize_code(country_code).is_some_and(|cc| self.cache.contains_key(&cc))
    }

    /// Number of cached country outcomes.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl<S: CountryDataSource> AddressMetadataProvider for RemoteProvider<S> {
    fn postal_regex(&self, country_code: &str) -> Option<Regex> {
        entry_postal_regex(self.lookup(country_code).as_deref())
    }

    fn subdivision_keys(&self, country_code: &str) -> Vec<String> {
        entry_subdivision_keys(self.lookup(country_code).as_deref())
    }

    fn subdivision_names(&self, country_code: &str) -> SubdivisionNames {
        entry_subdivision_names(self.lookup(country_code).as_deref())
    }
}

impl<S> std::fmt::Debug for RemoteProvider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteProvider")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AddressError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source that counts fetches per code.
    #[derive(Default)]
    struct CountingSource {
        data: HashMap<String, RemoteCountryData>,
        failing: Vec<String>,
        calls: DashMap<String, AtomicUsize>,
    }

    impl CountingSource {
        fn with(mut self, code: &str, zip: Option<&str>, keys: Option<&str>) -> Self {
            self.data.insert(
                code.to_string(),
                RemoteCountryData {
                    id: Some(format!("data/{code}")),
                    key: Some(code.to_string()),
                    zip: zip.map(str::to_string),
                    sub_keys: keys.map(str::to_string),
                    ..RemoteCountryData::default()
                },
            );
            self
        }

        fn calls(&self, code: &str) -> usize {
            self.calls
                .get(code)
                .map_or(0, |c| c.load(Ordering::SeqCst))
        }
    }

    impl CountryDataSource for CountingSource {
        fn fetch(&self, country_code: &str) -> Result<Option<RemoteCountryData>> {
            self.calls
                .entry(country_code.to_string())
                .or_default()
                .fetch_add(1, Ordering::SeqCst);
            if self.failing.iter().any(|c| c == country_code) {
                return Err(AddressError::Http("operation timed out".into()));
            }
            Ok(self.data.get(country_code).cloned())
        }
    }

    fn provider() -> RemoteProvider<CountingSource> {
        RemoteProvider::with_source(
            CountingSource::default()
                .with("US", Some(r"\d{5}(-\d{4})?"), Some("CA~NY~TX"))
                .with("NG", Some(r"\d{6}"), None),
        )
    }

    #[test]
    fn resolved_country_is_fetched_once() {
        let p = provider();
        assert!(p.is_valid_postal("US", "94043"));
        assert!(!p.is_valid_postal("us", "ABCDE"));
        assert!(p.subdivision_names("US").contains_key("CA"));
        assert!(p.is_valid_subdivision("US", "ca"));
        assert_eq!(p.source().calls("US"), 1);
        assert!(p.is_cached("us"));
    }

    #[test]
    fn absent_country_is_cached() {
        let p = provider();
        assert!(p.is_valid_postal("XX", "anything"));
        assert!(p.is_valid_postal("XX", "anything"));
        assert!(p.subdivision_keys("XX").is_empty());
        assert!(!p.is_valid_subdivision("XX", "anything"));
        assert_eq!(p.source().calls("XX"), 1);
        assert!(p.country("XX").is_none());
    }

    #[test]
    fn failed_fetch_becomes_absent_without_retry() {
        let mut source = CountingSource::default().with("DE", Some(r"\d{5}"), None);
        source.failing.push("DE".into());
        let p = RemoteProvider::with_source(source);

        assert!(p.postal_regex("DE").is_none());
        assert!(p.is_valid_postal("DE", "abc"));
        assert_eq!(p.source().calls("DE"), 1);
    }

    #[test]
    fn blank_code_never_fetches() {
        let p = provider();
        assert!(p.postal_regex("  ").is_none());
        assert!(!p.is_valid_postal("", ""));
        assert_eq!(p.cached_len(), 0);
    }

    #[test]
    fn blank_key_falls_back_to_requested_code() {
        let mut source = CountingSource::default();
        source.data.insert(
            "NG".into(),
            RemoteCountryData {
                key: Some(String::new()),
                zip: Some(r"\d{6}".into()),
                ..RemoteCountryData::default()
            },
        );
        let p = RemoteProvider::with_source(source);
        assert_eq!(p.country("ng").unwrap().code, "NG");
    }

    #[test]
    fn concurrent_first_queries_converge() {
        let p = Arc::new(provider());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let p = Arc::clone(&p);
                std::thread::spawn(move || p.is_valid_postal("NG", "100001"))
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
        let after_race = p.source().calls("NG");
        assert!(after_race >= 1);
        assert!(!p.is_valid_postal("NG", "ABC123"));
        assert_eq!(p.source().calls("NG"), after_race);
        assert_eq!(p.cached_len(), 1);
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = RemoteConfig::default().with_base_url("http://localhost:9/data/");
        assert_eq!(config.country_url(" us"), "http://localhost:9/data/US");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
