// crates/addressing-core/src/lib.rs

//! # addressing-core
//!
//! Country-specific postal-address validation. Given an ISO 3166-1 alpha-2
//! code, a provider supplies the postal-code pattern and the subdivision
//! (state/province) codes of that country, and answers validation
//! predicates built on them.
//!
//! Three providers implement [`AddressMetadataProvider`]:
//! - [`NoDataProvider`]: presence/length checks only, the safe default.
//! - [`EmbeddedProvider`]: an in-memory index loaded once from a snapshot.
//! - [`RemoteProvider`]: fetches per country on first use and caches the
//!   outcome (including "no data") for the life of the provider.
//!
//! ```rust
//! use addressing_core::{AddressMetadataProvider, EmbeddedProvider};
//!
//! let provider = EmbeddedProvider::bundled();
//! assert!(provider.is_valid_postal("US", "94043"));
//! assert!(!provider.is_valid_postal("US", "ABCDE"));
//! assert!(provider.is_valid_subdivision("us", "ca"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
#[cfg(feature = "remote")]
pub mod import;
pub mod index;
pub mod model;
pub mod pattern;
pub mod provider;
pub mod rules;
pub mod snapshot;
pub mod subdivision;

// Re-exports
pub use crate::error::{AddressError, Result};
pub use crate::index::{CountryEntry, CountryIndex};
pub use crate::model::{normalize_code, CountryRecord, RemoteCountryData};
pub use crate::provider::embedded::EmbeddedProvider;
pub use crate::provider::nodata::NoDataProvider;
pub use crate::provider::remote::{CountryDataSource, RemoteConfig, RemoteProvider};
#[cfg(feature = "remote")]
pub use crate::provider::remote::HttpDataSource;
pub use crate::provider::AddressMetadataProvider;
pub use crate::rules::{validate_address, Address, Violation};
pub use crate::subdivision::{SubdivisionNames, Subdivisions};
