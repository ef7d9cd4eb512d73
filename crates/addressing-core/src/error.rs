// crates/addressing-core/src/error.rs
use thiserror::Error;

/// Errors raised by loaders, data sources and diagnostics.
///
/// Validation predicates never return these: missing data and bad input are
/// answered with a boolean. An error only reaches the caller from a
/// constructor, a loader, the import job or an explicit diagnostic call.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("HTTP error: {0}")]
    Http(String),

    /// A postal pattern in the source data does not compile.
    #[error("invalid postal pattern for {country}: {source}")]
    Pattern {
        country: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, AddressError>;

#[cfg(feature = "remote")]
impl From<reqwest::Error> for AddressError {
    fn from(e: reqwest::Error) -> Self {
        AddressError::Http(e.to_string())
    }
}
