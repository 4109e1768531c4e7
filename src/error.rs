//! Error types for dripcheck

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed underlying cause of a catalog failure
pub type BoxedCause = Box<dyn StdError + Send + Sync>;

/// Unified error type for dripcheck operations
#[derive(Debug, Error)]
pub enum DripcheckError {
    /// The catalog source could not be read or is not tabular data.
    /// Fatal for the load attempt; no partial index is produced.
    #[error("Catalog unavailable ({origin}): {source}")]
    CatalogUnavailable {
        origin: String,
        #[source]
        source: BoxedCause,
    },
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
}

impl DripcheckError {
    pub fn catalog_unavailable(origin: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        DripcheckError::CatalogUnavailable {
            origin: origin.into(),
            source: source.into(),
        }
    }
}

/// Result alias for dripcheck operations
pub type Result<T> = std::result::Result<T, DripcheckError>;
