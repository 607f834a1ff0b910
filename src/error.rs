//! Error types for the storefront core.

use thiserror::Error;

/// Result type for storefront operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by region resolution, session acquisition, lookups and
/// cart submission.
#[derive(Debug, Error)]
pub enum Error {
    /// Region code is not in the static table. Fatal before any session exists.
    #[error("Unknown region '{0}'. Valid regions: us, uk, au, hk, eu, kr, jp")]
    InvalidRegion(String),

    /// The session could not be established (transport or browser failure).
    #[error("Failed to acquire session: {0}")]
    SessionAcquisition(String),

    /// A required field was missing from the product page.
    #[error("Product {sku} couldn't be found (missing {field})")]
    ProductNotFound { sku: String, field: &'static str },

    /// The stock endpoint returned something other than the expected JSON map.
    #[error("Stock lookup failed for {sku}: {reason}")]
    StockLookup { sku: String, reason: String },

    /// The cart endpoint answered with a non-2xx status.
    #[error("Add to cart failed with status {status}")]
    SubmissionFailed { status: u16 },

    /// A GET endpoint answered with a non-2xx status.
    #[error("Request to {url} failed with status: {status}")]
    Http { status: u16, url: String },

    /// Underlying HTTP transport error.
    #[error("Transport error: {0}")]
    Transport(#[from] wreq::Error),

    /// Invalid client configuration (proxy, timeouts).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns true when the failure only concerns the current call and the
    /// session remains usable.
    pub fn is_per_call(&self) -> bool {
        matches!(
            self,
            Error::ProductNotFound { .. }
                | Error::StockLookup { .. }
                | Error::SubmissionFailed { .. }
                | Error::Http { .. }
        )
    }
}
