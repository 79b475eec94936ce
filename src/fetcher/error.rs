//! Error types for the fetcher module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for fetcher operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// URL scheme other than http/https
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// Non-success HTTP status
    #[error("request for {url} returned status {status}")]
    Status {
        /// URL that was requested
        url: String,
        /// HTTP status code returned
        status: u16,
    },
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => CrateError::Http(e),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}
