//! Error types for the siteseer crate

use thiserror::Error;

/// Result type for siteseer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for siteseer operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Page fetching error
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Content processing error
    #[error("Process error: {0}")]
    Process(String),

    /// Index construction or retrieval error
    #[error("Index error: {0}")]
    Index(String),

    /// Answer generation error
    #[error("Answer error: {0}")]
    Answer(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
