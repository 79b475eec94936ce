//! Error types for the index module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for index operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// Embedding generation error
    #[error("embedding generation error: {0}")]
    Embedding(String),

    /// Index construction requires at least one segment
    #[error("cannot build an index from an empty segment set")]
    EmptySegments,
}

impl From<IndexError> for CrateError {
    fn from(err: IndexError) -> Self {
        CrateError::Index(err.to_string())
    }
}
