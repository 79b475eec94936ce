//! Error types for the processor module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for processor operations
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Invalid chunking parameters
    #[error("chunking error: {0}")]
    Chunking(String),

    /// Page text produced no segments
    #[error("page produced no text segments")]
    EmptyDocument,
}

impl From<ProcessError> for CrateError {
    fn from(err: ProcessError) -> Self {
        CrateError::Process(err.to_string())
    }
}
