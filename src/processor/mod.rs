//! Content processor module
//!
//! Turns a fetched page into the ordered segments the indexer embeds.

mod chunking;
mod error;

pub use chunking::{chunk_text, ChunkOptions, TextChunk};
pub use error::ProcessError;

use crate::fetcher::PageDocument;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A bounded-size slice of page text prepared for embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// The text of the segment
    pub text: String,

    /// URL of the page the segment came from
    pub source_url: String,

    /// Ordinal position of the segment in the page
    pub position: usize,
}

/// Chunk a fetched page into ordered segments
///
/// # Arguments
///
/// * `page` - The fetched page
/// * `options` - Chunking options
///
/// # Returns
///
/// A non-empty ordered vector of segments; a page whose cleaned text chunks
/// to nothing is an error, since the index requires at least one segment.
#[instrument(skip(page), fields(url = page.url))]
pub fn segment_page(
    page: &PageDocument,
    options: &ChunkOptions,
) -> Result<Vec<Segment>, ProcessError> {
    let chunks = chunk_text(&page.raw_text, options)?;
    if chunks.is_empty() {
        return Err(ProcessError::EmptyDocument);
    }

    info!("Created {} segments from {}", chunks.len(), page.url);

    Ok(chunks
        .into_iter()
        .map(|chunk| Segment {
            text: chunk.text,
            source_url: page.url.clone(),
            position: chunk.position,
        })
        .collect())
}
