//! # Mock Models for Testing
//!
//! Deterministic stand-ins for the completion and embedding models so the
//! pipeline can be exercised without live API calls.
//!
//! `MockCompletionModel` returns a preset text. `MockEmbeddingModel` maps a
//! text to its letter-frequency vector, which makes cosine similarity
//! meaningful enough for retrieval assertions: texts sharing vocabulary land
//! near each other, disjoint texts do not.

use rig::completion::{
    AssistantContent, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
};
use rig::embeddings::{Embedding, EmbeddingError, EmbeddingModel};
use rig::one_or_many::OneOrMany;

/// A completion model that returns a preset response
#[derive(Debug, Clone, Default)]
pub struct MockCompletionModel {
    response: String,
}

impl MockCompletionModel {
    /// Create a mock that returns an empty response
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that returns the given text
    pub fn with_response(text: &str) -> Self {
        Self {
            response: text.to_string(),
        }
    }
}

impl CompletionModel for MockCompletionModel {
    type Response = String;

    async fn completion(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse<Self::Response>, CompletionError> {
        Ok(CompletionResponse {
            choice: OneOrMany::one(AssistantContent::text(&self.response)),
            raw_response: self.response.clone(),
        })
    }
}

/// Dimensionality of the mock letter-frequency embeddings
const MOCK_DIMS: usize = 26;

/// An embedding model that maps text to letter frequencies
#[derive(Debug, Clone, Default)]
pub struct MockEmbeddingModel;

impl MockEmbeddingModel {
    pub fn new() -> Self {
        Self
    }
}

impl EmbeddingModel for MockEmbeddingModel {
    const MAX_DOCUMENTS: usize = 1024;

    fn ndims(&self) -> usize {
        MOCK_DIMS
    }

    async fn embed_texts(
        &self,
        texts: impl IntoIterator<Item = String> + Send,
    ) -> Result<Vec<Embedding>, EmbeddingError> {
        Ok(texts
            .into_iter()
            .map(|text| {
                let vec = letter_frequencies(&text);
                Embedding {
                    document: text,
                    vec,
                }
            })
            .collect())
    }
}

fn letter_frequencies(text: &str) -> Vec<f64> {
    let mut counts = vec![0.0f64; MOCK_DIMS];
    let mut total = 0.0f64;
    for c in text.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_lowercase() {
            counts[(c as u8 - b'a') as usize] += 1.0;
            total += 1.0;
        }
    }
    if total > 0.0 {
        for count in counts.iter_mut() {
            *count /= total;
        }
    }
    counts
}
