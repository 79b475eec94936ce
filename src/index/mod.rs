//! # Similarity Index Module
//!
//! In-memory nearest-neighbor index over embedded page segments.
//!
//! One index is built per analysis session from that session's segments and
//! dropped when the session's queries complete; nothing is persisted. Lookup
//! is cosine similarity over the full entry set, which is plenty at the scale
//! of a single page.

mod error;

pub use error::IndexError;

use crate::processor::Segment;
use rig::embeddings::{Embedding, EmbeddingModel};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// A retrieved segment with its similarity score
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedSegment {
    /// The retrieved segment
    pub segment: Segment,

    /// Cosine similarity between the segment and the query
    pub score: f64,
}

/// In-memory similarity index over one page's segments
#[derive(Debug)]
pub struct SegmentIndex {
    entries: Vec<(Embedding, Segment)>,
}

impl SegmentIndex {
    /// Embed the segments and build the index
    ///
    /// Every segment must embed successfully; any embedding failure aborts
    /// the build and no partial index is returned.
    #[instrument(skip(model, segments), fields(segments = segments.len()))]
    pub async fn build<E>(model: &E, segments: Vec<Segment>) -> Result<Self, IndexError>
    where
        E: EmbeddingModel,
    {
        if segments.is_empty() {
            return Err(IndexError::EmptySegments);
        }

        let mut entries = Vec::with_capacity(segments.len());

        // Hosted embedding APIs cap the documents accepted per request
        for batch in segments.chunks(E::MAX_DOCUMENTS.max(1)) {
            let texts: Vec<String> = batch.iter().map(|s| s.text.clone()).collect();
            let embeddings = model
                .embed_texts(texts)
                .await
                .map_err(|e| IndexError::Embedding(e.to_string()))?;

            if embeddings.len() != batch.len() {
                return Err(IndexError::Embedding(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    embeddings.len()
                )));
            }

            entries.extend(embeddings.into_iter().zip(batch.iter().cloned()));
        }

        debug!("Indexed {} segments", entries.len());
        Ok(Self { entries })
    }

    /// Number of indexed segments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no segments
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embed a query and return its `k` nearest segments
    ///
    /// Results are ordered by decreasing similarity. `k = 0` returns an
    /// empty sequence without calling the embedding model; `k` larger than
    /// the index returns the full index content, still distance-ordered.
    #[instrument(skip(self, model))]
    pub async fn retrieve<E>(
        &self,
        model: &E,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedSegment>, IndexError>
    where
        E: EmbeddingModel,
    {
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = model
            .embed_texts(vec![query.to_string()])
            .await
            .map_err(|e| IndexError::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| {
                IndexError::Embedding("no embedding returned for query".to_string())
            })?;

        Ok(self.top_k(&query_embedding, k))
    }

    /// Return the `k` segments nearest to a precomputed query embedding
    pub fn top_k(&self, query: &Embedding, k: usize) -> Vec<RetrievedSegment> {
        let mut scored: Vec<RetrievedSegment> = self
            .entries
            .iter()
            .map(|(embedding, segment)| RetrievedSegment {
                segment: segment.clone(),
                score: cosine_similarity(&embedding.vec, &query.vec),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        scored
    }
}

/// Cosine similarity of two vectors; zero-norm vectors compare as 0
fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock::MockEmbeddingModel;

    fn segment(text: &str, position: usize) -> Segment {
        Segment {
            text: text.to_string(),
            source_url: "https://example.com/".to_string(),
            position,
        }
    }

    fn embedding(vec: Vec<f64>) -> Embedding {
        Embedding {
            document: String::new(),
            vec,
        }
    }

    fn hand_built_index() -> SegmentIndex {
        SegmentIndex {
            entries: vec![
                (embedding(vec![1.0, 0.0]), segment("east", 0)),
                (embedding(vec![0.0, 1.0]), segment("north", 1)),
                (embedding(vec![0.7, 0.7]), segment("northeast", 2)),
            ],
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_top_k_orders_by_similarity() {
        let index = hand_built_index();
        let results = index.top_k(&embedding(vec![1.0, 0.1]), 3);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].segment.text, "east");
        assert_eq!(results[1].segment.text, "northeast");
        assert_eq!(results[2].segment.text, "north");
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
    }

    #[test]
    fn test_top_k_zero_returns_empty() {
        let index = hand_built_index();
        assert!(index.top_k(&embedding(vec![1.0, 0.0]), 0).is_empty());
    }

    #[test]
    fn test_top_k_beyond_size_returns_all() {
        let index = hand_built_index();
        let results = index.top_k(&embedding(vec![1.0, 0.0]), 50);

        assert_eq!(results.len(), index.len());
    }

    #[tokio::test]
    async fn test_build_rejects_empty_segments() {
        let model = MockEmbeddingModel::new();
        let err = SegmentIndex::build(&model, Vec::new()).await.unwrap_err();

        assert!(matches!(err, IndexError::EmptySegments));
    }

    #[tokio::test]
    async fn test_build_and_retrieve() {
        let model = MockEmbeddingModel::new();
        let segments = vec![
            segment("aaaa aaaa aaaa", 0),
            segment("bbbb bbbb bbbb", 1),
            segment("cccc cccc cccc", 2),
        ];

        let index = SegmentIndex::build(&model, segments).await.unwrap();
        assert_eq!(index.len(), 3);

        // The mock embedder maps texts to letter frequencies, so a query made
        // of the same letter lands on the matching segment.
        let results = index.retrieve(&model, "bbbb bbbb", 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].segment.text, "bbbb bbbb bbbb");
    }

    #[tokio::test]
    async fn test_retrieve_k_zero() {
        let model = MockEmbeddingModel::new();
        let index = SegmentIndex::build(&model, vec![segment("text", 0)])
            .await
            .unwrap();

        let results = index.retrieve(&model, "anything", 0).await.unwrap();
        assert!(results.is_empty());
    }
}
