//! Rate-limited wrappers around completion and embedding models
//!
//! Both wrappers wait on a `governor` limiter before delegating, so bursts
//! of segment embeddings or repeated analyses stay inside the provider's
//! per-minute quota. The wrappers implement the same `rig` traits as the
//! models they wrap and can be used anywhere those are expected.

use std::sync::Arc;

use governor::DefaultDirectRateLimiter;
use rig::completion::{
    self, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
};
use rig::embeddings::{Embedding, EmbeddingError, EmbeddingModel};
use tracing::{debug_span, info_span, Instrument};

/// Raw response passthrough for the throttled completion model
pub struct ThrottledResponse<T> {
    #[allow(dead_code)]
    raw: T,
}

/// Completion model that waits on a rate limiter before each request
#[derive(Clone)]
pub struct ThrottledCompletionModel<M: CompletionModel> {
    inner: M,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl<M> ThrottledCompletionModel<M>
where
    M: CompletionModel,
{
    pub fn new(inner: M, limiter: DefaultDirectRateLimiter) -> Self {
        Self {
            inner,
            limiter: Arc::new(limiter),
        }
    }
}

impl<M: CompletionModel> CompletionModel for ThrottledCompletionModel<M> {
    type Response = ThrottledResponse<M::Response>;

    async fn completion(
        &self,
        request: CompletionRequest,
    ) -> Result<completion::CompletionResponse<Self::Response>, CompletionError> {
        self.limiter
            .until_ready()
            .instrument(debug_span!("completion_limiter"))
            .await;
        let response = self
            .inner
            .completion(request)
            .instrument(info_span!("completion"))
            .await;
        response.map(|response| CompletionResponse {
            choice: response.choice,
            raw_response: ThrottledResponse {
                raw: response.raw_response,
            },
        })
    }
}

/// Embedding model that waits on a rate limiter before each request
#[derive(Clone)]
pub struct ThrottledEmbeddingModel<M: EmbeddingModel> {
    inner: M,
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl<M> ThrottledEmbeddingModel<M>
where
    M: EmbeddingModel,
{
    pub fn new(inner: M, limiter: DefaultDirectRateLimiter) -> Self {
        Self {
            inner,
            limiter: Arc::new(limiter),
        }
    }
}

impl<M: EmbeddingModel> EmbeddingModel for ThrottledEmbeddingModel<M> {
    const MAX_DOCUMENTS: usize = M::MAX_DOCUMENTS;

    fn ndims(&self) -> usize {
        self.inner.ndims()
    }

    async fn embed_texts(
        &self,
        texts: impl IntoIterator<Item = String> + Send,
    ) -> Result<Vec<Embedding>, EmbeddingError> {
        self.limiter
            .until_ready()
            .instrument(debug_span!("embedding_limiter"))
            .await;
        self.inner
            .embed_texts(texts)
            .instrument(info_span!("embed_texts"))
            .await
    }
}
