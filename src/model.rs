//! # Model Client Module
//!
//! Unified client wrapping the chat-completion and embedding models behind
//! the `rig` traits, with rate limiting to protect API quotas.
//!
//! The client is generic so the pipeline can run against any provider pair —
//! the OpenAI constructor is the production path, and the mock models in
//! [`mock`] slot into the same type for tests.

use std::num::NonZeroU32;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use governor::{Quota, RateLimiter};
use rig::{completion::CompletionModel, embeddings::EmbeddingModel, providers::openai};

pub mod mock;
pub mod throttle;

pub use throttle::{ThrottledCompletionModel, ThrottledEmbeddingModel};

/// Rate-limited OpenAI client used by the CLI
pub type OpenAiClient = Client<
    ThrottledCompletionModel<openai::CompletionModel>,
    ThrottledEmbeddingModel<openai::EmbeddingModel>,
>;

/// Unified client over a completion model and an embedding model
#[derive(Debug, Clone)]
pub struct Client<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    completion_model: C,
    embedding_model: E,
}

impl OpenAiClient {
    /// Build an OpenAI client from an explicit configuration
    ///
    /// The API key travels inside the config; it is never read from or
    /// written into ambient process state here.
    pub fn new_openai(config: &ClientConfig) -> Result<Self> {
        let openai_client = openai::Client::new(&config.api_key);

        let completion_quota = NonZeroU32::new(config.completions_per_minute).ok_or_else(|| {
            Error::InvalidRequest("completions_per_minute must be non-zero".to_string())
        })?;
        let embedding_quota = NonZeroU32::new(config.embeddings_per_minute).ok_or_else(|| {
            Error::InvalidRequest("embeddings_per_minute must be non-zero".to_string())
        })?;

        let completion_model = ThrottledCompletionModel::new(
            openai_client.completion_model(&config.completion_model),
            RateLimiter::direct(Quota::per_minute(completion_quota)),
        );
        let embedding_model = ThrottledEmbeddingModel::new(
            openai_client.embedding_model(&config.embedding_model),
            RateLimiter::direct(Quota::per_minute(embedding_quota)),
        );

        Ok(Self {
            completion_model,
            embedding_model,
        })
    }
}

impl<C, E> Client<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    /// Wrap an arbitrary model pair
    pub fn from_models(completion_model: C, embedding_model: E) -> Self {
        Self {
            completion_model,
            embedding_model,
        }
    }

    /// The completion model
    pub fn completion(&self) -> &C {
        &self.completion_model
    }

    /// The embedding model
    pub fn embedding(&self) -> &E {
        &self.embedding_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock::{MockCompletionModel, MockEmbeddingModel};

    #[test]
    fn test_new_openai_rejects_zero_quota() {
        let config = ClientConfig::builder("key").completions_per_minute(0).build();
        assert!(Client::new_openai(&config).is_err());
    }

    #[test]
    fn test_from_models_accessors() {
        let client = Client::from_models(
            MockCompletionModel::with_response("hello"),
            MockEmbeddingModel::new(),
        );

        let _completion = client.completion();
        let _embedding = client.embedding();
    }
}
