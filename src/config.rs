//! # Configuration Module
//!
//! Explicit configuration for model access and the analysis pipeline.
//! Credentials are held in a `ClientConfig` passed into constructors; they
//! are never written into process environment state.
//!
//! ## Key Components
//!
//! - `ClientConfig`: API key, model selection, and rate-limit quotas
//! - `AnalyzerConfig`: chunking, sampling temperature, and retrieval breadth
//!   for the two analysis modes

use crate::answer::DEFAULT_TEMPERATURE;
use crate::error::{Error, Result};
use crate::processor::ChunkOptions;

/// Completion model used when none is configured.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-16k";

/// Embedding model used when none is configured.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Configuration for the hosted model client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for the hosted model provider
    pub api_key: String,

    /// Chat-completion model name
    pub completion_model: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Completion requests allowed per minute
    pub completions_per_minute: u32,

    /// Embedding requests allowed per minute
    pub embeddings_per_minute: u32,
}

impl ClientConfig {
    /// Create a configuration with default model selection
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            completions_per_minute: 500,
            embeddings_per_minute: 3000,
        }
    }

    /// Read the API key from `OPENAI_API_KEY` into an explicit configuration
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Auth("OPENAI_API_KEY environment variable must be set".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Create a new builder
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(api_key),
        }
    }
}

/// Builder for ClientConfig
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the chat-completion model name
    pub fn completion_model(mut self, model: impl Into<String>) -> Self {
        self.config.completion_model = model.into();
        self
    }

    /// Set the embedding model name
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config.embedding_model = model.into();
        self
    }

    /// Set the completion rate limit
    pub fn completions_per_minute(mut self, quota: u32) -> Self {
        self.config.completions_per_minute = quota;
        self
    }

    /// Set the embedding rate limit
    pub fn embeddings_per_minute(mut self, quota: u32) -> Self {
        self.config.embeddings_per_minute = quota;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Configuration for the analysis pipeline
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Options for chunking the fetched page text
    pub chunk_options: ChunkOptions,

    /// Sampling temperature for answer generation
    pub temperature: f64,

    /// Number of segments to retrieve for the SEO report
    pub seo_retrieval_count: usize,

    /// Number of segments to retrieve for free-text questions
    pub question_retrieval_count: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            chunk_options: ChunkOptions::default(),
            temperature: DEFAULT_TEMPERATURE,
            seo_retrieval_count: 10,
            question_retrieval_count: 4,
        }
    }
}

/// Builder for AnalyzerConfig
#[derive(Debug, Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk options
    pub fn chunk_options(mut self, chunk_options: ChunkOptions) -> Self {
        self.config.chunk_options = chunk_options;
        self
    }

    /// Set the target chunk size in characters
    pub fn target_chunk_size(mut self, target_chunk_size: usize) -> Self {
        self.config.chunk_options.target_chunk_size = target_chunk_size;
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set the retrieval count for the SEO report
    pub fn seo_retrieval_count(mut self, count: usize) -> Self {
        self.config.seo_retrieval_count = count;
        self
    }

    /// Set the retrieval count for free-text questions
    pub fn question_retrieval_count(mut self, count: usize) -> Self {
        self.config.question_retrieval_count = count;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl AnalyzerConfig {
    /// Create a new builder
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("test-key");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.completion_model, DEFAULT_COMPLETION_MODEL);
        assert_eq!(config.embedding_model, DEFAULT_EMBEDDING_MODEL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::builder("test-key")
            .completion_model("gpt-4o-mini")
            .embedding_model("text-embedding-3-small")
            .completions_per_minute(30)
            .embeddings_per_minute(100)
            .build();

        assert_eq!(config.completion_model, "gpt-4o-mini");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert_eq!(config.completions_per_minute, 30);
        assert_eq!(config.embeddings_per_minute, 100);
    }

    #[test]
    fn test_analyzer_config_defaults() {
        let config = AnalyzerConfig::default();

        assert_eq!(config.chunk_options.target_chunk_size, 4000);
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.seo_retrieval_count, 10);
        assert_eq!(config.question_retrieval_count, 4);
    }

    #[test]
    fn test_analyzer_config_builder() {
        let config = AnalyzerConfig::builder()
            .target_chunk_size(1000)
            .temperature(0.5)
            .seo_retrieval_count(6)
            .question_retrieval_count(2)
            .build();

        assert_eq!(config.chunk_options.target_chunk_size, 1000);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.seo_retrieval_count, 6);
        assert_eq!(config.question_retrieval_count, 2);
    }
}
