//! # Analysis Pipeline Module
//!
//! Ties the stages together: fetch, chunk, index, retrieve, answer.
//!
//! Each call runs the sequence to completion on a fresh in-memory index.
//! There is no shared state between calls and nothing survives a call except
//! the returned `QueryResult`, so no locking discipline is needed.

use crate::answer::{build_page_content, build_system_instruction, generate_answer, PromptStyle};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::index::SegmentIndex;
use crate::model::Client;
use crate::processor::{segment_page, Segment};
use rig::{completion::CompletionModel, embeddings::EmbeddingModel};
use serde::Serialize;
use tracing::{info, instrument};

/// Fixed query used for the SEO report
pub const SEO_QUERY: &str = "does the website have good seo? break it down in bullet points \
                             with advice for each one. give praise when good seo is found.";

/// Per-call options for one analysis
///
/// These are the few parameters that varied between iterations of the
/// original tool, collapsed into explicit configuration.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Number of segments to retrieve
    pub k: usize,

    /// Answer formatting requested from the model
    pub prompt_style: PromptStyle,

    /// Whether to prefix the page's first snippet onto the retrieved text
    pub include_first_snippet: bool,
}

impl AnalysisOptions {
    /// Options for the SEO report: broad retrieval, bulleted, snippet included
    pub fn seo_report() -> Self {
        Self {
            k: 10,
            prompt_style: PromptStyle::Bulleted,
            include_first_snippet: true,
        }
    }

    /// Options for free-text questions: narrow retrieval, detailed, no snippet
    pub fn question() -> Self {
        Self {
            k: 4,
            prompt_style: PromptStyle::Detailed,
            include_first_snippet: false,
        }
    }
}

/// Result of one analysis query
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// The generated answer, verbatim
    pub answer_text: String,

    /// The segments the answer was grounded in, most similar first
    pub retrieved: Vec<Segment>,
}

/// Analyzer over the rate-limited OpenAI client
pub type OpenAiAnalyzer = Analyzer<
    crate::model::ThrottledCompletionModel<rig::providers::openai::CompletionModel>,
    crate::model::ThrottledEmbeddingModel<rig::providers::openai::EmbeddingModel>,
>;

/// End-to-end webpage analyzer
pub struct Analyzer<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    client: Client<C, E>,
    fetcher: Fetcher,
    config: AnalyzerConfig,
}

impl<C, E> Analyzer<C, E>
where
    C: CompletionModel + Clone,
    E: EmbeddingModel,
{
    /// Create an analyzer from a model client and pipeline configuration
    pub fn new(client: Client<C, E>, config: AnalyzerConfig) -> Result<Self> {
        let fetcher = Fetcher::new()?;
        Ok(Self {
            client,
            fetcher,
            config,
        })
    }

    /// Produce an SEO breakdown of the page at `url`
    pub async fn seo_report(&self, url: &str) -> Result<QueryResult> {
        let mut options = AnalysisOptions::seo_report();
        options.k = self.config.seo_retrieval_count;
        self.analyze(url, SEO_QUERY, &options).await
    }

    /// Answer a free-text question about the page at `url`
    pub async fn answer_question(&self, url: &str, question: &str) -> Result<QueryResult> {
        let mut options = AnalysisOptions::question();
        options.k = self.config.question_retrieval_count;
        self.analyze(url, question, &options).await
    }

    /// Run the full pipeline for one query
    #[instrument(skip(self))]
    pub async fn analyze(
        &self,
        url: &str,
        query: &str,
        options: &AnalysisOptions,
    ) -> Result<QueryResult> {
        let page = self.fetcher.fetch(url).await?;
        let segments = segment_page(&page, &self.config.chunk_options)?;

        let index = SegmentIndex::build(self.client.embedding(), segments).await?;

        // Retrieval breadth never exceeds the number of indexed segments
        let k = options.k.min(index.len());
        let retrieved = index.retrieve(self.client.embedding(), query, k).await?;

        info!("Retrieved {} of {} segments", retrieved.len(), index.len());

        let snippet = options
            .include_first_snippet
            .then_some(page.first_snippet.as_str());
        let page_content = build_page_content(snippet, &retrieved);
        let system_instruction = build_system_instruction(&page_content, options.prompt_style);

        let answer_text = generate_answer(
            self.client.completion().clone(),
            &system_instruction,
            query,
            self.config.temperature,
        )
        .await?;

        Ok(QueryResult {
            answer_text,
            retrieved: retrieved.into_iter().map(|r| r.segment).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seo_options() {
        let options = AnalysisOptions::seo_report();

        assert_eq!(options.k, 10);
        assert_eq!(options.prompt_style, PromptStyle::Bulleted);
        assert!(options.include_first_snippet);
    }

    #[test]
    fn test_question_options() {
        let options = AnalysisOptions::question();

        assert_eq!(options.k, 4);
        assert_eq!(options.prompt_style, PromptStyle::Detailed);
        assert!(!options.include_first_snippet);
    }

    #[test]
    fn test_seo_query_requests_bullets() {
        assert!(SEO_QUERY.contains("bullet points"));
        assert!(SEO_QUERY.contains("seo"));
    }
}
