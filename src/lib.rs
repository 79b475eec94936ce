//! # siteseer - Webpage SEO Reports and Q&A with RAG
//!
//! This crate analyses a single webpage with a small retrieval-augmented
//! generation pipeline: it fetches the page, chunks its text, embeds the
//! chunks into an in-memory similarity index, retrieves the segments closest
//! to a query, and asks a hosted chat-completion model to answer using only
//! that retrieved content.
//!
//! Two entry points mirror the two analysis modes:
//!
//! - An SEO report: a fixed query asking for a bullet-point SEO breakdown,
//!   with the first raw snippet of the page prefixed onto the retrieved text.
//! - Free-text Q&A: the caller's question answered in a detailed style from
//!   retrieved segments alone.
//!
//! Every analysis builds a fresh index and drops it when the call returns;
//! nothing persists between sessions.
//!
//! ## Example
//!
//! ```rust,no_run
//! use siteseer::analyzer::Analyzer;
//! use siteseer::config::{AnalyzerConfig, ClientConfig};
//! use siteseer::model::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new_openai(&ClientConfig::from_env()?)?;
//!     let analyzer = Analyzer::new(client, AnalyzerConfig::default())?;
//!
//!     let report = analyzer.seo_report("https://example.com").await?;
//!     println!("{}", report.answer_text);
//!
//!     let answer = analyzer
//!         .answer_question("https://example.com", "What is this website about?")
//!         .await?;
//!     println!("{}", answer.answer_text);
//!     Ok(())
//! }
//! ```

mod error;

pub mod analyzer;
pub mod answer;
pub mod config;
pub mod fetcher;
pub mod index;
pub mod model;
pub mod processor;

pub use error::{Error, Result};

/// Re-export of the types most callers need
pub mod prelude {
    pub use crate::analyzer::{AnalysisOptions, Analyzer, QueryResult, SEO_QUERY};
    pub use crate::answer::PromptStyle;
    pub use crate::config::{AnalyzerConfig, ClientConfig};
    pub use crate::error::{Error, Result};
    pub use crate::model::Client;
}
