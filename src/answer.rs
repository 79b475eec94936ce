//! # Answer Generation Module
//!
//! Assembles the two-message prompt and calls the chat-completion model.
//!
//! The system instruction embeds the page content (the retrieved segments
//! joined by spaces, prefixed by the page's first snippet in the SEO case)
//! together with fixed behavioral instructions; the user turn carries the
//! literal query. Assembly is deterministic: the same inputs always produce
//! the same message text, even though the generated answer may vary.

use crate::error::Error as CrateError;
use crate::index::RetrievedSegment;
use rig::agent::AgentBuilder;
use rig::completion::{CompletionModel, Prompt, PromptError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Sampling temperature used when none is configured
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Answer formatting requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Detailed prose answers; bullet points only if the question asks for SEO
    Detailed,

    /// Bullet-point SEO breakdown with advice per point
    Bulleted,
}

/// Error type for answer generation
#[derive(Debug, Error)]
pub enum AnswerError {
    /// Chat-completion error
    #[error("completion error: {0}")]
    Completion(String),
}

impl From<PromptError> for AnswerError {
    fn from(err: PromptError) -> Self {
        Self::Completion(err.to_string())
    }
}

impl From<AnswerError> for CrateError {
    fn from(err: AnswerError) -> Self {
        CrateError::Answer(err.to_string())
    }
}

/// Concatenate retrieved segment text, prefixing the first snippet when given
///
/// The snippet carries the SEO-relevant head of the page and is only passed
/// in for the SEO report; the joined retrieved text follows it directly.
pub fn build_page_content(first_snippet: Option<&str>, retrieved: &[RetrievedSegment]) -> String {
    let joined = retrieved
        .iter()
        .map(|r| r.segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    match first_snippet {
        Some(snippet) => format!("{snippet}{joined}"),
        None => joined,
    }
}

/// Build the system instruction around the page content
pub fn build_system_instruction(page_content: &str, style: PromptStyle) -> String {
    let style_instruction = match style {
        PromptStyle::Detailed => {
            "Your answers should be detailed and do not use bullet points unless asked about SEO."
        }
        PromptStyle::Bulleted => {
            "When asked for the website's SEO performance, break it down into bullet points and \
             give advice on each one. If you are not able to determine the SEO performance of \
             the website, say why in detail."
        }
    };

    format!(
        "You are a tool used to analyse websites to answer questions about the website and give \
         SEO advice based off of the website's code: {page_content} Only use the information \
         provided in the code and do not guess anything. If you don't have enough information \
         ask for more. {style_instruction}"
    )
}

/// Generate an answer from the assembled prompt
///
/// Sends the system instruction and the literal query to the completion
/// model at the given temperature and returns the generated text verbatim.
/// No output parsing, validation, or retry is performed.
#[instrument(skip(completion, system_instruction))]
pub async fn generate_answer<C>(
    completion: C,
    system_instruction: &str,
    query: &str,
    temperature: f64,
) -> Result<String, AnswerError>
where
    C: CompletionModel,
{
    let agent = AgentBuilder::new(completion)
        .preamble(system_instruction)
        .temperature(temperature)
        .build();

    let answer = agent.prompt(query).await?;
    Ok(answer)
}
