//! # Page Fetcher Module
//!
//! First stage of the analysis pipeline: downloads a single webpage and
//! prepares its text for chunking and prompt interpolation.
//!
//! The fetcher performs one GET with a browser-emulating header set, decodes
//! the body as text, and runs a cleaning pass that replaces every literal
//! `{` and `}` with a space and collapses newlines to spaces. Brace stripping
//! matters because the cleaned text is later interpolated into a templated
//! system instruction; leftover braces would collide with the template
//! delimiters. The first 4000 characters are kept aside as `first_snippet`,
//! which carries the SEO-relevant head of the page (title, meta tags).
//!
//! No retries and no HTML structure awareness: a failed request or a
//! non-success status surfaces as a `FetchError` and ends the session.

mod error;

pub use error::FetchError;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

/// Number of characters kept as the page's first snippet.
pub const FIRST_SNIPPET_CHARS: usize = 4000;

/// A fetched page with cleaned text and its SEO-relevant head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDocument {
    /// URL the page was fetched from
    pub url: String,

    /// Full page text after brace and newline cleaning
    pub raw_text: String,

    /// First 4000 characters of the cleaned text
    pub first_snippet: String,
}

/// HTTP fetcher with a fixed browser-emulating header set
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// Create a fetcher with the default header set
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .default_headers(browser_headers())
            .build()?;
        Ok(Self { client })
    }

    /// Fetch a page and return its cleaned text
    ///
    /// # Arguments
    ///
    /// * `url` - A syntactically valid http or https URL
    ///
    /// # Returns
    ///
    /// A `PageDocument` holding the cleaned page text and first snippet
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<PageDocument, FetchError> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let response = self.client.get(parsed.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: parsed.to_string(),
                status: status.as_u16(),
            });
        }

        // Best-effort text decoding from the response charset
        let body = response.text().await?;
        let raw_text = clean_page_text(&body);
        let first_snippet = first_snippet(&raw_text);

        debug!(
            "Fetched {} characters from {}",
            raw_text.chars().count(),
            parsed
        );

        Ok(PageDocument {
            url: parsed.to_string(),
            raw_text,
            first_snippet,
        })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.11 (KHTML, like Gecko) \
             Chrome/23.0.1271.64 Safari/537.11",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.8"),
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

/// Replace template-breaking characters in raw page text
///
/// Every `{` and `}` becomes a space, and newlines (including CR from CRLF
/// pairs) collapse to spaces, so the result is a single line safe to embed
/// in a templated instruction.
pub fn clean_page_text(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '{' | '}' | '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

/// First `FIRST_SNIPPET_CHARS` characters of the cleaned text, char-boundary safe
fn first_snippet(text: &str) -> String {
    text.chars().take(FIRST_SNIPPET_CHARS).collect()
}
