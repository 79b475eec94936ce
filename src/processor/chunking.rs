//! # Text Chunking Module
//!
//! Splits cleaned page text into ordered, bounded-size chunks for embedding.
//!
//! The fetcher has already collapsed the page to a single line, so there are
//! no paragraph boundaries to respect; the chunker works on a sliding
//! character window instead. Each chunk is an exact substring of the input
//! (UTF-8 safe, never larger than the target size), split preferentially at
//! a whitespace boundary in the back half of the window, with consecutive
//! chunks overlapping so no phrase is lost at a cut point.

use crate::processor::error::ProcessError;
use serde::Serialize;
use tracing::{debug, instrument};

/// Configuration for chunking text
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Target size of each chunk in characters
    pub target_chunk_size: usize,

    /// Size of overlap between chunks in characters
    pub overlap_size: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            target_chunk_size: 4000,
            overlap_size: 200,
        }
    }
}

/// A chunk of text with its position in the source
#[derive(Debug, Clone, Serialize)]
pub struct TextChunk {
    /// The text of the chunk, an exact substring of the input
    pub text: String,

    /// Ordinal position of the chunk in the source text
    pub position: usize,

    /// Byte offset of the chunk in the source text
    pub offset: usize,
}

/// Chunk text into bounded-size overlapping pieces
///
/// # Arguments
///
/// * `text` - The text to chunk
/// * `options` - Chunking options
///
/// # Returns
///
/// An ordered vector of chunks; empty input yields an empty vector, and
/// input shorter than the target size yields exactly one chunk.
#[instrument(skip(text))]
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Result<Vec<TextChunk>, ProcessError> {
    if options.target_chunk_size == 0 {
        return Err(ProcessError::Chunking(
            "target chunk size must be greater than zero".to_string(),
        ));
    }
    if options.overlap_size >= options.target_chunk_size {
        return Err(ProcessError::Chunking(format!(
            "overlap size {} must be smaller than the target chunk size {}",
            options.overlap_size, options.target_chunk_size
        )));
    }

    let indexed: Vec<(usize, char)> = text.char_indices().collect();
    let total = indexed.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    // Byte offset of the character at `char_idx`, or the end of the text
    let byte_at = |char_idx: usize| {
        if char_idx == total {
            text.len()
        } else {
            indexed[char_idx].0
        }
    };

    let target = options.target_chunk_size;
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut position = 0usize;

    loop {
        let hard_end = (start + target).min(total);
        let end = if hard_end == total {
            total
        } else {
            find_split_point(&indexed, start, hard_end, target)
        };

        chunks.push(TextChunk {
            text: text[byte_at(start)..byte_at(end)].to_string(),
            position,
            offset: byte_at(start),
        });

        if end == total {
            break;
        }

        // Back up to create the overlap; always advance at least one char
        start = end.saturating_sub(options.overlap_size).max(start + 1);
        position += 1;
    }

    debug!("Created {} chunks", chunks.len());
    Ok(chunks)
}

/// Find a split point for the window ending at `hard_end`
///
/// Prefers the position just after the last whitespace character in the back
/// half of the window, so words stay intact and the whitespace stays with the
/// left chunk. Falls back to a hard split when the window has no whitespace.
fn find_split_point(
    indexed: &[(usize, char)],
    start: usize,
    hard_end: usize,
    target: usize,
) -> usize {
    let floor = start + target / 2;
    for idx in (floor..hard_end).rev() {
        if indexed[idx].1.is_whitespace() {
            return idx + 1;
        }
    }
    hard_end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(target: usize, overlap: usize) -> ChunkOptions {
        ChunkOptions {
            target_chunk_size: target,
            overlap_size: overlap,
        }
    }

    #[test]
    fn test_short_text_single_chunk() {
        let text = "a short page well under the target size";
        let chunks = chunk_text(text, &ChunkOptions::default()).unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, text);
        assert_eq!(chunks[0].position, 0);
        assert_eq!(chunks[0].offset, 0);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunks = chunk_text("", &ChunkOptions::default()).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunks_are_exact_substrings() {
        let text = "word ".repeat(500);
        let chunks = chunk_text(&text, &options(100, 10)).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert_eq!(
                &text[chunk.offset..chunk.offset + chunk.text.len()],
                chunk.text
            );
            assert!(chunk.text.chars().count() <= 100);
        }
    }

    #[test]
    fn test_coverage_reconstructs_input() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(40);
        let chunks = chunk_text(&text, &options(120, 20)).unwrap();

        // First chunk starts at the beginning, last chunk ends at the end,
        // and every chunk starts at or before the previous chunk's end.
        assert_eq!(chunks[0].offset, 0);
        let last = chunks.last().unwrap();
        assert_eq!(last.offset + last.text.len(), text.len());

        let mut covered = 0usize;
        for chunk in &chunks {
            assert!(chunk.offset <= covered, "gap before offset {}", chunk.offset);
            covered = covered.max(chunk.offset + chunk.text.len());
        }
        assert_eq!(covered, text.len());

        // Stitching the chunks back together by offset reproduces the input
        let mut rebuilt = String::new();
        for chunk in &chunks {
            let already = rebuilt.len().saturating_sub(chunk.offset);
            rebuilt.push_str(&chunk.text[already..]);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let text = "alpha beta gamma delta ".repeat(50);
        let chunks = chunk_text(&text, &options(100, 25)).unwrap();

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let prev_end = pair[0].offset + pair[0].text.len();
            assert!(pair[1].offset < prev_end, "chunks should overlap");
        }
    }

    #[test]
    fn test_positions_are_sequential() {
        let text = "x ".repeat(300);
        let chunks = chunk_text(&text, &options(50, 5)).unwrap();

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.position, i);
        }
    }

    #[test]
    fn test_splits_prefer_whitespace() {
        let text = "aaaa bbbb cccc dddd eeee ffff gggg hhhh iiii jjjj".repeat(10);
        let chunks = chunk_text(&text, &options(30, 5)).unwrap();

        // Every non-final chunk should end right after a whitespace character
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.text.ends_with(' '),
                "chunk should end at a word boundary: {:?}",
                chunk.text
            );
        }
    }

    #[test]
    fn test_no_whitespace_hard_split() {
        let text = "a".repeat(250);
        let chunks = chunk_text(&text, &options(100, 10)).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 100);
        }
    }

    #[test]
    fn test_multibyte_text_is_boundary_safe() {
        let text = "héllo wörld ünïcode ".repeat(30);
        let chunks = chunk_text(&text, &options(40, 8)).unwrap();

        for chunk in &chunks {
            // Slicing at a non-boundary would have panicked already; verify
            // the content round-trips as valid UTF-8 substrings.
            assert_eq!(
                &text[chunk.offset..chunk.offset + chunk.text.len()],
                chunk.text
            );
        }
    }

    #[test]
    fn test_invalid_options() {
        assert!(chunk_text("text", &options(0, 0)).is_err());
        assert!(chunk_text("text", &options(10, 10)).is_err());
        assert!(chunk_text("text", &options(10, 20)).is_err());
    }
}
