//! Document loading and per-page statistics
//!
//! A loaded document is a flat list of [`Page`] records, one per PDF page.
//! Pages are built once during loading and never mutated afterwards.
//!
//! # Statistics
//!
//! The counts kept on each page are deliberately crude and must stay that
//! way: the minimum-token filter downstream compares against the same
//! chars/4 estimate, so swapping in a real tokenizer would silently change
//! which chunks survive ingestion.

use serde::{Deserialize, Serialize};

mod fetch;
mod pdf;

pub use fetch::*;
pub use pdf::*;

/// Characters per token, the approximation used throughout the pipeline.
pub const CHARS_PER_TOKEN: f32 = 4.0;

/// A single extracted PDF page with its text and statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    /// Zero-based page index minus the loader's page offset. May be
    /// negative for front matter when the offset points at the body.
    pub page_number: i64,
    /// Cleaned page text (newlines collapsed to spaces, trimmed)
    pub text: String,
    /// Character count of the cleaned text
    pub char_count: usize,
    /// Single-space word split count
    pub word_count: usize,
    /// Rough sentence count from splitting on ". "
    pub sentence_count_raw: usize,
    /// Estimated token count (chars / 4)
    pub token_count: f32,
}

impl Page {
    /// Build a page record from raw extracted text.
    pub fn new(page_number: i64, raw_text: &str) -> Self {
        let text = clean_text(raw_text);
        let char_count = text.chars().count();
        Self {
            page_number,
            char_count,
            word_count: word_count(&text),
            sentence_count_raw: text.split(". ").count(),
            token_count: estimate_tokens(char_count),
            text,
        }
    }
}

/// Collapse newlines to spaces and trim surrounding whitespace.
pub fn clean_text(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}

/// Count words by splitting on single spaces.
///
/// Matches the persisted data: consecutive spaces contribute empty items
/// and empty text counts as one word.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Estimate token count from character count (1 token ~= 4 chars).
pub fn estimate_tokens(char_count: usize) -> f32 {
    char_count as f32 / CHARS_PER_TOKEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_newlines() {
        assert_eq!(clean_text("line one\nline two\n"), "line one line two");
    }

    #[test]
    fn test_word_count_single_space_split() {
        assert_eq!(word_count("three little words"), 3);
        // double space yields an empty item, as in the source data
        assert_eq!(word_count("two  spaces"), 3);
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(120), 30.0);
        assert_eq!(estimate_tokens(2), 0.5);
    }

    #[test]
    fn test_page_stats() {
        let page = Page::new(-41, "First sentence. Second sentence.\n");
        assert_eq!(page.page_number, -41);
        assert_eq!(page.text, "First sentence. Second sentence.");
        assert_eq!(page.char_count, 32);
        assert_eq!(page.word_count, 4);
        assert_eq!(page.sentence_count_raw, 2);
        assert_eq!(page.token_count, 8.0);
    }
}
