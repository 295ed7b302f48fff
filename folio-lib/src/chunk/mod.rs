//! Sentence-group chunking
//!
//! Retrieval units are groups of consecutive sentences merged into one
//! paragraph-like string. Grouping is a plain ordered partition: no
//! overlap, no reordering, last group may be short.
//!
//! Very short chunks (usually headers and page-furniture artifacts) carry
//! little retrieval value and are dropped by [`filter_short`] before
//! embedding.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::{estimate_tokens, word_count, Page};
use crate::segment::Segmenter;

/// Default number of sentences per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Default minimum estimated token count for a chunk to be retained
pub const DEFAULT_MIN_TOKENS: f32 = 30.0;

/// A chunk of text with its source page and statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Page number of the source page (offset-adjusted, may be negative)
    pub page_number: i64,
    /// Joined and normalized chunk text
    pub text: String,
    /// Character count of the joined text
    pub char_count: usize,
    /// Single-space word split count
    pub word_count: usize,
    /// Estimated token count (chars / 4)
    pub token_count: f32,
}

impl Chunk {
    /// Build a chunk by joining a group of sentences from one page.
    pub fn from_sentences(page_number: i64, sentences: &[String]) -> Self {
        Self::from_text(page_number, join_sentences(sentences))
    }

    /// Build a chunk from already-joined text, recomputing statistics.
    pub fn from_text(page_number: i64, text: impl Into<String>) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            page_number,
            char_count,
            word_count: word_count(&text),
            token_count: estimate_tokens(char_count),
            text,
        }
    }
}

/// Partition sentences into consecutive groups of at most `size`.
///
/// Produces `ceil(len / size)` groups in input order; the final group
/// holds the remainder. Empty input gives an empty result.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn chunk_sentences(sentences: &[String], size: usize) -> Vec<Vec<String>> {
    assert!(size > 0, "chunk size must be positive");
    sentences
        .chunks(size)
        .map(|group| group.to_vec())
        .collect()
}

static LOST_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Z])").expect("valid boundary regex"));

/// Join a sentence group into one string, repairing lost whitespace.
///
/// Sentences are concatenated, doubled spaces collapsed, and a space is
/// inserted after a period immediately followed by a capital letter
/// (".Next" becomes ". Next"). This is a best-effort heuristic for
/// boundaries where segmentation dropped the separator, not a guaranteed
/// reconstruction.
pub fn join_sentences(sentences: &[String]) -> String {
    let joined = sentences.join(" ").replace("  ", " ");
    LOST_SPACE.replace_all(joined.trim(), ". $1").into_owned()
}

/// Flatten pages into chunk records.
///
/// Each page's text is segmented into sentences, the sentences grouped
/// into runs of at most `size`, and each run joined into one [`Chunk`]
/// carrying the page number. Every chunk belongs to exactly one page.
pub fn chunk_pages(pages: &[Page], segmenter: &dyn Segmenter, size: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for page in pages {
        let sentences = segmenter.sentences(&page.text);
        for group in chunk_sentences(&sentences, size) {
            chunks.push(Chunk::from_sentences(page.page_number, &group));
        }
    }
    chunks
}

/// Drop chunks whose estimated token count is at or below `min_tokens`.
///
/// The filter is irreversible: dropped chunks are not retained anywhere.
pub fn filter_short(chunks: Vec<Chunk>, min_tokens: f32) -> Vec<Chunk> {
    chunks
        .into_iter()
        .filter(|chunk| chunk.token_count > min_tokens)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Sentence {i}.")).collect()
    }

    #[test]
    fn test_even_partition() {
        let groups = chunk_sentences(&sentences(20), 10);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 10));
    }

    #[test]
    fn test_remainder_partition() {
        // 25 sentences at size 10 -> [10, 10, 5]
        let groups = chunk_sentences(&sentences(25), 10);
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
    }

    #[test]
    fn test_partition_preserves_order_and_content() {
        let input = sentences(25);
        let groups = chunk_sentences(&input, 10);
        let rejoined: Vec<String> = groups.into_iter().flatten().collect();
        assert_eq!(rejoined, input);
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk_sentences(&[], 10).is_empty());
    }

    #[test]
    fn test_join_inserts_lost_spaces() {
        let group = vec!["First ends here.Second starts.".to_string()];
        assert_eq!(join_sentences(&group), "First ends here. Second starts.");
    }

    #[test]
    fn test_join_collapses_doubled_spaces() {
        let group = vec!["Leading  double.".to_string(), "Tail.".to_string()];
        assert_eq!(join_sentences(&group), "Leading double. Tail.");
    }

    #[test]
    fn test_join_does_not_touch_lowercase() {
        let group = vec!["See www.example.com for details.".to_string()];
        assert_eq!(
            join_sentences(&group),
            "See www.example.com for details."
        );
    }

    #[test]
    fn test_chunk_stats() {
        let chunk = Chunk::from_sentences(3, &["Twelve chars.".to_string()]);
        assert_eq!(chunk.page_number, 3);
        assert_eq!(chunk.text, "Twelve chars.");
        assert_eq!(chunk.char_count, 13);
        assert_eq!(chunk.word_count, 2);
        assert_eq!(chunk.token_count, 3.25);
    }

    #[test]
    fn test_chunk_pages_flattens_with_page_numbers() {
        use crate::segment::RuleSegmenter;

        let pages = vec![
            Page::new(-1, "One. Two. Three."),
            Page::new(0, ""),
            Page::new(1, "Four."),
        ];
        let chunks = chunk_pages(&pages, &RuleSegmenter, 2);

        // page -1 -> [2, 1] sentences, empty page -> nothing, page 1 -> [1]
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].page_number, -1);
        assert_eq!(chunks[0].text, "One. Two.");
        assert_eq!(chunks[1].text, "Three.");
        assert_eq!(chunks[2].page_number, 1);
        assert_eq!(chunks[2].text, "Four.");
    }

    #[test]
    fn test_filter_short_threshold_is_exclusive() {
        let keep = Chunk {
            page_number: 0,
            text: String::new(),
            char_count: 0,
            word_count: 0,
            token_count: 30.25,
        };
        let drop_exact = Chunk {
            token_count: 30.0,
            ..keep.clone()
        };
        let drop_below = Chunk {
            token_count: 2.5,
            ..keep.clone()
        };

        let retained = filter_short(vec![keep.clone(), drop_exact, drop_below], 30.0);
        assert_eq!(retained, vec![keep]);
    }
}
