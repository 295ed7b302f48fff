//! Sentence segmentation
//!
//! Splits page text into sentences ahead of chunking. The rule-based
//! implementation mirrors a punctuation sentencizer: a sentence ends at
//! `.`, `!` or `?` followed by whitespace or end of text.
//!
//! # Implementing a Segmenter
//!
//! ```ignore
//! use folio_lib::segment::Segmenter;
//!
//! struct MySegmenter { /* ... */ }
//!
//! impl Segmenter for MySegmenter {
//!     fn sentences(&self, text: &str) -> Vec<String> {
//!         // Your boundary detection here
//!         todo!()
//!     }
//! }
//! ```

/// Trait for sentence boundary detection strategies
pub trait Segmenter: Send + Sync {
    /// Split text into an ordered list of sentences.
    ///
    /// Concatenating the returned sentences (with single spaces restored
    /// between them) should cover the full input; no text is dropped.
    fn sentences(&self, text: &str) -> Vec<String>;

    /// Returns the name of this segmentation strategy
    fn name(&self) -> &str {
        "segmenter"
    }
}

/// Rule-based segmenter: boundaries at `.`/`!`/`?` followed by whitespace.
///
/// Abbreviations and decimal points mid-token do not split because they
/// are not followed by whitespace. Trailing unterminated text becomes a
/// final sentence of its own.
pub struct RuleSegmenter;

impl Segmenter for RuleSegmenter {
    fn name(&self) -> &str {
        "rule"
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for (i, c) in text.char_indices() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            let next = i + c.len_utf8();
            let at_boundary = next >= text.len()
                || text[next..].starts_with(|c: char| c.is_whitespace());
            if !at_boundary {
                continue;
            }

            let sentence = text[start..next].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            // skip whitespace to the start of the next sentence
            start = text[next..]
                .find(|c: char| !c.is_whitespace())
                .map_or(text.len(), |offset| next + offset);
        }

        if start < text.len() {
            let tail = text[start..].trim();
            if !tail.is_empty() {
                sentences.push(tail.to_string());
            }
        }

        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminators() {
        let segmenter = RuleSegmenter;
        let sentences =
            segmenter.sentences("This is a sentence. This another sentence. I like elephants.");
        assert_eq!(
            sentences,
            vec![
                "This is a sentence.",
                "This another sentence.",
                "I like elephants."
            ]
        );
    }

    #[test]
    fn test_mixed_terminators() {
        let segmenter = RuleSegmenter;
        let sentences = segmenter.sentences("Really? Yes! Good.");
        assert_eq!(sentences, vec!["Really?", "Yes!", "Good."]);
    }

    #[test]
    fn test_decimal_point_does_not_split() {
        let segmenter = RuleSegmenter;
        let sentences = segmenter.sentences("Revenue grew 3.5 percent. Margins held.");
        assert_eq!(
            sentences,
            vec!["Revenue grew 3.5 percent.", "Margins held."]
        );
    }

    #[test]
    fn test_unterminated_tail() {
        let segmenter = RuleSegmenter;
        let sentences = segmenter.sentences("Complete sentence. trailing fragment");
        assert_eq!(sentences, vec!["Complete sentence.", "trailing fragment"]);
    }

    #[test]
    fn test_empty_input() {
        let segmenter = RuleSegmenter;
        assert!(segmenter.sentences("").is_empty());
        assert!(segmenter.sentences("   ").is_empty());
    }
}
