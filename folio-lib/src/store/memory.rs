use crate::chunk::Chunk;
use crate::embed::Embedding;
use crate::store::{SearchResult, VectorStore};
use crate::{Error, Result};

/// In-memory vector store using a brute-force dot-product scan.
///
/// Suitable for single-document corpora (a few thousand chunks). Entries
/// are kept in insertion order, which is also the tie-break order for
/// equal scores.
pub struct MemoryStore {
    entries: Vec<(Chunk, Embedding)>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Iterate over stored chunks in insertion order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|(chunk, _)| chunk)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStore for MemoryStore {
    fn insert(&mut self, chunks: &[Chunk], embeddings: &[Embedding]) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(Error::Store(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        self.entries
            .extend(chunks.iter().cloned().zip(embeddings.iter().cloned()));
        Ok(())
    }

    fn search(&self, query: &Embedding, k: usize) -> Result<Vec<SearchResult>> {
        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: dot_product(query, embedding),
            })
            .collect();

        // stable sort keeps insertion order for equal scores
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(k);
        Ok(results)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Compute the dot product of two vectors.
///
/// For normalized embeddings this ranks identically to cosine similarity.
fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same length");
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_chunk(page: i64, text: &str) -> Chunk {
        Chunk::from_sentences(page, &[text.to_string()])
    }

    #[test]
    fn test_dot_product() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert_eq!(dot_product(&a, &b), 32.0);
    }

    #[test]
    fn test_dot_product_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(dot_product(&a, &b), 0.0);
    }

    #[test]
    fn test_insert_and_len() {
        let mut store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());

        let chunks = vec![make_chunk(1, "hello."), make_chunk(2, "world.")];
        let embeddings = vec![vec![1.0, 0.0], vec![0.0, 1.0]];

        store.insert(&chunks, &embeddings).unwrap();
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_insert_length_mismatch() {
        let mut store = MemoryStore::new();
        let chunks = vec![make_chunk(1, "hello.")];
        let result = store.insert(&chunks, &[]);
        assert!(matches!(result, Err(Error::Store(_))));
    }

    #[test]
    fn test_search_returns_sorted() {
        let mut store = MemoryStore::new();

        let chunks = vec![
            make_chunk(1, "far away."),
            make_chunk(2, "very close."),
            make_chunk(3, "medium."),
        ];
        // Query will be [1, 0, 0]
        let embeddings = vec![
            vec![0.0, 1.0, 0.0], // orthogonal to query
            vec![1.0, 0.0, 0.0], // identical to query
            vec![0.5, 0.5, 0.0], // somewhat similar
        ];

        store.insert(&chunks, &embeddings).unwrap();

        let query = vec![1.0, 0.0, 0.0];
        let results = store.search(&query, 3).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].chunk.page_number, 2); // highest score
        assert_eq!(results[1].chunk.page_number, 3); // medium
        assert_eq!(results[2].chunk.page_number, 1); // lowest
    }

    #[test]
    fn test_search_respects_k() {
        let mut store = MemoryStore::new();

        let chunks = vec![
            make_chunk(1, "a."),
            make_chunk(2, "b."),
            make_chunk(3, "c."),
        ];
        let embeddings = vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![0.8, 0.2]];

        store.insert(&chunks, &embeddings).unwrap();

        let query = vec![1.0, 0.0];
        assert_eq!(store.search(&query, 2).unwrap().len(), 2);
        assert!(store.search(&query, 0).unwrap().is_empty());
    }

    #[test]
    fn test_search_k_larger_than_store() {
        let mut store = MemoryStore::new();

        let chunks = vec![make_chunk(1, "only one.")];
        let embeddings = vec![vec![1.0, 0.0]];

        store.insert(&chunks, &embeddings).unwrap();

        let query = vec![1.0, 0.0];
        let results = store.search(&query, 100).unwrap();

        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut store = MemoryStore::new();

        let chunks = vec![
            make_chunk(10, "first inserted."),
            make_chunk(20, "second inserted."),
            make_chunk(30, "third inserted."),
        ];
        // identical embeddings, so all scores tie
        let embeddings = vec![vec![1.0, 0.0]; 3];

        store.insert(&chunks, &embeddings).unwrap();

        let query = vec![1.0, 0.0];
        let results = store.search(&query, 3).unwrap();

        let pages: Vec<i64> = results.iter().map(|r| r.chunk.page_number).collect();
        assert_eq!(pages, vec![10, 20, 30]);
    }

    #[test]
    fn test_empty_search() {
        let store = MemoryStore::new();
        let query = vec![1.0, 0.0];
        let results = store.search(&query, 5).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();

        let chunks = vec![make_chunk(1, "hello.")];
        let embeddings = vec![vec![1.0]];

        store.insert(&chunks, &embeddings).unwrap();
        assert_eq!(store.len(), 1);

        store.clear();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }
}
