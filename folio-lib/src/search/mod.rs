//! High-level search interface
//!
//! Combines embedder and store into a unified search API so the query is
//! guaranteed to go through the same model as the indexed chunks.
//!
//! # Usage
//!
//! ```ignore
//! use folio_lib::search::SearchEngine;
//!
//! let mut engine = SearchEngine::new(embedder, store);
//! engine.index(&chunks)?;
//! let results = engine.search("good foods for protein", 5)?;
//! ```

use tracing::info;

use crate::chunk::Chunk;
use crate::embed::Embedder;
use crate::store::{SearchResult, VectorStore};
use crate::Result;

/// Search engine combining an embedding model and a vector store.
pub struct SearchEngine<E: Embedder, S: VectorStore> {
    embedder: E,
    store: S,
}

impl<E: Embedder, S: VectorStore> SearchEngine<E, S> {
    /// Create a new search engine.
    #[must_use]
    pub fn new(embedder: E, store: S) -> Self {
        Self { embedder, store }
    }

    /// Index chunks by computing embeddings and storing them.
    ///
    /// Chunks are embedded in one batched call; the store receives them
    /// in input order.
    pub fn index(&mut self, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_documents(&texts)?;
        self.store.insert(chunks, &embeddings)?;

        info!(chunks = chunks.len(), "indexed chunks");
        Ok(())
    }

    /// Search for chunks similar to the query.
    ///
    /// Embeds the query with the engine's model and returns the top-k
    /// dot-product matches from the store.
    pub fn search(&mut self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed_query(query)?;
        self.store.search(&query_embedding, k)
    }

    /// Returns the number of indexed chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if no chunks are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns a reference to the embedder.
    #[must_use]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Returns a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a mutable reference to the store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::Embedding;
    use crate::store::MemoryStore;
    use crate::{Error, Result};

    /// Deterministic embedder for tests: maps text length to a vector.
    struct StubEmbedder;

    impl Embedder for StubEmbedder {
        fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
            Ok(texts
                .iter()
                .map(|t| vec![t.len() as f32, 1.0])
                .collect())
        }

        fn embed_query(&mut self, text: &str) -> Result<Embedding> {
            self.embed_documents(&[text])?
                .into_iter()
                .next()
                .ok_or_else(|| Error::Embedding("empty".into()))
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "stub"
        }
    }

    #[test]
    fn test_index_and_search() {
        let mut engine = SearchEngine::new(StubEmbedder, MemoryStore::new());

        let chunks = vec![
            Chunk::from_text(1, "short."),
            Chunk::from_text(2, "a considerably longer chunk of text."),
        ];
        engine.index(&chunks).unwrap();
        assert_eq!(engine.len(), 2);

        // longer text -> larger dot product against any positive query
        let results = engine.search("q", 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.page_number, 2);
    }

    #[test]
    fn test_index_empty_is_noop() {
        let mut engine = SearchEngine::new(StubEmbedder, MemoryStore::new());
        engine.index(&[]).unwrap();
        assert!(engine.is_empty());
    }
}
