//! Vector storage and the persisted chunk table
//!
//! # Storage Model
//!
//! Each stored item consists of:
//! - Chunk: the joined text, page number and statistics
//! - Embedding: the vector representation
//!
//! The dataset is write-once, read-many: chunks are inserted during
//! ingestion and only searched afterwards. Insertion order is preserved
//! so equal-score results come back in original chunk order.
//!
//! # Usage
//!
//! ```ignore
//! use folio_lib::store::{MemoryStore, VectorStore};
//!
//! let mut store = MemoryStore::new();
//!
//! // Insert chunks with their embeddings
//! store.insert(&chunks, &embeddings)?;
//!
//! // Search by dot-product similarity
//! let results = store.search(&query_embedding, 5)?;
//! ```

use crate::chunk::Chunk;
use crate::embed::Embedding;
use crate::Result;

/// A search result with similarity score
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The matched chunk
    pub chunk: Chunk,
    /// Dot-product similarity with the query (higher is more similar)
    pub score: f32,
}

/// Trait for vector storage backends
pub trait VectorStore: Send + Sync {
    /// Insert chunks with their embeddings.
    ///
    /// # Arguments
    /// * `chunks` - The text chunks to store
    /// * `embeddings` - Corresponding embeddings (must be same length)
    fn insert(&mut self, chunks: &[Chunk], embeddings: &[Embedding]) -> Result<()>;

    /// Search for similar chunks.
    ///
    /// # Arguments
    /// * `query_embedding` - The query vector
    /// * `k` - Number of results to return
    ///
    /// # Returns
    /// `min(k, len)` results sorted by non-increasing score; ties keep
    /// original insertion order. `k = 0` returns an empty result.
    fn search(&self, query_embedding: &Embedding, k: usize) -> Result<Vec<SearchResult>>;

    /// Get total number of stored chunks
    fn len(&self) -> usize;

    /// Check if store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all stored data
    fn clear(&mut self);
}

mod memory;
mod table;

pub use memory::*;
pub use table::*;
