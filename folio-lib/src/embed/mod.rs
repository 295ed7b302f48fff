//! Text embedding using local models
//!
//! Uses paraphrase-multilingual-mpnet-base-v2 via the fastembed crate
//! (ONNX runtime).
//!
//! # Model Details
//!
//! - Dimensions: 768
//! - Max tokens: 384
//!
//! # Usage
//!
//! ```ignore
//! use folio_lib::embed::{Embedder, MpnetEmbedder};
//!
//! let mut embedder = MpnetEmbedder::new()?;
//!
//! // Embed chunks (for indexing)
//! let chunk_embeddings = embedder.embed_documents(&["First chunk...", "Second chunk..."])?;
//!
//! // Embed a query (for searching)
//! let query_embedding = embedder.embed_query("good foods for protein")?;
//! ```

use crate::Result;

/// A vector embedding - fixed size array of floats
pub type Embedding = Vec<f32>;

/// Trait for text embedding models
pub trait Embedder: Send + Sync {
    /// Embed multiple chunk texts for indexing.
    ///
    /// Inputs may be batched internally; the output preserves one-to-one
    /// input ordering.
    fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Embed a single query for searching.
    ///
    /// Queries must go through the same model as the indexed chunks or
    /// similarity scores are meaningless.
    fn embed_query(&mut self, text: &str) -> Result<Embedding>;

    /// Returns the embedding dimension
    fn dimension(&self) -> usize;

    /// Returns the model name/identifier
    fn model_name(&self) -> &str;
}

mod mpnet;
pub use mpnet::*;
