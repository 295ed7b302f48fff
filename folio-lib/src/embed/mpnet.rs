use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::embed::{Embedder, Embedding};
use crate::{Error, Result};

/// Embedder using sentence-transformers/paraphrase-multilingual-mpnet-base-v2.
///
/// Uses fastembed for ONNX-based inference. Produces 768-dimensional
/// embeddings with normalized output, so dot-product scores rank the same
/// as cosine similarity.
pub struct MpnetEmbedder {
    model: TextEmbedding,
}

impl MpnetEmbedder {
    /// Create a new mpnet embedder.
    ///
    /// Downloads the model on first use (~1GB).
    pub fn new() -> Result<Self> {
        let opts = InitOptions::new(EmbeddingModel::ParaphraseMLMpnetBaseV2)
            .with_show_download_progress(true);

        TextEmbedding::try_new(opts)
            .map(|model| Self { model })
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}

impl Embedder for MpnetEmbedder {
    fn model_name(&self) -> &str {
        "sentence-transformers/paraphrase-multilingual-mpnet-base-v2"
    }

    fn dimension(&self) -> usize {
        768
    }

    fn embed_documents(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
        self.model
            .embed(texts.to_vec(), None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }

    fn embed_query(&mut self, text: &str) -> Result<Embedding> {
        // mpnet uses no query prefix, unlike the BGE family
        self.model
            .embed(vec![text], None)
            .map_err(|e| Error::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("model returned no embeddings".to_string()))
    }
}
