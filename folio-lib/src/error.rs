//! Error types for folio

use thiserror::Error;

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in folio operations
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or extract text from a PDF
    #[error("pdf error: {0}")]
    Pdf(String),

    /// Failed to download a source document
    #[error("download error: {0}")]
    Download(String),

    /// Failed to load or run the embedding model
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Failed to store or retrieve from vector store
    #[error("store error: {0}")]
    Store(String),

    /// Failed to read or write the persisted chunk table
    #[error("chunk table error: {0}")]
    Table(String),

    /// Tool routing failed: plan request, plan parse, or tool call
    #[error("router error: {0}")]
    Router(String),

    /// Invalid input provided
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
