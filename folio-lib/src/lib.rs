//! Folio - RAG pipeline over PDF documents
//!
//! # Architecture
//!
//! ```text
//! PDF -> Loader -> Segmenter -> Chunker -> Embedder -> Chunk table (CSV)
//!                                                           |
//!                  Query -> Embedder -> Search <------------+
//!                                          |
//!                                       Results
//! ```
//!
//! # Example
//!
//! ```ignore
//! use folio_lib::{
//!     chunk::{chunk_sentences, Chunk},
//!     document::PdfLoader,
//!     embed::MpnetEmbedder,
//!     search::SearchEngine,
//!     segment::{RuleSegmenter, Segmenter},
//!     store::MemoryStore,
//! };
//!
//! // Ingest a document
//! let pages = PdfLoader::default().load("report.pdf")?;
//! let segmenter = RuleSegmenter;
//! let mut chunks = Vec::new();
//! for page in &pages {
//!     let sentences = segmenter.sentences(&page.text);
//!     for group in chunk_sentences(&sentences, 10) {
//!         chunks.push(Chunk::from_sentences(page.page_number, &group));
//!     }
//! }
//!
//! // Index and search
//! let mut engine = SearchEngine::new(MpnetEmbedder::new()?, MemoryStore::new());
//! engine.index(&chunks)?;
//! let results = engine.search("good foods for protein", 5)?;
//! ```

pub mod chunk;
pub mod document;
pub mod embed;
pub mod error;
pub mod router;
pub mod search;
pub mod segment;
pub mod store;

pub use error::{Error, Result};
