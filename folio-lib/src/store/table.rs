use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chunk::Chunk;
use crate::embed::Embedding;
use crate::{Error, Result};

/// One row of the persisted chunk table.
///
/// Column names match the persisted data format:
/// `page_number, sentence_chunk, chunk_char_count, chunk_word_count,
/// chunk_token_count, embedding`. The embedding column holds the vector
/// as a bracketed whitespace-separated numeric string.
#[derive(Debug, Serialize, Deserialize)]
struct ChunkRow {
    page_number: i64,
    sentence_chunk: String,
    chunk_char_count: usize,
    chunk_word_count: usize,
    chunk_token_count: f32,
    embedding: String,
}

/// Write chunks and their embeddings to a CSV chunk table.
///
/// `chunks` and `embeddings` must be parallel slices.
pub fn save_table(
    path: impl AsRef<Path>,
    chunks: &[Chunk],
    embeddings: &[Embedding],
) -> Result<()> {
    if chunks.len() != embeddings.len() {
        return Err(Error::Table(format!(
            "{} chunks but {} embeddings",
            chunks.len(),
            embeddings.len()
        )));
    }

    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::Table(e.to_string()))?;

    for (chunk, embedding) in chunks.iter().zip(embeddings) {
        let row = ChunkRow {
            page_number: chunk.page_number,
            sentence_chunk: chunk.text.clone(),
            chunk_char_count: chunk.char_count,
            chunk_word_count: chunk.word_count,
            chunk_token_count: chunk.token_count,
            embedding: format_embedding(embedding),
        };
        writer
            .serialize(row)
            .map_err(|e| Error::Table(e.to_string()))?;
    }
    writer.flush().map_err(|e| Error::Table(e.to_string()))?;

    info!(path = %path.display(), rows = chunks.len(), "saved chunk table");
    Ok(())
}

/// Load a CSV chunk table back into parallel chunk and embedding lists.
///
/// A malformed embedding string is an error; there is no row-level
/// recovery.
pub fn load_table(path: impl AsRef<Path>) -> Result<(Vec<Chunk>, Vec<Embedding>)> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::Table(e.to_string()))?;

    let mut chunks = Vec::new();
    let mut embeddings = Vec::new();

    for record in reader.deserialize() {
        let row: ChunkRow = record.map_err(|e| Error::Table(e.to_string()))?;
        embeddings.push(parse_embedding(&row.embedding)?);
        chunks.push(Chunk {
            page_number: row.page_number,
            text: row.sentence_chunk,
            char_count: row.chunk_char_count,
            word_count: row.chunk_word_count,
            token_count: row.chunk_token_count,
        });
    }

    info!(path = %path.display(), rows = chunks.len(), "loaded chunk table");
    Ok((chunks, embeddings))
}

/// Serialize a vector as `[v1 v2 ...]`.
fn format_embedding(embedding: &[f32]) -> String {
    let values: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(" "))
}

/// Parse a `[v1 v2 ...]` string back into a vector.
fn parse_embedding(text: &str) -> Result<Embedding> {
    text.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split_whitespace()
        .map(|value| {
            value
                .parse::<f32>()
                .map_err(|e| Error::Table(format!("bad embedding value {value:?}: {e}")))
        })
        .collect()
}
