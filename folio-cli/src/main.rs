//! Folio CLI - PDF RAG pipeline end to end
//!
//! # Commands
//!
//! ```bash
//! # Extract, chunk, embed a PDF and persist the chunk table
//! folio ingest report.pdf --url https://example.com/report.pdf --out chunks.csv
//!
//! # Query a persisted chunk table
//! folio search chunks.csv "good foods for protein" -k 5
//!
//! # Tool-routing demo against a hosted chat model
//! folio route "show me the rust-lang/rust repo"
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_lib::{
    chunk::{chunk_pages, filter_short, Chunk, DEFAULT_CHUNK_SIZE, DEFAULT_MIN_TOKENS},
    document::{ensure_local, PdfLoader, DEFAULT_PAGE_OFFSET},
    embed::{Embedder, Embedding, MpnetEmbedder},
    router::{api_key_from_env, ChatClient, ToolOutcome, ToolRouter},
    search::SearchEngine,
    segment::RuleSegmenter,
    store::{load_table, save_table, MemoryStore, VectorStore},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "RAG pipeline over PDF documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, chunk and embed a PDF, writing the chunk table to CSV
    Ingest {
        /// Path to the PDF document
        pdf: String,

        /// Download URL used when the PDF is not on disk
        #[arg(long)]
        url: Option<String>,

        /// Output path for the chunk table
        #[arg(short, long, default_value = "text_chunks_and_embeddings.csv")]
        out: String,

        /// Sentences per chunk
        #[arg(
            long,
            default_value_t = DEFAULT_CHUNK_SIZE as u64,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        chunk_size: u64,

        /// Minimum estimated token count for a chunk to be kept
        #[arg(long, default_value_t = DEFAULT_MIN_TOKENS)]
        min_tokens: f32,

        /// Subtracted from zero-based page indices to get body page numbers
        #[arg(long, default_value_t = DEFAULT_PAGE_OFFSET)]
        page_offset: i64,
    },

    /// Search a persisted chunk table
    Search {
        /// Path to the chunk table written by `ingest`
        table: String,

        /// Free-text query
        query: String,

        /// Number of results to return
        #[arg(short, long, default_value_t = 5)]
        k: usize,
    },

    /// Route free-text input to tools via a hosted chat model
    Route {
        /// User input to plan tools for
        input: String,

        /// Chat model used for planning
        #[arg(long, default_value = "gpt-4o")]
        model: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            pdf,
            url,
            out,
            chunk_size,
            min_tokens,
            page_offset,
        } => ingest(
            &pdf,
            url.as_deref(),
            &out,
            chunk_size as usize,
            min_tokens,
            page_offset,
        ),
        Commands::Search { table, query, k } => search(&table, &query, k),
        Commands::Route { input, model } => route(&input, &model),
    }
}

fn ingest(
    pdf: &str,
    url: Option<&str>,
    out: &str,
    chunk_size: usize,
    min_tokens: f32,
    page_offset: i64,
) -> Result<()> {
    if let Some(url) = url {
        ensure_local(pdf, url)?;
    }

    println!("Loading '{pdf}'...");
    let pages = PdfLoader::with_offset(page_offset).load(pdf)?;
    let mean_tokens =
        pages.iter().map(|p| p.token_count).sum::<f32>() / pages.len().max(1) as f32;
    println!(
        "Extracted {} pages (mean ~{mean_tokens:.0} tokens per page)",
        pages.len()
    );

    let chunks = chunk_pages(&pages, &RuleSegmenter, chunk_size);
    let total = chunks.len();
    let chunks = filter_short(chunks, min_tokens);
    println!(
        "Created {total} chunks of {chunk_size} sentences, kept {} over {min_tokens} tokens",
        chunks.len()
    );

    println!("\nLoading embedding model (first run downloads ~1GB)...");
    let mut embedder = MpnetEmbedder::new()?;
    println!(
        "Embedding {} chunks with {} ({} dims)...",
        chunks.len(),
        embedder.model_name(),
        embedder.dimension()
    );
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    let embeddings = embedder.embed_documents(&texts)?;

    save_table(out, &chunks, &embeddings)?;
    println!("Saved chunk table to '{out}'");
    Ok(())
}

fn search(table: &str, query: &str, k: usize) -> Result<()> {
    println!("Loading chunk table '{table}'...");
    let (chunks, embeddings): (Vec<Chunk>, Vec<Embedding>) = load_table(table)?;
    println!("Loaded {} chunks", chunks.len());

    println!("Loading embedding model (first run downloads ~1GB)...");
    let embedder = MpnetEmbedder::new()?;
    let mut store = MemoryStore::new();
    store.insert(&chunks, &embeddings)?;

    let mut engine = SearchEngine::new(embedder, store);
    println!("\nQuery: '{query}'\n");
    let results = engine.search(query, k)?;

    println!("Results:");
    for result in &results {
        println!("Score: {:.4}", result.score);
        println!("Text:");
        println!("{}", textwrap::fill(&result.chunk.text, 80));
        println!("Page number: {}\n", result.chunk.page_number);
    }
    Ok(())
}

fn route(input: &str, model: &str) -> Result<()> {
    let api_key = api_key_from_env("OPENAI_API_KEY")?;
    let client = ChatClient::new(api_key, model.to_string())?;
    let mut router = ToolRouter::with_default_tools(client);

    println!("Deciding with {model}...");
    let (plan, outcomes) = router.run(input)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);

    println!("\nRunning tools...");
    for outcome in &outcomes {
        match outcome {
            ToolOutcome::Success { tool, payload } => {
                println!("\n=== {tool} ===");
                println!("{}", serde_json::to_string_pretty(payload)?);
            }
            ToolOutcome::Failed { tool, error } => {
                println!("\n=== {tool} ===");
                println!("error: {error}");
            }
            ToolOutcome::Unknown { tool } => {
                println!("\nwarning: unknown tool '{tool}', skipped");
            }
        }
    }
    Ok(())
}
