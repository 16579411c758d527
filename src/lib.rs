//! # corpus-catalog
//!
//! Builds a deduplicated, chunked JSONL catalog from a directory of raw text
//! documents. Each document is whitespace-normalized, optionally split into
//! overlapping word windows, optionally rewritten, fingerprinted, and written
//! as one self-contained JSON record per line.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use corpus_catalog::{ChunkingConfig, Config, IngestPipeline};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         input_dir: "data/gutenberg/raw".into(),
//!         output_dir: "data/catalogs".into(),
//!         chunking: ChunkingConfig::windowed(1200, 100),
//!         ..Default::default()
//!     };
//!
//!     let stats = IngestPipeline::new(config)?.run()?;
//!     println!("Wrote {} records to {}", stats.records_written, stats.output_path.display());
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod rewrite;
pub mod storage;
pub mod text;
pub mod utils;

// Re-export main API types
pub use api::{ChunkOutcome, IngestPipeline, rewrite_catalog};
pub use config::{CatalogConfig, ChunkingConfig, Config, RewriteConfig};
pub use error::{CatalogError, Result};

// Re-export commonly used types
pub use catalog::{CatalogRecord, Deduplicator, RecordMetadata};
pub use rewrite::{PassThrough, Rewriter};
pub use storage::{IngestStats, TransformStats};
pub use text::{Chunk, Document};
