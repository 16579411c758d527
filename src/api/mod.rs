//! API layer for corpus-catalog
//!
//! This module provides the main public entry points: building a catalog from
//! a directory of documents, and rewriting an existing catalog.

pub mod pipeline;
pub mod transform;

// Re-export main API types
pub use pipeline::{ChunkOutcome, IngestPipeline};
pub use transform::rewrite_catalog;
