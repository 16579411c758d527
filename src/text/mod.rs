//! Text processing for corpus-catalog
//!
//! This module provides document loading, whitespace normalization and
//! word-window chunking for raw document text.

pub mod chunking;
pub mod document;
pub mod normalize;

// Re-export main types and functions
pub use chunking::{Chunk, WordChunker};
pub use document::{Document, decode_lossy};
pub use normalize::TextNormalizer;
