//! Catalog records and duplicate suppression
//!
//! This module provides content fingerprinting, the per-run duplicate set,
//! and the catalog record structure written to the output file.

pub mod dedup;
pub mod fingerprint;
pub mod record;

// Re-export main types and functions
pub use dedup::Deduplicator;
pub use fingerprint::{FINGERPRINT_PREFIX_CHARS, Fingerprint, fingerprint, record_id};
pub use record::{CatalogRecord, RecordMetadata, RecordSynthesizer, word_count};
