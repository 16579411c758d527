//! Catalog file storage for corpus-catalog
//!
//! This module provides the line-delimited catalog writer and the statistics
//! reported for each run.

pub mod catalog_file;

// Re-export main types
pub use catalog_file::{CatalogWriter, catalog_path};

use std::path::PathBuf;

/// Ingestion run statistics
#[derive(Debug, Clone)]
pub struct IngestStats {
    /// Catalog file that was written
    pub output_path: PathBuf,

    /// Input files enumerated
    pub documents_seen: usize,

    /// Input files that could not be read
    pub documents_skipped: usize,

    /// Chunks produced across all documents
    pub chunks_seen: usize,

    /// Records written to the catalog
    pub records_written: usize,

    /// Chunks suppressed as duplicates
    pub duplicates_suppressed: usize,

    /// Records whose rewrite failed and kept their original text
    pub rewrite_failures: usize,

    /// Total processing time in seconds
    pub processing_time: f64,
}

/// Catalog rewrite statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformStats {
    /// Records parsed from the input catalog
    pub records_read: usize,

    /// Lines written to the output catalog
    pub records_written: usize,

    /// Records whose text was replaced
    pub rewritten: usize,

    /// Records annotated with a rewrite error
    pub failed: usize,

    /// Input lines that could not be parsed
    pub skipped_lines: usize,
}
