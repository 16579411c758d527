//! Error types for corpus-catalog
//!
//! This module provides error handling for every stage of catalog assembly:
//! configuration, text processing, rewriting, and catalog output.

use thiserror::Error;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration errors (rejected before any output is produced)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text processing errors
    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// Rewrite hook errors
    #[error("Rewrite error: {0}")]
    Rewrite(String),

    /// Catalog output errors
    #[error("Output error: {0}")]
    Output(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        CatalogError::Generic(err.to_string())
    }
}

impl From<regex::Error> for CatalogError {
    fn from(err: regex::Error) -> Self {
        CatalogError::TextProcessing(err.to_string())
    }
}
