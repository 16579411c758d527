//! Catalog record structure and synthesis

use super::fingerprint::record_id;
use crate::config::CatalogConfig;
use crate::text::Document;
use serde::{Deserialize, Serialize};

/// One line of the output catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRecord {
    /// Hash of document name and chunk index
    pub id: String,

    /// Provenance tag
    pub source: String,

    /// Document title (file stem)
    pub title: String,

    /// Unknown at ingestion time
    pub author: String,

    pub language: String,

    pub license: String,

    /// Record payload
    pub text: String,

    /// Word count of `text`
    pub token_count: usize,

    pub metadata: RecordMetadata,
}

/// Per-record provenance and processing annotations
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordMetadata {
    /// Path of the originating file
    pub file_path: String,

    /// Position of the chunk within its document
    pub chunk_index: usize,

    /// Set when the rewrite hook replaced the text
    #[serde(rename = "paraphrased", default, skip_serializing_if = "Option::is_none")]
    pub rewritten: Option<bool>,

    /// Set when the rewrite hook failed and the original text was kept
    #[serde(rename = "paraphrase_error", default, skip_serializing_if = "Option::is_none")]
    pub rewrite_error: Option<String>,
}

/// Whitespace-delimited word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Builds catalog records stamped with fixed provenance fields
#[derive(Debug, Clone)]
pub struct RecordSynthesizer {
    catalog: CatalogConfig,
}

impl RecordSynthesizer {
    pub fn new(catalog: CatalogConfig) -> Self {
        Self { catalog }
    }

    /// Build the record for chunk `chunk_index` of `document` carrying `text`
    pub fn synthesize(&self, document: &Document, chunk_index: usize, text: String) -> CatalogRecord {
        CatalogRecord {
            id: record_id(&document.name, chunk_index),
            source: self.catalog.source.clone(),
            title: document.title.clone(),
            author: String::new(),
            language: self.catalog.language.clone(),
            license: self.catalog.license.clone(),
            token_count: word_count(&text),
            text,
            metadata: RecordMetadata {
                file_path: document.path.display().to_string(),
                chunk_index,
                ..Default::default()
            },
        }
    }
}

impl Default for RecordSynthesizer {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
