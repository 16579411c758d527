//! Configuration for corpus-catalog
//!
//! All settings are plain serde structs with sensible defaults. A run can be
//! configured from a JSON file, from environment variables (rewrite service
//! credentials), or programmatically.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default maximum window size in words
pub const DEFAULT_MAX_WORDS: usize = 1200;

/// Default overlap between consecutive windows in words
pub const DEFAULT_OVERLAP_WORDS: usize = 100;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of raw `*.txt` documents
    pub input_dir: PathBuf,

    /// Directory the catalog file is written into
    pub output_dir: PathBuf,

    /// Chunking settings
    pub chunking: ChunkingConfig,

    /// Fixed provenance fields stamped onto every record
    pub catalog: CatalogConfig,

    /// Optional remote rewrite step
    pub rewrite: RewriteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/gutenberg/raw"),
            output_dir: PathBuf::from("data/catalogs"),
            chunking: ChunkingConfig::default(),
            catalog: CatalogConfig::default(),
            rewrite: RewriteConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        self.rewrite.validate()
    }
}

/// Word-window chunking settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Split documents into overlapping windows; otherwise one chunk per document
    pub enabled: bool,

    /// Maximum words per window
    pub max_words: usize,

    /// Words shared between consecutive windows
    pub overlap_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_words: DEFAULT_MAX_WORDS,
            overlap_words: DEFAULT_OVERLAP_WORDS,
        }
    }
}

impl ChunkingConfig {
    /// Windowed chunking with the given sizes
    pub fn windowed(max_words: usize, overlap_words: usize) -> Self {
        Self {
            enabled: true,
            max_words,
            overlap_words,
        }
    }

    /// Reject window/overlap combinations whose step would not advance.
    ///
    /// Checked even when chunking is disabled so a bad configuration never
    /// produces partial output.
    pub fn validate(&self) -> Result<()> {
        if self.overlap_words >= self.max_words {
            return Err(CatalogError::Config(format!(
                "overlap_words ({}) must be smaller than max_words ({})",
                self.overlap_words, self.max_words
            )));
        }
        Ok(())
    }

    /// Number of words the window start advances per chunk
    pub fn step(&self) -> usize {
        self.max_words.saturating_sub(self.overlap_words)
    }
}

/// Provenance constants written into every record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Source tag
    pub source: String,

    /// Language tag
    pub language: String,

    /// License string
    pub license: String,

    /// Output file name prefix; a UTC timestamp and `.jsonl` are appended
    pub file_prefix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: "gutenberg".to_string(),
            language: "en".to_string(),
            license: "Public Domain (Project Gutenberg)".to_string(),
            file_prefix: "gutenberg_catalog".to_string(),
        }
    }
}

/// Hosted paraphrase service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Apply the rewrite step during ingestion
    pub enabled: bool,

    /// Bearer token; without one the rewrite step is a pass-through
    #[serde(skip_serializing)]
    pub api_token: Option<String>,

    /// Model name on the inference endpoint
    pub model: String,

    /// Inference API base URL
    pub endpoint: String,

    /// Only this many leading characters are sent for rewriting
    pub max_chars: usize,

    /// Pause after each rewrite call, successful or not
    pub delay_ms: u64,

    /// Attempts made when the service answers with a retryable status
    pub max_retries: u32,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_token: None,
            model: "google/flan-t5-small".to_string(),
            endpoint: "https://api-inference.huggingface.co".to_string(),
            max_chars: 2000,
            delay_ms: 500,
            max_retries: 2,
            timeout_secs: 60,
        }
    }
}

impl RewriteConfig {
    /// Overlay `HUGGINGFACE_API_TOKEN`, `HUGGINGFACE_MODEL`,
    /// `PARAPHRASE_MAX_CHARS` and `PARAPHRASE_DELAY` (seconds).
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(token) = std::env::var("HUGGINGFACE_API_TOKEN") {
            if !token.trim().is_empty() {
                self.api_token = Some(token);
            }
        }
        if let Ok(model) = std::env::var("HUGGINGFACE_MODEL") {
            self.model = model;
        }
        if let Ok(max_chars) = std::env::var("PARAPHRASE_MAX_CHARS") {
            self.max_chars = max_chars.parse().map_err(|e| {
                CatalogError::Config(format!("Invalid PARAPHRASE_MAX_CHARS '{}': {}", max_chars, e))
            })?;
        }
        if let Ok(delay) = std::env::var("PARAPHRASE_DELAY") {
            let secs: f64 = delay.parse().map_err(|e| {
                CatalogError::Config(format!("Invalid PARAPHRASE_DELAY '{}': {}", delay, e))
            })?;
            self.delay_ms = (secs.max(0.0) * 1000.0) as u64;
        }
        Ok(self)
    }

    /// True when a token is present
    pub fn has_credentials(&self) -> bool {
        self.api_token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(CatalogError::Config("rewrite max_chars must be positive".to_string()));
        }
        if self.max_retries == 0 {
            return Err(CatalogError::Config("rewrite max_retries must be positive".to_string()));
        }
        Ok(())
    }
}
