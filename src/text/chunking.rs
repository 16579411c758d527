//! Word-window chunking
//!
//! Splits normalized text into fixed-size windows of words where consecutive
//! windows share `overlap_words` words. With chunking disabled a document is
//! passed through as a single chunk.

use crate::config::ChunkingConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One window of a document's word sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Zero-based position within the document
    pub index: usize,

    /// Chunk payload
    pub text: String,

    /// Offset of the first word in the document's word sequence
    pub start_word: usize,

    /// Offset one past the last word
    pub end_word: usize,
}

impl Chunk {
    /// Number of words in the chunk
    pub fn word_count(&self) -> usize {
        self.end_word - self.start_word
    }
}

/// Word-window chunker
#[derive(Debug, Clone)]
pub struct WordChunker {
    config: ChunkingConfig,
}

impl WordChunker {
    /// Create a chunker, rejecting configurations whose step would be zero
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a chunker with default configuration
    pub fn with_default_config() -> Result<Self> {
        Self::new(ChunkingConfig::default())
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk normalized text. Empty text yields no chunks.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        if self.config.enabled {
            self.chunk_by_windows(text)
        } else {
            Self::whole_document(text)
        }
    }

    /// The entire text as chunk 0, paragraph breaks kept
    fn whole_document(text: &str) -> Vec<Chunk> {
        let word_count = text.split_whitespace().count();
        if word_count == 0 {
            return Vec::new();
        }

        vec![Chunk {
            index: 0,
            text: text.to_string(),
            start_word: 0,
            end_word: word_count,
        }]
    }

    /// Overlapping windows joined with single spaces.
    ///
    /// Stops after the first window that reaches the last word, so every
    /// window except the final one is full and shares exactly
    /// `overlap_words` words with its successor.
    fn chunk_by_windows(&self, text: &str) -> Vec<Chunk> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let step = self.config.step();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < words.len() {
            let end = std::cmp::min(start + self.config.max_words, words.len());
            chunks.push(Chunk {
                index: chunks.len(),
                text: words[start..end].join(" "),
                start_word: start,
                end_word: end,
            });

            if end == words.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}
