//! Whitespace normalization
//!
//! Collapses line-ending variants, oversized blank-line gaps and runs of
//! horizontal whitespace while keeping paragraph breaks intact.

use crate::error::Result;
use regex::Regex;

/// Whitespace normalizer for raw document text
pub struct TextNormalizer {
    line_ending_regex: Regex,
    blank_lines_regex: Regex,
    horizontal_regex: Regex,
}

impl TextNormalizer {
    /// Create a normalizer, compiling its patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            line_ending_regex: Regex::new(r"\r\n?")?,
            blank_lines_regex: Regex::new(r"\n{3,}")?,
            horizontal_regex: Regex::new(r"[ \t]+")?,
        })
    }

    /// Normalize `text`.
    ///
    /// Line endings must be unified before blank lines are collapsed,
    /// otherwise `\r\n\r\n\r\n` would never match the newline run.
    pub fn normalize(&self, text: &str) -> String {
        let text = self.line_ending_regex.replace_all(text, "\n");
        let text = self.blank_lines_regex.replace_all(&text, "\n\n");
        let text = self.horizontal_regex.replace_all(&text, " ");
        text.trim().to_string()
    }
}
