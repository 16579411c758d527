//! Input documents

use crate::error::{CatalogError, Result};
use std::path::{Path, PathBuf};

/// One input text file, read once per run
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File name including extension; feeds record identities
    pub name: String,

    /// File name without extension; becomes the record title
    pub title: String,

    /// Path the document was read from
    pub path: PathBuf,

    /// Decoded content
    pub text: String,
}

impl Document {
    /// Read a document, dropping byte sequences that are not valid UTF-8
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                CatalogError::TextProcessing(format!("Not a file path: {}", path.display()))
            })?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| name.clone());

        let bytes = std::fs::read(path)?;

        Ok(Self {
            name,
            title,
            path: path.to_path_buf(),
            text: decode_lossy(&bytes),
        })
    }
}

/// Decode UTF-8, silently discarding invalid sequences instead of
/// substituting replacement characters
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
