//! Utility functions for corpus-catalog
//!
//! This module provides common utility functions used throughout the project.

use crate::error::{CatalogError, Result};
use std::path::{Path, PathBuf};

/// Get file extension from path
pub fn get_file_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a path names a plain-text document
pub fn is_text_document<P: AsRef<Path>>(path: P) -> bool {
    matches!(get_file_extension(path).as_deref(), Some("txt"))
}

/// List the `*.txt` files directly inside `dir`, sorted by file name.
///
/// The order is what makes repeated runs over the same input produce
/// identical catalogs.
pub fn list_text_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CatalogError::Config(format!(
            "Input directory not found: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_text_document(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Create directory if it doesn't exist
pub fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        std::fs::create_dir_all(path).map_err(CatalogError::Io)?;
    }

    Ok(())
}

/// UTC timestamp string for file naming, e.g. `20240131235959`
pub fn get_timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}
