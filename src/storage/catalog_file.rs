//! Line-delimited catalog files
//!
//! Each record is serialized to a single JSON line and flushed as a unit, so
//! a run that is killed part-way leaves a truncated but parseable file.

use crate::catalog::CatalogRecord;
use crate::error::{CatalogError, Result};
use crate::utils::{ensure_directory, get_timestamp};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// `<output_dir>/<prefix>_<UTC timestamp>.jsonl`
pub fn catalog_path<P: AsRef<Path>>(output_dir: P, prefix: &str) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("{}_{}.jsonl", prefix, get_timestamp()))
}

/// Appends catalog records to a JSONL file
pub struct CatalogWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl CatalogWriter {
    /// Create (or truncate) the file at `path`, creating parent directories
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_directory(parent).map_err(|e| {
                CatalogError::Output(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let file = File::create(path).map_err(|e| {
            CatalogError::Output(format!("Failed to create {}: {}", path.display(), e))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Write one record as a complete line
    pub fn write_record(&mut self, record: &CatalogRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.write_line(&line)
    }

    /// Write a pre-serialized line verbatim; a trailing newline is added if missing
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end_matches(['\n', '\r']);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Lines written so far
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close, returning the number of lines written
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}
