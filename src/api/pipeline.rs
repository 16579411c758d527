//! IngestPipeline - Main ingestion API
//!
//! Turns a directory of raw text documents into a deduplicated JSONL catalog:
//! normalize, chunk, optionally rewrite, fingerprint, deduplicate, and emit
//! records in encounter order.

use crate::catalog::{CatalogRecord, Deduplicator, RecordSynthesizer, fingerprint};
use crate::config::Config;
use crate::error::Result;
use crate::rewrite::{PassThrough, Rewriter};
use crate::storage::{CatalogWriter, IngestStats, catalog_path};
use crate::text::{Chunk, Document, TextNormalizer, WordChunker};
use crate::utils::list_text_documents;
use indicatif::ProgressBar;
use std::path::Path;

/// What happened to one chunk
#[derive(Debug)]
pub enum ChunkOutcome {
    /// A new record to write
    Emitted(CatalogRecord),

    /// Fingerprint already seen this run
    Duplicate,
}

/// Ingestion pipeline driver
pub struct IngestPipeline {
    config: Config,
    normalizer: TextNormalizer,
    chunker: WordChunker,
    synthesizer: RecordSynthesizer,
    rewriter: Box<dyn Rewriter>,
    progress: ProgressBar,
}

impl IngestPipeline {
    /// Create a pipeline. Invalid chunking parameters are rejected here,
    /// before any input is read or output created.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let normalizer = TextNormalizer::new()?;
        let chunker = WordChunker::new(config.chunking.clone())?;
        let synthesizer = RecordSynthesizer::new(config.catalog.clone());

        Ok(Self {
            config,
            normalizer,
            chunker,
            synthesizer,
            rewriter: Box::new(PassThrough),
            progress: ProgressBar::hidden(),
        })
    }

    /// Install a rewrite hook applied to every chunk before fingerprinting
    pub fn with_rewriter(mut self, rewriter: Box<dyn Rewriter>) -> Self {
        self.rewriter = rewriter;
        self
    }

    /// Report per-document progress on `progress`
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run into a freshly timestamped file under the configured output directory
    pub fn run(&self) -> Result<IngestStats> {
        let output_path = catalog_path(&self.config.output_dir, &self.config.catalog.file_prefix);
        self.run_to(output_path)
    }

    /// Run into `output_path`, replacing any existing file
    pub fn run_to<P: AsRef<Path>>(&self, output_path: P) -> Result<IngestStats> {
        let start_time = std::time::Instant::now();
        let files = list_text_documents(&self.config.input_dir)?;

        log::info!(
            "Ingesting {} documents from {}",
            files.len(),
            self.config.input_dir.display()
        );

        let mut writer = CatalogWriter::create(output_path.as_ref())?;
        let mut dedup = Deduplicator::new();
        let mut stats = IngestStats {
            output_path: output_path.as_ref().to_path_buf(),
            documents_seen: files.len(),
            documents_skipped: 0,
            chunks_seen: 0,
            records_written: 0,
            duplicates_suppressed: 0,
            rewrite_failures: 0,
            processing_time: 0.0,
        };

        self.progress.set_length(files.len() as u64);

        for path in &files {
            self.progress.inc(1);

            let document = match Document::load(path) {
                Ok(document) => document,
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    stats.documents_skipped += 1;
                    continue;
                }
            };

            let chunks = self.chunk_document(&document);
            log::debug!("{}: {} chunks", document.name, chunks.len());

            for chunk in chunks {
                stats.chunks_seen += 1;
                match self.process_chunk(&document, chunk, &mut dedup) {
                    ChunkOutcome::Emitted(record) => {
                        if record.metadata.rewrite_error.is_some() {
                            stats.rewrite_failures += 1;
                        }
                        writer.write_record(&record)?;
                    }
                    ChunkOutcome::Duplicate => stats.duplicates_suppressed += 1,
                }
            }
        }

        self.progress.finish();
        stats.records_written = writer.finish()?;
        stats.processing_time = start_time.elapsed().as_secs_f64();

        log::info!(
            "Wrote {} records to {} ({} duplicates suppressed, {} documents skipped)",
            stats.records_written,
            stats.output_path.display(),
            stats.duplicates_suppressed,
            stats.documents_skipped
        );

        Ok(stats)
    }

    /// Normalize and chunk one document
    pub fn chunk_document(&self, document: &Document) -> Vec<Chunk> {
        let text = self.normalizer.normalize(&document.text);
        self.chunker.chunk_text(&text)
    }

    /// Rewrite, fingerprint and deduplicate one chunk.
    ///
    /// `dedup` belongs to the caller so its lifetime is exactly one run.
    pub fn process_chunk(&self, document: &Document, chunk: Chunk, dedup: &mut Deduplicator) -> ChunkOutcome {
        let mut rewritten = None;
        let mut rewrite_error = None;

        let text = if self.rewriter.is_noop() {
            chunk.text
        } else {
            match self.rewriter.rewrite(&chunk.text) {
                Ok(candidate) if !candidate.trim().is_empty() => {
                    rewritten = Some(true);
                    candidate
                }
                Ok(_) => {
                    log::warn!("{} chunk {}: rewrite returned empty text", document.name, chunk.index);
                    rewrite_error = Some("empty response".to_string());
                    chunk.text
                }
                Err(e) => {
                    log::warn!("{} chunk {}: rewrite failed: {}", document.name, chunk.index, e);
                    rewrite_error = Some(e.to_string());
                    chunk.text
                }
            }
        };

        if !dedup.offer(fingerprint(&text)) {
            log::debug!("{} chunk {}: duplicate suppressed", document.name, chunk.index);
            return ChunkOutcome::Duplicate;
        }

        let mut record = self.synthesizer.synthesize(document, chunk.index, text);
        record.metadata.rewritten = rewritten;
        record.metadata.rewrite_error = rewrite_error;
        ChunkOutcome::Emitted(record)
    }
}
