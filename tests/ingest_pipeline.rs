//! End-to-end ingestion tests
//!
//! Each test builds a raw document directory in a temp dir, runs the
//! pipeline, and inspects the resulting catalog lines.

use corpus_catalog::catalog::{fingerprint, record_id};
use corpus_catalog::{CatalogError, CatalogRecord, ChunkingConfig, Config, IngestPipeline};
use std::path::Path;
use tempfile::{TempDir, tempdir};

fn raw_dir(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn config(input: &Path, output: &Path, chunking: ChunkingConfig) -> Config {
    Config {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        chunking,
        ..Default::default()
    }
}

fn read_catalog(path: &Path) -> Vec<CatalogRecord> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn words(prefix: &str, n: usize) -> String {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect::<Vec<_>>().join(" ")
}

#[test]
fn test_hello_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let input = raw_dir(&[("hello.txt", b"Hello   world.\r\n\r\n\r\nBye.")]);
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    let stats = IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::default()))?
        .run_to(&output)?;
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.output_path, output);

    let records = read_catalog(&output);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.text, "Hello world.\n\nBye.");
    assert_eq!(record.token_count, 3);
    assert_eq!(record.title, "hello");
    assert_eq!(record.id, record_id("hello.txt", 0));
    assert_eq!(record.metadata.chunk_index, 0);
    assert_eq!(
        record.metadata.file_path,
        input.path().join("hello.txt").display().to_string()
    );
    assert_eq!(record.metadata.rewritten, None);

    Ok(())
}

#[test]
fn test_long_document_windows() -> Result<(), Box<dyn std::error::Error>> {
    let body = words("w", 2500);
    let input = raw_dir(&[("long.txt", body.as_bytes())]);
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::windowed(1200, 100)))?
        .run_to(&output)?;

    let records = read_catalog(&output);
    assert_eq!(records.len(), 3);

    let all: Vec<&str> = body.split(' ').collect();
    for (record, (start, end)) in records.iter().zip([(0, 1200), (1100, 2300), (2200, 2500)]) {
        assert_eq!(record.text, all[start..end].join(" "));
        assert_eq!(record.token_count, end - start);
    }
    let indices: Vec<usize> = records.iter().map(|r| r.metadata.chunk_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    Ok(())
}

#[test]
fn test_identical_documents_are_deduplicated() -> Result<(), Box<dyn std::error::Error>> {
    let input = raw_dir(&[
        ("first.txt", b"Same  content\r\nhere."),
        ("second.txt", b"Same content\nhere.\n\n"),
    ]);
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    let stats = IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::default()))?
        .run_to(&output)?;
    assert_eq!(stats.records_written, 1);
    assert_eq!(stats.duplicates_suppressed, 1);

    let records = read_catalog(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "first");

    Ok(())
}

#[test]
fn test_shared_prefix_counts_as_duplicate() -> Result<(), Box<dyn std::error::Error>> {
    let prefix = "x".repeat(1000);
    let a = format!("{} ending one", prefix);
    let b = format!("{} ending two", prefix);
    assert_eq!(fingerprint(&a), fingerprint(&b));

    let input = raw_dir(&[("a.txt", a.as_bytes()), ("b.txt", b.as_bytes())]);
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    let stats = IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::default()))?
        .run_to(&output)?;
    assert_eq!(stats.records_written, 1);

    Ok(())
}

#[test]
fn test_encounter_order_is_lexicographic() -> Result<(), Box<dyn std::error::Error>> {
    let input = raw_dir(&[
        ("b.txt", b"beta text"),
        ("a.txt", b"alpha text"),
        ("c.txt", b"gamma text"),
        ("notes.md", b"ignored"),
    ]);
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::default()))?
        .run_to(&output)?;

    let titles: Vec<String> = read_catalog(&output).into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);

    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<(), Box<dyn std::error::Error>> {
    let input = raw_dir(&[
        ("one.txt", words("a", 300).as_bytes()),
        ("two.txt", words("b", 75).as_bytes()),
    ]);
    let out = tempdir()?;
    let pipeline = IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::windowed(100, 10)))?;

    pipeline.run_to(out.path().join("first.jsonl"))?;
    pipeline.run_to(out.path().join("second.jsonl"))?;

    assert_eq!(
        std::fs::read(out.path().join("first.jsonl"))?,
        std::fs::read(out.path().join("second.jsonl"))?
    );

    Ok(())
}

#[test]
fn test_bad_overlap_fails_before_output() {
    let input = raw_dir(&[("a.txt", b"some words")]);
    let out = tempdir().unwrap();
    let catalogs = out.path().join("catalogs");

    let result = IngestPipeline::new(config(input.path(), &catalogs, ChunkingConfig::windowed(100, 100)));
    assert!(matches!(result, Err(CatalogError::Config(_))));
    assert!(!catalogs.exists());
}

#[test]
fn test_empty_and_undecodable_documents() -> Result<(), Box<dyn std::error::Error>> {
    let input = raw_dir(&[
        ("empty.txt", b"   \r\n\t"),
        ("mixed.txt", b"valid \xff\xfebytes only"),
    ]);
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    let stats = IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::default()))?
        .run_to(&output)?;
    assert_eq!(stats.documents_seen, 2);
    assert_eq!(stats.records_written, 1);

    let records = read_catalog(&output);
    assert_eq!(records[0].title, "mixed");
    assert_eq!(records[0].text, "valid bytes only");

    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_unreadable_document_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let input = raw_dir(&[("a.txt", b"alpha text"), ("c.txt", b"gamma text")]);
    // Opens fine but every read fails with EIO
    std::os::unix::fs::symlink("/proc/self/mem", input.path().join("b.txt"))?;
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    let stats = IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::default()))?
        .run_to(&output)?;
    assert_eq!(stats.documents_seen, 3);
    assert_eq!(stats.documents_skipped, 1);
    assert_eq!(stats.records_written, 2);

    let titles: Vec<String> = read_catalog(&output).into_iter().map(|r| r.title).collect();
    assert_eq!(titles, vec!["a", "c"]);

    Ok(())
}

#[test]
fn test_timestamped_output_in_created_directory() -> Result<(), Box<dyn std::error::Error>> {
    let input = raw_dir(&[("a.txt", b"alpha")]);
    let out = tempdir()?;
    let catalogs = out.path().join("data").join("catalogs");

    let stats = IngestPipeline::new(config(input.path(), &catalogs, ChunkingConfig::default()))?.run()?;

    assert_eq!(stats.output_path.parent(), Some(catalogs.as_path()));
    let name = stats.output_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("gutenberg_catalog_"));
    assert!(name.ends_with(".jsonl"));
    assert_eq!(read_catalog(&stats.output_path).len(), 1);

    Ok(())
}

#[test]
fn test_rewrite_hook_runs_once_per_chunk() -> Result<(), Box<dyn std::error::Error>> {
    use std::cell::Cell;
    use std::rc::Rc;

    let input = raw_dir(&[("a.txt", words("a", 25).as_bytes()), ("b.txt", b"fail this one")]);
    let out = tempdir()?;
    let output = out.path().join("catalog.jsonl");

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let hook = move |text: &str| -> anyhow::Result<String> {
        counter.set(counter.get() + 1);
        if text.starts_with("fail") {
            anyhow::bail!("service unavailable");
        }
        Ok(text.to_uppercase())
    };

    let stats = IngestPipeline::new(config(input.path(), out.path(), ChunkingConfig::windowed(10, 2)))?
        .with_rewriter(Box::new(hook))
        .run_to(&output)?;

    // a.txt: 25 words in windows of 10 stepping 8 -> 3 chunks; b.txt -> 1 chunk
    assert_eq!(calls.get(), 4);
    assert_eq!(stats.rewrite_failures, 1);

    let records = read_catalog(&output);
    assert_eq!(records.len(), 4);
    assert!(records[0].text.starts_with("A0 A1"));
    assert_eq!(records[0].metadata.rewritten, Some(true));
    assert_eq!(records[3].text, "fail this one");
    assert!(records[3].metadata.rewrite_error.as_deref().unwrap().contains("service unavailable"));

    Ok(())
}
