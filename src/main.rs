//! corpus-catalog CLI application
//!
//! Command-line interface for the corpus-catalog library.

use clap::{Parser, Subcommand};
use corpus_catalog::{Config, IngestPipeline, rewrite, rewrite_catalog};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "corpus-catalog")]
#[command(about = "Build deduplicated, chunked JSONL catalogs from raw text documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a directory of *.txt files into a new catalog
    Ingest {
        /// JSON configuration file; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory of raw text documents
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Directory the timestamped catalog is written into
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Write to this exact file instead of a timestamped one
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Split long documents into overlapping word windows
        #[arg(long)]
        chunk: bool,

        /// Maximum words per window
        #[arg(long)]
        max_words: Option<usize>,

        /// Words shared by consecutive windows
        #[arg(long)]
        overlap: Option<usize>,

        /// Paraphrase each chunk through the inference API
        #[arg(long)]
        transform: bool,
    },

    /// Rewrite the text of every record in an existing catalog
    Rewrite {
        /// Input catalog
        #[arg(long = "in", value_name = "FILE")]
        input: PathBuf,

        /// Output catalog
        #[arg(long = "out", value_name = "FILE")]
        output: PathBuf,

        /// Delay between API calls in seconds
        #[arg(long)]
        sleep: Option<f64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            config,
            raw_dir,
            out_dir,
            output,
            chunk,
            max_words,
            overlap,
            transform,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(path)?,
                None => Config::default(),
            };
            if let Some(raw_dir) = raw_dir {
                config.input_dir = raw_dir;
            }
            if let Some(out_dir) = out_dir {
                config.output_dir = out_dir;
            }
            if chunk {
                config.chunking.enabled = true;
            }
            if let Some(max_words) = max_words {
                config.chunking.max_words = max_words;
            }
            if let Some(overlap) = overlap {
                config.chunking.overlap_words = overlap;
            }
            if transform {
                config.rewrite.enabled = true;
            }
            config.rewrite = config.rewrite.with_env()?;

            ingest_command(config, output)?;
        }
        Commands::Rewrite {
            input,
            output,
            sleep,
        } => {
            let mut config = Config::default().rewrite.with_env()?;
            config.enabled = true;
            if let Some(sleep) = sleep {
                config.delay_ms = (sleep.max(0.0) * 1000.0) as u64;
            }

            let rewriter = rewrite::from_config(&config)?;
            let stats = rewrite_catalog(&input, &output, rewriter.as_ref())?;

            println!("Rewrite complete: {}", output.display());
            println!(
                "   records: {}  rewritten: {}  failed: {}  skipped lines: {}",
                stats.records_written, stats.rewritten, stats.failed, stats.skipped_lines
            );
        }
    }

    Ok(())
}

fn ingest_command(config: Config, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let rewriter = rewrite::from_config(&config.rewrite)?;

    let progress = ProgressBar::new(0);
    progress.set_style(ProgressStyle::with_template(
        "{spinner} [{bar:40}] {pos}/{len} documents ({elapsed})",
    )?);

    let pipeline = IngestPipeline::new(config)?
        .with_rewriter(rewriter)
        .with_progress(progress);

    let stats = match output {
        Some(path) => pipeline.run_to(path)?,
        None => pipeline.run()?,
    };

    println!("Wrote catalog: {}", stats.output_path.display());
    println!(
        "   records: {}  duplicates: {}  skipped documents: {}  rewrite failures: {}",
        stats.records_written,
        stats.duplicates_suppressed,
        stats.documents_skipped,
        stats.rewrite_failures
    );
    println!("   time: {:.2}s", stats.processing_time);

    Ok(())
}
