//! Zaak Index Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Indexes a bulk export ("dump") of case records and restores the original
//! extensions of their payload files.
//!
//! # Dump layout
//!
//! ```text
//! <dump root>/
//!   <case type>/              one per case type, name is the identifier
//!     <entry>/                one per case
//!       <entry>_case.meta     case metadata (JSON)
//!       <stem>.bin            payload with placeholder extension
//!       <stem>.meta           payload metadata, holds the original filename
//!   Zoekmap.../               search folders, never indexed
//! ```
//!
//! # Example
//!
//! ```no_run
//! use zaak_index::{DumpIndexer, IndexerConfig, RunStats};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = IndexerConfig::new("/exports/dump").with_case_type("1234");
//!     let mut stats = RunStats::new();
//!     let report = DumpIndexer::new(config).run(&mut stats)?;
//!     println!("{} failures, see {}", stats.failures, report.failure_table.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod indexer;
pub mod metadata;
pub mod model;
pub mod naming;
pub mod progress;
pub mod renamer;
pub mod stats;
pub mod table;

// Re-export commonly used types
pub use config::IndexerConfig;
pub use indexer::{DumpIndexer, EntryOutcome, RunReport};
pub use stats::RunStats;
pub use zaak_common::{Result, ZaakError};

use clap::Parser;
use std::path::PathBuf;

/// Index a case dump and restore payload file extensions
#[derive(Parser, Debug)]
#[command(name = "zaak-index")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the dump
    pub dump_root: PathBuf,

    /// Only index this case type
    #[arg(short, long)]
    pub case_type: Option<String>,

    /// Directory receiving the index and failure tables
    #[arg(short, long, env = "ZAAK_INDEX_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Process case types and entries in name order
    #[arg(long)]
    pub sorted: bool,

    /// Do not draw progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Indexer configuration for this invocation
    ///
    /// `dump_root` must already be absolute; the binary canonicalizes it.
    pub fn indexer_config(&self, dump_root: PathBuf) -> IndexerConfig {
        let config = IndexerConfig::new(dump_root)
            .with_output_dir(self.output_dir.clone())
            .with_sorted(self.sorted)
            .with_progress(!self.no_progress);

        match self.case_type {
            Some(ref case_type) => config.with_case_type(case_type.clone()),
            None => config,
        }
    }
}
