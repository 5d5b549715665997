//! zaak-index - case dump indexer

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tracing::error;
use zaak_common::logging::{init_logging, LogConfig, LogLevel};
use zaak_index::{Cli, DumpIndexer, RunStats};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("zaak-index")
        .build();

    // Environment variables take precedence; a bad value stops the run before any renaming
    let log_config = match log_config.merge_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid logging environment: {e:#}");
            process::exit(1);
        },
    };

    // The indexer works without logging; a subscriber failure is not fatal
    let guard = init_logging(&log_config).ok();

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "indexing aborted");
            eprintln!("Error: {e:#}");
            1
        },
    };

    // flush file logs before exiting
    drop(guard);
    process::exit(code);
}

fn run(cli: &Cli) -> Result<()> {
    let dump_root = std::fs::canonicalize(&cli.dump_root)
        .with_context(|| format!("Cannot resolve dump root '{}'", cli.dump_root.display()))?;

    println!("Indexing dump at {}", dump_root.display());

    let mut stats = RunStats::new();
    DumpIndexer::new(cli.indexer_config(dump_root)).run(&mut stats)?;

    Ok(())
}
