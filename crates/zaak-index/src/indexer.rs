//! Dump walking and per-entry processing
//!
//! The indexer visits every case-type directory under the dump root, writes
//! one index table per case type and renames the payloads of every entry.
//! Entry-level errors end up in the failure table; only errors that make the
//! rest of the run pointless (dump root unreadable, output not writable) are
//! returned to the caller.

use crate::config::IndexerConfig;
use crate::metadata::{case_metadata_filename, load_typed};
use crate::model::CaseMetadata;
use crate::naming::compose;
use crate::progress;
use crate::renamer::rename_payloads;
use crate::stats::RunStats;
use crate::table::{FailureLog, IndexWriter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};
use zaak_common::{Result, ZaakError};

/// Result of processing a single case entry
#[derive(Debug)]
pub enum EntryOutcome {
    /// Row written and every payload renamed
    Indexed { files_renamed: usize },

    /// Something went wrong; payloads renamed before the failure stay renamed
    Failed {
        files_renamed: usize,
        error: ZaakError,
    },
}

impl EntryOutcome {
    pub fn files_renamed(&self) -> usize {
        match self {
            EntryOutcome::Indexed { files_renamed } | EntryOutcome::Failed { files_renamed, .. } => {
                *files_renamed
            },
        }
    }
}

/// Tables produced by a run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// (case type, index table) in processing order
    pub index_tables: Vec<(String, PathBuf)>,

    pub failure_table: PathBuf,
}

/// Walks a dump and drives metadata loading, table writing and renaming
pub struct DumpIndexer {
    config: IndexerConfig,
}

impl DumpIndexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    /// Index the whole dump, updating `stats` as it goes
    pub fn run(&self, stats: &mut RunStats) -> Result<RunReport> {
        let root = &self.config.dump_root;
        info!(dump_root = %root.display(), "indexing dump");

        let children = list_children(root, self.config.sorted)
            .map_err(|e| ZaakError::dump_root_unreadable(root, e.to_string()))?;

        fs::create_dir_all(&self.config.output_dir)?;
        let mut failures = FailureLog::create(&self.config.output_dir, stats.started_at())?;
        let mut report = RunReport {
            index_tables: Vec::new(),
            failure_table: failures.path().to_path_buf(),
        };

        for path in children {
            let Some(case_type) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                warn!(path = %path.display(), "skipping case type with non UTF-8 name");
                continue;
            };

            if !self.config.accepts_case_type(&case_type) {
                debug!(case_type = %case_type, "case type skipped");
                continue;
            }

            if !path.is_dir() {
                warn!(path = %path.display(), "skipping non-directory in dump root");
                continue;
            }

            let table = self.index_case_type(&path, &case_type, stats, &mut failures)?;
            report.index_tables.push((case_type, table));
        }

        let failure_rows = failures.finish()?;
        progress::print_run_summary(stats, &report.failure_table);
        info!(
            case_types = stats.case_types,
            entries = stats.case_entries,
            files_renamed = stats.files_renamed,
            failures = failure_rows,
            "dump indexed"
        );

        Ok(report)
    }

    /// Index one case-type directory into a fresh table
    fn index_case_type(
        &self,
        path: &Path,
        case_type: &str,
        stats: &mut RunStats,
        failures: &mut FailureLog,
    ) -> Result<PathBuf> {
        let _span = info_span!("case_type", case_type = %case_type).entered();

        // list before opening the table: a failed listing leaves the previous table intact
        let entries: Vec<PathBuf> = list_children(path, self.config.sorted)?
            .into_iter()
            .filter(|entry| entry.is_dir())
            .collect();

        let mut index = IndexWriter::create(&self.config.output_dir, case_type)?;
        let table = index.path().to_path_buf();
        stats.case_types += 1;
        info!(table = %table.display(), entries = entries.len(), "indexing case type");

        let pb = progress::create_progress_bar(
            entries.len() as u64,
            case_type,
            self.config.show_progress,
        );

        for entry_path in entries {
            let entry_id = entry_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            stats.case_entries += 1;
            progress::report_entry(&pb, &entry_id);
            debug!(entry = %entry_id, "processing case entry");

            let outcome = process_entry(&entry_path, &entry_id, &mut index)?;
            stats.files_renamed += outcome.files_renamed();

            if let EntryOutcome::Failed { error, .. } = outcome {
                stats.failures += 1;
                let reason = error.to_string();
                // the console notice comes from report_failure; this only reaches file logs
                info!(entry = %entry_id, path = %entry_path.display(), error = %reason, "case entry failed");
                progress::report_failure(&pb, &entry_id, &reason);
                failures.write_failure(&entry_id, &reason, &entry_path)?;
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        let rows = index.finish()?;
        progress::print_case_type_summary(case_type, &table, rows, stats);

        Ok(table)
    }
}

/// Process one case entry: index row first, then payload renaming
///
/// Entry-level errors come back as [`EntryOutcome::Failed`]; anything else
/// (the index table cannot be written) is returned as `Err`.
pub fn process_entry(
    entry_path: &Path,
    entry_id: &str,
    index: &mut IndexWriter,
) -> Result<EntryOutcome> {
    let _span = info_span!("case_entry", entry = %entry_id).entered();

    match index_entry(entry_path, entry_id, index) {
        Ok(()) => {},
        Err(error) if error.is_entry_level() => {
            return Ok(EntryOutcome::Failed {
                files_renamed: 0,
                error,
            });
        },
        Err(error) => return Err(error),
    }

    let report = rename_payloads(entry_path);
    let files_renamed = report.renamed_count();

    Ok(match report.into_result(entry_path) {
        Ok(_) => EntryOutcome::Indexed { files_renamed },
        Err(error) => EntryOutcome::Failed {
            files_renamed,
            error,
        },
    })
}

fn index_entry(entry_path: &Path, entry_id: &str, index: &mut IndexWriter) -> Result<()> {
    let metadata: CaseMetadata = load_typed(entry_path, &case_metadata_filename(entry_id))?;
    let name = compose(&metadata);
    debug!(date = %metadata.registration_date, name = %name.display_name(), "case metadata composed");

    index.write_row(&metadata.registration_date, &name, entry_path)
}

/// Children of `dir` in listing order, or by name when `sorted`
fn list_children(dir: &Path, sorted: bool) -> std::io::Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;

    if sorted {
        children.sort();
    }

    Ok(children)
}
