//! CSV output tables
//!
//! One index table per case type (`<caseType>.csv`) and one failure table per
//! run (`failed_<epoch>.csv`). Both are created with truncation, so a rerun
//! replaces the previous output instead of appending to it.

use crate::naming::ComposedName;
use chrono::{DateTime, Utc};
use csv::Writer;
use std::fs::File;
use std::path::{Path, PathBuf};
use zaak_common::Result;

/// Header of every index table
pub const INDEX_HEADER: [&str; 7] = [
    "datum",
    "toelichting",
    "bsn",
    "voornamen",
    "tussenvoegsel",
    "achternaam",
    "locatie",
];

/// Header of the failure table
pub const FAILURE_HEADER: [&str; 3] = ["zaak", "reason", "locatie"];

pub fn index_table_filename(case_type: &str) -> String {
    format!("{case_type}.csv")
}

pub fn failure_table_filename(run_started: DateTime<Utc>) -> String {
    format!("failed_{}.csv", run_started.timestamp())
}

/// Index table for a single case type
pub struct IndexWriter {
    path: PathBuf,
    writer: Writer<File>,
    rows: usize,
}

impl IndexWriter {
    /// Create (or truncate) `<output_dir>/<case_type>.csv` and write the header
    pub fn create(output_dir: &Path, case_type: &str) -> Result<Self> {
        let path = output_dir.join(index_table_filename(case_type));
        let mut writer = Writer::from_writer(File::create(&path)?);
        writer.write_record(INDEX_HEADER)?;

        Ok(Self {
            path,
            writer,
            rows: 0,
        })
    }

    /// Append one row for a processed case entry
    pub fn write_row(&mut self, date: &str, name: &ComposedName, location: &Path) -> Result<()> {
        let location = location.display().to_string();
        self.writer.write_record([
            date,
            name.explanation.as_str(),
            name.citizen_number.as_str(),
            name.first_names.as_str(),
            name.name_prefix.as_str(),
            name.last_name.as_str(),
            location.as_str(),
        ])?;
        self.rows += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close; returns the number of rows written
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}

/// Run-wide table of case entries that could not be processed
pub struct FailureLog {
    path: PathBuf,
    writer: Writer<File>,
    rows: usize,
}

impl FailureLog {
    /// Create (or truncate) `<output_dir>/failed_<epoch>.csv` and write the header
    pub fn create(output_dir: &Path, run_started: DateTime<Utc>) -> Result<Self> {
        let path = output_dir.join(failure_table_filename(run_started));
        let mut writer = Writer::from_writer(File::create(&path)?);
        writer.write_record(FAILURE_HEADER)?;
        writer.flush()?;

        Ok(Self {
            path,
            writer,
            rows: 0,
        })
    }

    /// Record a failed entry; the row is on disk when this returns
    pub fn write_failure(&mut self, entry_id: &str, reason: &str, location: &Path) -> Result<()> {
        let location = location.display().to_string();
        self.writer
            .write_record([entry_id, reason, location.as_str()])?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}
