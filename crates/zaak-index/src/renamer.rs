//! Payload renaming driven by sidecar metadata
//!
//! Payloads are exported as `<stem>.bin` next to a `<stem>.meta` sidecar that
//! remembers the original filename. Renaming restores the original extension
//! in place; the stem is kept.

use crate::metadata::{load_typed, METADATA_EXTENSION};
use crate::model::PayloadMetadata;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zaak_common::{Result, ZaakError};

/// Placeholder extension given to every exported payload
pub const PAYLOAD_EXTENSION: &str = "bin";

/// Outcome of renaming the payloads of one case entry
#[derive(Debug, Default)]
pub struct RenameReport {
    /// (from, to) for every payload that was moved
    pub renamed: Vec<(PathBuf, PathBuf)>,

    /// One description per payload that could not be renamed
    pub failures: Vec<String>,
}

impl RenameReport {
    pub fn renamed_count(&self) -> usize {
        self.renamed.len()
    }

    /// Turn collected failures into a single `RenameFailed` for the entry
    pub fn into_result(self, entry_dir: &Path) -> Result<usize> {
        if self.failures.is_empty() {
            Ok(self.renamed.len())
        } else {
            Err(ZaakError::rename_failed(entry_dir, self.failures.join("; ")))
        }
    }
}

/// Rename every placeholder payload in `entry_dir`
///
/// A payload that fails does not stop the others. Moves already done stay
/// done.
pub fn rename_payloads(entry_dir: &Path) -> RenameReport {
    let mut report = RenameReport::default();

    let payloads = match list_payloads(entry_dir) {
        Ok(payloads) => payloads,
        Err(e) => {
            report
                .failures
                .push(format!("cannot list '{}': {}", entry_dir.display(), e));
            return report;
        },
    };

    for payload in payloads {
        match rename_payload(&payload) {
            Ok(Some(target)) => {
                debug!(from = %payload.display(), to = %target.display(), "payload renamed");
                report.renamed.push((payload, target));
            },
            Ok(None) => {
                debug!(path = %payload.display(), "payload already carries its original extension");
            },
            Err(e) => {
                warn!(path = %payload.display(), error = %e, "payload not renamed");
                report.failures.push(e.to_string());
            },
        }
    }

    report
}

fn list_payloads(entry_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut payloads = Vec::new();
    for entry in fs::read_dir(entry_dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(PAYLOAD_EXTENSION)
        {
            payloads.push(path);
        }
    }
    Ok(payloads)
}

/// Returns the new path, or `None` when the payload needs no move
fn rename_payload(payload: &Path) -> Result<Option<PathBuf>> {
    let dir = payload
        .parent()
        .ok_or_else(|| ZaakError::rename_failed(payload, "payload has no parent directory"))?;
    let stem = payload
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ZaakError::rename_failed(payload, "payload name is not valid UTF-8"))?;

    let sidecar = format!("{stem}.{METADATA_EXTENSION}");
    let metadata: PayloadMetadata =
        load_typed(dir, &sidecar).map_err(|e| ZaakError::rename_failed(payload, e.to_string()))?;

    let extension = metadata.true_extension();
    if extension.contains(['/', '\\']) {
        return Err(ZaakError::rename_failed(
            payload,
            format!("extension '{extension}' contains a path separator"),
        ));
    }
    if extension == PAYLOAD_EXTENSION {
        return Ok(None);
    }

    let target = dir.join(format!("{stem}.{extension}"));
    if target.exists() {
        return Err(ZaakError::rename_failed(
            payload,
            format!("destination '{}' already exists", target.display()),
        ));
    }

    fs::rename(payload, &target).map_err(|e| ZaakError::rename_failed(payload, e.to_string()))?;
    Ok(Some(target))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn payload(dir: &Path, stem: &str, original: &str) {
        fs::write(dir.join(format!("{stem}.bin")), b"%PDF-1.4").unwrap();
        fs::write(
            dir.join(format!("{stem}.meta")),
            format!(r#"{{"bestandsnaam": "{original}"}}"#),
        )
        .unwrap();
    }

    #[test]
    fn test_renames_to_original_extension() {
        let dir = TempDir::new().unwrap();
        payload(dir.path(), "E1", "scan.pdf");

        let report = rename_payloads(dir.path());
        assert_eq!(report.renamed_count(), 1);
        assert!(report.failures.is_empty());
        assert!(dir.path().join("E1.pdf").exists());
        assert!(!dir.path().join("E1.bin").exists());
        assert_eq!(fs::read(dir.path().join("E1.pdf")).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_no_payloads_is_noop() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("E1_case.meta"), "{}").unwrap();

        let report = rename_payloads(dir.path());
        assert_eq!(report.renamed_count(), 0);
        assert!(report.failures.is_empty());
        assert_eq!(report.into_result(dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_malformed_sidecar_does_not_block_other_payloads() {
        let dir = TempDir::new().unwrap();
        payload(dir.path(), "good", "foto.png");
        fs::write(dir.path().join("bad.bin"), b"x").unwrap();
        fs::write(dir.path().join("bad.meta"), "{ broken").unwrap();

        let report = rename_payloads(dir.path());
        assert_eq!(report.renamed_count(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(dir.path().join("good.png").exists());
        assert!(dir.path().join("bad.bin").exists());

        let err = report.into_result(dir.path()).unwrap_err();
        assert!(matches!(err, ZaakError::RenameFailed { .. }));
        assert!(err.to_string().contains("bad.bin"));
    }

    #[test]
    fn test_missing_sidecar_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lonely.bin"), b"x").unwrap();

        let report = rename_payloads(dir.path());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("lonely.meta"));
    }

    #[test]
    fn test_existing_destination_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        payload(dir.path(), "E1", "scan.pdf");
        fs::write(dir.path().join("E1.pdf"), b"earlier").unwrap();

        let report = rename_payloads(dir.path());
        assert_eq!(report.renamed_count(), 0);
        assert!(report.failures[0].contains("already exists"));
        assert_eq!(fs::read(dir.path().join("E1.pdf")).unwrap(), b"earlier");
        assert!(dir.path().join("E1.bin").exists());
    }

    #[test]
    fn test_long_extension_is_truncated() {
        let dir = TempDir::new().unwrap();
        payload(dir.path(), "E2", "vakantie.jpeg");

        rename_payloads(dir.path());
        assert!(dir.path().join("E2.peg").exists());
    }

    #[test]
    fn test_second_run_finds_nothing() {
        let dir = TempDir::new().unwrap();
        payload(dir.path(), "E1", "scan.pdf");

        assert_eq!(rename_payloads(dir.path()).renamed_count(), 1);
        let again = rename_payloads(dir.path());
        assert_eq!(again.renamed_count(), 0);
        assert!(again.failures.is_empty());
    }

    #[test]
    fn test_original_bin_extension_stays() {
        let dir = TempDir::new().unwrap();
        payload(dir.path(), "E3", "firmware.bin");

        let report = rename_payloads(dir.path());
        assert_eq!(report.renamed_count(), 0);
        assert!(report.failures.is_empty());
        assert!(dir.path().join("E3.bin").exists());
    }
}
