//! Error types for the dump indexer
//!
//! The first three variants are the entry-level failures the orchestrator
//! records in the failure table and then moves past. Everything else aborts
//! the run.

use std::path::Path;
use thiserror::Error;

/// Result type alias for indexer operations
pub type Result<T> = std::result::Result<T, ZaakError>;

/// Main error type for the dump indexer
#[derive(Error, Debug)]
pub enum ZaakError {
    /// Sidecar file is missing or cannot be read
    #[error("Metadata unavailable: '{path}': {source}")]
    MetadataUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Sidecar file is not valid JSON or lacks a required field
    #[error("Metadata malformed: '{path}': {reason}")]
    MetadataMalformed { path: String, reason: String },

    /// A payload could not be renamed
    #[error("Rename failed for '{path}': {reason}")]
    RenameFailed { path: String, reason: String },

    /// The dump root itself cannot be listed
    #[error("Dump root unreadable: '{path}': {reason}")]
    DumpRootUnreadable { path: String, reason: String },

    #[error("Table write failed: {0}")]
    Table(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZaakError {
    /// Create a metadata-unavailable error
    pub fn metadata_unavailable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::MetadataUnavailable {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Create a metadata-malformed error
    pub fn metadata_malformed(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::MetadataMalformed {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a rename-failed error
    pub fn rename_failed(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::RenameFailed {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a dump-root-unreadable error
    pub fn dump_root_unreadable(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::DumpRootUnreadable {
            path: path.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error is contained at the case-entry boundary
    pub fn is_entry_level(&self) -> bool {
        matches!(
            self,
            Self::MetadataUnavailable { .. } | Self::MetadataMalformed { .. } | Self::RenameFailed { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_entry_level_classification() {
        let unavailable = ZaakError::metadata_unavailable(
            "/dump/1234/E1/E1_case.meta",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(unavailable.is_entry_level());
        assert!(ZaakError::metadata_malformed("x.meta", "bad json").is_entry_level());
        assert!(ZaakError::rename_failed("E1.bin", "exists").is_entry_level());

        assert!(!ZaakError::dump_root_unreadable("/dump", "denied").is_entry_level());
        assert!(!ZaakError::Io(io::Error::other("disk full")).is_entry_level());
    }

    #[test]
    fn test_display_includes_path_and_reason() {
        let err = ZaakError::rename_failed("/dump/1234/E1", "destination exists");
        let text = err.to_string();
        assert!(text.contains("/dump/1234/E1"));
        assert!(text.contains("destination exists"));
    }
}
