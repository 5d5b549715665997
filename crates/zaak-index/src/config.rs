//! Indexer configuration
//!
//! Holds what the caller decides: which dump to walk, which case type to
//! restrict to, and where the tables go.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Case-type directories whose name contains this marker are never indexed
pub const SEARCH_FOLDER_MARKER: &str = "Zoekmap";

/// Output directory when none is configured: the working directory
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Indexer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Root of the dump; one subdirectory per case type
    pub dump_root: PathBuf,

    /// Only index this case type when set
    #[serde(default)]
    pub case_type: Option<String>,

    /// Directory receiving the index and failure tables
    pub output_dir: PathBuf,

    /// Process case types and entries in name order instead of listing order
    #[serde(default)]
    pub sorted: bool,

    /// Draw a progress bar while indexing
    #[serde(default)]
    pub show_progress: bool,
}

impl IndexerConfig {
    /// Create a config with defaults for everything but the dump root
    pub fn new(dump_root: impl Into<PathBuf>) -> Self {
        Self {
            dump_root: dump_root.into(),
            case_type: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            sorted: false,
            show_progress: false,
        }
    }

    pub fn with_case_type(mut self, case_type: impl Into<String>) -> Self {
        self.case_type = Some(case_type.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Whether a dump-root child with this name is indexed
    pub fn accepts_case_type(&self, name: &str) -> bool {
        if name.contains(SEARCH_FOLDER_MARKER) {
            return false;
        }
        match self.case_type {
            Some(ref wanted) => wanted == name,
            None => true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IndexerConfig::new("/dump");
        assert_eq!(config.dump_root, PathBuf::from("/dump"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.case_type, None);
        assert!(!config.sorted);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_search_folder_is_rejected() {
        let config = IndexerConfig::new("/dump");
        assert!(config.accepts_case_type("1234"));
        assert!(!config.accepts_case_type("Zoekmap"));
        assert!(!config.accepts_case_type("Zoekmap_oud"));
        assert!(!config.accepts_case_type("oude_Zoekmap"));
    }

    #[test]
    fn test_case_type_filter() {
        let config = IndexerConfig::new("/dump").with_case_type("1234");
        assert!(config.accepts_case_type("1234"));
        assert!(!config.accepts_case_type("12345"));
        assert!(!config.accepts_case_type("5678"));
    }

    #[test]
    fn test_filter_cannot_select_search_folder() {
        let config = IndexerConfig::new("/dump").with_case_type("Zoekmap");
        assert!(!config.accepts_case_type("Zoekmap"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: IndexerConfig =
            serde_json::from_str(r#"{"dump_root": "/d", "output_dir": "/out"}"#).unwrap();
        assert_eq!(config, IndexerConfig::new("/d").with_output_dir("/out"));
    }
}
