//! Run statistics

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Counters for one indexing run
///
/// Created by the caller at start, updated by the indexer, read at the end.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub case_types: usize,
    pub case_entries: usize,
    pub files_renamed: usize,
    pub failures: usize,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            case_types: 0,
            case_entries: 0,
            files_renamed: 0,
            failures: 0,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Wall-clock time at which the run started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Entries processed without a recorded failure
    pub fn succeeded(&self) -> usize {
        self.case_entries.saturating_sub(self.failures)
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = RunStats::new();
        assert_eq!(stats.case_types, 0);
        assert_eq!(stats.case_entries, 0);
        assert_eq!(stats.files_renamed, 0);
        assert_eq!(stats.failures, 0);
        assert!(stats.started_at() <= Utc::now());
    }

    #[test]
    fn test_succeeded() {
        let mut stats = RunStats::new();
        stats.case_entries = 10;
        stats.failures = 3;
        assert_eq!(stats.succeeded(), 7);
    }
}
