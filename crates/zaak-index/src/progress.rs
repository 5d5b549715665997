//! Console progress and statistics
//!
//! This is the operator-facing side channel: a progress bar while a case type
//! is being indexed, a summary after each case type, and an immediate notice
//! for every failed entry. None of it is part of the table output.

use crate::stats::RunStats;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Progress bar over the entries of one case type; hidden when `visible` is false
pub fn create_progress_bar(total: u64, case_type: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{prefix:.bold} {spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_prefix(case_type.to_string());
    pb
}

/// Print which entry is being processed, above the bar when one is drawn
pub fn report_entry(pb: &ProgressBar, entry_id: &str) {
    let line = format!("... processing {entry_id}");
    if pb.is_hidden() {
        println!("{line}");
    } else {
        pb.println(line);
        pb.set_message(entry_id.to_string());
    }
}

/// Print a failed entry above the progress bar
pub fn report_failure(pb: &ProgressBar, entry_id: &str, reason: &str) {
    let line = format!("{} {}: {}", "✗".red(), entry_id.bold(), reason);
    if pb.is_hidden() {
        eprintln!("{line}");
    } else {
        pb.suspend(|| eprintln!("{line}"));
    }
}

/// Print the accumulated statistics after a case type is done
pub fn print_case_type_summary(case_type: &str, table: &Path, rows: usize, stats: &RunStats) {
    println!(
        "{} Case type {} indexed: {} row(s) in {}",
        "✓".green(),
        case_type.cyan().bold(),
        rows,
        table.display()
    );
    println!("  {}", format_stats(stats));
}

/// Print the closing summary of the run
pub fn print_run_summary(stats: &RunStats, failure_table: &Path) {
    println!();
    println!("{}", "Summary:".cyan().bold());
    println!("  {}", format_stats(stats));
    println!("  {}", format_outcome(stats));
    if stats.failures > 0 {
        println!(
            "  {} {} failed entr{} recorded in {}",
            "!".yellow(),
            stats.failures,
            if stats.failures == 1 { "y" } else { "ies" },
            failure_table.display()
        );
    }
}

/// One-line rendering of the counters
pub fn format_stats(stats: &RunStats) -> String {
    format!(
        "case types: {}, entries: {}, files renamed: {}, failures: {}, elapsed: {:.2}s",
        stats.case_types,
        stats.case_entries,
        stats.files_renamed,
        stats.failures,
        stats.elapsed().as_secs_f64()
    )
}

/// Succeeded versus failed entries
pub fn format_outcome(stats: &RunStats) -> String {
    format!(
        "{} of {} entr{} indexed without failure",
        stats.succeeded(),
        stats.case_entries,
        if stats.case_entries == 1 { "y" } else { "ies" }
    )
}
