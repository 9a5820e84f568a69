//! # testsim-format
//!
//! Rendering for similarity reports.
//!
//! Every renderer takes already-computed engine output; nothing here touches
//! the snapshot or the filesystem.

mod json;
mod text;

use std::path::Path;

use anyhow::Result;
use testsim_config::OutputFormat;
use testsim_types::{CheckReport, ClusterReport, ListReport, SignatureDiff, SimilarityStats};

/// Outcome of looking up one test for `check`.
#[derive(Debug, Clone, Copy)]
pub enum CheckView<'a> {
    Found(&'a CheckReport),
    NotFound {
        test_id: &'a str,
        /// Every recorded id, sorted.
        available: &'a [&'a str],
    },
}

/// Summary statistics; `None` means the snapshot is empty.
pub fn render_summary(
    stats: Option<&SimilarityStats>,
    dir: &Path,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(match stats {
            Some(stats) => text::summary(stats),
            None => text::no_tests(dir),
        }),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&stats)?),
    }
}

/// Every test with its best match. Text output leads with the summary.
pub fn render_list(
    report: &ListReport,
    stats: Option<&SimilarityStats>,
    dir: &Path,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::list(report, stats, dir)),
        OutputFormat::Json => json::list(report),
    }
}

/// Tests similar to one target. Text output leads with the summary.
pub fn render_check(
    view: CheckView<'_>,
    stats: Option<&SimilarityStats>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::check(view, stats)),
        OutputFormat::Json => json::check(view),
    }
}

pub fn render_diff(
    test_a: &str,
    test_b: &str,
    diff: &SignatureDiff,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::diff(test_a, test_b, diff)),
        OutputFormat::Json => json::diff(test_a, test_b, diff),
    }
}

/// Summary followed by the cluster listing.
pub fn render_report(
    stats: Option<&SimilarityStats>,
    report: &ClusterReport,
    dir: &Path,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(match stats {
            Some(stats) => text::report(stats, report),
            None => text::no_tests(dir),
        }),
        OutputFormat::Json => json::report(stats, report),
    }
}
