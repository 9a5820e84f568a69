use std::path::Path;

use testsim_math::{ratio_pct, threshold_pct};
use testsim_types::{
    ClusterReport, ListEntry, ListReport, SignatureDiff, SimilarityStats, TestRef, test_name,
};

use crate::CheckView;

const WIDE_RULE: usize = 70;
const NARROW_RULE: usize = 60;
const COMMON_PATH_LIMIT: usize = 10;

fn rule(ch: char, width: usize) -> String {
    let mut line: String = std::iter::repeat_n(ch, width).collect();
    line.push('\n');
    line
}

fn push_location(out: &mut String, test: &TestRef, indent: &str) {
    if let Some(loc) = test.location() {
        out.push_str(&format!("{indent}{loc}\n"));
    }
}

pub(crate) fn no_tests(dir: &Path) -> String {
    format!("No recorded tests found in {}\n", dir.display())
}

pub(crate) fn summary(stats: &SimilarityStats) -> String {
    let title = "Test Similarity Summary";
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&rule('-', title.len()));
    out.push_str(&format!("Total tests: {}\n\n", stats.total_tests));

    out.push_str("Best-match similarity:\n");
    out.push_str(&format!("  avg:    {:.2}\n", stats.best_match_avg));
    out.push_str(&format!("  median: {:.2}\n", stats.best_match_median));
    out.push_str(&format!("  max:    {:.2}\n\n", stats.best_match_max));

    out.push_str(&format!(
        "Similarity clusters (>={}%):\n",
        threshold_pct(stats.threshold)
    ));
    out.push_str(&format!("  clusters: {}\n", stats.cluster_count));
    if stats.largest_cluster > 0 {
        out.push_str(&format!("  largest:  {} tests\n", stats.largest_cluster));
    }
    out.push('\n');

    if let Some(concentration) = stats.concentration {
        out.push_str("Similarity concentration:\n");
        out.push_str(&format!(
            "  top 20% of tests account for {concentration:.0}% of high-similarity pairs\n\n"
        ));
    }
    out
}

pub(crate) fn list(report: &ListReport, stats: Option<&SimilarityStats>, dir: &Path) -> String {
    if report.total_tests == 0 {
        return no_tests(dir);
    }

    let mut out = stats.map(summary).unwrap_or_default();
    out.push_str(&format!("Recorded tests: {}\n", report.total_tests));
    out.push_str(&rule('=', WIDE_RULE));
    out.push('\n');

    if !report.potentially_redundant.is_empty() {
        out.push_str(&format!(
            "Potentially redundant (>= {}% similar):\n",
            threshold_pct(report.threshold)
        ));
        out.push_str(&rule('-', WIDE_RULE));
        for entry in &report.potentially_redundant {
            push_redundant(&mut out, entry);
        }
        out.push('\n');
    }

    if !report.others.is_empty() {
        out.push_str("Other tests:\n");
        out.push_str(&rule('-', WIDE_RULE));
        for entry in &report.others {
            match &entry.best_match {
                Some(best) => out.push_str(&format!(
                    "  {:.1}%  {}\n",
                    ratio_pct(best.score),
                    entry.test.id
                )),
                None => out.push_str(&format!("    -   {}\n", entry.test.id)),
            }
        }
        out.push('\n');
    }

    out.push_str(&rule('=', WIDE_RULE));
    out.push_str("Use: testsim check <TEST_ID> for details\n");
    out
}

fn push_redundant(out: &mut String, entry: &ListEntry) {
    let Some(best) = &entry.best_match else {
        return;
    };
    out.push_str(&format!(
        "  {:.1}%  {}\n",
        ratio_pct(best.score),
        entry.test.id
    ));
    push_location(out, &entry.test, "        ");
    out.push_str(&format!("        -> {}\n", best.test.id));
}

pub(crate) fn check(view: CheckView<'_>, stats: Option<&SimilarityStats>) -> String {
    let mut out = stats.map(summary).unwrap_or_default();

    let report = match view {
        CheckView::Found(report) => report,
        CheckView::NotFound { test_id, available } => {
            out.push_str(&format!("Test not found: {test_id}\n"));
            out.push_str("Available tests:\n");
            for id in available {
                out.push_str(&format!("  {id}\n"));
            }
            return out;
        }
    };

    let target = &report.test;
    if report.similar.is_empty() {
        out.push_str(&format!(
            "No similar tests found for {} (threshold: {}%)\n",
            target.id,
            threshold_pct(report.threshold)
        ));
        return out;
    }

    out.push_str(&format!("Similar tests for: {}\n", target.id));
    push_location(&mut out, target, "  ");
    out.push_str(&rule('=', NARROW_RULE));
    out.push('\n');

    for matched in &report.similar {
        out.push_str(&format!(
            "{:.1}% similar: {}\n",
            ratio_pct(matched.score),
            matched.test.id
        ));
        push_location(&mut out, &matched.test, "  ");
        out.push_str(&rule('-', NARROW_RULE));

        if !matched.only_in_target.is_empty() {
            out.push_str(&format!("  Only in {}:\n", test_name(&target.id)));
            for method in &matched.only_in_target {
                out.push_str(&format!("    - {method}\n"));
            }
        }
        if !matched.only_in_similar.is_empty() {
            out.push_str(&format!("  Only in {}:\n", test_name(&matched.test.id)));
            for method in &matched.only_in_similar {
                out.push_str(&format!("    - {method}\n"));
            }
        }
        out.push_str(&format!("  Common: {} method(s)\n\n", matched.common_count));
    }
    out
}

pub(crate) fn diff(test_a: &str, test_b: &str, diff: &SignatureDiff) -> String {
    let mut out = format!("Diff: {test_a} vs {test_b}\n");
    out.push_str(&format!("Similarity: {:.1}%\n", ratio_pct(diff.score)));
    out.push_str(&rule('=', NARROW_RULE));

    let sections = [
        (format!("Only in {}", test_name(test_a)), &diff.only_in_a),
        (format!("Only in {}", test_name(test_b)), &diff.only_in_b),
        ("Common".to_string(), &diff.common),
    ];
    for (heading, methods) in sections {
        out.push_str(&format!("{heading} ({}):\n", methods.len()));
        for method in methods {
            out.push_str(&format!("  - {method}\n"));
        }
    }
    out
}

pub(crate) fn report(stats: &SimilarityStats, report: &ClusterReport) -> String {
    let mut out = summary(stats);
    if report.clusters.is_empty() {
        out.push_str("No similarity clusters found.\n");
        return out;
    }

    out.push_str("Clusters\n");
    out.push_str(&rule('-', "Clusters".len()));

    for (i, cluster) in report.clusters.iter().enumerate() {
        out.push_str(&format!(
            "\nCluster {} ({} tests):\n",
            i + 1,
            cluster.members.len()
        ));
        for member in &cluster.members {
            out.push_str(&format!("  {}\n", member.id));
            push_location(&mut out, member, "    ");
        }

        let common = &cluster.common_callables;
        if !common.is_empty() {
            out.push_str(&format!("\n  Common code paths ({}):\n", common.len()));
            for method in common.iter().take(COMMON_PATH_LIMIT) {
                out.push_str(&format!("    {method}\n"));
            }
            if common.len() > COMMON_PATH_LIMIT {
                out.push_str(&format!(
                    "    ... and {} more\n",
                    common.len() - COMMON_PATH_LIMIT
                ));
            }
        }
    }
    out
}
