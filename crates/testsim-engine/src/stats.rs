use std::collections::{BTreeMap, BTreeSet};

use testsim_math::{mean, median_sorted, percentage, round_f64, top_fraction_count};
use testsim_types::{SimilarityPair, SimilarityStats};

use crate::Engine;

/// Share of tests, ranked by pair participation, counted as the "top" group
/// for concentration.
pub const TOP_FRACTION: f64 = 0.2;

impl Engine {
    /// Summary metrics at `threshold`; `None` for an empty snapshot.
    pub fn summary(&self, threshold: f64) -> Option<SimilarityStats> {
        if self.snapshot.is_empty() {
            return None;
        }

        let pairs = self.similarities(threshold);

        let mut scores = self.best_match_scores();
        scores.sort_by(f64::total_cmp);

        let clusters = self.clusters(threshold);
        let largest_cluster = clusters.iter().map(|c| c.len()).max().unwrap_or(0);

        Some(SimilarityStats {
            total_tests: self.snapshot.len(),
            best_match_avg: mean(&scores),
            best_match_median: median_sorted(&scores),
            best_match_max: scores.last().copied().unwrap_or(0.0),
            cluster_count: clusters.len(),
            largest_cluster,
            concentration: concentration(&pairs, TOP_FRACTION),
            threshold,
        })
    }
}

/// Percentage (whole number) of `pairs` with at least one endpoint among the
/// `top_fraction` most pair-active tests.
///
/// Only tests that appear in some pair are ranked; at least one test is
/// always selected. Equal participation counts rank by test id. `None` when
/// `pairs` is empty.
#[must_use]
pub fn concentration(pairs: &[SimilarityPair], top_fraction: f64) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }

    let mut pair_count: BTreeMap<&str, usize> = BTreeMap::new();
    for p in pairs {
        *pair_count.entry(p.test_a.as_str()).or_insert(0) += 1;
        *pair_count.entry(p.test_b.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = pair_count.into_iter().collect();
    // Stable over id order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let top_count = top_fraction_count(ranked.len(), top_fraction);
    let top: BTreeSet<&str> = ranked.iter().take(top_count).map(|(id, _)| *id).collect();

    let with_top = pairs
        .iter()
        .filter(|p| top.contains(p.test_a.as_str()) || top.contains(p.test_b.as_str()))
        .count();

    percentage(with_top, pairs.len()).map(|pct| round_f64(pct, 0))
}
