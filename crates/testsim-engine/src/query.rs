use std::cmp::Reverse;

use testsim_types::{
    CheckMatch, CheckReport, ClusterDetail, ClusterReport, ListEntry, ListReport, RankedMatch,
    SignatureDiff, SimilarMatch,
};

use crate::Engine;
use crate::similarity::jaccard;

impl Engine {
    /// Every other test scoring at or above `threshold` against `test_id`,
    /// highest first. Empty for unknown ids.
    #[must_use]
    pub fn find_similar(&self, test_id: &str, threshold: f64) -> Vec<SimilarMatch> {
        let Some(target) = self.snapshot.get(test_id) else {
            return Vec::new();
        };

        let mut results: Vec<SimilarMatch> = self
            .snapshot
            .records()
            .filter(|record| record.id != test_id)
            .filter_map(|record| {
                let score = jaccard(&target.signature, &record.signature);
                (score >= threshold).then(|| SimilarMatch {
                    test: record.id.clone(),
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results
    }

    /// Element-wise comparison of two signatures; `None` unless both exist.
    #[must_use]
    pub fn diff(&self, test_a: &str, test_b: &str) -> Option<SignatureDiff> {
        let a = self.snapshot.get(test_a)?;
        let b = self.snapshot.get(test_b)?;

        Some(SignatureDiff {
            only_in_a: sorted(a.signature.iter().filter(|m| !b.signature.contains(*m))),
            only_in_b: sorted(b.signature.iter().filter(|m| !a.signature.contains(*m))),
            common: sorted(a.signature.iter().filter(|m| b.signature.contains(*m))),
            score: jaccard(&a.signature, &b.signature),
        })
    }

    /// Every test with its best match, highest score first, split at
    /// `threshold` into potentially redundant tests and the rest.
    #[must_use]
    pub fn list(&self, threshold: f64) -> ListReport {
        let mut entries: Vec<ListEntry> = self
            .snapshot
            .records()
            .map(|record| ListEntry {
                test: record.test_ref(),
                best_match: self.best_match(&record.id).and_then(|m| {
                    Some(RankedMatch {
                        test: self.snapshot.test_ref(&m.matched)?,
                        score: m.score,
                    })
                }),
            })
            .collect();

        entries.sort_by(|a, b| b.score().total_cmp(&a.score()));

        let (potentially_redundant, others): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.best_match.is_some() && e.score() >= threshold);

        ListReport {
            total_tests: self.snapshot.len(),
            threshold,
            potentially_redundant,
            others,
        }
    }

    /// Similar tests for `test_id` with per-match signature differences.
    /// `None` for unknown ids.
    #[must_use]
    pub fn check(&self, test_id: &str, threshold: f64) -> Option<CheckReport> {
        let test = self.snapshot.test_ref(test_id)?;

        let similar = self
            .find_similar(test_id, threshold)
            .into_iter()
            .filter_map(|m| {
                let diff = self.diff(test_id, &m.test)?;
                Some(CheckMatch {
                    test: self.snapshot.test_ref(&m.test)?,
                    score: m.score,
                    only_in_target: diff.only_in_a,
                    only_in_similar: diff.only_in_b,
                    common_count: diff.common.len(),
                })
            })
            .collect();

        Some(CheckReport {
            test,
            threshold,
            similar,
        })
    }

    /// Clusters at `threshold`, largest first, with member locations and
    /// shared callables.
    #[must_use]
    pub fn cluster_report(&self, threshold: f64) -> ClusterReport {
        let mut clusters = self.clusters(threshold);
        clusters.sort_by_key(|c| Reverse(c.len()));

        let clusters = clusters
            .into_iter()
            .map(|cluster| ClusterDetail {
                members: cluster
                    .members
                    .iter()
                    .filter_map(|id| self.snapshot.test_ref(id))
                    .collect(),
                common_callables: self.common_callables(&cluster),
                pair_count: cluster.pair_count,
                max_similarity: cluster.max_similarity,
                representative: cluster.representative,
            })
            .collect();

        ClusterReport {
            threshold,
            clusters,
        }
    }
}

fn sorted<'a>(iter: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = iter.cloned().collect();
    out.sort_unstable();
    out
}
