use std::collections::BTreeMap;

use testsim_types::{BestMatch, Snapshot, TestRecord};

use crate::Engine;
use crate::similarity::jaccard;

impl Engine {
    /// Highest-scoring other test for `test_id`.
    ///
    /// Among equal maxima the lexicographically smallest id wins. `None` for
    /// unknown ids and for a snapshot with a single test.
    #[must_use]
    pub fn best_match(&self, test_id: &str) -> Option<&BestMatch> {
        self.best_match_table().get(test_id)
    }

    /// The full best-match table, computed on first use.
    pub fn best_match_table(&self) -> &BTreeMap<String, BestMatch> {
        self.best_matches.get_or_init(|| {
            let table = compute_best_matches(&self.snapshot);
            tracing::trace!(entries = table.len(), "computed best-match table");
            table
        })
    }

    /// One best-match score per test in id order; `0.0` without a counterpart.
    #[must_use]
    pub fn best_match_scores(&self) -> Vec<f64> {
        let table = self.best_match_table();
        self.snapshot
            .ids()
            .map(|id| table.get(id).map_or(0.0, |m| m.score))
            .collect()
    }
}

fn compute_best_matches(snapshot: &Snapshot) -> BTreeMap<String, BestMatch> {
    let records: Vec<&TestRecord> = snapshot.records().collect();
    let mut best: Vec<Option<(usize, f64)>> = vec![None; records.len()];

    // Each pair is scored once. Candidates for any test still arrive in
    // ascending index order, so strictly-greater keeps the first maximum.
    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let score = jaccard(&records[i].signature, &records[j].signature);
            offer(&mut best[i], j, score);
            offer(&mut best[j], i, score);
        }
    }

    records
        .iter()
        .zip(best)
        .filter_map(|(record, candidate)| {
            let (j, score) = candidate?;
            Some((
                record.id.clone(),
                BestMatch {
                    test: record.id.clone(),
                    matched: records[j].id.clone(),
                    score,
                },
            ))
        })
        .collect()
}

fn offer(slot: &mut Option<(usize, f64)>, candidate: usize, score: f64) {
    if slot.is_none_or(|(_, current)| score > current) {
        *slot = Some((candidate, score));
    }
}
