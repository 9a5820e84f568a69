use std::sync::{Arc, PoisonError};

use testsim_types::{SimilarityPair, Snapshot, TestRecord};

use crate::Engine;
use crate::similarity::jaccard;

impl Engine {
    /// All pairs scoring at or above `threshold`, highest score first.
    ///
    /// Equal scores keep enumeration order (`test_a`, then `test_b`). The
    /// result is memoized per threshold: a repeated call returns the same
    /// `Arc`.
    pub fn similarities(&self, threshold: f64) -> Arc<[SimilarityPair]> {
        let key = threshold_key(threshold);
        let mut cache = self
            .pair_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(&key) {
            return Arc::clone(hit);
        }

        let pairs: Arc<[SimilarityPair]> = compute_pairs(&self.snapshot, threshold).into();
        tracing::debug!(threshold, pairs = pairs.len(), "computed similarity pairs");
        cache.insert(key, Arc::clone(&pairs));
        pairs
    }
}

/// Cache key for a threshold; `-0.0` and `0.0` share an entry.
fn threshold_key(threshold: f64) -> u64 {
    if threshold == 0.0 {
        0f64.to_bits()
    } else {
        threshold.to_bits()
    }
}

fn compute_pairs(snapshot: &Snapshot, threshold: f64) -> Vec<SimilarityPair> {
    let records: Vec<&TestRecord> = snapshot.records().collect();
    let mut pairs = Vec::new();

    for (i, a) in records.iter().enumerate() {
        for b in &records[i + 1..] {
            let score = jaccard(&a.signature, &b.signature);
            if score < threshold || threshold.is_nan() {
                continue;
            }
            pairs.push(SimilarityPair {
                test_a: a.id.clone(),
                test_b: b.id.clone(),
                score,
            });
        }
    }

    // Stable: ties stay in enumeration order
    pairs.sort_by(|x, y| y.score.total_cmp(&x.score));
    pairs
}
