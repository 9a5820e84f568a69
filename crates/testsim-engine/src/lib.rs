//! Test similarity analysis over recorded call signatures.
//!
//! An [`Engine`] owns one immutable [`Snapshot`] and derives everything else
//! from it:
//! 1. Jaccard similarity between two signatures
//! 2. Qualifying pairs per threshold, memoized per engine
//! 3. A best-match table, computed once per engine
//! 4. Connected-component clusters via union-find
//! 5. Summary statistics including pair concentration
//! 6. Read-only queries (list, find-similar, diff, check, cluster report)
//!
//! Every ordering tie-break follows the snapshot's lexicographic test-id order.

#![forbid(unsafe_code)]

mod best_match;
mod cluster;
mod pairs;
mod query;
mod similarity;
mod stats;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use testsim_types::{BestMatch, SimilarityPair, Snapshot};

pub use cluster::build_clusters;
pub use similarity::jaccard;
pub use stats::{TOP_FRACTION, concentration};

/// Analysis session over one snapshot.
///
/// Caches are scoped to the instance: two engines built from equal snapshots
/// never share cached results.
#[derive(Debug)]
pub struct Engine {
    snapshot: Snapshot,
    pair_cache: Mutex<BTreeMap<u64, Arc<[SimilarityPair]>>>,
    best_matches: OnceLock<BTreeMap<String, BestMatch>>,
}

impl Engine {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        tracing::debug!(tests = snapshot.len(), "engine created");
        Self {
            snapshot,
            pair_cache: Mutex::new(BTreeMap::new()),
            best_matches: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }
}

impl From<Snapshot> for Engine {
    fn from(snapshot: Snapshot) -> Self {
        Self::new(snapshot)
    }
}
