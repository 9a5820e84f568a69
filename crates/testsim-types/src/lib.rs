//! # testsim-types
//!
//! **Tier 0 (Analysis Contract)**
//!
//! Pure data structures for recorded test signatures and similarity reports.
//! No I/O or business logic.
//!
//! ## What belongs here
//! * The snapshot model (`TestRecord`, `Snapshot`)
//! * The on-disk signature artifact shape
//! * Report rows produced by the engine and consumed by formatters
//!
//! ## What does NOT belong here
//! * Similarity computation (use testsim-engine)
//! * Formatting logic (use testsim-format)
//! * File I/O operations (use testsim-store)

pub mod artifact;
mod snapshot;

use serde::{Deserialize, Serialize};

pub use artifact::{ArtifactTest, SignatureArtifact};
pub use snapshot::{Signature, Snapshot, SnapshotBuilder, TestRecord};

/// Separator between test class and test name in a test id.
pub const TEST_ID_SEPARATOR: char = '#';

/// Compose the canonical `"<class>#<name>"` test id.
#[must_use]
pub fn test_id(class: &str, name: &str) -> String {
    format!("{class}{TEST_ID_SEPARATOR}{name}")
}

/// The test-name half of a test id, or the whole id when it has no separator.
#[must_use]
pub fn test_name(id: &str) -> &str {
    id.rsplit(TEST_ID_SEPARATOR).next().unwrap_or(id)
}

/// Display identity of a test: id plus its advisory source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl TestRef {
    /// `file:line` when a source file was recorded.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        let file = self.file.as_deref()?;
        Some(match self.line {
            Some(line) => format!("{file}:{line}"),
            None => file.to_string(),
        })
    }
}

/// Two distinct tests whose signatures score at or above a threshold.
///
/// `test_a` always sorts before `test_b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub test_a: String,
    pub test_b: String,
    pub score: f64,
}

impl SimilarityPair {
    #[must_use]
    pub fn involves(&self, id: &str) -> bool {
        self.test_a == id || self.test_b == id
    }
}

/// The single highest-scoring counterpart of a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub test: String,
    pub matched: String,
    pub score: f64,
}

/// One entry of a find-similar query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarMatch {
    pub test: String,
    pub score: f64,
}

/// Element-wise comparison of two signatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureDiff {
    pub only_in_a: Vec<String>,
    pub only_in_b: Vec<String>,
    pub common: Vec<String>,
    pub score: f64,
}

/// A connected component of the similarity graph at some threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Sorted member ids; always at least two.
    pub members: Vec<String>,
    /// Qualifying pairs with both endpoints inside the cluster.
    pub pair_count: usize,
    pub max_similarity: f64,
    /// Most-connected member, ties broken by id.
    pub representative: String,
}

impl Cluster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Summary metrics for one snapshot at one threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityStats {
    pub total_tests: usize,
    pub best_match_avg: f64,
    pub best_match_median: f64,
    pub best_match_max: f64,
    pub cluster_count: usize,
    pub largest_cluster: usize,
    /// Whole-number percentage of qualifying pairs touching the most
    /// pair-active 20% of tests. `None` when no pair qualifies.
    pub concentration: Option<f64>,
    pub threshold: f64,
}

/// A best match resolved to its display identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub test: TestRef,
    pub score: f64,
}

/// One row of the list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub test: TestRef,
    pub best_match: Option<RankedMatch>,
}

impl ListEntry {
    /// Best-match score, `0.0` when the test has no counterpart.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.best_match.as_ref().map_or(0.0, |m| m.score)
    }
}

/// Every test with its best match, split at the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListReport {
    pub total_tests: usize,
    pub threshold: f64,
    /// Tests whose best match scores at or above the threshold.
    pub potentially_redundant: Vec<ListEntry>,
    pub others: Vec<ListEntry>,
}

impl ListReport {
    /// All entries in display order (redundant first).
    pub fn entries(&self) -> impl Iterator<Item = &ListEntry> {
        self.potentially_redundant.iter().chain(self.others.iter())
    }
}

/// A similar test together with how its signature differs from the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckMatch {
    pub test: TestRef,
    pub score: f64,
    pub only_in_target: Vec<String>,
    pub only_in_similar: Vec<String>,
    pub common_count: usize,
}

/// Detailed similarity view for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub test: TestRef,
    pub threshold: f64,
    pub similar: Vec<CheckMatch>,
}

/// A cluster with member locations and the callables every member shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterDetail {
    pub members: Vec<TestRef>,
    pub pair_count: usize,
    pub max_similarity: f64,
    pub representative: String,
    pub common_callables: Vec<String>,
}

/// All clusters at a threshold, largest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub threshold: f64,
    pub clusters: Vec<ClusterDetail>,
}
