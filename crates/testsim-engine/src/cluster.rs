use std::collections::BTreeMap;

use testsim_types::{Cluster, Signature, SimilarityPair};

use crate::Engine;

impl Engine {
    /// Connected components of the similarity graph at `threshold`.
    ///
    /// Tests without a qualifying neighbor are left out. Clusters are ordered
    /// by their smallest member id.
    pub fn clusters(&self, threshold: f64) -> Vec<Cluster> {
        let pairs = self.similarities(threshold);
        if pairs.is_empty() {
            return Vec::new();
        }
        let clusters = build_clusters(self.snapshot.ids(), &pairs);
        tracing::debug!(threshold, clusters = clusters.len(), "built clusters");
        clusters
    }

    /// Callables exercised by every member of `cluster`, sorted.
    ///
    /// May be empty: members linked through a chain of partial overlaps need
    /// not share a single callable.
    #[must_use]
    pub fn common_callables(&self, cluster: &Cluster) -> Vec<String> {
        let mut signatures = cluster
            .members
            .iter()
            .filter_map(|id| self.snapshot.get(id))
            .map(|record| &record.signature);

        let Some(first) = signatures.next() else {
            return Vec::new();
        };
        let mut common: Signature = first.clone();
        for signature in signatures {
            common.retain(|m| signature.contains(m));
            if common.is_empty() {
                break;
            }
        }

        let mut out: Vec<String> = common.into_iter().collect();
        out.sort_unstable();
        out
    }
}

// ---------------------------------------------------------------------------
// Union-Find (Disjoint Sets) for clustering
// ---------------------------------------------------------------------------

/// Path-compressed union-find with union by rank.
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Group `ids` into connected components using `pairs` as edges.
///
/// Membership depends only on the edge set, not on edge order. Pairs naming
/// an id outside `ids` are ignored.
pub fn build_clusters<'a, I>(ids: I, pairs: &[SimilarityPair]) -> Vec<Cluster>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = ids.into_iter().collect();
    names.sort_unstable();
    names.dedup();
    let name_to_idx: BTreeMap<&str, usize> =
        names.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let mut ds = DisjointSets::new(names.len());
    let mut connection_count: Vec<usize> = vec![0; names.len()];

    let edges: Vec<(usize, usize, f64)> = pairs
        .iter()
        .filter_map(|p| {
            let a = *name_to_idx.get(p.test_a.as_str())?;
            let b = *name_to_idx.get(p.test_b.as_str())?;
            Some((a, b, p.score))
        })
        .collect();

    for &(a, b, _) in &edges {
        ds.union(a, b);
        connection_count[a] += 1;
        connection_count[b] += 1;
    }

    // Group by root; index order keeps members sorted
    let mut components: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for i in 0..names.len() {
        let root = ds.find(i);
        components.entry(root).or_default().push(i);
    }

    let mut comp_max_sim: BTreeMap<usize, f64> = BTreeMap::new();
    let mut comp_pair_count: BTreeMap<usize, usize> = BTreeMap::new();
    for &(a, _, score) in &edges {
        let root = ds.find(a);
        let entry = comp_max_sim.entry(root).or_insert(0.0);
        if score > *entry {
            *entry = score;
        }
        *comp_pair_count.entry(root).or_insert(0) += 1;
    }

    let mut clusters: Vec<Cluster> = components
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(root, members)| {
            // Most-connected member, tie-break alphabetical
            let representative = members
                .iter()
                .copied()
                .max_by(|&a, &b| {
                    connection_count[a]
                        .cmp(&connection_count[b])
                        .then_with(|| names[b].cmp(names[a]))
                })
                .map(|i| names[i].to_string())
                .unwrap_or_default();

            Cluster {
                members: members.iter().map(|&i| names[i].to_string()).collect(),
                pair_count: comp_pair_count.get(&root).copied().unwrap_or(0),
                max_similarity: comp_max_sim.get(&root).copied().unwrap_or(0.0),
                representative,
            }
        })
        .collect();

    clusters.sort_by(|a, b| a.members[0].cmp(&b.members[0]));
    clusters
}
