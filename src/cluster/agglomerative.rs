//! Bottom-up agglomeration of profiles into a dendrogram

use crate::cluster::linkage::{cluster_distance, Linkage};
use crate::distance::Distance;
use crate::error::{ClusterError, Result};
use crate::tree::TreeNode;
use itertools::Itertools;
use log;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One merge of the agglomeration loop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeStep {
    /// Id given to the merged cluster
    pub id: usize,

    /// Id of the cluster added as first child
    pub left: usize,

    /// Id of the cluster added as second child
    pub right: usize,

    /// Linkage distance between the two clusters
    pub distance: f64,

    /// Number of profiles in the merged cluster
    pub size: usize,
}

/// Result of a full clustering run
#[derive(Debug, Clone)]
pub struct ClusterRun {
    /// Root of the dendrogram
    pub root: TreeNode,

    /// Merges in the order they were performed
    pub merges: Vec<MergeStep>,
}

/// Linkage distances keyed by cluster id pair.
///
/// Ids are never reused and a cluster's members never change, so entries
/// stay valid for the whole run.
#[derive(Debug, Default)]
pub struct DistanceCache {
    entries: HashMap<(usize, usize), f64>,
}

impl DistanceCache {
    /// Cached distance between clusters `a` and `b`
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.entries.get(&(a, b)).copied()
    }

    /// Store a distance under both orderings of the pair
    pub fn insert(&mut self, a: usize, b: usize, distance: f64) {
        self.entries.insert((a, b), distance);
        self.entries.insert((b, a), distance);
    }

    /// Number of distinct pairs stored
    pub fn len(&self) -> usize {
        self.entries.len() / 2
    }

    /// Check whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A cluster that has not been merged into anything yet
struct ActiveCluster<'a> {
    id: usize,
    node: TreeNode,
    members: Vec<&'a [f64]>,
}

/// Agglomerative clusterer over a pluggable distance function
#[derive(Debug, Clone)]
pub struct Agglomerator<D> {
    linkage: Linkage,
    distance: D,
    parallel: bool,
}

impl<D: Distance> Agglomerator<D> {
    /// Create a clusterer with the given linkage rule and distance
    pub fn new(linkage: Linkage, distance: D) -> Self {
        Self {
            linkage,
            distance,
            parallel: false,
        }
    }

    /// Compute missing pair distances with rayon before each scan.
    ///
    /// Only the distance evaluations run in parallel; the closest pair is
    /// still chosen by the sequential scan, so the tree is unchanged.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Cluster `profiles` (labelled by `names`) and return the root
    pub fn fit<P, S>(&self, profiles: &[P], names: &[S]) -> Result<TreeNode>
    where
        P: AsRef<[f64]>,
        S: AsRef<str>,
    {
        Ok(self.run(profiles, names)?.root)
    }

    /// Cluster `profiles` and keep the merge history alongside the tree
    pub fn run<P, S>(&self, profiles: &[P], names: &[S]) -> Result<ClusterRun>
    where
        P: AsRef<[f64]>,
        S: AsRef<str>,
    {
        validate_input(profiles, names)?;

        let n = profiles.len();
        log::info!(
            "Clustering {} profiles with {} linkage{}",
            n,
            self.linkage,
            if self.parallel { " (parallel)" } else { "" }
        );

        let mut active: Vec<ActiveCluster<'_>> = profiles
            .iter()
            .zip(names)
            .enumerate()
            .map(|(id, (profile, name))| ActiveCluster {
                id,
                node: TreeNode::leaf(name.as_ref()),
                members: vec![profile.as_ref()],
            })
            .collect();

        let mut cache = DistanceCache::default();
        let mut merges = Vec::with_capacity(n - 1);
        let mut next_id = n;

        while active.len() > 1 {
            if self.parallel {
                self.prefill(&active, &mut cache)?;
            }

            let (i, j, min_dist) = self.closest_pair(&active, &mut cache)?;

            // j > i, so removing j first leaves i in place
            let right = active.remove(j);
            let left = active.remove(i);

            let height = min_dist / 2.0;
            let size = left.members.len() + right.members.len();
            log::debug!(
                "Merging clusters {} and {} into {} at height {} ({} members)",
                left.id,
                right.id,
                next_id,
                height,
                size
            );

            merges.push(MergeStep {
                id: next_id,
                left: left.id,
                right: right.id,
                distance: min_dist,
                size,
            });

            let mut members = left.members;
            members.extend(right.members);

            let node = TreeNode::merge(
                hang_below(left.node, height),
                hang_below(right.node, height),
                height,
            );

            active.push(ActiveCluster {
                id: next_id,
                node,
                members,
            });
            next_id += 1;
        }

        log::info!(
            "Finished {} merges, {} cluster pairs evaluated",
            merges.len(),
            cache.len()
        );

        let root = match active.pop() {
            Some(cluster) => cluster.node,
            None => return Err(ClusterError::EmptyInput),
        };

        Ok(ClusterRun { root, merges })
    }

    /// Find the closest active pair.
    ///
    /// Pairs are scanned as `(left, right)` with `left < right` in active-list
    /// order and only a strictly smaller distance replaces the current best,
    /// so ties go to the first pair scanned.
    fn closest_pair(
        &self,
        active: &[ActiveCluster<'_>],
        cache: &mut DistanceCache,
    ) -> Result<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;

        for (i, j) in (0..active.len()).tuple_combinations() {
            let (a, b) = (&active[i], &active[j]);
            let dist = match cache.get(a.id, b.id) {
                Some(d) => d,
                None => {
                    let d = self.evaluate(a, b)?;
                    cache.insert(a.id, b.id, d);
                    d
                }
            };

            if best.map_or(true, |(_, _, min)| dist < min) {
                best = Some((i, j, dist));
            }
        }

        best.ok_or(ClusterError::EmptyInput)
    }

    /// Fill the cache for every uncached active pair using rayon.
    ///
    /// Results are collected in scan order and the first failure in that
    /// order is returned, the same pair the sequential scan would report.
    fn prefill(&self, active: &[ActiveCluster<'_>], cache: &mut DistanceCache) -> Result<()> {
        let missing: Vec<(usize, usize)> = (0..active.len())
            .tuple_combinations()
            .filter(|&(i, j)| cache.get(active[i].id, active[j].id).is_none())
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        let computed: Vec<Result<(usize, usize, f64)>> = missing
            .par_iter()
            .map(|&(i, j)| {
                let (a, b) = (&active[i], &active[j]);
                self.evaluate(a, b).map(|d| (a.id, b.id, d))
            })
            .collect();

        for result in computed {
            let (a, b, d) = result?;
            cache.insert(a, b, d);
        }

        Ok(())
    }

    fn evaluate(&self, a: &ActiveCluster<'_>, b: &ActiveCluster<'_>) -> Result<f64> {
        let d = cluster_distance(&a.members, &b.members, self.linkage, &self.distance)?;
        if d.is_nan() {
            return Err(ClusterError::NonFiniteDistance {
                left: a.id,
                right: b.id,
            });
        }
        Ok(d)
    }
}

/// Set the branch length of a node that becomes a child at `height`.
///
/// A leaf spans the full height; a merge spans what is left above its own
/// height, which is still stored as its branch length at this point.
fn hang_below(mut node: TreeNode, height: f64) -> TreeNode {
    node.branch_length = if node.is_leaf() {
        height
    } else {
        (height - node.branch_length).max(0.0)
    };
    node
}

fn validate_input<P, S>(profiles: &[P], names: &[S]) -> Result<()>
where
    P: AsRef<[f64]>,
    S: AsRef<str>,
{
    let first = profiles.first().ok_or(ClusterError::EmptyInput)?;

    if profiles.len() != names.len() {
        return Err(ClusterError::NameCountMismatch {
            profiles: profiles.len(),
            names: names.len(),
        });
    }

    let expected = first.as_ref().len();
    if let Some((index, p)) = profiles
        .iter()
        .enumerate()
        .find(|(_, p)| p.as_ref().len() != expected)
    {
        return Err(ClusterError::DimensionMismatch {
            index,
            expected,
            found: p.as_ref().len(),
        });
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_ref()) {
            return Err(ClusterError::DuplicateName {
                name: name.as_ref().to_string(),
            });
        }
    }

    Ok(())
}

/// Cluster `profiles` bottom-up and return the root of the dendrogram.
///
/// `names[i]` labels `profiles[i]`. Merge heights are half the linkage
/// distance of the merged pair.
pub fn cluster_bottom_up<P, S, D>(
    profiles: &[P],
    names: &[S],
    linkage: Linkage,
    distance: D,
) -> Result<TreeNode>
where
    P: AsRef<[f64]>,
    S: AsRef<str>,
    D: Distance,
{
    Agglomerator::new(linkage, distance).fit(profiles, names)
}
