//! Dendrogram statistics and metrics

use crate::tree::TreeNode;
use serde::Serialize;

/// Summary statistics of a finished clustering tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSummary {
    /// Number of leaves (input profiles)
    pub leaf_count: usize,

    /// Number of merge nodes
    pub merge_count: usize,

    /// Height of the root merge
    pub root_height: f64,

    /// Longest root-to-leaf path counted in edges
    pub max_depth: usize,

    /// Sum of all branch lengths below the root
    pub total_branch_length: f64,

    /// Smallest branch length below the root
    pub min_branch_length: f64,
}

/// Calculate summary statistics for a tree
pub fn summarize(root: &TreeNode) -> TreeSummary {
    let below_root = || root.iter().skip(1).map(|n| n.branch_length);
    let min_branch_length = below_root().fold(f64::INFINITY, f64::min);

    TreeSummary {
        leaf_count: root.leaf_count(),
        merge_count: root.merge_count(),
        root_height: root.height(),
        max_depth: max_depth(root),
        total_branch_length: below_root().sum(),
        min_branch_length: if min_branch_length.is_finite() {
            min_branch_length
        } else {
            0.0
        },
    }
}

/// Longest root-to-leaf path in edges
pub fn max_depth(node: &TreeNode) -> usize {
    match node.children() {
        None => 0,
        Some([left, right]) => 1 + max_depth(left).max(max_depth(right)),
    }
}

/// Distance from the top of `root` down to each leaf, summed along branches.
///
/// For a dendrogram this equals the root height for every leaf, since each
/// child spans exactly the gap between its own height and its parent's.
pub fn leaf_depths(root: &TreeNode) -> Vec<(String, f64)> {
    let mut depths = Vec::with_capacity(root.leaf_count());
    collect_depths(root, 0.0, &mut depths);
    depths
}

fn collect_depths(node: &TreeNode, depth: f64, out: &mut Vec<(String, f64)>) {
    match node.children() {
        None => {
            if let Some(name) = node.name() {
                out.push((name.to_string(), depth));
            }
        }
        Some([left, right]) => {
            collect_depths(left, depth + left.branch_length, out);
            collect_depths(right, depth + right.branch_length, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{cluster_bottom_up, Linkage};
    use crate::distance::manhattan_distance;
    use approx::assert_relative_eq;

    fn quintet() -> TreeNode {
        let profiles = [[0.0], [6.0], [8.0], [11.0], [15.0]];
        cluster_bottom_up(
            &profiles,
            &["A", "B", "C", "D", "E"],
            Linkage::Average,
            manhattan_distance,
        )
        .unwrap()
    }

    #[test]
    fn test_summary() {
        let summary = summarize(&quintet());
        assert_eq!(summary.leaf_count, 5);
        assert_eq!(summary.merge_count, 4);
        assert_eq!(summary.max_depth, 3);
        assert_relative_eq!(summary.root_height, 5.0);
        assert!(summary.min_branch_length >= 0.0);
        // leaves 5+1+1+2+2, merges 2+2+1
        assert_relative_eq!(summary.total_branch_length, 16.0);
    }

    #[test]
    fn test_leaf_depths_reach_root_height() {
        let tree = quintet();
        let depths = leaf_depths(&tree);
        assert_eq!(depths.len(), 5);
        for (_, depth) in depths {
            assert_relative_eq!(depth, tree.height());
        }
    }

    #[test]
    fn test_single_leaf_summary() {
        let summary = summarize(&TreeNode::leaf("solo"));
        assert_eq!(summary.leaf_count, 1);
        assert_eq!(summary.merge_count, 0);
        assert_eq!(summary.max_depth, 0);
        assert_eq!(summary.total_branch_length, 0.0);
        assert_eq!(summary.min_branch_length, 0.0);
    }
}
