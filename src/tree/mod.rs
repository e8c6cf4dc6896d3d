//! Owned binary dendrogram representation

pub mod newick;

use itertools::Itertools;

/// What a tree node stands for
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An input profile
    Leaf {
        /// Profile name
        name: String,
    },

    /// A merge event; owns exactly two children
    Merge {
        /// Height of the merge (half the linkage distance)
        height: f64,
        /// Children in insertion order
        children: Box<[TreeNode; 2]>,
    },
}

/// A node of the clustering tree.
///
/// Every node exclusively owns its children. `branch_length` is the vertical
/// distance from this node up to its parent's merge height; the engine fixes
/// it when the parent merge is formed.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// Distance to the parent along the height axis
    pub branch_length: f64,

    /// Leaf or merge payload
    pub kind: NodeKind,
}

impl TreeNode {
    /// Create a leaf with a zero branch length
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            branch_length: 0.0,
            kind: NodeKind::Leaf { name: name.into() },
        }
    }

    /// Create a merge node over two children (left first)
    pub fn merge(left: TreeNode, right: TreeNode, height: f64) -> Self {
        Self {
            branch_length: height,
            kind: NodeKind::Merge {
                height,
                children: Box::new([left, right]),
            },
        }
    }

    /// Check whether this node is an input profile
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Leaf name, `None` for merges
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { name } => Some(name),
            NodeKind::Merge { .. } => None,
        }
    }

    /// Merge height; leaves sit at height 0
    pub fn height(&self) -> f64 {
        match &self.kind {
            NodeKind::Leaf { .. } => 0.0,
            NodeKind::Merge { height, .. } => *height,
        }
    }

    /// The two children of a merge
    pub fn children(&self) -> Option<&[TreeNode; 2]> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Merge { children, .. } => Some(children),
        }
    }

    /// Pre-order traversal of this subtree
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Leaf names in left-to-right order
    pub fn leaf_names(&self) -> Vec<&str> {
        self.iter().filter_map(TreeNode::name).collect()
    }

    /// Number of leaves under this node
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|n| n.is_leaf()).count()
    }

    /// Number of merge nodes in this subtree
    pub fn merge_count(&self) -> usize {
        self.iter().filter(|n| !n.is_leaf()).count()
    }

    /// Reorder every merge's children by the names beneath them.
    ///
    /// The key of a subtree is its sorted leaf names rendered as
    /// `['a', 'b']`; the smaller key goes first. This gives a canonical
    /// layout so two trees can be compared as Newick text.
    pub fn sort_descendants(&mut self) {
        self.sort_and_key();
    }

    fn sort_and_key(&mut self) -> Vec<String> {
        match &mut self.kind {
            NodeKind::Leaf { name } => vec![name.clone()],
            NodeKind::Merge { children, .. } => {
                let [left, right] = &mut **children;
                let mut left_names = left.sort_and_key();
                let mut right_names = right.sort_and_key();
                left_names.sort();
                right_names.sort();
                if sort_key(&right_names) < sort_key(&left_names) {
                    children.swap(0, 1);
                }
                left_names.append(&mut right_names);
                left_names
            }
        }
    }
}

fn sort_key(names: &[String]) -> String {
    format!("[{}]", names.iter().map(|n| format!("'{}'", n)).join(", "))
}

/// Depth-first, parent-before-children iterator
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some([left, right]) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        // ((D,C),(B,A))
        let dc = TreeNode::merge(TreeNode::leaf("D"), TreeNode::leaf("C"), 1.0);
        let ba = TreeNode::merge(TreeNode::leaf("B"), TreeNode::leaf("A"), 2.0);
        TreeNode::merge(dc, ba, 3.0)
    }

    #[test]
    fn test_counts() {
        let tree = sample();
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.merge_count(), 3);
        assert_eq!(tree.iter().count(), 7);
        assert_eq!(tree.leaf_names(), vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_sort_descendants() {
        let mut tree = sample();
        tree.sort_descendants();
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C", "D"]);
        assert_eq!(tree.children().map(|c| c[0].height()), Some(2.0));
    }

    #[test]
    fn test_sort_key_uses_rendered_lists() {
        // the quote closing 'A' sorts before the second letter of 'AB'
        let mut tree = TreeNode::merge(
            TreeNode::leaf("AB"),
            TreeNode::merge(TreeNode::leaf("B"), TreeNode::leaf("A"), 1.0),
            2.0,
        );
        tree.sort_descendants();
        assert_eq!(tree.leaf_names(), vec!["A", "B", "AB"]);
    }

    #[test]
    fn test_leaf_accessors() {
        let leaf = TreeNode::leaf("x");
        assert!(leaf.is_leaf());
        assert_eq!(leaf.name(), Some("x"));
        assert_eq!(leaf.height(), 0.0);
        assert!(leaf.children().is_none());
        assert_eq!(leaf.branch_length, 0.0);
    }
}
