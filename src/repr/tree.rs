//! Regression tree representation (SoA) and mutable construction API.
//!
//! - [`Tree`]: immutable structure-of-arrays storage for traversal
//! - [`MutableTree`]: builder used by the grower during training
//!
//! Splits are all numeric (`value < threshold` goes left). Imputation runs
//! before training, so traversal never sees a missing cell; a `NAN` cell
//! would route right because the comparison is false.

/// Node index local to one tree (0 = root).
pub type NodeId = u32;

// ============================================================================
// Tree
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    EmptyTree,
    /// A child pointer references an out-of-bounds node.
    ChildOutOfBounds { node: NodeId, child: NodeId },
    /// A node references itself as a child.
    SelfLoop { node: NodeId },
    /// A node exists in storage but is unreachable from the root, or was
    /// reached twice.
    NotATree { node: NodeId },
}

/// Structure-of-arrays tree storage.
///
/// Stores nodes in flat parallel arrays for cache-friendly traversal.
#[derive(Debug, Clone)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f64]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f64]>,
}

impl Tree {
    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&l| l).count()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    /// Leaf value at a node (meaningful only for leaves).
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f64 {
        self.leaf_values[node as usize]
    }

    /// Traverse the tree for one row of predictor values (schema order).
    ///
    /// Every input row reaches some leaf, so out-of-training-range values
    /// still produce a finite prediction clipped to the leaf values.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            let idx = node as usize;
            let value = row[self.split_indices[idx] as usize];
            node = if value < self.split_thresholds[idx] {
                self.left_children[idx]
            } else {
                self.right_children[idx]
            };
        }
        self.leaf_values[node as usize]
    }

    /// Validate tree structure: child pointers in bounds, no self loops,
    /// every node reachable from the root exactly once.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let mut visited = vec![false; n_nodes];
        let mut stack: Vec<NodeId> = vec![0];

        while let Some(node) = stack.pop() {
            let idx = node as usize;
            if visited[idx] {
                return Err(TreeValidationError::NotATree { node });
            }
            visited[idx] = true;

            if !self.is_leaf(node) {
                let left = self.left_children[idx];
                let right = self.right_children[idx];
                if left == node || right == node {
                    return Err(TreeValidationError::SelfLoop { node });
                }
                for child in [left, right] {
                    if child as usize >= n_nodes {
                        return Err(TreeValidationError::ChildOutOfBounds { node, child });
                    }
                }
                stack.push(right);
                stack.push(left);
            }
        }

        if let Some(node) = visited.iter().position(|&v| !v) {
            return Err(TreeValidationError::NotATree { node: node as u32 });
        }
        Ok(())
    }
}

// ============================================================================
// MutableTree
// ============================================================================

/// Mutable tree for use during training.
///
/// Supports the growth pattern where nodes are allocated as placeholders and
/// filled in once the grower decides whether they split or terminate.
#[derive(Debug, Clone, Default)]
pub struct MutableTree {
    split_indices: Vec<u32>,
    split_thresholds: Vec<f64>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f64>,
}

impl MutableTree {
    /// Create an empty mutable tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the root placeholder node. Returns its id (always 0).
    pub fn init_root(&mut self) -> NodeId {
        debug_assert!(self.is_leaf.is_empty(), "init_root on non-empty tree");
        self.allocate_node()
    }

    fn allocate_node(&mut self) -> NodeId {
        let id = self.is_leaf.len() as NodeId;
        self.split_indices.push(0);
        self.split_thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        // Placeholder nodes are leaves until a split is applied.
        self.is_leaf.push(true);
        self.leaf_values.push(0.0);
        id
    }

    /// Apply a numeric split to a node, allocating the two children.
    ///
    /// Returns `(left_id, right_id)`.
    pub fn apply_split(&mut self, node: NodeId, feature: u32, threshold: f64) -> (NodeId, NodeId) {
        let left = self.allocate_node();
        let right = self.allocate_node();

        let idx = node as usize;
        self.split_indices[idx] = feature;
        self.split_thresholds[idx] = threshold;
        self.left_children[idx] = left;
        self.right_children[idx] = right;
        self.is_leaf[idx] = false;

        (left, right)
    }

    /// Finalize a node as a leaf with the given prediction.
    pub fn set_leaf(&mut self, node: NodeId, value: f64) {
        let idx = node as usize;
        self.is_leaf[idx] = true;
        self.leaf_values[idx] = value;
    }

    /// Number of nodes allocated so far.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Freeze into an immutable [`Tree`].
    pub fn freeze(self) -> Tree {
        Tree {
            split_indices: self.split_indices.into_boxed_slice(),
            split_thresholds: self.split_thresholds.into_boxed_slice(),
            left_children: self.left_children.into_boxed_slice(),
            right_children: self.right_children.into_boxed_slice(),
            is_leaf: self.is_leaf.into_boxed_slice(),
            leaf_values: self.leaf_values.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single split on feature 2 at 10.0: left leaf 1.0, right leaf 2.0.
    fn stump() -> Tree {
        let mut tree = MutableTree::new();
        let root = tree.init_root();
        let (left, right) = tree.apply_split(root, 2, 10.0);
        tree.set_leaf(left, 1.0);
        tree.set_leaf(right, 2.0);
        tree.freeze()
    }

    #[test]
    fn predict_routes_by_threshold() {
        let tree = stump();
        let mut row = vec![0.0; 5];

        row[2] = 5.0;
        assert_eq!(tree.predict_row(&row), 1.0);
        row[2] = 10.0; // threshold itself goes right
        assert_eq!(tree.predict_row(&row), 2.0);
        row[2] = 15.0;
        assert_eq!(tree.predict_row(&row), 2.0);
    }

    #[test]
    fn out_of_range_values_clip_to_a_leaf() {
        let tree = stump();
        let mut row = vec![0.0; 5];
        row[2] = 1e12;
        assert_eq!(tree.predict_row(&row), 2.0);
        row[2] = -1e12;
        assert_eq!(tree.predict_row(&row), 1.0);
    }

    #[test]
    fn single_leaf_tree_is_constant() {
        let mut tree = MutableTree::new();
        let root = tree.init_root();
        tree.set_leaf(root, 12.5);
        let tree = tree.freeze();

        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(tree.predict_row(&[0.0; 3]), 12.5);
    }

    #[test]
    fn frozen_tree_validates() {
        let tree = stump();
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
        tree.validate().expect("stump should be structurally valid");
    }
}
