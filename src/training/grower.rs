//! Greedy variance-reduction tree grower.
//!
//! Grows one regression tree from a row sample. At each node a fresh `mtry`
//! candidate draw is made and the (predictor, threshold) pair maximizing the
//! variance reduction of the target is chosen among only those candidates.
//! Comparison is strictly-greater, so ties go to the first candidate in drawn
//! order and, within a candidate, to the lowest threshold. This is the
//! deterministic tie-break the ensemble's reproducibility rests on.

use rand_xoshiro::Xoshiro256PlusPlus;

use crate::repr::{MutableTree, NodeId, Tree};

use super::sampling::CandidateSampler;

/// Variance-reduction floor below which a split is considered noise.
///
/// Guards against splits manufactured by floating-point cancellation in the
/// sum-of-squares bookkeeping.
const MIN_REDUCTION: f64 = 1e-12;

/// Node-level target statistics.
#[derive(Debug, Clone, Copy, Default)]
struct NodeStats {
    n: usize,
    sum: f64,
    sum_sq: f64,
}

impl NodeStats {
    fn from_rows(rows: &[u32], targets: &[f64]) -> Self {
        let mut stats = Self::default();
        for &row in rows {
            let t = targets[row as usize];
            stats.n += 1;
            stats.sum += t;
            stats.sum_sq += t * t;
        }
        stats
    }

    #[inline]
    fn mean(&self) -> f64 {
        self.sum / self.n as f64
    }

    /// Sum of squared errors around the node mean.
    #[inline]
    fn sse(&self) -> f64 {
        (self.sum_sq - self.sum * self.sum / self.n as f64).max(0.0)
    }
}

/// Best split found for one node.
#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: u32,
    threshold: f64,
    reduction: f64,
}

/// Grower for a single tree over borrowed training columns.
pub struct TreeGrower<'a> {
    columns: &'a [Vec<f64>],
    targets: &'a [f64],
    min_node_size: usize,
    sampler: CandidateSampler,
    /// Scratch (value, target) pairs reused across nodes.
    scratch: Vec<(f64, f64)>,
}

impl<'a> TreeGrower<'a> {
    /// Create a grower.
    ///
    /// `columns` are the predictor columns in schema order; `targets` is the
    /// (log-space) target, indexed by absolute row. Inputs must contain no
    /// missing cells; imputation runs before training.
    pub fn new(
        columns: &'a [Vec<f64>],
        targets: &'a [f64],
        mtry: usize,
        min_node_size: usize,
    ) -> Self {
        Self {
            columns,
            targets,
            min_node_size,
            sampler: CandidateSampler::new(columns.len(), mtry),
            scratch: Vec::new(),
        }
    }

    /// Grow one tree from the given row sample.
    ///
    /// Returns the frozen tree and the per-feature variance reduction it
    /// accumulated (the tree's importance contribution).
    pub fn grow(&mut self, rows: Vec<u32>, rng: &mut Xoshiro256PlusPlus) -> (Tree, Vec<f64>) {
        debug_assert!(!rows.is_empty(), "grow on empty row sample");

        let mut tree = MutableTree::new();
        let mut importance = vec![0.0; self.columns.len()];
        let root = tree.init_root();

        let mut work: Vec<(NodeId, Vec<u32>)> = vec![(root, rows)];
        while let Some((node, node_rows)) = work.pop() {
            let stats = NodeStats::from_rows(&node_rows, self.targets);

            if stats.n <= self.min_node_size || stats.sse() <= MIN_REDUCTION {
                tree.set_leaf(node, stats.mean());
                continue;
            }

            match self.find_best_split(&node_rows, stats, rng) {
                Some(split) => {
                    importance[split.feature as usize] += split.reduction;
                    let (left_id, right_id) =
                        tree.apply_split(node, split.feature, split.threshold);

                    let column = &self.columns[split.feature as usize];
                    let (left_rows, right_rows): (Vec<u32>, Vec<u32>) = node_rows
                        .into_iter()
                        .partition(|&row| column[row as usize] < split.threshold);
                    debug_assert!(!left_rows.is_empty() && !right_rows.is_empty());

                    work.push((right_id, right_rows));
                    work.push((left_id, left_rows));
                }
                None => tree.set_leaf(node, stats.mean()),
            }
        }

        (tree.freeze(), importance)
    }

    /// Scan the node's candidate draw for the best variance-reduction split.
    ///
    /// Returns `None` if no candidate offers a positive reduction (constant
    /// candidate columns, or rows already homogeneous).
    fn find_best_split(
        &mut self,
        rows: &[u32],
        parent: NodeStats,
        rng: &mut Xoshiro256PlusPlus,
    ) -> Option<BestSplit> {
        let mut best: Option<BestSplit> = None;
        let parent_sse = parent.sse();

        // The sampler's draw order is the tie-break order.
        let candidates: Vec<u32> = self.sampler.draw(rng).to_vec();
        for feature in candidates {
            let column = &self.columns[feature as usize];

            self.scratch.clear();
            self.scratch.extend(
                rows.iter()
                    .map(|&row| (column[row as usize], self.targets[row as usize])),
            );
            self.scratch
                .sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = NodeStats::default();
            for i in 0..self.scratch.len() - 1 {
                let (value, target) = self.scratch[i];
                left.n += 1;
                left.sum += target;
                left.sum_sq += target * target;

                let next_value = self.scratch[i + 1].0;
                if value == next_value {
                    continue; // no threshold separates equal values
                }

                let right = NodeStats {
                    n: parent.n - left.n,
                    sum: parent.sum - left.sum,
                    sum_sq: parent.sum_sq - left.sum_sq,
                };
                let reduction = parent_sse - left.sse() - right.sse();
                if reduction > best.map_or(MIN_REDUCTION, |b| b.reduction) {
                    best = Some(BestSplit {
                        feature,
                        threshold: (value + next_value) / 2.0,
                        reduction,
                    });
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::sampling::tree_rng;
    use approx::assert_relative_eq;

    /// Two-column data: column 0 separates targets perfectly at 5, column 1
    /// is constant.
    fn separable_columns() -> (Vec<Vec<f64>>, Vec<f64>) {
        let columns = vec![
            vec![1.0, 2.0, 8.0, 9.0],
            vec![3.0, 3.0, 3.0, 3.0],
        ];
        let targets = vec![10.0, 10.0, 20.0, 20.0];
        (columns, targets)
    }

    #[test]
    fn splits_on_the_separating_feature() {
        let (columns, targets) = separable_columns();
        let mut grower = TreeGrower::new(&columns, &targets, 2, 1);
        let mut rng = tree_rng(42, 0);

        let (tree, importance) = grower.grow(vec![0, 1, 2, 3], &mut rng);
        tree.validate().unwrap();

        assert_relative_eq!(tree.predict_row(&[1.5, 3.0]), 10.0);
        assert_relative_eq!(tree.predict_row(&[8.5, 3.0]), 20.0);
        // All gain is on the separating feature; the constant one never splits.
        assert!(importance[0] > 0.0);
        assert_relative_eq!(importance[1], 0.0);
    }

    #[test]
    fn homogeneous_targets_make_a_single_leaf() {
        let columns = vec![vec![1.0, 2.0, 3.0]];
        let targets = vec![5.0, 5.0, 5.0];
        let mut grower = TreeGrower::new(&columns, &targets, 1, 1);
        let mut rng = tree_rng(42, 0);

        let (tree, importance) = grower.grow(vec![0, 1, 2], &mut rng);

        assert_eq!(tree.n_nodes(), 1);
        assert_relative_eq!(tree.predict_row(&[2.0]), 5.0);
        assert!(importance.iter().all(|&g| g == 0.0));
    }

    #[test]
    fn constant_feature_cannot_split() {
        let columns = vec![vec![4.0, 4.0, 4.0, 4.0]];
        let targets = vec![1.0, 2.0, 3.0, 4.0];
        let mut grower = TreeGrower::new(&columns, &targets, 1, 1);
        let mut rng = tree_rng(42, 0);

        let (tree, _) = grower.grow(vec![0, 1, 2, 3], &mut rng);

        assert_eq!(tree.n_nodes(), 1);
        assert_relative_eq!(tree.predict_row(&[4.0]), 2.5);
    }

    #[test]
    fn min_node_size_stops_splitting() {
        let (columns, targets) = separable_columns();
        // min_node_size = 4 makes the 4-row root terminal.
        let mut grower = TreeGrower::new(&columns, &targets, 2, 4);
        let mut rng = tree_rng(42, 0);

        let (tree, _) = grower.grow(vec![0, 1, 2, 3], &mut rng);

        assert_eq!(tree.n_nodes(), 1);
        assert_relative_eq!(tree.predict_row(&[1.0, 3.0]), 15.0);
    }

    #[test]
    fn leaf_value_is_mean_of_routed_rows() {
        let columns = vec![vec![1.0, 2.0, 10.0]];
        let targets = vec![2.0, 4.0, 30.0];
        let mut grower = TreeGrower::new(&columns, &targets, 1, 2);
        let mut rng = tree_rng(42, 0);

        // min_node_size = 2: the first split isolates {30.0}; the remaining
        // pair is terminal with mean 3.0.
        let (tree, _) = grower.grow(vec![0, 1, 2], &mut rng);

        assert_relative_eq!(tree.predict_row(&[1.5]), 3.0);
        assert_relative_eq!(tree.predict_row(&[10.0]), 30.0);
    }

    #[test]
    fn duplicate_bootstrap_rows_are_weighted_by_repetition() {
        let columns = vec![vec![1.0, 9.0]];
        let targets = vec![10.0, 40.0];
        let mut grower = TreeGrower::new(&columns, &targets, 1, 4);
        let mut rng = tree_rng(42, 0);

        // Row 1 drawn three times, row 0 once; the terminal mean is pulled
        // toward the repeated row.
        let (tree, _) = grower.grow(vec![0, 1, 1, 1], &mut rng);
        assert_relative_eq!(tree.predict_row(&[5.0]), 32.5);
    }
}
