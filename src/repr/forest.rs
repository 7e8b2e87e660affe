//! Bagged forest: a mean-aggregated collection of regression trees.

use crate::data::Table;

use super::tree::{Tree, TreeValidationError};

/// Immutable ensemble of regression trees.
///
/// Prediction is the arithmetic mean of all tree outputs, in the target's
/// (log) space. Created once by the trainer and consumed read-only.
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<Tree>,
    n_features: usize,
    /// Per-predictor sum of split variance reductions over all trees.
    feature_importance: Vec<f64>,
    /// Out-of-bag RMSE observed during training, if bootstrapping was on.
    oob_rmse: Option<f64>,
}

impl Forest {
    /// Create an empty forest over `n_features` predictors.
    pub fn new(n_features: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_features,
            feature_importance: vec![0.0; n_features],
            oob_rmse: None,
        }
    }

    /// Add a tree together with its per-feature importance contribution.
    pub fn push_tree(&mut self, tree: Tree, importance: &[f64]) {
        debug_assert_eq!(importance.len(), self.n_features);
        for (total, &gain) in self.feature_importance.iter_mut().zip(importance) {
            *total += gain;
        }
        self.trees.push(tree);
    }

    /// Record the out-of-bag RMSE measured during training.
    pub fn set_oob_rmse(&mut self, rmse: f64) {
        self.oob_rmse = Some(rmse);
    }

    /// Number of trees.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of predictor features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Get a reference to a specific tree.
    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    /// Iterate over trees.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Total variance reduction attributed to each predictor, schema order.
    #[inline]
    pub fn feature_importance(&self) -> &[f64] {
        &self.feature_importance
    }

    /// Out-of-bag RMSE from training, if available.
    #[inline]
    pub fn oob_rmse(&self) -> Option<f64> {
        self.oob_rmse
    }

    /// Predict one row of predictor values (schema order): mean over trees.
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        debug_assert!(!self.trees.is_empty(), "predict on empty forest");
        let sum: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
        sum / self.trees.len() as f64
    }

    /// Predict every row of a table, preserving row order.
    pub fn predict_table(&self, table: &Table) -> Vec<f64> {
        let mut row = vec![0.0; table.n_predictors()];
        (0..table.n_rows())
            .map(|r| {
                table.fill_row(r, &mut row);
                self.predict_row(&row)
            })
            .collect()
    }

    /// Validate every tree in the forest.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        if self.trees.is_empty() {
            return Err(TreeValidationError::EmptyTree);
        }
        for tree in &self.trees {
            tree.validate()?;
        }
        Ok(())
    }
}
