//! Forest training parameters with fail-fast validation.

use crate::training::Verbosity;

/// Invalid training configuration.
///
/// Degenerate values are rejected outright at validation time; nothing is
/// silently clamped.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("n_trees must be at least 1, got {0}")]
    InvalidTreeCount(u32),

    #[error("mtry must be between 1 and the predictor count {n_predictors}, got {mtry}")]
    InvalidMtry { mtry: usize, n_predictors: usize },

    #[error("min_node_size must be at least 1, got {0}")]
    InvalidMinNodeSize(usize),
}

/// Parameters for bagged forest training.
///
/// Use struct construction with `..Default::default()` for convenient
/// configuration.
#[derive(Debug, Clone)]
pub struct ForestParams {
    /// Number of trees in the ensemble.
    pub n_trees: u32,
    /// Number of predictors drawn (without replacement) as split candidates
    /// at each node. The classic regression default is a third of the
    /// predictor count.
    pub mtry: usize,
    /// Nodes with at most this many rows become leaves.
    pub min_node_size: usize,
    /// Draw a bootstrap resample per tree. Disabled only for diagnostics and
    /// tests; a forest without resampling has identical trees up to the
    /// per-node candidate draws.
    pub bootstrap: bool,
    /// Seed for all resampling and candidate draws. Each tree derives its own
    /// generator from this, so parallel and sequential training agree.
    pub seed: u64,
    /// Number of threads for tree growth.
    ///
    /// - `0`: use rayon's global thread pool (default)
    /// - `1`: strictly sequential
    /// - `n > 1`: dedicated pool with up to `n` threads
    pub n_threads: usize,
    /// Verbosity of training output.
    pub verbosity: Verbosity,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 500,
            mtry: 12,
            min_node_size: 5,
            bootstrap: true,
            seed: 42,
            n_threads: 0,
            verbosity: Verbosity::default(),
        }
    }
}

impl ForestParams {
    /// Validate against the predictor count of the table being fit.
    pub fn validate(&self, n_predictors: usize) -> Result<(), ParamsError> {
        if self.n_trees == 0 {
            return Err(ParamsError::InvalidTreeCount(self.n_trees));
        }
        if self.mtry == 0 || self.mtry > n_predictors {
            return Err(ParamsError::InvalidMtry {
                mtry: self.mtry,
                n_predictors,
            });
        }
        if self.min_node_size == 0 {
            return Err(ParamsError::InvalidMinNodeSize(self.min_node_size));
        }
        Ok(())
    }
}
