//! Training output gating.

use tracing::info;

/// How chatty training is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// No training output.
    Silent,
    /// Start/finish and summary statistics.
    #[default]
    Info,
}

/// Emits training progress through `tracing`, gated by [`Verbosity`].
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn start_training(&self, n_trees: u32, n_rows: usize, mtry: usize) {
        if self.verbosity >= Verbosity::Info {
            info!(n_trees, n_rows, mtry, "growing forest");
        }
    }

    pub fn finish_training(&self, oob_rmse: Option<f64>) {
        if self.verbosity >= Verbosity::Info {
            match oob_rmse {
                Some(rmse) => info!(oob_rmse = rmse, "forest grown"),
                None => info!("forest grown (no out-of-bag sample)"),
            }
        }
    }
}
