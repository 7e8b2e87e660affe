//! Forest training: parameters, sampling, tree growth, and metrics.
//!
//! - [`ForestParams`]: configuration with fail-fast validation
//! - [`ForestTrainer`]: bags `n_trees` variance-reduction trees
//! - [`Metric`], [`Rmse`], [`Rmsle`]: evaluation
//! - [`TrainingLogger`], [`Verbosity`]: progress output gating

mod grower;
mod logger;
mod metric;
mod params;
pub mod sampling;
mod trainer;

pub use grower::TreeGrower;
pub use logger::{TrainingLogger, Verbosity};
pub use metric::{Metric, Rmse, Rmsle};
pub use params::{ForestParams, ParamsError};
pub use trainer::{ForestTrainer, TrainError};
