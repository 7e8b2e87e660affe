//! End-to-end pipeline: load, clean, fit, predict, write submission.
//!
//! Dataflow is strictly linear and each stage runs once:
//!
//! ```text
//! read_table (train, test) -> clean::prepare -> ForestTrainer::train
//!     -> Forest::predict_table -> write_submission
//! ```

mod submission;

pub use submission::{write_submission, SubmissionRecord};

use std::path::Path;

use tracing::info;

use crate::clean::{self, ImputeStrategy};
use crate::data::{read_table, schema, DataError, TableKind};
use crate::training::{ForestParams, ForestTrainer, TrainError};

/// Pipeline failure: a data-layer or training-layer error. Any failure
/// aborts the run; there are no retries.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Train(#[from] TrainError),
}

/// Pipeline configuration, fixed at invocation.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Forest training parameters.
    pub params: ForestParams,
    /// Where imputation statistics come from.
    pub impute: ImputeStrategy,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub n_train_rows: usize,
    pub n_test_rows: usize,
    pub n_trees: usize,
    /// Out-of-bag RMSE of the log-space target, when bootstrapping was on.
    pub oob_rmse: Option<f64>,
}

/// Run the whole pipeline: train on `train_path`, score `test_path`, write
/// an `Id,SalePrice` submission to `out_path`.
pub fn run(
    train_path: &Path,
    test_path: &Path,
    out_path: &Path,
    config: &PipelineConfig,
) -> Result<PipelineSummary, PipelineError> {
    let mut train = read_table(train_path, TableKind::Train)?;
    let mut test = read_table(test_path, TableKind::Test)?;
    info!(
        train_rows = train.n_rows(),
        test_rows = test.n_rows(),
        "tables loaded"
    );

    clean::prepare(&mut train, &mut test, config.impute)?;

    let targets = train
        .target()
        .ok_or_else(|| DataError::MissingColumn(schema::TARGET_COLUMN.to_string()))?
        .to_vec();
    let trainer = ForestTrainer::new(config.params.clone());
    let forest = trainer.train(&train, &targets)?;

    log_top_features(forest.feature_importance());

    let log_predictions = forest.predict_table(&test);
    let records: Vec<SubmissionRecord> = test
        .ids()
        .iter()
        .zip(&log_predictions)
        .map(|(&id, &log_pred)| SubmissionRecord {
            id,
            sale_price: clean::inverse_log_price(log_pred),
        })
        .collect();
    debug_assert_eq!(records.len(), test.n_rows());

    write_submission(out_path, &records)?;
    info!(out = %out_path.display(), rows = records.len(), "submission written");

    Ok(PipelineSummary {
        n_train_rows: train.n_rows(),
        n_test_rows: test.n_rows(),
        n_trees: forest.n_trees(),
        oob_rmse: forest.oob_rmse(),
    })
}

/// Log the five predictors with the largest accumulated variance reduction.
fn log_top_features(importance: &[f64]) {
    let mut ranked: Vec<(usize, f64)> = importance.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for &(predictor, gain) in ranked.iter().take(5) {
        info!(
            feature = schema::PREDICTORS[predictor].name,
            gain, "importance"
        );
    }
}
