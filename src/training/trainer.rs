//! Forest trainer: bootstrap-aggregated regression trees.
//!
//! The trainer draws one bootstrap resample per tree, grows each tree with
//! [`TreeGrower`], and averages the ensemble at prediction time. All
//! randomness is derived per tree from the run seed, so growing trees in
//! parallel produces the same forest as growing them sequentially.
//!
//! # Example
//!
//! ```ignore
//! use bagge_rs::training::{ForestParams, ForestTrainer};
//!
//! let params = ForestParams { n_trees: 500, mtry: 6, ..Default::default() };
//! let trainer = ForestTrainer::new(params);
//! let forest = trainer.train(&table, table.target().unwrap())?;
//! ```

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::data::Table;
use crate::repr::{Forest, Tree};

use super::grower::TreeGrower;
use super::logger::TrainingLogger;
use super::metric::{Metric, Rmse};
use super::params::{ForestParams, ParamsError};
use super::sampling::{bootstrap_indices, out_of_bag, tree_rng};

/// Training failure.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("training table is empty")]
    EmptyTable,

    #[error("target length {targets} does not match row count {rows}")]
    TargetLength { targets: usize, rows: usize },
}

/// Output of growing one ensemble member.
struct GrownTree {
    tree: Tree,
    importance: Vec<f64>,
    /// Out-of-bag predictions as (row, prediction) pairs.
    oob: Vec<(u32, f64)>,
}

/// Bagged forest trainer.
pub struct ForestTrainer {
    params: ForestParams,
}

impl ForestTrainer {
    /// Create a trainer.
    pub fn new(params: ForestParams) -> Self {
        Self { params }
    }

    /// Get reference to parameters.
    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Train a forest on the table's predictor columns and the given
    /// (log-space) targets.
    ///
    /// Validates the configuration against the table width first; degenerate
    /// parameters are an error, never clamped. The table is not mutated.
    ///
    /// # Panics
    ///
    /// Panics if `n_threads > 1` and the thread pool cannot be created (rare
    /// OS-level failure).
    pub fn train(&self, table: &Table, targets: &[f64]) -> Result<Forest, TrainError> {
        let n_rows = table.n_rows();
        let n_features = table.n_predictors();

        self.params.validate(n_features)?;
        if n_rows == 0 {
            return Err(TrainError::EmptyTable);
        }
        if targets.len() != n_rows {
            return Err(TrainError::TargetLength {
                targets: targets.len(),
                rows: n_rows,
            });
        }

        // Threading contract:
        // - n_threads == 0: use rayon's global pool
        // - n_threads == 1: run strictly sequential
        // - n_threads > 1: dedicated pool for this training session
        match self.params.n_threads {
            1 => self.train_impl(table, targets, false),
            0 => self.train_impl(table, targets, true),
            n => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .expect("failed to create thread pool");
                pool.install(|| self.train_impl(table, targets, true))
            }
        }
    }

    fn train_impl(
        &self,
        table: &Table,
        targets: &[f64],
        parallel: bool,
    ) -> Result<Forest, TrainError> {
        let n_rows = table.n_rows();
        let logger = TrainingLogger::new(self.params.verbosity);
        logger.start_training(self.params.n_trees, n_rows, self.params.mtry);

        let grow_one = |tree_index: u32| -> GrownTree {
            let mut rng = tree_rng(self.params.seed, tree_index);

            let rows = if self.params.bootstrap {
                bootstrap_indices(&mut rng, n_rows)
            } else {
                (0..n_rows as u32).collect()
            };
            let oob_rows = if self.params.bootstrap {
                out_of_bag(&rows, n_rows)
            } else {
                Vec::new()
            };

            let mut grower = TreeGrower::new(
                table.columns(),
                targets,
                self.params.mtry,
                self.params.min_node_size,
            );
            let (tree, importance) = grower.grow(rows, &mut rng);

            let mut row_buf = vec![0.0; table.n_predictors()];
            let oob = oob_rows
                .into_iter()
                .map(|row| {
                    table.fill_row(row as usize, &mut row_buf);
                    (row, tree.predict_row(&row_buf))
                })
                .collect();

            GrownTree {
                tree,
                importance,
                oob,
            }
        };

        // Trees are collected in index order either way, so the ensemble is
        // identical across thread counts.
        let grown: Vec<GrownTree> = if parallel {
            (0..self.params.n_trees).into_par_iter().map(grow_one).collect()
        } else {
            (0..self.params.n_trees).map(grow_one).collect()
        };

        let mut forest = Forest::new(table.n_predictors());
        let mut oob_sum = vec![0.0f64; n_rows];
        let mut oob_count = vec![0u32; n_rows];

        for grown_tree in grown {
            for (row, pred) in &grown_tree.oob {
                oob_sum[*row as usize] += pred;
                oob_count[*row as usize] += 1;
            }
            forest.push_tree(grown_tree.tree, &grown_tree.importance);
        }

        let oob_rmse = Self::oob_rmse(&oob_sum, &oob_count, targets);
        if let Some(rmse) = oob_rmse {
            forest.set_oob_rmse(rmse);
        }
        logger.finish_training(oob_rmse);

        Ok(forest)
    }

    /// RMSE of the per-row mean out-of-bag prediction, over rows that were
    /// out-of-bag for at least one tree. `None` when bootstrapping was off.
    fn oob_rmse(oob_sum: &[f64], oob_count: &[u32], targets: &[f64]) -> Option<f64> {
        let (preds, labels): (Vec<f64>, Vec<f64>) = oob_sum
            .iter()
            .zip(oob_count)
            .zip(targets)
            .filter(|((_, &count), _)| count > 0)
            .map(|((&sum, &count), &target)| (sum / f64::from(count), target))
            .unzip();

        if preds.is_empty() {
            None
        } else {
            Some(Rmse.compute(&preds, &labels))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::N_PREDICTORS;
    use crate::training::Verbosity;

    /// Schema-width table whose first two columns carry signal.
    fn synthetic_table(n_rows: usize) -> (Table, Vec<f64>) {
        let mut columns = vec![vec![0.0; n_rows]; N_PREDICTORS];
        let mut targets = Vec::with_capacity(n_rows);
        for i in 0..n_rows {
            let x0 = i as f64;
            let x1 = ((i * 7) % 13) as f64;
            columns[0][i] = x0;
            columns[1][i] = x1;
            targets.push(0.1 * x0 + 0.5 * x1);
        }
        let ids = (1..=n_rows as u32).collect();
        (Table::new(ids, columns, None), targets)
    }

    fn quiet_params() -> ForestParams {
        ForestParams {
            n_trees: 10,
            mtry: 12,
            verbosity: Verbosity::Silent,
            ..Default::default()
        }
    }

    #[test]
    fn trains_requested_number_of_trees() {
        let (table, targets) = synthetic_table(60);
        let forest = ForestTrainer::new(quiet_params())
            .train(&table, &targets)
            .unwrap();

        assert_eq!(forest.n_trees(), 10);
        forest.validate().unwrap();
        assert!(forest.oob_rmse().is_some());
    }

    #[test]
    fn fixed_seed_reproduces_predictions() {
        let (table, targets) = synthetic_table(60);
        let trainer = ForestTrainer::new(quiet_params());

        let a = trainer.train(&table, &targets).unwrap();
        let b = trainer.train(&table, &targets).unwrap();

        assert_eq!(a.predict_table(&table), b.predict_table(&table));
    }

    #[test]
    fn parallel_training_matches_sequential() {
        let (table, targets) = synthetic_table(60);

        let sequential = ForestTrainer::new(ForestParams {
            n_threads: 1,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap();
        let parallel = ForestTrainer::new(ForestParams {
            n_threads: 4,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap();

        assert_eq!(
            sequential.predict_table(&table),
            parallel.predict_table(&table)
        );
    }

    #[test]
    fn different_seeds_differ() {
        let (table, targets) = synthetic_table(60);

        let a = ForestTrainer::new(ForestParams {
            seed: 1,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap();
        let b = ForestTrainer::new(ForestParams {
            seed: 2,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap();

        assert_ne!(a.predict_table(&table), b.predict_table(&table));
    }

    #[test]
    fn single_tree_forest_reduces_to_the_tree() {
        let (table, targets) = synthetic_table(40);
        let forest = ForestTrainer::new(ForestParams {
            n_trees: 1,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap();

        let mut row = vec![0.0; table.n_predictors()];
        for r in 0..table.n_rows() {
            table.fill_row(r, &mut row);
            assert_eq!(forest.predict_row(&row), forest.tree(0).predict_row(&row));
        }
    }

    #[test]
    fn no_bootstrap_means_no_oob_estimate() {
        let (table, targets) = synthetic_table(40);
        let forest = ForestTrainer::new(ForestParams {
            bootstrap: false,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap();

        assert!(forest.oob_rmse().is_none());
    }

    #[test]
    fn degenerate_params_fail_before_training() {
        let (table, targets) = synthetic_table(10);

        let err = ForestTrainer::new(ForestParams {
            mtry: N_PREDICTORS + 1,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap_err();
        assert!(matches!(err, TrainError::Params(_)));

        let err = ForestTrainer::new(ForestParams {
            n_trees: 0,
            ..quiet_params()
        })
        .train(&table, &targets)
        .unwrap_err();
        assert!(matches!(err, TrainError::Params(_)));
    }

    #[test]
    fn mismatched_target_length_rejected() {
        let (table, mut targets) = synthetic_table(10);
        targets.pop();

        let err = ForestTrainer::new(quiet_params())
            .train(&table, &targets)
            .unwrap_err();
        assert!(matches!(
            err,
            TrainError::TargetLength {
                targets: 9,
                rows: 10
            }
        ));
    }
}
