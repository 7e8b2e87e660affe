//! Mean imputation of missing predictor cells.
//!
//! Every predictor column is scanned for missing cells; any gap is filled
//! with the column mean, so a column with an unexpected missingness pattern
//! is handled the same way as the well-known ones (`LotFrontage`,
//! `MasVnrArea`, `GarageYrBlt` in training; the basement and garage counts in
//! test). Which columns actually get imputed is driven by each table's own
//! missingness, never by a hard-coded list.

use crate::data::{schema, DataError, Table};

/// Where imputation statistics come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImputeStrategy {
    /// Column means computed from the training table and applied to both
    /// tables. The default: test-set gaps are filled with values the model
    /// actually trained against.
    #[default]
    TrainStatistics,
    /// Each table imputed from its own column means. Reproduces the original
    /// recipe's behavior, where the test table's imputed values are
    /// independent of the training data.
    TableLocal,
}

/// Fitted column means, in schema order.
#[derive(Debug, Clone)]
pub struct MeanImputer {
    means: Vec<f64>,
}

impl MeanImputer {
    /// Compute per-column means over the observed (non-missing) cells.
    ///
    /// Fails with [`DataError::EmptyColumn`] if a column has no observed
    /// cells at all, since no mean exists to impute from.
    pub fn fit(table: &Table) -> Result<Self, DataError> {
        let mut means = Vec::with_capacity(table.n_predictors());
        for predictor in 0..table.n_predictors() {
            let col = table.column(predictor);
            let (sum, count) = col
                .iter()
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, c), &v| (s + v, c + 1));
            if count == 0 {
                return Err(DataError::EmptyColumn(
                    schema::PREDICTORS[predictor].name.to_string(),
                ));
            }
            means.push(sum / count as f64);
        }
        Ok(Self { means })
    }

    /// Fitted mean for one predictor.
    #[inline]
    pub fn mean(&self, predictor: usize) -> f64 {
        self.means[predictor]
    }

    /// Replace every missing cell in `table` with the fitted column mean.
    pub fn apply(&self, table: &mut Table) {
        for (predictor, &mean) in self.means.iter().enumerate() {
            for cell in table.column_mut(predictor) {
                if cell.is_nan() {
                    *cell = mean;
                }
            }
        }
    }
}

/// Impute a train/test pair according to `strategy`.
pub fn impute_pair(
    train: &mut Table,
    test: &mut Table,
    strategy: ImputeStrategy,
) -> Result<(), DataError> {
    match strategy {
        ImputeStrategy::TrainStatistics => {
            let imputer = MeanImputer::fit(train)?;
            imputer.apply(train);
            imputer.apply(test);
        }
        ImputeStrategy::TableLocal => {
            MeanImputer::fit(train)?.apply(train);
            MeanImputer::fit(test)?.apply(test);
        }
    }
    Ok(())
}
