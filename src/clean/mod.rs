//! Table cleaning: target transform and missing-value imputation.
//!
//! Column renaming and allow-list selection already happen in the
//! schema-driven loader; what remains here is the log transform of the sale
//! price and the mean imputation step.

mod impute;

pub use impute::{impute_pair, ImputeStrategy, MeanImputer};

use crate::data::{DataError, Table};

/// Forward target transform: `ln(price + 1)`.
///
/// The `+1` offset keeps a zero price finite. Must stay the exact inverse of
/// [`inverse_log_price`]; the external score is computed on log error, so the
/// model trains and predicts in log space.
#[inline]
pub fn log_price(price: f64) -> f64 {
    (price + 1.0).ln()
}

/// Inverse target transform: `exp(log) - 1`.
#[inline]
pub fn inverse_log_price(log: f64) -> f64 {
    log.exp() - 1.0
}

/// Replace the training table's raw `SalePrice` target with its log
/// transform.
pub fn derive_log_target(train: &mut Table) -> Result<(), DataError> {
    let raw = train
        .target()
        .ok_or_else(|| DataError::MissingColumn("SalePrice".to_string()))?;
    let log: Vec<f64> = raw.iter().map(|&p| log_price(p)).collect();
    train.set_target(log);
    Ok(())
}

/// Clean a loaded train/test pair in place: derive the log target and impute
/// missing cells per `strategy`.
pub fn prepare(
    train: &mut Table,
    test: &mut Table,
    strategy: ImputeStrategy,
) -> Result<(), DataError> {
    derive_log_target(train)?;
    impute_pair(train, test, strategy)?;
    debug_assert!(!train.has_missing());
    debug_assert!(!test.has_missing());
    Ok(())
}
