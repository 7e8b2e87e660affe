//! Regression metrics.

use crate::clean::log_price;

/// Evaluation metric over predictions and labels.
pub trait Metric {
    /// Metric name for logging.
    fn name(&self) -> &'static str;

    /// Compute the metric. Lower is better for both metrics here.
    fn compute(&self, predictions: &[f64], labels: &[f64]) -> f64;
}

/// Root mean squared error: `sqrt(mean((pred - label)^2))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Metric for Rmse {
    fn name(&self) -> &'static str {
        "rmse"
    }

    fn compute(&self, predictions: &[f64], labels: &[f64]) -> f64 {
        debug_assert_eq!(predictions.len(), labels.len());
        if predictions.is_empty() {
            return 0.0;
        }
        let mse: f64 = predictions
            .iter()
            .zip(labels)
            .map(|(p, l)| {
                let diff = p - l;
                diff * diff
            })
            .sum::<f64>()
            / predictions.len() as f64;
        mse.sqrt()
    }
}

/// Root mean squared log error over raw (price-space) values:
/// `sqrt(mean((ln(pred+1) - ln(label+1))^2))`.
///
/// The external competition score. Equal to [`Rmse`] applied to log-space
/// values, which is why the model trains on the log target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmsle;

impl Metric for Rmsle {
    fn name(&self) -> &'static str {
        "rmsle"
    }

    fn compute(&self, predictions: &[f64], labels: &[f64]) -> f64 {
        debug_assert_eq!(predictions.len(), labels.len());
        if predictions.is_empty() {
            return 0.0;
        }
        let msle: f64 = predictions
            .iter()
            .zip(labels)
            .map(|(&p, &l)| {
                let diff = log_price(p) - log_price(l);
                diff * diff
            })
            .sum::<f64>()
            / predictions.len() as f64;
        msle.sqrt()
    }
}
