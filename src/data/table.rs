//! Column-major table storage bound to the predictor schema.

use super::schema::N_PREDICTORS;

/// In-memory table: one `f64` column per schema predictor, a row identifier
/// column, and (for the training table) a target column.
///
/// Columns are stored in schema order, so a predictor's index into
/// [`super::schema::PREDICTORS`] is also its index here. Missing cells are
/// `NAN`.
#[derive(Debug, Clone)]
pub struct Table {
    ids: Vec<u32>,
    columns: Vec<Vec<f64>>,
    target: Option<Vec<f64>>,
}

impl Table {
    /// Create a table from parts.
    ///
    /// All columns must have the same length as `ids`; enforced by debug
    /// assertion since construction is internal to the loader and tests.
    pub fn new(ids: Vec<u32>, columns: Vec<Vec<f64>>, target: Option<Vec<f64>>) -> Self {
        debug_assert_eq!(columns.len(), N_PREDICTORS);
        for col in &columns {
            debug_assert_eq!(col.len(), ids.len());
        }
        if let Some(t) = &target {
            debug_assert_eq!(t.len(), ids.len());
        }
        Self {
            ids,
            columns,
            target,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    /// Number of predictor columns (always the schema width).
    #[inline]
    pub fn n_predictors(&self) -> usize {
        self.columns.len()
    }

    /// Row identifiers, in input order.
    #[inline]
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// One predictor column by schema index.
    #[inline]
    pub fn column(&self, predictor: usize) -> &[f64] {
        &self.columns[predictor]
    }

    /// Mutable access to one predictor column (used by the imputer).
    #[inline]
    pub fn column_mut(&mut self, predictor: usize) -> &mut [f64] {
        &mut self.columns[predictor]
    }

    /// All predictor columns in schema order.
    #[inline]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Target column, if this is a training table.
    #[inline]
    pub fn target(&self) -> Option<&[f64]> {
        self.target.as_deref()
    }

    /// Replace the target column (used when deriving the log target).
    pub fn set_target(&mut self, target: Vec<f64>) {
        debug_assert_eq!(target.len(), self.ids.len());
        self.target = Some(target);
    }

    /// Copy one row's predictor values into `buf` in schema order.
    ///
    /// `buf` must have length [`N_PREDICTORS`].
    pub fn fill_row(&self, row: usize, buf: &mut [f64]) {
        debug_assert_eq!(buf.len(), self.columns.len());
        for (dst, col) in buf.iter_mut().zip(&self.columns) {
            *dst = col[row];
        }
    }

    /// True if any predictor cell in the table is missing.
    pub fn has_missing(&self) -> bool {
        self.columns
            .iter()
            .any(|col| col.iter().any(|v| v.is_nan()))
    }
}
