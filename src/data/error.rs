//! Shared error type for table loading and writing.

use std::io;
use std::path::PathBuf;

/// Errors that can occur when reading or writing tabular data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("cannot parse {column} at row {row}: {value:?}")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },

    #[error("column {0} contains no observed values to impute from")]
    EmptyColumn(String),

    #[error("row count mismatch: {0}")]
    RowCountMismatch(String),
}

impl DataError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
