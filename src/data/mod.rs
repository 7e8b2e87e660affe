//! Tabular data layer: predictor schema, column-major tables, CSV loading.

mod csv;
mod error;
pub mod schema;
mod table;

pub use self::csv::{read_table, TableKind};
pub use error::DataError;
pub use table::Table;
