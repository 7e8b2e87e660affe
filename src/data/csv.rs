//! CSV loading for the train and test tables.
//!
//! Loading is schema-driven: each predictor's source header is resolved
//! against the file's header row once, cells are parsed as `f64`, and `NA` or
//! empty cells become the `NAN` missing sentinel. Columns outside the schema
//! are ignored, which is how the fixed allow-list selection happens.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use super::error::DataError;
use super::schema::{self, FieldDescriptor, ID_COLUMN, TARGET_COLUMN};
use super::table::Table;

/// Whether a file carries the target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Training file: `Id`, predictors, `SalePrice`.
    Train,
    /// Test file: `Id` and predictors only.
    Test,
}

/// Read a CSV file into a [`Table`].
///
/// Fails fast with [`DataError::MissingColumn`] if the identifier column, the
/// target column (for [`TableKind::Train`]), or any schema predictor is
/// absent from the header row.
pub fn read_table(path: &Path, kind: TableKind) -> Result<Table, DataError> {
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader.headers()?.clone();
    let find = |name: &str| -> Result<usize, DataError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };

    let id_idx = find(ID_COLUMN)?;
    let target_idx = match kind {
        TableKind::Train => Some(find(TARGET_COLUMN)?),
        TableKind::Test => None,
    };
    let predictor_idx: Vec<usize> = schema::PREDICTORS
        .iter()
        .map(|f: &FieldDescriptor| find(f.source))
        .collect::<Result<_, _>>()?;

    let mut ids = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); schema::N_PREDICTORS];
    let mut target: Vec<f64> = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        let id_cell = &record[id_idx];
        let id: u32 = id_cell.trim().parse().map_err(|_| DataError::InvalidCell {
            column: ID_COLUMN.to_string(),
            row,
            value: id_cell.to_string(),
        })?;
        ids.push(id);

        for (predictor, &src) in predictor_idx.iter().enumerate() {
            let value = parse_cell(&record[src], schema::PREDICTORS[predictor].name, row)?;
            columns[predictor].push(value);
        }

        if let Some(t) = target_idx {
            let value = parse_cell(&record[t], TARGET_COLUMN, row)?;
            target.push(value);
        }
    }

    Ok(Table::new(ids, columns, target_idx.map(|_| target)))
}

/// Parse one numeric cell; `NA` and empty cells map to the missing sentinel.
fn parse_cell(cell: &str, column: &str, row: usize) -> Result<f64, DataError> {
    let cell = cell.trim();
    if cell.is_empty() || cell == "NA" {
        return Ok(f64::NAN);
    }
    cell.parse().map_err(|_| DataError::InvalidCell {
        column: column.to_string(),
        row,
        value: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::data::schema::PREDICTORS;

    fn schema_header(with_target: bool) -> String {
        let mut header = vec![ID_COLUMN];
        header.extend(PREDICTORS.iter().map(|f| f.source));
        if with_target {
            header.push(TARGET_COLUMN);
        }
        header.join(",")
    }

    /// One data row: id, a custom first-predictor cell, the remaining
    /// predictors filled with `7`, and an optional target.
    fn schema_row(id: u32, first_cell: &str, target: Option<&str>) -> String {
        let mut cells = vec![id.to_string(), first_cell.to_string()];
        cells.extend(std::iter::repeat("7".to_string()).take(PREDICTORS.len() - 1));
        if let Some(t) = target {
            cells.push(t.to_string());
        }
        cells.join(",")
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, lines: &[String]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn loads_train_table_with_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "train.csv",
            &[
                schema_header(true),
                schema_row(1, "20", Some("100000")),
                schema_row(2, "60", Some("150000")),
            ],
        );

        let table = read_table(&path, TableKind::Train).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.ids(), &[1, 2]);
        assert_eq!(table.column(0), &[20.0, 60.0]);
        assert_eq!(table.target().unwrap(), &[100000.0, 150000.0]);
    }

    #[test]
    fn missing_predictor_column_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "bad.csv",
            &["Id,LotArea".to_string(), "1,8450".to_string()],
        );

        let err = read_table(&path, TableKind::Test).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(_)));
    }

    #[test]
    fn na_and_empty_cells_become_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "test.csv",
            &[
                schema_header(false),
                schema_row(1461, "NA", None),
                schema_row(1462, "", None),
                schema_row(1463, "42", None),
            ],
        );

        let table = read_table(&path, TableKind::Test).unwrap();
        assert!(table.column(0)[0].is_nan());
        assert!(table.column(0)[1].is_nan());
        assert_eq!(table.column(0)[2], 42.0);
        // Filler cells parse normally.
        assert_eq!(table.column(1), &[7.0, 7.0, 7.0]);
    }

    #[test]
    fn unparseable_cell_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "train.csv",
            &[schema_header(true), schema_row(1, "abc", Some("100000"))],
        );

        let err = read_table(&path, TableKind::Train).unwrap_err();
        assert!(matches!(err, DataError::InvalidCell { row: 0, .. }));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = read_table(Path::new("/nonexistent/train.csv"), TableKind::Train).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
