//! Shared helpers for integration tests.
#![allow(dead_code)] // each test binary uses a subset

use std::io::Write;
use std::path::PathBuf;

use bagge_rs::data::schema::{ID_COLUMN, PREDICTORS, TARGET_COLUMN};
use bagge_rs::data::Table;

/// A row spec for CSV fixtures: id, value repeated across every predictor,
/// optional SalePrice.
pub struct FixtureRow {
    pub id: u32,
    pub fill: &'static str,
    pub target: Option<&'static str>,
}

/// Write a CSV with the full schema header and the given rows.
pub fn write_fixture_csv(
    dir: &tempfile::TempDir,
    name: &str,
    with_target: bool,
    rows: &[FixtureRow],
) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();

    let mut header = vec![ID_COLUMN];
    header.extend(PREDICTORS.iter().map(|f| f.source));
    if with_target {
        header.push(TARGET_COLUMN);
    }
    writeln!(file, "{}", header.join(",")).unwrap();

    for row in rows {
        let mut cells = vec![row.id.to_string()];
        cells.extend(std::iter::repeat(row.fill.to_string()).take(PREDICTORS.len()));
        if let Some(t) = row.target {
            cells.push(t.to_string());
        }
        writeln!(file, "{}", cells.join(",")).unwrap();
    }
    path
}

/// Build an in-memory schema-width table where every predictor column equals
/// `values` (so any candidate draw sees the same separating feature).
pub fn uniform_table(ids: Vec<u32>, values: &[f64], target: Option<Vec<f64>>) -> Table {
    let columns = vec![values.to_vec(); PREDICTORS.len()];
    Table::new(ids, columns, target)
}
