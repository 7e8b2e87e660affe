//! Submission file writing.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::data::DataError;

/// One scored test row.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    #[serde(rename = "Id")]
    pub id: u32,
    #[serde(rename = "SalePrice")]
    pub sale_price: f64,
}

/// Write the submission CSV atomically.
///
/// Records are written to a sibling `.tmp` file and renamed over the target
/// on success, so a failed run never leaves a partial submission behind.
pub fn write_submission(path: &Path, records: &[SubmissionRecord]) -> Result<(), DataError> {
    let file_name = path.file_name().ok_or_else(|| {
        DataError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"),
        )
    })?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let mut writer = csv::Writer::from_path(&tmp_path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|e| DataError::io(&tmp_path, e))?;
    drop(writer);

    fs::rename(&tmp_path, path).map_err(|e| DataError::io(path, e))
}
