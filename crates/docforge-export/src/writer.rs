use std::path::Path;

use serde::Serialize;

use crate::error::ExportError;
use crate::rows::{DocumentSummaryRow, GroundTruthRow};

/// CSV-backed writer: the export-collaborator seam.
///
/// The row schema is the contract; the file format is deliberately thin.
/// Headers come from the row struct's field names.
pub struct CsvExporter;

impl CsvExporter {
    /// Writes row-level ground truth to `path`, creating parent
    /// directories as needed.
    pub fn write_ground_truth<P: AsRef<Path>>(
        path: P,
        rows: &[GroundTruthRow],
    ) -> Result<(), ExportError> {
        Self::write_records(path, rows)
    }

    /// Writes document-level summary rows to `path`.
    pub fn write_summaries<P: AsRef<Path>>(
        path: P,
        rows: &[DocumentSummaryRow],
    ) -> Result<(), ExportError> {
        Self::write_records(path, rows)
    }

    fn write_records<P: AsRef<Path>, R: Serialize>(
        path: P,
        rows: &[R],
    ) -> Result<(), ExportError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
