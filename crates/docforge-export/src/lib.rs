//! Ground-truth projection for docforge documents.
//!
//! This crate provides:
//! - Row-level flattening of assembled documents (`project`)
//! - Document-level summary rows for the batch overview
//! - The rasterizer filename convention both sides must agree on
//! - A CSV writer backend as the export-collaborator seam (`writer`)
//!
//! Rows are denormalized on purpose: every row repeats its document's
//! header and totals fields so each row is self-contained for scoring
//! extraction results.
//!
#![deny(missing_docs)]

/// Export error types.
pub mod error;
/// Projection from documents to rows.
pub mod project;
/// Flattened row records.
pub mod rows;
/// CSV writer backend.
pub mod writer;

pub use error::ExportError;
pub use project::{page_filename, Projector};
pub use rows::{DocumentSummaryRow, GroundTruthRow};
pub use writer::CsvExporter;
