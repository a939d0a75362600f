use thiserror::Error;

/// Errors that can occur while writing export files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error creating or writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
