//! Report Errors

use fieldflat_core::FlattenError;
use thiserror::Error;

/// Errors from building or writing reports
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// An input or output was not a record.
    #[error(transparent)]
    Flatten(#[from] FlattenError),

    /// A row flattened to different columns than the table header.
    #[error("Row {row} does not match the table header: {detail}")]
    SchemaMismatch {
        /// Zero-based index of the rejected row
        row: usize,
        /// First difference found
        detail: String,
    },

    /// Two leaves flattened to the same column name.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A summary referenced a path that is not a leaf of the row.
    #[error("Missing path: {0}")]
    MissingPath(String),

    /// A summary path names a leaf of both the input and the output.
    #[error("Ambiguous path: {0} is in both input and output")]
    AmbiguousPath(String),

    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generated output was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// JSON serialization failure.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
