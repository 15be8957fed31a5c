//! Result sink trait and output errors

use crate::extract::BookRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to generate JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the records of a finished run
///
/// Called exactly once, after every page has settled.
pub trait ResultSink {
    /// Writes the whole collection, replacing anything written before
    fn write(&self, records: &[BookRecord]) -> OutputResult<()>;
}
