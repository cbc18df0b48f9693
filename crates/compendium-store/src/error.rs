//! Error types for store operations

use thiserror::Error;

/// Errors that can occur while reading or writing saved progress
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Progress file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Progress file was written by an unknown format version
    #[error("Unsupported progress file version: {0}")]
    UnsupportedVersion(u32),
}
