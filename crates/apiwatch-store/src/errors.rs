//! Error helpers for apiwatch-store
//!
//! Wraps the core ExError with store-specific constructors.

use apiwatch_core::errors::{ExError, ExErrorKind, WatchError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a store operation
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a snapshot encoding error
pub fn encode_error(err: serde_json::Error) -> ExError {
    ExError::from(WatchError::from(err)).with_op("encode_snapshot")
}

/// Wrap a lower-level failure as a failed snapshot save
pub fn save_failed(path: &Path, source: ExError) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("save_snapshot")
        .with_message(format!(
            "could not replace snapshot at {}; previous snapshot left intact",
            path.display()
        ))
        .with_source(source)
}
