//! Error handling for roapid-store
//!
//! Wraps the core ExError with store-specific helpers that always attach
//! the offending path.

use roapid_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a filesystem step
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a format error for a payload that is not a JSON object
pub fn format_error(operation: &str, key: &str, err: roapid_core::RoapidError) -> ExError {
    ExError::from(err)
        .with_op(operation.to_string())
        .with_resource_key(key.to_string())
}

/// Lift a core error into the store's error type, tagging the operation
pub fn from_core(operation: &str, err: roapid_core::RoapidError) -> ExError {
    ExError::from(err).with_op(operation.to_string())
}
