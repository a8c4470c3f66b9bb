//! I/O error mapping for record streams.

use std::io::ErrorKind;

use crate::error::RecordError;

/// Classifies I/O errors into storage errors with the failing operation as context.
pub(crate) fn classify_io_error(error: std::io::Error, context: &str) -> RecordError {
    match error.kind() {
        ErrorKind::UnexpectedEof => {
            RecordError::StorageError(format!("{}: unexpected end of stream", context))
        }
        ErrorKind::StorageFull | ErrorKind::WriteZero => {
            RecordError::StorageError(format!("{}: storage full: {}", context, error))
        }
        _ => RecordError::StorageError(format!("{}: {}", context, error)),
    }
}

/// Builds a storage error for a structurally invalid record.
pub(crate) fn corrupt(message: impl std::fmt::Display) -> RecordError {
    RecordError::StorageError(format!("Corrupt record: {}", message))
}

/// Builds a storage error for a record too large to be read back.
pub(crate) fn oversized(message: impl std::fmt::Display) -> RecordError {
    RecordError::StorageError(format!("Record too large: {}", message))
}
