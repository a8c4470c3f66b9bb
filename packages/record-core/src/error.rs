//! Record and schema error types.

use thiserror::Error;

/// Record operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Value map names a column the schema does not define
    #[error("Column '{column}' not found in schema")]
    ColumnNotFound { column: String },

    /// Value rejected by the column's type
    #[error("Invalid data for column '{column}' (value '{value}'): {reason}")]
    InvalidData {
        column: String,
        value: String,
        reason: String,
    },

    /// Key column bound to an empty value
    #[error("Key column '{column}' has an empty value")]
    EmptyKey { column: String },

    /// Binary stream could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl RecordError {
    /// Returns true for failures raised while validating values against a schema.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RecordError::ColumnNotFound { .. }
                | RecordError::InvalidData { .. }
                | RecordError::EmptyKey { .. }
        )
    }

    /// Returns true for failures of the underlying byte stream.
    pub fn is_storage(&self) -> bool {
        matches!(self, RecordError::StorageError(_))
    }

    /// Column the error refers to, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            RecordError::ColumnNotFound { column }
            | RecordError::InvalidData { column, .. }
            | RecordError::EmptyKey { column } => Some(column),
            RecordError::StorageError(_) => None,
        }
    }
}

/// Schema definition and loading errors.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// Table not found
    #[error("Table '{table}' not found")]
    TableNotFound { table: String },

    /// Table defines no columns
    #[error("Table '{table}' has no columns")]
    EmptyTable { table: String },

    /// Column declared twice in the same table
    #[error("Column '{column}' already exists in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// Column type is malformed or inconsistent
    #[error("Column '{column}' in table '{table}' has invalid type: {reason}")]
    InvalidColumnType {
        table: String,
        column: String,
        reason: String,
    },

    /// Schema file version is not understood
    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(u32),

    /// Schema file could not be parsed
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Schema file could not be read
    #[error("I/O error: {0}")]
    IoError(String),
}
