//! Column definition within a table.

use serde::{Deserialize, Serialize};

use crate::types::{ColumnType, TypeError};

/// Column definition within a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Declared type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Whether the column is part of the (possibly composite) key
    #[serde(default)]
    pub key: bool,
}

impl Column {
    /// Creates a non-key column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            key: false,
        }
    }

    /// Creates a key column.
    pub fn key(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            key: true,
        }
    }

    /// Validates `raw` against the declared type.
    pub fn coerce(&self, raw: &str) -> Result<String, TypeError> {
        self.column_type.coerce(raw)
    }
}
