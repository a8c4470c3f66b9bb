//! JSON schema file format.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

use super::column::Column;
use super::table_schema::TableSchema;

/// Current schema file version.
pub const SCHEMA_VERSION: u32 = 1;

/// Schema file describing the tables records are validated against.
///
/// ```json
/// {
///   "version": 1,
///   "tables": {
///     "people": {
///       "columns": [
///         { "name": "id", "type": "integer", "key": true },
///         { "name": "name", "type": "varchar(40)" }
///       ]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Schema version
    pub version: u32,
    /// Table definitions
    pub tables: BTreeMap<String, TableDefinition>,
}

/// Table entry of a schema file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Column definitions in declaration order
    pub columns: Vec<Column>,
}

impl SchemaFile {
    /// Parses and validates a schema from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: SchemaFile = serde_json::from_str(json)
            .map_err(|e| SchemaError::SerializationError(format!("Failed to parse schema: {}", e)))?;

        if schema.version != SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion(schema.version));
        }

        // Build every table once so definition errors surface at load time
        for name in schema.tables.keys() {
            schema.table(name)?;
        }

        Ok(schema)
    }

    /// Loads a schema file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            SchemaError::IoError(format!("Failed to read schema file {}: {}", path.display(), e))
        })?;

        let schema = Self::from_json(&contents)?;
        tracing::debug!(
            "Loaded schema from {} with {} tables",
            path.display(),
            schema.tables.len()
        );
        Ok(schema)
    }

    /// Writes the schema to disk through a temporary file and rename.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SchemaError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SchemaError::SerializationError(e.to_string()))?;

        let temp_path = path.with_extension("json.tmp");
        let io_err = |context: &str, e: std::io::Error| {
            SchemaError::IoError(format!("{} {}: {}", context, temp_path.display(), e))
        };

        let mut file = File::create(&temp_path).map_err(|e| io_err("Failed to create", e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| io_err("Failed to write", e))?;
        file.sync_all().map_err(|e| io_err("Failed to sync", e))?;

        fs::rename(&temp_path, path).map_err(|e| io_err("Failed to rename", e))?;
        Ok(())
    }

    /// Builds the validated schema of one table.
    pub fn table(&self, name: &str) -> Result<TableSchema, SchemaError> {
        let definition = self
            .tables
            .get(name)
            .ok_or_else(|| SchemaError::TableNotFound {
                table: name.to_string(),
            })?;
        TableSchema::create(name, definition.columns.clone())
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }
}

impl From<&TableSchema> for TableDefinition {
    fn from(table: &TableSchema) -> Self {
        Self {
            columns: table.columns().to_vec(),
        }
    }
}
