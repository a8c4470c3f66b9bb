//! Validation methods for table column definitions.

use std::collections::HashSet;

use super::column::Column;
use crate::error::SchemaError;
use crate::types::{ColumnType, MAX_CHAR_LENGTH};

/// Validates a table's column list.
///
/// # Arguments
/// * `table` - Table name, used in error messages
/// * `columns` - Column definitions to validate
///
/// # Returns
/// `Result<(), SchemaError>` indicating success or validation failure.
pub(crate) fn validate_columns(table: &str, columns: &[Column]) -> Result<(), SchemaError> {
    if columns.is_empty() {
        return Err(SchemaError::EmptyTable {
            table: table.to_string(),
        });
    }

    let mut seen_names = HashSet::new();
    for column in columns {
        if !seen_names.insert(column.name.as_str()) {
            return Err(SchemaError::DuplicateColumn {
                table: table.to_string(),
                column: column.name.clone(),
            });
        }
        validate_column_type(table, column)?;
    }

    Ok(())
}

/// Validates the parameters of a single column type.
fn validate_column_type(table: &str, column: &Column) -> Result<(), SchemaError> {
    let reason = match column.column_type {
        ColumnType::Char(0) | ColumnType::Varchar(0) => Some("length must be positive".to_string()),
        ColumnType::Char(len) if len > MAX_CHAR_LENGTH => Some(format!(
            "length {} exceeds maximum {}",
            len, MAX_CHAR_LENGTH
        )),
        ColumnType::Numeric { precision: 0, .. } => Some("precision must be positive".to_string()),
        ColumnType::Numeric { precision, scale } if scale > precision => Some(format!(
            "scale {} exceeds precision {}",
            scale, precision
        )),
        _ => None,
    };

    match reason {
        Some(reason) => Err(SchemaError::InvalidColumnType {
            table: table.to_string(),
            column: column.name.clone(),
            reason,
        }),
        None => Ok(()),
    }
}
