//! Schema lookup interface consumed by records.

use std::collections::HashMap;

use crate::types::TypeError;

use super::column::Column;

/// Column lookup and value coercion used to validate records.
///
/// Records never store a schema; one is passed to every validating call.
pub trait ColumnSchema {
    /// Returns true if a column with this name exists.
    fn contains_column(&self, column: &str) -> bool;

    /// Returns true if the column is part of the key.
    fn is_key_column(&self, column: &str) -> bool;

    /// Validates `raw` against the column's type and returns the coerced value.
    fn coerce(&self, column: &str, raw: &str) -> Result<String, TypeError>;
}

impl ColumnSchema for HashMap<String, Column> {
    fn contains_column(&self, column: &str) -> bool {
        self.contains_key(column)
    }

    fn is_key_column(&self, column: &str) -> bool {
        self.get(column).is_some_and(|c| c.key)
    }

    fn coerce(&self, column: &str, raw: &str) -> Result<String, TypeError> {
        self.get(column)
            .ok_or_else(|| TypeError::UnknownColumn(column.to_string()))?
            .coerce(raw)
    }
}
