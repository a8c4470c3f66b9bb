//! Column set of a single table.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::types::TypeError;

use super::column::Column;
use super::provider::ColumnSchema;
use super::validation;

/// Validated column set of a table.
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Table name
    name: String,
    /// Column definitions in declaration order
    columns: Vec<Column>,
    /// Column name to position in `columns`
    index: HashMap<String, usize>,
}

impl TableSchema {
    /// Creates a table schema from its column definitions.
    ///
    /// # Arguments
    /// * `name` - Table name
    /// * `columns` - Column definitions in declaration order
    ///
    /// # Returns
    /// `Result<TableSchema, SchemaError>` containing the schema or the first definition error.
    pub fn create(name: impl Into<String>, columns: Vec<Column>) -> Result<Self, SchemaError> {
        let name = name.into();
        validation::validate_columns(&name, &columns)?;

        let index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();

        Ok(Self {
            name,
            columns,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column definitions in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Columns that make up the key, in declaration order.
    pub fn key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.key)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl ColumnSchema for TableSchema {
    fn contains_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    fn is_key_column(&self, column: &str) -> bool {
        self.column(column).is_some_and(|c| c.key)
    }

    fn coerce(&self, column: &str, raw: &str) -> Result<String, TypeError> {
        self.column(column)
            .ok_or_else(|| TypeError::UnknownColumn(column.to_string()))?
            .coerce(raw)
    }
}
