//! Row record with current/old value tracking.
//!
//! A record holds, for every column it knows about:
//! - the current value, possibly not yet saved
//! - the old value, last known to be committed
//!
//! plus a lifecycle [`State`] that tells the owning collection what to do
//! with it on the next synchronization, and a visibility flag derived from
//! that state.

use std::collections::HashMap;

use crate::error::RecordError;
use crate::schema::ColumnSchema;

use super::state::{visible_for, State};

/// Current and old value of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnValue {
    pub(crate) current: String,
    pub(crate) old: String,
}

impl ColumnValue {
    pub(crate) fn unchanged(value: String) -> Self {
        Self {
            old: value.clone(),
            current: value,
        }
    }

    /// Live value, possibly unsaved.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Last committed value.
    pub fn old(&self) -> &str {
        &self.old
    }

    /// Returns true if the live value differs from the committed one.
    pub fn is_modified(&self) -> bool {
        self.current != self.old
    }
}

/// A single row with dual value tracking and a lifecycle state.
///
/// Records never hold on to the schema they were validated against; every
/// validating call takes one explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub(crate) state: State,
    pub(crate) visible: bool,
    pub(crate) values: HashMap<String, ColumnValue>,
}

impl Record {
    /// Creates an empty record, used as the target of a read.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a populated record.
    ///
    /// # Arguments
    /// * `values` - Column name to raw value
    /// * `schema` - Schema the values are validated against
    /// * `state` - Lifecycle state of the new record
    ///
    /// # Returns
    /// `Result<Record, RecordError>` containing the record, or:
    /// - `ColumnNotFound` if a column is missing from the schema
    /// - `InvalidData` if a value is rejected by its column type
    /// - `EmptyKey` if a key column is bound to an empty value
    pub fn new<S>(
        values: &HashMap<String, String>,
        schema: &S,
        state: State,
    ) -> Result<Self, RecordError>
    where
        S: ColumnSchema + ?Sized,
    {
        let entries = sorted_entries(values);
        validate_column_names(&entries, schema)?;
        let coerced = coerce_values(&entries, schema)?;
        validate_keys(&coerced, schema)?;

        let values = coerced
            .into_iter()
            .map(|(name, value)| (name.to_string(), ColumnValue::unchanged(value)))
            .collect();

        Ok(Self {
            state,
            visible: visible_for(state),
            values,
        })
    }

    /// Revises current values, keeping the previous current as old.
    ///
    /// Columns absent from `values` are left untouched and the state does not
    /// change. Key emptiness is not checked: key columns are not expected to
    /// change through an update. Every value is validated before any is
    /// applied, so on error the record is unchanged.
    ///
    /// # Arguments
    /// * `values` - Column name to new raw value
    /// * `schema` - Schema the values are validated against
    pub fn update<S>(
        &mut self,
        values: &HashMap<String, String>,
        schema: &S,
    ) -> Result<(), RecordError>
    where
        S: ColumnSchema + ?Sized,
    {
        let entries = sorted_entries(values);
        validate_column_names(&entries, schema)?;
        let coerced = coerce_values(&entries, schema)?;

        for (name, value) in coerced {
            match self.values.get_mut(name) {
                Some(slot) => slot.old = std::mem::replace(&mut slot.current, value),
                None => {
                    self.values.insert(
                        name.to_string(),
                        ColumnValue {
                            current: value,
                            old: String::new(),
                        },
                    );
                }
            }
        }

        Ok(())
    }

    /// Marks the record for deletion on the next synchronization and hides it.
    pub fn cancel(&mut self) {
        self.set_state(State::Deleting);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Snapshot of the current value of every column.
    pub fn current(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.current.clone()))
            .collect()
    }

    /// Snapshot of the old value of every column.
    pub fn old(&self) -> HashMap<String, String> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.old.clone()))
            .collect()
    }

    /// Number of tracked columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get_current(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(ColumnValue::current)
    }

    pub fn get_old(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(ColumnValue::old)
    }

    /// Tracked columns in unspecified order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns true if the column's current value differs from its old value.
    pub fn is_modified(&self, column: &str) -> bool {
        self.values.get(column).is_some_and(ColumnValue::is_modified)
    }

    /// Names of the columns whose current value differs from the old one, sorted.
    pub fn changed_columns(&self) -> Vec<&str> {
        let mut changed: Vec<&str> = self
            .values
            .iter()
            .filter(|(_, value)| value.is_modified())
            .map(|(name, _)| name.as_str())
            .collect();
        changed.sort_unstable();
        changed
    }

    /// Sets the state and recomputes visibility.
    fn set_state(&mut self, state: State) {
        self.state = state;
        self.visible = visible_for(state);
    }
}

/// Value map entries sorted by column name, so validation reports errors deterministically.
fn sorted_entries(values: &HashMap<String, String>) -> Vec<(&str, &str)> {
    let mut entries: Vec<(&str, &str)> = values
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    entries.sort_unstable_by_key(|&(name, _)| name);
    entries
}

/// Validates that every column named in the value map exists in the schema.
fn validate_column_names<S>(entries: &[(&str, &str)], schema: &S) -> Result<(), RecordError>
where
    S: ColumnSchema + ?Sized,
{
    match entries.iter().find(|(name, _)| !schema.contains_column(name)) {
        Some((name, _)) => Err(RecordError::ColumnNotFound {
            column: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Validates and coerces every value against its column type.
fn coerce_values<'a, S>(
    entries: &[(&'a str, &str)],
    schema: &S,
) -> Result<Vec<(&'a str, String)>, RecordError>
where
    S: ColumnSchema + ?Sized,
{
    entries
        .iter()
        .map(|&(name, raw)| {
            schema
                .coerce(name, raw)
                .map(|value| (name, value))
                .map_err(|e| RecordError::InvalidData {
                    column: name.to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// Validates that no key column is bound to an empty value.
fn validate_keys<S>(coerced: &[(&str, String)], schema: &S) -> Result<(), RecordError>
where
    S: ColumnSchema + ?Sized,
{
    match coerced
        .iter()
        .find(|(name, value)| value.is_empty() && schema.is_key_column(name))
    {
        Some((name, _)) => Err(RecordError::EmptyKey {
            column: name.to_string(),
        }),
        None => Ok(()),
    }
}
