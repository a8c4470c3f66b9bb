//! Command implementations, writing their report to any output stream.

use std::collections::{BTreeMap, HashMap};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Serialize;

use record_core::schema::SchemaFile;
use record_core::{Record, RecordReader, State, TableSchema};

/// One record as printed by `inspect`.
#[derive(Debug, Serialize)]
struct RecordView {
    offset: u64,
    state: State,
    visible: bool,
    current: BTreeMap<String, String>,
    old: BTreeMap<String, String>,
}

impl RecordView {
    fn new(offset: u64, record: &Record) -> Self {
        Self {
            offset,
            state: record.state(),
            visible: record.visible(),
            current: record.current().into_iter().collect(),
            old: record.old().into_iter().collect(),
        }
    }
}

/// Outcome of `validate`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    pub checked: usize,
    pub skipped: usize,
    pub failed: usize,
}

fn open_records(path: &Path) -> anyhow::Result<RecordReader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(RecordReader::new(BufReader::new(file))?)
}

fn load_table(schema_path: &Path, table: &str) -> anyhow::Result<TableSchema> {
    let schema = SchemaFile::load(schema_path)?;
    Ok(schema.table(table)?)
}

/// Parses `column=value` assignments; the value may be empty.
fn parse_assignments(assignments: &[String]) -> anyhow::Result<HashMap<String, String>> {
    let mut values = HashMap::with_capacity(assignments.len());
    for assignment in assignments {
        let (column, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected column=value, got '{}'", assignment))?;
        if values
            .insert(column.to_string(), value.to_string())
            .is_some()
        {
            return Err(anyhow!("Column '{}' assigned more than once", column));
        }
    }
    Ok(values)
}

/// Prints every record of `path` as a JSON line and returns how many were printed.
pub fn inspect(path: &Path, out: &mut impl Write) -> anyhow::Result<usize> {
    let mut count = 0;
    for item in open_records(path)? {
        let (offset, record) = item?;
        serde_json::to_writer(&mut *out, &RecordView::new(offset, &record))?;
        writeln!(out)?;
        count += 1;
    }
    Ok(count)
}

/// Builds a record from `column=value` assignments and appends it to `path`.
///
/// # Returns
/// Byte offset at which the record was written.
pub fn append(
    path: &Path,
    schema_path: &Path,
    table: &str,
    state: State,
    assignments: &[String],
) -> anyhow::Result<u64> {
    let schema = load_table(schema_path, table)?;
    let values = parse_assignments(assignments)?;
    let record = Record::new(&values, &schema, state)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let offset = file.metadata()?.len();

    record.write(&mut file)?;
    file.sync_all()
        .with_context(|| format!("Failed to sync {}", path.display()))?;

    tracing::debug!(
        "Appended {} bytes to {} at offset {}",
        record.size(),
        path.display(),
        offset
    );
    Ok(offset)
}

/// Re-validates every live record's current values against the table schema.
///
/// Empty and deleting records are skipped. Each failure is reported as a line
/// on `out`.
pub fn validate(
    path: &Path,
    schema_path: &Path,
    table: &str,
    out: &mut impl Write,
) -> anyhow::Result<ValidationSummary> {
    let schema = load_table(schema_path, table)?;
    let mut summary = ValidationSummary::default();

    for item in open_records(path)? {
        let (offset, record) = item?;
        if matches!(record.state(), State::Empty | State::Deleting) {
            summary.skipped += 1;
            continue;
        }

        summary.checked += 1;
        if let Err(e) = Record::new(&record.current(), &schema, record.state()) {
            summary.failed += 1;
            writeln!(out, "offset {}: {}", offset, e)?;
        }
    }

    Ok(summary)
}

/// Prints the number of records per state and the number of visible records.
pub fn stats(path: &Path, out: &mut impl Write) -> anyhow::Result<BTreeMap<State, usize>> {
    let mut counts: HashMap<State, usize> = HashMap::new();
    let mut visible = 0;
    let mut bytes = 0;

    for item in open_records(path)? {
        let (_, record) = item?;
        *counts.entry(record.state()).or_default() += 1;
        if record.visible() {
            visible += 1;
        }
        bytes += record.size();
    }

    let mut ordered = BTreeMap::new();
    for state in State::ALL {
        let count = counts.get(&state).copied().unwrap_or(0);
        writeln!(out, "{}: {}", state, count)?;
        ordered.insert(state, count);
    }
    writeln!(out, "visible: {}", visible)?;
    writeln!(out, "bytes: {}", bytes)?;

    Ok(ordered)
}
