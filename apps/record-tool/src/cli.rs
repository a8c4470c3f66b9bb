use std::path::PathBuf;

use clap::{Parser, Subcommand};
use record_core::record::ParseStateError;
use record_core::State;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every record of a file as one JSON line
    Inspect {
        /// Record file to read
        file: PathBuf,
    },

    /// Validate values against a schema and append a new record
    Append {
        /// Record file to append to (created if missing)
        file: PathBuf,

        /// JSON schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Table the record belongs to
        #[arg(short, long)]
        table: String,

        /// Lifecycle state of the new record: loaded, inserting or updating
        #[arg(long, default_value = "inserting", value_parser = parse_append_state)]
        state: State,

        /// Column assignments as column=value
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Re-validate the current values of every live record against a schema
    Validate {
        /// Record file to check
        file: PathBuf,

        /// JSON schema file
        #[arg(short, long)]
        schema: PathBuf,

        /// Table the records belong to
        #[arg(short, long)]
        table: String,
    },

    /// Count records per state
    Stats {
        /// Record file to read
        file: PathBuf,
    },
}

/// Parses the state of an appended record; only populated, visible states are accepted.
fn parse_append_state(value: &str) -> Result<State, String> {
    let state: State = value.parse().map_err(|e: ParseStateError| e.to_string())?;
    match state {
        State::Loaded | State::Inserting | State::Updating => Ok(state),
        other => Err(format!(
            "state '{}' cannot be appended, expected loaded, inserting or updating",
            other
        )),
    }
}
