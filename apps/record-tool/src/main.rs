//! CLI tool for record file inspection and maintenance.
//!
//! Provides commands for:
//! - Dumping record files as JSON lines
//! - Appending schema-validated records
//! - Re-validating stored records and summarizing their states

mod cli;
mod commands;

use std::io;

use anyhow::bail;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, reports to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Inspect { file } => {
            let count = commands::inspect(&file, &mut out)?;
            tracing::info!("Inspected {} records in {}", count, file.display());
        }
        Commands::Append {
            file,
            schema,
            table,
            state,
            values,
        } => {
            let offset = commands::append(&file, &schema, &table, state, &values)?;
            tracing::info!("Appended {} record at offset {}", state, offset);
        }
        Commands::Validate {
            file,
            schema,
            table,
        } => {
            let summary = commands::validate(&file, &schema, &table, &mut out)?;
            tracing::info!(
                "Validated {} records, skipped {}, {} failed",
                summary.checked,
                summary.skipped,
                summary.failed
            );
            if summary.failed > 0 {
                bail!("{} records failed validation", summary.failed);
            }
        }
        Commands::Stats { file } => {
            commands::stats(&file, &mut out)?;
        }
    }

    Ok(())
}
