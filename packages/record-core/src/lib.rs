//! Change-tracking row records for database clients.
//!
//! Provides the record state machine, column type system, table schemas
//! and the binary at-rest format for records.

pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod types;

pub use config::CodecConfig;
pub use error::{RecordError, SchemaError};
pub use record::{visible_for, Record, RecordReader, State};
pub use schema::{Column, ColumnSchema, TableSchema};
pub use types::{ColumnType, TypeError};
