//! Row records: lifecycle state, current/old values and the binary codec.

mod codec;
mod io_utils;
mod reader;
#[allow(clippy::module_inception)]
mod record;
mod state;

pub use codec::{COLUMN_OVERHEAD, HEADER_SIZE};
pub use reader::{write_records, RecordReader};
pub use record::{ColumnValue, Record};
pub use state::{visible_for, ParseStateError, State};
