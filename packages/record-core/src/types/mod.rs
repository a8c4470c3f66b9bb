//! Column type system and value coercion.

mod column_type;
mod error;

pub use column_type::{ColumnType, MAX_CHAR_LENGTH};
pub use error::TypeError;
