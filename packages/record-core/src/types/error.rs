/// Error type for column type parsing and value coercion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("'{value}' is not a valid {type_name}")]
    InvalidFormat { type_name: String, value: String },

    #[error("'{value}' is out of range for {type_name}")]
    OutOfRange { type_name: String, value: String },

    #[error("value of length {len} exceeds {type_name}")]
    TooLong { type_name: String, len: usize },

    #[error("Unknown column type '{0}'")]
    UnknownType(String),

    #[error("Column '{0}' not found")]
    UnknownColumn(String),
}
