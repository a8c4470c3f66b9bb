//! Codec configuration.

/// Limits applied while decoding records from a stream.
///
/// Length prefixes are checked against these limits before any buffer is
/// allocated, so a corrupted header cannot trigger an oversized allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Maximum number of columns in a single record
    pub max_columns: u32,
    /// Maximum byte length of a column name or value
    pub max_field_len: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_columns: 4096,
            max_field_len: 16 * 1024 * 1024, // 16 MiB
        }
    }
}
