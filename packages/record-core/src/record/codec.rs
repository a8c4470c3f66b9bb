//! Binary encoding of records.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! +-------+---------+--------------+--------------------------------------+
//! | state | visible | column count | columns (ascending by name)          |
//! | u8    | u8      | u32          | [name][current][old], each u32 + UTF-8 |
//! +-------+---------+--------------+--------------------------------------+
//! ```
//!
//! Reading trusts the stored values as committed truth: the old value of
//! every column is replaced by its current value.

use std::collections::HashMap;
use std::io::{self, Read, Write};

use crate::config::CodecConfig;
use crate::error::RecordError;

use super::io_utils::{classify_io_error, corrupt, oversized};
use super::record::{ColumnValue, Record};
use super::state::{visible_for, State};

/// Bytes before the first column: state, visible, column count.
pub const HEADER_SIZE: u64 = 1 + 1 + 4;

/// Bytes of the three length prefixes of a column entry.
pub const COLUMN_OVERHEAD: u64 = 3 * 4;

impl Record {
    /// Returns the exact number of bytes [`Record::write`] emits for this record.
    pub fn size(&self) -> u64 {
        self.values
            .iter()
            .map(|(name, value)| {
                COLUMN_OVERHEAD
                    + name.len() as u64
                    + value.current.len() as u64
                    + value.old.len() as u64
            })
            .sum::<u64>()
            + HEADER_SIZE
    }

    /// Writes the record at the stream's current position.
    ///
    /// The record is encoded in memory first and handed to the stream in one
    /// `write_all`; a failing stream may still have accepted part of it. A
    /// record that [`Record::read`] would reject under the default limits is
    /// refused before anything is written.
    ///
    /// # Returns
    /// `Result<(), RecordError>` with `StorageError` if encoding or the stream fails.
    pub fn write<W>(&self, stream: &mut W) -> Result<(), RecordError>
    where
        W: Write + ?Sized,
    {
        self.write_with_config(stream, &CodecConfig::default())
    }

    /// Same as [`Record::write`] with explicit limits.
    pub fn write_with_config<W>(
        &self,
        stream: &mut W,
        config: &CodecConfig,
    ) -> Result<(), RecordError>
    where
        W: Write + ?Sized,
    {
        let buf = self.encode_with_config(config)?;
        stream
            .write_all(&buf)
            .map_err(|e| classify_io_error(e, "Failed to write record"))?;

        tracing::trace!(
            "Wrote {} record with {} columns ({} bytes)",
            self.state,
            self.values.len(),
            buf.len()
        );
        Ok(())
    }

    /// Encodes the record into a new buffer under the default limits.
    pub fn encode(&self) -> Result<Vec<u8>, RecordError> {
        self.encode_with_config(&CodecConfig::default())
    }

    /// Encodes the record into a new buffer.
    ///
    /// Fails with `StorageError` if the record holds more columns or longer
    /// strings than `config` allows on read.
    pub fn encode_with_config(&self, config: &CodecConfig) -> Result<Vec<u8>, RecordError> {
        let count = u32::try_from(self.values.len())
            .ok()
            .filter(|&count| count <= config.max_columns)
            .ok_or_else(|| {
                oversized(format!(
                    "{} columns exceed limit {}",
                    self.values.len(),
                    config.max_columns
                ))
            })?;

        let mut buf = Vec::with_capacity(self.size() as usize);
        buf.push(self.state.tag());
        buf.push(u8::from(self.visible));
        buf.extend_from_slice(&count.to_le_bytes());

        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort_unstable();

        for name in names {
            let value = &self.values[name];
            put_str(&mut buf, config, name, name)?;
            put_str(&mut buf, config, name, &value.current)?;
            put_str(&mut buf, config, name, &value.old)?;
        }

        Ok(buf)
    }

    /// Replaces this record with one read from the stream's current position.
    ///
    /// On error the record keeps its previous contents.
    pub fn read<R>(&mut self, stream: &mut R) -> Result<(), RecordError>
    where
        R: Read + ?Sized,
    {
        self.read_with_config(stream, &CodecConfig::default())
    }

    /// Same as [`Record::read`] with explicit decoding limits.
    pub fn read_with_config<R>(
        &mut self,
        stream: &mut R,
        config: &CodecConfig,
    ) -> Result<(), RecordError>
    where
        R: Read + ?Sized,
    {
        *self = Self::read_from_with_config(stream, config)?;
        Ok(())
    }

    /// Reads a new record from the stream's current position.
    pub fn read_from<R>(stream: &mut R) -> Result<Self, RecordError>
    where
        R: Read + ?Sized,
    {
        Self::read_from_with_config(stream, &CodecConfig::default())
    }

    /// Same as [`Record::read_from`] with explicit decoding limits.
    pub fn read_from_with_config<R>(
        stream: &mut R,
        config: &CodecConfig,
    ) -> Result<Self, RecordError>
    where
        R: Read + ?Sized,
    {
        let tag = read_u8(stream, "Failed to read record state")?;
        let state = State::from_tag(tag).ok_or_else(|| corrupt(format!("unknown state tag {}", tag)))?;

        let visible = match read_u8(stream, "Failed to read record visibility")? {
            0 => false,
            1 => true,
            other => return Err(corrupt(format!("invalid visibility byte {}", other))),
        };
        if visible != visible_for(state) {
            return Err(corrupt(format!(
                "visibility {} inconsistent with state {}",
                visible, state
            )));
        }

        let count = read_u32(stream, "Failed to read column count")?;
        if count > config.max_columns {
            return Err(corrupt(format!(
                "column count {} exceeds limit {}",
                count, config.max_columns
            )));
        }

        let mut values = HashMap::with_capacity(count as usize);
        for _ in 0..count {
            let name = read_str(stream, config, "Failed to read column name")?;
            let current = read_str(stream, config, "Failed to read current value")?;
            skip_str(stream, config, "Failed to read old value")?;

            if values.contains_key(&name) {
                return Err(corrupt(format!("duplicate column '{}'", name)));
            }
            values.insert(name, ColumnValue::unchanged(current));
        }

        tracing::trace!("Read {} record with {} columns", state, count);

        Ok(Self {
            state,
            visible,
            values,
        })
    }
}

fn put_str(
    buf: &mut Vec<u8>,
    config: &CodecConfig,
    column: &str,
    value: &str,
) -> Result<(), RecordError> {
    let len = u32::try_from(value.len())
        .ok()
        .filter(|&len| len <= config.max_field_len)
        .ok_or_else(|| {
            oversized(format!(
                "column '{}': {} bytes exceed limit {}",
                column,
                value.len(),
                config.max_field_len
            ))
        })?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

fn read_u8<R: Read + ?Sized>(stream: &mut R, context: &str) -> Result<u8, RecordError> {
    let mut byte = [0u8; 1];
    stream
        .read_exact(&mut byte)
        .map_err(|e| classify_io_error(e, context))?;
    Ok(byte[0])
}

fn read_u32<R: Read + ?Sized>(stream: &mut R, context: &str) -> Result<u32, RecordError> {
    let mut bytes = [0u8; 4];
    stream
        .read_exact(&mut bytes)
        .map_err(|e| classify_io_error(e, context))?;
    Ok(u32::from_le_bytes(bytes))
}

/// Reads a length prefix and checks it against the configured limit.
fn read_len<R: Read + ?Sized>(
    stream: &mut R,
    config: &CodecConfig,
    context: &str,
) -> Result<u64, RecordError> {
    let len = read_u32(stream, context)?;
    if len > config.max_field_len {
        return Err(corrupt(format!(
            "{}: length {} exceeds limit {}",
            context, len, config.max_field_len
        )));
    }
    Ok(u64::from(len))
}

fn read_str<R: Read + ?Sized>(
    stream: &mut R,
    config: &CodecConfig,
    context: &str,
) -> Result<String, RecordError> {
    let len = read_len(stream, config, context)?;

    // `take` bounds the allocation by what the stream actually holds
    let mut bytes = Vec::new();
    let read = (&mut *stream)
        .take(len)
        .read_to_end(&mut bytes)
        .map_err(|e| classify_io_error(e, context))?;
    if (read as u64) < len {
        return Err(classify_io_error(
            io::ErrorKind::UnexpectedEof.into(),
            context,
        ));
    }

    String::from_utf8(bytes).map_err(|_| corrupt(format!("{}: invalid UTF-8", context)))
}

fn skip_str<R: Read + ?Sized>(
    stream: &mut R,
    config: &CodecConfig,
    context: &str,
) -> Result<(), RecordError> {
    let len = read_len(stream, config, context)?;
    let skipped = io::copy(&mut (&mut *stream).take(len), &mut io::sink())
        .map_err(|e| classify_io_error(e, context))?;
    if skipped < len {
        return Err(classify_io_error(
            io::ErrorKind::UnexpectedEof.into(),
            context,
        ));
    }
    Ok(())
}
