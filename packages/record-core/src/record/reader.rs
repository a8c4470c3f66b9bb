//! Sequential access to streams holding consecutive records.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::config::CodecConfig;
use crate::error::RecordError;

use super::io_utils::classify_io_error;
use super::record::Record;

/// Iterates over the records stored back to back in a seekable stream.
///
/// Yields `(offset, record)` pairs until the end of the stream. A record cut
/// short by the end of the stream yields a `StorageError`, after which the
/// iterator is exhausted.
#[derive(Debug)]
pub struct RecordReader<R> {
    stream: R,
    /// Stream length captured at construction
    end: u64,
    config: CodecConfig,
    failed: bool,
}

impl<R: Read + Seek> RecordReader<R> {
    /// Creates a reader starting at the stream's current position.
    pub fn new(stream: R) -> Result<Self, RecordError> {
        Self::with_config(stream, CodecConfig::default())
    }

    /// Creates a reader with explicit decoding limits.
    pub fn with_config(mut stream: R, config: CodecConfig) -> Result<Self, RecordError> {
        let start = stream
            .stream_position()
            .map_err(|e| classify_io_error(e, "Failed to query stream position"))?;
        let end = stream
            .seek(SeekFrom::End(0))
            .map_err(|e| classify_io_error(e, "Failed to seek to end of stream"))?;
        stream
            .seek(SeekFrom::Start(start))
            .map_err(|e| classify_io_error(e, "Failed to restore stream position"))?;

        Ok(Self {
            stream,
            end,
            config,
            failed: false,
        })
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> R {
        self.stream
    }
}

impl<R: Read + Seek> Iterator for RecordReader<R> {
    type Item = Result<(u64, Record), RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let offset = match self.stream.stream_position() {
            Ok(offset) => offset,
            Err(e) => {
                self.failed = true;
                return Some(Err(classify_io_error(e, "Failed to query stream position")));
            }
        };
        if offset >= self.end {
            return None;
        }

        match Record::read_from_with_config(&mut self.stream, &self.config) {
            Ok(record) => Some(Ok((offset, record))),
            Err(e) => {
                self.failed = true;
                let detail = match e {
                    RecordError::StorageError(message) => message,
                    other => other.to_string(),
                };
                Some(Err(RecordError::StorageError(format!(
                    "record at offset {}: {}",
                    offset, detail
                ))))
            }
        }
    }
}

/// Writes records back to back and returns the number of bytes written.
pub fn write_records<'a, W, I>(stream: &mut W, records: I) -> Result<u64, RecordError>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = &'a Record>,
{
    let mut written = 0u64;
    for record in records {
        record.write(stream)?;
        written += record.size();
    }
    tracing::debug!("Wrote {} bytes of records", written);
    Ok(written)
}
