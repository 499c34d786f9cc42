//! Memory-based record streams for testing and replay
//!
//! Useful for unit tests, replaying recorded discharge logs, and
//! simulating measurement inputs without touching the filesystem.

use super::{Record, Stream, StreamError};

/// Memory-based stream over a slice of records.
///
/// ## Example
///
/// ```
/// use cellgauge::stream::{MemoryStream, Record, Stream};
///
/// let records = [
///     Record { timestamp_s: 0, current_a: 1.0, voltage_v: 3.65 },
///     Record { timestamp_s: 1, current_a: 1.0, voltage_v: 3.64 },
/// ];
///
/// let mut stream = MemoryStream::new(&records);
/// while let Ok(record) = stream.poll_next() {
///     // feed record to the estimator
/// }
/// ```
pub struct MemoryStream<'a> {
    /// Slice of records to stream
    records: &'a [Record],
    /// Current position
    position: usize,
}

impl<'a> MemoryStream<'a> {
    /// Create new memory stream from a slice.
    pub fn new(records: &'a [Record]) -> Self {
        Self {
            records,
            position: 0,
        }
    }

    /// Reset to the beginning.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if the stream is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.records.len()
    }
}

impl<'a> Stream for MemoryStream<'a> {
    type Item = Record;
    type Error = StreamError<()>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        if self.position >= self.records.len() {
            return Err(nb::Error::Other(StreamError::EndOfStream));
        }

        let record = self.records[self.position];
        self.position += 1;
        Ok(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len() - self.position;
        (remaining, Some(remaining))
    }
}
