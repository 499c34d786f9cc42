//! CSV file streaming for measurement records
//!
//! Reads `time, current, voltage` records from delimited text and writes
//! the per-record estimates back out in the same dialect:
//!
//! ```csv
//! Time (s), Current (A), Voltage (V)
//! 0, 1.0, 3.65
//! 1, 1.0, 3.64
//! ```
//!
//! Output format (four decimal places, matching the reference estimator's
//! logs):
//!
//! ```csv
//! Time (s), EKF SoC, UKF SoC
//! 0, 0.5349, 0.5351
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use super::{Record, Stream, StreamError};

/// Statistics for CSV record streaming.
#[derive(Debug, Default, Clone)]
pub struct CsvStreamStats {
    /// Records parsed successfully
    pub records_read: usize,
    /// Total lines processed (including header and bad lines)
    pub lines_processed: usize,
    /// Parse errors encountered and skipped
    pub parse_errors: usize,
    /// Bytes read from the file
    pub bytes_read: usize,
}

/// CSV-backed record stream.
///
/// Reads the file in 4 KiB chunks into a fixed line buffer; no per-line
/// heap allocation. Malformed lines are counted and skipped rather than
/// aborting the run, matching the tolerance of the reference estimator's
/// input loop. Lines longer than the buffer are truncated and will count
/// as parse errors.
///
/// ## Example
///
/// ```rust,no_run
/// use cellgauge::stream::{CsvRecordStream, Stream};
///
/// let mut stream = CsvRecordStream::open("sensor_data.txt")?;
/// while let Ok(record) = stream.poll_next() {
///     // feed record to the estimator
/// }
/// # Ok::<(), cellgauge::stream::StreamError<std::io::Error>>(())
/// ```
pub struct CsvRecordStream {
    /// File handle
    file: File,
    /// Read buffer
    buffer: [u8; 4096],
    /// Current position in buffer
    buffer_pos: usize,
    /// Valid bytes in buffer
    buffer_len: usize,
    /// Line assembly buffer
    line: heapless::String<128>,
    /// Whether we've reached EOF
    eof: bool,
    /// Skip first N lines (headers)
    skip_lines: usize,
    /// Lines already skipped
    lines_skipped: usize,
    /// Statistics
    stats: CsvStreamStats,
}

impl CsvRecordStream {
    /// Open a CSV record file, skipping one header line.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StreamError<io::Error>> {
        let file = File::open(path).map_err(StreamError::Transport)?;

        Ok(Self {
            file,
            buffer: [0; 4096],
            buffer_pos: 0,
            buffer_len: 0,
            line: heapless::String::new(),
            eof: false,
            skip_lines: 1,
            lines_skipped: 0,
            stats: CsvStreamStats::default(),
        })
    }

    /// Override the number of leading lines to skip (default 1).
    pub fn with_skip_lines(mut self, lines: usize) -> Self {
        self.skip_lines = lines;
        self
    }

    /// Get statistics.
    pub fn stats(&self) -> &CsvStreamStats {
        &self.stats
    }

    /// Refill the read buffer from the file.
    fn refill(&mut self) -> Result<(), StreamError<io::Error>> {
        let n = self.file.read(&mut self.buffer).map_err(StreamError::Transport)?;
        self.buffer_pos = 0;
        self.buffer_len = n;
        self.stats.bytes_read += n;
        if n == 0 {
            self.eof = true;
        }
        Ok(())
    }

    /// Assemble the next line into `self.line`.
    ///
    /// Returns false once the file is exhausted. A final line without a
    /// trailing newline is still returned.
    fn next_line(&mut self) -> Result<bool, StreamError<io::Error>> {
        self.line.clear();
        loop {
            if self.buffer_pos >= self.buffer_len {
                if self.eof {
                    return Ok(!self.line.is_empty());
                }
                self.refill()?;
                continue;
            }

            while self.buffer_pos < self.buffer_len {
                let byte = self.buffer[self.buffer_pos];
                self.buffer_pos += 1;
                match byte {
                    b'\n' => return Ok(true),
                    b'\r' => {}
                    _ => {
                        // Overlong lines are truncated; they fail parsing
                        let _ = self.line.push(byte as char);
                    }
                }
            }
        }
    }

    /// Parse a `time, current, voltage` line.
    fn parse_record(line: &str) -> Option<Record> {
        let mut fields = line.split(',').map(str::trim);
        let timestamp_s = fields.next()?.parse().ok()?;
        let current_a = fields.next()?.parse().ok()?;
        let voltage_v = fields.next()?.parse().ok()?;
        Some(Record {
            timestamp_s,
            current_a,
            voltage_v,
        })
    }
}

impl Stream for CsvRecordStream {
    type Item = Record;
    type Error = StreamError<io::Error>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        loop {
            if !self.next_line().map_err(nb::Error::Other)? {
                return Err(nb::Error::Other(StreamError::EndOfStream));
            }
            self.stats.lines_processed += 1;

            if self.lines_skipped < self.skip_lines {
                self.lines_skipped += 1;
                continue;
            }
            if self.line.is_empty() {
                continue;
            }

            match Self::parse_record(&self.line) {
                Some(record) => {
                    self.stats.records_read += 1;
                    return Ok(record);
                }
                None => {
                    self.stats.parse_errors += 1;
                    log::warn!("skipping malformed record line: {:?}", self.line.as_str());
                }
            }
        }
    }
}

/// Writer for the estimate CSV output.
///
/// Emits the `Time (s), EKF SoC, UKF SoC` header on construction and one
/// four-decimal row per estimate.
pub struct EstimateWriter<W: Write> {
    out: W,
}

impl EstimateWriter<BufWriter<File>> {
    /// Create the output file, truncating any existing content.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> EstimateWriter<W> {
    /// Wrap a writer and emit the header line.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "Time (s), EKF SoC, UKF SoC")?;
        Ok(Self { out })
    }

    /// Append one estimate row.
    pub fn write(&mut self, estimate: &crate::stream::Estimate) -> io::Result<()> {
        writeln!(
            self.out,
            "{}, {:.4}, {:.4}",
            estimate.timestamp_s, estimate.ekf_soc, estimate.ukf_soc
        )
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
