//! Stream processing for measurement records
//!
//! Pull-based streaming of `(time, current, voltage)` records into the
//! estimators, with minimal memory overhead.
//!
//! ## Module Organization
//!
//! - Core types, the `Stream` trait, and errors (this file)
//! - `memory` - in-memory streams for testing and replay
//! - `file` - CSV file streams and the estimate writer (requires `std`)

use core::fmt;

pub mod memory;

#[cfg(feature = "std")]
pub mod file;

// Re-export commonly used types
pub use memory::MemoryStream;

#[cfg(feature = "std")]
pub use file::{CsvRecordStream, CsvStreamStats, EstimateWriter};

/// One measurement record of the input stream.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Sample time (s). Reporting metadata; the filters assume the fixed
    /// sample period from [`BatteryParams`](crate::BatteryParams).
    pub timestamp_s: u64,
    /// Discharge current (A, positive = discharging).
    pub current_a: f64,
    /// Measured terminal voltage (V).
    pub voltage_v: f64,
}

/// Per-record output of the lockstep estimation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimate {
    /// Sample time of the record this estimate answers (s).
    pub timestamp_s: u64,
    /// SoC estimate of the extended Kalman filter (fraction).
    pub ekf_soc: f64,
    /// SoC estimate of the sigma-point filter (fraction).
    pub ukf_soc: f64,
}

/// Errors that can occur during stream processing.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Transport-level error (e.g., I/O error)
    Transport(E),
    /// Data format error
    Format(&'static str),
    /// End of stream reached
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Format(msg) => write!(f, "Format error: {}", msg),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

/// Core stream trait for record sources.
///
/// Streams provide measurement records using a pull model compatible with
/// embedded targets. `nb::Result` gives non-blocking operation without an
/// async runtime: `WouldBlock` means "try again later", `Other` carries an
/// actual stream error. `EndOfStream` errors should be sticky.
pub trait Stream {
    /// Type of items produced by the stream.
    type Item;

    /// Type of errors that can occur.
    type Error;

    /// Attempt to pull the next item from the stream.
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Bounds on remaining items, like `Iterator::size_hint()`.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}
