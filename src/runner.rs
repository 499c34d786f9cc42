//! Lockstep Estimation Driver
//!
//! Feeds each measurement record through both filters in a fixed order —
//! EKF predict, EKF update, UKF predict, UKF update — and pairs their
//! estimates per record. The two filters never share state; the lockstep
//! ordering only keeps their outputs aligned record for record so the
//! schemes can be compared on identical input.

use crate::{
    errors::FilterError,
    filter::{Ekf, FilterConfig, SocFilter, Ukf},
    model::BatteryParams,
    stream::{Estimate, Record, Stream, StreamError},
};

use core::fmt;

/// Errors from a full estimation run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError<E> {
    /// The record source failed.
    Stream(StreamError<E>),
    /// A filter diverged (only with
    /// [`DivergenceHandling::Detect`](crate::DivergenceHandling::Detect)).
    Filter(FilterError),
}

impl<E: fmt::Display> fmt::Display for RunError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(e) => write!(f, "Stream error: {}", e),
            Self::Filter(e) => write!(f, "Filter error: {}", e),
        }
    }
}

impl<E> From<FilterError> for RunError<E> {
    fn from(err: FilterError) -> Self {
        Self::Filter(err)
    }
}

/// Side-by-side EKF/UKF estimator.
///
/// Both filters are built from the same tuning and battery coefficients so
/// any difference in their outputs comes from the filtering scheme alone.
///
/// ## Example
///
/// ```
/// use cellgauge::{BatteryParams, FilterConfig, Record, SocEstimator};
///
/// let mut estimator = SocEstimator::new(FilterConfig::default(), BatteryParams::default());
/// let estimate = estimator
///     .step(&Record { timestamp_s: 0, current_a: 1.0, voltage_v: 3.65 })
///     .unwrap();
/// assert!(estimate.ekf_soc > 0.0 && estimate.ekf_soc < 1.0);
/// ```
pub struct SocEstimator {
    ekf: Ekf,
    ukf: Ukf,
}

impl SocEstimator {
    /// Create both filters from shared tuning and battery coefficients.
    pub fn new(config: FilterConfig, params: BatteryParams) -> Self {
        Self {
            ekf: Ekf::new(config, params),
            ukf: Ukf::new(config, params),
        }
    }

    /// Process one record through both filters, predict then update.
    pub fn step(&mut self, record: &Record) -> Result<Estimate, FilterError> {
        self.ekf.predict(record.current_a);
        self.ekf.update(record.voltage_v, record.current_a)?;

        self.ukf.predict(record.current_a);
        self.ukf.update(record.voltage_v, record.current_a)?;

        Ok(Estimate {
            timestamp_s: record.timestamp_s,
            ekf_soc: self.ekf.soc(),
            ukf_soc: self.ukf.soc(),
        })
    }

    /// Drain a record stream, handing each estimate to `sink`.
    ///
    /// `WouldBlock` polls retry immediately; `EndOfStream` terminates the
    /// run cleanly. Returns the number of records processed.
    pub fn run<S, E, F>(&mut self, stream: &mut S, mut sink: F) -> Result<usize, RunError<E>>
    where
        S: Stream<Item = Record, Error = StreamError<E>>,
        F: FnMut(&Estimate),
    {
        let mut count = 0;
        loop {
            match stream.poll_next() {
                Ok(record) => {
                    let estimate = self.step(&record)?;
                    sink(&estimate);
                    count += 1;
                }
                Err(nb::Error::WouldBlock) => continue,
                Err(nb::Error::Other(StreamError::EndOfStream)) => return Ok(count),
                Err(nb::Error::Other(e)) => return Err(RunError::Stream(e)),
            }
        }
    }

    /// Estimate a whole CSV file into a CSV output file.
    ///
    /// Reads `time, current, voltage` records (one header line skipped)
    /// and writes `Time (s), EKF SoC, UKF SoC` rows. Returns the number of
    /// records processed.
    #[cfg(feature = "std")]
    pub fn estimate_csv_file<P, Q>(
        &mut self,
        input: P,
        output: Q,
    ) -> Result<usize, RunError<std::io::Error>>
    where
        P: AsRef<std::path::Path>,
        Q: AsRef<std::path::Path>,
    {
        use crate::stream::{CsvRecordStream, EstimateWriter};

        let mut stream = CsvRecordStream::open(input).map_err(RunError::Stream)?;
        let mut writer = EstimateWriter::create(output)
            .map_err(|e| RunError::Stream(StreamError::Transport(e)))?;

        let mut write_error = None;
        let count = self.run(&mut stream, |estimate| {
            if write_error.is_none() {
                write_error = writer.write(estimate).err();
            }
        })?;

        if let Some(e) = write_error {
            return Err(RunError::Stream(StreamError::Transport(e)));
        }
        writer
            .into_inner()
            .map_err(|e| RunError::Stream(StreamError::Transport(e)))?;

        log::debug!(
            "estimated {} records ({} parse errors skipped)",
            count,
            stream.stats().parse_errors
        );
        Ok(count)
    }

    /// The extended Kalman filter half of the pair.
    pub fn ekf(&self) -> &Ekf {
        &self.ekf
    }

    /// The sigma-point filter half of the pair.
    pub fn ukf(&self) -> &Ukf {
        &self.ukf
    }

    /// Reset both filters to their configured initial state.
    pub fn reset(&mut self) {
        self.ekf.reset();
        self.ukf.reset();
    }
}
