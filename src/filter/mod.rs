//! Recursive Bayesian Filters for SoC Estimation
//!
//! ## Overview
//!
//! Two scalar filters estimate state of charge from noisy terminal-voltage
//! measurements, each combining a Coulomb-counting prediction with a
//! correction from the nonlinear voltage model:
//!
//! ```text
//! Predict:  soc ← soc − i·dt/Q_batt        (charge bookkeeping)
//!           p   ← p + q                    (uncertainty grows)
//! Update:   ẑ   = v(soc, i)                (expected voltage)
//!           soc ← soc + gain·(z − ẑ)       (pull toward measurement)
//!           p   ← shrink(p, gain)          (uncertainty shrinks)
//! ```
//!
//! They differ only in how the nonlinear model enters the update:
//!
//! - [`Ekf`] linearizes `v` through its analytic slope at the current
//!   estimate.
//! - [`Ukf`] samples three points around the estimate and transforms each
//!   through `v` directly, with no derivative.
//!
//! Both are driven predict-then-update once per record; no other call
//! ordering is supported. Each instance owns its scalar state outright, so
//! two filters may run on separate threads with zero synchronization.
//!
//! ## Divergence
//!
//! A zero innovation covariance or a zero SoC feeds an infinity into the
//! state. [`DivergenceHandling`] selects whether that propagates silently
//! (the faithful baseline) or is reported as
//! [`FilterError::Diverged`](crate::FilterError::Diverged).

pub mod ekf;
pub mod ukf;

// Re-export main types
pub use ekf::Ekf;
pub use ukf::Ukf;

pub use crate::errors::{FilterError, FilterResult};

use crate::constants::tuning;

/// How a filter reacts when its state leaves the finite range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivergenceHandling {
    /// Let non-finite values flow into the state silently. This is the
    /// baseline behavior for parity testing against the reference
    /// estimator; the filter keeps running but its output is garbage
    /// from the first non-finite step onward.
    #[default]
    Propagate,
    /// Return [`FilterError::Diverged`](crate::FilterError::Diverged) from
    /// the update step as soon as the SoC or covariance is non-finite.
    /// State is left as computed so the caller can inspect it.
    Detect,
}

/// Filter tuning shared by both engines.
///
/// All fields are fixed at construction; the engines never mutate their
/// config. Defaults come from [`crate::constants::tuning`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Initial state-of-charge estimate (fraction).
    pub initial_soc: f64,
    /// Initial estimate covariance.
    pub initial_covariance: f64,
    /// Process noise Q added each predict step.
    pub process_noise: f64,
    /// Measurement noise R of the voltage sensor (V²).
    pub measurement_noise: f64,
    /// Reaction to non-finite state.
    pub divergence: DivergenceHandling,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            initial_soc: tuning::INITIAL_SOC,
            initial_covariance: tuning::INITIAL_COVARIANCE,
            process_noise: tuning::PROCESS_NOISE,
            measurement_noise: tuning::MEASUREMENT_NOISE,
            divergence: DivergenceHandling::default(),
        }
    }
}

impl FilterConfig {
    /// Set the initial SoC estimate.
    pub fn with_initial_soc(mut self, soc: f64) -> Self {
        self.initial_soc = soc;
        self
    }

    /// Set the initial covariance.
    pub fn with_initial_covariance(mut self, covariance: f64) -> Self {
        self.initial_covariance = covariance;
        self
    }

    /// Set the process noise (higher = less trust in Coulomb counting).
    pub fn with_process_noise(mut self, noise: f64) -> Self {
        self.process_noise = noise;
        self
    }

    /// Set the measurement noise (higher = less trust in the voltmeter).
    pub fn with_measurement_noise(mut self, noise: f64) -> Self {
        self.measurement_noise = noise;
        self
    }

    /// Set the divergence handling policy.
    pub fn with_divergence(mut self, handling: DivergenceHandling) -> Self {
        self.divergence = handling;
        self
    }
}

/// Common interface of the SoC filters.
///
/// ## Contract
///
/// Callers invoke `predict` then `update` exactly once per measurement
/// record. Implementations must:
///
/// 1. Never panic on any finite input
/// 2. Mutate only their own scalar state
/// 3. Complete in bounded time with no allocation
pub trait SocFilter {
    /// Propagate the state forward one sample using the discharge current
    /// (A, positive = discharging).
    fn predict(&mut self, current: f64);

    /// Correct the state with a measured terminal voltage (V) taken under
    /// the given current. Returns the corrected SoC estimate.
    fn update(&mut self, measured_voltage: f64, current: f64) -> FilterResult<f64>;

    /// Current state-of-charge estimate (fraction).
    fn soc(&self) -> f64;

    /// Current estimate covariance.
    fn covariance(&self) -> f64;

    /// Reset state and covariance to their configured initial values.
    fn reset(&mut self);
}
