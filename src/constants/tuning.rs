//! Filter Tuning Constants
//!
//! Default noise terms and initial conditions shared by both filters, plus
//! the sigma-point scaling parameters. These are construction-time values;
//! once a filter is built they never change.

/// Default initial state-of-charge estimate (fraction, 0..1).
///
/// Starting at 50% is the conventional uninformed prior for a cell of
/// unknown charge.
pub const INITIAL_SOC: f64 = 0.5;

/// Default initial estimate covariance.
///
/// Moderate initial uncertainty; converges within a few updates.
pub const INITIAL_COVARIANCE: f64 = 0.01;

/// Default process noise Q added to the covariance each predict step.
pub const PROCESS_NOISE: f64 = 1e-4;

/// Default measurement noise R of the terminal-voltage sensor (V²).
pub const MEASUREMENT_NOISE: f64 = 1e-2;

/// Lower saturation bound for the SoC estimate.
pub const SOC_MIN: f64 = 0.0;

/// Upper saturation bound for the SoC estimate.
pub const SOC_MAX: f64 = 1.0;

// Scaled unscented-transform parameters. The simplified 3-point scheme in
// `filter::ukf` weights all points equally and does not use these; they are
// kept for the scaled-transform variant and for comparison against
// textbook implementations.

/// Unscented-transform spread parameter α.
pub const SIGMA_ALPHA: f64 = 0.001;

/// Unscented-transform distribution parameter β (2.0 is optimal for
/// Gaussian priors).
pub const SIGMA_BETA: f64 = 2.0;

/// Unscented-transform secondary scaling parameter κ.
pub const SIGMA_KAPPA: f64 = 0.0;
