//! Battery Model Coefficients
//!
//! Coefficients of the nonlinear terminal-voltage model for a nominal
//! 1 Ah Li-ion cell:
//!
//! ```text
//! v(soc, i) = E0 − R0·i − K/soc + A·exp(−B·soc)
//! ```
//!
//! The exponential term captures the voltage rise near full charge, the
//! `K/soc` term the polarization drop as the cell empties. Values follow
//! the Shepherd/Tremblay battery model family with coefficients for a
//! small consumer Li-ion cell.

/// Coulomb capacity of the cell (C).
///
/// 3600 C = 1 Ah. Divides the per-step charge transfer to convert ampere
/// seconds into SoC fraction.
pub const CELL_CAPACITY_COULOMBS: f64 = 3600.0;

/// Sampling period of the measurement stream (s).
///
/// The Coulomb-counting predict step assumes records arrive at this fixed
/// cadence; the record timestamps are reporting metadata only.
pub const SAMPLE_PERIOD_S: f64 = 1.0;

/// Nominal open-circuit voltage E0 (V).
///
/// Typical Li-ion chemistry nominal voltage.
pub const NOMINAL_VOLTAGE_V: f64 = 3.7;

/// Internal series resistance R0 (Ω).
///
/// Ohmic drop proportional to discharge current.
pub const INTERNAL_RESISTANCE_OHM: f64 = 0.01;

/// Polarization constant K (V).
///
/// Scales the 1/soc voltage drop. Makes the model singular at soc = 0,
/// which is a documented edge condition, not a recoverable error.
pub const POLARIZATION_CONSTANT_V: f64 = 0.1;

/// Exponential-zone amplitude A (V).
///
/// Magnitude of the voltage contribution near full charge.
pub const EXP_AMPLITUDE_V: f64 = 0.3;

/// Exponential-zone decay rate B (1/SoC).
///
/// Controls how quickly the exponential-zone contribution dies off as the
/// cell discharges.
pub const EXP_DECAY_PER_SOC: f64 = 5.0;
