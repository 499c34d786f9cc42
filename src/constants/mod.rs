//! Constants for cellgauge
//!
//! Centralized, documented constants for the battery model and the filter
//! tuning. All numeric values used by the estimators are defined here with
//! their units, purpose, and source.
//!
//! ## Organization
//!
//! - **Battery**: electrical model coefficients of the simulated Li-ion cell
//! - **Tuning**: filter noise terms, initial conditions, sigma-point scaling
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. When adding new constants, document units and rationale
//! 3. Configuration structs take their defaults from here; nothing reads
//!    these as mutable global state

/// Electrical model coefficients for the Li-ion cell.
pub mod battery;

/// Filter noise terms, initial conditions, and sigma-point scaling.
pub mod tuning;

// Re-export commonly used constants for convenience
pub use battery::{
    CELL_CAPACITY_COULOMBS, EXP_AMPLITUDE_V, EXP_DECAY_PER_SOC, INTERNAL_RESISTANCE_OHM,
    NOMINAL_VOLTAGE_V, POLARIZATION_CONSTANT_V, SAMPLE_PERIOD_S,
};

pub use tuning::{
    INITIAL_COVARIANCE, INITIAL_SOC, MEASUREMENT_NOISE, PROCESS_NOISE, SOC_MAX, SOC_MIN,
};
