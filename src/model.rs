//! Battery Terminal-Voltage Model
//!
//! ## Overview
//!
//! Maps a state-of-charge estimate and a discharge current to the terminal
//! voltage the cell would show. Both filters use this as their nonlinear
//! observation function: the EKF linearizes it through its analytic slope,
//! the sigma-point filter pushes sample points through it directly.
//!
//! ## Physics
//!
//! ```text
//! v(soc, i) = E0 − R0·i − K/soc + A·exp(−B·soc)
//!
//! Where:
//! - E0 = nominal open-circuit voltage
//! - R0·i = ohmic drop under load
//! - K/soc = polarization drop, dominant as the cell empties
//! - A·exp(−B·soc) = exponential zone near full charge
//! ```
//!
//! The model is singular at `soc = 0`: the polarization term divides by
//! zero and the result is an IEEE-754 infinity. Callers keep `soc`
//! strictly positive through the clamping policy of the filters; a zero
//! value is a documented edge condition and is not silently recovered
//! here.

use libm::exp;

use crate::constants::battery;

/// Battery model coefficients.
///
/// Process-wide, read-only configuration shared by both filters. Defaults
/// come from [`crate::constants::battery`]; builder methods allow fitting
/// a different cell without touching global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryParams {
    /// Nominal open-circuit voltage E0 (V).
    pub e0: f64,
    /// Internal series resistance R0 (Ω).
    pub r0: f64,
    /// Polarization constant K (V).
    pub k: f64,
    /// Exponential-zone amplitude A (V).
    pub a: f64,
    /// Exponential-zone decay rate B (1/SoC).
    pub b: f64,
    /// Coulomb capacity (C).
    pub capacity_coulombs: f64,
    /// Fixed sampling period (s).
    pub dt_s: f64,
}

impl Default for BatteryParams {
    fn default() -> Self {
        Self {
            e0: battery::NOMINAL_VOLTAGE_V,
            r0: battery::INTERNAL_RESISTANCE_OHM,
            k: battery::POLARIZATION_CONSTANT_V,
            a: battery::EXP_AMPLITUDE_V,
            b: battery::EXP_DECAY_PER_SOC,
            capacity_coulombs: battery::CELL_CAPACITY_COULOMBS,
            dt_s: battery::SAMPLE_PERIOD_S,
        }
    }
}

impl BatteryParams {
    /// Set the Coulomb capacity (C). 3600 C = 1 Ah.
    pub fn with_capacity(mut self, coulombs: f64) -> Self {
        self.capacity_coulombs = coulombs;
        self
    }

    /// Set the sampling period (s).
    pub fn with_sample_period(mut self, dt_s: f64) -> Self {
        self.dt_s = dt_s;
        self
    }

    /// Set the internal resistance (Ω).
    pub fn with_internal_resistance(mut self, ohms: f64) -> Self {
        self.r0 = ohms;
        self
    }

    /// Predicted terminal voltage for a state of charge under load.
    ///
    /// Pure function of its arguments. `soc` must be strictly positive;
    /// at exactly zero the polarization term produces an infinity that
    /// propagates per IEEE-754 (see the divergence policy in
    /// [`crate::filter`]).
    pub fn voltage(&self, soc: f64, current: f64) -> f64 {
        self.e0 - self.r0 * current - self.k / soc + self.a * exp(-self.b * soc)
    }

    /// Slope of [`Self::voltage`] with respect to `soc`.
    ///
    /// Analytic observation Jacobian used by the EKF:
    /// `dv/dsoc = K/soc² − A·B·exp(−B·soc)`.
    pub fn voltage_slope(&self, soc: f64) -> f64 {
        self.k / (soc * soc) - self.a * self.b * exp(-self.b * soc)
    }

    /// Charge removed per sample as a SoC fraction: `i·dt / capacity`.
    pub fn coulomb_step(&self, current: f64) -> f64 {
        current * self.dt_s / self.capacity_coulombs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_at_half_charge() {
        let params = BatteryParams::default();
        // 3.7 - 0.01 - 0.1/0.5 + 0.3*exp(-2.5)
        let expected = 3.7 - 0.01 - 0.2 + 0.3 * exp(-2.5);
        assert!((params.voltage(0.5, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn voltage_decreases_with_current() {
        let params = BatteryParams::default();
        let v_rest = params.voltage(0.8, 0.0);
        let v_load = params.voltage(0.8, 2.0);
        let v_heavy = params.voltage(0.8, 10.0);
        assert!(v_load < v_rest);
        assert!(v_heavy < v_load);
    }

    #[test]
    fn voltage_finite_over_valid_soc() {
        let params = BatteryParams::default();
        let mut soc = 0.01;
        while soc <= 1.0 {
            assert!(params.voltage(soc, 1.0).is_finite());
            soc += 0.01;
        }
    }

    #[test]
    fn voltage_singular_at_zero_soc() {
        let params = BatteryParams::default();
        assert!(params.voltage(0.0, 1.0).is_infinite());
    }

    #[test]
    fn slope_positive_over_valid_soc() {
        // K/soc² dominates A·B·exp(−B·soc) everywhere in (0, 1], so the
        // terminal voltage rises monotonically with charge.
        let params = BatteryParams::default();
        let mut soc = 0.05;
        while soc <= 1.0 {
            assert!(params.voltage_slope(soc) > 0.0, "slope at soc={}", soc);
            soc += 0.05;
        }
    }

    #[test]
    fn coulomb_step_scales_with_capacity() {
        let params = BatteryParams::default();
        assert!((params.coulomb_step(1.0) - 1.0 / 3600.0).abs() < 1e-15);

        let doubled = params.with_capacity(7200.0);
        assert!((doubled.coulomb_step(1.0) - 1.0 / 7200.0).abs() < 1e-15);
    }
}
