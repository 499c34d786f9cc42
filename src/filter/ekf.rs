//! Extended Kalman Filter for SoC Estimation
//!
//! ## Overview
//!
//! Scalar EKF over a single state (state of charge). The state transition
//! is linear Coulomb counting, so linearization is only needed on the
//! observation side, where the analytic slope of the battery voltage model
//! stands in for the Jacobian:
//!
//! ```text
//! Predict:  soc ← soc − i·dt/Q_batt,  clamp to [0, 1]
//!           p   ← p + q
//! Update:   h   = dv/dsoc at the estimate
//!           s   = h·p·h + r
//!           k   = p·h / s
//!           soc ← soc + k·(z − v(soc, i))
//!           p   ← (1 − k·h)·p
//! ```
//!
//! The clamp runs after every predict and saturates (no wrap). The update
//! step deliberately does not clamp: the estimate may leave [0, 1]
//! transiently until the next predict pulls it back.

use crate::{
    errors::{FilterError, FilterResult},
    filter::{DivergenceHandling, FilterConfig, SocFilter},
    model::BatteryParams,
};

use crate::constants::tuning::{SOC_MAX, SOC_MIN};

/// Extended Kalman filter with scalar state and covariance.
#[derive(Debug, Clone)]
pub struct Ekf {
    /// State-of-charge estimate.
    soc: f64,
    /// Estimate covariance.
    covariance: f64,
    /// Tuning, fixed at construction.
    config: FilterConfig,
    /// Battery model coefficients, fixed at construction.
    params: BatteryParams,
}

impl Ekf {
    /// Create a new EKF from tuning and battery coefficients.
    pub fn new(config: FilterConfig, params: BatteryParams) -> Self {
        Self {
            soc: config.initial_soc,
            covariance: config.initial_covariance,
            config,
            params,
        }
    }

    /// Battery coefficients this filter observes through.
    pub fn params(&self) -> &BatteryParams {
        &self.params
    }

    fn check_divergence(&self) -> FilterResult<()> {
        if self.config.divergence == DivergenceHandling::Detect
            && !(self.soc.is_finite() && self.covariance.is_finite())
        {
            return Err(FilterError::Diverged {
                soc: self.soc,
                covariance: self.covariance,
            });
        }
        Ok(())
    }
}

impl SocFilter for Ekf {
    fn predict(&mut self, current: f64) {
        self.soc -= self.params.coulomb_step(current);
        self.covariance += self.config.process_noise;
        self.soc = self.soc.clamp(SOC_MIN, SOC_MAX);
    }

    fn update(&mut self, measured_voltage: f64, current: f64) -> FilterResult<f64> {
        let predicted = self.params.voltage(self.soc, current);
        let h = self.params.voltage_slope(self.soc);

        let s = h * self.covariance * h + self.config.measurement_noise;
        let gain = self.covariance * h / s;

        self.soc += gain * (measured_voltage - predicted);
        self.covariance = (1.0 - gain * h) * self.covariance;

        self.check_divergence()?;
        Ok(self.soc)
    }

    fn soc(&self) -> f64 {
        self.soc
    }

    fn covariance(&self) -> f64 {
        self.covariance
    }

    fn reset(&mut self) {
        self.soc = self.config.initial_soc;
        self.covariance = self.config.initial_covariance;
    }
}
