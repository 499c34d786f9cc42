//! Property tests for the filter invariants
//!
//! Covers the invariants that must hold for any input, not just the
//! scenario fixtures: the post-predict clamp, voltage monotonicity in
//! current, and covariance non-negativity.

use cellgauge::{BatteryParams, Ekf, FilterConfig, SocFilter, Ukf};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ekf_predict_clamps_soc_for_any_current(current in -1e12_f64..1e12) {
        let mut ekf = Ekf::new(FilterConfig::default(), BatteryParams::default());
        ekf.predict(current);
        prop_assert!((0.0..=1.0).contains(&ekf.soc()));
    }

    #[test]
    fn ekf_covariance_stays_non_negative(
        current in -2.0_f64..2.0,
        voltage in 3.3_f64..4.2,
    ) {
        let mut ekf = Ekf::new(FilterConfig::default(), BatteryParams::default());
        for _ in 0..5 {
            ekf.predict(current);
            ekf.update(voltage, current).unwrap();
            prop_assert!(ekf.covariance() >= 0.0);
        }
    }

    #[test]
    fn voltage_is_non_increasing_in_current(
        soc in 0.01_f64..=1.0,
        low in 0.0_f64..50.0,
        extra in 0.0_f64..50.0,
    ) {
        let params = BatteryParams::default();
        let v_low = params.voltage(soc, low);
        let v_high = params.voltage(soc, low + extra);
        prop_assert!(v_high <= v_low);
        prop_assert!(v_low.is_finite());
    }

    #[test]
    fn ukf_zero_current_predict_preserves_mean(soc in 0.05_f64..0.95) {
        let config = FilterConfig::default().with_initial_soc(soc);
        let mut ukf = Ukf::new(config, BatteryParams::default());
        ukf.predict(0.0);
        prop_assert!((ukf.soc() - soc).abs() < 1e-9);
    }

    #[test]
    fn ekf_update_never_grows_covariance(
        current in 0.0_f64..5.0,
        voltage in 3.0_f64..4.2,
    ) {
        let mut ekf = Ekf::new(FilterConfig::default(), BatteryParams::default());
        ekf.predict(current);
        let p_predicted = ekf.covariance();
        ekf.update(voltage, current).unwrap();
        prop_assert!(ekf.covariance() <= p_predicted);
    }
}
