//! Battery state-of-charge estimation for cellgauge
//!
//! Runs two scalar Bayesian filters — an extended Kalman filter and a
//! simplified sigma-point filter — side by side over a stream of
//! `(time, current, terminal voltage)` records and reports both SoC
//! estimates per record.
//!
//! Key constraints:
//! - Core is no_std, `f64` scalar state, no heap allocation
//! - One predict/update pair per record, deterministic and bounded
//! - The two filters share a config but never share state
//!
//! ```no_run
//! use cellgauge::{BatteryParams, FilterConfig, Record, SocEstimator};
//!
//! let mut estimator = SocEstimator::new(FilterConfig::default(), BatteryParams::default());
//!
//! let record = Record { timestamp_s: 0, current_a: 1.0, voltage_v: 3.65 };
//! match estimator.step(&record) {
//!     Ok(estimate) => {}, // report estimate.ekf_soc / estimate.ukf_soc
//!     Err(e) => {},       // filter diverged (detect mode only)
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod errors;
pub mod filter;
pub mod model;
pub mod runner;
pub mod stream;

// Public API
pub use errors::{FilterError, FilterResult};
pub use filter::{DivergenceHandling, Ekf, FilterConfig, SocFilter, Ukf};
pub use model::BatteryParams;
pub use runner::{RunError, SocEstimator};
pub use stream::{Estimate, Record};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
