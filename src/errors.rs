//! Error Types for Filter Degeneracy
//!
//! ## Design Philosophy
//!
//! The filter core follows the same rules as the rest of the crate's
//! error handling:
//!
//! 1. **Small Size**: errors are returned from the per-record hot path and
//!    must stay a couple of machine words.
//!
//! 2. **No Heap Allocation**: all error data is inline — the diverged
//!    state values themselves, no `String`.
//!
//! 3. **Copy Semantics**: errors implement `Copy` so they can be returned
//!    and stored without move complications.
//!
//! ## When Errors Occur
//!
//! The recursions themselves cannot fail: they are closed-form scalar
//! arithmetic. What can happen is numerical degeneracy — a zero innovation
//! covariance or a zero SoC feeds an infinity into the state, after which
//! every subsequent estimate is corrupt. In the default
//! [`Propagate`](crate::filter::DivergenceHandling::Propagate) mode this is
//! allowed to happen silently, exactly like the reference behavior. In
//! [`Detect`](crate::filter::DivergenceHandling::Detect) mode the update
//! step surfaces [`FilterError::Diverged`] instead.

use thiserror_no_std::Error;

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Filter errors - kept small for embedded use.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FilterError {
    /// State or covariance left the finite range; the filter estimate is
    /// no longer meaningful and the filter should be reset.
    #[error("filter diverged: soc {soc}, covariance {covariance}")]
    Diverged {
        /// The SoC estimate at the point divergence was detected.
        soc: f64,
        /// The covariance at the point divergence was detected.
        covariance: f64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for FilterError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Diverged { soc, covariance } => {
                defmt::write!(fmt, "diverged: soc {}, cov {}", soc, covariance)
            }
        }
    }
}
