//! Recursive state estimation.
//!
//! One Kalman-style scalar filter per axis, composed into a 3D
//! estimator. Axes are filtered independently with no cross-axis
//! covariance; a full 6-state filter would model correlated axes, but
//! the tuning constants and tests assume axis independence, so the
//! simplification is kept deliberately.

mod scalar;
mod vector;

pub use scalar::ScalarFilter;
pub use vector::VectorFilter;

/// Minimum elapsed time between samples, in seconds. Floors `dt` so
/// velocity estimation never divides by a vanishing interval.
pub(crate) const MIN_DT_SECS: f32 = 0.001;
