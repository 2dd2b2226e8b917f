//! 3D estimator: three independent scalar filters, one per axis.

use super::ScalarFilter;
use crate::config::FilterConfig;
use crate::math::Vec3;

/// No cross-axis coupling: each axis carries its own covariance.
#[derive(Debug, Clone)]
pub struct VectorFilter {
    x: ScalarFilter,
    y: ScalarFilter,
    z: ScalarFilter,
}

impl VectorFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            x: ScalarFilter::new(config),
            y: ScalarFilter::new(config),
            z: ScalarFilter::new(config),
        }
    }

    /// Feed one raw position sample and return the smoothed position.
    pub fn update(&mut self, raw: Vec3, now: f64) -> Vec3 {
        Vec3::new(
            self.x.update(raw.x, now),
            self.y.update(raw.y, now),
            self.z.update(raw.z, now),
        )
    }

    /// Estimated velocity (per-axis instantaneous, m/s equivalent).
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.x.velocity(), self.y.velocity(), self.z.velocity())
    }

    /// Velocity magnitude; used to decide when to aim at the predicted
    /// position instead of the smoothed one.
    pub fn speed(&self) -> f32 {
        self.velocity().length()
    }

    /// Extrapolate `horizon` seconds past the last sample.
    pub fn predict_ahead(&self, horizon: f32) -> Vec3 {
        Vec3::new(
            self.x.predict_ahead(horizon),
            self.y.predict_ahead(horizon),
            self.z.predict_ahead(horizon),
        )
    }

    pub fn estimate(&self) -> Vec3 {
        Vec3::new(self.x.estimate(), self.y.estimate(), self.z.estimate())
    }

    pub fn is_initialized(&self) -> bool {
        // Axes are always fed together; x stands for all three.
        self.x.is_initialized()
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut f = VectorFilter::new(&FilterConfig::default());
        let p = Vec3::new(-0.0456, -0.0044, -0.0200);
        assert_eq!(f.update(p, 0.0), p);
    }

    #[test]
    fn test_axes_are_independent() {
        let mut f = VectorFilter::new(&FilterConfig::default());
        f.update(Vec3::new(0.0, 10.0, -5.0), 0.0);
        // Only x moves; y/z estimates must not react to x displacement
        let out = f.update(Vec3::new(1.0, 10.0, -5.0), 0.016);
        assert_eq!(out.y, 10.0);
        assert_eq!(out.z, -5.0);
        assert!(out.x > 0.0 && out.x <= 1.0);
        assert_eq!(f.velocity().y, 0.0);
        assert_eq!(f.velocity().z, 0.0);
    }

    #[test]
    fn test_predict_ahead_extrapolates() {
        let mut f = VectorFilter::new(&FilterConfig::default());
        f.update(Vec3::zero(), 0.0);
        f.update(Vec3::new(1.0, 0.0, 0.0), 1.0);
        let ahead = f.predict_ahead(1.0);
        assert!(ahead.x > f.estimate().x);
        assert_eq!(ahead.y, f.estimate().y);
    }

    #[test]
    fn test_reset_clears_all_axes() {
        let mut f = VectorFilter::new(&FilterConfig::default());
        f.update(Vec3::new(1.0, 2.0, 3.0), 0.0);
        f.reset();
        assert!(!f.is_initialized());
        assert_eq!(f.estimate(), Vec3::zero());
        // Fresh bootstrap after reset
        let p = Vec3::new(7.0, 8.0, 9.0);
        assert_eq!(f.update(p, 100.0), p);
    }
}
