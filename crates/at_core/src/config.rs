//! Tracking loop configuration.
//!
//! Every tunable in the engine lives here as a serde-derived struct
//! with documented defaults. `TrackingConfig::validate()` rejects
//! parameter combinations the numeric contracts assume away (negative
//! noise, inverted step bounds, zero interval).

use serde::{Deserialize, Serialize};

use crate::drag::StepPolicy;
use crate::error::{Result, TrackError};
use crate::gate::AcquisitionLevel;
use crate::math::Vec3;

/// Per-axis estimator noise parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Measurement noise R (default: 0.03)
    pub measurement_noise: f32,
    /// Process noise Q per update (default: 0.00001)
    pub process_noise: f32,
    /// Additional process noise per second of elapsed time (default: 0.0)
    pub process_noise_rate: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            measurement_noise: 0.03,
            process_noise: 0.00001,
            process_noise_rate: 0.0,
        }
    }
}

/// Step-size policy tunables for the drag controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Step-size rule (default: Bounded)
    pub policy: StepPolicy,
    /// Largest aim movement per tick (default: 0.05)
    pub max_step: f32,
    /// Smallest adaptive step (default: 0.01)
    pub min_step: f32,
    /// Adaptive step gain per unit of target speed (default: 0.05)
    pub velocity_influence: f32,
    /// Proportional-policy smoothing factor (default: 0.35)
    pub smoothness: f32,
    /// Proportional-policy speed multiplier (default: 1.0)
    pub aim_speed: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            policy: StepPolicy::Bounded,
            max_step: 0.05,
            min_step: 0.01,
            velocity_influence: 0.05,
            smoothness: 0.35,
            aim_speed: 1.0,
        }
    }
}

/// Visual-acquisition gate tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Minimum seconds between external signal queries (default: 0.05)
    pub poll_interval_s: f64,
    /// Acquisition levels that count as "engaged". Include `None` to
    /// effectively disable gating. (default: [Body, Head])
    pub engage_on: Vec<AcquisitionLevel>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            poll_interval_s: 0.05,
            engage_on: vec![AcquisitionLevel::Body, AcquisitionLevel::Head],
        }
    }
}

/// Target selection tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Candidates beyond this distance are rejected (default: 300.0)
    pub max_distance: f32,
    /// Angular tolerance from the forward axis, degrees (default: 60.0)
    pub fov_deg: f32,
    /// Accept candidates flagged as occluded (default: false)
    pub allow_occluded: bool,
    /// Minimum seconds between ranked-cache recomputes (default: 0.1)
    pub update_rate_s: f64,
    /// Angular offset below which the angle bonus applies, degrees
    /// (default: 15.0)
    pub close_angle_deg: f32,
    /// Threat multiplier for near-axis candidates, < 1 favors them
    /// (default: 0.8)
    pub angle_bonus: f32,
    /// Threat multiplier for priority-role candidates (default: 0.7)
    pub role_bonus: f32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_distance: 300.0,
            fov_deg: 60.0,
            allow_occluded: false,
            update_rate_s: 0.1,
            close_angle_deg: 15.0,
            angle_bonus: 0.8,
            role_bonus: 0.7,
        }
    }
}

/// What happens to the persistent aim vector when the locked target
/// changes. The estimators always reset; the aim either stays in place
/// and decays toward the new target under the normal drag policy, or
/// snaps back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimOnSwitch {
    Keep,
    Reset,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Tick interval in milliseconds (default: 16, ~60 Hz)
    pub interval_ms: u64,
    /// Aim at the predicted position instead of the smoothed one when
    /// estimated target speed exceeds this (default: 5.0)
    pub predict_speed_threshold: f32,
    /// Prediction horizon in seconds (default: 0.05)
    pub predict_horizon_s: f32,
    /// Recoil compensation, subtracted from the filtered target
    /// (per-weapon; default: zero)
    pub recoil: Vec3,
    /// Invoke the fire boundary on full acquisition (default: false)
    pub auto_fire: bool,
    /// Aim handling on target switch (default: Keep)
    pub aim_on_switch: AimOnSwitch,

    pub filter: FilterConfig,
    pub drag: DragConfig,
    pub gate: GateConfig,
    pub selector: SelectorConfig,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 16,
            predict_speed_threshold: 5.0,
            predict_horizon_s: 0.05,
            recoil: Vec3::zero(),
            auto_fire: false,
            aim_on_switch: AimOnSwitch::Keep,
            filter: FilterConfig::default(),
            drag: DragConfig::default(),
            gate: GateConfig::default(),
            selector: SelectorConfig::default(),
        }
    }
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: &str) -> TrackError {
            TrackError::InvalidParameter(msg.to_string())
        }

        if self.interval_ms == 0 {
            return Err(invalid("interval_ms must be > 0"));
        }
        if self.predict_horizon_s < 0.0 {
            return Err(invalid("predict_horizon_s must be >= 0"));
        }
        if !self.recoil.is_finite() {
            return Err(invalid("recoil must be finite"));
        }

        if self.filter.measurement_noise <= 0.0 {
            return Err(invalid("filter.measurement_noise must be > 0"));
        }
        if self.filter.process_noise < 0.0 || self.filter.process_noise_rate < 0.0 {
            return Err(invalid("filter process noise must be >= 0"));
        }

        if self.drag.max_step <= 0.0 {
            return Err(invalid("drag.max_step must be > 0"));
        }
        if self.drag.min_step < 0.0 || self.drag.min_step > self.drag.max_step {
            return Err(invalid("drag.min_step must be in [0, max_step]"));
        }
        if self.drag.velocity_influence < 0.0 {
            return Err(invalid("drag.velocity_influence must be >= 0"));
        }
        if self.drag.smoothness < 0.0 || self.drag.aim_speed < 0.0 {
            return Err(invalid("drag.smoothness and drag.aim_speed must be >= 0"));
        }

        if self.gate.poll_interval_s < 0.0 {
            return Err(invalid("gate.poll_interval_s must be >= 0"));
        }

        if self.selector.max_distance <= 0.0 {
            return Err(invalid("selector.max_distance must be > 0"));
        }
        if self.selector.fov_deg <= 0.0 || self.selector.fov_deg > 180.0 {
            return Err(invalid("selector.fov_deg must be in (0, 180]"));
        }
        if self.selector.update_rate_s < 0.0 {
            return Err(invalid("selector.update_rate_s must be >= 0"));
        }
        if self.selector.angle_bonus <= 0.0 || self.selector.role_bonus <= 0.0 {
            return Err(invalid("selector bonuses must be > 0"));
        }

        Ok(())
    }

    /// Tick interval in seconds, for simulated clocks.
    pub fn interval_secs(&self) -> f64 {
        self.interval_ms as f64 / 1000.0
    }
}
