//! Drag controller: advances the persistent aim vector toward the
//! filtered target under a selectable step-size rule.
//!
//! All four policies share the same state (the caller-owned aim
//! accumulator) and differ only in how far one tick may move it, so
//! they are configuration choices on one controller rather than
//! separate components.

use serde::{Deserialize, Serialize};

use crate::config::DragConfig;
use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepPolicy {
    /// At most `max_step` per tick; snaps exactly onto the target once
    /// within one step. Bounded-rate convergence, no overshoot.
    Bounded,
    /// Bounded rule with a step scaled by target speed, clamped to
    /// [min_step, max_step]. Faster targets get a larger step.
    VelocityAdaptive,
    /// Exponential approach: moves by a fixed fraction of the residual
    /// each tick, never exactly reaching the target.
    Proportional,
    /// Zero-lag: jump straight onto the target.
    Snap,
}

#[derive(Debug, Clone)]
pub struct DragController {
    config: DragConfig,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self { config }
    }

    /// Advance `current` one tick toward `target`. `target_speed` is
    /// the estimator's velocity magnitude; only the adaptive policy
    /// reads it.
    pub fn advance(&self, current: &mut Vec3, target: Vec3, target_speed: f32) {
        match self.config.policy {
            StepPolicy::Bounded => {
                step_toward(current, target, self.config.max_step);
            }
            StepPolicy::VelocityAdaptive => {
                step_toward(current, target, self.effective_step(target_speed));
            }
            StepPolicy::Proportional => {
                // Factor clamped to [0, 1] inside lerp: aggressive
                // smoothness * aim_speed tunings degrade to Snap
                // instead of overshooting.
                *current = current.lerp(target, self.config.smoothness * self.config.aim_speed);
            }
            StepPolicy::Snap => {
                *current = target;
            }
        }
    }

    /// Speed-scaled step for the adaptive policy, always within
    /// [min_step, max_step].
    pub fn effective_step(&self, target_speed: f32) -> f32 {
        let speed = if target_speed.is_finite() { target_speed.abs() } else { 0.0 };
        (self.config.min_step + speed * self.config.velocity_influence)
            .clamp(self.config.min_step, self.config.max_step)
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }
}

/// Move `current` toward `target` by at most `step` (Euclidean); snap
/// exactly onto the target when the remaining distance is within one
/// step.
fn step_toward(current: &mut Vec3, target: Vec3, step: f32) {
    let delta = target - *current;
    let dist = delta.length();
    if dist <= step {
        *current = target;
    } else {
        *current += delta.normalize() * step;
    }
}
