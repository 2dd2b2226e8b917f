//! Host-environment collaborator contracts.
//!
//! The host (game API, device layer, simulator) is reached only
//! through these traits. Each has a no-op default implementation so
//! the loop can be constructed and exercised with no host at all;
//! callers select the real binding at construction time instead of
//! probing for it on every call.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::gate::AcquisitionLevel;
use crate::math::Vec3;

/// Priority classification of a candidate; priority roles get a threat
/// bonus during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRole {
    Normal,
    Priority,
}

impl Default for TargetRole {
    fn default() -> Self {
        TargetRole::Normal
    }
}

/// One candidate record from the entity source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetCandidate {
    pub id: u64,
    /// World-space position
    pub position: Vec3,
    /// Designated anchor to track; falls back to `position` when absent
    pub reference_point: Option<Vec3>,
    /// health <= 0 means invalid/dead
    pub health: f32,
    #[serde(default)]
    pub role: TargetRole,
    /// Line-of-sight blocked between observer and candidate
    #[serde(default)]
    pub occluded: bool,
}

impl TargetCandidate {
    pub fn reference_point(&self) -> Vec3 {
        self.reference_point.unwrap_or(self.position)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// The observing entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Observer {
    /// Identity, used to exclude the observer's own record from the
    /// candidate list
    pub entity_id: u64,
    pub position: Vec3,
    /// Yaw in degrees. Carried through from the host but not used by
    /// the selector's angular-offset approximation (see selector.rs).
    pub facing_angle: f32,
}

/// Source of candidate targets and the observer record.
pub trait EntityFeed {
    fn observer(&self) -> Option<Observer>;
    fn candidates(&self) -> Vec<TargetCandidate>;
}

/// Nullary query for the host's reticle classification. Allowed to
/// fail; the gate maps failure to `AcquisitionLevel::None`.
pub trait VisualSignal {
    fn acquisition(&mut self) -> Result<AcquisitionLevel>;
}

/// Sink for the computed aim vector, plus optional fire control. Both
/// calls are fire-and-forget; failures are logged and swallowed at the
/// loop level, never retried within the same tick.
pub trait AimActuator {
    fn set_aim(&mut self, aim: Vec3) -> Result<()>;

    fn trigger_fire(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Entity feed with no observer and no candidates.
#[derive(Debug, Default)]
pub struct EmptyFeed;

impl EntityFeed for EmptyFeed {
    fn observer(&self) -> Option<Observer> {
        None
    }

    fn candidates(&self) -> Vec<TargetCandidate> {
        Vec::new()
    }
}

/// Signal that never confirms acquisition.
#[derive(Debug, Default)]
pub struct NoopSignal;

impl VisualSignal for NoopSignal {
    fn acquisition(&mut self) -> Result<AcquisitionLevel> {
        Ok(AcquisitionLevel::None)
    }
}

/// Actuator that discards every call.
#[derive(Debug, Default)]
pub struct NoopActuator;

impl AimActuator for NoopActuator {
    fn set_aim(&mut self, _aim: Vec3) -> Result<()> {
        Ok(())
    }
}
