//! Scripted world scenarios for driving the tracking loop offline.
//!
//! A scenario is a JSON file describing the observer, a set of moving
//! targets, and a visual-signal script. The simulation advances on the
//! loop's own interval with an injected clock, so runs are fully
//! deterministic.

use serde::{Deserialize, Serialize};

use at_core::{
    AcquisitionLevel, AimActuator, EntityFeed, Observer, TargetCandidate, TargetRole,
    TrackingConfig, Vec3, VisualSignal,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSpec {
    pub id: u64,
    pub start: Vec3,
    /// Constant velocity, units per second
    #[serde(default)]
    pub velocity: Vec3,
    #[serde(default = "default_health")]
    pub health: f32,
    #[serde(default)]
    pub role: TargetRole,
    #[serde(default)]
    pub occluded: bool,
    /// Health drops to zero once this much simulated time has passed
    #[serde(default)]
    pub dies_at_s: Option<f64>,
}

fn default_health() -> f32 {
    100.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    pub at_s: f64,
    pub level: AcquisitionLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: TrackingConfig,
    pub observer: Observer,
    pub targets: Vec<TargetSpec>,
    /// Signal script; the level of the latest event at or before the
    /// current time applies. Empty script means `None` throughout.
    #[serde(default)]
    pub signal: Vec<SignalEvent>,
}

impl Scenario {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Entity feed backed by the scenario's constant-velocity targets.
pub struct SimFeed {
    observer: Observer,
    targets: Vec<TargetSpec>,
    now: f64,
}

impl SimFeed {
    pub fn new(observer: Observer, targets: Vec<TargetSpec>) -> Self {
        Self { observer, targets, now: 0.0 }
    }

    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }
}

impl EntityFeed for SimFeed {
    fn observer(&self) -> Option<Observer> {
        Some(self.observer)
    }

    fn candidates(&self) -> Vec<TargetCandidate> {
        self.targets
            .iter()
            .map(|t| {
                let alive = t.dies_at_s.map_or(true, |d| self.now < d);
                TargetCandidate {
                    id: t.id,
                    position: t.start + t.velocity * self.now as f32,
                    reference_point: None,
                    health: if alive { t.health } else { 0.0 },
                    role: t.role,
                    occluded: t.occluded,
                }
            })
            .collect()
    }
}

/// Visual signal driven by the scenario script.
pub struct ScriptSignal {
    events: Vec<SignalEvent>,
    now: f64,
}

impl ScriptSignal {
    pub fn new(mut events: Vec<SignalEvent>) -> Self {
        events.sort_by(|a, b| a.at_s.partial_cmp(&b.at_s).unwrap_or(std::cmp::Ordering::Equal));
        Self { events, now: 0.0 }
    }

    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }
}

impl VisualSignal for ScriptSignal {
    fn acquisition(&mut self) -> at_core::Result<AcquisitionLevel> {
        let level = self
            .events
            .iter()
            .take_while(|e| e.at_s <= self.now)
            .last()
            .map(|e| e.level)
            .unwrap_or(AcquisitionLevel::None);
        Ok(level)
    }
}

/// Actuator that counts boundary calls and keeps the last aim.
#[derive(Debug, Default)]
pub struct SummaryActuator {
    pub aim_updates: u64,
    pub fires: u64,
    pub last_aim: Option<Vec3>,
}

impl AimActuator for SummaryActuator {
    fn set_aim(&mut self, aim: Vec3) -> at_core::Result<()> {
        self.aim_updates += 1;
        self.last_aim = Some(aim);
        log::debug!("setAim({:.5}, {:.5}, {:.5})", aim.x, aim.y, aim.z);
        Ok(())
    }

    fn trigger_fire(&mut self) -> at_core::Result<()> {
        self.fires += 1;
        Ok(())
    }
}
