//! Visual-acquisition gate.
//!
//! Decouples "a target exists in game state" from "the host's own
//! reticle confirms it": the actuator is only driven while the host
//! reports an engaged acquisition level. The external signal is polled
//! at most once per `poll_interval_s`; between polls the last observed
//! value is returned, so the gate is eventually consistent with the
//! true external state, bounded by the poll interval.

use serde::{Deserialize, Serialize};

use crate::boundary::VisualSignal;
use crate::config::GateConfig;

/// Host-reported classification of what the reticle currently
/// indicates. `None` is the initial state and the mapping of any
/// signal-query failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcquisitionLevel {
    None,
    Body,
    Head,
}

#[derive(Debug)]
pub struct VisualGate {
    config: GateConfig,
    last_state: AcquisitionLevel,
    last_poll: Option<f64>,
}

impl VisualGate {
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            last_state: AcquisitionLevel::None,
            last_poll: None,
        }
    }

    /// Query the external signal, debounced to the configured
    /// interval. Failures are swallowed and observed as `None`.
    pub fn poll(&mut self, signal: &mut dyn VisualSignal, now: f64) -> AcquisitionLevel {
        if let Some(t) = self.last_poll {
            if now - t < self.config.poll_interval_s {
                return self.last_state;
            }
        }
        self.last_poll = Some(now);
        self.last_state = match signal.acquisition() {
            Ok(level) => level,
            Err(err) => {
                log::debug!("visual signal query failed, treating as None: {}", err);
                AcquisitionLevel::None
            }
        };
        self.last_state
    }

    /// True while the last observed level is in the configured
    /// engagement set.
    pub fn is_engaged(&self) -> bool {
        self.config.engage_on.contains(&self.last_state)
    }

    /// True only at the highest acquisition level; fire control
    /// requires this regardless of the engagement set.
    pub fn is_full_acquisition(&self) -> bool {
        self.last_state == AcquisitionLevel::Head
    }

    pub fn last_state(&self) -> AcquisitionLevel {
        self.last_state
    }
}
