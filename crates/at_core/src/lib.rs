//! # at_core - Real-Time Target Tracking & Aim Smoothing Engine
//!
//! This library turns a noisy, intermittently-updated 3D position of a
//! tracked reference point into a filtered, rate-limited aim vector
//! suitable for driving an external pointing actuator.
//!
//! ## Features
//! - Per-axis Kalman-style smoothing with velocity estimation and
//!   short-horizon prediction
//! - Bounded / velocity-adaptive / proportional / snap drag policies
//! - Threat-scored target selection with distance, angle and role
//!   weighting
//! - Debounced visual-acquisition gate for actuator and fire control
//! - Fixed-interval, single-threaded tick loop with best-effort error
//!   semantics (a failing tick never stops the loop)
//!
//! All host-environment collaborators (entity feed, visual signal, aim
//! actuator) are injected capability traits with no-op defaults, so the
//! whole loop is testable with a simulated clock.

// Game control-loop APIs often require many parameters for state, timing, etc.
#![allow(clippy::too_many_arguments)]

pub mod boundary;
pub mod config;
pub mod drag;
pub mod error;
pub mod filter;
pub mod gate;
pub mod math;
pub mod perf;
pub mod selector;
pub mod tracker;

// Re-export the main building blocks
pub use boundary::{
    AimActuator, EmptyFeed, EntityFeed, NoopActuator, NoopSignal, Observer, TargetCandidate,
    TargetRole, VisualSignal,
};
pub use config::{AimOnSwitch, DragConfig, FilterConfig, GateConfig, SelectorConfig, TrackingConfig};
pub use drag::{DragController, StepPolicy};
pub use error::{Result, TrackError};
pub use filter::{ScalarFilter, VectorFilter};
pub use gate::{AcquisitionLevel, VisualGate};
pub use math::Vec3;
pub use perf::PerfMonitor;
pub use selector::{ScoredCandidate, TargetSelector};
pub use tracker::{StopHandle, TrackingLoop};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
