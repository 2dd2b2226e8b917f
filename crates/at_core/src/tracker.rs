//! Fixed-interval tracking loop.
//!
//! One tick: re-validate the locked target, feed its reference point
//! through the 3-axis estimator, compensate recoil, advance the aim
//! under the drag policy, emit to the actuator. Everything is
//! best-effort: a tick that finds no target or hits a boundary failure
//! logs and leaves the loop running.
//!
//! Single logical thread of control. All mutable state (aim
//! accumulator, estimator internals, selector cache) is owned here and
//! never shared; timestamps are injected so tests drive the loop with
//! a simulated clock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::boundary::{AimActuator, EntityFeed, TargetCandidate, VisualSignal};
use crate::config::{AimOnSwitch, TrackingConfig};
use crate::drag::DragController;
use crate::error::Result;
use crate::filter::VectorFilter;
use crate::gate::VisualGate;
use crate::math::Vec3;
use crate::perf::PerfMonitor;
use crate::selector::TargetSelector;

pub struct TrackingLoop<F, S, A>
where
    F: EntityFeed,
    S: VisualSignal,
    A: AimActuator,
{
    config: TrackingConfig,
    entities: F,
    signal: S,
    actuator: A,

    filter: VectorFilter,
    drag: DragController,
    gate: VisualGate,
    selector: TargetSelector,
    perf: PerfMonitor,

    current_aim: Vec3,
    locked_target: Option<u64>,
    running: bool,
    stop_requested: Arc<AtomicBool>,
    tick_count: u64,
}

/// Cancellation handle for a blocking `run`. Cloneable and sendable;
/// `stop` sets a flag the loop observes at the top of its next
/// scheduled iteration (in-flight work finishes).
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl<F, S, A> TrackingLoop<F, S, A>
where
    F: EntityFeed,
    S: VisualSignal,
    A: AimActuator,
{
    pub fn new(config: TrackingConfig, entities: F, signal: S, actuator: A) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            filter: VectorFilter::new(&config.filter),
            drag: DragController::new(config.drag.clone()),
            gate: VisualGate::new(config.gate.clone()),
            selector: TargetSelector::new(config.selector.clone()),
            perf: PerfMonitor::default(),
            config,
            entities,
            signal,
            actuator,
            current_aim: Vec3::zero(),
            locked_target: None,
            running: false,
            stop_requested: Arc::new(AtomicBool::new(false)),
            tick_count: 0,
        })
    }

    /// Run one tick at injected time `now` (seconds).
    pub fn tick(&mut self, now: f64) {
        let started = Instant::now();
        self.tick_count += 1;

        self.tick_inner(now);

        self.perf.record(now, started.elapsed().as_secs_f32());
        log::debug!(
            "tick={} aim=({:.5}, {:.5}, {:.5}) fps={:.1} avg_tick_ms={:.3}",
            self.tick_count,
            self.current_aim.x,
            self.current_aim.y,
            self.current_aim.z,
            self.perf.fps(),
            self.perf.avg_tick_ms(),
        );
    }

    fn tick_inner(&mut self, now: f64) {
        let observer = match self.entities.observer() {
            Some(o) => o,
            None => {
                self.drop_target("no observer");
                return;
            }
        };
        let candidates = self.entities.candidates();
        self.selector.refresh(&candidates, &observer, now);

        let target = match self.resolve_target(&candidates) {
            Some(t) => t,
            None => {
                self.drop_target("no target available");
                return;
            }
        };

        let smoothed = self.filter.update(target.reference_point(), now);
        let speed = self.filter.speed();

        // Lead fast movers: aim at the short-horizon prediction instead
        // of the (lagging) smoothed position.
        let tracked = if speed > self.config.predict_speed_threshold {
            self.filter.predict_ahead(self.config.predict_horizon_s)
        } else {
            smoothed
        };
        let compensated = tracked - self.config.recoil;

        let level = self.gate.poll(&mut self.signal, now);
        if !self.gate.is_engaged() {
            // Filter stays warm; aim and actuator are held until the
            // host confirms acquisition.
            log::debug!("gate not engaged ({:?}), holding aim", level);
            return;
        }

        self.drag.advance(&mut self.current_aim, compensated, speed);
        if let Err(err) = self.actuator.set_aim(self.current_aim) {
            log::warn!("aim actuator failed: {}", err);
        }

        if self.config.auto_fire && self.gate.is_full_acquisition() {
            if let Err(err) = self.actuator.trigger_fire() {
                log::warn!("fire actuator failed: {}", err);
            }
        }
    }

    /// Keep the locked target while it is still present and valid;
    /// otherwise take the selector's best pick and re-initialize the
    /// estimator (velocity continuity across unrelated targets would
    /// corrupt the motion model).
    fn resolve_target(&mut self, candidates: &[TargetCandidate]) -> Option<TargetCandidate> {
        if let Some(id) = self.locked_target {
            if let Some(c) = candidates.iter().find(|c| c.id == id) {
                if c.is_alive() && (self.config.selector.allow_occluded || !c.occluded) {
                    return Some(c.clone());
                }
            }
        }

        // Cache may trail the live list by up to update_rate_s; accept
        // the pick only if it is alive right now, and hand back the
        // live record so the estimator bootstraps on the current
        // position rather than a stale cached one.
        let pick_id = self.selector.best().map(|s| s.candidate.id)?;
        let live = candidates.iter().find(|c| c.id == pick_id && c.is_alive())?.clone();

        if self.locked_target != Some(live.id) {
            log::debug!("locking target {} (was {:?})", live.id, self.locked_target);
            self.locked_target = Some(live.id);
            self.filter.reset();
            if self.config.aim_on_switch == AimOnSwitch::Reset {
                self.current_aim = Vec3::zero();
            }
        }
        Some(live)
    }

    fn drop_target(&mut self, reason: &str) {
        if self.locked_target.is_some() {
            log::debug!("target lost: {}", reason);
        } else {
            log::debug!("idle: {}", reason);
        }
        self.locked_target = None;
        self.filter.reset();
    }

    /// Blocking fixed-interval driver. The next tick is scheduled
    /// after the current one completes, so an overrunning tick delays
    /// the next one rather than skipping or re-entering. Cancellation
    /// comes through `stop`/`stop_handle`: the flag is checked at the
    /// top of each iteration, and a stop requested before `run` starts
    /// cancels it before the first tick.
    pub fn run(&mut self, max_ticks: Option<u64>) {
        self.running = true;
        let interval = Duration::from_millis(self.config.interval_ms);
        let epoch = Instant::now();
        let mut ticks = 0u64;
        loop {
            if self.stop_requested.load(Ordering::Relaxed) {
                break;
            }
            self.tick(epoch.elapsed().as_secs_f64());
            ticks += 1;
            if let Some(max) = max_ticks {
                if ticks >= max {
                    break;
                }
            }
            std::thread::sleep(interval);
        }
        // Consume the request so the loop is restartable.
        self.stop_requested.store(false, Ordering::Relaxed);
        self.running = false;
    }

    /// Request cancellation; observed at the top of the next scheduled
    /// iteration, in-flight work finishes.
    pub fn stop(&self) {
        self.stop_requested.store(true, Ordering::Relaxed);
    }

    /// Handle for stopping a blocking `run` from outside the borrow,
    /// e.g. another thread or a signal hook.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.stop_requested.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Per-weapon recoil override, applied from the next tick on.
    pub fn set_recoil(&mut self, recoil: Vec3) {
        self.config.recoil = recoil;
    }

    pub fn current_aim(&self) -> Vec3 {
        self.current_aim
    }

    pub fn locked_target(&self) -> Option<u64> {
        self.locked_target
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    pub fn filter(&self) -> &VectorFilter {
        &self.filter
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn entities_mut(&mut self) -> &mut F {
        &mut self.entities
    }

    pub fn signal_mut(&mut self) -> &mut S {
        &mut self.signal
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }
}
