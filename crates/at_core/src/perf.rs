//! Rolling tick-rate and tick-duration accounting.
//!
//! Purely observational: the loop writes one sample per tick and the
//! diagnostics line reads fps / average tick time back out. Nothing in
//! the control path depends on these numbers.

use std::collections::VecDeque;

const DEFAULT_WINDOW: usize = 120;

#[derive(Debug)]
pub struct PerfMonitor {
    window: usize,
    /// Per-tick work duration, seconds
    tick_times: VecDeque<f32>,
    /// Inter-tick spacing, seconds
    intervals: VecDeque<f32>,
    last_tick: Option<f64>,
}

impl Default for PerfMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl PerfMonitor {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            tick_times: VecDeque::new(),
            intervals: VecDeque::new(),
            last_tick: None,
        }
    }

    /// Record one tick finishing at `now` after `elapsed_s` of work.
    pub fn record(&mut self, now: f64, elapsed_s: f32) {
        if let Some(prev) = self.last_tick {
            let dt = (now - prev) as f32;
            if dt > 0.0 {
                push_bounded(&mut self.intervals, dt, self.window);
            }
        }
        self.last_tick = Some(now);
        push_bounded(&mut self.tick_times, elapsed_s.max(0.0), self.window);
    }

    /// Ticks per second over the rolling window; 0 until two ticks
    /// have been recorded.
    pub fn fps(&self) -> f32 {
        let avg = mean(&self.intervals);
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    /// Average tick work duration in milliseconds.
    pub fn avg_tick_ms(&self) -> f32 {
        mean(&self.tick_times) * 1000.0
    }

    pub fn samples(&self) -> usize {
        self.tick_times.len()
    }
}

fn push_bounded(buf: &mut VecDeque<f32>, value: f32, cap: usize) {
    if buf.len() == cap {
        buf.pop_front();
    }
    buf.push_back(value);
}

fn mean(buf: &VecDeque<f32>) -> f32 {
    if buf.is_empty() {
        return 0.0;
    }
    buf.iter().sum::<f32>() / buf.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from_steady_interval() {
        let mut p = PerfMonitor::default();
        let mut now = 0.0;
        for _ in 0..10 {
            p.record(now, 0.002);
            now += 0.016;
        }
        assert!((p.fps() - 62.5).abs() < 0.5);
        assert!((p.avg_tick_ms() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_monitor_reports_zero() {
        let p = PerfMonitor::default();
        assert_eq!(p.fps(), 0.0);
        assert_eq!(p.avg_tick_ms(), 0.0);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut p = PerfMonitor::new(4);
        for i in 0..100 {
            p.record(i as f64, 0.001);
        }
        assert_eq!(p.samples(), 4);
    }
}
