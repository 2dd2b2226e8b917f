//! Tracking-loop scenario driver.
//!
//! Loads a JSON scenario (observer, scripted targets, signal script),
//! runs the loop with a simulated clock, and prints a JSON summary.
//! This is host-boundary scaffolding around `at_core`; nothing here is
//! part of the control loop itself.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use at_core::{TrackingConfig, TrackingLoop, Vec3};

mod scenario;

use scenario::{Scenario, ScriptSignal, SimFeed, SummaryActuator};

#[derive(Parser)]
#[command(name = "at_cli")]
#[command(about = "Run tracking-loop scenarios", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file through the tracking loop
    Run {
        /// Scenario JSON file path
        #[arg(long)]
        scenario: PathBuf,

        /// Number of ticks to simulate
        #[arg(long, default_value = "600")]
        ticks: u64,

        /// Sleep the tick interval between ticks instead of running
        /// as fast as possible
        #[arg(long, default_value = "false")]
        realtime: bool,
    },

    /// Print the default configuration as JSON
    DefaultConfig {
        /// Output file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct RunSummary {
    ticks: u64,
    locked_target: Option<u64>,
    final_aim: Vec3,
    aim_updates: u64,
    fires: u64,
    fps: f32,
    avg_tick_ms: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scenario, ticks, realtime } => {
            let json = fs::read_to_string(&scenario)
                .with_context(|| format!("reading scenario {}", scenario.display()))?;
            let scenario = Scenario::from_json(&json).context("parsing scenario")?;
            let summary = run_scenario(scenario, ticks, realtime)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::DefaultConfig { out } => {
            let json = serde_json::to_string_pretty(&TrackingConfig::default())?;
            match out {
                Some(path) => fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}

fn run_scenario(scenario: Scenario, ticks: u64, realtime: bool) -> Result<RunSummary> {
    let interval = scenario.config.interval_secs();
    let feed = SimFeed::new(scenario.observer, scenario.targets);
    let signal = ScriptSignal::new(scenario.signal);

    let mut lp = TrackingLoop::new(scenario.config, feed, signal, SummaryActuator::default())
        .context("building tracking loop")?;

    for tick in 0..ticks {
        let now = tick as f64 * interval;
        lp.entities_mut().set_time(now);
        lp.signal_mut().set_time(now);
        lp.tick(now);
        if realtime {
            std::thread::sleep(std::time::Duration::from_secs_f64(interval));
        }
    }

    Ok(RunSummary {
        ticks,
        locked_target: lp.locked_target(),
        final_aim: lp.current_aim(),
        aim_updates: lp.actuator().aim_updates,
        fires: lp.actuator().fires,
        fps: lp.perf().fps(),
        avg_tick_ms: lp.perf().avg_tick_ms(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_core::AcquisitionLevel;
    use crate::scenario::SignalEvent;

    #[test]
    fn test_run_scenario_end_to_end() {
        let scenario = Scenario {
            config: TrackingConfig::default(),
            observer: at_core::Observer {
                entity_id: 0,
                position: Vec3::zero(),
                facing_angle: 0.0,
            },
            targets: vec![scenario::TargetSpec {
                id: 1,
                start: Vec3::new(0.0, 0.3, 0.0),
                velocity: Vec3::zero(),
                health: 100.0,
                role: Default::default(),
                occluded: false,
                dies_at_s: None,
            }],
            signal: vec![SignalEvent { at_s: 0.0, level: AcquisitionLevel::Head }],
        };

        let summary = run_scenario(scenario, 120, false).unwrap();
        assert_eq!(summary.locked_target, Some(1));
        assert!(summary.aim_updates > 0);
        // Stationary target straight ahead: aim converged onto it
        assert!(summary.final_aim.distance(Vec3::new(0.0, 0.3, 0.0)) < 1e-3);
        assert_eq!(summary.fires, 0); // auto_fire off by default
    }
}
