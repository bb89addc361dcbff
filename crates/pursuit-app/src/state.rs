//! Types shared between the front end and the loop thread.

use std::time::Duration;

use pursuit_core::commands::SimCommand;
use pursuit_core::constants::{DT, TICK_RATE};
use pursuit_sim::SimConfig;

/// Commands sent from the front end to the loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A command to forward to the simulation engine.
    Sim(SimCommand),
    /// Shut down the loop thread gracefully.
    Shutdown,
}

/// Pacing and engine settings for the loop thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopConfig {
    /// Simulated seconds per tick.
    pub dt: f64,
    /// Wall-clock duration of one tick.
    pub tick_duration: Duration,
    pub sim: SimConfig,
}

/// Nominal wall-clock duration of one tick at the reference rate.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            dt: DT,
            tick_duration: TICK_DURATION,
            sim: SimConfig::default(),
        }
    }
}

impl LoopConfig {
    /// One simulated second per wall-clock second.
    ///
    /// `None` if `dt` is not a usable duration.
    pub fn realtime(dt: f64, sim: SimConfig) -> Option<Self> {
        let tick_duration = Duration::try_from_secs_f64(dt).ok()?;
        Some(Self {
            dt,
            tick_duration,
            sim,
        })
    }
}
