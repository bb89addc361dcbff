//! Loop thread — ticks the simulation engine at a fixed cadence and publishes
//! snapshots.
//!
//! The engine is created inside the thread and never shared. Commands arrive
//! via an `mpsc` channel; snapshots go out on another one.

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::debug;

use pursuit_core::commands::SimCommand;
use pursuit_core::enums::SimPhase;
use pursuit_core::state::SimSnapshot;
use pursuit_sim::SimulationEngine;

use crate::state::{LoopCommand, LoopConfig};

/// Front-end side of a running loop thread.
pub struct LoopHandle {
    commands: mpsc::Sender<LoopCommand>,
    snapshots: mpsc::Receiver<SimSnapshot>,
    thread: JoinHandle<()>,
}

impl LoopHandle {
    /// Forward a command to the engine. `false` once the loop has stopped.
    pub fn send(&self, command: SimCommand) -> bool {
        self.commands.send(LoopCommand::Sim(command)).is_ok()
    }

    /// Snapshots published by the loop, in tick order.
    pub fn snapshots(&self) -> &mpsc::Receiver<SimSnapshot> {
        &self.snapshots
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(self) -> thread::Result<()> {
        let _ = self.commands.send(LoopCommand::Shutdown);
        self.thread.join()
    }
}

/// Spawns the loop in a new thread.
pub fn spawn_game_loop(config: LoopConfig) -> io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let (snapshot_tx, snapshot_rx) = mpsc::channel::<SimSnapshot>();

    let thread = thread::Builder::new()
        .name("pursuit-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, snapshot_tx))?;

    Ok(LoopHandle {
        commands: cmd_tx,
        snapshots: snapshot_rx,
        thread,
    })
}

/// The loop. Runs until Shutdown or either channel disconnects.
fn run_game_loop(
    config: LoopConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    snapshot_tx: mpsc::Sender<SimSnapshot>,
) {
    let mut engine = SimulationEngine::new(config.sim);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Sim(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (queued commands apply first)
        engine.tick(config.dt);

        // 3. Publish while something is happening
        let snapshot = engine.snapshot();
        let active = snapshot.phase == SimPhase::Running || !snapshot.events.is_empty();
        if active && snapshot_tx.send(snapshot).is_err() {
            debug!("snapshot receiver dropped, stopping loop");
            return;
        }

        // 4. Sleep until next tick
        next_tick_time += config.tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > config.tick_duration * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_core::enums::Outcome;
    use pursuit_core::scenario::ScenarioParams;
    use std::time::Duration;

    fn fast_config() -> LoopConfig {
        LoopConfig {
            tick_duration: Duration::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Sim(SimCommand::Start {
            params: ScenarioParams::default(),
        }))
        .unwrap();
        tx.send(LoopCommand::Sim(SimCommand::Reset)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Sim(SimCommand::Start { .. })
        ));
        assert!(matches!(commands[1], LoopCommand::Sim(SimCommand::Reset)));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_runs_encounter_to_outcome() {
        let handle = spawn_game_loop(fast_config()).unwrap();
        assert!(handle.send(SimCommand::Start {
            params: ScenarioParams::default(),
        }));

        let mut last_tick = 0;
        let outcome = loop {
            let snapshot = handle
                .snapshots()
                .recv_timeout(Duration::from_secs(10))
                .expect("loop stopped publishing");
            assert!(snapshot.time.tick >= last_tick, "snapshots out of order");
            last_tick = snapshot.time.tick;
            if let Some(outcome) = snapshot.outcome {
                break outcome;
            }
        };

        assert_eq!(outcome, Outcome::Succeeded);
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_idle_loop_publishes_nothing() {
        let handle = spawn_game_loop(fast_config()).unwrap();
        assert!(handle
            .snapshots()
            .recv_timeout(Duration::from_millis(50))
            .is_err());
        handle.shutdown().unwrap();
    }

    #[test]
    fn test_shutdown_stops_thread() {
        let handle = spawn_game_loop(LoopConfig::default()).unwrap();
        handle.shutdown().unwrap();
    }
}
