//! Simulation engine — the encounter clock and state machine.
//!
//! `SimulationEngine` owns the projectile, the launcher and the interception
//! solver for one encounter, applies queued commands at tick boundaries,
//! advances the clock and produces `SimSnapshot`s. Completely headless, and
//! every tick is plain bounded arithmetic.

use std::collections::VecDeque;

use log::{debug, info, trace, warn};

use pursuit_core::commands::SimCommand;
use pursuit_core::constants::{PROXIMITY_THRESHOLD, VIABILITY_THRESHOLD_DEG};
use pursuit_core::enums::{InfeasibleReason, Outcome, SimPhase};
use pursuit_core::error::ScenarioError;
use pursuit_core::events::SimEvent;
use pursuit_core::scenario::ScenarioParams;
use pursuit_core::state::{BodyView, InterceptView, SimSnapshot};
use pursuit_core::types::{Point2D, SimTime};

use crate::bodies::{Kinematic, KinematicBody, Launcher, Projectile};
use crate::interception::{InterceptionEngine, InterceptionSolution};
use crate::radar::RadarSample;

/// Runtime thresholds for the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Launch angles below this (degrees) are not viable.
    pub viability_threshold_deg: f64,
    /// Launcher-to-projectile distance that counts as an intercept.
    pub proximity_threshold: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viability_threshold_deg: VIABILITY_THRESHOLD_DEG,
            proximity_threshold: PROXIMITY_THRESHOLD,
        }
    }
}

/// Why a computed course cannot be flown, if it cannot.
pub(crate) fn infeasibility(
    config: &SimConfig,
    solution: &InterceptionSolution,
    projectile_origin: Point2D,
) -> Option<InfeasibleReason> {
    if !solution.launch_angle.is_finite()
        || !solution.intercept_point.is_finite()
        || !solution.time_to_intercept.is_finite()
    {
        return Some(InfeasibleReason::NonFiniteSolution);
    }
    let launch_angle_deg = solution.launch_angle_deg();
    if launch_angle_deg < config.viability_threshold_deg {
        Some(InfeasibleReason::UnviableGeometry { launch_angle_deg })
    } else if solution.intercept_point == projectile_origin {
        Some(InfeasibleReason::DegenerateIntercept)
    } else {
        None
    }
}

/// Everything that belongs to one `start()`.
#[derive(Debug, Clone)]
struct Encounter {
    params: ScenarioParams,
    projectile: Projectile,
    launcher: Launcher,
    interception: InterceptionEngine,
}

impl Encounter {
    fn new(params: ScenarioParams) -> Self {
        Self {
            params,
            projectile: Projectile::new(
                params.projectile_origin(),
                params.impact_x,
                params.projectile_speed,
            ),
            launcher: Launcher::new(params.launcher_x, params.launcher_speed),
            interception: InterceptionEngine::new(),
        }
    }
}

/// The simulation engine. One encounter at a time, single writer.
pub struct SimulationEngine {
    config: SimConfig,
    time: SimTime,
    phase: SimPhase,
    encounter: Option<Encounter>,
    outcome: Option<Outcome>,
    command_queue: VecDeque<SimCommand>,
    events: Vec<SimEvent>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            time: SimTime::default(),
            phase: SimPhase::Idle,
            encounter: None,
            outcome: None,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Discard the current encounter and return to `Idle`.
    pub fn reset(&mut self) {
        self.time = SimTime::default();
        self.phase = SimPhase::Idle;
        self.encounter = None;
        self.outcome = None;
        self.events.clear();
    }

    /// Reset, then begin a new encounter.
    ///
    /// Invalid parameters are rejected before anything is touched.
    pub fn start(&mut self, params: ScenarioParams) -> Result<(), ScenarioError> {
        params.validate()?;

        self.reset();
        self.encounter = Some(Encounter::new(params));
        self.phase = SimPhase::Running;
        self.events.push(SimEvent::EncounterStarted { params });
        info!(
            "encounter started: projectile ({}, {}) -> ({}, 0) at {}, launcher ({}, 0) at {}, radar time {}s",
            params.projectile_x,
            params.projectile_y,
            params.impact_x,
            params.projectile_speed,
            params.launcher_x,
            params.launcher_speed,
            params.radar_time
        );
        Ok(())
    }

    /// Queue a command for the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, then advance a running encounter by `dt` seconds.
    ///
    /// Returns the terminal outcome if it was reached on this call.
    pub fn tick(&mut self, dt: f64) -> Option<Outcome> {
        self.process_commands();

        if self.phase != SimPhase::Running {
            return None;
        }
        if !(dt.is_finite() && dt > 0.0) {
            warn!("ignoring tick with non-positive increment {dt}");
            return None;
        }

        self.time.advance(dt);
        let outcome = self.advance_encounter()?;
        self.finish(outcome);
        Some(outcome)
    }

    /// Tick until the encounter ends or `max_ticks` have elapsed.
    ///
    /// Returns the outcome, or `None` if the cap was hit while still running.
    pub fn run_to_completion(&mut self, dt: f64, max_ticks: u64) -> Option<Outcome> {
        for _ in 0..max_ticks {
            if self.command_queue.is_empty() && self.phase != SimPhase::Running {
                break;
            }
            if let Some(outcome) = self.tick(dt) {
                return Some(outcome);
            }
        }
        self.outcome
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn params(&self) -> Option<&ScenarioParams> {
        self.encounter.as_ref().map(|e| &e.params)
    }

    pub fn projectile_position(&self) -> Option<Point2D> {
        self.encounter.as_ref().map(|e| e.projectile.current())
    }

    pub fn launcher_position(&self) -> Option<Point2D> {
        self.encounter.as_ref().map(|e| e.launcher.current())
    }

    pub fn solution(&self) -> Option<&InterceptionSolution> {
        self.encounter.as_ref()?.interception.solution()
    }

    pub fn intercept_point(&self) -> Option<Point2D> {
        self.solution().map(|s| s.intercept_point)
    }

    /// Launch angle in radians.
    pub fn launch_angle(&self) -> Option<f64> {
        self.solution().map(|s| s.launch_angle)
    }

    /// Whether the radar-time solve has run for this encounter.
    pub fn is_intercept_computed(&self) -> bool {
        self.encounter
            .as_ref()
            .is_some_and(|e| e.interception.is_solved())
    }

    /// Current state, draining events accumulated since the last snapshot.
    pub fn snapshot(&mut self) -> SimSnapshot {
        let events = std::mem::take(&mut self.events);
        let body_view = |body: &KinematicBody| BodyView {
            origin: body.origin(),
            position: body.current(),
            speed: body.speed(),
        };

        SimSnapshot {
            time: self.time,
            phase: self.phase,
            projectile: self.encounter.as_ref().map(|e| body_view(e.projectile.body())),
            launcher: self.encounter.as_ref().map(|e| body_view(e.launcher.body())),
            intercept: self.solution().map(|s| InterceptView {
                point: s.intercept_point,
                launch_angle: s.launch_angle,
                launch_angle_deg: s.launch_angle_deg(),
                time_to_intercept: s.time_to_intercept,
            }),
            outcome: self.outcome,
            events,
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::Start { params } => {
                if let Err(err) = self.start(params) {
                    warn!("start rejected: {err}");
                }
            }
            SimCommand::Reset => self.reset(),
        }
    }

    /// One tick of the running encounter at the already-advanced clock.
    fn advance_encounter(&mut self) -> Option<Outcome> {
        let config = self.config;
        let elapsed = self.time.elapsed_secs;
        let encounter = self.encounter.as_mut()?;

        let projectile_position = encounter.projectile.update(elapsed);
        trace!(
            "t={elapsed:.3} projectile=({:.2}, {:.2})",
            projectile_position.x,
            projectile_position.y
        );

        let radar_time = encounter.params.radar_time;
        if elapsed >= radar_time {
            if !encounter.interception.is_solved() {
                // Sampled on the tick that crosses the radar time, still
                // divided by the nominal radar time.
                let sample = RadarSample {
                    origin: encounter.projectile.origin(),
                    sampled: projectile_position,
                    radar_time,
                };
                let launcher = &encounter.launcher;
                let outcome =
                    encounter
                        .interception
                        .solve(&sample, launcher.origin(), launcher.speed());

                if let Some(observation) = encounter.interception.observation() {
                    self.events.push(SimEvent::RadarContact {
                        sampled_position: observation.sampled_position,
                        estimated_speed: observation.estimated_speed,
                        estimated_impact_x: observation.estimated_impact_x,
                    });
                    debug!(
                        "radar: sample ({:.2}, {:.2}), est. speed {:.3}, impact x {:.3}, {:.3} to impact",
                        observation.sampled_position.x,
                        observation.sampled_position.y,
                        observation.estimated_speed,
                        observation.estimated_impact_x,
                        observation.distance_to_impact()
                    );
                }

                if let Ok(solution) = outcome {
                    encounter.launcher.launch(solution.launch_angle);
                    let start = encounter.projectile.origin();
                    let target = encounter.projectile.target();
                    let distance_to_impact = encounter
                        .interception
                        .observation()
                        .map_or(0.0, |o| o.distance_to_impact());
                    self.events.push(SimEvent::SolutionComputed {
                        intercept_point: solution.intercept_point,
                        launch_angle: solution.launch_angle,
                        time_to_intercept: solution.time_to_intercept,
                        projectile_velocity: solution.projectile_velocity,
                    });
                    info!(
                        "solution: projectile ({:.1}, {:.1}) -> ({:.1}, {:.1}), launcher x {:.1}, {:.3} to impact",
                        start.x,
                        start.y,
                        target.x,
                        target.y,
                        encounter.launcher.origin().x,
                        distance_to_impact
                    );
                    info!(
                        "solution: velocity ({:.3}, {:.3}), intercept in {:.3}s at ({:.2}, {:.2}), launch angle {:.2} deg",
                        solution.projectile_velocity.x,
                        solution.projectile_velocity.y,
                        solution.time_to_intercept,
                        solution.intercept_point.x,
                        solution.intercept_point.y,
                        solution.launch_angle_deg()
                    );
                }
            }

            let reason = match encounter.interception.outcome()? {
                Err(failure) => Some(InfeasibleReason::from(failure)),
                Ok(solution) => infeasibility(&config, &solution, encounter.projectile.origin()),
            };
            if let Some(reason) = reason {
                self.events.push(SimEvent::CannotIntercept { reason });
                return Some(Outcome::Infeasible { reason });
            }

            encounter.launcher.update(elapsed - radar_time);
        }

        let launcher_position = encounter.launcher.current();
        if encounter
            .launcher
            .intercepts(&encounter.projectile, config.proximity_threshold)
        {
            self.events.push(SimEvent::Intercepted {
                position: launcher_position,
                elapsed_secs: elapsed,
            });
            Some(Outcome::Succeeded)
        } else if encounter.projectile.is_below_ground() {
            self.events.push(SimEvent::GroundImpact {
                position: projectile_position,
                elapsed_secs: elapsed,
            });
            Some(Outcome::Failed)
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = outcome.phase();
        self.outcome = Some(outcome);
        match outcome {
            Outcome::Infeasible { reason } => info!(
                "tick {}: {} ({reason:?})",
                self.time.tick,
                outcome.message()
            ),
            _ => info!(
                "tick {} (t={:.3}s): {}",
                self.time.tick,
                self.time.elapsed_secs,
                outcome.message()
            ),
        }
    }
}
