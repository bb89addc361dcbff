//! Interception engine — runs the radar estimator and the solver once per
//! encounter and caches the result.
//!
//! Stored on the encounter owned by `SimulationEngine`; the driving clock may
//! call `solve` on every tick past the radar time, only the first call computes.

use log::debug;

use pursuit_core::types::{Point2D, Velocity2D};

use crate::radar::{self, RadarObservation, RadarSample};
use crate::solver::{InterceptQuadratic, SolveFailure};

/// The launcher's computed course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptionSolution {
    /// Radians, `atan2(dy, dx)` from the launcher origin to the intercept point.
    pub launch_angle: f64,
    pub intercept_point: Point2D,
    /// Seconds after the radar sample.
    pub time_to_intercept: f64,
    /// Projectile velocity as estimated by the radar.
    pub projectile_velocity: Velocity2D,
}

impl InterceptionSolution {
    pub fn launch_angle_deg(&self) -> f64 {
        self.launch_angle.to_degrees()
    }
}

pub type SolveOutcome = Result<InterceptionSolution, SolveFailure>;

/// Solve-once cache for one encounter.
#[derive(Debug, Clone, Default)]
pub struct InterceptionEngine {
    observation: Option<RadarObservation>,
    outcome: Option<SolveOutcome>,
}

impl InterceptionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a solve has already run (successfully or not).
    pub fn is_solved(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<SolveOutcome> {
        self.outcome
    }

    pub fn solution(&self) -> Option<&InterceptionSolution> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn observation(&self) -> Option<&RadarObservation> {
        self.observation.as_ref()
    }

    /// Compute the intercept course, or return the cached outcome if one exists.
    pub fn solve(
        &mut self,
        sample: &RadarSample,
        launcher_origin: Point2D,
        launcher_speed: f64,
    ) -> SolveOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        let outcome = match radar::estimate(sample) {
            Ok(observation) => {
                self.observation = Some(observation);
                plan_intercept(&observation, launcher_origin, launcher_speed)
            }
            Err(failure) => Err(failure),
        };
        self.outcome = Some(outcome);
        outcome
    }
}

/// Turn a radar observation into a launcher course.
pub fn plan_intercept(
    observation: &RadarObservation,
    launcher_origin: Point2D,
    launcher_speed: f64,
) -> SolveOutcome {
    let velocity = observation
        .projectile_velocity()
        .ok_or(SolveFailure::DegenerateObservation)?;

    let quadratic = InterceptQuadratic::new(
        observation.sampled_position,
        velocity,
        launcher_origin,
        launcher_speed,
    );
    debug!(
        "intercept quadratic a={:.6e} b={:.6e} c={:.6e} roots={:?}",
        quadratic.a,
        quadratic.b,
        quadratic.c,
        quadratic.roots()
    );

    let time_to_intercept = quadratic.intercept_time()?;
    let intercept_point = observation
        .sampled_position
        .advanced_by(velocity, time_to_intercept);
    let launch_angle =
        (intercept_point.y - launcher_origin.y).atan2(intercept_point.x - launcher_origin.x);

    Ok(InterceptionSolution {
        launch_angle,
        intercept_point,
        time_to_intercept,
        projectile_velocity: velocity,
    })
}
