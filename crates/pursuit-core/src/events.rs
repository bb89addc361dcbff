//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::InfeasibleReason;
use crate::scenario::ScenarioParams;
use crate::types::{Point2D, Velocity2D};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new encounter entered `Running`.
    EncounterStarted { params: ScenarioParams },
    /// The radar took its sample of the projectile.
    RadarContact {
        sampled_position: Point2D,
        estimated_speed: f64,
        estimated_impact_x: f64,
    },
    /// An intercept course was computed.
    SolutionComputed {
        intercept_point: Point2D,
        launch_angle: f64,
        time_to_intercept: f64,
        projectile_velocity: Velocity2D,
    },
    /// Launcher reached the projectile.
    Intercepted { position: Point2D, elapsed_secs: f64 },
    /// Projectile went below the ground line.
    GroundImpact { position: Point2D, elapsed_secs: f64 },
    /// No viable intercept course.
    CannotIntercept { reason: InfeasibleReason },
}
