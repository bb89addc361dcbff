//! Simulation state snapshot — the complete visible state handed to front ends each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{Outcome, SimPhase};
use crate::events::SimEvent;
use crate::types::{Point2D, SimTime};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    /// `None` while idle.
    pub projectile: Option<BodyView>,
    pub launcher: Option<BodyView>,
    /// Present once an intercept course has been computed.
    pub intercept: Option<InterceptView>,
    pub outcome: Option<Outcome>,
    /// Events since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// A moving body for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub origin: Point2D,
    pub position: Point2D,
    pub speed: f64,
}

/// Computed intercept course for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InterceptView {
    pub point: Point2D,
    /// Radians.
    pub launch_angle: f64,
    pub launch_angle_deg: f64,
    pub time_to_intercept: f64,
}
