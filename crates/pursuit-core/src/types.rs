//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in simulation space (distance units, Cartesian).
/// x = horizontal, y = altitude above the ground line `y = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in simulation space (distance units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity2D {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// A point on the ground line.
    pub fn on_ground(x: f64) -> Self {
        Self { x, y: 0.0 }
    }

    /// Straight-line distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        crate::math::calc_distance(self.x, self.y, other.x, other.y)
    }

    /// Position reached after travelling at `velocity` for `t` seconds.
    pub fn advanced_by(&self, velocity: Velocity2D, t: f64) -> Point2D {
        crate::math::find_point(self.x, self.y, velocity.x, velocity.y, t)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Velocity2D {
    pub const ZERO: Velocity2D = Velocity2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity of magnitude `speed` pointing from `from` toward `to`.
    ///
    /// Returns `None` when the two points coincide, since no direction exists.
    pub fn toward(from: &Point2D, to: &Point2D, speed: f64) -> Option<Velocity2D> {
        let distance = from.distance_to(to);
        if distance == 0.0 || !distance.is_finite() {
            return None;
        }
        Some(Velocity2D {
            x: crate::math::calc_velocity(from.x, to.x, distance, speed),
            y: crate::math::calc_velocity(from.y, to.y, distance, speed),
        })
    }

    /// Velocity of magnitude `speed` along `angle` (radians, counter-clockwise from +x).
    pub fn from_heading(angle: f64, speed: f64) -> Velocity2D {
        Velocity2D {
            x: speed * angle.cos(),
            y: speed * angle.sin(),
        }
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
