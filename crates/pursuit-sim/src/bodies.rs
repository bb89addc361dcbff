//! Kinematic bodies: the projectile and the launcher.
//!
//! Positions are always recomputed from the origin and the total elapsed
//! time, never integrated tick by tick, so evaluating the same time twice
//! yields the same point.

use pursuit_core::types::{Point2D, Velocity2D};

/// Position state shared by every moving body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    origin: Point2D,
    current: Point2D,
    speed: f64,
}

impl KinematicBody {
    pub fn new(origin: Point2D, speed: f64) -> Self {
        Self {
            origin,
            current: origin,
            speed,
        }
    }

    pub fn origin(&self) -> Point2D {
        self.origin
    }

    /// Position at the latest evaluated time.
    pub fn current(&self) -> Point2D {
        self.current
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

/// Straight-line, constant-velocity motion.
pub trait Kinematic {
    fn body(&self) -> &KinematicBody;

    fn body_mut(&mut self) -> &mut KinematicBody;

    fn velocity(&self) -> Velocity2D;

    /// Position after `t` seconds of motion from the origin. Pure.
    fn position_at(&self, t: f64) -> Point2D {
        self.body().origin.advanced_by(self.velocity(), t)
    }

    /// Evaluate at `t` and cache the result as the current position.
    fn update(&mut self, t: f64) -> Point2D {
        let position = self.position_at(t);
        self.body_mut().current = position;
        position
    }

    fn origin(&self) -> Point2D {
        self.body().origin
    }

    fn current(&self) -> Point2D {
        self.body().current
    }

    fn speed(&self) -> f64 {
        self.body().speed
    }
}

/// Projectile flying from its launch point to a ground target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    body: KinematicBody,
    target: Point2D,
    velocity: Velocity2D,
}

impl Projectile {
    /// The target always sits on the ground line.
    ///
    /// A projectile launched from its own target point has no direction and
    /// stays put.
    pub fn new(origin: Point2D, target_x: f64, speed: f64) -> Self {
        let target = Point2D::on_ground(target_x);
        let velocity = Velocity2D::toward(&origin, &target, speed).unwrap_or(Velocity2D::ZERO);
        Self {
            body: KinematicBody::new(origin, speed),
            target,
            velocity,
        }
    }

    pub fn target(&self) -> Point2D {
        self.target
    }

    /// Whether the projectile has gone below the ground line.
    pub fn is_below_ground(&self) -> bool {
        self.body.current.y < pursuit_core::constants::GROUND_Y
    }
}

impl Kinematic for Projectile {
    fn body(&self) -> &KinematicBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    fn velocity(&self) -> Velocity2D {
        self.velocity
    }
}

/// Ground launcher. Stationary until given a heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launcher {
    body: KinematicBody,
    /// Radians, counter-clockwise from +x.
    heading: Option<f64>,
}

impl Launcher {
    pub fn new(x: f64, speed: f64) -> Self {
        Self {
            body: KinematicBody::new(Point2D::on_ground(x), speed),
            heading: None,
        }
    }

    /// Commit to a straight-line course along `angle`.
    pub fn launch(&mut self, angle: f64) {
        self.heading = Some(angle);
    }

    pub fn is_launched(&self) -> bool {
        self.heading.is_some()
    }

    /// Whether the launcher is strictly within `threshold` of the projectile.
    pub fn intercepts(&self, projectile: &Projectile, threshold: f64) -> bool {
        self.current().distance_to(&projectile.current()) < threshold
    }
}

impl Kinematic for Launcher {
    fn body(&self) -> &KinematicBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    fn velocity(&self) -> Velocity2D {
        match self.heading {
            Some(angle) => Velocity2D::from_heading(angle, self.body.speed),
            None => Velocity2D::ZERO,
        }
    }
}
