//! Scalar point and vector helpers used by the estimator and solver.
//!
//! These operate on bare coordinates so the numerical routines can be
//! exercised without constructing bodies.

use crate::types::Point2D;

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`.
#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

/// Signed velocity component along one axis for travel from `start` to
/// `target` at `speed`, given the full straight-line `distance`.
///
/// Non-finite when `distance == 0`; callers guard against that.
#[inline]
pub fn calc_velocity(start: f64, target: f64, distance: f64, speed: f64) -> f64 {
    speed * (target - start) / distance
}

/// Point reached from `(x, y)` after moving at `(vx, vy)` for `t` seconds.
#[inline]
pub fn find_point(x: f64, y: f64, vx: f64, vy: f64, t: f64) -> Point2D {
    Point2D::new(x + vx * t, y + vy * t)
}
