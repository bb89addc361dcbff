//! Radar estimator — infers the projectile's speed and ground impact point
//! from its launch point and one later sample.

use pursuit_core::types::{Point2D, Velocity2D};

use crate::solver::SolveFailure;

/// Value snapshot handed to the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarSample {
    /// Projectile launch point.
    pub origin: Point2D,
    /// Projectile position at `radar_time`.
    pub sampled: Point2D,
    pub radar_time: f64,
}

/// What the radar infers from one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarObservation {
    pub sampled_position: Point2D,
    pub estimated_speed: f64,
    /// Angle of travel measured from the vertical (radians).
    pub travel_angle: f64,
    pub estimated_impact_x: f64,
}

impl RadarObservation {
    pub fn estimated_impact_point(&self) -> Point2D {
        Point2D::on_ground(self.estimated_impact_x)
    }

    /// Distance from the sample to the estimated impact point.
    pub fn distance_to_impact(&self) -> f64 {
        self.sampled_position
            .distance_to(&self.estimated_impact_point())
    }

    /// Estimated projectile velocity from the sample toward the impact point.
    ///
    /// `None` if the sample already sits on the impact point.
    pub fn projectile_velocity(&self) -> Option<Velocity2D> {
        Velocity2D::toward(
            &self.sampled_position,
            &self.estimated_impact_point(),
            self.estimated_speed,
        )
    }
}

/// Estimate speed and impact point from the launch point and the sample.
pub fn estimate(sample: &RadarSample) -> Result<RadarObservation, SolveFailure> {
    let origin = sample.origin;
    let current = sample.sampled;

    let sample_distance = origin.distance_to(&current);
    if !(sample_distance > 0.0 && sample_distance.is_finite()) || !(sample.radar_time > 0.0) {
        return Err(SolveFailure::DegenerateObservation);
    }

    let estimated_speed = sample_distance / sample.radar_time;
    // |dx| <= distance up to rounding
    let travel_angle = ((current.x - origin.x) / sample_distance)
        .clamp(-1.0, 1.0)
        .asin();
    let estimated_impact_x = current.x + current.y * travel_angle.tan();

    if !estimated_speed.is_finite() || !estimated_impact_x.is_finite() {
        return Err(SolveFailure::DegenerateObservation);
    }

    Ok(RadarObservation {
        sampled_position: current,
        estimated_speed,
        travel_angle,
        estimated_impact_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{Kinematic, Projectile};

    fn sample_of(projectile: &Projectile, radar_time: f64) -> RadarSample {
        RadarSample {
            origin: projectile.origin(),
            sampled: projectile.position_at(radar_time),
            radar_time,
        }
    }

    #[test]
    fn test_recovers_speed_and_impact() {
        let projectile = Projectile::new(Point2D::new(100.0, 800.0), 400.0, 100.0);
        let obs = estimate(&sample_of(&projectile, 1.0)).unwrap();
        assert!((obs.estimated_speed - 100.0).abs() < 1e-9);
        assert!((obs.estimated_impact_x - 400.0).abs() < 1e-9);
        let v = obs.projectile_velocity().unwrap();
        assert!((v.x - projectile.velocity().x).abs() < 1e-9);
        assert!((v.y - projectile.velocity().y).abs() < 1e-9);
    }

    #[test]
    fn test_recovers_leftward_trajectory() {
        let projectile = Projectile::new(Point2D::new(900.0, 500.0), 150.0, 250.0);
        let obs = estimate(&sample_of(&projectile, 0.4)).unwrap();
        assert!((obs.estimated_speed - 250.0).abs() < 1e-9);
        assert!((obs.estimated_impact_x - 150.0).abs() < 1e-9);
        assert!(obs.travel_angle < 0.0);
    }

    #[test]
    fn test_vertical_drop() {
        let projectile = Projectile::new(Point2D::new(300.0, 600.0), 300.0, 60.0);
        let obs = estimate(&sample_of(&projectile, 2.0)).unwrap();
        assert_eq!(obs.travel_angle, 0.0);
        assert_eq!(obs.estimated_impact_x, 300.0);
        assert!((obs.distance_to_impact() - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_baseline_is_degenerate() {
        let sample = RadarSample {
            origin: Point2D::new(300.0, 0.0),
            sampled: Point2D::new(300.0, 0.0),
            radar_time: 1.0,
        };
        assert_eq!(estimate(&sample), Err(SolveFailure::DegenerateObservation));
    }

    #[test]
    fn test_non_positive_radar_time_is_degenerate() {
        let sample = RadarSample {
            origin: Point2D::new(0.0, 100.0),
            sampled: Point2D::new(0.0, 90.0),
            radar_time: 0.0,
        };
        assert_eq!(estimate(&sample), Err(SolveFailure::DegenerateObservation));
    }

    #[test]
    fn test_sample_on_ground_has_no_velocity() {
        // Skidding along the ground line: the estimated impact point is the sample itself.
        let sample = RadarSample {
            origin: Point2D::new(0.0, 0.0),
            sampled: Point2D::new(50.0, 0.0),
            radar_time: 1.0,
        };
        let obs = estimate(&sample).unwrap();
        assert_eq!(obs.estimated_impact_x, 50.0);
        assert!(obs.projectile_velocity().is_none());
    }
}
