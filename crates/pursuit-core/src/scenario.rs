//! Scenario parameters supplied by the caller when starting an encounter.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ParamField, ScenarioError};
use crate::types::Point2D;

/// Everything needed to start one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Projectile launch position.
    pub projectile_x: f64,
    pub projectile_y: f64,
    /// Ground x the projectile is aimed at.
    pub impact_x: f64,
    /// Launcher ground position.
    pub launcher_x: f64,
    pub projectile_speed: f64,
    pub launcher_speed: f64,
    /// Delay (seconds) before the single radar sample.
    pub radar_time: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            projectile_x: DEFAULT_PROJECTILE_X,
            projectile_y: DEFAULT_PROJECTILE_Y,
            impact_x: DEFAULT_IMPACT_X,
            launcher_x: DEFAULT_LAUNCHER_X,
            projectile_speed: DEFAULT_SPEED,
            launcher_speed: DEFAULT_SPEED,
            radar_time: DEFAULT_RADAR_TIME,
        }
    }
}

impl ScenarioParams {
    pub fn projectile_origin(&self) -> Point2D {
        Point2D::new(self.projectile_x, self.projectile_y)
    }

    pub fn impact_point(&self) -> Point2D {
        Point2D::on_ground(self.impact_x)
    }

    pub fn launcher_origin(&self) -> Point2D {
        Point2D::on_ground(self.launcher_x)
    }

    fn fields(&self) -> [(ParamField, f64); 7] {
        [
            (ParamField::ProjectileX, self.projectile_x),
            (ParamField::ProjectileY, self.projectile_y),
            (ParamField::ImpactX, self.impact_x),
            (ParamField::LauncherX, self.launcher_x),
            (ParamField::ProjectileSpeed, self.projectile_speed),
            (ParamField::LauncherSpeed, self.launcher_speed),
            (ParamField::RadarTime, self.radar_time),
        ]
    }

    /// Check the numeric preconditions an encounter needs.
    ///
    /// All values must be finite, both speeds and the radar time positive.
    /// The advisory input ranges are not enforced here.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if let Some((field, _)) = self.fields().into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ScenarioError::NonFinite { field });
        }
        for (field, value) in [
            (ParamField::ProjectileSpeed, self.projectile_speed),
            (ParamField::LauncherSpeed, self.launcher_speed),
        ] {
            if value <= 0.0 {
                return Err(ScenarioError::NonPositiveSpeed { field, value });
            }
        }
        if self.radar_time <= 0.0 {
            return Err(ScenarioError::NonPositiveRadarTime {
                value: self.radar_time,
            });
        }
        Ok(())
    }

    /// Fields that fall outside the advisory input ranges front ends use.
    pub fn out_of_range_fields(&self) -> Vec<ParamField> {
        self.fields()
            .into_iter()
            .filter(|&(field, value)| {
                let (min, max) = advisory_range(field);
                !(min..=max).contains(&value)
            })
            .map(|(field, _)| field)
            .collect()
    }
}

/// Advisory `(min, max)` input range for a field.
pub fn advisory_range(field: ParamField) -> (f64, f64) {
    match field {
        ParamField::ProjectileX => PROJECTILE_X_RANGE,
        ParamField::ProjectileY => PROJECTILE_Y_RANGE,
        ParamField::ImpactX => IMPACT_X_RANGE,
        ParamField::LauncherX => LAUNCHER_X_RANGE,
        ParamField::ProjectileSpeed | ParamField::LauncherSpeed => SPEED_RANGE,
        ParamField::RadarTime => RADAR_TIME_RANGE,
    }
}

/// Input step for a field.
pub fn advisory_step(field: ParamField) -> f64 {
    match field {
        ParamField::RadarTime => RADAR_TIME_STEP,
        _ => POSITION_STEP,
    }
}
