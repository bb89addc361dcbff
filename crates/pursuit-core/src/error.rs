use core::fmt;

/// Scenario parameter field, used to label rejected inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamField {
    ProjectileX,
    ProjectileY,
    ImpactX,
    LauncherX,
    ProjectileSpeed,
    LauncherSpeed,
    RadarTime,
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectileX => write!(f, "projectile_x"),
            Self::ProjectileY => write!(f, "projectile_y"),
            Self::ImpactX => write!(f, "impact_x"),
            Self::LauncherX => write!(f, "launcher_x"),
            Self::ProjectileSpeed => write!(f, "projectile_speed"),
            Self::LauncherSpeed => write!(f, "launcher_speed"),
            Self::RadarTime => write!(f, "radar_time"),
        }
    }
}

/// Rejection of a scenario before it enters `Running`.
#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioError {
    NonFinite { field: ParamField },
    NonPositiveSpeed { field: ParamField, value: f64 },
    NonPositiveRadarTime { value: f64 },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::NonPositiveSpeed { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::NonPositiveRadarTime { value } => {
                write!(f, "radar_time must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}
