//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of an encounter.
///
/// `Succeeded`, `Failed` and `Infeasible` are absorbing: only a reset or a
/// fresh start leaves them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimPhase {
    /// No scenario loaded.
    #[default]
    Idle,
    /// Clock advancing.
    Running,
    /// Launcher came within the proximity threshold.
    Succeeded,
    /// Projectile reached the ground first.
    Failed,
    /// No viable intercept course exists.
    Infeasible,
}

impl SimPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Infeasible)
    }
}

/// Why an encounter was classified infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum InfeasibleReason {
    /// Radar sample coincides with the projectile origin, or with the
    /// estimated impact point, so no direction can be inferred.
    DegenerateObservation,
    /// Intercept quadratic has a negative discriminant.
    NoRealIntercept,
    /// Intercept quadratic has no strictly positive, finite root.
    NoPositiveRoot,
    /// Launch angle below the viability threshold.
    UnviableGeometry { launch_angle_deg: f64 },
    /// Intercept point coincides with the projectile launch point.
    DegenerateIntercept,
    /// Computed course contains a NaN or infinite value.
    NonFiniteSolution,
}

/// Terminal classification of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outcome {
    Succeeded,
    Failed,
    Infeasible { reason: InfeasibleReason },
}

impl Outcome {
    /// Phase the state machine settles in for this outcome.
    pub fn phase(&self) -> SimPhase {
        match self {
            Self::Succeeded => SimPhase::Succeeded,
            Self::Failed => SimPhase::Failed,
            Self::Infeasible { .. } => SimPhase::Infeasible,
        }
    }

    /// User-facing notification text.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Succeeded => "Interception Successful!",
            Self::Failed => "Interception Failed!",
            Self::Infeasible { .. } => "Cannot intercept! Projectile is too fast",
        }
    }
}
