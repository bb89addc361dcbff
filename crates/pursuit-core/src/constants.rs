//! Simulation constants and tuning parameters.

/// Reference tick rate (Hz) for callers that drive the clock at a fixed cadence.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the reference tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Encounter thresholds ---

/// Minimum launch angle (degrees) for a viable intercept course.
pub const VIABILITY_THRESHOLD_DEG: f64 = 20.0;

/// Launcher-to-projectile distance counted as a successful intercept.
pub const PROXIMITY_THRESHOLD: f64 = 20.0;

/// Altitude of the ground line. Projectile targets and the launcher sit on it.
pub const GROUND_Y: f64 = 0.0;

// --- Scenario defaults ---

pub const DEFAULT_PROJECTILE_X: f64 = 100.0;
pub const DEFAULT_PROJECTILE_Y: f64 = 800.0;
pub const DEFAULT_IMPACT_X: f64 = 400.0;
pub const DEFAULT_LAUNCHER_X: f64 = 200.0;
/// Default speed for both the projectile and the launcher.
pub const DEFAULT_SPEED: f64 = 100.0;
/// Default radar time (seconds).
pub const DEFAULT_RADAR_TIME: f64 = 1.0;

// --- Advisory input ranges ---
//
// Front ends bound their inputs with these. The core only enforces the
// numeric preconditions in `ScenarioParams::validate`.

/// Step for position and speed inputs.
pub const POSITION_STEP: f64 = 1.0;

pub const PROJECTILE_X_RANGE: (f64, f64) = (1.0, 1000.0);
pub const PROJECTILE_Y_RANGE: (f64, f64) = (50.0, 800.0);
pub const IMPACT_X_RANGE: (f64, f64) = (1.0, 1000.0);
pub const LAUNCHER_X_RANGE: (f64, f64) = (1.0, 1000.0);
pub const SPEED_RANGE: (f64, f64) = (10.0, 1000.0);

/// Step for radar time inputs (seconds).
pub const RADAR_TIME_STEP: f64 = 0.1;
pub const RADAR_TIME_RANGE: (f64, f64) = (0.1, 2.0);

// --- Runs ---

/// Tick cap for unattended runs (sweeps, CLI). 10 simulated minutes at 60 Hz.
pub const DEFAULT_MAX_TICKS: u64 = 36_000;
