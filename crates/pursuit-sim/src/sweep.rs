//! Seeded scenario sweep.
//!
//! Draws random scenarios on the advisory input grid and runs each one to
//! completion in its own engine. Scenarios are drawn sequentially from a
//! single `ChaCha8Rng`, so the same seed always yields the same report no
//! matter how the runs are scheduled.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use pursuit_core::constants::{DEFAULT_MAX_TICKS, DT};
use pursuit_core::enums::{InfeasibleReason, Outcome};
use pursuit_core::error::{ParamField, ScenarioError};
use pursuit_core::scenario::{advisory_range, advisory_step, ScenarioParams};

use crate::engine::{SimConfig, SimulationEngine};

/// Sweep parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    pub seed: u64,
    pub runs: usize,
    /// Tick increment in seconds.
    pub dt: f64,
    /// Per-run tick cap.
    pub max_ticks: u64,
    pub sim: SimConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            runs: 1000,
            dt: DT,
            max_ticks: DEFAULT_MAX_TICKS,
            sim: SimConfig::default(),
        }
    }
}

/// Aggregate results of a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub seed: u64,
    pub runs: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Infeasible encounters keyed by reason kind.
    pub infeasible: BTreeMap<String, usize>,
    /// Runs still going when the tick cap was reached.
    pub capped: usize,
    /// Scenarios that failed parameter validation and never ran.
    pub rejected: usize,
}

impl SweepReport {
    pub fn infeasible_total(&self) -> usize {
        self.infeasible.values().sum()
    }

    fn record(&mut self, result: Result<Option<Outcome>, ScenarioError>) {
        match result {
            Ok(Some(Outcome::Succeeded)) => self.succeeded += 1,
            Ok(Some(Outcome::Failed)) => self.failed += 1,
            Ok(Some(Outcome::Infeasible { reason })) => {
                *self.infeasible.entry(reason_key(&reason).to_owned()).or_default() += 1;
            }
            Ok(None) => self.capped += 1,
            Err(_) => self.rejected += 1,
        }
    }
}

fn reason_key(reason: &InfeasibleReason) -> &'static str {
    match reason {
        InfeasibleReason::DegenerateObservation => "degenerate_observation",
        InfeasibleReason::NoRealIntercept => "no_real_intercept",
        InfeasibleReason::NoPositiveRoot => "no_positive_root",
        InfeasibleReason::UnviableGeometry { .. } => "unviable_geometry",
        InfeasibleReason::DegenerateIntercept => "degenerate_intercept",
        InfeasibleReason::NonFiniteSolution => "non_finite_solution",
    }
}

/// Draw a value for `field` on its advisory grid.
fn sample_field(rng: &mut ChaCha8Rng, field: ParamField) -> f64 {
    let (min, max) = advisory_range(field);
    let step = advisory_step(field);
    let steps = ((max - min) / step).round() as u32;
    let value = min + f64::from(rng.gen_range(0..=steps)) * step;
    // 0.1 + 2 * 0.1 is not 0.3
    let per_unit = (1.0 / step).round();
    (value * per_unit).round() / per_unit
}

/// Draw one scenario within the advisory ranges.
pub fn sample_scenario(rng: &mut ChaCha8Rng) -> ScenarioParams {
    ScenarioParams {
        projectile_x: sample_field(rng, ParamField::ProjectileX),
        projectile_y: sample_field(rng, ParamField::ProjectileY),
        impact_x: sample_field(rng, ParamField::ImpactX),
        launcher_x: sample_field(rng, ParamField::LauncherX),
        projectile_speed: sample_field(rng, ParamField::ProjectileSpeed),
        launcher_speed: sample_field(rng, ParamField::LauncherSpeed),
        radar_time: sample_field(rng, ParamField::RadarTime),
    }
}

/// Run one scenario in a fresh engine.
///
/// `Ok(None)` if the tick cap was reached first.
pub fn run_scenario(
    params: ScenarioParams,
    sim: SimConfig,
    dt: f64,
    max_ticks: u64,
) -> Result<Option<Outcome>, ScenarioError> {
    let mut engine = SimulationEngine::new(sim);
    if let Err(err) = engine.start(params) {
        debug!("skipping scenario {params:?}: {err}");
        return Err(err);
    }
    Ok(engine.run_to_completion(dt, max_ticks))
}

/// Run `config.runs` random scenarios and tally the outcomes.
pub fn run_sweep(config: &SweepConfig) -> SweepReport {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let scenarios: Vec<ScenarioParams> = (0..config.runs)
        .map(|_| sample_scenario(&mut rng))
        .collect();

    let outcomes: Vec<Result<Option<Outcome>, ScenarioError>> = scenarios
        .par_iter()
        .map(|&params| run_scenario(params, config.sim, config.dt, config.max_ticks))
        .collect();

    let mut report = SweepReport {
        seed: config.seed,
        runs: config.runs,
        ..Default::default()
    };
    for outcome in outcomes {
        report.record(outcome);
    }

    info!(
        "sweep seed {}: {} runs, {} succeeded, {} failed, {} infeasible, {} capped, {} rejected",
        report.seed,
        report.runs,
        report.succeeded,
        report.failed,
        report.infeasible_total(),
        report.capped,
        report.rejected
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampled_scenarios_stay_on_the_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let params = sample_scenario(&mut rng);
            assert!(params.out_of_range_fields().is_empty(), "{params:?}");
            assert!(params.validate().is_ok());
            assert_eq!(params.projectile_x, params.projectile_x.round());
            assert_eq!(params.launcher_speed, params.launcher_speed.round());
            let tenths = params.radar_time * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_scenarios() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(sample_scenario(&mut a), sample_scenario(&mut b));
        }
    }

    #[test]
    fn test_report_records_each_outcome_kind() {
        let mut report = SweepReport::default();
        report.record(Ok(Some(Outcome::Succeeded)));
        report.record(Ok(Some(Outcome::Failed)));
        report.record(Ok(Some(Outcome::Infeasible {
            reason: InfeasibleReason::NoRealIntercept,
        })));
        report.record(Ok(Some(Outcome::Infeasible {
            reason: InfeasibleReason::UnviableGeometry {
                launch_angle_deg: 12.0,
            },
        })));
        report.record(Ok(Some(Outcome::Infeasible {
            reason: InfeasibleReason::NoRealIntercept,
        })));
        report.record(Ok(None));
        report.record(Err(ScenarioError::NonPositiveRadarTime { value: 0.0 }));

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.capped, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.infeasible_total(), 3);
        assert_eq!(report.infeasible["no_real_intercept"], 2);
        assert_eq!(report.infeasible["unviable_geometry"], 1);
    }

    #[test]
    fn test_invalid_scenario_is_rejected_not_capped() {
        let params = ScenarioParams {
            radar_time: 0.0,
            ..Default::default()
        };
        let result = run_scenario(params, SimConfig::default(), DT, 100);
        assert_eq!(
            result,
            Err(ScenarioError::NonPositiveRadarTime { value: 0.0 })
        );

        let mut report = SweepReport::default();
        report.record(result);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.capped, 0);
    }

    #[test]
    fn test_capped_scenario_is_ok_none() {
        let result = run_scenario(ScenarioParams::default(), SimConfig::default(), DT, 10);
        assert_eq!(result, Ok(None));
    }
}
