//! Plain-text `key=value` reports for the terminal.

use pursuit_core::scenario::ScenarioParams;
use pursuit_core::state::SimSnapshot;
use pursuit_sim::sweep::SweepReport;

/// Summary of one encounter from its final snapshot.
pub fn encounter_lines(params: &ScenarioParams, snapshot: &SimSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!(
            "projectile=({}, {}) -> ({}, 0) speed={}",
            params.projectile_x, params.projectile_y, params.impact_x, params.projectile_speed
        ),
        format!(
            "launcher=({}, 0) speed={}",
            params.launcher_x, params.launcher_speed
        ),
        format!("radar_time={}", params.radar_time),
        format!("ticks={}", snapshot.time.tick),
        format!("elapsed={:.3}", snapshot.time.elapsed_secs),
    ];

    if let Some(intercept) = snapshot.intercept {
        lines.push(format!(
            "intercept_point=({:.2}, {:.2})",
            intercept.point.x, intercept.point.y
        ));
        lines.push(format!("time_to_intercept={:.3}", intercept.time_to_intercept));
        lines.push(format!("launch_angle_deg={:.2}", intercept.launch_angle_deg));
    }

    match snapshot.outcome {
        Some(outcome) => {
            lines.push(format!("outcome={:?}", outcome.phase()));
            lines.push(outcome.message().to_string());
        }
        None => lines.push("outcome=none".to_string()),
    }
    lines
}

/// Tally of a sweep.
pub fn sweep_lines(report: &SweepReport) -> Vec<String> {
    let mut lines = vec![
        format!("seed={}", report.seed),
        format!("runs={}", report.runs),
        format!("succeeded={}", report.succeeded),
        format!("failed={}", report.failed),
        format!("infeasible={}", report.infeasible_total()),
    ];
    lines.extend(
        report
            .infeasible
            .iter()
            .map(|(reason, count)| format!("infeasible.{reason}={count}")),
    );
    lines.push(format!("capped={}", report.capped));
    lines.push(format!("rejected={}", report.rejected));
    lines
}
