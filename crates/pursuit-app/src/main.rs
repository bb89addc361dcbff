use std::time::Duration;

use anyhow::{anyhow, bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::warn;

use pursuit_app::game_loop::spawn_game_loop;
use pursuit_app::report::{encounter_lines, sweep_lines};
use pursuit_app::state::LoopConfig;
use pursuit_core::commands::SimCommand;
use pursuit_core::constants::*;
use pursuit_core::scenario::{advisory_range, ScenarioParams};
use pursuit_core::state::SimSnapshot;
use pursuit_sim::sweep::{run_sweep, SweepConfig};
use pursuit_sim::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "pursuit")]
#[command(about = "Ballistic pursuit simulator: radar estimate, intercept course, launch")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single encounter
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Simulated seconds per tick
        #[arg(long, default_value_t = DT)]
        dt: f64,
        #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u64,
        /// Pace ticks on a loop thread at wall-clock speed
        #[arg(long, default_value_t = false)]
        realtime: bool,
        /// Stream every snapshot as a JSON line
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run random encounters on the input grid and tally the outcomes
    Sweep {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 1000)]
        runs: usize,
        #[arg(long, default_value_t = DT)]
        dt: f64,
        #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u64,
        /// Worker threads (defaults to all cores)
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    #[arg(long, default_value_t = DEFAULT_PROJECTILE_X, allow_negative_numbers = true)]
    projectile_x: f64,
    #[arg(long, default_value_t = DEFAULT_PROJECTILE_Y, allow_negative_numbers = true)]
    projectile_y: f64,
    #[arg(long, default_value_t = DEFAULT_IMPACT_X, allow_negative_numbers = true)]
    impact_x: f64,
    #[arg(long, default_value_t = DEFAULT_LAUNCHER_X, allow_negative_numbers = true)]
    launcher_x: f64,
    #[arg(long, default_value_t = DEFAULT_SPEED, allow_negative_numbers = true)]
    projectile_speed: f64,
    #[arg(long, default_value_t = DEFAULT_SPEED, allow_negative_numbers = true)]
    launcher_speed: f64,
    /// Seconds before the radar sample
    #[arg(long, default_value_t = DEFAULT_RADAR_TIME, allow_negative_numbers = true)]
    radar_time: f64,
}

impl From<&ScenarioArgs> for ScenarioParams {
    fn from(args: &ScenarioArgs) -> Self {
        Self {
            projectile_x: args.projectile_x,
            projectile_y: args.projectile_y,
            impact_x: args.impact_x,
            launcher_x: args.launcher_x,
            projectile_speed: args.projectile_speed,
            launcher_speed: args.launcher_speed,
            radar_time: args.radar_time,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Run {
            scenario,
            dt,
            max_ticks,
            realtime,
            json,
        } => {
            ensure!(dt.is_finite() && dt > 0.0, "--dt must be positive, got {dt}");
            let params = ScenarioParams::from(&scenario);
            params.validate().context("invalid scenario")?;
            for field in params.out_of_range_fields() {
                let (min, max) = advisory_range(field);
                warn!("{field} is outside the advisory range {min}..={max}");
            }

            let last = if realtime {
                run_paced(params, dt, max_ticks, json)?
            } else {
                run_stepped(params, dt, max_ticks, json)?
            };
            if !json {
                for line in encounter_lines(&params, &last) {
                    println!("{line}");
                }
            }
        }
        Commands::Sweep {
            seed,
            runs,
            dt,
            max_ticks,
            jobs,
            json,
        } => {
            ensure!(dt.is_finite() && dt > 0.0, "--dt must be positive, got {dt}");
            let config = SweepConfig {
                seed,
                runs,
                dt,
                max_ticks,
                sim: SimConfig::default(),
            };
            let report = match jobs {
                Some(0) => bail!("--jobs must be >= 1 when provided"),
                Some(jobs) => rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .context("failed to build worker pool")?
                    .install(|| run_sweep(&config)),
                None => run_sweep(&config),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in sweep_lines(&report) {
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}

fn print_json(snapshot: &SimSnapshot) -> Result<()> {
    println!("{}", serde_json::to_string(snapshot)?);
    Ok(())
}

/// Tick on this thread as fast as possible. Returns the final snapshot.
fn run_stepped(params: ScenarioParams, dt: f64, max_ticks: u64, json: bool) -> Result<SimSnapshot> {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start(params)?;

    for _ in 0..max_ticks {
        let finished = engine.tick(dt).is_some();
        let snapshot = engine.snapshot();
        if json {
            print_json(&snapshot)?;
        }
        if finished {
            return Ok(snapshot);
        }
    }

    warn!("no outcome after {max_ticks} ticks");
    Ok(engine.snapshot())
}

/// Tick on a loop thread at wall-clock pace. Returns the final snapshot.
fn run_paced(params: ScenarioParams, dt: f64, max_ticks: u64, json: bool) -> Result<SimSnapshot> {
    let config = LoopConfig::realtime(dt, SimConfig::default())
        .ok_or_else(|| anyhow!("--dt {dt} is not a usable tick duration"))?;
    let handle = spawn_game_loop(config).context("failed to spawn loop thread")?;
    ensure!(
        handle.send(SimCommand::Start { params }),
        "loop thread stopped before the encounter started"
    );

    let timeout = config.tick_duration * 2 + Duration::from_secs(1);
    let last = loop {
        let snapshot = handle
            .snapshots()
            .recv_timeout(timeout)
            .context("loop thread stopped publishing")?;
        if json {
            print_json(&snapshot)?;
        }
        if snapshot.outcome.is_some() || snapshot.time.tick >= max_ticks {
            break snapshot;
        }
    };

    if last.outcome.is_none() {
        warn!("no outcome after {max_ticks} ticks");
    }
    handle
        .shutdown()
        .map_err(|_| anyhow!("loop thread panicked"))?;
    Ok(last)
}
