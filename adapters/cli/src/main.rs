#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Maze Chase session.

mod input;
mod level;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase_core::{PursuerMode, SessionOutcome, Tuning};
use maze_chase_system_simulation::Simulation;
use maze_chase_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

use input::InputScript;
use level::LevelLayout;

const DEFAULT_SEED: u64 = 0x6d61_7a65_6368_6173;

/// Simulate a maze chase session without rendering.
#[derive(Debug, Parser)]
#[command(name = "maze-chase", version)]
struct Args {
    /// CSV level file; the built-in arena is used when omitted.
    #[arg(long)]
    level: Option<PathBuf>,

    /// TOML file overriding any subset of the tuning values.
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Duration of a single frame in milliseconds.
    #[arg(long, default_value_t = 100)]
    dt_ms: u64,

    /// Seed for the session's random source.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Scripted steering, e.g. `1:up,8:left,30:none`.
    #[arg(long)]
    input: Option<String>,

    /// Log filter overriding `RUST_LOG`, e.g. `debug` or `maze_chase_world=debug`.
    #[arg(long)]
    log: Option<String>,
}

/// Entry point for the Maze Chase command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    let layout = match &args.level {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read level {}", path.display()))?;
            LevelLayout::parse(&source)
                .with_context(|| format!("failed to parse level {}", path.display()))?
        }
        None => LevelLayout::arena().context("failed to build the built-in arena")?,
    };
    let tuning = load_tuning(args.tuning.as_ref())?;
    let script = match &args.input {
        Some(source) => InputScript::parse(source).context("failed to parse input script")?,
        None => InputScript::default(),
    };

    info!(
        columns = layout.grid.columns(),
        rows = layout.grid.rows(),
        items = layout.items.len(),
        seed = args.seed,
        "session starting"
    );
    let mut simulation = Simulation::new(layout.grid, &layout.items, tuning, args.seed);
    let dt = Duration::from_millis(args.dt_ms);

    let mut outcome = None;
    for tick in 1..=args.ticks {
        for direction in script.at(tick) {
            simulation.steer(direction);
        }
        let report = simulation
            .step(dt)
            .with_context(|| format!("simulation failed on tick {tick}"))?;
        if report.outcome.is_some() {
            outcome = report.outcome;
            break;
        }
    }

    print_summary(&simulation, outcome);
    Ok(())
}

fn init_logging(filter: Option<&str>) {
    let filter = filter
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning {}", path.display()))?;
    toml::from_str(&source).with_context(|| format!("failed to parse tuning {}", path.display()))
}

fn print_summary(simulation: &Simulation, outcome: Option<SessionOutcome>) {
    let world = simulation.world();
    let player = query::player(world);

    println!("ticks:   {}", query::tick_index(world));
    println!("points:  {}", player.points);
    println!("lives:   {}", player.lives);
    println!(
        "outcome: {}",
        match outcome {
            Some(SessionOutcome::Won) => "won",
            Some(SessionOutcome::Lost) => "lost",
            None => "running",
        }
    );
    println!(
        "coins:   {} remaining",
        query::item_view(world).remaining_coins()
    );
    for pursuer in query::pursuer_view(world).iter() {
        let mode = match pursuer.mode {
            PursuerMode::Chase => "chase",
            PursuerMode::Scatter => "scatter",
            PursuerMode::Frightened => "frightened",
        };
        println!(
            "{:<10} {:<10} at ({}, {})",
            format!("{:?}", pursuer.kind),
            mode,
            pursuer.cell.column(),
            pursuer.cell.row()
        );
    }
}
