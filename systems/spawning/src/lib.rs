#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system that occasionally drops a fresh power-up into the maze.

use maze_chase_core::{CellCoord, Command, Event, Grid, ItemView, TileKind, Tuning};
use rand::Rng;
use tracing::debug;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    roll_max: u32,
    roll_threshold: u32,
    placement_attempts: u32,
}

impl Config {
    /// Creates a configuration that spawns when a roll in `0..=roll_max`
    /// lands at or below `roll_threshold`.
    #[must_use]
    pub const fn new(roll_max: u32, roll_threshold: u32, placement_attempts: u32) -> Self {
        Self {
            roll_max,
            roll_threshold,
            placement_attempts,
        }
    }

    /// Reads the spawn roll from the provided tuning.
    #[must_use]
    pub const fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.power_up_roll_max,
            tuning.power_up_roll_threshold,
            tuning.random_target_attempts,
        )
    }
}

/// Pure system that rolls once per tick for a power-up respawn.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Consumes events and immutable views to emit power-up spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        grid: &Grid,
        items: &ItemView,
        rng: &mut impl Rng,
        out: &mut Vec<Command>,
    ) {
        if events
            .iter()
            .any(|event| matches!(event, Event::SessionEnded { .. }))
        {
            return;
        }

        let ticks = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();

        for _ in 0..ticks {
            if rng.gen_range(0..=self.config.roll_max) > self.config.roll_threshold {
                continue;
            }

            match self.select_cell(grid, items, rng) {
                Some(cell) => out.push(Command::SpawnPowerUp { cell }),
                None => debug!("no free path cell for power-up"),
            }
        }
    }

    /// Samples cells until one is a plain path with no visible item on it.
    fn select_cell(&self, grid: &Grid, items: &ItemView, rng: &mut impl Rng) -> Option<CellCoord> {
        let cells = grid.cells();
        if cells.is_empty() {
            return None;
        }

        for _ in 0..self.config.placement_attempts {
            let cell = &cells[rng.gen_range(0..cells.len())];
            if cell.kind() == TileKind::Path && !items.is_occupied(cell.coord()) {
                return Some(cell.coord());
            }
        }
        None
    }
}
