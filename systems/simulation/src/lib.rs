#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestration that drives the world and every system for one tick.

use std::time::Duration;

use maze_chase_core::{
    Command, Direction, Event, Grid, GridError, ItemSpawn, SessionOutcome, Tuning,
};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_system_spawning::{Config as SpawningConfig, Spawning};
use maze_chase_world::{self as world, query, World};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use tracing::debug;

/// Everything that happened during one simulated frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Index of the frame that was simulated.
    pub tick: u64,
    /// Events broadcast by the world, in the order they occurred.
    pub events: Vec<Event>,
    /// How the session ended, if it has.
    pub outcome: Option<SessionOutcome>,
}

/// Owns the world, the systems, and the seeded random source for one session.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    pursuit: Pursuit,
    spawning: Spawning,
    rng: ChaCha8Rng,
    commands: Vec<Command>,
}

impl Simulation {
    /// Creates a session from a level layout and tuning, seeding the random source once.
    #[must_use]
    pub fn new(grid: Grid, items: &[ItemSpawn], tuning: Tuning, seed: u64) -> Self {
        let pursuit = Pursuit::new(&tuning);
        let spawning = Spawning::new(SpawningConfig::from_tuning(&tuning));
        Self {
            world: World::new(grid, items, tuning),
            pursuit,
            spawning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            commands: Vec::new(),
        }
    }

    /// Read-only access to the simulated world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Forwards a steering request from the input source to the player.
    pub fn steer(&mut self, direction: Option<Direction>) {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SteerPlayer { direction },
            &mut events,
        );
    }

    /// Simulates one frame of `dt`.
    ///
    /// The world ticks first, then the spawning roll runs, then every pursuer
    /// replans or follows its route and collisions are resolved.
    pub fn step(&mut self, dt: Duration) -> Result<StepReport, GridError> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        let tick_events = events.clone();

        self.commands.clear();
        self.spawning.handle(
            &tick_events,
            query::grid(&self.world),
            &query::item_view(&self.world),
            &mut self.rng,
            &mut self.commands,
        );
        self.flush_commands(&mut events);

        self.pursuit.handle(
            &tick_events,
            query::grid(&self.world),
            query::tuning(&self.world),
            &query::player(&self.world),
            &query::pursuer_view(&self.world),
            &mut self.rng,
            &mut self.commands,
        )?;
        self.flush_commands(&mut events);

        let tick = query::tick_index(&self.world);
        debug!(tick, events = events.len(), "frame simulated");
        Ok(StepReport {
            tick,
            events,
            outcome: query::outcome(&self.world),
        })
    }

    fn flush_commands(&mut self, events: &mut Vec<Event>) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}
