#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

mod items;
mod mover;
mod player;
mod pursuers;

use std::time::Duration;

use glam::IVec2;
use maze_chase_core::{
    CellCoord, Command, Event, Grid, ItemKind, ItemSpawn, PowerState, PursuerKind, PursuerMode,
    SessionOutcome, Tuning,
};
use tracing::{debug, info, warn};

use items::ItemSlots;
use player::Player;
use pursuers::Pursuer;

pub use mover::Mover;

/// Represents the authoritative Maze Chase world state.
#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    grid: Grid,
    player: Player,
    pursuers: Vec<Pursuer>,
    items: ItemSlots,
    tick_index: u64,
    outcome: Option<SessionOutcome>,
}

impl World {
    /// Creates a world from a level layout, its item placements, and tuning.
    ///
    /// One pursuer of every kind starts in its home corner.
    #[must_use]
    pub fn new(grid: Grid, items: &[ItemSpawn], tuning: Tuning) -> Self {
        let cell_size = tuning.cell_size;
        let pursuers = PursuerKind::ALL
            .into_iter()
            .map(|kind| {
                Pursuer::new(
                    kind,
                    tuning.home_corner(kind),
                    tuning.retreat_cell(kind),
                    cell_size,
                )
            })
            .collect();

        Self {
            player: Player::new(tuning.player_spawn, cell_size, tuning.starting_lives),
            items: ItemSlots::from_spawns(items),
            pursuers,
            grid,
            tuning,
            tick_index: 0,
            outcome: None,
        }
    }

    fn pursuer_mut(&mut self, kind: PursuerKind) -> Option<&mut Pursuer> {
        self.pursuers.iter_mut().find(|pursuer| pursuer.kind == kind)
    }

    fn advance_player(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let cell_size = self.tuning.cell_size;
        let from = self.player.mover.position();
        self.player.mover.check_blockades(&self.grid, cell_size);
        self.player.mover.advance(self.grid.pixel_width(cell_size));
        let to = self.player.mover.position();
        if from != to {
            out_events.push(Event::PlayerMoved { from, to });
        }

        if self.player.tick_power(dt, self.tuning.power_up_duration()) {
            debug!(tick = self.tick_index, "power-up expired");
            out_events.push(Event::PowerUpExpired);
        }
    }

    fn collect_items(&mut self, out_events: &mut Vec<Event>) {
        let Some(cell) = aligned_cell(self.player.mover.position(), self.tuning.cell_size) else {
            return;
        };

        for (item, kind) in self.items.collect_at(cell) {
            match kind {
                ItemKind::Coin => self.player.add_points(self.tuning.coin_points),
                ItemKind::PowerUp => {
                    self.player.add_points(self.tuning.power_up_points);
                    self.player.power_up();
                }
                ItemKind::Life => self.player.lives = self.player.lives.saturating_add(1),
                ItemKind::Cherry => {}
            }
            out_events.push(Event::ItemCollected { item, kind });
        }
    }

    fn update_pursuer_modes(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let desired = match self.player.power {
            PowerState::Normal => PursuerMode::Chase,
            PowerState::PoweredUp => PursuerMode::Scatter,
        };
        let rest_limit = self.tuning.frightened_duration();

        for pursuer in &mut self.pursuers {
            if pursuer.mode != PursuerMode::Frightened && pursuer.mode != desired {
                pursuer.mode = desired;
                out_events.push(Event::PursuerModeChanged {
                    pursuer: pursuer.kind,
                    mode: desired,
                });
            }

            pursuer.idle = pursuer.at_retreat();
            if pursuer.idle {
                if pursuer.rest(dt, rest_limit) {
                    out_events.push(Event::PursuerModeChanged {
                        pursuer: pursuer.kind,
                        mode: PursuerMode::Chase,
                    });
                }
            } else {
                pursuer.ticks_since_replan = pursuer.ticks_since_replan.saturating_add(1);
            }
        }
    }

    fn respawn(&mut self, out_events: &mut Vec<Event>) {
        self.player.respawn();
        for pursuer in &mut self.pursuers {
            pursuer.reset();
            pursuer.idle = true;
        }
        info!(lives = self.player.lives, "player respawned");
        out_events.push(Event::PlayerRespawned);

        if self.player.lives == 0 {
            self.end(SessionOutcome::Lost, out_events);
        }
    }

    fn end(&mut self, outcome: SessionOutcome, out_events: &mut Vec<Event>) {
        info!(
            ?outcome,
            points = self.player.points,
            tick = self.tick_index,
            "session ended"
        );
        self.outcome = Some(outcome);
        out_events.push(Event::SessionEnded { outcome });
    }

    fn step_pursuer(&mut self, kind: PursuerKind, out_events: &mut Vec<Event>) {
        let player_position = self.player.mover.position();
        let player_alive = self.player.alive;
        let player_power = self.player.power;
        let catch_bonus = self.tuning.catch_bonus;

        let Some(pursuer) = self.pursuer_mut(kind) else {
            return;
        };
        if pursuer.idle {
            return;
        }

        if let Some(next) = pursuer.route.pop_front() {
            let from = pursuer.cell;
            pursuer.place(next);
            out_events.push(Event::PursuerAdvanced {
                pursuer: kind,
                from,
                to: next,
            });
        }

        if pursuer.mode == PursuerMode::Frightened
            || !player_alive
            || pursuer.mover.position() != player_position
        {
            return;
        }

        match player_power {
            PowerState::PoweredUp => {
                pursuer.mode = PursuerMode::Frightened;
                info!(pursuer = ?kind, "pursuer frightened");
                out_events.push(Event::PursuerModeChanged {
                    pursuer: kind,
                    mode: PursuerMode::Frightened,
                });
                out_events.push(Event::PursuerFrightened {
                    pursuer: kind,
                    bonus: catch_bonus,
                });
                self.player.add_points(catch_bonus);
            }
            PowerState::Normal => {
                self.player.kill(self.tuning.death_penalty);
                info!(
                    pursuer = ?kind,
                    lives = self.player.lives,
                    points = self.player.points,
                    "player caught"
                );
                out_events.push(Event::PlayerCaught { pursuer: kind });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the session has ended every command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }

    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            if !world.player.alive {
                world.respawn(out_events);
                return;
            }

            world.advance_player(dt, out_events);
            world.collect_items(out_events);
            if world.items.remaining_coins() == 0 {
                world.end(SessionOutcome::Won, out_events);
                return;
            }
            world.update_pursuer_modes(dt, out_events);
        }
        Command::SteerPlayer { direction } => {
            let _ = world.player.mover.set_direction(direction);
        }
        Command::SetPursuerRoute { pursuer, route } => {
            let grid = &world.grid;
            let Some(state) = world.pursuers.iter_mut().find(|state| state.kind == pursuer) else {
                return;
            };
            if route_is_connected(state.cell, &route, grid) {
                state.assign_route(route);
            } else {
                warn!(?pursuer, "rejected disconnected route");
                state.assign_route(Vec::new());
            }
        }
        Command::StepPursuer { pursuer } => world.step_pursuer(pursuer, out_events),
        Command::SpawnPowerUp { cell } => match world.items.spawn_power_up(cell) {
            Some(item) => out_events.push(Event::PowerUpSpawned { item, cell }),
            None => {
                debug!(?cell, "no dormant item slot for power-up");
                out_events.push(Event::PowerUpSpawnSkipped { cell });
            }
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_chase_core::{
        CellCoord, Grid, ItemView, PlayerSnapshot, PursuerKind, PursuerView, SessionOutcome,
        Tuning,
    };

    use super::World;

    /// Provides read-only access to the tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        let position = player.mover.position();
        PlayerSnapshot {
            position,
            cell: world.grid.cell_containing(position, world.tuning.cell_size),
            facing: player.mover.facing(),
            points: player.points,
            lives: player.lives,
            alive: player.alive,
            power: player.power,
        }
    }

    /// Captures a read-only view of the pursuers.
    #[must_use]
    pub fn pursuer_view(world: &World) -> PursuerView {
        PursuerView::from_snapshots(world.pursuers.iter().map(|p| p.snapshot()).collect())
    }

    /// Cached route of a pursuer, next cell first.
    #[must_use]
    pub fn pursuer_route(world: &World, kind: PursuerKind) -> Vec<CellCoord> {
        world
            .pursuers
            .iter()
            .find(|pursuer| pursuer.kind == kind)
            .map(|pursuer| pursuer.route.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Captures a read-only view of every item slot.
    #[must_use]
    pub fn item_view(world: &World) -> ItemView {
        ItemView::from_snapshots(world.items.snapshots())
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// How the session ended, or `None` while it is still running.
    #[must_use]
    pub fn outcome(world: &World) -> Option<SessionOutcome> {
        world.outcome
    }
}

/// Cell whose top-left corner coincides with `position`.
fn aligned_cell(position: IVec2, cell_size: i32) -> Option<CellCoord> {
    CellCoord::from_pixel(position, cell_size).filter(|cell| cell.to_pixel(cell_size) == position)
}

fn route_is_connected(start: CellCoord, route: &[CellCoord], grid: &Grid) -> bool {
    let mut previous = start;
    for cell in route {
        let distance =
            previous.column().abs_diff(cell.column()) + previous.row().abs_diff(cell.row());
        if !grid.contains(*cell) || distance != 1 {
            return false;
        }
        previous = *cell;
    }
    true
}
