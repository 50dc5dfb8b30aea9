#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuer behavior controller that picks targets, replans routes, and steps pursuers.

use glam::IVec2;
use maze_chase_core::{
    CellCoord, Command, Direction, Event, Grid, GridError, PlayerSnapshot, PursuerKind,
    PursuerMode, PursuerSnapshot, PursuerView, TileKind, Tuning,
};
use maze_chase_system_pathfinding::{MoveCosts, Pathfinder};
use rand::Rng;
use tracing::debug;

/// Pure system that reacts to ticks by replanning and stepping every pursuer.
#[derive(Debug)]
pub struct Pursuit {
    pathfinder: Pathfinder,
    patrol_corner: usize,
}

impl Pursuit {
    /// Creates the controller with pathfinding costs taken from the tuning.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pathfinder: Pathfinder::new(MoveCosts::from_tuning(tuning)),
            patrol_corner: 0,
        }
    }

    /// Consumes world events and immutable views to emit route and step commands.
    ///
    /// Nothing is emitted unless the events contain a tick, or once the
    /// session has ended. Resting pursuers are left alone.
    pub fn handle(
        &mut self,
        events: &[Event],
        grid: &Grid,
        tuning: &Tuning,
        player: &PlayerSnapshot,
        pursuers: &PursuerView,
        rng: &mut impl Rng,
        out: &mut Vec<Command>,
    ) -> Result<(), GridError> {
        let ticked = events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }));
        let ended = events
            .iter()
            .any(|event| matches!(event, Event::SessionEnded { .. }));
        if !ticked || ended {
            return Ok(());
        }

        for pursuer in pursuers.iter() {
            if pursuer.resting {
                continue;
            }

            let route_empty = pursuer.route_len == 0;
            if route_empty || pursuer.ticks_since_replan >= tuning.replan_interval_ticks {
                if let Some(target) = self.select_target(pursuer, grid, tuning, player, rng)? {
                    let mut route = self.pathfinder.find_path(grid, pursuer.cell, target)?;
                    if route.first() == Some(&pursuer.cell) {
                        let _ = route.remove(0);
                    }
                    debug!(
                        pursuer = ?pursuer.kind,
                        ?target,
                        hops = route.len(),
                        "replanned route"
                    );
                    out.push(Command::SetPursuerRoute {
                        pursuer: pursuer.kind,
                        route,
                    });
                }
            }

            out.push(Command::StepPursuer {
                pursuer: pursuer.kind,
            });
        }

        Ok(())
    }

    /// Chooses the cell a pursuer should head for, if any.
    fn select_target(
        &mut self,
        pursuer: &PursuerSnapshot,
        grid: &Grid,
        tuning: &Tuning,
        player: &PlayerSnapshot,
        rng: &mut impl Rng,
    ) -> Result<Option<CellCoord>, GridError> {
        let home = tuning.home_corner(pursuer.kind);
        match pursuer.mode {
            PursuerMode::Scatter => Ok(Some(home)),
            PursuerMode::Frightened => Ok(tuning.retreat_cell(pursuer.kind)),
            PursuerMode::Chase => match pursuer.kind {
                PursuerKind::Flanker => {
                    chase_player(pursuer, grid, tuning, player, home, Direction::opposite)
                }
                PursuerKind::Ambusher => {
                    chase_player(pursuer, grid, tuning, player, home, |facing| facing)
                }
                PursuerKind::Patroller => {
                    if pursuer.route_len > 0 {
                        return Ok(None);
                    }
                    self.patrol_corner = (self.patrol_corner + 1) % tuning.home_corners.len();
                    Ok(Some(tuning.home_corners[self.patrol_corner]))
                }
                PursuerKind::Wanderer => {
                    if pursuer.route_len > 0 {
                        return Ok(None);
                    }
                    Ok(random_path_cell(grid, tuning, rng))
                }
            },
        }
    }
}

/// Targets the cell beside the player on the side picked by `side_for`.
///
/// Falls back to the home corner when the player is off the grid and to the
/// player's own cell when the pursuer is already close or the side is blocked.
fn chase_player(
    pursuer: &PursuerSnapshot,
    grid: &Grid,
    tuning: &Tuning,
    player: &PlayerSnapshot,
    home: CellCoord,
    side_for: impl Fn(Direction) -> Direction,
) -> Result<Option<CellCoord>, GridError> {
    let Some(player_cell) = player.cell else {
        return Ok(Some(home));
    };
    let Some(facing) = player.facing else {
        return Ok(Some(player_cell));
    };

    let side = side_for(facing);
    let pursuer_position = pursuer.cell.to_pixel(tuning.cell_size);
    if closing_in(pursuer_position, player.position, side, tuning.cell_size) {
        return Ok(Some(player_cell));
    }

    let Some(block) = player_cell.step(side).filter(|cell| grid.contains(*cell)) else {
        return Ok(Some(player_cell));
    };
    if grid.cell(block)?.blocks_movement() {
        return Ok(Some(player_cell));
    }
    Ok(Some(block))
}

/// Whether the pursuer shares the player's line and is less than two cells
/// short of it along `side`.
fn closing_in(pursuer: IVec2, player: IVec2, side: Direction, cell_size: i32) -> bool {
    let aligned = match side {
        Direction::Up | Direction::Down => pursuer.x == player.x,
        Direction::Left | Direction::Right => pursuer.y == player.y,
    };
    aligned && (player - pursuer).dot(side.unit()) < 2 * cell_size
}

/// Samples pixels inside the random target bounds until one lands on a plain path cell.
fn random_path_cell(grid: &Grid, tuning: &Tuning, rng: &mut impl Rng) -> Option<CellCoord> {
    let bounds = tuning.random_target_bounds;
    if bounds.min.x > bounds.max.x || bounds.min.y > bounds.max.y {
        return None;
    }

    for _ in 0..tuning.random_target_attempts {
        let point = IVec2::new(
            rng.gen_range(bounds.min.x..=bounds.max.x),
            rng.gen_range(bounds.min.y..=bounds.max.y),
        );
        let Some(cell) = grid.cell_containing(point, tuning.cell_size) else {
            continue;
        };
        if grid.cell(cell).map(|tile| tile.kind()) == Ok(TileKind::Path) {
            return Some(cell);
        }
    }

    debug!("no path cell found for random target");
    None
}
