//! Pixel-space motion shared by the player and the pursuers.

use glam::IVec2;
use maze_chase_core::{CellCoord, Direction, Grid};

/// Position, speed, and facing of an entity that moves through the maze.
///
/// Blocked directions are gathered by [`Mover::check_blockades`] and only
/// hold until the next call to [`Mover::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mover {
    position: IVec2,
    speed: i32,
    facing: Option<Direction>,
    blocked: Vec<Direction>,
}

impl Mover {
    /// Creates a stationary mover at the provided pixel position.
    #[must_use]
    pub fn new(position: IVec2, speed: i32) -> Self {
        Self {
            position,
            speed,
            facing: None,
            blocked: Vec::with_capacity(Direction::ALL.len()),
        }
    }

    /// Pixel position of the mover's top-left corner.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        self.position
    }

    /// Teleports the mover without touching its facing.
    pub fn place(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Current facing, `None` while standing still.
    #[must_use]
    pub const fn facing(&self) -> Option<Direction> {
        self.facing
    }

    /// Directions found blocked for the current tick.
    #[must_use]
    pub fn blocked_directions(&self) -> &[Direction] {
        &self.blocked
    }

    /// Requests a new facing.
    ///
    /// Reversing onto the opposite direction is refused unless the mover is
    /// standing still. Returns whether the facing changed.
    pub fn set_direction(&mut self, requested: Option<Direction>) -> bool {
        let accepted = match (requested, self.facing) {
            (None, _) => true,
            (Some(direction), Some(current)) => current != direction.opposite(),
            (Some(_), None) => true,
        };

        if accepted && self.facing != requested {
            self.facing = requested;
            return true;
        }
        false
    }

    /// Clamps the mover against adjacent walls and records the blocked directions.
    ///
    /// Only runs while the mover lies strictly inside the grid so that the
    /// outer ring, where wrap-around happens, is never inspected.
    pub fn check_blockades(&mut self, grid: &Grid, cell_size: i32) {
        let width = grid.pixel_width(cell_size);
        let height = grid.pixel_height(cell_size);
        let inside = |value: i32, limit: i32| value > 0 && value < limit - cell_size;
        if !inside(self.position.x, width) || !inside(self.position.y, height) {
            return;
        }

        let Some(cell) = grid.cell_containing(self.position, cell_size) else {
            return;
        };

        for direction in Direction::ALL {
            let Some(neighbor) = cell.step(direction) else {
                continue;
            };
            let Ok(tile) = grid.cell(neighbor) else {
                continue;
            };
            if !tile.blocks_movement() {
                continue;
            }

            let boundary = boundary_towards(neighbor, direction, cell_size);
            let (current, limit) = match direction {
                Direction::Up | Direction::Down => (&mut self.position.y, boundary.y),
                Direction::Left | Direction::Right => (&mut self.position.x, boundary.x),
            };
            if (*current - limit).abs() <= cell_size {
                *current = limit;
                self.blocked.push(direction);
            }
        }
    }

    /// Moves one step along the facing unless it is blocked, then clears the blockades.
    ///
    /// Leaving the grid horizontally wraps around to the opposite edge; the
    /// vertical axis is never wrapped.
    pub fn advance(&mut self, wrap_width: i32) {
        if let Some(direction) = self.facing {
            if !self.blocked.contains(&direction) {
                self.position += direction.unit() * self.speed;
                if wrap_width > 0 && (self.position.x < 0 || self.position.x >= wrap_width) {
                    self.position.x = self.position.x.rem_euclid(wrap_width);
                }
            }
        }
        self.blocked.clear();
    }
}

/// Furthest pixel an entity may occupy before overlapping `neighbor`.
fn boundary_towards(neighbor: CellCoord, direction: Direction, cell_size: i32) -> IVec2 {
    let origin = neighbor.to_pixel(cell_size);
    match direction {
        Direction::Up => IVec2::new(origin.x, origin.y + cell_size),
        Direction::Down => IVec2::new(origin.x, origin.y - cell_size),
        Direction::Left => IVec2::new(origin.x + cell_size, origin.y),
        Direction::Right => IVec2::new(origin.x - cell_size, origin.y),
    }
}
