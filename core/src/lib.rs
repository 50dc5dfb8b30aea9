#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod grid;
mod tuning;

use std::time::Duration;

use glam::IVec2;
use serde::{Deserialize, Serialize};

pub use grid::{Cell, Grid, GridError, Neighbors, TileKind};
pub use tuning::{PixelBounds, Tuning};

/// Cardinal movement directions available to the player and pursuers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in the order blockades are inspected.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step for the direction with y growing downwards.
    #[must_use]
    pub const fn unit(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the neighbouring coordinate one step in `direction`.
    ///
    /// `None` when the step would leave the non-negative quadrant; the upper
    /// bounds are the grid's business.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (column, row) = match direction {
            Direction::Up => (Some(self.column), self.row.checked_sub(1)),
            Direction::Down => (Some(self.column), self.row.checked_add(1)),
            Direction::Left => (self.column.checked_sub(1), Some(self.row)),
            Direction::Right => (self.column.checked_add(1), Some(self.row)),
        };
        Some(CellCoord::new(column?, row?))
    }

    /// Top-left pixel of the cell for the provided cell edge length.
    #[must_use]
    pub fn to_pixel(self, cell_size: i32) -> IVec2 {
        IVec2::new(self.column as i32, self.row as i32) * cell_size
    }

    /// Cell containing the provided pixel, if the pixel is not negative.
    #[must_use]
    pub fn from_pixel(point: IVec2, cell_size: i32) -> Option<CellCoord> {
        if cell_size <= 0 || point.x < 0 || point.y < 0 {
            return None;
        }
        let cell = point / cell_size;
        Some(CellCoord::new(cell.x as u32, cell.y as u32))
    }
}

/// Fixed personality of a pursuer. Exactly one pursuer exists per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PursuerKind {
    /// Aggressive flanker that tries to cut in behind the player.
    Flanker,
    /// Ambusher that aims for the block ahead of the player.
    Ambusher,
    /// Patroller that cycles through the home corners.
    Patroller,
    /// Wanderer that roams to random walkable cells.
    Wanderer,
}

impl PursuerKind {
    /// All pursuer kinds in spawn order.
    pub const ALL: [PursuerKind; 4] = [
        PursuerKind::Flanker,
        PursuerKind::Ambusher,
        PursuerKind::Patroller,
        PursuerKind::Wanderer,
    ];

    /// Index used to look up per-kind constants such as home corners.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Flanker => 0,
            Self::Ambusher => 1,
            Self::Patroller => 2,
            Self::Wanderer => 3,
        }
    }
}

/// Behavioural state of a pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PursuerMode {
    /// Hunting the player using the kind-specific heuristic.
    Chase,
    /// Heading back to the home corner while the player is powered up.
    Scatter,
    /// Fleeing to the retreat point after being caught by a powered-up player.
    Frightened,
}

/// Power state of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerState {
    /// Regular state; pursuers are lethal.
    Normal,
    /// Powered-up state; colliding pursuers become frightened.
    PoweredUp,
}

/// Kinds of collectable items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Regular coin; collecting every coin wins the session.
    Coin,
    /// Power-up that lets the player frighten pursuers.
    PowerUp,
    /// Bonus fruit without a score effect.
    Cherry,
    /// Extra life.
    Life,
}

/// Identifier of an item slot. Slots are reused rather than deallocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Item placement supplied by the level source at session start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemSpawn {
    /// Cell the item occupies.
    pub cell: CellCoord,
    /// Kind of item placed in the cell.
    pub kind: ItemKind,
}

/// Final result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionOutcome {
    /// Every coin was collected.
    Won,
    /// The player ran out of lives.
    Lost,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests a new facing direction for the player.
    SteerPlayer {
        /// Requested direction; `None` stops the player.
        direction: Option<Direction>,
    },
    /// Replaces a pursuer's cached route and restarts its replanning countdown.
    SetPursuerRoute {
        /// Pursuer receiving the route.
        pursuer: PursuerKind,
        /// Cells to visit in order, excluding the pursuer's current cell.
        route: Vec<CellCoord>,
    },
    /// Requests that a pursuer advance one cell along its cached route.
    StepPursuer {
        /// Pursuer attempting to move.
        pursuer: PursuerKind,
    },
    /// Requests that a power-up appear in the provided cell.
    SpawnPowerUp {
        /// Cell that should receive the power-up.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player changed position.
    PlayerMoved {
        /// Pixel position before the move.
        from: IVec2,
        /// Pixel position after the move.
        to: IVec2,
    },
    /// Announces that the player's power-up ran out.
    PowerUpExpired,
    /// Confirms that the player collected an item.
    ItemCollected {
        /// Slot that held the item.
        item: ItemId,
        /// Kind of item collected.
        kind: ItemKind,
    },
    /// Confirms that a power-up was placed into a dormant slot.
    PowerUpSpawned {
        /// Slot that now holds the power-up.
        item: ItemId,
        /// Cell the power-up occupies.
        cell: CellCoord,
    },
    /// Reports that a power-up could not be placed because every slot is visible.
    PowerUpSpawnSkipped {
        /// Cell that was requested for the power-up.
        cell: CellCoord,
    },
    /// Announces that a pursuer entered a new mode.
    PursuerModeChanged {
        /// Pursuer whose mode changed.
        pursuer: PursuerKind,
        /// Mode that became active.
        mode: PursuerMode,
    },
    /// Confirms that a pursuer moved between two cells.
    PursuerAdvanced {
        /// Pursuer that advanced.
        pursuer: PursuerKind,
        /// Cell occupied before moving.
        from: CellCoord,
        /// Cell occupied after moving.
        to: CellCoord,
    },
    /// Reports that a powered-up player caught a pursuer.
    PursuerFrightened {
        /// Pursuer that became frightened.
        pursuer: PursuerKind,
        /// Points awarded to the player.
        bonus: u32,
    },
    /// Reports that a pursuer caught the player.
    PlayerCaught {
        /// Pursuer that caught the player.
        pursuer: PursuerKind,
    },
    /// Confirms that the player and pursuers returned to their spawn points.
    PlayerRespawned,
    /// Announces that the session is over.
    SessionEnded {
        /// How the session ended.
        outcome: SessionOutcome,
    },
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Pixel position of the player's top-left corner.
    pub position: IVec2,
    /// Grid cell containing the player, if the player lies on the grid.
    pub cell: Option<CellCoord>,
    /// Current facing direction, `None` while standing still.
    pub facing: Option<Direction>,
    /// Accumulated score.
    pub points: u32,
    /// Lives left.
    pub lives: u32,
    /// Whether the player is alive this tick.
    pub alive: bool,
    /// Current power state.
    pub power: PowerState,
}

/// Immutable representation of a single pursuer's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PursuerSnapshot {
    /// Personality of the pursuer.
    pub kind: PursuerKind,
    /// Active mode.
    pub mode: PursuerMode,
    /// Grid cell currently occupied by the pursuer.
    pub cell: CellCoord,
    /// Head of the cached route, if any.
    pub next_hop: Option<CellCoord>,
    /// Number of cells left on the cached route.
    pub route_len: usize,
    /// Ticks elapsed since the route was last replaced.
    pub ticks_since_replan: u32,
    /// Whether the pursuer spent this tick resting at its retreat point.
    pub resting: bool,
}

/// Read-only snapshot describing all pursuers in spawn order.
#[derive(Clone, Debug, Default)]
pub struct PursuerView {
    snapshots: Vec<PursuerSnapshot>,
}

impl PursuerView {
    /// Creates a new pursuer view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PursuerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.kind);
        Self { snapshots }
    }

    /// Iterator over the captured pursuer snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PursuerSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the pursuer with the provided kind.
    #[must_use]
    pub fn get(&self, kind: PursuerKind) -> Option<&PursuerSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.kind == kind)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PursuerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an item slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemSnapshot {
    /// Slot identifier.
    pub id: ItemId,
    /// Kind of item held by the slot.
    pub kind: ItemKind,
    /// Cell the item occupies.
    pub cell: CellCoord,
    /// Whether the item can currently be collected.
    pub visible: bool,
}

/// Read-only snapshot describing every item slot.
#[derive(Clone, Debug, Default)]
pub struct ItemView {
    snapshots: Vec<ItemSnapshot>,
}

impl ItemView {
    /// Creates a new item view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ItemSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured item snapshots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemSnapshot> {
        self.snapshots.iter()
    }

    /// Reports whether a visible item occupies the provided cell.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.snapshots
            .iter()
            .any(|snapshot| snapshot.visible && snapshot.cell == cell)
    }

    /// Number of coins that are still visible.
    #[must_use]
    pub fn remaining_coins(&self) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.visible && snapshot.kind == ItemKind::Coin)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_ne!(direction, direction.opposite());
            assert_eq!(direction, direction.opposite().opposite());
        }
    }

    #[test]
    fn step_refuses_negative_coordinates() {
        let origin = CellCoord::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(CellCoord::new(1, 0)));
        assert_eq!(origin.step(Direction::Down), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn pixel_conversion_aligns_to_cell_edges() {
        let cell = CellCoord::new(15, 15);
        assert_eq!(cell.to_pixel(25), IVec2::new(375, 375));
        assert_eq!(CellCoord::from_pixel(IVec2::new(375, 399), 25), Some(cell));
        assert_eq!(CellCoord::from_pixel(IVec2::new(-1, 10), 25), None);
    }

    #[test]
    fn pursuer_kind_indices_follow_spawn_order() {
        for (index, kind) in PursuerKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), index);
        }
    }

    #[test]
    fn item_view_counts_only_visible_coins() {
        let view = ItemView::from_snapshots(vec![
            ItemSnapshot {
                id: ItemId::new(1),
                kind: ItemKind::Coin,
                cell: CellCoord::new(1, 1),
                visible: false,
            },
            ItemSnapshot {
                id: ItemId::new(0),
                kind: ItemKind::Coin,
                cell: CellCoord::new(2, 1),
                visible: true,
            },
            ItemSnapshot {
                id: ItemId::new(2),
                kind: ItemKind::PowerUp,
                cell: CellCoord::new(3, 1),
                visible: true,
            },
        ]);

        assert_eq!(view.remaining_coins(), 1);
        assert!(view.is_occupied(CellCoord::new(3, 1)));
        assert!(!view.is_occupied(CellCoord::new(1, 1)));
        assert_eq!(view.iter().next().map(|item| item.id), Some(ItemId::new(0)));
    }
}
