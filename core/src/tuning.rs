//! Tunable constants that govern a session.

use std::time::Duration;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::{CellCoord, PursuerKind};

/// Aggregated tuning knobs for every adjustable aspect of a session.
///
/// Every field has a default, so configuration files may override any subset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Edge length of a grid cell in pixels; also the per-tick player speed.
    pub cell_size: i32,
    /// Cost of a straight step in the pathfinding metric.
    pub straight_move_cost: u32,
    /// Cost of a diagonal step in the pathfinding metric.
    pub diagonal_move_cost: u32,
    /// Ticks between forced replans while a route is still cached.
    pub replan_interval_ticks: u32,
    /// Time a frightened pursuer rests at its retreat point before chasing again.
    pub frightened_duration_ms: u64,
    /// Time the player stays powered up after collecting a power-up.
    pub power_up_duration_ms: u64,
    /// Points awarded for catching a pursuer while powered up.
    pub catch_bonus: u32,
    /// Points lost when a pursuer catches the player.
    pub death_penalty: u32,
    /// Points awarded per coin.
    pub coin_points: u32,
    /// Points awarded per power-up.
    pub power_up_points: u32,
    /// Lives the player starts with.
    pub starting_lives: u32,
    /// Pixel position the player spawns and respawns at.
    pub player_spawn: IVec2,
    /// Scatter targets and spawn cells, indexed by pursuer kind.
    pub home_corners: [CellCoord; 4],
    /// Frightened targets in pixels, indexed by pursuer kind.
    pub retreat_points: [IVec2; 4],
    /// Pixel rectangle sampled when picking random cells.
    pub random_target_bounds: PixelBounds,
    /// Samples drawn before giving up on finding a random walkable cell.
    pub random_target_attempts: u32,
    /// Upper bound of the per-tick power-up spawn roll.
    pub power_up_roll_max: u32,
    /// Rolls at or below this value spawn a power-up.
    pub power_up_roll_threshold: u32,
}

impl Tuning {
    /// Rest time of a frightened pursuer at its retreat point.
    #[must_use]
    pub const fn frightened_duration(&self) -> Duration {
        Duration::from_millis(self.frightened_duration_ms)
    }

    /// Length of the player's powered-up state.
    #[must_use]
    pub const fn power_up_duration(&self) -> Duration {
        Duration::from_millis(self.power_up_duration_ms)
    }

    /// Home corner of the provided pursuer kind.
    #[must_use]
    pub fn home_corner(&self, kind: PursuerKind) -> CellCoord {
        self.home_corners[kind.index()]
    }

    /// Retreat point of the provided pursuer kind, snapped to its grid cell.
    ///
    /// Returns `None` when the configured pixel lies above or left of the grid.
    #[must_use]
    pub fn retreat_cell(&self, kind: PursuerKind) -> Option<CellCoord> {
        CellCoord::from_pixel(self.retreat_points[kind.index()], self.cell_size)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cell_size: 25,
            straight_move_cost: 10,
            diagonal_move_cost: 15,
            replan_interval_ticks: 10,
            frightened_duration_ms: 7_000,
            power_up_duration_ms: 5_000,
            catch_bonus: 1_000,
            death_penalty: 500,
            coin_points: 10,
            power_up_points: 500,
            starting_lives: 3,
            player_spawn: IVec2::new(375, 375),
            home_corners: [
                CellCoord::new(1, 2),
                CellCoord::new(30, 2),
                CellCoord::new(30, 29),
                CellCoord::new(1, 29),
            ],
            retreat_points: [
                IVec2::new(350, 375),
                IVec2::new(375, 375),
                IVec2::new(400, 375),
                IVec2::new(425, 375),
            ],
            random_target_bounds: PixelBounds {
                min: IVec2::new(25, 50),
                max: IVec2::new(750, 725),
            },
            random_target_attempts: 4_096,
            power_up_roll_max: 1_000,
            power_up_roll_threshold: 5,
        }
    }
}

/// Inclusive pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    /// Top-left corner, inclusive.
    pub min: IVec2,
    /// Bottom-right corner, inclusive.
    pub max: IVec2,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retreat_points_snap_to_cells() {
        let tuning = Tuning::default();

        assert_eq!(
            tuning.retreat_cell(PursuerKind::Flanker),
            Some(CellCoord::new(14, 15))
        );
        assert_eq!(
            tuning.retreat_cell(PursuerKind::Wanderer),
            Some(CellCoord::new(17, 15))
        );
    }

    #[test]
    fn durations_are_expressed_in_milliseconds() {
        let tuning = Tuning::default();

        assert_eq!(tuning.frightened_duration(), Duration::from_secs(7));
        assert_eq!(tuning.power_up_duration(), Duration::from_secs(5));
    }

    #[test]
    fn tuning_round_trips_through_bincode() {
        let tuning = Tuning {
            replan_interval_ticks: 4,
            ..Tuning::default()
        };

        let bytes = bincode::serialize(&tuning).expect("serialize");
        let restored: Tuning = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, tuning);
    }
}
