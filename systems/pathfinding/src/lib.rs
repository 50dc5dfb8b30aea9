#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic A* search over the maze grid.
//!
//! Search bookkeeping lives in a side table owned by [`Pathfinder`] and is
//! cleared at the start of every call, so the grid itself is never mutated.

use maze_chase_core::{CellCoord, Grid, GridError, Tuning};
use tracing::debug;

/// Movement costs used by the octile distance estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveCosts {
    /// Cost of one orthogonal step.
    pub straight: u32,
    /// Cost of one diagonal step.
    pub diagonal: u32,
}

impl MoveCosts {
    /// Reads the costs from the provided tuning.
    #[must_use]
    pub const fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            straight: tuning.straight_move_cost,
            diagonal: tuning.diagonal_move_cost,
        }
    }
}

impl Default for MoveCosts {
    fn default() -> Self {
        Self {
            straight: 10,
            diagonal: 15,
        }
    }
}

/// Octile approximation of the cost between two cells.
///
/// Also serves as the search heuristic. Symmetric in its arguments.
#[must_use]
pub fn distance_cost(costs: MoveCosts, from: CellCoord, to: CellCoord) -> u32 {
    let dx = from.column().abs_diff(to.column());
    let dy = from.row().abs_diff(to.row());
    let diagonal = dx.min(dy);
    let straight = dx.abs_diff(dy);
    costs
        .diagonal
        .saturating_mul(diagonal)
        .saturating_add(costs.straight.saturating_mul(straight))
}

/// Per-cell scratch state recorded during a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRecord {
    /// Cost accumulated from the start, `None` while unvisited.
    pub g_cost: Option<u32>,
    /// Estimated cost to the goal.
    pub h_cost: u32,
    /// Index of the cell this one was reached from.
    pub came_from: Option<usize>,
}

impl SearchRecord {
    const UNVISITED: Self = Self {
        g_cost: None,
        h_cost: 0,
        came_from: None,
    };

    /// Sum of the accumulated and estimated costs, `None` while unvisited.
    #[must_use]
    pub fn f_cost(&self) -> Option<u32> {
        self.g_cost.map(|g| g.saturating_add(self.h_cost))
    }
}

/// Reusable A* search with private scratch storage.
#[derive(Debug, Default)]
pub struct Pathfinder {
    costs: MoveCosts,
    records: Vec<SearchRecord>,
    closed: Vec<bool>,
    in_open: Vec<bool>,
    open: Vec<usize>,
}

impl Pathfinder {
    /// Creates a pathfinder using the provided movement costs.
    #[must_use]
    pub fn new(costs: MoveCosts) -> Self {
        Self {
            costs,
            ..Self::default()
        }
    }

    /// Scratch records left by the most recent search, indexed row-major.
    #[must_use]
    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Clears all scratch state for a grid with `cell_count` cells.
    pub fn reset(&mut self, cell_count: usize) {
        self.records.clear();
        self.records.resize(cell_count, SearchRecord::UNVISITED);
        self.closed.clear();
        self.closed.resize(cell_count, false);
        self.in_open.clear();
        self.in_open.resize(cell_count, false);
        self.open.clear();
    }

    /// Finds a route from `start` to `goal`, both inclusive.
    ///
    /// Returns an empty route when the goal cannot be reached. Fails when
    /// either endpoint lies outside the grid.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        start: CellCoord,
        goal: CellCoord,
    ) -> Result<Vec<CellCoord>, GridError> {
        let start_index = grid.index_of(start)?;
        let goal_index = grid.index_of(goal)?;
        self.reset(grid.cells().len());

        self.records[start_index] = SearchRecord {
            g_cost: Some(0),
            h_cost: distance_cost(self.costs, start, goal),
            came_from: None,
        };
        self.push_open(start_index);

        while let Some(current) = self.pop_cheapest() {
            self.closed[current] = true;
            if current == goal_index {
                return Ok(self.reconstruct(grid, goal_index));
            }

            let Some(current_cell) = grid.cell_by_index(current) else {
                continue;
            };
            let current_coord = current_cell.coord();
            let current_g = self.records[current].g_cost.unwrap_or(0);

            for neighbor in grid.neighbors(current_coord) {
                let index = grid.index_of(neighbor)?;
                if self.closed[index] {
                    continue;
                }
                if grid.cell(neighbor)?.blocks_movement() {
                    self.closed[index] = true;
                    continue;
                }

                self.records[index] = SearchRecord {
                    g_cost: Some(
                        current_g.saturating_add(distance_cost(self.costs, current_coord, neighbor)),
                    ),
                    h_cost: distance_cost(self.costs, neighbor, goal),
                    came_from: Some(current),
                };
                self.push_open(index);
            }
        }

        debug!(?start, ?goal, "goal unreachable");
        Ok(Vec::new())
    }

    /// Accumulated cost recorded for `cell` by the most recent search.
    #[must_use]
    pub fn cost_to(&self, grid: &Grid, cell: CellCoord) -> Option<u32> {
        let index = grid.index_of(cell).ok()?;
        self.records.get(index)?.g_cost
    }

    fn push_open(&mut self, index: usize) {
        if !self.in_open[index] {
            self.in_open[index] = true;
            self.open.push(index);
        }
    }

    /// Removes the open entry with the lowest f-cost, earliest insertion winning ties.
    fn pop_cheapest(&mut self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (position, index) in self.open.iter().enumerate() {
            let f_cost = self.records[*index].f_cost().unwrap_or(u32::MAX);
            if best.map_or(true, |(_, lowest)| f_cost < lowest) {
                best = Some((position, f_cost));
            }
        }

        let (position, _) = best?;
        let index = self.open.remove(position);
        self.in_open[index] = false;
        Some(index)
    }

    fn reconstruct(&self, grid: &Grid, goal_index: usize) -> Vec<CellCoord> {
        let mut route = Vec::new();
        let mut cursor = Some(goal_index);
        while let Some(index) = cursor {
            let Some(cell) = grid.cell_by_index(index) else {
                break;
            };
            route.push(cell.coord());
            cursor = self.records[index].came_from;
        }
        route.reverse();
        route
    }
}
