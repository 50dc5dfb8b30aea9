//! Static maze layout shared by the world and the planning systems.

use glam::IVec2;
use thiserror::Error;

use crate::{CellCoord, Direction};

/// Kind of terrain occupying a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Walkable corridor.
    Path,
    /// Solid wall that blocks movement.
    Wall,
    /// Walkable corridor leading to the screen edge where entities wrap around.
    WrapPath,
}

impl TileKind {
    /// Reports whether entities may not enter tiles of this kind.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Errors raised by grid accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The requested index lies outside `[0, columns) x [0, rows)`.
    #[error("cell ({column}, {row}) lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        /// Requested column.
        column: i64,
        /// Requested row.
        row: i64,
        /// Number of columns in the grid.
        columns: u32,
        /// Number of rows in the grid.
        rows: u32,
    },
    /// Rows of a layout disagree about the grid width.
    #[error("row {row} has {found} cells but the grid is {expected} cells wide")]
    Misshapen {
        /// Offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
}

/// One grid square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    kind: TileKind,
    coord: CellCoord,
    blocks_movement: bool,
}

impl Cell {
    fn new(kind: TileKind, coord: CellCoord) -> Self {
        Self {
            kind,
            coord,
            blocks_movement: kind.blocks_movement(),
        }
    }

    /// Terrain kind of the cell.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Grid coordinate of the cell.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Whether entities are stopped by this cell.
    #[must_use]
    pub const fn blocks_movement(&self) -> bool {
        self.blocks_movement
    }
}

/// Fixed-size maze grid stored in row-major order.
///
/// Kinds are only written while the level is being assembled. Search
/// bookkeeping lives with the pathfinder, never on the cells, so any number
/// of searches may read the same grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell has the provided kind.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, kind: TileKind) -> Self {
        let mut cells = Vec::with_capacity(columns as usize * rows as usize);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::new(kind, CellCoord::new(column, row)));
            }
        }
        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Builds a grid from rows of tile kinds, top row first.
    pub fn from_rows(rows: &[Vec<TileKind>]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * rows.len());

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Misshapen {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            for (column_index, kind) in row.iter().enumerate() {
                let coord = CellCoord::new(column_index as u32, row_index as u32);
                cells.push(Cell::new(*kind, coord));
            }
        }

        Ok(Self {
            columns: width as u32,
            rows: rows.len() as u32,
            cells,
        })
    }

    /// Overwrites the kind of a single cell while assembling a level.
    pub fn set_kind(&mut self, coord: CellCoord, kind: TileKind) -> Result<(), GridError> {
        let index = self.index_of(coord)?;
        self.cells[index] = Cell::new(kind, coord);
        Ok(())
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Every cell in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.column() < self.columns && coord.row() < self.rows
    }

    /// Cell at signed grid indices, failing outside `[0, size)`.
    pub fn cell_at(&self, column: i64, row: i64) -> Result<&Cell, GridError> {
        let out_of_bounds = GridError::OutOfBounds {
            column,
            row,
            columns: self.columns,
            rows: self.rows,
        };
        let column = u32::try_from(column).map_err(|_| out_of_bounds)?;
        let row = u32::try_from(row).map_err(|_| out_of_bounds)?;
        self.cell(CellCoord::new(column, row))
    }

    /// Cell at the provided coordinate.
    pub fn cell(&self, coord: CellCoord) -> Result<&Cell, GridError> {
        let index = self.index_of(coord)?;
        Ok(&self.cells[index])
    }

    /// Row-major index of the coordinate.
    pub fn index_of(&self, coord: CellCoord) -> Result<usize, GridError> {
        if !self.contains(coord) {
            return Err(GridError::OutOfBounds {
                column: i64::from(coord.column()),
                row: i64::from(coord.row()),
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(coord.row() as usize * self.columns as usize + coord.column() as usize)
    }

    /// Cell stored at a row-major index.
    #[must_use]
    pub fn cell_by_index(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Orthogonal neighbours in the fixed order left, right, up, down.
    ///
    /// Neighbours outside the grid are omitted. Diagonals are never produced.
    #[must_use]
    pub fn neighbors(&self, coord: CellCoord) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for direction in [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ] {
            if let Some(candidate) = coord.step(direction) {
                if self.contains(candidate) {
                    neighbors.push(candidate);
                }
            }
        }
        neighbors
    }

    /// Grid cell containing the pixel, if it lies on the grid.
    #[must_use]
    pub fn cell_containing(&self, point: IVec2, cell_size: i32) -> Option<CellCoord> {
        CellCoord::from_pixel(point, cell_size).filter(|cell| self.contains(*cell))
    }

    /// Total grid width in pixels.
    #[must_use]
    pub fn pixel_width(&self, cell_size: i32) -> i32 {
        self.columns as i32 * cell_size
    }

    /// Total grid height in pixels.
    #[must_use]
    pub fn pixel_height(&self, cell_size: i32) -> i32 {
        self.rows as i32 * cell_size
    }
}

/// Up to four orthogonal neighbours of a cell.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<CellCoord>; 4],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}
