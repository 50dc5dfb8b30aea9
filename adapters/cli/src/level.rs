//! Level source: CSV layouts and the built-in arena.

use maze_chase_core::{CellCoord, Grid, GridError, ItemKind, ItemSpawn, TileKind};
use thiserror::Error;

const ARENA_COLUMNS: u32 = 32;
const ARENA_ROWS: u32 = 31;
const ARENA_TUNNEL_ROW: u32 = 15;
const ARENA_SPAWN: CellCoord = CellCoord::new(15, 15);
const ARENA_POWER_UPS: [CellCoord; 4] = [
    CellCoord::new(2, 3),
    CellCoord::new(29, 3),
    CellCoord::new(29, 28),
    CellCoord::new(2, 28),
];

/// Grid layout plus the items placed on it at session start.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LevelLayout {
    pub(crate) grid: Grid,
    pub(crate) items: Vec<ItemSpawn>,
}

impl LevelLayout {
    /// Parses a comma separated level, one grid row per line.
    ///
    /// Tile codes: `-1` path, `0` wall, `1` coin, `2` power-up, `3` wrap path.
    /// Blank lines and trailing commas are ignored.
    pub(crate) fn parse(source: &str) -> Result<Self, LevelError> {
        let mut rows = Vec::new();
        let mut items = Vec::new();

        for (line_index, line) in source.lines().enumerate() {
            let tokens: Vec<&str> = line
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .collect();
            if tokens.is_empty() {
                continue;
            }

            let row = rows.len() as u32;
            let mut kinds = Vec::with_capacity(tokens.len());
            for (column, token) in tokens.into_iter().enumerate() {
                let code: i32 = token.parse().map_err(|_| LevelError::InvalidNumber {
                    line: line_index + 1,
                    column: column + 1,
                    token: token.to_owned(),
                })?;
                let (kind, item) = decode_tile(code).ok_or(LevelError::UnknownTile {
                    line: line_index + 1,
                    column: column + 1,
                    code,
                })?;
                if let Some(item_kind) = item {
                    items.push(ItemSpawn {
                        cell: CellCoord::new(column as u32, row),
                        kind: item_kind,
                    });
                }
                kinds.push(kind);
            }
            rows.push(kinds);
        }

        if rows.is_empty() {
            return Err(LevelError::Empty);
        }

        Ok(Self {
            grid: Grid::from_rows(&rows)?,
            items,
        })
    }

    /// Walled arena with a wrap-around tunnel, matching the default tuning.
    pub(crate) fn arena() -> Result<Self, LevelError> {
        let mut grid = Grid::filled(ARENA_COLUMNS, ARENA_ROWS, TileKind::Path);
        let mut items = Vec::new();

        for row in 0..ARENA_ROWS {
            for column in 0..ARENA_COLUMNS {
                let cell = CellCoord::new(column, row);
                let edge = column == 0 || column == ARENA_COLUMNS - 1;
                let kind = if edge && row == ARENA_TUNNEL_ROW {
                    TileKind::WrapPath
                } else if edge || row < 2 || row == ARENA_ROWS - 1 {
                    TileKind::Wall
                } else if column % 4 == 3 && row % 4 == 0 {
                    TileKind::Wall
                } else {
                    TileKind::Path
                };
                grid.set_kind(cell, kind)?;

                if kind != TileKind::Path || cell == ARENA_SPAWN {
                    continue;
                }
                if ARENA_POWER_UPS.contains(&cell) {
                    items.push(ItemSpawn {
                        cell,
                        kind: ItemKind::PowerUp,
                    });
                } else if (column + row) % 2 == 0 {
                    items.push(ItemSpawn {
                        cell,
                        kind: ItemKind::Coin,
                    });
                }
            }
        }

        Ok(Self { grid, items })
    }
}

fn decode_tile(code: i32) -> Option<(TileKind, Option<ItemKind>)> {
    match code {
        -1 => Some((TileKind::Path, None)),
        0 => Some((TileKind::Wall, None)),
        1 => Some((TileKind::Path, Some(ItemKind::Coin))),
        2 => Some((TileKind::Path, Some(ItemKind::PowerUp))),
        3 => Some((TileKind::WrapPath, None)),
        _ => None,
    }
}

/// Errors that can occur while reading a level.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LevelError {
    /// The source contained no rows.
    #[error("level contains no rows")]
    Empty,
    /// A token was not an integer.
    #[error("line {line}, column {column}: `{token}` is not a tile code")]
    InvalidNumber {
        /// One-based line of the token.
        line: usize,
        /// One-based position of the token within its line.
        column: usize,
        /// Offending token.
        token: String,
    },
    /// An integer did not name a known tile.
    #[error("line {line}, column {column}: unknown tile code {code}")]
    UnknownTile {
        /// One-based line of the token.
        line: usize,
        /// One-based position of the token within its line.
        column: usize,
        /// Offending code.
        code: i32,
    },
    /// The rows did not form a rectangle.
    #[error(transparent)]
    Shape(#[from] GridError),
}
