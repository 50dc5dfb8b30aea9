//! Scripted input source standing in for keyboard polling.

use maze_chase_core::Direction;
use thiserror::Error;

/// Steering requests keyed by the tick on which they are issued.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputScript {
    entries: Vec<(u64, Option<Direction>)>,
}

impl InputScript {
    /// Parses `tick:direction` entries separated by commas, e.g. `1:up,8:left,20:none`.
    pub(crate) fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut entries = Vec::new();
        for entry in source.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (tick, direction) = entry
                .split_once(':')
                .ok_or_else(|| ScriptError::MissingSeparator(entry.to_owned()))?;
            let tick = tick
                .trim()
                .parse()
                .map_err(|_| ScriptError::InvalidTick(tick.trim().to_owned()))?;
            entries.push((tick, parse_direction(direction.trim())?));
        }
        entries.sort_by_key(|(tick, _)| *tick);
        Ok(Self { entries })
    }

    /// Requests scheduled for `tick`, in script order.
    pub(crate) fn at(&self, tick: u64) -> impl Iterator<Item = Option<Direction>> + '_ {
        self.entries
            .iter()
            .filter(move |(at, _)| *at == tick)
            .map(|(_, direction)| *direction)
    }
}

fn parse_direction(value: &str) -> Result<Option<Direction>, ScriptError> {
    match value.to_ascii_lowercase().as_str() {
        "up" => Ok(Some(Direction::Up)),
        "down" => Ok(Some(Direction::Down)),
        "left" => Ok(Some(Direction::Left)),
        "right" => Ok(Some(Direction::Right)),
        "none" => Ok(None),
        _ => Err(ScriptError::UnknownDirection(value.to_owned())),
    }
}

/// Errors that can occur while reading an input script.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    /// An entry lacked the `:` between tick and direction.
    #[error("entry `{0}` is not of the form tick:direction")]
    MissingSeparator(String),
    /// The tick was not a non-negative integer.
    #[error("`{0}` is not a tick number")]
    InvalidTick(String),
    /// The direction was not one of up, down, left, right, none.
    #[error("`{0}` is not a direction")]
    UnknownDirection(String),
}
