//! Pursuer state owned by the world.

use std::{collections::VecDeque, time::Duration};

use maze_chase_core::{CellCoord, PursuerKind, PursuerMode, PursuerSnapshot};

use crate::mover::Mover;

#[derive(Clone, Debug)]
pub(crate) struct Pursuer {
    pub(crate) kind: PursuerKind,
    pub(crate) mode: PursuerMode,
    pub(crate) mover: Mover,
    pub(crate) cell: CellCoord,
    pub(crate) route: VecDeque<CellCoord>,
    pub(crate) ticks_since_replan: u32,
    pub(crate) idle: bool,
    rest_elapsed: Duration,
    home: CellCoord,
    retreat: Option<CellCoord>,
    cell_size: i32,
}

impl Pursuer {
    pub(crate) fn new(
        kind: PursuerKind,
        home: CellCoord,
        retreat: Option<CellCoord>,
        cell_size: i32,
    ) -> Self {
        Self {
            kind,
            mode: PursuerMode::Chase,
            mover: Mover::new(home.to_pixel(cell_size), cell_size),
            cell: home,
            route: VecDeque::new(),
            ticks_since_replan: 0,
            idle: false,
            rest_elapsed: Duration::ZERO,
            home,
            retreat,
            cell_size,
        }
    }

    pub(crate) fn place(&mut self, cell: CellCoord) {
        self.cell = cell;
        self.mover.place(cell.to_pixel(self.cell_size));
    }

    /// Whether the pursuer is frightened and already hiding at its retreat point.
    pub(crate) fn at_retreat(&self) -> bool {
        self.mode == PursuerMode::Frightened && self.retreat == Some(self.cell)
    }

    /// Accumulates rest time at the retreat point.
    ///
    /// Returns `true` exactly once, on the tick the rest completes and the
    /// pursuer returns to chasing.
    pub(crate) fn rest(&mut self, dt: Duration, limit: Duration) -> bool {
        self.rest_elapsed = self.rest_elapsed.saturating_add(dt);
        if self.rest_elapsed >= limit {
            self.mode = PursuerMode::Chase;
            self.rest_elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    pub(crate) fn assign_route(&mut self, route: Vec<CellCoord>) {
        self.route = route.into();
        self.ticks_since_replan = 0;
    }

    pub(crate) fn reset(&mut self) {
        self.mode = PursuerMode::Chase;
        self.place(self.home);
        self.route.clear();
        self.ticks_since_replan = 0;
        self.rest_elapsed = Duration::ZERO;
    }

    pub(crate) fn snapshot(&self) -> PursuerSnapshot {
        PursuerSnapshot {
            kind: self.kind,
            mode: self.mode,
            cell: self.cell,
            next_hop: self.route.front().copied(),
            route_len: self.route.len(),
            ticks_since_replan: self.ticks_since_replan,
            resting: self.idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frightened_at_retreat() -> Pursuer {
        let retreat = CellCoord::new(14, 15);
        let mut pursuer = Pursuer::new(PursuerKind::Flanker, CellCoord::new(1, 2), Some(retreat), 25);
        pursuer.mode = PursuerMode::Frightened;
        pursuer.place(retreat);
        pursuer
    }

    #[test]
    fn rest_completes_exactly_once() {
        let mut pursuer = frightened_at_retreat();
        let limit = Duration::from_secs(7);
        assert!(pursuer.at_retreat());

        assert!(!pursuer.rest(Duration::from_secs(6), limit));
        assert!(pursuer.rest(Duration::from_secs(1), limit));
        assert_eq!(pursuer.mode, PursuerMode::Chase);
        assert!(!pursuer.at_retreat());
        assert_eq!(pursuer.rest_elapsed, Duration::ZERO);
    }

    #[test]
    fn reset_restores_home_and_discards_route() {
        let mut pursuer = frightened_at_retreat();
        pursuer.assign_route(vec![CellCoord::new(14, 16)]);
        pursuer.ticks_since_replan = 4;

        pursuer.reset();

        assert_eq!(pursuer.mode, PursuerMode::Chase);
        assert_eq!(pursuer.cell, CellCoord::new(1, 2));
        assert_eq!(pursuer.mover.position(), CellCoord::new(1, 2).to_pixel(25));
        assert!(pursuer.route.is_empty());
        assert_eq!(pursuer.ticks_since_replan, 0);
    }
}
