use maze_chase_core::{CellCoord, Grid, GridError, TileKind};
use maze_chase_system_pathfinding::{distance_cost, MoveCosts, Pathfinder};

fn open_grid(columns: u32, rows: u32) -> Grid {
    Grid::filled(columns, rows, TileKind::Path)
}

fn assert_connected(route: &[CellCoord]) {
    for pair in route.windows(2) {
        let steps = pair[0].column().abs_diff(pair[1].column())
            + pair[0].row().abs_diff(pair[1].row());
        assert_eq!(steps, 1, "cells {:?} and {:?} not adjacent", pair[0], pair[1]);
    }
}

#[test]
fn open_three_by_three_route_uses_orthogonal_steps() {
    let grid = open_grid(3, 3);
    let mut pathfinder = Pathfinder::default();
    let start = CellCoord::new(0, 0);
    let goal = CellCoord::new(2, 2);

    let route = pathfinder
        .find_path(&grid, start, goal)
        .expect("endpoints inside grid");

    assert_eq!(
        route,
        vec![
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(0, 2),
            CellCoord::new(1, 2),
            CellCoord::new(2, 2),
        ]
    );
    assert_eq!(pathfinder.cost_to(&grid, goal), Some(40));
    assert_eq!(distance_cost(MoveCosts::default(), start, goal), 30);
}

#[test]
fn reachable_goals_produce_connected_routes() {
    let mut grid = open_grid(8, 6);
    for row in 0..5 {
        grid.set_kind(CellCoord::new(4, row), TileKind::Wall)
            .expect("inside grid");
    }
    let mut pathfinder = Pathfinder::default();

    for (start, goal) in [
        (CellCoord::new(0, 0), CellCoord::new(7, 0)),
        (CellCoord::new(7, 5), CellCoord::new(0, 3)),
        (CellCoord::new(3, 2), CellCoord::new(5, 2)),
    ] {
        let route = pathfinder
            .find_path(&grid, start, goal)
            .expect("endpoints inside grid");

        assert_eq!(route.first(), Some(&start));
        assert_eq!(route.last(), Some(&goal));
        assert_connected(&route);
        assert!(route
            .iter()
            .all(|cell| !grid.cell(*cell).expect("inside grid").blocks_movement()));
    }
}

#[test]
fn enclosed_goal_is_unreachable() {
    let mut grid = open_grid(5, 5);
    for cell in [
        CellCoord::new(1, 1),
        CellCoord::new(2, 1),
        CellCoord::new(3, 1),
        CellCoord::new(1, 2),
        CellCoord::new(3, 2),
        CellCoord::new(1, 3),
        CellCoord::new(2, 3),
        CellCoord::new(3, 3),
    ] {
        grid.set_kind(cell, TileKind::Wall).expect("inside grid");
    }
    let mut pathfinder = Pathfinder::default();

    let route = pathfinder
        .find_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 2))
        .expect("endpoints inside grid");

    assert!(route.is_empty());
}

#[test]
fn wrap_paths_are_walkable() {
    let mut grid = open_grid(3, 1);
    grid.set_kind(CellCoord::new(1, 0), TileKind::WrapPath)
        .expect("inside grid");
    let mut pathfinder = Pathfinder::default();

    let route = pathfinder
        .find_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 0))
        .expect("endpoints inside grid");

    assert_eq!(route.len(), 3);
}

#[test]
fn endpoints_outside_grid_fail() {
    let grid = open_grid(3, 3);
    let mut pathfinder = Pathfinder::default();

    let result = pathfinder.find_path(&grid, CellCoord::new(0, 0), CellCoord::new(3, 1));

    assert_eq!(
        result,
        Err(GridError::OutOfBounds {
            column: 3,
            row: 1,
            columns: 3,
            rows: 3,
        })
    );
}

#[test]
fn distance_cost_is_symmetric() {
    let costs = MoveCosts::default();
    for a_column in 0..6 {
        for a_row in 0..6 {
            for b_column in 0..6 {
                for b_row in 0..6 {
                    let a = CellCoord::new(a_column, a_row);
                    let b = CellCoord::new(b_column, b_row);
                    assert_eq!(distance_cost(costs, a, b), distance_cost(costs, b, a));
                }
            }
        }
    }
}

#[test]
fn reset_is_idempotent() {
    let grid = open_grid(4, 4);
    let mut pathfinder = Pathfinder::default();
    let _ = pathfinder
        .find_path(&grid, CellCoord::new(0, 0), CellCoord::new(3, 3))
        .expect("endpoints inside grid");

    pathfinder.reset(grid.cells().len());
    let once = pathfinder.records().to_vec();
    pathfinder.reset(grid.cells().len());

    assert_eq!(pathfinder.records(), once.as_slice());
}

#[test]
fn repeated_searches_do_not_leak_state() {
    let grid = open_grid(6, 6);
    let mut reused = Pathfinder::default();
    let _ = reused
        .find_path(&grid, CellCoord::new(5, 5), CellCoord::new(0, 0))
        .expect("endpoints inside grid");

    let second = reused
        .find_path(&grid, CellCoord::new(0, 5), CellCoord::new(4, 1))
        .expect("endpoints inside grid");
    let fresh = Pathfinder::default()
        .find_path(&grid, CellCoord::new(0, 5), CellCoord::new(4, 1))
        .expect("endpoints inside grid");

    assert_eq!(second, fresh);
}
