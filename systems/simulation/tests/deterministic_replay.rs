use std::time::Duration;

use glam::IVec2;
use maze_chase_core::{
    CellCoord, Direction, Event, Grid, ItemKind, ItemSpawn, PixelBounds, PlayerSnapshot,
    PursuerKind, PursuerSnapshot, SessionOutcome, TileKind, Tuning,
};
use maze_chase_system_simulation::Simulation;
use maze_chase_world::query;

const CELL: i32 = 25;

fn level() -> (Grid, Vec<ItemSpawn>) {
    let mut grid = Grid::filled(11, 11, TileKind::Path);
    for index in 0..11 {
        for cell in [
            CellCoord::new(index, 0),
            CellCoord::new(index, 10),
            CellCoord::new(0, index),
            CellCoord::new(10, index),
        ] {
            grid.set_kind(cell, TileKind::Wall).expect("inside grid");
        }
    }
    for cell in [
        CellCoord::new(3, 3),
        CellCoord::new(7, 3),
        CellCoord::new(3, 7),
        CellCoord::new(7, 7),
    ] {
        grid.set_kind(cell, TileKind::Wall).expect("inside grid");
    }

    let mut items = Vec::new();
    for column in 1..10 {
        items.push(ItemSpawn {
            cell: CellCoord::new(column, 1),
            kind: ItemKind::Coin,
        });
    }
    items.push(ItemSpawn {
        cell: CellCoord::new(5, 9),
        kind: ItemKind::PowerUp,
    });
    (grid, items)
}

fn tuning() -> Tuning {
    Tuning {
        player_spawn: CellCoord::new(5, 5).to_pixel(CELL),
        home_corners: [
            CellCoord::new(1, 1),
            CellCoord::new(9, 1),
            CellCoord::new(9, 9),
            CellCoord::new(1, 9),
        ],
        retreat_points: [
            CellCoord::new(4, 5).to_pixel(CELL),
            CellCoord::new(5, 4).to_pixel(CELL),
            CellCoord::new(6, 5).to_pixel(CELL),
            CellCoord::new(5, 6).to_pixel(CELL),
        ],
        random_target_bounds: PixelBounds {
            min: IVec2::new(CELL, CELL),
            max: IVec2::new(10 * CELL - 1, 10 * CELL - 1),
        },
        power_up_roll_threshold: 50,
        ..Tuning::default()
    }
}

fn script() -> Vec<(u64, Option<Direction>)> {
    vec![
        (1, Some(Direction::Up)),
        (6, Some(Direction::Left)),
        (12, Some(Direction::Right)),
        (25, Some(Direction::Down)),
        (40, None),
        (41, Some(Direction::Left)),
        (70, Some(Direction::Up)),
    ]
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    player: PlayerSnapshot,
    pursuers: Vec<PursuerSnapshot>,
}

fn replay(seed: u64, ticks: u64) -> ReplayOutcome {
    let (grid, items) = level();
    let mut simulation = Simulation::new(grid, &items, tuning(), seed);
    let script = script();
    let mut events = Vec::new();

    for tick in 1..=ticks {
        for (_, direction) in script.iter().filter(|(at, _)| *at == tick) {
            simulation.steer(*direction);
        }
        let report = simulation
            .step(Duration::from_millis(100))
            .expect("cells inside grid");
        events.extend(report.events);
    }

    ReplayOutcome {
        events,
        player: query::player(simulation.world()),
        pursuers: query::pursuer_view(simulation.world()).into_vec(),
    }
}

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(0x5eed, 200);
    let second = replay(0x5eed, 200);

    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn chasing_pursuers_advance_on_first_frame() {
    let (grid, items) = level();
    let mut simulation = Simulation::new(grid, &items, tuning(), 3);

    let report = simulation
        .step(Duration::from_millis(100))
        .expect("cells inside grid");

    for kind in [
        PursuerKind::Flanker,
        PursuerKind::Ambusher,
        PursuerKind::Patroller,
    ] {
        assert!(
            report.events.iter().any(|event| matches!(
                event,
                Event::PursuerAdvanced { pursuer, .. } if *pursuer == kind
            )),
            "{kind:?} did not advance"
        );
    }
    assert_eq!(report.tick, 1);
    assert_eq!(report.outcome, None);
}

#[test]
fn sessions_freeze_after_ending() {
    let (grid, _) = level();
    let coin = ItemSpawn {
        cell: CellCoord::new(5, 4),
        kind: ItemKind::Coin,
    };
    let mut simulation = Simulation::new(grid, &[coin], tuning(), 4);
    simulation.steer(Some(Direction::Up));

    let won = simulation
        .step(Duration::from_millis(100))
        .expect("cells inside grid");
    let after = simulation
        .step(Duration::from_millis(100))
        .expect("cells inside grid");

    assert!(won.events.contains(&Event::SessionEnded {
        outcome: SessionOutcome::Won,
    }));
    assert!(after.events.is_empty());
    assert_eq!(after.tick, 1);
}
