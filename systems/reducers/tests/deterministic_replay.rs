mod common;

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use common::route_to_upstairs;
use tower_of_go_core::{Command, Direction, Position};
use tower_of_go_system_reducers::apply;
use tower_of_go_world::{query, GameConfig, GameState};

const FRAME: Duration = Duration::from_millis(50);
const FLOORS_TO_CLIMB: usize = 3;

#[test]
fn deterministic_replay_produces_expected_snapshot() {
    let first = replay(0x5eed);
    let second = replay(0x5eed);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.floor_number, FLOORS_TO_CLIMB as u32 + 1);
    assert_eq!(first.execution_time, Duration::from_secs(6));
    assert_eq!(first.hero, Some(Position::new(1, 1)));

    let fingerprint = first.fingerprint();
    let expected = 0xd417_5a7a_fae4_c754;
    assert_eq!(
        fingerprint, expected,
        "fingerprint mismatch: {fingerprint:#x}"
    );
}

#[test]
fn replay_runs_out_of_time_and_stays_finished() {
    let mut state = GameState::new(&GameConfig::default().with_seed(9));
    state = step(state, Command::StartOrRestartGame);

    let mut ticks = 0;
    while !query::is_finished(&state) {
        state = step(state, Command::AdvanceTime { delta: FRAME });
        ticks += 1;
        assert!(ticks < 10_000, "game never finished");
    }

    assert_eq!(ticks, 30_000 / 50 + 1);
    let frozen = state.clone();
    for direction in Direction::ALL {
        state = step(state, Command::WalkHero { direction });
    }
    assert_eq!(state, frozen);
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut state = GameState::new(&GameConfig::default().with_seed(seed));
    let mut log = Vec::new();

    state = step(state, Command::StartOrRestartGame);
    for _ in 0..FLOORS_TO_CLIMB {
        for direction in route_to_upstairs(&state) {
            let command = Command::WalkHero { direction };
            log.push(command);
            state = step(state, command);
            state = step(state, Command::AdvanceTime { delta: FRAME });
        }
    }

    // A few bumps into the border to exercise blocked moves.
    for direction in [Direction::Up, Direction::Left, Direction::Up] {
        let command = Command::WalkHero { direction };
        log.push(command);
        state = step(state, command);
    }

    ReplayOutcome {
        hero: query::hero_position(&state),
        floor_number: query::floor_number(&state),
        execution_time: state.execution_time(),
        finished: query::is_finished(&state),
        cells: query::elements(&state)
            .map(|element| (element.object_class(), element.floor_feature_class()))
            .collect(),
        commands: log,
    }
}

fn step(state: GameState, command: Command) -> GameState {
    match apply(state, command) {
        Ok(reduction) => reduction.state,
        Err(error) => panic!("unexpected reducer failure for {command:?}: {error}"),
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    hero: Option<Position>,
    floor_number: u32,
    execution_time: Duration,
    finished: bool,
    cells: Vec<(tower_of_go_core::ObjectClass, tower_of_go_core::FloorFeature)>,
    commands: Vec<Command>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
