#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure state transitions that drive a Tower of Go run.
//!
//! Every reducer takes the current [`GameState`] by value together with its
//! input and hands back the next state plus a flag telling whether anything
//! observable changed. Reducers perform no I/O. Every fallible step runs
//! before the first mutation, so a [`ReduceError`] always returns the input
//! state untouched and the caller may retry or abort the tick.
//!
//! Within one driving-loop tick, input reducers ([`start_or_restart_game`],
//! [`walk_hero`]) must be applied before [`advance_time`], so that a step onto
//! the staircase is evaluated against the floor it was taken on.

use std::time::Duration;

use thiserror::Error;
use tower_of_go_core::{Command, Direction, FloorFeature, ObjectClass};
use tower_of_go_world::{Field, FieldElement, GameState, WorldError};
use tracing::debug;

/// Successful outcome of a reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// State to use from now on.
    pub state: GameState,
    /// Whether any observable mutation occurred.
    pub changed: bool,
}

impl Reduction {
    fn changed(state: GameState) -> Self {
        Self {
            state,
            changed: true,
        }
    }

    fn unchanged(state: GameState) -> Self {
        Self {
            state,
            changed: false,
        }
    }
}

/// Lower-layer failure paired with the untouched input state.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ReduceError {
    state: Box<GameState>,
    source: WorldError,
}

impl ReduceError {
    fn new(state: GameState, source: WorldError) -> Self {
        Self {
            state: Box::new(state),
            source,
        }
    }

    /// Error reported by the field or game.
    #[must_use]
    pub const fn error(&self) -> &WorldError {
        &self.source
    }

    /// State the reducer received, unchanged.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Recovers the unchanged input state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        *self.state
    }
}

/// Result returned by every reducer.
pub type ReduceResult = Result<Reduction, ReduceError>;

/// Dispatches `command` to the matching reducer.
pub fn apply(state: GameState, command: Command) -> ReduceResult {
    match command {
        Command::StartOrRestartGame => start_or_restart_game(state),
        Command::WalkHero { direction } => walk_hero(state, direction),
        Command::AdvanceTime { delta } => advance_time(state, delta),
    }
}

/// Generates a fresh maze, places the hero at the entrance and starts a new run.
///
/// Always reports a change on success; the floor number restarts at one.
pub fn start_or_restart_game(mut state: GameState) -> ReduceResult {
    if let Err(error) = enter_new_maze(state.field_mut()) {
        return Err(ReduceError::new(state, error));
    }

    let now = state.execution_time();
    let game = state.game_mut();
    game.reset();
    game.start(now);

    Ok(Reduction::changed(state))
}

/// Advances the in-game clock by `delta`.
///
/// While a run is in progress this also climbs the stairs when the hero
/// stands on them and finishes the run once no time remains. Floor
/// completion is detected purely from the hero's cell.
pub fn advance_time(mut state: GameState, delta: Duration) -> ReduceResult {
    if state.game().is_running() {
        let on_upstairs = state
            .field()
            .element_of_hero()
            .map(|element| element.floor_feature_class() == FloorFeature::Upstairs);
        let on_upstairs = match on_upstairs {
            Ok(on_upstairs) => on_upstairs,
            Err(error) => return Err(ReduceError::new(state, error)),
        };

        if on_upstairs {
            if let Err(error) = enter_new_maze(state.field_mut()) {
                return Err(ReduceError::new(state, error));
            }
            state.game_mut().increment_floor_number();
        }

        let remaining = state
            .game()
            .calculate_remaining_time(state.execution_time());
        if remaining.is_zero() {
            state.game_mut().finish();
        }
    }

    state.alter_execution_time(delta);

    Ok(Reduction::changed(state))
}

/// Moves the hero one cell in `direction` when that cell is free.
///
/// Bumping into a wall or the field edge and any input after the run has
/// finished are normal outcomes reported as unchanged, not as errors.
pub fn walk_hero(mut state: GameState, direction: Direction) -> ReduceResult {
    if state.game().is_finished() {
        return Ok(Reduction::unchanged(state));
    }

    let from = match state.field().element_of_hero().map(FieldElement::position) {
        Ok(from) => from,
        Err(error) => return Err(ReduceError::new(state, error)),
    };
    let to = from.step(direction);

    if !to.validate(state.field().rows(), state.field().columns()) {
        debug!(%from, ?direction, "hero bumped into the field edge");
        return Ok(Reduction::unchanged(state));
    }

    let occupant = match state.field().at(to).map(FieldElement::object_class) {
        Ok(occupant) => occupant,
        Err(error) => return Err(ReduceError::new(state, error)),
    };
    if !occupant.is_empty() {
        debug!(%from, %to, ?occupant, "hero blocked");
        return Ok(Reduction::unchanged(state));
    }

    match state.field_mut().move_object(from, to) {
        Ok(()) => Ok(Reduction::changed(state)),
        Err(error) => Err(ReduceError::new(state, error)),
    }
}

fn enter_new_maze(field: &mut Field) -> Result<(), WorldError> {
    field.reset_maze()?;
    let entrance = field.entrance();
    field.place_object(entrance, ObjectClass::Hero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_of_go_core::Position;
    use tower_of_go_world::GameConfig;

    #[test]
    fn walk_reports_missing_hero_and_returns_state() {
        let state = GameState::default();
        let error = walk_hero(state.clone(), Direction::Right).expect_err("no hero yet");
        assert_eq!(error.error(), &WorldError::HeroNotFound);
        assert_eq!(error.into_state(), state);
    }

    #[test]
    fn advance_time_ignores_missing_hero_before_start() {
        let reduction =
            advance_time(GameState::default(), Duration::from_millis(16)).expect("idle tick");
        assert!(reduction.changed);
        assert_eq!(reduction.state.execution_time(), Duration::from_millis(16));
    }

    #[test]
    fn start_fails_verbatim_when_maze_cannot_be_generated() {
        let config = GameConfig {
            entrance: Position::new(0, 0),
            ..GameConfig::default()
        };
        let state = GameState::new(&config);
        let error = start_or_restart_game(state.clone()).expect_err("entrance on border");
        assert!(matches!(
            error.error(),
            WorldError::MazeGenerationFailed { .. }
        ));
        assert_eq!(error.state(), &state);
        assert!(!error.state().game().is_started());
    }

    #[test]
    fn apply_dispatches_each_command() {
        let started = apply(GameState::default(), Command::StartOrRestartGame)
            .expect("starts")
            .state;
        assert!(started.game().is_running());

        let ticked = apply(
            started,
            Command::AdvanceTime {
                delta: Duration::from_secs(1),
            },
        )
        .expect("ticks")
        .state;
        assert_eq!(ticked.execution_time(), Duration::from_secs(1));

        let walked = apply(
            ticked.clone(),
            Command::WalkHero {
                direction: Direction::Up,
            },
        )
        .expect("walks");
        assert!(!walked.changed, "the border wall blocks the entrance");
        assert_eq!(walked.state, ticked);
    }
}
