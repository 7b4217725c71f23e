#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Tower of Go.
//!
//! A [`GameState`] owns the [`Field`] holding the current maze, the [`Game`]
//! tracking the timer and floor count, and the monotonically advancing
//! execution time. Reducers thread it through every transition by value;
//! presentation adapters read it through the [`query`] module.

mod config;
mod error;
mod field;
mod game;
mod maze;

use std::time::Duration;

pub use config::GameConfig;
pub use error::WorldError;
pub use field::{Field, FieldElement};
pub use game::{Game, GamePhase};

/// Aggregate owning everything a transition may read or mutate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    field: Field,
    game: Game,
    execution_time: Duration,
}

impl GameState {
    /// Creates an unstarted state with a blank field.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            field: Field::new(config.rows, config.columns, config.entrance, config.seed),
            game: Game::new(config.time_limit),
            execution_time: Duration::ZERO,
        }
    }

    /// Field holding the current maze.
    #[must_use]
    pub const fn field(&self) -> &Field {
        &self.field
    }

    /// Mutable access to the field.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Timer and progress state.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access to the timer and progress state.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Current reading of the in-game clock.
    #[must_use]
    pub const fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Moves the in-game clock forward. The clock never runs backwards.
    pub fn alter_execution_time(&mut self, delta: Duration) {
        self.execution_time = self.execution_time.saturating_add(delta);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use std::time::Duration;

    use tower_of_go_core::Position;

    use super::{FieldElement, GameState};

    /// Number of rows and columns of the field.
    #[must_use]
    pub fn dimensions(state: &GameState) -> (usize, usize) {
        (state.field.rows(), state.field.columns())
    }

    /// Iterates over every field cell in row-major order.
    pub fn elements(state: &GameState) -> impl Iterator<Item = &FieldElement> {
        state.field.elements()
    }

    /// Position of the hero, if one is on the field.
    #[must_use]
    pub fn hero_position(state: &GameState) -> Option<Position> {
        state
            .field
            .element_of_hero()
            .ok()
            .map(FieldElement::position)
    }

    /// Time left in the current run.
    #[must_use]
    pub fn remaining_time(state: &GameState) -> Duration {
        state.game.calculate_remaining_time(state.execution_time)
    }

    /// Highest floor reached in the current run.
    #[must_use]
    pub fn floor_number(state: &GameState) -> u32 {
        state.game.floor_number()
    }

    /// Reports whether the current run has ended.
    #[must_use]
    pub fn is_finished(state: &GameState) -> bool {
        state.game.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_of_go_core::{ObjectClass, HERO_POSITION};

    #[test]
    fn new_state_is_blank_and_unstarted() {
        let state = GameState::default();
        assert_eq!(query::dimensions(&state), (12, 20));
        assert!(query::elements(&state).all(FieldElement::is_object_empty));
        assert_eq!(query::hero_position(&state), None);
        assert!(!state.game().is_started());
        assert_eq!(state.execution_time(), Duration::ZERO);
        assert_eq!(query::remaining_time(&state), Duration::from_secs(30));
    }

    #[test]
    fn execution_time_only_moves_forward() {
        let mut state = GameState::default();
        state.alter_execution_time(Duration::from_millis(250));
        state.alter_execution_time(Duration::ZERO);
        state.alter_execution_time(Duration::from_millis(750));
        assert_eq!(state.execution_time(), Duration::from_secs(1));
    }

    #[test]
    fn hero_position_follows_moves() {
        let mut state = GameState::default();
        state
            .field_mut()
            .place_object(HERO_POSITION, ObjectClass::Hero)
            .expect("blank field");
        state
            .field_mut()
            .move_object(HERO_POSITION, HERO_POSITION.step(tower_of_go_core::Direction::Down))
            .expect("blank field");
        assert_eq!(query::hero_position(&state), Some(tower_of_go_core::Position::new(2, 1)));
    }

    #[test]
    fn seeds_change_generated_mazes() {
        let config = GameConfig::default();
        let mut first = GameState::new(&config.with_seed(1));
        let mut second = GameState::new(&config.with_seed(2));
        first.field_mut().reset_maze().expect("generates");
        second.field_mut().reset_maze().expect("generates");
        let first_walls: Vec<ObjectClass> =
            query::elements(&first).map(FieldElement::object_class).collect();
        let second_walls: Vec<ObjectClass> =
            query::elements(&second).map(FieldElement::object_class).collect();
        assert_ne!(first_walls, second_walls);
    }
}
