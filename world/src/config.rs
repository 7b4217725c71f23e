use std::time::Duration;

use tower_of_go_core::{
    Position, DEFAULT_FIELD_COLUMNS, DEFAULT_FIELD_ROWS, DEFAULT_TIME_LIMIT, HERO_POSITION,
};

const DEFAULT_MAZE_SEED: u64 = 0x746f_7765_725f_676f;

/// Parameters fixed for the lifetime of a [`crate::GameState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of field rows.
    pub rows: usize,
    /// Number of field columns.
    pub columns: usize,
    /// Length of a single run.
    pub time_limit: Duration,
    /// Cell where the hero enters every maze.
    pub entrance: Position,
    /// Seed driving maze generation.
    pub seed: u64,
}

impl GameConfig {
    /// Returns a copy of the configuration with a different maze seed.
    #[must_use]
    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_FIELD_ROWS,
            columns: DEFAULT_FIELD_COLUMNS,
            time_limit: DEFAULT_TIME_LIMIT,
            entrance: HERO_POSITION,
            seed: DEFAULT_MAZE_SEED,
        }
    }
}
