#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core vocabulary shared across the Tower of Go engine.
//!
//! This crate defines the values that flow between adapters, the
//! authoritative game state, and the pure reducers. Adapters translate key
//! presses into [`Command`] values, reducers apply those commands to the
//! game state, and the presentation layer reads the resulting state through
//! read-only accessors.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Number of rows in the reference field configuration.
pub const DEFAULT_FIELD_ROWS: usize = 12;

/// Number of columns in the reference field configuration.
pub const DEFAULT_FIELD_COLUMNS: usize = 20;

/// Duration a single run lasts before the game finishes.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Cell where the hero is placed whenever a new maze is generated.
pub const HERO_POSITION: Position = Position::new(1, 1);

/// Commands that express every input the presentation layer may feed in.
///
/// Quitting is not a command: it terminates the driving loop without
/// touching the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Generates a fresh maze and starts a new run from floor one.
    StartOrRestartGame,
    /// Requests that the hero take a single step in the provided direction.
    WalkHero {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances the in-game clock by the provided delta time.
    AdvanceTime {
        /// Duration of time that elapsed since the previous advance.
        delta: Duration,
    },
}

/// Cardinal movement directions available to the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// All directions in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Row and column offsets of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

/// Location of a single matrix cell expressed as row and column coordinates.
///
/// A position is only meaningful relative to a matrix extent; consumers check
/// it with [`Position::validate`] rather than assuming it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    y: i32,
    x: i32,
}

impl Position {
    /// Creates a new position from a row and a column.
    #[must_use]
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Reports whether both coordinates fall inside `[0, rows)` and `[0, columns)`.
    #[must_use]
    pub fn validate(&self, rows: usize, columns: usize) -> bool {
        self.row_index().is_some_and(|row| row < rows)
            && self.column_index().is_some_and(|column| column < columns)
    }

    /// Returns the neighbouring position one step away in `direction`.
    ///
    /// The result is not validated and may lie outside any matrix.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dy, dx) = direction.delta();
        Self {
            y: self.y.saturating_add(dy),
            x: self.x.saturating_add(dx),
        }
    }

    /// Row index as `usize`, or `None` when negative.
    #[must_use]
    pub fn row_index(&self) -> Option<usize> {
        usize::try_from(self.y).ok()
    }

    /// Column index as `usize`, or `None` when negative.
    #[must_use]
    pub fn column_index(&self) -> Option<usize> {
        usize::try_from(self.x).ok()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Y={}, X={})", self.y, self.x)
    }
}

/// Movable or blocking occupant of a field cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectClass {
    /// Nothing occupies the cell.
    #[default]
    Empty,
    /// The player-controlled hero.
    Hero,
    /// An impassable wall segment.
    Wall,
}

impl ObjectClass {
    /// Reports whether the class denotes an unoccupied cell.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Static terrain marker that lies beneath any object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorFeature {
    /// Plain floor.
    #[default]
    None,
    /// Staircase leading to the next floor.
    Upstairs,
}
