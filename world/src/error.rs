use thiserror::Error;
use tower_of_go_core::Position;

/// Failures surfaced by field, maze and game operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The position lies outside the matrix extent.
    #[error("position {position} does not exist on the {rows}x{columns} field")]
    OutOfBounds {
        /// Position that failed validation.
        position: Position,
        /// Number of rows in the field.
        rows: usize,
        /// Number of columns in the field.
        columns: usize,
    },
    /// A move was requested from a cell without an object.
    #[error("the object to be moved does not exist at {position}")]
    SourceEmpty {
        /// Source cell of the rejected move.
        position: Position,
    },
    /// A move or placement targeted a cell that already holds an object.
    #[error("an object already exists at {position}")]
    DestinationOccupied {
        /// Destination cell of the rejected move.
        position: Position,
    },
    /// No cell currently holds the hero.
    #[error("the hero is not on the field")]
    HeroNotFound,
    /// Maze generation could not produce a reachable layout.
    #[error("maze generation failed: {reason}")]
    MazeGenerationFailed {
        /// Human readable description of the failure.
        reason: &'static str,
    },
}
