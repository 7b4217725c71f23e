//! Randomized maze generation.
//!
//! Rooms sit on odd coordinates strictly inside the outer border. An
//! iterative depth-first carve visits every room exactly once, knocking down
//! the wall between a room and the neighbour it was reached from, so the
//! resulting maze is perfect: every room is reachable from every other room
//! along exactly one path.

use std::collections::VecDeque;

use rand::Rng;
use tower_of_go_core::{Direction, Position};

use crate::WorldError;

/// Complete wall and staircase layout for a single floor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MazeLayout {
    walls: Vec<bool>,
    upstairs: Position,
}

impl MazeLayout {
    pub(crate) fn is_wall(&self, index: usize) -> bool {
        self.walls.get(index).copied().unwrap_or(true)
    }

    pub(crate) fn upstairs(&self) -> Position {
        self.upstairs
    }
}

/// Generates a maze whose entrance room connects to the upstairs room.
///
/// The upstairs marker goes on the lower-right most room. Nothing about the
/// caller's field is touched; the layout is applied afterwards in one pass.
pub(crate) fn generate<R>(
    rows: usize,
    columns: usize,
    entrance: Position,
    rng: &mut R,
) -> Result<MazeLayout, WorldError>
where
    R: Rng + ?Sized,
{
    if rows < 3 || columns < 3 {
        return Err(WorldError::MazeGenerationFailed {
            reason: "the field must be at least 3x3",
        });
    }

    let room_rows = (rows - 1) / 2;
    let room_columns = (columns - 1) / 2;
    if room_rows * room_columns < 2 {
        return Err(WorldError::MazeGenerationFailed {
            reason: "the field has no room left for the upstairs",
        });
    }

    let Some(entrance_room) = room_of(entrance, room_rows, room_columns) else {
        return Err(WorldError::MazeGenerationFailed {
            reason: "the entrance must lie on an odd row and column inside the border",
        });
    };

    let mut walls = vec![true; rows * columns];
    let mut visited = vec![false; room_rows * room_columns];
    let mut stack = vec![entrance_room];
    visited[entrance_room.0 * room_columns + entrance_room.1] = true;
    walls[cell_index(room_center(entrance_room), columns)] = false;

    while let Some(&(row, column)) = stack.last() {
        let candidates: Vec<(usize, usize)> = neighbour_rooms(row, column, room_rows, room_columns)
            .into_iter()
            .flatten()
            .filter(|&(r, c)| !visited[r * room_columns + c])
            .collect();

        if candidates.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let next = candidates[rng.gen_range(0..candidates.len())];
        let (from_y, from_x) = room_center((row, column));
        let (to_y, to_x) = room_center(next);
        walls[cell_index(((from_y + to_y) / 2, (from_x + to_x) / 2), columns)] = false;
        walls[cell_index((to_y, to_x), columns)] = false;
        visited[next.0 * room_columns + next.1] = true;
        stack.push(next);
    }

    let (upstairs_y, upstairs_x) = room_center((room_rows - 1, room_columns - 1));
    let layout = MazeLayout {
        walls,
        upstairs: to_position(upstairs_y, upstairs_x),
    };

    let reachable = is_reachable(rows, columns, entrance, layout.upstairs, |index| {
        !layout.is_wall(index)
    });
    if !reachable {
        return Err(WorldError::MazeGenerationFailed {
            reason: "the upstairs is not reachable from the entrance",
        });
    }

    Ok(layout)
}

/// Breadth-first search over 4-directional moves restricted to passable cells.
///
/// The start cell counts as passable regardless of `passable`, so a search may
/// begin on a cell occupied by the searching object itself.
pub(crate) fn is_reachable<F>(
    rows: usize,
    columns: usize,
    from: Position,
    to: Position,
    passable: F,
) -> bool
where
    F: Fn(usize) -> bool,
{
    if !from.validate(rows, columns) || !to.validate(rows, columns) {
        return false;
    }
    if from == to {
        return true;
    }

    let mut seen = vec![false; rows * columns];
    let mut frontier = VecDeque::new();
    seen[position_index(from, columns)] = true;
    frontier.push_back(from);

    while let Some(current) = frontier.pop_front() {
        for direction in Direction::ALL {
            let next = current.step(direction);
            if !next.validate(rows, columns) {
                continue;
            }
            let index = position_index(next, columns);
            if seen[index] || !passable(index) {
                continue;
            }
            if next == to {
                return true;
            }
            seen[index] = true;
            frontier.push_back(next);
        }
    }

    false
}

/// Row-major index of a validated position.
pub(crate) fn position_index(position: Position, columns: usize) -> usize {
    let row = position.row_index().unwrap_or(0);
    let column = position.column_index().unwrap_or(0);
    row * columns + column
}

/// Builds a position from row-major matrix indices; field extents never exceed `i32::MAX`.
pub(crate) fn to_position(row: usize, column: usize) -> Position {
    Position::new(row as i32, column as i32)
}

fn room_of(position: Position, room_rows: usize, room_columns: usize) -> Option<(usize, usize)> {
    let row = position.row_index()?;
    let column = position.column_index()?;
    if row % 2 == 0 || column % 2 == 0 {
        return None;
    }
    let room = (row / 2, column / 2);
    (room.0 < room_rows && room.1 < room_columns).then_some(room)
}

fn room_center(room: (usize, usize)) -> (usize, usize) {
    (room.0 * 2 + 1, room.1 * 2 + 1)
}

fn cell_index((row, column): (usize, usize), columns: usize) -> usize {
    row * columns + column
}

fn neighbour_rooms(
    row: usize,
    column: usize,
    room_rows: usize,
    room_columns: usize,
) -> [Option<(usize, usize)>; 4] {
    [
        row.checked_sub(1).map(|r| (r, column)),
        (column + 1 < room_columns).then_some((row, column + 1)),
        (row + 1 < room_rows).then_some((row + 1, column)),
        column.checked_sub(1).map(|c| (row, c)),
    ]
}
