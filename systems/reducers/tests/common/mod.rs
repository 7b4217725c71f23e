use std::collections::VecDeque;

use tower_of_go_core::{Direction, FloorFeature, Position};
use tower_of_go_world::{query, FieldElement, GameState};

/// Position of the single upstairs marker on the current floor.
pub fn upstairs_position(state: &GameState) -> Position {
    query::elements(state)
        .find(|element| element.floor_feature_class() == FloorFeature::Upstairs)
        .map(FieldElement::position)
        .expect("every generated floor carries an upstairs marker")
}

/// Shortest sequence of steps leading the hero onto the upstairs.
pub fn route_to_upstairs(state: &GameState) -> Vec<Direction> {
    let field = state.field();
    let start = query::hero_position(state).expect("hero on the field");
    let goal = upstairs_position(state);
    let (rows, columns) = (field.rows(), field.columns());
    let index = |p: Position| p.y() as usize * columns + p.x() as usize;

    let mut came_from: Vec<Option<(Position, Direction)>> = vec![None; rows * columns];
    let mut seen = vec![false; rows * columns];
    let mut frontier = VecDeque::from([start]);
    seen[index(start)] = true;

    while let Some(current) = frontier.pop_front() {
        if current == goal {
            break;
        }
        for direction in Direction::ALL {
            let next = current.step(direction);
            let Ok(element) = field.at(next) else {
                continue;
            };
            if seen[index(next)] || !element.is_object_empty() {
                continue;
            }
            seen[index(next)] = true;
            came_from[index(next)] = Some((current, direction));
            frontier.push_back(next);
        }
    }

    let mut route = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        let (previous, direction) =
            came_from[index(cursor)].expect("upstairs reachable from the hero");
        route.push(direction);
        cursor = previous;
    }
    route.reverse();
    route
}
