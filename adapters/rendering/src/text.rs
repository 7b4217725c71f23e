use tower_of_go_core::Position;
use tower_of_go_world::{query, GameState};

use crate::Color;

/// Run of characters drawn left to right from `position` in one colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenText {
    /// Screen cell of the first character.
    pub position: Position,
    /// Characters to draw.
    pub text: String,
    /// Colour of every character.
    pub foreground: Color,
}

impl ScreenText {
    fn new(y: usize, x: usize, text: impl Into<String>, foreground: Color) -> Self {
        Self {
            position: Position::new(to_coordinate(y), to_coordinate(x)),
            text: text.into(),
            foreground,
        }
    }
}

/// Verdict shown once a run is over, by highest floor reached.
#[must_use]
pub fn rank_message(floor_number: u32) -> (&'static str, Color) {
    match floor_number {
        0..=2 => ("No good...", Color::White),
        3 => ("Good!", Color::Green),
        4 => ("Excellent!", Color::Green),
        5 => ("Marvelous!", Color::Green),
        _ => ("Gopher!!", Color::Cyan),
    }
}

/// Texts that never change during a session.
pub(crate) fn static_texts(panel_column: usize) -> Vec<ScreenText> {
    let mut texts = vec![
        ScreenText::new(0, 2, "[ A Tower of Go ]", Color::White),
        ScreenText::new(11, panel_column, "[ Operations ]", Color::White),
    ];
    texts.extend(sequential_texts(
        12,
        panel_column + 2,
        &[
            ("s", Color::Yellow),
            (": Start or restart the game", Color::White),
        ],
    ));
    texts.extend(sequential_texts(
        13,
        panel_column + 2,
        &[
            ("Arrow keys", Color::Yellow),
            (" or ", Color::White),
            ("k l j h", Color::Yellow),
            (": Move", Color::White),
        ],
    ));
    texts.extend(sequential_texts(
        14,
        panel_column + 2,
        &[("Ctrl-C", Color::Yellow), (": Quit", Color::White)],
    ));
    texts
}

/// Texts derived from the current state.
pub(crate) fn dynamic_texts(state: &GameState, panel_column: usize) -> Vec<ScreenText> {
    let remaining = query::remaining_time(state).as_secs_f64();
    let floor_number = query::floor_number(state);
    let mut texts = vec![
        ScreenText::new(3, panel_column, format!("Time : {remaining:4.1}"), Color::White),
        ScreenText::new(4, panel_column, format!("Floor: {floor_number:2}"), Color::White),
    ];
    if query::is_finished(state) {
        let (message, foreground) = rank_message(floor_number);
        texts.push(ScreenText::new(5, panel_column + 2, message, foreground));
    }

    let (field_rows, _) = query::dimensions(state);
    let time_limit = state.game().time_limit().as_secs();
    texts.push(ScreenText::new(
        field_rows + 5,
        3,
        "Move the player in the upper left to reach the stairs in the lower right.",
        Color::White,
    ));
    texts.push(ScreenText::new(
        field_rows + 6,
        3,
        format!("The score is the number of floors that can be reached within {time_limit} seconds."),
        Color::White,
    ));
    texts
}

/// Lays out `pieces` one after another on a single line.
fn sequential_texts(y: usize, x: usize, pieces: &[(&str, Color)]) -> Vec<ScreenText> {
    let mut column = x;
    pieces
        .iter()
        .map(|&(text, foreground)| {
            let placed = ScreenText::new(y, column, text, foreground);
            column += text.chars().count();
            placed
        })
        .collect()
}

fn to_coordinate(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_messages_follow_floor_thresholds() {
        assert_eq!(rank_message(1), ("No good...", Color::White));
        assert_eq!(rank_message(2), ("No good...", Color::White));
        assert_eq!(rank_message(3), ("Good!", Color::Green));
        assert_eq!(rank_message(4), ("Excellent!", Color::Green));
        assert_eq!(rank_message(5), ("Marvelous!", Color::Green));
        assert_eq!(rank_message(6), ("Gopher!!", Color::Cyan));
        assert_eq!(rank_message(40), ("Gopher!!", Color::Cyan));
    }

    #[test]
    fn sequential_texts_are_packed_end_to_end() {
        let texts = sequential_texts(
            1,
            4,
            &[("ab", Color::Yellow), ("cde", Color::White), ("f", Color::Cyan)],
        );
        let columns: Vec<i32> = texts.iter().map(|text| text.position.x()).collect();
        assert_eq!(columns, vec![4, 6, 9]);
        assert!(texts.iter().all(|text| text.position.y() == 1));
    }

    #[test]
    fn dynamic_texts_format_time_and_floor() {
        let texts = dynamic_texts(&GameState::default(), 25);
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[0].text, "Time : 30.0");
        assert_eq!(texts[0].position, Position::new(3, 25));
        assert_eq!(texts[1].text, "Floor:  1");
        assert_eq!(texts[3].position, Position::new(18, 3));
        assert!(texts[3].text.ends_with("within 30 seconds."));
    }
}
