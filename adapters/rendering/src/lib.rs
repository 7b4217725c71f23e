#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tower of Go adapters.
//!
//! A [`Screen`] is a caller-owned grid of coloured characters. Adapters
//! construct one, call [`Screen::render`] with the current game state each
//! frame, and hand the grid to a [`RenderingBackend`] that knows how to put
//! it on an actual terminal.

mod text;

use anyhow::Result as AnyResult;
use thiserror::Error;
use tower_of_go_core::{FloorFeature, ObjectClass, Position};
use tower_of_go_world::{query, FieldElement, GameState};

pub use text::{rank_message, ScreenText};

/// Minimum number of screen rows, borders included.
pub const MIN_SCREEN_ROWS: usize = 26;

/// Minimum number of screen columns, borders included.
pub const MIN_SCREEN_COLUMNS: usize = 82;

const FIELD_ORIGIN: Position = Position::new(2, 2);

/// Terminal palette used by the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    /// Black.
    #[default]
    Black,
    /// White.
    White,
    /// Yellow.
    Yellow,
    /// Green.
    Green,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
}

/// One character cell of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenElement {
    /// Character drawn in the cell.
    pub symbol: char,
    /// Colour of the character.
    pub foreground: Color,
    /// Colour behind the character.
    pub background: Color,
}

impl Default for ScreenElement {
    fn default() -> Self {
        Self {
            symbol: '_',
            foreground: Color::White,
            background: Color::Black,
        }
    }
}

/// Glyph and colour for a field cell. Objects cover floor features.
#[must_use]
pub fn glyph_for(element: &FieldElement) -> (char, Color) {
    match element.object_class() {
        ObjectClass::Hero => ('@', Color::Magenta),
        ObjectClass::Wall => ('#', Color::Yellow),
        ObjectClass::Empty => match element.floor_feature_class() {
            FloorFeature::Upstairs => ('<', Color::Green),
            FloorFeature::None => ('.', Color::White),
        },
    }
}

/// Character grid that a game state is drawn into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    rows: usize,
    columns: usize,
    elements: Vec<ScreenElement>,
    static_texts: Vec<ScreenText>,
}

impl Screen {
    /// Allocates a screen of the given extent filled with placeholder cells.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            elements: vec![ScreenElement::default(); rows * columns],
            static_texts: Vec::new(),
        }
    }

    /// Allocates a screen large enough for a field of the given extent,
    /// including the title, key help and game description.
    #[must_use]
    pub fn for_field(field_rows: usize, field_columns: usize) -> Self {
        let panel_column = panel_column(field_columns);
        let rows = MIN_SCREEN_ROWS.max(field_rows + 14);
        let columns = MIN_SCREEN_COLUMNS.max(panel_column + 50);
        let mut screen = Self::new(rows, columns);
        screen.static_texts = text::static_texts(panel_column);
        screen
    }

    /// Number of screen rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of screen columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Iterates over screen lines from top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &[ScreenElement]> {
        self.elements.chunks(self.columns.max(1))
    }

    /// Retrieves the cell at `position`.
    pub fn at(&self, position: Position) -> Result<&ScreenElement, RenderingError> {
        let index = self.index(position)?;
        Ok(&self.elements[index])
    }

    /// Retrieves the cell at `position` for in-place mutation.
    pub fn at_mut(&mut self, position: Position) -> Result<&mut ScreenElement, RenderingError> {
        let index = self.index(position)?;
        Ok(&mut self.elements[index])
    }

    /// Draws borders, the field, and the side panel for `state`.
    pub fn render(&mut self, state: &GameState) -> Result<(), RenderingError> {
        self.draw_borders();

        for element in query::elements(state) {
            let position = element.position();
            let target = Position::new(
                FIELD_ORIGIN.y() + position.y(),
                FIELD_ORIGIN.x() + position.x(),
            );
            let (symbol, foreground) = glyph_for(element);
            let cell = self.at_mut(target)?;
            cell.symbol = symbol;
            cell.foreground = foreground;
            cell.background = Color::Black;
        }

        let (_, field_columns) = query::dimensions(state);
        let dynamic = text::dynamic_texts(state, panel_column(field_columns));
        let static_texts = std::mem::take(&mut self.static_texts);
        let placed = static_texts
            .iter()
            .chain(dynamic.iter())
            .try_for_each(|text| self.place_text(text));
        self.static_texts = static_texts;
        placed
    }

    /// Joins the screen symbols line by line.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.lines()
            .map(|line| line.iter().map(|element| element.symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw_borders(&mut self) {
        let (rows, columns) = (self.rows, self.columns);
        for (index, element) in self.elements.iter_mut().enumerate() {
            let (y, x) = (index / columns, index % columns);
            let top_or_bottom = y == 0 || y + 1 == rows;
            let left_or_right = x == 0 || x + 1 == columns;
            element.symbol = match (top_or_bottom, left_or_right) {
                (true, true) => '+',
                (true, false) => '-',
                (false, true) => '|',
                (false, false) => ' ',
            };
            element.foreground = Color::White;
            element.background = Color::Black;
        }
    }

    fn place_text(&mut self, text: &ScreenText) -> Result<(), RenderingError> {
        let origin = text.position;
        for (offset, character) in text.text.chars().enumerate() {
            let position = Position::new(origin.y(), origin.x() + offset as i32);
            let cell = self.at_mut(position)?;
            cell.symbol = character;
            cell.foreground = text.foreground;
        }
        Ok(())
    }

    fn index(&self, position: Position) -> Result<usize, RenderingError> {
        match (position.row_index(), position.column_index()) {
            (Some(row), Some(column)) if position.validate(self.rows, self.columns) => {
                Ok(row * self.columns + column)
            }
            _ => Err(RenderingError::OutOfBounds {
                position,
                rows: self.rows,
                columns: self.columns,
            }),
        }
    }
}

fn panel_column(field_columns: usize) -> usize {
    FIELD_ORIGIN.column_index().unwrap_or(0) + field_columns + 3
}

/// Rendering backend capable of presenting Tower of Go screens.
pub trait RenderingBackend {
    /// Puts the screen on the output device, replacing the previous frame.
    fn present(&mut self, screen: &Screen) -> AnyResult<()>;
}

/// Errors that can occur while drawing into a screen.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderingError {
    /// Something was drawn outside the screen extent.
    #[error("position {position} does not exist on the {rows}x{columns} screen")]
    OutOfBounds {
        /// Position that failed validation.
        position: Position,
        /// Number of screen rows.
        rows: usize,
        /// Number of screen columns.
        columns: usize,
    },
}
