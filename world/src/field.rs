//! Maze topology, object placement and movement-with-collision.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tower_of_go_core::{FloorFeature, ObjectClass, Position};
use tracing::debug;

use crate::{
    maze::{self, position_index, to_position},
    WorldError,
};

/// Contents of a single field cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldElement {
    position: Position,
    object: ObjectClass,
    floor_feature: FloorFeature,
}

impl FieldElement {
    const fn empty_at(position: Position) -> Self {
        Self {
            position,
            object: ObjectClass::Empty,
            floor_feature: FloorFeature::None,
        }
    }

    /// Position of the cell within its field. Fixed for the cell's lifetime.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Object currently occupying the cell.
    #[must_use]
    pub const fn object_class(&self) -> ObjectClass {
        self.object
    }

    /// Static terrain marker beneath the object.
    #[must_use]
    pub const fn floor_feature_class(&self) -> FloorFeature {
        self.floor_feature
    }

    /// Reports whether no object occupies the cell.
    #[must_use]
    pub const fn is_object_empty(&self) -> bool {
        self.object.is_empty()
    }

    /// Replaces the object occupying the cell.
    ///
    /// Relocating an existing object must go through [`Field::move_object`].
    pub fn update_object_class(&mut self, object: ObjectClass) {
        self.object = object;
    }

    /// Replaces the terrain marker beneath the object.
    pub fn update_floor_feature_class(&mut self, floor_feature: FloorFeature) {
        self.floor_feature = floor_feature;
    }
}

/// Rectangular maze for the current floor.
///
/// Cells live in one contiguous row-major buffer whose shape is fixed at
/// construction; operations only ever rewrite cell contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    rows: usize,
    columns: usize,
    elements: Vec<FieldElement>,
    entrance: Position,
    rng: ChaCha8Rng,
}

impl Field {
    /// Creates a blank field whose mazes are drawn from `seed`.
    #[must_use]
    pub fn new(rows: usize, columns: usize, entrance: Position, seed: u64) -> Self {
        let mut elements = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                elements.push(FieldElement::empty_at(to_position(row, column)));
            }
        }
        Self {
            rows,
            columns,
            elements,
            entrance,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of rows in the field.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the field.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Cell where the hero enters each newly generated maze.
    #[must_use]
    pub const fn entrance(&self) -> Position {
        self.entrance
    }

    /// Iterates over every cell in row-major order.
    pub fn elements(&self) -> impl Iterator<Item = &FieldElement> {
        self.elements.iter()
    }

    /// Retrieves the cell at `position`.
    pub fn at(&self, position: Position) -> Result<&FieldElement, WorldError> {
        let index = self.index(position)?;
        Ok(&self.elements[index])
    }

    /// Retrieves the cell at `position` for in-place mutation.
    pub fn at_mut(&mut self, position: Position) -> Result<&mut FieldElement, WorldError> {
        let index = self.index(position)?;
        Ok(&mut self.elements[index])
    }

    /// Relocates the object at `from` into the empty cell at `to`.
    ///
    /// Objects are never created or destroyed by a move; `from` is left empty.
    pub fn move_object(&mut self, from: Position, to: Position) -> Result<(), WorldError> {
        let from_index = self.index(from)?;
        let object = self.elements[from_index].object;
        if object.is_empty() {
            return Err(WorldError::SourceEmpty { position: from });
        }

        let to_index = self.index(to)?;
        if !self.elements[to_index].is_object_empty() {
            return Err(WorldError::DestinationOccupied { position: to });
        }

        self.elements[to_index].object = object;
        self.elements[from_index].object = ObjectClass::Empty;
        Ok(())
    }

    /// Puts `object` into the empty cell at `position`.
    pub fn place_object(
        &mut self,
        position: Position,
        object: ObjectClass,
    ) -> Result<(), WorldError> {
        let element = self.at_mut(position)?;
        if !element.is_object_empty() {
            return Err(WorldError::DestinationOccupied { position });
        }
        element.update_object_class(object);
        Ok(())
    }

    /// Regenerates walls and the upstairs marker, removing the hero.
    ///
    /// The whole layout is generated before any cell is rewritten, so a
    /// failure leaves the previous maze intact.
    pub fn reset_maze(&mut self) -> Result<(), WorldError> {
        let layout = maze::generate(self.rows, self.columns, self.entrance, &mut self.rng)?;
        let upstairs = position_index(layout.upstairs(), self.columns);

        for (index, element) in self.elements.iter_mut().enumerate() {
            element.object = if layout.is_wall(index) {
                ObjectClass::Wall
            } else {
                ObjectClass::Empty
            };
            element.floor_feature = if index == upstairs {
                FloorFeature::Upstairs
            } else {
                FloorFeature::None
            };
        }

        debug!(
            rows = self.rows,
            columns = self.columns,
            upstairs = %layout.upstairs(),
            "maze regenerated"
        );
        Ok(())
    }

    /// Retrieves the cell currently holding the hero.
    pub fn element_of_hero(&self) -> Result<&FieldElement, WorldError> {
        self.elements
            .iter()
            .find(|element| element.object == ObjectClass::Hero)
            .ok_or(WorldError::HeroNotFound)
    }

    /// Reports whether `to` can be reached from `from` through empty cells.
    ///
    /// The search starts on `from` even when it holds an object, so it answers
    /// whether the object standing there could walk to `to`.
    #[must_use]
    pub fn is_reachable(&self, from: Position, to: Position) -> bool {
        maze::is_reachable(self.rows, self.columns, from, to, |index| {
            self.elements[index].is_object_empty()
        })
    }

    fn index(&self, position: Position) -> Result<usize, WorldError> {
        if position.validate(self.rows, self.columns) {
            Ok(position_index(position, self.columns))
        } else {
            Err(WorldError::OutOfBounds {
                position,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }
}
