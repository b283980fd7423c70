//! The ClassificationField records what each cell of the planning grid is.
//!
//! Every cell starts as [CellState::Free]. A single sweep over the cell
//! centres then marks cells outside of the environment boundary as
//! [CellState::Boundary] and cells inside an obstacle as [CellState::Obstacle].
//! The wavefront later converts each `Free` cell it reaches into
//! [CellState::Visited]. Transitions only ever leave `Free`, a cell never
//! reverts to an earlier state.
//!
//! A boundary square with a single obstacle might be classified as
//! (`B` boundary, `O` obstacle, `.` free):
//!
//! ```text
//!  _______________________________
//! |B |B |B |B |B |B |B |B |B |B |
//! |B |. |. |. |. |. |. |. |. |B |
//! |B |. |. |. |. |. |. |. |. |B |
//! |B |. |. |O |O |O |. |. |. |B |
//! |B |. |. |O |O |O |. |. |. |B |
//! |B |. |. |. |. |. |. |. |. |B |
//! |B |B |B |B |B |B |B |B |B |B |
//! ```
//!

use bevy::{log::debug, prelude::Reflect};

use crate::{
	error::{ConfigurationError, PolygonRole},
	prelude::*,
};

use super::assert_in_bounds;

/// The mutually exclusive states of a grid cell
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum CellState {
	/// Outside of the environment, unreachable
	Boundary,
	/// Inside an obstacle, unreachable
	Obstacle,
	/// Reachable but not yet assigned a potential
	#[default]
	Free,
	/// Assigned a final potential by the wavefront
	Visited,
}

/// Per-cell [CellState] of the whole grid
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationField {
	/// Number of cells along each side
	length: usize,
	/// Row-major cell states
	cells: Vec<CellState>,
}

impl Field<CellState> for ClassificationField {
	/// Get a reference to the field array
	fn get_field(&self) -> &[CellState] {
		&self.cells
	}
	/// Number of cells along each side of the field
	fn get_length(&self) -> usize {
		self.length
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: GridCell) -> CellState {
		assert_in_bounds("ClassificationField", field_cell, self.length);
		self.cells[field_cell.get_row() * self.length + field_cell.get_column()]
	}
	/// Set a field cell to a value. Only [CellState::Free] cells may change
	/// state, this panics on an attempt to reclassify any other cell
	fn set_field_cell_value(&mut self, value: CellState, field_cell: GridCell) {
		assert_in_bounds("ClassificationField", field_cell, self.length);
		let index = field_cell.get_row() * self.length + field_cell.get_column();
		let current = self.cells[index];
		if current != CellState::Free && current != value {
			panic!(
				"Cannot reclassify {:?} from {:?} to {:?}, a cell never leaves a classified state",
				field_cell, current, value
			);
		}
		self.cells[index] = value;
	}
}

impl ClassificationField {
	/// Create a new instance of [ClassificationField] where every cell is [CellState::Free]
	pub fn new(dimensions: &GridDimensions) -> Self {
		ClassificationField {
			length: dimensions.get_length(),
			cells: vec![CellState::Free; dimensions.get_cell_count()],
		}
	}
	/// Build a fully classified field. Each cell centre outside of the
	/// `boundary` becomes [CellState::Boundary], otherwise each centre inside
	/// any of the `obstacles` becomes [CellState::Obstacle] and everything
	/// else stays [CellState::Free]
	pub fn classify(
		dimensions: &GridDimensions,
		boundary: &Contour,
		obstacles: &[Contour],
	) -> Result<Self, ConfigurationError> {
		boundary.validate(PolygonRole::Boundary)?;
		for (i, obstacle) in obstacles.iter().enumerate() {
			obstacle.validate(PolygonRole::Obstacle(i))?;
		}
		let mut field = ClassificationField::new(dimensions);
		for cell in dimensions.iter_cells() {
			let centre = dimensions.get_xy_from_cell(cell);
			if !boundary.contains_point_unchecked(centre) {
				field.set_field_cell_value(CellState::Boundary, cell);
			} else if obstacles
				.iter()
				.any(|obstacle| obstacle.contains_point_unchecked(centre))
			{
				field.set_field_cell_value(CellState::Obstacle, cell);
			}
		}
		debug!(
			"Classified {} cells: {} boundary, {} obstacle, {} free",
			dimensions.get_cell_count(),
			field.count(CellState::Boundary),
			field.count(CellState::Obstacle),
			field.count(CellState::Free)
		);
		Ok(field)
	}
	/// Whether the cell has not yet been classified or reached
	pub fn is_free(&self, field_cell: GridCell) -> bool {
		self.get_field_cell_value(field_cell) == CellState::Free
	}
	/// Whether the cell has been assigned a potential
	pub fn is_visited(&self, field_cell: GridCell) -> bool {
		self.get_field_cell_value(field_cell) == CellState::Visited
	}
	/// Convert a [CellState::Free] cell into [CellState::Visited]. Returns
	/// `false` and leaves the cell untouched if it was not free
	pub fn mark_visited(&mut self, field_cell: GridCell) -> bool {
		if self.is_free(field_cell) {
			self.set_field_cell_value(CellState::Visited, field_cell);
			true
		} else {
			false
		}
	}
	/// Number of cells in the given state
	pub fn count(&self, state: CellState) -> usize {
		self.cells.iter().filter(|s| **s == state).count()
	}
}
