//! The kinds of fields laid over the planning grid
//!
//! * [classification_field::ClassificationField] - which cells are outside the
//! environment, inside an obstacle, free or already reached by the wavefront
//! * [potential_field::PotentialField] - the wavefront level assigned to each
//! reached cell
//!

pub mod classification_field;
pub mod potential_field;

use bevy::prelude::Reflect;

/// Defines required access to field arrays
pub trait Field<T> {
	/// Get a reference to the row-major field array
	fn get_field(&self) -> &[T];
	/// Number of cells along each side of the field
	fn get_length(&self) -> usize;
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: GridCell) -> T;
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: T, field_cell: GridCell);
}

/// ID of a cell within the grid, `(column, row)`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct GridCell((usize, usize));

impl GridCell {
	/// Create a new instance of [GridCell]
	pub fn new(column: usize, row: usize) -> Self {
		GridCell((column, row))
	}
	/// Get the column
	pub fn get_column(&self) -> usize {
		self.0 .0
	}
	/// Get the row
	pub fn get_row(&self) -> usize {
		self.0 .1
	}
	/// Whether `other` is one of the 8 cells surrounding this one
	pub fn is_adjacent(&self, other: &GridCell) -> bool {
		let d_col = self.get_column().abs_diff(other.get_column());
		let d_row = self.get_row().abs_diff(other.get_row());
		self != other && d_col <= 1 && d_row <= 1
	}
}

/// Panic with a consistent message when a field is indexed outside of its grid
pub(crate) fn assert_in_bounds(name: &str, field_cell: GridCell, length: usize) {
	if field_cell.get_column() >= length || field_cell.get_row() >= length {
		panic!(
			"Cannot access a {} value, index out of bounds. Asked for column {}, row {}, field length is {}",
			name,
			field_cell.get_column(),
			field_cell.get_row(),
			length
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn diagonal_is_adjacent() {
		let cell = GridCell::new(4, 4);
		assert!(cell.is_adjacent(&GridCell::new(5, 3)));
	}
	#[test]
	fn self_is_not_adjacent() {
		let cell = GridCell::new(4, 4);
		assert!(!cell.is_adjacent(&cell));
	}
	#[test]
	fn two_apart_is_not_adjacent() {
		let cell = GridCell::new(4, 4);
		assert!(!cell.is_adjacent(&GridCell::new(6, 4)));
	}
	#[test]
	#[should_panic]
	fn out_of_bounds_panics() {
		assert_in_bounds("test", GridCell::new(10, 0), 10);
	}
}
