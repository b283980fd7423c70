//! Useful structures and tools used by the fields and searches
//!

use bevy::prelude::Reflect;

use crate::wavefront::fields::GridCell;

/// Side length of the square window the planning grid covers
pub const DEFAULT_WINDOW_SIZE: f32 = 1000.0;
/// Largest number of cells a grid may be split into, `4096 x 4096`. Every
/// field allocates a value per cell so larger grids are refused up front
pub const MAX_GRID_CELLS: usize = 1 << 24;
/// Distance between the centres of orthogonally adjacent grid cells
pub const DEFAULT_RESOLUTION: f32 = 10.0;
/// Weight of the goal-seeking term of the search score
pub const DEFAULT_GOAL_WEIGHT: f32 = 1e-3;
/// Weight of the field potential term of the search score
pub const DEFAULT_POTENTIAL_WEIGHT: f32 = 1e-3;
/// Hard cap on the number of moves a search may take
pub const DEFAULT_MAX_NUM_STEPS: usize = 10_000;
/// A search succeeds once it is closer than this to the goal
pub const DEFAULT_CLOSE_PATH_THRESHOLD: f32 = DEFAULT_RESOLUTION;

/// The 8 directions of movement between grid cells. Row `0` is the top
/// (maximum `y`) row of the grid so North decreases the row index
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum Ordinal {
	North,
	South,
	West,
	East,
	NorthWest,
	SouthWest,
	NorthEast,
	SouthEast,
}

impl Ordinal {
	/// Order in which neighbours are enumerated, ties in a search are broken
	/// in favour of the earliest entry
	pub const SEARCH_ORDER: [Ordinal; 8] = [
		Ordinal::North,
		Ordinal::South,
		Ordinal::West,
		Ordinal::East,
		Ordinal::NorthWest,
		Ordinal::SouthWest,
		Ordinal::NorthEast,
		Ordinal::SouthEast,
	];
	/// The `(column, row)` step taken when moving in this direction
	pub fn offset(&self) -> (isize, isize) {
		match self {
			Ordinal::North => (0, -1),
			Ordinal::South => (0, 1),
			Ordinal::West => (-1, 0),
			Ordinal::East => (1, 0),
			Ordinal::NorthWest => (-1, -1),
			Ordinal::SouthWest => (-1, 1),
			Ordinal::NorthEast => (1, -1),
			Ordinal::SouthEast => (1, 1),
		}
	}
	/// Step from `cell` in this direction on a square grid of `length` cells
	/// per side. Returns [None] when the step leaves the grid
	pub fn step(&self, cell: GridCell, length: usize) -> Option<GridCell> {
		let (d_col, d_row) = self.offset();
		let column = cell.get_column().checked_add_signed(d_col)?;
		let row = cell.get_row().checked_add_signed(d_row)?;
		if column < length && row < length {
			Some(GridCell::new(column, row))
		} else {
			None
		}
	}
	/// Based on a grid cells `(column, row)` position find all of its in-bounds
	/// neighbours, including diagonals, in [Ordinal::SEARCH_ORDER]
	pub fn get_all_cell_neighbours(cell: GridCell, length: usize) -> Vec<GridCell> {
		Ordinal::SEARCH_ORDER
			.iter()
			.filter_map(|ordinal| ordinal.step(cell, length))
			.collect()
	}
}
