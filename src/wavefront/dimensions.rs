//! The square window a planning grid covers and the mapping between
//! continuous positions and grid cells
//!
//! The window is centred on the origin, so it spans `-window_size / 2` to
//! `window_size / 2` in both `x` and `y`. Cells are indexed `(column, row)`
//! with column `0` on the left (minimum `x`) and row `0` along the top
//! (maximum `y`), i.e `y` grows upwards while rows grow downwards:
//!
//! ```text
//!  y
//!  ^    ______________________
//!  |   |(0,0)|(1,0)|(2,0)| ...
//!  |   |(0,1)|(1,1)|(2,1)| ...
//!  |   |(0,2)|(1,2)|(2,2)| ...
//!  |   | ... | ... | ... | ...
//!  +-------------------------> x
//! ```
//!
//! Every component converts through [GridDimensions] so classification,
//! seeding and searching always agree on which cell a point falls into.
//!

use bevy::{log::error, math::Vec2};

use crate::{error::ConfigurationError, prelude::*};

/// How far `window_size / resolution` may drift from a whole number before
/// the window is considered not to be divisible into cells
const DIVISIBILITY_TOLERANCE: f32 = 1e-4;

/// The dimensions of the planning window and the number of cells covering it
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDimensions {
	/// Side length of the square window in world units
	window_size: f32,
	/// Distance between adjacent cell centres (the cell pitch)
	resolution: f32,
	/// Number of cells along each side, `window_size / resolution`
	length: usize,
}

impl GridDimensions {
	/// Create a new instance of [GridDimensions]. The `window_size` must be an
	/// exact multiple of the `resolution` and the grid may not exceed
	/// [MAX_GRID_CELLS]
	pub fn new(window_size: f32, resolution: f32) -> Result<Self, ConfigurationError> {
		if !resolution.is_finite() || resolution <= 0.0 {
			return Err(ConfigurationError::InvalidResolution(resolution));
		}
		if !window_size.is_finite() || window_size <= 0.0 {
			return Err(ConfigurationError::InvalidWindowSize(window_size));
		}
		let cells = window_size / resolution;
		if cells < 1.0 || (cells - cells.round()).abs() > DIVISIBILITY_TOLERANCE {
			return Err(ConfigurationError::WindowNotDivisible {
				window_size,
				resolution,
			});
		}
		// saturates for absurd ratios, which the cap then rejects
		let length = cells.round() as usize;
		match length.checked_mul(length) {
			Some(count) if count <= MAX_GRID_CELLS => {}
			_ => {
				return Err(ConfigurationError::GridTooLarge {
					length,
					max: MAX_GRID_CELLS,
				})
			}
		}
		Ok(GridDimensions {
			window_size,
			resolution,
			length,
		})
	}
	/// Side length of the window in world units
	pub fn get_window_size(&self) -> f32 {
		self.window_size
	}
	/// The cell pitch
	pub fn get_resolution(&self) -> f32 {
		self.resolution
	}
	/// Number of cells along each side of the grid
	pub fn get_length(&self) -> usize {
		self.length
	}
	/// Total number of cells in the grid
	pub fn get_cell_count(&self) -> usize {
		self.length * self.length
	}
	/// Whether a position lies within the window. The far edges of the window
	/// are included so that contours drawn along them can still be sampled
	pub fn contains_xy(&self, position: Vec2) -> bool {
		let half = self.window_size / 2.0;
		position.x >= -half && position.x <= half && position.y >= -half && position.y <= half
	}
	/// From a position in `x, y` space calculate the cell it resides in.
	///
	/// `column = floor((x + window_size / 2) / resolution)` and
	/// `row = (length - 1) - floor((y + window_size / 2) / resolution)`.
	/// Positions sitting exactly on the maximum `x` or `y` limit are placed in
	/// the last column or top row. Returns [None] outside of the window
	pub fn get_cell_from_xy(&self, position: Vec2) -> Option<GridCell> {
		if !self.contains_xy(position) {
			return None;
		}
		let half = self.window_size / 2.0;
		let max_index = self.length - 1;
		let column = (((position.x + half) / self.resolution).floor() as usize).min(max_index);
		let flipped = (((position.y + half) / self.resolution).floor() as usize).min(max_index);
		Some(GridCell::new(column, max_index - flipped))
	}
	/// As [GridDimensions::get_cell_from_xy] but logs the failure, for points
	/// which have already been validated as being within the window
	pub fn expect_cell_from_xy(&self, position: Vec2) -> Option<GridCell> {
		let cell = self.get_cell_from_xy(position);
		if cell.is_none() {
			error!(
				"Position is out of bounds of the window, x {}, y {}, cannot calculate GridCell",
				position.x, position.y
			);
		}
		cell
	}
	/// The `x, y` position of the centre of a cell
	pub fn get_xy_from_cell(&self, cell: GridCell) -> Vec2 {
		let half = self.window_size / 2.0;
		let flipped = (self.length - 1 - cell.get_row()) as f32;
		Vec2::new(
			-half + (cell.get_column() as f32 + 0.5) * self.resolution,
			-half + (flipped + 0.5) * self.resolution,
		)
	}
	/// Index of a cell within a row-major flat array of the grid
	pub fn get_index(&self, cell: GridCell) -> usize {
		cell.get_row() * self.length + cell.get_column()
	}
	/// Iterate over every cell of the grid, row by row from the top
	pub fn iter_cells(&self) -> impl Iterator<Item = GridCell> {
		let length = self.length;
		(0..length).flat_map(move |row| (0..length).map(move |column| GridCell::new(column, row)))
	}
}

impl Default for GridDimensions {
	fn default() -> Self {
		GridDimensions {
			window_size: DEFAULT_WINDOW_SIZE,
			resolution: DEFAULT_RESOLUTION,
			length: (DEFAULT_WINDOW_SIZE / DEFAULT_RESOLUTION) as usize,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn default_length() {
		let dims = GridDimensions::default();
		assert_eq!(100, dims.get_length());
		assert_eq!(10_000, dims.get_cell_count());
	}
	#[test]
	fn invalid_resolution() {
		let result = GridDimensions::new(100.0, 0.0);
		assert_eq!(Err(ConfigurationError::InvalidResolution(0.0)), result);
	}
	#[test]
	fn negative_window() {
		let result = GridDimensions::new(-100.0, 10.0);
		assert_eq!(Err(ConfigurationError::InvalidWindowSize(-100.0)), result);
	}
	#[test]
	fn window_not_divisible() {
		let result = GridDimensions::new(105.0, 10.0);
		assert!(matches!(
			result,
			Err(ConfigurationError::WindowNotDivisible { .. })
		));
	}
	#[test]
	fn window_too_large_for_resolution() {
		let result = GridDimensions::new(1.0e10, 1.0);
		assert!(matches!(
			result,
			Err(ConfigurationError::GridTooLarge {
				max: MAX_GRID_CELLS,
				..
			})
		));
	}
	#[test]
	fn largest_grid_allowed() {
		let result = GridDimensions::new(4096.0, 1.0).unwrap();
		assert_eq!(MAX_GRID_CELLS, result.get_cell_count());
		let result = GridDimensions::new(4097.0, 1.0);
		let actual = Err(ConfigurationError::GridTooLarge {
			length: 4097,
			max: MAX_GRID_CELLS,
		});
		assert_eq!(actual, result);
	}
	#[test]
	fn cell_from_origin() {
		let dims = GridDimensions::new(100.0, 10.0).unwrap();
		let result = dims.get_cell_from_xy(Vec2::new(0.0, 0.0)).unwrap();
		// x maps to column 5, y floors to 5 and flips to row 4
		let actual = GridCell::new(5, 4);
		assert_eq!(actual, result);
	}
	#[test]
	fn cell_from_top_left() {
		let dims = GridDimensions::new(100.0, 10.0).unwrap();
		let result = dims.get_cell_from_xy(Vec2::new(-49.0, 49.0)).unwrap();
		assert_eq!(GridCell::new(0, 0), result);
	}
	#[test]
	fn cell_from_bottom_right() {
		let dims = GridDimensions::new(100.0, 10.0).unwrap();
		let result = dims.get_cell_from_xy(Vec2::new(49.0, -49.0)).unwrap();
		assert_eq!(GridCell::new(9, 9), result);
	}
	#[test]
	fn cell_at_far_limit_is_clamped() {
		let dims = GridDimensions::new(100.0, 10.0).unwrap();
		let result = dims.get_cell_from_xy(Vec2::new(50.0, 50.0)).unwrap();
		assert_eq!(GridCell::new(9, 0), result);
	}
	#[test]
	fn cell_outside_window() {
		let dims = GridDimensions::new(100.0, 10.0).unwrap();
		let result = dims.get_cell_from_xy(Vec2::new(-51.0, 0.0));
		assert!(result.is_none());
	}
	#[test]
	fn centre_of_cell() {
		let dims = GridDimensions::default();
		let result = dims.get_xy_from_cell(GridCell::new(51, 48));
		let actual = Vec2::new(15.0, 15.0);
		assert_eq!(actual, result);
	}
	#[test]
	fn centre_maps_back_to_cell() {
		let dims = GridDimensions::default();
		for cell in [GridCell::new(0, 0), GridCell::new(99, 99), GridCell::new(13, 71)] {
			let centre = dims.get_xy_from_cell(cell);
			assert_eq!(Some(cell), dims.get_cell_from_xy(centre));
		}
	}
	#[test]
	fn row_major_index() {
		let dims = GridDimensions::new(100.0, 10.0).unwrap();
		let result = dims.get_index(GridCell::new(3, 2));
		assert_eq!(23, result);
	}
	#[test]
	fn iterate_all_cells() {
		let dims = GridDimensions::new(30.0, 10.0).unwrap();
		let result: Vec<GridCell> = dims.iter_cells().collect();
		assert_eq!(9, result.len());
		assert_eq!(GridCell::new(1, 0), result[1]);
		assert_eq!(GridCell::new(0, 1), result[3]);
	}
}
