//! The PotentialField holds the wavefront level of every cell it reached.
//!
//! Every value starts unassigned (`u32::MAX`). Propagation begins from the
//! cells hugging the boundary and obstacle edges at level `1` and expands
//! outwards with 8-connectivity, each ring of cells one level higher than the
//! last. A potential is therefore a measure of clearance: the larger it is the
//! further the cell sits from anything it could collide with.
//!
//! A `60x60` boundary in a `100x100` window at resolution `10` produces (`-`
//! is a boundary cell):
//!
//! ```text
//!  _____________________________________________________________
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  1  |  1  |  1  |  1  |  1  |  1  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  1  |  1  |  2  |  2  |  2  |  1  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  1  |  1  |  2  |  3  |  2  |  1  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  1  |  1  |  2  |  2  |  2  |  1  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  1  |  1  |  1  |  1  |  1  |  1  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  1  |  1  |  1  |  1  |  1  |  1  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! |     |     |     |     |     |     |     |     |     |     |
//! |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |  -  |
//! |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|
//! ```
//!
//! The left and bottom sides receive a thicker first ring. An edge lying
//! exactly on a cell boundary maps into the cell on its upper/right side, so
//! the neighbours of those samples reach one cell further in.
//!

use crate::{error::PlannerError, prelude::*};

use super::assert_in_bounds;

/// Marker of a cell which was never assigned a potential
const UNASSIGNED: u32 = u32::MAX;

/// Row-major wavefront levels, `u32::MAX` marks a cell without a potential
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PotentialField {
	/// Number of cells along each side
	length: usize,
	/// Row-major potentials
	values: Vec<u32>,
}

impl Field<u32> for PotentialField {
	/// Get a reference to the field array
	fn get_field(&self) -> &[u32] {
		&self.values
	}
	/// Number of cells along each side of the field
	fn get_length(&self) -> usize {
		self.length
	}
	/// Retrieve a field cell value
	fn get_field_cell_value(&self, field_cell: GridCell) -> u32 {
		assert_in_bounds("PotentialField", field_cell, self.length);
		self.values[field_cell.get_row() * self.length + field_cell.get_column()]
	}
	/// Set a field cell to a value
	fn set_field_cell_value(&mut self, value: u32, field_cell: GridCell) {
		assert_in_bounds("PotentialField", field_cell, self.length);
		self.values[field_cell.get_row() * self.length + field_cell.get_column()] = value;
	}
}

impl PotentialField {
	/// Create a new instance of [PotentialField] with every cell unassigned
	pub fn new(dimensions: &GridDimensions) -> Self {
		PotentialField {
			length: dimensions.get_length(),
			values: vec![UNASSIGNED; dimensions.get_cell_count()],
		}
	}
	/// The potential of a cell, [None] if the wavefront never reached it
	pub fn get_potential(&self, field_cell: GridCell) -> Option<u32> {
		let value = self.get_field_cell_value(field_cell);
		if value == UNASSIGNED {
			None
		} else {
			Some(value)
		}
	}
	/// The largest potential in the field, [None] when nothing was reached
	pub fn get_max_potential(&self) -> Option<u32> {
		self.values.iter().copied().filter(|v| *v != UNASSIGNED).max()
	}
	/// Seed from the `boundary` and every one of the `obstacles` then run the
	/// wavefront over the `classification` until the queue is exhausted.
	/// Every `Free` cell reached becomes `Visited` and is given its level
	pub fn calculate_field(
		&mut self,
		dimensions: &GridDimensions,
		classification: &mut ClassificationField,
		boundary: &Contour,
		obstacles: &[Contour],
		max_iterations: Option<usize>,
	) -> Result<PropagationStats, PlannerError> {
		let mut wave = WavefrontPropagator::new(dimensions);
		wave.seed_from_contour(boundary, classification);
		for obstacle in obstacles.iter() {
			wave.seed_from_contour(obstacle, classification);
		}
		bevy::log::debug!("Seeded {} cells around the contours", wave.get_seeded());
		wave.propagate(classification, self, max_iterations)
	}
	/// Write the field to a csv file, one record per grid row from the top.
	/// Cells which are not [CellState::Visited] are written as empty values
	#[cfg(feature = "csv")]
	pub fn to_csv(
		&self,
		path: impl AsRef<std::path::Path>,
		classification: &ClassificationField,
	) -> Result<(), PlannerError> {
		let mut writer = csv::Writer::from_path(path)?;
		for row in 0..self.length {
			let record: Vec<String> = (0..self.length)
				.map(|column| {
					let cell = GridCell::new(column, row);
					match self.get_potential(cell) {
						Some(value) if classification.is_visited(cell) => value.to_string(),
						_ => String::new(),
					}
				})
				.collect();
			writer.write_record(&record)?;
		}
		writer.flush()?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use bevy::math::Vec2;

	use super::*;
	/// 100 unit window at resolution 10
	fn dims() -> GridDimensions {
		GridDimensions::new(100.0, 10.0).unwrap()
	}
	/// Classify and propagate a 60x60 boundary centred in the window
	fn square_room() -> (ClassificationField, PotentialField, PropagationStats) {
		let dimensions = dims();
		let boundary = Contour::rectangle(Vec2::new(-30.0, -30.0), Vec2::new(30.0, 30.0));
		let mut classification =
			ClassificationField::classify(&dimensions, &boundary, &[]).unwrap();
		let mut potential = PotentialField::new(&dimensions);
		let stats = potential
			.calculate_field(&dimensions, &mut classification, &boundary, &[], None)
			.unwrap();
		(classification, potential, stats)
	}
	#[test]
	fn new_field_is_unassigned() {
		let field = PotentialField::new(&dims());
		assert_eq!(None, field.get_potential(GridCell::new(3, 3)));
		assert_eq!(None, field.get_max_potential());
	}
	#[test]
	fn square_room_levels() {
		let (_, potential, stats) = square_room();
		let mut result = Vec::new();
		for row in 2..8 {
			for column in 2..8 {
				result.push(potential.get_potential(GridCell::new(column, row)).unwrap());
			}
		}
		#[rustfmt::skip]
		let actual = vec![
			1, 1, 1, 1, 1, 1,
			1, 1, 2, 2, 2, 1,
			1, 1, 2, 3, 2, 1,
			1, 1, 2, 2, 2, 1,
			1, 1, 1, 1, 1, 1,
			1, 1, 1, 1, 1, 1,
		];
		assert_eq!(actual, result);
		assert_eq!(36, stats.visited);
		assert_eq!(27, stats.seeded);
		assert_eq!(0, stats.unreached);
		assert_eq!(3, stats.max_level);
	}
	#[test]
	fn boundary_cells_have_no_potential() {
		let (classification, potential, _) = square_room();
		let cell = GridCell::new(0, 0);
		assert_eq!(CellState::Boundary, classification.get_field_cell_value(cell));
		assert_eq!(None, potential.get_potential(cell));
	}
	#[test]
	fn every_reached_cell_is_visited() {
		let (classification, potential, _) = square_room();
		for cell in dims().iter_cells() {
			let visited = classification.is_visited(cell);
			assert_eq!(visited, potential.get_potential(cell).is_some());
		}
	}
	#[test]
	fn neighbouring_levels_differ_by_at_most_one() {
		let dimensions = GridDimensions::new(200.0, 10.0).unwrap();
		let boundary = Contour::rectangle(Vec2::new(-90.0, -90.0), Vec2::new(90.0, 90.0));
		let obstacles = vec![
			Contour::rectangle(Vec2::new(-40.0, -40.0), Vec2::new(10.0, 20.0)),
			Contour::from_xy(&[(30.0, 30.0), (70.0, 40.0), (50.0, 80.0)]),
		];
		let mut classification =
			ClassificationField::classify(&dimensions, &boundary, &obstacles).unwrap();
		let mut potential = PotentialField::new(&dimensions);
		potential
			.calculate_field(&dimensions, &mut classification, &boundary, &obstacles, None)
			.unwrap();
		let length = dimensions.get_length();
		for cell in dimensions.iter_cells() {
			let Some(level) = potential.get_potential(cell) else {
				continue;
			};
			let neighbour_levels: Vec<u32> = Ordinal::get_all_cell_neighbours(cell, length)
				.into_iter()
				.filter_map(|n| potential.get_potential(n))
				.collect();
			for n in neighbour_levels.iter() {
				assert!(level.abs_diff(*n) <= 1);
			}
			if level > 1 {
				// reached from a cell one level lower
				assert!(neighbour_levels.contains(&(level - 1)));
			}
		}
	}
	#[test]
	fn propagation_is_deterministic() {
		let dimensions = dims();
		let boundary = Contour::rectangle(Vec2::new(-40.0, -40.0), Vec2::new(40.0, 40.0));
		let obstacles = vec![Contour::rectangle(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 20.0))];
		let classification =
			ClassificationField::classify(&dimensions, &boundary, &obstacles).unwrap();
		let mut first_classification = classification.clone();
		let mut first = PotentialField::new(&dimensions);
		first
			.calculate_field(&dimensions, &mut first_classification, &boundary, &obstacles, None)
			.unwrap();
		let mut second_classification = classification;
		let mut second = PotentialField::new(&dimensions);
		second
			.calculate_field(&dimensions, &mut second_classification, &boundary, &obstacles, None)
			.unwrap();
		assert_eq!(first, second);
		assert_eq!(first_classification, second_classification);
	}
	#[test]
	#[should_panic]
	fn out_of_bounds_access_panics() {
		let field = PotentialField::new(&dims());
		field.get_field_cell_value(GridCell::new(0, 10));
	}
	#[test]
	#[cfg(feature = "csv")]
	fn export_heatmap() {
		let (classification, potential, _) = square_room();
		let path = std::env::temp_dir().join("bevy_wavefront_planner_potential.csv");
		potential.to_csv(&path, &classification).unwrap();
		let contents = std::fs::read_to_string(&path).unwrap();
		let rows: Vec<&str> = contents.lines().collect();
		assert_eq!(10, rows.len());
		assert_eq!(",,,,,,,,,", rows[0]);
		assert_eq!(",,1,1,2,3,2,1,,", rows[4]);
	}
}
