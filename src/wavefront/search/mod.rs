//! Searching the potential field for a route from a start point to a goal.
//!
//! A search consumes a read-only view of the classified and propagated grid,
//! a [SearchContext], and produces a [Path] of cells. Only cells the wavefront
//! reached are ever stepped onto, anything still `Free` after propagation is as
//! impassable as a boundary or obstacle cell.
//!
//! Two strategies are provided:
//!
//! * [greedy::GreedyHillClimb] - steepest ascent over a score blending progress
//! towards the goal with the potential of each neighbour. Cheap and biased
//! towards open space but it can stall in a local maximum
//! * [breadth_first::BreadthFirstSearch] - the shortest 8-connected route over
//! reached cells, found whenever one exists
//!

pub mod breadth_first;
pub mod greedy;

use bevy::math::Vec2;

use crate::{
	error::{ConfigurationError, PlannerError},
	prelude::*,
};

/// An ordered route of grid cells, from the start cell onwards, along with the
/// centre of each cell
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
	/// Cells in the order they are walked
	cells: Vec<GridCell>,
	/// Centre point of each cell in `cells`
	waypoints: Vec<Vec2>,
}

impl Path {
	/// Create an empty [Path]
	pub fn new() -> Self {
		Path::default()
	}
	/// Append a cell and its centre to the end of the route
	pub fn push(&mut self, cell: GridCell, waypoint: Vec2) {
		self.cells.push(cell);
		self.waypoints.push(waypoint);
	}
	/// Get the cells of the route
	pub fn get_cells(&self) -> &[GridCell] {
		&self.cells
	}
	/// Get the centre points of the route
	pub fn get_waypoints(&self) -> &[Vec2] {
		&self.waypoints
	}
	/// Number of cells in the route
	pub fn len(&self) -> usize {
		self.cells.len()
	}
	/// Whether the route has no cells
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
	/// Number of moves made, one less than the number of cells
	pub fn get_step_count(&self) -> usize {
		self.cells.len().saturating_sub(1)
	}
	/// The final cell of the route
	pub fn last_cell(&self) -> Option<GridCell> {
		self.cells.last().copied()
	}
	/// The final waypoint of the route
	pub fn last_waypoint(&self) -> Option<Vec2> {
		self.waypoints.last().copied()
	}
	/// Write the waypoints to a csv file as `x,y` records under a header
	#[cfg(feature = "csv")]
	pub fn to_csv(&self, path: impl AsRef<std::path::Path>) -> Result<(), PlannerError> {
		let mut writer = csv::Writer::from_path(path)?;
		writer.write_record(["x", "y"])?;
		for waypoint in self.waypoints.iter() {
			writer.write_record([waypoint.x.to_string(), waypoint.y.to_string()])?;
		}
		writer.flush()?;
		Ok(())
	}
}

/// Read-only view of a propagated grid and the parameters of one search
pub struct SearchContext<'a> {
	/// Grid the fields are laid over
	dimensions: &'a GridDimensions,
	/// Final cell states, reached cells are [CellState::Visited]
	classification: &'a ClassificationField,
	/// Wavefront levels of the reached cells
	potential: &'a PotentialField,
	/// Weights, step cap and success threshold
	config: &'a PlannerConfig,
	/// Requested start position
	start: Vec2,
	/// Requested goal position
	goal: Vec2,
	/// Cell containing `start`
	start_cell: GridCell,
	/// Cell containing `goal`
	goal_cell: GridCell,
}

impl<'a> SearchContext<'a> {
	/// Create a new instance of [SearchContext]. Fails if either the start or
	/// goal lies outside of the window
	pub fn new(
		dimensions: &'a GridDimensions,
		classification: &'a ClassificationField,
		potential: &'a PotentialField,
		config: &'a PlannerConfig,
		start: Vec2,
		goal: Vec2,
	) -> Result<Self, ConfigurationError> {
		let start_cell = dimensions
			.expect_cell_from_xy(start)
			.ok_or(ConfigurationError::OutsideWindow {
				label: "start",
				position: start,
			})?;
		let goal_cell = dimensions
			.expect_cell_from_xy(goal)
			.ok_or(ConfigurationError::OutsideWindow {
				label: "goal",
				position: goal,
			})?;
		Ok(SearchContext {
			dimensions,
			classification,
			potential,
			config,
			start,
			goal,
			start_cell,
			goal_cell,
		})
	}
	/// Get the grid dimensions
	pub fn get_dimensions(&self) -> &GridDimensions {
		self.dimensions
	}
	/// Get the classification field
	pub fn get_classification(&self) -> &ClassificationField {
		self.classification
	}
	/// Get the potential field
	pub fn get_potential_field(&self) -> &PotentialField {
		self.potential
	}
	/// Get the planner configuration
	pub fn get_config(&self) -> &PlannerConfig {
		self.config
	}
	/// Get the start position
	pub fn get_start(&self) -> Vec2 {
		self.start
	}
	/// Get the goal position
	pub fn get_goal(&self) -> Vec2 {
		self.goal
	}
	/// Get the cell containing the start position
	pub fn get_start_cell(&self) -> GridCell {
		self.start_cell
	}
	/// Get the cell containing the goal position
	pub fn get_goal_cell(&self) -> GridCell {
		self.goal_cell
	}
	/// Potential of a cell the search may step onto, [None] for any cell the
	/// wavefront did not reach
	pub fn get_traversable_potential(&self, cell: GridCell) -> Option<u32> {
		if self.classification.is_visited(cell) {
			self.potential.get_potential(cell)
		} else {
			None
		}
	}
	/// Whether a cell centre is close enough to the goal to end the search
	pub fn is_close_to_goal(&self, cell: GridCell) -> bool {
		let centre = self.dimensions.get_xy_from_cell(cell);
		centre.distance(self.goal) < self.config.get_close_path_threshold()
	}
	/// Whether the requested start point is already close enough to the goal
	/// for the search to end without moving
	pub fn is_start_close_to_goal(&self) -> bool {
		self.start.distance(self.goal) < self.config.get_close_path_threshold()
	}
	/// Start a [Path] at the start cell
	pub fn begin_path(&self) -> Path {
		let mut path = Path::new();
		path.push(
			self.start_cell,
			self.dimensions.get_xy_from_cell(self.start_cell),
		);
		path
	}
}

/// A means of walking a propagated grid from the start to the goal
pub trait PathStrategy {
	/// Search for a route. On success the final cell of the path lies within
	/// the close path threshold of the goal
	fn find_path(&self, ctx: &SearchContext) -> Result<Path, PlannerError>;
}

/// Selects which [PathStrategy] a planner runs
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchStrategy {
	/// [greedy::GreedyHillClimb]
	#[default]
	GreedyHillClimb,
	/// [breadth_first::BreadthFirstSearch]
	BreadthFirstSearch,
}

impl PathStrategy for SearchStrategy {
	fn find_path(&self, ctx: &SearchContext) -> Result<Path, PlannerError> {
		match self {
			SearchStrategy::GreedyHillClimb => greedy::GreedyHillClimb.find_path(ctx),
			SearchStrategy::BreadthFirstSearch => breadth_first::BreadthFirstSearch.find_path(ctx),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn step_count_of_single_cell_path() {
		let mut path = Path::new();
		path.push(GridCell::new(1, 1), Vec2::new(5.0, 5.0));
		assert_eq!(0, path.get_step_count());
		assert_eq!(Some(GridCell::new(1, 1)), path.last_cell());
	}
	#[test]
	fn empty_path() {
		let path = Path::new();
		assert!(path.is_empty());
		assert_eq!(0, path.get_step_count());
		assert_eq!(None, path.last_waypoint());
	}
	#[test]
	fn context_rejects_goal_outside_window() {
		let dimensions = GridDimensions::new(100.0, 10.0).unwrap();
		let classification = ClassificationField::new(&dimensions);
		let potential = PotentialField::new(&dimensions);
		let config = PlannerConfig::default();
		let goal = Vec2::new(0.0, 80.0);
		let result = SearchContext::new(
			&dimensions,
			&classification,
			&potential,
			&config,
			Vec2::ZERO,
			goal,
		);
		assert!(matches!(
			result,
			Err(ConfigurationError::OutsideWindow { label: "goal", .. })
		));
	}
	#[test]
	fn free_cells_are_not_traversable() {
		let dimensions = GridDimensions::new(100.0, 10.0).unwrap();
		let mut classification = ClassificationField::new(&dimensions);
		let mut potential = PotentialField::new(&dimensions);
		let cell = GridCell::new(2, 2);
		potential.set_field_cell_value(4, cell);
		let config = PlannerConfig::default();
		{
			let ctx = SearchContext::new(
				&dimensions,
				&classification,
				&potential,
				&config,
				Vec2::ZERO,
				Vec2::ZERO,
			)
			.unwrap();
			assert_eq!(None, ctx.get_traversable_potential(cell));
		}
		classification.mark_visited(cell);
		let ctx = SearchContext::new(
			&dimensions,
			&classification,
			&potential,
			&config,
			Vec2::ZERO,
			Vec2::ZERO,
		)
		.unwrap();
		assert_eq!(Some(4), ctx.get_traversable_potential(cell));
	}
	#[cfg(feature = "csv")]
	#[test]
	fn export_waypoints() {
		let mut path = Path::new();
		path.push(GridCell::new(0, 0), Vec2::new(-45.0, 45.0));
		path.push(GridCell::new(1, 1), Vec2::new(-35.0, 35.0));
		let file = std::env::temp_dir().join("bevy_wavefront_planner_path.csv");
		path.to_csv(&file).unwrap();
		let contents = std::fs::read_to_string(&file).unwrap();
		let result: Vec<&str> = contents.lines().collect();
		let actual = vec!["x,y", "-45,45", "-35,35"];
		assert_eq!(actual, result);
	}
}
