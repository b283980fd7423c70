//! Orchestrates a planning run from an [Environment] to a [Plan].
//!
//! Each run builds its grid afresh:
//!
//! 1. The [PlannerConfig] and the [Environment] are validated, any problem is
//! reported before a single cell is touched
//! 2. Cell centres are classified against the boundary and obstacles
//! 3. The wavefront is seeded from every contour edge and propagated
//! 4. If both the start and goal cells were reached, the configured [SearchStrategy] walks the
//! potential field from the start
//!
//! Classification always completes before seeding so no cell destined to be
//! an obstacle can be handed a potential.
//!

use bevy::{
	log::{debug, info, warn},
	math::Vec2,
};

use crate::{
	error::{ConfigurationError, PlannerError, PolygonRole},
	prelude::*,
};

/// The polygonal world a route is planned through
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
	/// Outer edge of the space, everything outside is unreachable
	boundary: Contour,
	/// Regions inside the boundary which cannot be entered
	obstacles: Vec<Contour>,
	/// Where the route begins
	start: Vec2,
	/// Where the route should end
	goal: Vec2,
}

impl Environment {
	/// Create a new instance of [Environment]
	pub fn new(boundary: Contour, obstacles: Vec<Contour>, start: Vec2, goal: Vec2) -> Self {
		Environment {
			boundary,
			obstacles,
			start,
			goal,
		}
	}
	/// Get the boundary
	pub fn get_boundary(&self) -> &Contour {
		&self.boundary
	}
	/// Get the obstacles
	pub fn get_obstacles(&self) -> &[Contour] {
		&self.obstacles
	}
	/// Get the start position
	pub fn get_start(&self) -> Vec2 {
		self.start
	}
	/// Get the goal position
	pub fn get_goal(&self) -> Vec2 {
		self.goal
	}
	/// Move the start position
	pub fn set_start(&mut self, start: Vec2) {
		self.start = start;
	}
	/// Move the goal position
	pub fn set_goal(&mut self, goal: Vec2) {
		self.goal = goal;
	}
	/// Check the environment can be planned over within the window described
	/// by `dimensions`.
	///
	/// Every polygon needs 3 or more vertices, the start and goal must sit
	/// inside both the window and the boundary but outside every obstacle, and
	/// every obstacle vertex must lie inside or on the boundary
	pub fn validate(&self, dimensions: &GridDimensions) -> Result<(), ConfigurationError> {
		self.boundary.validate(PolygonRole::Boundary)?;
		for (i, obstacle) in self.obstacles.iter().enumerate() {
			obstacle.validate(PolygonRole::Obstacle(i))?;
		}
		for (label, position) in [("start", self.start), ("goal", self.goal)] {
			if !dimensions.contains_xy(position) {
				return Err(ConfigurationError::OutsideWindow { label, position });
			}
		}
		if !self.boundary.contains_point_unchecked(self.start) {
			return Err(ConfigurationError::StartOutsideBoundary(self.start));
		}
		if !self.boundary.contains_point_unchecked(self.goal) {
			return Err(ConfigurationError::GoalOutsideBoundary(self.goal));
		}
		for (i, obstacle) in self.obstacles.iter().enumerate() {
			for (v, vertex) in obstacle.get_points().iter().enumerate() {
				if !self.boundary.contains_point_unchecked(*vertex)
					&& !self.boundary.is_on_edge(*vertex)
				{
					return Err(ConfigurationError::ObstacleOutsideBoundary {
						obstacle: i,
						vertex: v,
					});
				}
			}
			if obstacle.contains_point_unchecked(self.start) {
				return Err(ConfigurationError::StartInsideObstacle {
					position: self.start,
					obstacle: i,
				});
			}
			if obstacle.contains_point_unchecked(self.goal) {
				return Err(ConfigurationError::GoalInsideObstacle {
					position: self.goal,
					obstacle: i,
				});
			}
		}
		Ok(())
	}
	/// Load an environment from a `.ron` file
	#[cfg(feature = "ron")]
	pub fn from_ron(path: impl AsRef<std::path::Path>) -> Result<Self, PlannerError> {
		let file = std::fs::File::open(path)?;
		let environment: Environment = ron::de::from_reader(file)?;
		Ok(environment)
	}
}

/// Everything produced by a successful planning run
#[derive(Clone, Debug)]
pub struct Plan {
	/// Grid the run was computed over
	dimensions: GridDimensions,
	/// Final state of every cell
	classification: ClassificationField,
	/// Wavefront level of every reached cell
	potential: PotentialField,
	/// Counts from propagation
	stats: PropagationStats,
	/// Route from the start cell to within the close path threshold of the goal
	path: Path,
}

impl Plan {
	/// Get the grid dimensions
	pub fn get_dimensions(&self) -> &GridDimensions {
		&self.dimensions
	}
	/// Get the classification of every cell
	pub fn get_classification(&self) -> &ClassificationField {
		&self.classification
	}
	/// Get the potential field, ready to be rendered as a heatmap
	pub fn get_potential(&self) -> &PotentialField {
		&self.potential
	}
	/// Get the propagation counts
	pub fn get_stats(&self) -> &PropagationStats {
		&self.stats
	}
	/// Get the route
	pub fn get_path(&self) -> &Path {
		&self.path
	}
	/// Take the route, dropping the fields
	pub fn into_path(self) -> Path {
		self.path
	}
}

/// Plans routes with a fixed [PlannerConfig]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WavefrontPlanner {
	/// Options applied to every run
	config: PlannerConfig,
}

impl WavefrontPlanner {
	/// Create a new instance of [WavefrontPlanner]
	pub fn new(config: PlannerConfig) -> Self {
		WavefrontPlanner { config }
	}
	/// Get the config
	pub fn get_config(&self) -> &PlannerConfig {
		&self.config
	}
	/// Classify, propagate and search. The grid lives only for the duration
	/// of the call and is handed back inside the [Plan]
	pub fn plan(&self, environment: &Environment) -> Result<Plan, PlannerError> {
		let dimensions = self.config.validate()?;
		environment.validate(&dimensions)?;

		let mut classification = ClassificationField::classify(
			&dimensions,
			environment.get_boundary(),
			environment.get_obstacles(),
		)?;
		let mut potential = PotentialField::new(&dimensions);
		let stats = potential.calculate_field(
			&dimensions,
			&mut classification,
			environment.get_boundary(),
			environment.get_obstacles(),
			self.config.get_max_propagation_iterations(),
		)?;

		let ctx = SearchContext::new(
			&dimensions,
			&classification,
			&potential,
			&self.config,
			environment.get_start(),
			environment.get_goal(),
		)?;
		let start_cell = ctx.get_start_cell();
		if !classification.is_visited(start_cell) {
			warn!(
				"Start cell {:?} has state {:?} after propagation",
				start_cell,
				classification.get_field_cell_value(start_cell)
			);
			return Err(PlannerError::UnreachableStart { start: start_cell });
		}
		let goal_cell = ctx.get_goal_cell();
		if !classification.is_visited(goal_cell) {
			warn!(
				"Goal cell {:?} has state {:?} after propagation",
				goal_cell,
				classification.get_field_cell_value(goal_cell)
			);
			return Err(PlannerError::UnreachableGoal { goal: goal_cell });
		}
		debug!(
			"Searching from {:?} to {:?} with {:?}",
			start_cell,
			goal_cell,
			self.config.get_strategy()
		);
		let path = self.config.get_strategy().find_path(&ctx)?;
		info!(
			"Planned a route of {} steps over {} reached cells",
			path.get_step_count(),
			stats.visited
		);
		Ok(Plan {
			dimensions,
			classification,
			potential,
			stats,
			path,
		})
	}
}
