//! Tunable parameters of a planning run
//!

use crate::{error::ConfigurationError, prelude::*};

/// Options controlling grid construction, propagation and path search
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
	/// Cell pitch, the distance between adjacent cell centres
	resolution: f32,
	/// Side length of the square window centred on the origin
	window_size: f32,
	/// Weight `K` of progress towards the goal in the greedy score
	goal_weight: f32,
	/// Weight `G` of the cell potential in the greedy score
	potential_weight: f32,
	/// Hard cap on the number of moves a search may make
	max_num_steps: usize,
	/// A search succeeds once a cell centre is closer than this to the goal
	close_path_threshold: f32,
	/// Optional cap on the number of queue pops during propagation
	max_propagation_iterations: Option<usize>,
	/// Which search walks the potential field
	strategy: SearchStrategy,
}

impl Default for PlannerConfig {
	fn default() -> Self {
		PlannerConfig {
			resolution: DEFAULT_RESOLUTION,
			window_size: DEFAULT_WINDOW_SIZE,
			goal_weight: DEFAULT_GOAL_WEIGHT,
			potential_weight: DEFAULT_POTENTIAL_WEIGHT,
			max_num_steps: DEFAULT_MAX_NUM_STEPS,
			close_path_threshold: DEFAULT_CLOSE_PATH_THRESHOLD,
			max_propagation_iterations: None,
			strategy: SearchStrategy::default(),
		}
	}
}

impl PlannerConfig {
	/// Set the cell pitch
	pub fn with_resolution(mut self, resolution: f32) -> Self {
		self.resolution = resolution;
		self
	}
	/// Set the side length of the window
	pub fn with_window_size(mut self, window_size: f32) -> Self {
		self.window_size = window_size;
		self
	}
	/// Set the goal weight `K`
	pub fn with_goal_weight(mut self, goal_weight: f32) -> Self {
		self.goal_weight = goal_weight;
		self
	}
	/// Set the potential weight `G`
	pub fn with_potential_weight(mut self, potential_weight: f32) -> Self {
		self.potential_weight = potential_weight;
		self
	}
	/// Set the maximum number of search steps
	pub fn with_max_num_steps(mut self, max_num_steps: usize) -> Self {
		self.max_num_steps = max_num_steps;
		self
	}
	/// Set the distance to the goal which ends a search
	pub fn with_close_path_threshold(mut self, close_path_threshold: f32) -> Self {
		self.close_path_threshold = close_path_threshold;
		self
	}
	/// Cap the number of propagation iterations, [None] removes the cap
	pub fn with_max_propagation_iterations(mut self, cap: Option<usize>) -> Self {
		self.max_propagation_iterations = cap;
		self
	}
	/// Set the search strategy
	pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
		self.strategy = strategy;
		self
	}
	/// Get the cell pitch
	pub fn get_resolution(&self) -> f32 {
		self.resolution
	}
	/// Get the window side length
	pub fn get_window_size(&self) -> f32 {
		self.window_size
	}
	/// Get the goal weight `K`
	pub fn get_goal_weight(&self) -> f32 {
		self.goal_weight
	}
	/// Get the potential weight `G`
	pub fn get_potential_weight(&self) -> f32 {
		self.potential_weight
	}
	/// Get the maximum number of search steps
	pub fn get_max_num_steps(&self) -> usize {
		self.max_num_steps
	}
	/// Get the success distance
	pub fn get_close_path_threshold(&self) -> f32 {
		self.close_path_threshold
	}
	/// Get the propagation cap
	pub fn get_max_propagation_iterations(&self) -> Option<usize> {
		self.max_propagation_iterations
	}
	/// Get the search strategy
	pub fn get_strategy(&self) -> SearchStrategy {
		self.strategy
	}
	/// Check every option is usable and build the [GridDimensions] they describe
	pub fn validate(&self) -> Result<GridDimensions, ConfigurationError> {
		let dimensions = GridDimensions::new(self.window_size, self.resolution)?;
		for (name, value) in [("goal", self.goal_weight), ("potential", self.potential_weight)] {
			if !value.is_finite() || value < 0.0 {
				return Err(ConfigurationError::InvalidWeight { name, value });
			}
		}
		if self.max_num_steps == 0 {
			return Err(ConfigurationError::InvalidStepLimit);
		}
		if !self.close_path_threshold.is_finite() || self.close_path_threshold <= 0.0 {
			return Err(ConfigurationError::InvalidThreshold(
				self.close_path_threshold,
			));
		}
		Ok(dimensions)
	}
	/// Load a config from a `.ron` file, missing fields take their defaults
	#[cfg(feature = "ron")]
	pub fn from_ron(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::PlannerError> {
		let file = std::fs::File::open(path)?;
		let config: PlannerConfig = ron::de::from_reader(file)?;
		Ok(config)
	}
}
