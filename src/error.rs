//! Errors raised while validating an environment or planning a route through it
//!
//! Every failure is handed back to the caller as a [PlannerError], nothing
//! inside the planner exits the process or swallows a failed search
//!

use bevy::math::Vec2;
use thiserror::Error;

use crate::wavefront::{fields::GridCell, search::Path};

/// Identifies which polygon of an environment a [ConfigurationError] refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolygonRole {
	/// The outer boundary of the environment
	Boundary,
	/// An obstacle, by its index within the list of obstacles
	Obstacle(usize),
	/// A contour tested on its own, outside of any environment
	Standalone,
}

impl std::fmt::Display for PolygonRole {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PolygonRole::Boundary => write!(f, "boundary"),
			PolygonRole::Obstacle(index) => write!(f, "obstacle {}", index),
			PolygonRole::Standalone => write!(f, "polygon"),
		}
	}
}

/// Input that cannot be planned over. These are detected before any grid work
/// begins and retrying with the same input will always fail
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
	/// A polygon with fewer than 3 vertices
	#[error("{role} has {vertices} vertices, a polygon needs at least 3")]
	DegeneratePolygon { role: PolygonRole, vertices: usize },
	/// The cell pitch is zero, negative or not finite
	#[error("resolution must be a positive finite number, got {0}")]
	InvalidResolution(f32),
	/// The window side length is zero, negative or not finite
	#[error("window size must be a positive finite number, got {0}")]
	InvalidWindowSize(f32),
	/// The window cannot be split into a whole number of cells
	#[error("window size {window_size} is not an exact multiple of the resolution {resolution}")]
	WindowNotDivisible { window_size: f32, resolution: f32 },
	/// The window would be split into more cells than a grid may hold
	#[error("a window of {length} cells per side exceeds the limit of {max} cells in total")]
	GridTooLarge { length: usize, max: usize },
	/// A search score weight is negative or not finite
	#[error("{name} weight must be a non-negative finite number, got {value}")]
	InvalidWeight { name: &'static str, value: f32 },
	/// A search would not be allowed a single step
	#[error("the maximum number of search steps must be greater than zero")]
	InvalidStepLimit,
	/// The success distance is zero, negative or not finite
	#[error("close path threshold must be a positive finite number, got {0}")]
	InvalidThreshold(f32),
	/// The start or goal, named by `label`, is beyond the edges of the window
	#[error("{label} location {position} lies outside of the planning window")]
	OutsideWindow { label: &'static str, position: Vec2 },
	/// The start point lies outside the boundary polygon
	#[error("start location {0} must be contained within the environment boundary")]
	StartOutsideBoundary(Vec2),
	/// The goal point lies outside the boundary polygon
	#[error("goal location {0} must be contained within the environment boundary")]
	GoalOutsideBoundary(Vec2),
	/// The start point lies within the obstacle at index `obstacle`
	#[error("start location {position} lies inside obstacle {obstacle}")]
	StartInsideObstacle { position: Vec2, obstacle: usize },
	/// The goal point lies within the obstacle at index `obstacle`
	#[error("goal location {position} lies inside obstacle {obstacle}")]
	GoalInsideObstacle { position: Vec2, obstacle: usize },
	/// An obstacle vertex is neither inside nor on the boundary
	#[error("vertex {vertex} of obstacle {obstacle} is not contained within the environment boundary")]
	ObstacleOutsideBoundary { obstacle: usize, vertex: usize },
}

/// Why a path search gave up before reaching the goal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExhaustionReason {
	/// The search took the maximum number of steps allowed by the config
	MaxStepsExceeded,
	/// Every neighbour of the current cell is impassable or already on the path
	NoViableNeighbour,
}

impl std::fmt::Display for ExhaustionReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ExhaustionReason::MaxStepsExceeded => write!(f, "max steps exceeded"),
			ExhaustionReason::NoViableNeighbour => write!(f, "stuck with no viable neighbour"),
		}
	}
}

/// Failure modes of a planning run
#[derive(Error, Debug)]
pub enum PlannerError {
	/// The config or environment was rejected before any grid work
	#[error("invalid configuration: {0}")]
	Configuration(#[from] ConfigurationError),
	/// The centre of the start cell falls outside the boundary or inside an
	/// obstacle, so the wavefront never reached it even though the start point
	/// itself is valid
	#[error("start cell {start:?} was never reached by the wavefront")]
	UnreachableStart { start: GridCell },
	/// Propagation finished without ever assigning a potential to the goal cell
	#[error("goal cell {goal:?} was never reached by the wavefront")]
	UnreachableGoal { goal: GridCell },
	/// The search stopped early, `partial` is the route walked so far
	#[error("path search exhausted: {reason}")]
	SearchExhausted {
		reason: ExhaustionReason,
		partial: Path,
	},
	/// Propagation hit the configured iteration cap before the queue emptied
	#[error("wavefront propagation aborted after {iterations} iterations")]
	PropagationAborted { iterations: usize },
	/// Opening or creating a file failed
	#[cfg(any(feature = "ron", feature = "csv"))]
	#[error("file access failed: {0}")]
	Io(#[from] std::io::Error),
	/// A `.ron` file could not be parsed
	#[cfg(feature = "ron")]
	#[error("failed deserializing: {0}")]
	Ron(#[from] ron::error::SpannedError),
	/// Writing a csv record failed
	#[cfg(feature = "csv")]
	#[error("failed writing csv: {0}")]
	Csv(#[from] csv::Error),
}

/// Result of any planning operation
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn configuration_error_converts() {
		let err: PlannerError = ConfigurationError::InvalidStepLimit.into();
		assert!(matches!(
			err,
			PlannerError::Configuration(ConfigurationError::InvalidStepLimit)
		));
	}
	#[test]
	fn degenerate_message_names_polygon() {
		let err = ConfigurationError::DegeneratePolygon {
			role: PolygonRole::Obstacle(2),
			vertices: 2,
		};
		let result = err.to_string();
		let actual = "obstacle 2 has 2 vertices, a polygon needs at least 3";
		assert_eq!(actual, result);
	}
}
