//! Steepest ascent hill climbing over the potential field.
//!
//! From the current cell each of the 8 neighbours is scored as
//!
//! ```text
//! score = K * (start_to_goal - neighbour_to_goal) + G * potential(neighbour)
//! ```
//!
//! where `start_to_goal` is the distance from the requested start to the goal
//! and stays fixed for the whole run. The first term rewards progress towards
//! the goal, the second rewards staying in open space away from obstacles.
//! The highest scoring neighbour is stepped onto, ties go to the neighbour
//! found first in [Ordinal::SEARCH_ORDER]. Cells already on the path are never
//! revisited which stops the walk oscillating between two cells, though it
//! also means a walk which needed to double back will report itself stuck.
//!

use std::collections::HashSet;

use bevy::log::{debug, trace, warn};

use crate::{
	error::{ExhaustionReason, PlannerError},
	prelude::*,
};

/// Greedy local search, never backtracks
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyHillClimb;

impl PathStrategy for GreedyHillClimb {
	fn find_path(&self, ctx: &SearchContext) -> Result<Path, PlannerError> {
		let dimensions = ctx.get_dimensions();
		let length = dimensions.get_length();
		let config = ctx.get_config();
		let goal = ctx.get_goal();
		let start_to_goal = ctx.get_start().distance(goal);

		let mut path = ctx.begin_path();
		if ctx.is_start_close_to_goal() {
			debug!("Greedy search started within reach of the goal");
			return Ok(path);
		}
		let mut on_path = HashSet::from([ctx.get_start_cell()]);
		let mut current = ctx.get_start_cell();
		let mut steps = 0;
		loop {
			if ctx.is_close_to_goal(current) {
				debug!("Greedy search reached the goal in {} steps", steps);
				return Ok(path);
			}
			if steps >= config.get_max_num_steps() {
				warn!(
					"Greedy search stopped after {} steps at {:?}",
					steps, current
				);
				return Err(PlannerError::SearchExhausted {
					reason: ExhaustionReason::MaxStepsExceeded,
					partial: path,
				});
			}
			let mut best: Option<(GridCell, f32)> = None;
			for neighbour in Ordinal::get_all_cell_neighbours(current, length) {
				if on_path.contains(&neighbour) {
					continue;
				}
				let Some(potential) = ctx.get_traversable_potential(neighbour) else {
					continue;
				};
				let neighbour_to_goal = dimensions.get_xy_from_cell(neighbour).distance(goal);
				let score = config.get_goal_weight() * (start_to_goal - neighbour_to_goal)
					+ config.get_potential_weight() * potential as f32;
				// strictly greater so the earliest direction keeps a tie
				if best.is_none_or(|(_, best_score)| score > best_score) {
					best = Some((neighbour, score));
				}
			}
			let Some((next, score)) = best else {
				warn!(
					"Greedy search stuck at {:?} after {} steps, no neighbour left to step onto",
					current, steps
				);
				return Err(PlannerError::SearchExhausted {
					reason: ExhaustionReason::NoViableNeighbour,
					partial: path,
				});
			};
			trace!("Step {} from {:?} to {:?}, score {}", steps, current, next, score);
			current = next;
			path.push(current, dimensions.get_xy_from_cell(current));
			on_path.insert(current);
			steps += 1;
		}
	}
}
