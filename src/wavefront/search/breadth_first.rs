//! Shortest 8-connected route over the cells the wavefront reached.
//!
//! Ignores the potentials entirely, cells are expanded in FIFO order from the
//! start cell with neighbours enumerated in [Ordinal::SEARCH_ORDER]. The first
//! cell discovered within the close path threshold of the goal ends the
//! search and the route is rebuilt by following each cell back to the one it
//! was discovered from. Unlike [super::greedy::GreedyHillClimb] this always
//! finds a route when one exists.
//!

use std::collections::VecDeque;

use bevy::log::{debug, warn};

use crate::{
	error::{ExhaustionReason, PlannerError},
	prelude::*,
};

/// Breadth-first search from the start cell
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSearch;

impl PathStrategy for BreadthFirstSearch {
	fn find_path(&self, ctx: &SearchContext) -> Result<Path, PlannerError> {
		let dimensions = ctx.get_dimensions();
		let length = dimensions.get_length();
		let start = ctx.get_start_cell();
		if ctx.is_start_close_to_goal() || ctx.is_close_to_goal(start) {
			return Ok(ctx.begin_path());
		}
		// the cell each discovered cell was reached from
		let mut parents: Vec<Option<GridCell>> = vec![None; dimensions.get_cell_count()];
		let mut discovered = vec![false; dimensions.get_cell_count()];
		discovered[dimensions.get_index(start)] = true;
		let mut queue = VecDeque::from([start]);
		let mut expanded = 0;
		while let Some(current) = queue.pop_front() {
			expanded += 1;
			for neighbour in Ordinal::get_all_cell_neighbours(current, length) {
				let index = dimensions.get_index(neighbour);
				if discovered[index] || ctx.get_traversable_potential(neighbour).is_none() {
					continue;
				}
				discovered[index] = true;
				parents[index] = Some(current);
				if ctx.is_close_to_goal(neighbour) {
					debug!("Breadth first search expanded {} cells", expanded);
					return build_route(ctx, &parents, neighbour);
				}
				queue.push_back(neighbour);
			}
		}
		warn!(
			"Breadth first search exhausted {} cells without getting close to {:?}",
			expanded,
			ctx.get_goal_cell()
		);
		Err(PlannerError::UnreachableGoal {
			goal: ctx.get_goal_cell(),
		})
	}
}

/// Walk the parents back from `end` to the start and build the [Path]. A route
/// longer than the step cap is cut short and reported as exhausted
fn build_route(
	ctx: &SearchContext,
	parents: &[Option<GridCell>],
	end: GridCell,
) -> Result<Path, PlannerError> {
	let dimensions = ctx.get_dimensions();
	let mut cells = vec![end];
	let mut cursor = end;
	while let Some(parent) = parents[dimensions.get_index(cursor)] {
		cells.push(parent);
		cursor = parent;
	}
	cells.reverse();
	let max_steps = ctx.get_config().get_max_num_steps();
	let mut path = Path::new();
	for cell in cells.iter().take(max_steps + 1) {
		path.push(*cell, dimensions.get_xy_from_cell(*cell));
	}
	if cells.len() > max_steps + 1 {
		warn!(
			"Route of {} steps exceeds the cap of {} steps",
			cells.len() - 1,
			max_steps
		);
		return Err(PlannerError::SearchExhausted {
			reason: ExhaustionReason::MaxStepsExceeded,
			partial: path,
		});
	}
	Ok(path)
}
