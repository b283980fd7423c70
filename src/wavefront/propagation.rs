//! Multi-source breadth-first propagation of the wavefront.
//!
//! Seeds are the cells hugging the edges of the boundary and of every
//! obstacle. Each edge is walked in steps of the grid resolution and the 8
//! neighbours of every sampled point which are still [CellState::Free] are
//! scheduled at level `1`. The queue is then drained strictly first-in
//! first-out so the wave expands level by level, every cell popped is marked
//! [CellState::Visited], given its level as a potential and its free
//! neighbours are scheduled one level higher.
//!
//! A cell is scheduled at most once, membership is tracked with a flag per
//! cell rather than by scanning the queue. Cells the wave never reaches stay
//! `Free` and have no potential.
//!

use std::collections::VecDeque;

use bevy::log::{debug, trace, warn};

use crate::{error::PlannerError, prelude::*};

/// Counts describing a completed propagation
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
	/// Cells scheduled at level `1` from contour edges
	pub seeded: usize,
	/// Cells converted to [CellState::Visited]
	pub visited: usize,
	/// Free cells the wavefront never reached
	pub unreached: usize,
	/// Highest potential assigned
	pub max_level: u32,
	/// Largest length the queue grew to
	pub peak_queue_len: usize,
	/// Number of entries popped from the queue
	pub iterations: usize,
}

/// Owns the frontier queue and the scheduled flags for one propagation run
pub struct WavefrontPropagator {
	/// Grid the wave travels over
	dimensions: GridDimensions,
	/// Cells waiting to be finalised along with their level
	queue: VecDeque<(GridCell, u32)>,
	/// Row-major flags of cells that have already been put into the queue
	scheduled: Vec<bool>,
	/// Number of cells scheduled by seeding
	seeded: usize,
}

impl WavefrontPropagator {
	/// Create a new instance of [WavefrontPropagator] with an empty frontier
	pub fn new(dimensions: &GridDimensions) -> Self {
		WavefrontPropagator {
			dimensions: *dimensions,
			queue: VecDeque::new(),
			scheduled: vec![false; dimensions.get_cell_count()],
			seeded: 0,
		}
	}
	/// Number of entries waiting in the queue
	pub fn get_queue_len(&self) -> usize {
		self.queue.len()
	}
	/// Number of cells scheduled by seeding so far
	pub fn get_seeded(&self) -> usize {
		self.seeded
	}
	/// Whether a cell has already been put into the queue
	pub fn is_scheduled(&self, cell: GridCell) -> bool {
		self.scheduled[self.dimensions.get_index(cell)]
	}
	/// Enqueue a cell at `level` if it is still free and has not been
	/// scheduled before. Returns whether it was enqueued
	pub fn schedule(
		&mut self,
		cell: GridCell,
		level: u32,
		classification: &ClassificationField,
	) -> bool {
		let index = self.dimensions.get_index(cell);
		if self.scheduled[index] || !classification.is_free(cell) {
			return false;
		}
		self.scheduled[index] = true;
		self.queue.push_back((cell, level));
		true
	}
	/// Walk the edges of a contour and schedule the free neighbours of every
	/// sampled point at level `1`. Samples falling outside of the window are
	/// skipped. Returns the number of cells scheduled
	pub fn seed_from_contour(
		&mut self,
		contour: &Contour,
		classification: &ClassificationField,
	) -> usize {
		let length = self.dimensions.get_length();
		let mut count = 0;
		for sample in contour.sample_edges(self.dimensions.get_resolution()) {
			let Some(cell) = self.dimensions.get_cell_from_xy(sample) else {
				trace!("Edge sample {:?} is outside of the window", sample);
				continue;
			};
			for neighbour in Ordinal::get_all_cell_neighbours(cell, length) {
				if self.schedule(neighbour, 1, classification) {
					count += 1;
				}
			}
		}
		self.seeded += count;
		count
	}
	/// Drain the queue in FIFO order assigning potentials. The classification
	/// must already be final, the propagator takes exclusive use of it for the
	/// duration of the run.
	///
	/// `max_iterations` optionally caps the number of queue pops to guard
	/// against malformed input, exceeding it aborts the run
	pub fn propagate(
		mut self,
		classification: &mut ClassificationField,
		potential: &mut PotentialField,
		max_iterations: Option<usize>,
	) -> Result<PropagationStats, PlannerError> {
		let length = self.dimensions.get_length();
		let mut stats = PropagationStats {
			seeded: self.seeded,
			peak_queue_len: self.queue.len(),
			..Default::default()
		};
		while let Some((cell, level)) = self.queue.pop_front() {
			if let Some(cap) = max_iterations {
				if stats.iterations >= cap {
					warn!(
						"Wavefront propagation hit its cap of {} iterations with {} cells queued",
						cap,
						self.queue.len() + 1
					);
					return Err(PlannerError::PropagationAborted { iterations: cap });
				}
			}
			stats.iterations += 1;
			// a cell already finalised or classified is skipped
			if !classification.mark_visited(cell) {
				continue;
			}
			potential.set_field_cell_value(level, cell);
			stats.visited += 1;
			stats.max_level = stats.max_level.max(level);
			for neighbour in Ordinal::get_all_cell_neighbours(cell, length) {
				self.schedule(neighbour, level + 1, classification);
			}
			stats.peak_queue_len = stats.peak_queue_len.max(self.queue.len());
		}
		stats.unreached = classification.count(CellState::Free);
		debug!(
			"Wavefront visited {} cells up to level {}, {} unreached, peak queue {}",
			stats.visited, stats.max_level, stats.unreached, stats.peak_queue_len
		);
		Ok(stats)
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
	#[test]
	fn schedule_only_once() {
		let dimensions = dims();
		let classification = ClassificationField::new(&dimensions);
		let mut wave = WavefrontPropagator::new(&dimensions);
		let cell = GridCell::new(4, 4);
		assert!(wave.schedule(cell, 1, &classification));
		assert!(!wave.schedule(cell, 2, &classification));
		assert!(wave.is_scheduled(cell));
		assert_eq!(1, wave.get_queue_len());
	}
	#[test]
	fn schedule_ignores_classified_cells() {
		let dimensions = dims();
		let mut classification = ClassificationField::new(&dimensions);
		let cell = GridCell::new(4, 4);
		classification.set_field_cell_value(CellState::Obstacle, cell);
		let mut wave = WavefrontPropagator::new(&dimensions);
		assert!(!wave.schedule(cell, 1, &classification));
	}
	#[test]
	fn seeds_hug_the_boundary() {
		let dimensions = dims();
		let boundary = Contour::rectangle(Vec2::new(-30.0, -30.0), Vec2::new(30.0, 30.0));
		let classification = ClassificationField::classify(&dimensions, &boundary, &[]).unwrap();
		let mut wave = WavefrontPropagator::new(&dimensions);
		let result = wave.seed_from_contour(&boundary, &classification);
		// of the 6x6 free block only the inner 3x3 is not touched by the edges
		assert_eq!(27, result);
		assert!(wave.is_scheduled(GridCell::new(2, 2)));
		assert!(wave.is_scheduled(GridCell::new(7, 7)));
		assert!(!wave.is_scheduled(GridCell::new(5, 4)));
	}
	#[test]
	fn no_seeds_leaves_cells_unreached() {
		let dimensions = dims();
		let mut classification = ClassificationField::new(&dimensions);
		let mut potential = PotentialField::new(&dimensions);
		let wave = WavefrontPropagator::new(&dimensions);
		let result = wave
			.propagate(&mut classification, &mut potential, None)
			.unwrap();
		assert_eq!(0, result.visited);
		assert_eq!(100, result.unreached);
		assert_eq!(None, potential.get_potential(GridCell::new(0, 0)));
	}
	#[test]
	fn single_seed_expands_in_rings() {
		let dimensions = dims();
		let mut classification = ClassificationField::new(&dimensions);
		let mut potential = PotentialField::new(&dimensions);
		let mut wave = WavefrontPropagator::new(&dimensions);
		wave.schedule(GridCell::new(4, 4), 1, &classification);
		let result = wave
			.propagate(&mut classification, &mut potential, None)
			.unwrap();
		assert_eq!(100, result.visited);
		assert_eq!(0, result.unreached);
		// 8-connectivity produces square rings, the far corner is 5 steps away
		assert_eq!(Some(2), potential.get_potential(GridCell::new(5, 5)));
		assert_eq!(Some(2), potential.get_potential(GridCell::new(3, 3)));
		assert_eq!(Some(6), potential.get_potential(GridCell::new(9, 9)));
		assert_eq!(6, result.max_level);
	}
	#[test]
	fn cap_aborts_propagation() {
		let dimensions = dims();
		let mut classification = ClassificationField::new(&dimensions);
		let mut potential = PotentialField::new(&dimensions);
		let mut wave = WavefrontPropagator::new(&dimensions);
		wave.schedule(GridCell::new(4, 4), 1, &classification);
		let result = wave.propagate(&mut classification, &mut potential, Some(5));
		assert!(matches!(
			result,
			Err(PlannerError::PropagationAborted { iterations: 5 })
		));
	}
}
