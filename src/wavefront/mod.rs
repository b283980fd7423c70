//! Wavefront potential fields are a means of planning a route for a single
//! robot through a polygonal world.
//!
//! [Wavefront expansion](https://en.wikipedia.org/wiki/Wavefront_expansion_algorithm)
//!
//! A square window centred on the origin is divided into a grid of cells. The
//! grid is then processed in three passes:
//!
//! * Classification - each cell centre is tested against the boundary and the
//! obstacles. Cells outside the boundary or inside an obstacle can never be
//! entered, everything else starts out free
//! * Propagation - the free cells hugging every contour edge are given a
//! potential of `1`, then a breadth-first wave spreads inwards giving each ring
//! of cells one more than the last. The potential of a cell is its clearance,
//! the number of steps to the nearest wall
//! * Search - from the start cell a route is walked towards the goal, either
//! greedily favouring both progress and clearance or as the shortest route
//! through the reached cells
//!
//! ```text
//!  _____________________________
//! |__|__|__|__|__|__|__|__|__|__|
//! |__|1_|1_|1_|1_|1_|1_|1_|1_|__|
//! |__|1_|2_|2_|2_|2_|2_|2_|1_|__|
//! |__|1_|2_|1_|1_|1_|1_|2_|1_|__|
//! |__|1_|2_|1_|XX|XX|1_|2_|1_|__|
//! |__|1_|2_|1_|XX|XX|1_|2_|1_|__|
//! |__|1_|2_|1_|1_|1_|1_|2_|1_|__|
//! |__|1_|2_|2_|2_|2_|2_|2_|1_|__|
//! |__|1_|1_|1_|1_|1_|1_|1_|1_|__|
//! |__|__|__|__|__|__|__|__|__|__|
//! ```
//!

pub mod dimensions;
pub mod fields;
pub mod geometry;
pub mod propagation;
pub mod search;
pub mod utilities;
