//! `use bevy_wavefront_planner::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::wavefront::{
	dimensions::*,
	fields::{classification_field::*, potential_field::*, *},
	geometry::*,
	propagation::*,
	search::{breadth_first::*, greedy::*, *},
	utilities::*,
};

#[doc(hidden)]
pub use crate::{
	config::*,
	error::{ConfigurationError, ExhaustionReason, PlannerError, PolygonRole},
	planner::*,
	plugin::{plan_layer::*, *},
};
