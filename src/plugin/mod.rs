//! Defines the Bevy [Plugin] for wavefront planning
//!
//! An entity carrying a [plan_layer::PlanningEnvironment] can be planned over
//! by sending an [plan_layer::EventPlanRequest] naming it. The result is
//! inserted onto the same entity as a [plan_layer::PlanOutcome] and an
//! [plan_layer::EventPlanComplete] is emitted.
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod plan_layer;

/// Registers the planner types, events and systems
pub struct WavefrontPlannerPlugin;

impl Plugin for WavefrontPlannerPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Ordinal>()
			.register_type::<GridCell>()
			.register_type::<CellState>()
			.add_event::<plan_layer::EventPlanRequest>()
			.add_event::<plan_layer::EventPlanComplete>()
			.add_systems(Update, plan_layer::process_plan_requests);
	}
}
