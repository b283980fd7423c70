//! Logic relating to running plans from within a Bevy app
//!

use crate::{error::PlannerError, prelude::*};
use bevy::prelude::*;

/// The world and options an entity plans over
#[derive(Component, Clone, Debug)]
pub struct PlanningEnvironment {
	/// Boundary, obstacles, start and goal
	environment: Environment,
	/// Options for each run
	config: PlannerConfig,
}

impl PlanningEnvironment {
	/// Create a new instance of [PlanningEnvironment]
	pub fn new(environment: Environment, config: PlannerConfig) -> Self {
		PlanningEnvironment {
			environment,
			config,
		}
	}
	/// Get the environment
	pub fn get_environment(&self) -> &Environment {
		&self.environment
	}
	/// Get a mutable reference to the environment
	pub fn get_environment_mut(&mut self) -> &mut Environment {
		&mut self.environment
	}
	/// Get the config
	pub fn get_config(&self) -> &PlannerConfig {
		&self.config
	}
}

/// The result of the most recent plan of an entity
#[derive(Component, Debug)]
pub struct PlanOutcome(Result<Plan, PlannerError>);

impl PlanOutcome {
	/// Get the result
	pub fn get(&self) -> &Result<Plan, PlannerError> {
		&self.0
	}
	/// Whether a route was found
	pub fn is_success(&self) -> bool {
		self.0.is_ok()
	}
	/// The route if one was found
	pub fn get_path(&self) -> Option<&Path> {
		self.0.as_ref().ok().map(|plan| plan.get_path())
	}
}

/// A request to plan over the [PlanningEnvironment] of an entity, optionally
/// moving its start and goal first
#[derive(Event, Clone, Copy, Debug)]
pub struct EventPlanRequest {
	/// Entity carrying the [PlanningEnvironment]
	entity: Entity,
	/// Replacement start and goal positions
	start_goal: Option<(Vec2, Vec2)>,
}

impl EventPlanRequest {
	/// Plan with the environment as it is
	pub fn new(entity: Entity) -> Self {
		EventPlanRequest {
			entity,
			start_goal: None,
		}
	}
	/// Plan after moving the start and goal
	pub fn with_start_goal(entity: Entity, start: Vec2, goal: Vec2) -> Self {
		EventPlanRequest {
			entity,
			start_goal: Some((start, goal)),
		}
	}
	/// Get the entity
	pub fn get_entity(&self) -> Entity {
		self.entity
	}
}

/// Emitted once a [PlanOutcome] has been inserted onto an entity
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventPlanComplete {
	/// Entity the plan belongs to
	entity: Entity,
	/// Whether a route was found
	success: bool,
}

impl EventPlanComplete {
	/// Get the entity
	pub fn get_entity(&self) -> Entity {
		self.entity
	}
	/// Whether a route was found
	pub fn is_success(&self) -> bool {
		self.success
	}
}

/// Run the planner for each [EventPlanRequest] and store the outcome on the
/// requesting entity
#[cfg(not(tarpaulin_include))]
pub fn process_plan_requests(
	mut events: EventReader<EventPlanRequest>,
	mut env_q: Query<&mut PlanningEnvironment>,
	mut complete: EventWriter<EventPlanComplete>,
	mut commands: Commands,
) {
	for event in events.read() {
		let Ok(mut planning) = env_q.get_mut(event.entity) else {
			warn!(
				"Plan requested for {:?} which has no PlanningEnvironment",
				event.entity
			);
			continue;
		};
		if let Some((start, goal)) = event.start_goal {
			let environment = planning.get_environment_mut();
			environment.set_start(start);
			environment.set_goal(goal);
		}
		let planner = WavefrontPlanner::new(*planning.get_config());
		let result = planner.plan(planning.get_environment());
		if let Err(e) = &result {
			debug!("Plan for {:?} failed: {}", event.entity, e);
		}
		let success = result.is_ok();
		commands.entity(event.entity).insert(PlanOutcome(result));
		complete.write(EventPlanComplete {
			entity: event.entity,
			success,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::plugin::WavefrontPlannerPlugin;

	/// The 100 unit square room with a single obstacle in the middle
	fn environment() -> Environment {
		Environment::new(
			Contour::rectangle(Vec2::ZERO, Vec2::new(100.0, 100.0)),
			vec![Contour::rectangle(
				Vec2::new(40.0, 40.0),
				Vec2::new(60.0, 60.0),
			)],
			Vec2::new(10.0, 10.0),
			Vec2::new(90.0, 90.0),
		)
	}
	/// Read every [EventPlanComplete] sent so far
	fn completed(app: &App) -> Vec<EventPlanComplete> {
		let events = app.world().resource::<Events<EventPlanComplete>>();
		let mut cursor = events.get_cursor();
		cursor.read(events).copied().collect()
	}
	#[test]
	fn request_inserts_outcome() {
		let mut app = App::new();
		app.add_plugins(WavefrontPlannerPlugin);
		let entity = app
			.world_mut()
			.spawn(PlanningEnvironment::new(
				environment(),
				PlannerConfig::default(),
			))
			.id();
		app.world_mut().send_event(EventPlanRequest::new(entity));
		app.update();
		let outcome = app.world().get::<PlanOutcome>(entity).unwrap();
		assert!(outcome.is_success());
		let path = outcome.get_path().unwrap();
		assert!(path.last_waypoint().unwrap().distance(Vec2::new(90.0, 90.0)) < 10.0);
		let result = completed(&app);
		let actual = vec![EventPlanComplete {
			entity,
			success: true,
		}];
		assert_eq!(actual, result);
	}
	#[test]
	fn failed_plan_is_reported() {
		let mut app = App::new();
		app.add_plugins(WavefrontPlannerPlugin);
		let entity = app
			.world_mut()
			.spawn(PlanningEnvironment::new(
				environment(),
				PlannerConfig::default(),
			))
			.id();
		// move the goal into the obstacle
		app.world_mut().send_event(EventPlanRequest::with_start_goal(
			entity,
			Vec2::new(10.0, 10.0),
			Vec2::new(50.0, 50.0),
		));
		app.update();
		let outcome = app.world().get::<PlanOutcome>(entity).unwrap();
		assert!(matches!(
			outcome.get(),
			Err(PlannerError::Configuration(
				crate::error::ConfigurationError::GoalInsideObstacle { .. }
			))
		));
		let planning = app.world().get::<PlanningEnvironment>(entity).unwrap();
		assert_eq!(
			Vec2::new(50.0, 50.0),
			planning.get_environment().get_goal()
		);
		assert!(!completed(&app)[0].is_success());
	}
	#[test]
	fn request_for_unknown_entity_is_ignored() {
		let mut app = App::new();
		app.add_plugins(WavefrontPlannerPlugin);
		let entity = app.world_mut().spawn_empty().id();
		app.world_mut().send_event(EventPlanRequest::new(entity));
		app.update();
		assert!(app.world().get::<PlanOutcome>(entity).is_none());
		assert!(completed(&app).is_empty());
	}
}
