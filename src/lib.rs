//! Wavefront potential field motion planning through polygonal environments,
//! with a plugin for the Bevy game engine to run plans from within an app
//!

pub mod config;
pub mod error;
pub mod planner;
pub mod plugin;
pub mod wavefront;

pub mod prelude;
