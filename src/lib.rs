//=========================================================================
// Horizon: Infinity
//=========================================================================
//
// Endless lane runner built on a frame-stepped event dispatcher.
//
//   core      dispatcher, input state, math, platform channel contract
//   game      world, managers, player, level construction
//   platform  winit window and input capture (internal)
//   engine    builder and runtime entry points
//
// ```no_run
// use horizon_infinity::EngineBuilder;
//
// let summary = EngineBuilder::new().with_seed(7).build().simulate(600);
// println!("{:?}", summary);
// ```
//
//=========================================================================

pub mod core;
pub mod game;
pub mod prelude;

mod engine;
mod platform;

pub use crate::core::platform_bridge::PlatformError;
pub use engine::{Engine, EngineBuilder};
pub use game::SessionSummary;
