//=========================================================================
// Platform Bridge
//=========================================================================
//
// Channel contract between the window thread and the game thread.
//
//   platform (main thread) ──PlatformEvent──► EventCollector (core thread)
//
//=========================================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
pub use interface::PlatformError;
