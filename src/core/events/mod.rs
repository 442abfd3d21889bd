//=========================================================================
// Events
//=========================================================================
//
// Deferred publish/subscribe messaging between game systems.
//
// Components:
// - `data`: event record, categories, actions, typed parameters
// - `queue`: pending events with per-tick deduplication
// - `dispatcher`: subscriptions and the once-per-update delivery tick
// - `error`: validation, routing and handler errors
//
//=========================================================================

//=== Module Declarations =================================================

pub mod data;
pub mod dispatcher;
pub mod error;
pub mod queue;

//=== Public API ==========================================================

pub use data::{ActorId, EventAction, EventCategory, EventData, EventKey, EventParam};
pub use dispatcher::{EventDispatcher, EventHandler, SubscriptionId, TickReport};
pub use error::{EventError, HandlerError};
pub use queue::EventQueue;
