//=========================================================================
// Prelude
//=========================================================================
//
//   use horizon_infinity::prelude::*;
//
//=========================================================================

pub use crate::engine::{Engine, EngineBuilder};
pub use crate::PlatformError;

pub use crate::core::events::{
    EventAction, EventCategory, EventData, EventDispatcher, EventParam, EventQueue, HandlerError,
    TickReport,
};
pub use crate::core::input::{InputEvent, InputSystem, KeyCode, Modifiers, MouseButton};

pub use crate::game::{Game, GameSettings, PlayerKeys, ScoreBoard, SessionSummary, World};
