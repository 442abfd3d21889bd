//=========================================================================
// Event Errors
//=========================================================================
//
// Error types for event validation, routing and handler execution.
//
// None of these abort a dispatcher tick: invalid events are dropped at
// publish time, unrouted events are logged, and handler failures are
// isolated to the handler that raised them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::data::{EventAction, EventCategory};

//=== EventError ==========================================================

/// Errors raised by the event queue and dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum EventError {
    /// An event is missing a field its action requires.
    InvalidEvent {
        category: EventCategory,
        action: EventAction,
        reason: &'static str,
    },

    /// An event was routed to a category nobody subscribed to.
    UnknownCategory(EventCategory),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEvent { category, action, reason } => {
                write!(f, "Invalid event {:?}/{:?}: {}", category, action, reason)
            }
            Self::UnknownCategory(category) => {
                write!(f, "No subscribers for category {:?}", category)
            }
        }
    }
}

impl std::error::Error for EventError {}

//=== HandlerError ========================================================

/// Failure reported by a subscriber while handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerError {
    /// Parameter at `index` was absent.
    MissingParameter { action: EventAction, index: usize },

    /// Parameter at `index` had the wrong variant.
    ParameterType {
        action: EventAction,
        index: usize,
        expected: &'static str,
    },

    /// Event referenced an id the handler does not know (camera, controller...).
    UnknownTarget(String),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter { action, index } => {
                write!(f, "{:?}: missing parameter {}", action, index)
            }
            Self::ParameterType { action, index, expected } => {
                write!(f, "{:?}: parameter {} is not {}", action, index, expected)
            }
            Self::UnknownTarget(id) => write!(f, "Unknown target '{}'", id),
        }
    }
}

impl std::error::Error for HandlerError {}
