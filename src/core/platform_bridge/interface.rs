//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// What the window thread may tell the game thread, and how the window
// thread fails.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlatformEvent {
    /// Input flushed once per redraw. Either list may be empty.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Inner size in physical pixels.
    Resized { width: u32, height: u32 },

    FocusLost,

    WindowClosed,
}

//=== PlatformError =======================================================

#[derive(Debug)]
pub enum PlatformError {
    EventLoopCreation(String),
    EventLoopExecution(String),
    WindowCreation(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "could not create event loop: {}", e),
            Self::EventLoopExecution(e) => write!(f, "event loop failed: {}", e),
            Self::WindowCreation(e) => write!(f, "could not open window: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}
