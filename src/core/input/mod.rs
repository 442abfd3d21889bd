//=========================================================================
// Input System
//=========================================================================
//
// Turns the input batches collected for one tick into queryable state.
//
// Architecture:
//   EventCollector batches → InputSystem::process_frame() → StateTracker
//                                                            ↓
//                                    player / screen / menu queries
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
pub mod state_tracker;

//=== External Dependencies ===============================================

use log::trace;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;

//=== InputSystem =========================================================

/// Owns the [`StateTracker`] and advances it once per tick.
#[derive(Debug, Default)]
pub struct InputSystem {
    tracker: StateTracker,
}

impl InputSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies every batch received this tick, in arrival order.
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) {
        self.tracker.begin_frame();

        let mut count = 0;
        for batch in batches {
            for event in batch {
                self.tracker.apply(event);
                count += 1;
            }
        }

        self.tracker.end_frame();

        if count > 0 {
            trace!(target: "input", "Processed {} input events", count);
        }
    }

    pub fn state(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    //--- Convenience Queries ----------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.tracker.is_key_down(key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.tracker.is_key_pressed(key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.tracker.is_button_pressed(button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.tracker.mouse_position()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
