//=========================================================================
// State Tracker
//=========================================================================
//
// Held keys/buttons plus the per-tick pressed/released deltas.
//
// Tick lifecycle: begin_frame() → apply() per event → end_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent ------------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Per tick --------------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_moved: bool,
    frame_start_position: (f32, f32),
    mouse_delta: (f32, f32),
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    pub(super) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.mouse_moved = false;
        self.frame_start_position = self.mouse_position;
    }

    pub(super) fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                // OS key repeat must not re-trigger "pressed"
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
                self.mouse_moved = true;
            }
            InputEvent::Unidentified => {}
        }
    }

    pub(super) fn end_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.frame_start_position.0,
            self.mouse_position.1 - self.frame_start_position.1,
        );
    }

    /// Forgets everything held (focus loss, level reset).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    //=====================================================================
    // Query API
    //=====================================================================

    /// Up → down transition during this tick.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub fn mouse_moved(&self) -> bool {
        self.mouse_moved
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.begin_frame();
        for event in events {
            tracker.apply(event);
        }
        tracker.end_frame();
    }

    //=====================================================================
    // Keyboard
    //=====================================================================

    #[test]
    fn press_is_reported_for_one_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[InputEvent::key_down(KeyCode::Space)]);
        assert!(tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_down(KeyCode::Space));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_down(KeyCode::Space));
    }

    #[test]
    fn key_repeat_does_not_press_again() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::key_down(KeyCode::KeyA)]);
        frame(&mut tracker, &[InputEvent::key_down(KeyCode::KeyA)]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyA));
    }

    #[test]
    fn release_clears_held_state() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::key_down(KeyCode::ArrowLeft)]);
        frame(&mut tracker, &[InputEvent::key_up(KeyCode::ArrowLeft)]);

        assert!(tracker.is_key_released(KeyCode::ArrowLeft));
        assert!(!tracker.is_key_down(KeyCode::ArrowLeft));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::key_up(KeyCode::KeyQ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyQ));
    }

    #[test]
    fn tap_within_one_frame_is_pressed_and_released() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[InputEvent::key_down(KeyCode::F1), InputEvent::key_up(KeyCode::F1)],
        );
        assert!(tracker.is_key_pressed(KeyCode::F1));
        assert!(tracker.is_key_released(KeyCode::F1));
        assert!(!tracker.is_key_down(KeyCode::F1));
    }

    #[test]
    fn modifiers_follow_latest_event() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }],
        );
        assert_eq!(tracker.modifiers(), Modifiers::CTRL);
    }

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn button_press_and_release() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::button_down(MouseButton::Left)]);
        assert!(tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));

        frame(&mut tracker, &[InputEvent::button_up(MouseButton::Left)]);
        assert!(tracker.is_button_released(MouseButton::Left));
        assert!(!tracker.is_button_down(MouseButton::Left));
    }

    #[test]
    fn mouse_delta_is_per_frame() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::MouseMoved { x: 10.0, y: 20.0 }]);
        assert_eq!(tracker.mouse_delta(), (10.0, 20.0));
        assert!(tracker.mouse_moved());

        frame(&mut tracker, &[InputEvent::MouseMoved { x: 15.0, y: 10.0 }]);
        assert_eq!(tracker.mouse_delta(), (5.0, -10.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
        assert!(!tracker.mouse_moved());
        assert_eq!(tracker.mouse_position(), (15.0, 10.0));
    }

    #[test]
    fn reset_forgets_held_keys() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::key_down(KeyCode::ArrowRight)]);
        tracker.reset();
        assert!(!tracker.is_key_down(KeyCode::ArrowRight));
    }
}
