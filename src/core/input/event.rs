//=========================================================================
// Input Events
//=========================================================================
//
// Portable keyboard/mouse events produced by the platform thread.
//
// Flow:
//   winit → InputProcessor → InputEvent → PlatformEvent::Inputs
//         → EventCollector → InputSystem (StateTracker)
//
// Equality ignores cursor coordinates so consecutive `MouseMoved`
// events collapse to the latest one in the platform buffer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical key location (layout independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Reported by the platform but not mapped here.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Shift/Ctrl/Alt state; left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

//=== InputEvent ==========================================================

/// One input occurrence.
///
/// ```text
/// KeyDown{A, CTRL} == KeyDown{A, CTRL}    ✓
/// KeyDown{A, CTRL} == KeyDown{A, NONE}    ✗
/// MouseMoved{1,2}  == MouseMoved{9,9}     ✓ (coordinates ignored)
/// ```
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    Unidentified,
}

impl InputEvent {
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown { key, modifiers: Modifiers::NONE }
    }

    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp { key, modifiers: Modifiers::NONE }
    }

    pub fn button_down(button: MouseButton) -> Self {
        Self::MouseButtonDown { button, modifiers: Modifiers::NONE }
    }

    pub fn button_up(button: MouseButton) -> Self {
        Self::MouseButtonUp { button, modifiers: Modifiers::NONE }
    }

    /// Continuous events are coalesced rather than queued.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::MouseMoved { .. } | Self::Unidentified => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn key_events_compare_key_and_modifiers() {
        assert_eq!(InputEvent::key_down(KeyCode::F1), InputEvent::key_down(KeyCode::F1));
        assert_ne!(InputEvent::key_down(KeyCode::F1), InputEvent::key_up(KeyCode::F1));
        assert_ne!(
            InputEvent::key_down(KeyCode::KeyA),
            InputEvent::KeyDown { key: KeyCode::KeyA, modifiers: Modifiers::CTRL }
        );
    }

    #[test]
    fn mouse_moved_ignores_coordinates() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 640.0, y: 360.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn button_and_key_families_differ() {
        assert_ne!(
            InputEvent::key_down(KeyCode::Space),
            InputEvent::button_down(MouseButton::Left)
        );
    }

    #[test]
    fn hash_matches_equality_in_sets() {
        let mut set = HashSet::new();
        set.insert(InputEvent::key_down(KeyCode::ArrowLeft));
        set.insert(InputEvent::key_down(KeyCode::ArrowLeft));
        set.insert(InputEvent::MouseMoved { x: 0.0, y: 0.0 });
        set.insert(InputEvent::MouseMoved { x: 5.0, y: 5.0 });
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn only_mouse_moved_is_continuous() {
        assert!(InputEvent::MouseMoved { x: 0.0, y: 0.0 }.is_continuous());
        assert!(!InputEvent::key_down(KeyCode::Escape).is_continuous());
        assert!(!InputEvent::Unidentified.is_continuous());
    }

    #[test]
    fn modifiers_any() {
        assert!(!Modifiers::NONE.any());
        assert!(Modifiers::SHIFT.any());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
