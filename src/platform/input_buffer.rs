//=========================================================================
// Input Buffer
//=========================================================================
//
// Holds the input gathered between two redraws on the window thread.
//
//   discrete    key and button transitions, in arrival order; an exact
//               repeat of the previous event (OS key repeat) is dropped
//   continuous  latest cursor position only
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(32),
            continuous: HashSet::with_capacity(2),
        }
    }

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// `MouseMoved` events compare equal, so this keeps the newest one.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        self.continuous.replace(event);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }

    /// Takes everything buffered, or `None` if nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};

    #[test]
    fn empty_buffer_drains_to_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn key_repeat_is_collapsed() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::key_down(KeyCode::ArrowLeft));
        buffer.push_discrete(InputEvent::key_down(KeyCode::ArrowLeft));
        buffer.push_discrete(InputEvent::key_up(KeyCode::ArrowLeft));
        buffer.push_discrete(InputEvent::key_down(KeyCode::ArrowLeft));

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(discrete.len(), 3);
    }

    #[test]
    fn order_of_discrete_events_is_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::button_down(MouseButton::Left));
        buffer.push_discrete(InputEvent::key_down(KeyCode::Escape));

        let (discrete, _) = buffer.drain().unwrap();
        assert_eq!(
            discrete,
            vec![
                InputEvent::button_down(MouseButton::Left),
                InputEvent::key_down(KeyCode::Escape),
            ]
        );
    }

    #[test]
    fn cursor_keeps_latest_position() {
        let mut buffer = InputBuffer::new();
        buffer.push_continuous(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        buffer.push_continuous(InputEvent::MouseMoved { x: 200.0, y: 150.0 });

        let (discrete, continuous) = buffer.drain().unwrap();
        assert!(discrete.is_empty());
        assert!(matches!(
            continuous.as_slice(),
            [InputEvent::MouseMoved { x, y }] if *x == 200.0 && *y == 150.0
        ));
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_discrete(InputEvent::key_down(KeyCode::Space));
        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
