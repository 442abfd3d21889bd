//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit window events into portable `InputEvent`s.
//
//   WindowEvent ─► translate() ─► Discrete(KeyDown/Up, MouseButtonDown/Up)
//                              ─► Continuous(MouseMoved)
//
// Modifier state is sticky: the last ModifiersChanged applies to every
// following key and button event. OS key repeats and keys without a
// mapping are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Translated ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Translated {
    Discrete(InputEvent),
    Continuous(InputEvent),
}

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
        }
    }

    pub(crate) fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = map_modifiers(state);
    }

    /// `None` for events that carry no input (or only update modifiers).
    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Option<Translated> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.set_modifiers(state.state());
                None
            }
            WindowEvent::KeyboardInput { event, .. } => self
                .key(event.physical_key, event.state, event.repeat)
                .map(Translated::Discrete),
            WindowEvent::MouseInput { state, button, .. } => {
                Some(Translated::Discrete(self.button(*button, *state)))
            }
            WindowEvent::CursorMoved { position, .. } => Some(Translated::Continuous(
                InputEvent::MouseMoved { x: position.x as f32, y: position.y as f32 },
            )),
            _ => None,
        }
    }

    //--- Conversions ------------------------------------------------------

    pub(crate) fn key(&self, key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        if repeat {
            return None;
        }
        let key = match key {
            PhysicalKey::Code(code) => map_key(code),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        };
        if key == KeyCode::Unidentified {
            trace!(target: "platform::input", "Unmapped key dropped");
            return None;
        }

        let modifiers = self.modifiers;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }

    pub(crate) fn button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = map_button(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }
}

//=== Mappings ============================================================

/// winit folds Cmd into Ctrl and Option into Alt on macOS.
fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

fn map_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back | WinitMouseButton::Forward | WinitMouseButton::Other(_) => {
            MouseButton::Other
        }
    }
}

fn map_key(code: WinitKeyCode) -> KeyCode {
    use WinitKeyCode as W;
    match code {
        W::Digit0 => KeyCode::Digit0, W::Digit1 => KeyCode::Digit1,
        W::Digit2 => KeyCode::Digit2, W::Digit3 => KeyCode::Digit3,
        W::Digit4 => KeyCode::Digit4, W::Digit5 => KeyCode::Digit5,
        W::Digit6 => KeyCode::Digit6, W::Digit7 => KeyCode::Digit7,
        W::Digit8 => KeyCode::Digit8, W::Digit9 => KeyCode::Digit9,

        W::KeyA => KeyCode::KeyA, W::KeyB => KeyCode::KeyB, W::KeyC => KeyCode::KeyC,
        W::KeyD => KeyCode::KeyD, W::KeyE => KeyCode::KeyE, W::KeyF => KeyCode::KeyF,
        W::KeyG => KeyCode::KeyG, W::KeyH => KeyCode::KeyH, W::KeyI => KeyCode::KeyI,
        W::KeyJ => KeyCode::KeyJ, W::KeyK => KeyCode::KeyK, W::KeyL => KeyCode::KeyL,
        W::KeyM => KeyCode::KeyM, W::KeyN => KeyCode::KeyN, W::KeyO => KeyCode::KeyO,
        W::KeyP => KeyCode::KeyP, W::KeyQ => KeyCode::KeyQ, W::KeyR => KeyCode::KeyR,
        W::KeyS => KeyCode::KeyS, W::KeyT => KeyCode::KeyT, W::KeyU => KeyCode::KeyU,
        W::KeyV => KeyCode::KeyV, W::KeyW => KeyCode::KeyW, W::KeyX => KeyCode::KeyX,
        W::KeyY => KeyCode::KeyY, W::KeyZ => KeyCode::KeyZ,

        W::F1 => KeyCode::F1, W::F2 => KeyCode::F2, W::F3 => KeyCode::F3,
        W::F4 => KeyCode::F4, W::F5 => KeyCode::F5, W::F6 => KeyCode::F6,
        W::F7 => KeyCode::F7, W::F8 => KeyCode::F8, W::F9 => KeyCode::F9,
        W::F10 => KeyCode::F10, W::F11 => KeyCode::F11, W::F12 => KeyCode::F12,

        W::ArrowDown => KeyCode::ArrowDown,
        W::ArrowLeft => KeyCode::ArrowLeft,
        W::ArrowRight => KeyCode::ArrowRight,
        W::ArrowUp => KeyCode::ArrowUp,

        W::Space => KeyCode::Space,
        W::Enter | W::NumpadEnter => KeyCode::Enter,
        W::Escape => KeyCode::Escape,
        W::Tab => KeyCode::Tab,
        W::Backspace => KeyCode::Backspace,
        W::Delete => KeyCode::Delete,

        _ => KeyCode::Unidentified,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
