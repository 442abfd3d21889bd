//=========================================================================
// Screen Manager
//=========================================================================
//
// Owns the output layout and the "is the game running" switch.
//
// The pause key shows or hides the main menu by publishing MainMenu
// events; the manager itself only changes status when those events come
// back through the dispatcher, keeping every pausable component in step.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData, EventQueue, HandlerError};
use crate::core::input::{InputSystem, KeyCode};
use crate::core::math::Rect;
use crate::game::actor::StatusType;

//=== ScreenType ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenType {
    #[default]
    SingleScreen,
    /// Main view plus an inset view from a second camera.
    MultiPictureInPicture,
}

//=== ScreenManager =======================================================

#[derive(Debug)]
pub struct ScreenManager {
    status: StatusType,
    screen_type: ScreenType,
    resolution: (u32, u32),
    full_screen: bool,
    pause_key: KeyCode,
}

impl ScreenManager {
    pub fn new(resolution: (u32, u32), pause_key: KeyCode) -> Self {
        Self {
            status: StatusType::OFF,
            screen_type: ScreenType::default(),
            resolution,
            full_screen: false,
            pause_key,
        }
    }

    //--- Query API --------------------------------------------------------

    /// `true` while the game (not the menu) has control.
    pub fn is_playing(&self) -> bool {
        self.status.update
    }

    pub fn status(&self) -> StatusType {
        self.status
    }

    pub fn screen_type(&self) -> ScreenType {
        self.screen_type
    }

    pub fn set_screen_type(&mut self, screen_type: ScreenType) {
        self.screen_type = screen_type;
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Zero-sized (minimised) windows are ignored.
    pub fn set_resolution(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == self.resolution {
            return false;
        }
        debug!(target: "game", "Resolution {}x{}", width, height);
        self.resolution = (width, height);
        true
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn toggle_full_screen(&mut self) -> bool {
        self.full_screen = !self.full_screen;
        self.full_screen
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.resolution.0 as f32 / self.resolution.1.max(1) as f32
    }

    /// Full-window viewport.
    pub fn full_viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.resolution.0 as f32, self.resolution.1 as f32)
    }

    /// Inset viewport for picture-in-picture (top-right quarter).
    pub fn inset_viewport(&self) -> Rect {
        let (w, h) = (self.resolution.0 as f32, self.resolution.1 as f32);
        Rect::new(w * 0.75 - 10.0, 10.0, w * 0.25, h * 0.25)
    }

    //--- Input ------------------------------------------------------------

    pub fn handle_input(&self, input: &InputSystem, events: &mut EventQueue) {
        if !input.is_key_pressed(self.pause_key) {
            return;
        }

        let action = if self.status.is_off() {
            EventAction::OnStart
        } else {
            EventAction::OnPause
        };
        debug!(target: "game", "Pause key: publishing {:?}", action);
        events.publish(EventData::new(EventCategory::MainMenu, action));
    }

    //--- Events -----------------------------------------------------------

    pub fn handle_menu_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        if let Some(status) = StatusType::for_menu_action(event.action(), true) {
            self.status = status;
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
