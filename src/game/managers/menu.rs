//=========================================================================
// Menu Manager
//=========================================================================
//
// Named menu scenes ("main menu", "audio menu", ...) each holding UI
// objects. One scene is active; it is shown while the game is paused.
//
// Mouse hover is tracked per object. A left click on a button either
// publishes an event or switches scene:
//
//   startbtn, restartbtn      → MainMenu/OnStart
//   exitbtn                   → MainMenu/OnExit
//   audiobtn / controlsbtn    → audio / controls scene
//   backbtn                   → main scene
//   volume*btn                → Sound/OnVolumeUp|Down, OnMute, OnUnMute
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData, EventQueue, HandlerError};
use crate::core::input::{InputSystem, MouseButton};
use crate::game::actor::StatusType;
use crate::game::managers::ui::UiObject;

pub const MAIN_MENU: &str = "main menu";
pub const AUDIO_MENU: &str = "audio menu";
pub const CONTROLS_MENU: &str = "controls menu";
pub const LOSE_MENU: &str = "lose menu";

//=== MenuManager =========================================================

#[derive(Debug)]
pub struct MenuManager {
    status: StatusType,
    scenes: HashMap<String, Vec<UiObject>>,
    active: Option<String>,
    hovered: Option<String>,
}

impl MenuManager {
    pub fn new() -> Self {
        Self {
            status: StatusType::UPDATE_DRAWN,
            scenes: HashMap::new(),
            active: None,
            hovered: None,
        }
    }

    pub fn status(&self) -> StatusType {
        self.status
    }

    pub fn is_visible(&self) -> bool {
        self.status.drawn
    }

    //--- Scenes -----------------------------------------------------------

    /// Adds `object` to `scene`. The first scene ever added becomes active.
    pub fn add(&mut self, scene: &str, object: UiObject) {
        self.scenes.entry(scene.to_string()).or_default().push(object);
        if self.active.is_none() {
            self.active = Some(scene.to_string());
        }
    }

    pub fn find(&self, scene: &str, predicate: impl Fn(&UiObject) -> bool) -> Option<&UiObject> {
        self.scenes.get(scene)?.iter().find(|o| predicate(o))
    }

    pub fn find_mut(
        &mut self,
        scene: &str,
        predicate: impl Fn(&UiObject) -> bool,
    ) -> Option<&mut UiObject> {
        self.scenes.get_mut(scene)?.iter_mut().find(|o| predicate(o))
    }

    pub fn remove(&mut self, scene: &str, predicate: impl Fn(&UiObject) -> bool) -> bool {
        let Some(objects) = self.scenes.get_mut(scene) else {
            return false;
        };
        match objects.iter().position(|o| predicate(o)) {
            Some(index) => {
                objects.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn scene(&self, scene: &str) -> Option<&[UiObject]> {
        self.scenes.get(scene).map(Vec::as_slice)
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn set_active_list(&mut self, scene: &str) -> bool {
        if !self.scenes.contains_key(scene) {
            warn!(target: "game::menu", "No menu scene '{}'", scene);
            return false;
        }
        debug!(target: "game::menu", "Active menu scene '{}'", scene);
        self.active = Some(scene.to_string());
        self.hovered = None;
        true
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_list(&self) -> &[UiObject] {
        self.active
            .as_deref()
            .and_then(|scene| self.scene(scene))
            .unwrap_or(&[])
    }

    /// Id of the object under the mouse in the active scene.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, input: &InputSystem, events: &mut EventQueue) {
        if !self.status.update {
            return;
        }
        let Some(objects) = self.active.as_ref().and_then(|s| self.scenes.get_mut(s)) else {
            return;
        };

        let (mx, my) = input.mouse_position();
        let mut hovered = None;
        for object in objects.iter_mut() {
            let over = object.bounds.contains(mx, my);
            object.set_mouse_over(over);
            if over && object.is_button() {
                hovered = Some(object.id.clone());
            }
        }
        self.hovered = hovered;

        if input.is_button_pressed(MouseButton::Left) {
            if let Some(id) = self.hovered.clone() {
                self.handle_click(&id, events);
            }
        }
    }

    fn handle_click(&mut self, id: &str, events: &mut EventQueue) {
        debug!(target: "game::menu", "Clicked '{}'", id);

        let publish = |events: &mut EventQueue, category, action| {
            events.publish(EventData::new(category, action));
        };

        match id {
            "startbtn" | "restartbtn" => {
                publish(events, EventCategory::MainMenu, EventAction::OnStart)
            }
            "exitbtn" => publish(events, EventCategory::MainMenu, EventAction::OnExit),
            "audiobtn" => {
                self.set_active_list(AUDIO_MENU);
            }
            "controlsbtn" => {
                self.set_active_list(CONTROLS_MENU);
            }
            "backbtn" => {
                self.set_active_list(MAIN_MENU);
            }
            "volumeUpbtn" => publish(events, EventCategory::Sound, EventAction::OnVolumeUp),
            "volumeDownbtn" => publish(events, EventCategory::Sound, EventAction::OnVolumeDown),
            "volumeMutebtn" => publish(events, EventCategory::Sound, EventAction::OnMute),
            "volumeUnMutebtn" => publish(events, EventCategory::Sound, EventAction::OnUnMute),
            other => debug!(target: "game::menu", "No action for '{}'", other),
        }
    }

    //--- Events -----------------------------------------------------------

    pub fn handle_menu_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        if let Some(status) = StatusType::for_menu_action(event.action(), false) {
            self.status = status;
        }
        // Next time the menu opens it starts from the main scene
        if event.action() == EventAction::OnStart && self.scenes.contains_key(MAIN_MENU) {
            self.active = Some(MAIN_MENU.to_string());
            self.hovered = None;
        }
        Ok(())
    }
}

impl Default for MenuManager {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::InputEvent;
    use crate::core::math::Rect;
    use crate::game::managers::ui::UiKind;

    fn menus() -> MenuManager {
        let mut menu = MenuManager::new();
        menu.add(MAIN_MENU, UiObject::new("background", UiKind::StaticTexture, Rect::new(0.0, 0.0, 1280.0, 720.0)));
        menu.add(MAIN_MENU, UiObject::button("startbtn", "Start", Rect::new(100.0, 100.0, 200.0, 50.0)));
        menu.add(MAIN_MENU, UiObject::button("audiobtn", "Audio", Rect::new(100.0, 200.0, 200.0, 50.0)));
        menu.add(AUDIO_MENU, UiObject::button("volumeUpbtn", "Volume Up", Rect::new(100.0, 100.0, 200.0, 50.0)));
        menu.add(AUDIO_MENU, UiObject::button("backbtn", "Back", Rect::new(100.0, 200.0, 200.0, 50.0)));
        menu
    }

    fn click_at(x: f32, y: f32) -> InputSystem {
        let mut input = InputSystem::new();
        input.process_frame(&[vec![
            InputEvent::MouseMoved { x, y },
            InputEvent::button_down(MouseButton::Left),
        ]]);
        input
    }

    fn hover_at(x: f32, y: f32) -> InputSystem {
        let mut input = InputSystem::new();
        input.process_frame(&[vec![InputEvent::MouseMoved { x, y }]]);
        input
    }

    //=====================================================================
    // Scenes
    //=====================================================================

    #[test]
    fn first_scene_added_is_active() {
        let menu = menus();
        assert_eq!(menu.active_scene(), Some(MAIN_MENU));
        assert_eq!(menu.active_list().len(), 3);
        assert_eq!(menu.scene_count(), 2);
    }

    #[test]
    fn set_active_list_rejects_unknown_scene() {
        let mut menu = menus();
        assert!(!menu.set_active_list("options"));
        assert_eq!(menu.active_scene(), Some(MAIN_MENU));
    }

    #[test]
    fn find_and_remove() {
        let mut menu = menus();
        assert!(menu.find(AUDIO_MENU, |o| o.id == "backbtn").is_some());
        assert!(menu.remove(AUDIO_MENU, |o| o.id == "backbtn"));
        assert!(!menu.remove(AUDIO_MENU, |o| o.id == "backbtn"));
        assert!(!menu.remove("missing", |_| true));
    }

    //=====================================================================
    // Mouse
    //=====================================================================

    #[test]
    fn hover_marks_button() {
        let mut menu = menus();
        let mut events = EventQueue::new();

        menu.update(&hover_at(150.0, 120.0), &mut events);

        assert_eq!(menu.hovered(), Some("startbtn"));
        assert!(menu.find(MAIN_MENU, |o| o.id == "startbtn").is_some_and(UiObject::is_mouse_over));
        assert!(events.is_empty());
    }

    #[test]
    fn clicking_start_publishes_on_start() {
        let mut menu = menus();
        let mut events = EventQueue::new();

        menu.update(&click_at(150.0, 120.0), &mut events);

        assert!(events.contains(&EventData::new(EventCategory::MainMenu, EventAction::OnStart)));
    }

    #[test]
    fn scene_buttons_switch_and_return() {
        let mut menu = menus();
        let mut events = EventQueue::new();

        menu.update(&click_at(150.0, 220.0), &mut events);
        assert_eq!(menu.active_scene(), Some(AUDIO_MENU));

        menu.update(&click_at(150.0, 120.0), &mut events);
        assert!(events.contains(&EventData::new(EventCategory::Sound, EventAction::OnVolumeUp)));

        menu.update(&click_at(150.0, 220.0), &mut events);
        assert_eq!(menu.active_scene(), Some(MAIN_MENU));
    }

    #[test]
    fn hidden_menu_ignores_mouse() {
        let mut menu = menus();
        menu.handle_menu_event(&EventData::new(EventCategory::MainMenu, EventAction::OnStart))
            .unwrap();
        let mut events = EventQueue::new();

        menu.update(&click_at(150.0, 120.0), &mut events);

        assert!(!menu.is_visible());
        assert!(events.is_empty());
    }

    //=====================================================================
    // Events
    //=====================================================================

    #[test]
    fn pause_shows_current_scene_and_start_resets_to_main() {
        let mut menu = menus();
        menu.set_active_list(AUDIO_MENU);

        menu.handle_menu_event(&EventData::new(EventCategory::MainMenu, EventAction::OnPause))
            .unwrap();
        assert!(menu.is_visible());
        assert_eq!(menu.active_scene(), Some(AUDIO_MENU));

        menu.handle_menu_event(&EventData::new(EventCategory::MainMenu, EventAction::OnStart))
            .unwrap();
        assert_eq!(menu.active_scene(), Some(MAIN_MENU));
    }
}
