//=========================================================================
// UI Objects and HUD
//=========================================================================
//
// Screen-space objects shared by the menu and the in-game HUD, plus the
// HUD manager itself.
//
// Progress bars follow `Player/OnHealthChange [Text(bar id), Int(delta)]`.
// A value that leaves [0, max] resets the bar to 0.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventData, HandlerError};
use crate::core::math::{Color, Rect};
use crate::game::actor::StatusType;

//=== ProgressBar =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    current: i32,
    max: i32,
}

impl ProgressBar {
    pub fn new(start: i32, max: i32) -> Self {
        let mut bar = Self { current: 0, max: max.max(0) };
        bar.set_current(start.max(0));
        bar
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn set_current(&mut self, value: i32) {
        self.current = if (0..=self.max).contains(&value) { value } else { 0 };
    }

    pub fn apply_delta(&mut self, delta: i32) {
        self.set_current(self.current.saturating_add(delta));
    }

    /// Filled share of the bar in [0, 1].
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Visible width of a bar texture `full_width` wide.
    pub fn visible_width(&self, full_width: u32) -> u32 {
        (self.fraction() * full_width as f32) as u32
    }
}

//=== UiKind ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum UiKind {
    /// Background or decoration.
    StaticTexture,
    /// Text rewritten at runtime (score, high score).
    DynamicText,
    /// Clickable menu entry.
    Button,
    ProgressBar(ProgressBar),
}

//=== UiObject ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UiObject {
    pub id: String,
    pub kind: UiKind,
    pub bounds: Rect,
    pub text: String,
    pub color: Color,
    /// Lower draws in front.
    pub depth: f32,
    pub status: StatusType,
    mouse_over: bool,
}

impl UiObject {
    pub fn new(id: impl Into<String>, kind: UiKind, bounds: Rect) -> Self {
        Self {
            id: id.into(),
            kind,
            bounds,
            text: String::new(),
            color: Color::WHITE,
            depth: 0.0,
            status: StatusType::UPDATE_DRAWN,
            mouse_over: false,
        }
    }

    pub fn button(id: impl Into<String>, text: impl Into<String>, bounds: Rect) -> Self {
        Self::new(id, UiKind::Button, bounds).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    pub(crate) fn set_mouse_over(&mut self, over: bool) {
        self.mouse_over = over;
    }

    pub fn is_button(&self) -> bool {
        self.kind == UiKind::Button
    }

    pub fn progress(&self) -> Option<&ProgressBar> {
        match &self.kind {
            UiKind::ProgressBar(bar) => Some(bar),
            _ => None,
        }
    }
}

//=== UiManager ===========================================================

/// In-game HUD. Hidden while the menu shows.
#[derive(Debug)]
pub struct UiManager {
    status: StatusType,
    objects: Vec<UiObject>,
    score_id: String,
}

impl UiManager {
    pub fn new(score_id: impl Into<String>) -> Self {
        Self {
            status: StatusType::OFF,
            objects: Vec::new(),
            score_id: score_id.into(),
        }
    }

    pub fn status(&self) -> StatusType {
        self.status
    }

    pub fn is_visible(&self) -> bool {
        self.status.drawn
    }

    //--- Collection -------------------------------------------------------

    pub fn add(&mut self, object: UiObject) {
        self.objects.push(object);
    }

    pub fn find(&self, id: &str) -> Option<&UiObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut UiObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, score: u32) {
        if !self.status.update {
            return;
        }
        let score_id = &self.score_id;
        if let Some(text) = self.objects.iter_mut().find(|o| &o.id == score_id) {
            text.text = format!("Score: {}", score);
        }
    }

    /// Puts every progress bar back to `value`.
    pub fn reset_progress(&mut self, value: i32) {
        for object in &mut self.objects {
            if let UiKind::ProgressBar(bar) = &mut object.kind {
                bar.set_current(value);
            }
        }
    }

    //--- Events -----------------------------------------------------------

    pub fn handle_menu_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        if let Some(status) = StatusType::for_menu_action(event.action(), true) {
            trace!(target: "game::ui", "HUD {:?}", status);
            self.status = status;
        }
        Ok(())
    }

    pub fn handle_player_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        if event.action() != EventAction::OnHealthChange {
            return Ok(());
        }

        let target = event.text_param(0)?;
        let delta = event.int_param(1)?;

        let bar = self
            .objects
            .iter_mut()
            .find(|o| o.id == target)
            .and_then(|o| match &mut o.kind {
                UiKind::ProgressBar(bar) => Some(bar),
                _ => None,
            })
            .ok_or_else(|| HandlerError::UnknownTarget(target.to_string()))?;

        bar.apply_delta(delta);
        debug!(target: "game::ui", "'{}' now {}/{}", target, bar.current(), bar.max());
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
