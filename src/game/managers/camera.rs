//=========================================================================
// Camera Manager
//=========================================================================
//
// Ordered cameras plus the index of the one the player looks through.
//
// Events (category Camera):
//   OnCameraSetActive [Text(id)] → activate camera by id
//   OnCameraCycle                → activate next camera (wraps)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventData, HandlerError};
use crate::core::math::{Rect, Vec3};
use crate::game::actor::{ActorId, Transform3D};

//=== ProjectionParameters ================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl ProjectionParameters {
    /// 60° vertical field of view, near 1, far 2500.
    pub fn standard(aspect_ratio: f32) -> Self {
        Self {
            fov_degrees: 60.0,
            aspect_ratio,
            near: 1.0,
            far: 2500.0,
        }
    }
}

//=== CameraController ====================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraController {
    /// Trails `target` at `distance`, raised by `elevation_degrees`.
    ThirdPerson {
        target: ActorId,
        distance: f32,
        elevation_degrees: f32,
        /// Fraction of the remaining offset closed per update (0..=1).
        lerp: f32,
    },
}

//=== Camera3D ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    pub id: String,
    pub transform: Transform3D,
    pub projection: ProjectionParameters,
    pub viewport: Rect,
    /// Lower draws first when several cameras share the screen.
    pub draw_depth: f32,
    pub controller: Option<CameraController>,
}

impl Camera3D {
    pub fn new(
        id: impl Into<String>,
        transform: Transform3D,
        projection: ProjectionParameters,
        viewport: Rect,
    ) -> Self {
        Self {
            id: id.into(),
            transform,
            projection,
            viewport,
            draw_depth: 0.0,
            controller: None,
        }
    }

    pub fn with_controller(mut self, controller: CameraController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_draw_depth(mut self, depth: f32) -> Self {
        self.draw_depth = depth;
        self
    }

    fn update(&mut self, locate: &impl Fn(ActorId) -> Option<Vec3>) {
        let Some(CameraController::ThirdPerson { target, distance, elevation_degrees, lerp }) =
            self.controller
        else {
            return;
        };
        let Some(target_position) = locate(target) else {
            return;
        };

        let (sin, cos) = elevation_degrees.to_radians().sin_cos();
        let desired = target_position + Vec3::new(0.0, sin * distance, cos * distance);

        self.transform.translation = self.transform.translation.lerp(desired, lerp.clamp(0.0, 1.0));
        self.transform.look = (target_position - self.transform.translation).normalize();
    }
}

//=== SortDirection =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

//=== CameraManager =======================================================

#[derive(Debug, Default)]
pub struct CameraManager {
    cameras: Vec<Camera3D>,
    active: Option<usize>,
}

impl CameraManager {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Collection -------------------------------------------------------

    /// Appends a camera; the first one added becomes active.
    pub fn add(&mut self, camera: Camera3D) {
        debug!(target: "game::camera", "Added camera '{}'", camera.id);
        self.cameras.push(camera);
        if self.active.is_none() {
            self.active = Some(0);
        }
    }

    /// Removes the first camera matching `predicate`.
    pub fn remove(&mut self, predicate: impl Fn(&Camera3D) -> bool) -> bool {
        let Some(index) = self.cameras.iter().position(|c| predicate(c)) else {
            return false;
        };
        self.cameras.remove(index);
        self.fix_active_after_removal(index);
        true
    }

    /// Removes every camera matching `predicate`; returns how many.
    pub fn remove_all(&mut self, predicate: impl Fn(&Camera3D) -> bool) -> usize {
        let mut removed = 0;
        while self.remove(&predicate) {
            removed += 1;
        }
        removed
    }

    fn fix_active_after_removal(&mut self, removed: usize) {
        self.active = match self.active {
            _ if self.cameras.is_empty() => None,
            Some(active) if removed < active => Some(active - 1),
            Some(active) => Some(active.min(self.cameras.len() - 1)),
            None => None,
        };
    }

    pub fn find(&self, id: &str) -> Option<&Camera3D> {
        self.cameras.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Camera3D> {
        self.cameras.iter()
    }

    //--- Active Camera ----------------------------------------------------

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_camera(&self) -> Option<&Camera3D> {
        self.active.and_then(|i| self.cameras.get(i))
    }

    /// Out-of-range indices leave the active camera unchanged.
    pub fn set_active_index(&mut self, index: usize) -> bool {
        if index >= self.cameras.len() {
            return false;
        }
        self.active = Some(index);
        true
    }

    pub fn set_active(&mut self, id: &str) -> bool {
        match self.cameras.iter().position(|c| c.id == id) {
            Some(index) => {
                self.active = Some(index);
                info!(target: "game::camera", "Active camera: '{}'", id);
                true
            }
            None => false,
        }
    }

    /// Activates the next camera, wrapping to the first.
    pub fn cycle(&mut self) -> Option<&Camera3D> {
        if self.cameras.is_empty() {
            return None;
        }
        let next = self.active.map_or(0, |i| (i + 1) % self.cameras.len());
        self.active = Some(next);
        debug!(target: "game::camera", "Cycled to camera '{}'", self.cameras[next].id);
        self.cameras.get(next)
    }

    /// Applied to every projection after a window resize.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        for camera in &mut self.cameras {
            camera.projection.aspect_ratio = aspect_ratio;
        }
    }

    /// Reorders by draw depth; the active camera stays active.
    pub fn sort_by_depth(&mut self, direction: SortDirection) {
        let active_id = self.active_camera().map(|c| c.id.clone());

        self.cameras.sort_by(|a, b| {
            let order = a.draw_depth.total_cmp(&b.draw_depth);
            match direction {
                SortDirection::Ascending => order,
                SortDirection::Descending => order.reverse(),
            }
        });

        if let Some(id) = active_id {
            self.active = self.cameras.iter().position(|c| c.id == id);
        }
    }

    //--- Update -----------------------------------------------------------

    /// Advances every camera controller; `locate` resolves target actors.
    pub fn update(&mut self, locate: impl Fn(ActorId) -> Option<Vec3>) {
        for camera in &mut self.cameras {
            camera.update(&locate);
        }
    }

    //--- Events -----------------------------------------------------------

    pub fn handle_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        match event.action() {
            EventAction::OnCameraSetActive => {
                let id = event.text_param(0)?;
                if self.set_active(id) {
                    Ok(())
                } else {
                    Err(HandlerError::UnknownTarget(id.to_string()))
                }
            }
            EventAction::OnCameraCycle => {
                self.cycle();
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
