//=========================================================================
// Actors
//=========================================================================
//
// Everything placed in the level: ground, scenery, walls, pickups, zones
// and the player.
//
// An actor's gameplay role is a closed `ActorKind` tag, matched
// exhaustively by the collision response chain. Geometry is shared
// through `Arc<VertexData>`; transform, effect and controllers are owned
// per actor.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData, EventQueue};
use crate::core::math::{Color, Vec3};
use crate::game::collision::{CollisionPrimitive, CollisionShape};
use crate::game::controller::{Controller, ControllerOutcome, ControllerType, PlayStatus};
use crate::game::factory::PrimitiveObject;
use crate::game::primitives::VertexData;

pub use crate::core::events::ActorId;

//=== ActorKind ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// Visual only; never collides.
    Decorator,
    /// Trigger volume; never blocks.
    Zone,
    /// Blocks and changes colour when touched.
    CollidableDecorator,
    /// Blocks and is removed when touched.
    CollidableAmmo,
    /// Blocks and starts its pickup controllers when touched.
    CollidableActivatable,
    /// Blocks and ends the run unless power is active.
    CollidableArchitecture,
    Player,
    NotYetAssigned,
}

impl ActorKind {
    /// Whether overlap queries consider actors of this kind.
    pub fn is_collidable(self) -> bool {
        matches!(
            self,
            Self::Zone
                | Self::CollidableDecorator
                | Self::CollidableAmmo
                | Self::CollidableActivatable
                | Self::CollidableArchitecture
                | Self::Player
        )
    }
}

//=== StatusType ==========================================================

/// Update/draw flags shared by actors and pausable managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusType {
    pub update: bool,
    pub drawn: bool,
}

impl StatusType {
    pub const OFF: Self = Self { update: false, drawn: false };
    pub const UPDATE: Self = Self { update: true, drawn: false };
    pub const DRAWN: Self = Self { update: false, drawn: true };
    pub const UPDATE_DRAWN: Self = Self { update: true, drawn: true };

    pub fn is_off(self) -> bool {
        self == Self::OFF
    }

    /// Status a pausable component takes for a main-menu action.
    ///
    /// In-game components (`in_game == true`) run after `OnStart` and stop
    /// on `OnPause`; the menu itself does the opposite. Other actions leave
    /// the status unchanged.
    pub fn for_menu_action(action: EventAction, in_game: bool) -> Option<Self> {
        match action {
            EventAction::OnStart => Some(if in_game { Self::UPDATE_DRAWN } else { Self::OFF }),
            EventAction::OnPause => Some(if in_game { Self::OFF } else { Self::UPDATE_DRAWN }),
            _ => None,
        }
    }
}

impl Default for StatusType {
    fn default() -> Self {
        Self::UPDATE_DRAWN
    }
}

//=== Transform3D =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub translation: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub look: Vec3,
    pub up: Vec3,
    /// Movement requested this tick, applied by `apply_increment()`.
    pub translate_increment: Vec3,
}

impl Transform3D {
    pub fn new(translation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            scale,
            ..Self::default()
        }
    }

    pub fn translate_by(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Yaws the transform, rotating `look` around `up`.
    pub fn rotate_around_up(&mut self, degrees: f32) {
        self.rotation.y = (self.rotation.y + degrees) % 360.0;

        let (sin, cos) = degrees.to_radians().sin_cos();
        let look = self.look;
        self.look = Vec3::new(
            look.x * cos + look.z * sin,
            look.y,
            -look.x * sin + look.z * cos,
        )
        .normalize();
    }

    pub fn apply_increment(&mut self) {
        self.translation += self.translate_increment;
    }

    pub fn reset_increments(&mut self) {
        self.translate_increment = Vec3::ZERO;
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            look: Vec3::FORWARD,
            up: Vec3::UNIT_Y,
            translate_increment: Vec3::ZERO,
        }
    }
}

//=== EffectParameters ====================================================

#[derive(Debug, Clone, PartialEq)]
pub struct EffectParameters {
    pub diffuse_color: Color,
    pub alpha: f32,
    /// Texture name; resolved by the renderer, never loaded here.
    pub texture: Option<String>,
}

impl EffectParameters {
    pub fn textured(name: impl Into<String>) -> Self {
        Self {
            texture: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn colored(color: Color) -> Self {
        Self {
            diffuse_color: color,
            ..Self::default()
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha < 1.0
    }
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            diffuse_color: Color::WHITE,
            alpha: 1.0,
            texture: None,
        }
    }
}

//=== Actor ===============================================================

/// A placed object.
///
/// `Clone` deep-copies transform, effect and controllers and shares the
/// vertex data.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub transform: Transform3D,
    pub effect: EffectParameters,
    pub status: StatusType,
    collision: Option<CollisionShape>,
    vertex_data: Option<Arc<VertexData>>,
    controllers: Vec<Controller>,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>, kind: ActorKind, transform: Transform3D) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            transform,
            effect: EffectParameters::default(),
            status: StatusType::UPDATE_DRAWN,
            collision: None,
            vertex_data: None,
            controllers: Vec::new(),
        }
    }

    /// Instantiates a factory archetype: copies its transform and effect,
    /// shares its vertex data.
    pub fn from_archetype(
        id: ActorId,
        name: impl Into<String>,
        kind: ActorKind,
        archetype: &PrimitiveObject,
    ) -> Self {
        let mut actor = Self::new(id, name, kind, archetype.transform);
        actor.effect = archetype.effect.clone();
        actor.vertex_data = Some(Arc::clone(&archetype.vertex_data));
        actor
    }

    //--- Builder ----------------------------------------------------------

    pub fn with_effect(mut self, effect: EffectParameters) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_collision(mut self, shape: CollisionShape) -> Self {
        self.collision = Some(shape);
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controllers.push(controller);
        self
    }

    //--- Collision --------------------------------------------------------

    /// World-space collider, if the actor has a shape and collides at all.
    pub fn collision_primitive(&self) -> Option<CollisionPrimitive> {
        if !self.kind.is_collidable() {
            return None;
        }
        self.collision
            .map(|shape| CollisionPrimitive::from_transform(shape, &self.transform))
    }

    //--- Geometry ---------------------------------------------------------

    pub fn vertex_data(&self) -> Option<&Arc<VertexData>> {
        self.vertex_data.as_ref()
    }

    //--- Controllers ------------------------------------------------------

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    /// Sets the play status of every controller of `controller_type`.
    /// Returns how many were changed.
    pub fn set_controllers(&mut self, controller_type: ControllerType, status: PlayStatus) -> usize {
        let mut changed = 0;
        for controller in self
            .controllers
            .iter_mut()
            .filter(|c| c.controller_type() == controller_type)
        {
            if controller.play_status() != status {
                controller.set_play_status(status);
                changed += 1;
            }
        }
        changed
    }

    /// Runs all controllers and publishes the events their outcomes imply.
    pub fn update_controllers(&mut self, events: &mut EventQueue) {
        for controller in &mut self.controllers {
            match controller.update(&mut self.transform, &mut self.effect) {
                ControllerOutcome::Idle | ControllerOutcome::Animated => {}
                ControllerOutcome::BecameTransparent => {
                    events.publish(
                        EventData::new(EventCategory::Opacity, EventAction::OnOpaqueToTransparent)
                            .with_sender(self.id),
                    );
                }
                ControllerOutcome::Finished => {
                    trace!(target: "game", "Controller '{}' finished on {}", controller.id(), self.id);
                    events.publish(
                        EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor)
                            .with_sender(self.id),
                    );
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
