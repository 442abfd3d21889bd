//=========================================================================
// Actor Controllers
//=========================================================================
//
// Per-actor behaviours switched on and off by gameplay.
//
// A controller mutates only its owner's transform and effect; anything
// that affects other systems (opacity lists, removal) is reported back
// as a `ControllerOutcome` and published as an event by the owner.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vec3;
use crate::game::actor::{EffectParameters, Transform3D};

//=== PlayStatus ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayStatus {
    #[default]
    Off,
    Play,
    Pause,
}

//=== ControllerType ======================================================

/// Kind tag used when selecting controllers on an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerType {
    PickupDisappear,
}

//=== PickupParameters ====================================================

/// Spin, rise, shrink and fade, applied once per update while playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupParameters {
    pub rotation_degrees: f32,
    pub translation: Vec3,
    pub scale_factor: f32,
    pub alpha_delta: f32,
    /// Alpha at or below which the pickup is removed.
    pub removal_alpha: f32,
}

impl Default for PickupParameters {
    fn default() -> Self {
        Self {
            rotation_degrees: 15.0,
            translation: Vec3::UNIT_Y * 0.02,
            scale_factor: 0.99,
            alpha_delta: -0.02,
            removal_alpha: 0.1,
        }
    }
}

//=== ControllerOutcome ===================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerOutcome {
    /// Not playing; nothing changed.
    Idle,
    Animated,
    /// Alpha dropped below 1.0 for the first time.
    BecameTransparent,
    /// Animation complete; the owner should be removed.
    Finished,
}

//=== Controller ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    id: String,
    kind: ControllerKind,
    status: PlayStatus,
}

#[derive(Debug, Clone, PartialEq)]
enum ControllerKind {
    PickupDisappear(PickupParameters),
}

impl Controller {
    /// Creates a pickup-disappear controller in the `Off` state.
    pub fn pickup_disappear(id: impl Into<String>, params: PickupParameters) -> Self {
        Self {
            id: id.into(),
            kind: ControllerKind::PickupDisappear(params),
            status: PlayStatus::Off,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn controller_type(&self) -> ControllerType {
        match self.kind {
            ControllerKind::PickupDisappear(_) => ControllerType::PickupDisappear,
        }
    }

    pub fn play_status(&self) -> PlayStatus {
        self.status
    }

    pub fn set_play_status(&mut self, status: PlayStatus) {
        self.status = status;
    }

    pub fn update(
        &mut self,
        transform: &mut Transform3D,
        effect: &mut EffectParameters,
    ) -> ControllerOutcome {
        if self.status != PlayStatus::Play {
            return ControllerOutcome::Idle;
        }

        match self.kind {
            ControllerKind::PickupDisappear(params) => {
                let was_opaque = !effect.is_transparent();

                transform.rotate_around_up(params.rotation_degrees);
                transform.translate_by(params.translation);
                transform.scale = transform.scale * params.scale_factor;
                effect.alpha = (effect.alpha + params.alpha_delta).clamp(0.0, 1.0);

                if effect.alpha <= params.removal_alpha {
                    // One-shot: stop so removal is requested once
                    self.status = PlayStatus::Off;
                    ControllerOutcome::Finished
                } else if was_opaque && effect.is_transparent() {
                    ControllerOutcome::BecameTransparent
                } else {
                    ControllerOutcome::Animated
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
