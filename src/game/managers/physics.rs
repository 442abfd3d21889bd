//=========================================================================
// Physics Manager
//=========================================================================
//
// Moves actors that own a rigid body. Paused while the menu is shown.
//
// Each update integrates with the elapsed time clamped to 1/60 s, so a
// long frame never tunnels an obstacle through the player.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::time::Duration;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventData, HandlerError};
use crate::core::math::Vec3;
use crate::game::actor::{ActorId, StatusType};
use crate::game::managers::object::ObjectManager;

/// Largest step fed to the integrator.
pub const MAX_TIME_STEP: f32 = 1.0 / 60.0;

//=== SolverSettings ======================================================

/// Contact solver tuning handed to the collision backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub collision_iterations: u32,
    pub contact_iterations: u32,
    pub penetration_relaxation: f32,
    pub allowed_penetration: f32,
    pub collision_tolerance: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            collision_iterations: 8,
            contact_iterations: 8,
            penetration_relaxation: 12.0,
            allowed_penetration: 0.000025,
            collision_tolerance: 0.00005,
        }
    }
}

//=== RigidBody ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    /// World units per second.
    pub velocity: Vec3,
}

//=== PhysicsManager ======================================================

#[derive(Debug)]
pub struct PhysicsManager {
    status: StatusType,
    bodies: HashMap<ActorId, RigidBody>,
    solver: SolverSettings,
    simulated: f32,
}

impl PhysicsManager {
    pub fn new(solver: SolverSettings) -> Self {
        Self {
            status: StatusType::OFF,
            bodies: HashMap::new(),
            solver,
            simulated: 0.0,
        }
    }

    pub fn solver(&self) -> &SolverSettings {
        &self.solver
    }

    pub fn is_running(&self) -> bool {
        self.status.update
    }

    pub fn status(&self) -> StatusType {
        self.status
    }

    /// Seconds of simulation integrated so far.
    pub fn simulated_seconds(&self) -> f32 {
        self.simulated
    }

    //--- Bodies -----------------------------------------------------------

    pub fn add_body(&mut self, id: ActorId, body: RigidBody) {
        self.bodies.insert(id, body);
    }

    pub fn remove_body(&mut self, id: ActorId) -> bool {
        self.bodies.remove(&id).is_some()
    }

    pub fn body(&self, id: ActorId) -> Option<&RigidBody> {
        self.bodies.get(&id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.bodies.keys().copied()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    //--- Integration ------------------------------------------------------

    pub fn step_size(elapsed: Duration) -> f32 {
        elapsed.as_secs_f32().min(MAX_TIME_STEP)
    }

    /// Advances every body's actor. Returns the step used (0 while paused).
    pub fn integrate(&mut self, elapsed: Duration, objects: &mut ObjectManager) -> f32 {
        if !self.is_running() {
            return 0.0;
        }

        let step = Self::step_size(elapsed);
        for (id, body) in &self.bodies {
            match objects.find_mut(*id) {
                Some(actor) => actor.transform.translate_by(body.velocity * step),
                None => trace!(target: "game::physics", "Body {} has no actor", id),
            }
        }

        self.simulated += step;
        step
    }

    //--- Events -----------------------------------------------------------

    pub fn handle_menu_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        if let Some(status) = StatusType::for_menu_action(event.action(), true) {
            debug!(target: "game::physics", "Physics {:?} on {:?}", status, event.action());
            self.status = status;
        }
        Ok(())
    }

    pub fn handle_remove_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        if event.action() == EventAction::OnRemoveActor {
            self.remove_body(event.require_sender()?);
        }
        Ok(())
    }
}

impl Default for PhysicsManager {
    fn default() -> Self {
        Self::new(SolverSettings::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
