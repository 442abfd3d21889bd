//=========================================================================
// Object Manager
//=========================================================================
//
// Owns every non-player actor, split into opaque and transparent lists
// (transparent ones are drawn last).
//
// Events:
//   SystemRemove/OnRemoveActor (sender)        → remove actor
//   Opacity/OnOpaqueToTransparent (sender)     → move to transparent list
//   Opacity/OnTransparentToOpaque (sender)     → move to opaque list
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData, EventQueue, HandlerError};
use crate::game::actor::{Actor, ActorId};
use crate::game::collision::CollisionPrimitive;

//=== ObjectManager =======================================================

#[derive(Debug)]
pub struct ObjectManager {
    opaque: Vec<Actor>,
    transparent: Vec<Actor>,
    next_id: u32,
    despawn_z: f32,
}

impl ObjectManager {
    /// Actors whose Z passes `despawn_z` are removed during `update`.
    pub fn new(despawn_z: f32) -> Self {
        Self {
            opaque: Vec::new(),
            transparent: Vec::new(),
            next_id: 1,
            despawn_z,
        }
    }

    /// Hands out a fresh id. Ids are never reused, even across `clear`.
    pub fn allocate_id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }

    //--- Collection -------------------------------------------------------

    pub fn add(&mut self, actor: Actor) {
        trace!(target: "game", "Adding actor {} '{}'", actor.id, actor.name);
        if actor.effect.is_transparent() {
            self.transparent.push(actor);
        } else {
            self.opaque.push(actor);
        }
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        if let Some(index) = self.opaque.iter().position(|a| a.id == id) {
            return Some(self.opaque.remove(index));
        }
        if let Some(index) = self.transparent.iter().position(|a| a.id == id) {
            return Some(self.transparent.remove(index));
        }
        None
    }

    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
    }

    pub fn find(&self, id: ActorId) -> Option<&Actor> {
        self.iter().find(|a| a.id == id)
    }

    pub fn find_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.opaque
            .iter_mut()
            .chain(self.transparent.iter_mut())
            .find(|a| a.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Actor> {
        self.iter().find(|a| a.name == name)
    }

    /// Opaque actors first, then transparent ones.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.opaque.iter().chain(self.transparent.iter())
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn opaque_len(&self) -> usize {
        self.opaque.len()
    }

    pub fn transparent_len(&self) -> usize {
        self.transparent.len()
    }

    //--- Queries ----------------------------------------------------------

    /// Ids of collidable actors overlapping `primitive`, in list order.
    pub fn overlapping(&self, primitive: &CollisionPrimitive, exclude: ActorId) -> Vec<ActorId> {
        self.iter()
            .filter(|a| a.id != exclude && a.status.update)
            .filter(|a| a.collision_primitive().is_some_and(|p| p.intersects(primitive)))
            .map(|a| a.id)
            .collect()
    }

    //--- Update -----------------------------------------------------------

    /// Runs actor controllers and requests removal of actors past the
    /// despawn depth.
    pub fn update(&mut self, events: &mut EventQueue) {
        let despawn_z = self.despawn_z;

        for actor in self.opaque.iter_mut().chain(self.transparent.iter_mut()) {
            if !actor.status.update {
                continue;
            }
            actor.update_controllers(events);

            if actor.transform.translation.z > despawn_z {
                events.publish(
                    EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor)
                        .with_sender(actor.id),
                );
            }
        }
    }

    //--- Events -----------------------------------------------------------

    pub fn handle_remove_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        if event.action() != EventAction::OnRemoveActor {
            return Ok(());
        }
        let id = event.require_sender()?;
        match self.remove(id) {
            Some(actor) => debug!(target: "game", "Removed actor {} '{}'", id, actor.name),
            // Already gone (e.g. despawned and collected in the same tick)
            None => trace!(target: "game", "Remove for unknown actor {}", id),
        }
        Ok(())
    }

    pub fn handle_opacity_event(&mut self, event: &EventData) -> Result<(), HandlerError> {
        let id = event.require_sender()?;
        let (from, to) = match event.action() {
            EventAction::OnOpaqueToTransparent => (&mut self.opaque, &mut self.transparent),
            EventAction::OnTransparentToOpaque => (&mut self.transparent, &mut self.opaque),
            _ => return Ok(()),
        };

        if let Some(index) = from.iter().position(|a| a.id == id) {
            to.push(from.remove(index));
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
