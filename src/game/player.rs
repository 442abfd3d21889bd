//=========================================================================
// Player
//=========================================================================
//
// The runner. Each tick:
//
//   1. read input into a translate increment (or toggle power)
//   2. find overlapping collidables at the projected position
//   3. respond to the first solid one (may block movement)
//   4. push back into the lane at the edges
//   5. move unless blocked, then clear increments
//
// Responses by kind of collidee:
//
//   Zone (switch zone)      → Camera/OnCameraSetActive once per entry, keep looking
//   CollidableDecorator     → tint yellow, blocked
//   CollidableAmmo          → SystemRemove/OnRemoveActor + health, blocked
//   CollidableActivatable   → play pickup-disappear controllers, blocked
//   CollidableArchitecture  → collided until reset, blocked
//   everything else         → pass, stop
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData, EventQueue};
use crate::core::input::InputSystem;
use crate::core::math::{Color, Vec3};
use crate::game::actor::{Actor, ActorId, ActorKind, Transform3D};
use crate::game::collision::{CollisionPrimitive, CollisionShape};
use crate::game::controller::{ControllerType, PlayStatus};
use crate::game::managers::ObjectManager;
use crate::game::settings::{GameSettings, PlayerKeys};

//=== Player ==============================================================

#[derive(Debug)]
pub struct Player {
    actor: Actor,
    shape: CollisionShape,
    start: Vec3,
    keys: PlayerKeys,
    move_speed: f32,
    lane_half_width: f32,
    push_back: f32,
    switch_zone_id: String,
    third_person_camera_id: String,
    health_bar_id: String,
    power_active: bool,
    has_collided: bool,
    zone_event_sent: bool,
}

impl Player {
    pub fn new(actor: Actor, shape: CollisionShape, settings: &GameSettings) -> Self {
        Self {
            start: actor.transform.translation,
            actor: actor.with_collision(shape),
            shape,
            keys: settings.keys,
            move_speed: settings.player_move_speed,
            lane_half_width: settings.lane_half_width,
            push_back: settings.lane_push_back,
            switch_zone_id: settings.switch_zone_id.clone(),
            third_person_camera_id: settings.third_person_camera_id.clone(),
            health_bar_id: settings.health_bar_id.clone(),
            power_active: false,
            has_collided: false,
            zone_event_sent: false,
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn id(&self) -> ActorId {
        self.actor.id
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn position(&self) -> Vec3 {
        self.actor.transform.translation
    }

    /// `true` once architecture has been hit; only `reset` clears it.
    pub fn has_collided(&self) -> bool {
        self.has_collided
    }

    pub fn is_power_active(&self) -> bool {
        self.power_active
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.actor.transform.translation = position;
    }

    /// Back to the start position with power and collision state cleared.
    pub fn reset(&mut self) {
        self.actor.transform.translation = self.start;
        self.actor.transform.reset_increments();
        self.power_active = false;
        self.has_collided = false;
        self.zone_event_sent = false;
    }

    //--- Update -----------------------------------------------------------

    pub fn update(
        &mut self,
        input: &InputSystem,
        elapsed: Duration,
        objects: &mut ObjectManager,
        events: &mut EventQueue,
    ) {
        self.handle_input(input, elapsed);

        let mut blocked = false;
        for collidee in self.check_collisions(objects) {
            if let Some(result) = self.handle_collision_response(collidee, objects, events) {
                blocked = result;
                break;
            }
        }

        self.clamp_to_lane();

        if !blocked {
            self.actor.transform.apply_increment();
        }
        self.actor.transform.reset_increments();
    }

    fn handle_input(&mut self, input: &InputSystem, elapsed: Duration) {
        let step = self.move_speed * elapsed.as_secs_f32();

        if input.is_key_down(self.keys.left) {
            self.actor.transform.translate_increment = -Vec3::UNIT_X * step;
        } else if input.is_key_down(self.keys.right) {
            self.actor.transform.translate_increment = Vec3::UNIT_X * step;
        } else if input.is_key_pressed(self.keys.power) {
            self.power_active = !self.power_active;
            info!(target: "game::player", "Power {}", if self.power_active { "on" } else { "off" });
        }
    }

    /// Collidables overlapping the projected position, in object order.
    /// Also re-arms the zone trigger once the player has left the switch zone.
    fn check_collisions(&mut self, objects: &ObjectManager) -> Vec<ActorId> {
        let mut projected: Transform3D = self.actor.transform;
        projected.apply_increment();
        let primitive = CollisionPrimitive::from_transform(self.shape, &projected);

        let overlaps = objects.overlapping(&primitive, self.actor.id);

        let in_zone = overlaps.iter().any(|id| {
            objects
                .find(*id)
                .is_some_and(|a| a.kind == ActorKind::Zone && a.name == self.switch_zone_id)
        });
        if !in_zone {
            self.zone_event_sent = false;
        }

        overlaps
    }

    /// `Some(blocked)` for a solid collidee, `None` for a zone (zones are
    /// sensors and the next overlap is considered).
    fn handle_collision_response(
        &mut self,
        collidee: ActorId,
        objects: &mut ObjectManager,
        events: &mut EventQueue,
    ) -> Option<bool> {
        let actor = objects.find_mut(collidee)?;

        match actor.kind {
            ActorKind::Zone => {
                if actor.name == self.switch_zone_id && !self.zone_event_sent {
                    debug!(target: "game::player", "Entered '{}'", actor.name);
                    events.publish(
                        EventData::new(EventCategory::Camera, EventAction::OnCameraSetActive)
                            .with_sender(self.actor.id)
                            .with_parameter(self.third_person_camera_id.as_str()),
                    );
                    self.zone_event_sent = true;
                }
                None
            }
            ActorKind::CollidableDecorator => {
                actor.effect.diffuse_color = Color::YELLOW;
                Some(true)
            }
            ActorKind::CollidableAmmo => {
                events.publish(
                    EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor)
                        .with_sender(collidee),
                );
                events.publish(
                    EventData::new(EventCategory::Player, EventAction::OnHealthChange)
                        .with_sender(self.actor.id)
                        .with_parameter(self.health_bar_id.as_str())
                        .with_parameter(1),
                );
                Some(true)
            }
            ActorKind::CollidableActivatable => {
                actor.set_controllers(ControllerType::PickupDisappear, PlayStatus::Play);
                Some(true)
            }
            ActorKind::CollidableArchitecture => {
                self.has_collided = true;
                Some(true)
            }
            ActorKind::Decorator | ActorKind::Player | ActorKind::NotYetAssigned => Some(false),
        }
    }

    fn clamp_to_lane(&mut self) {
        let x = self.actor.transform.translation.x;
        if x <= -self.lane_half_width {
            self.actor.transform.translate_increment = Vec3::UNIT_X * self.push_back;
        } else if x >= self.lane_half_width {
            self.actor.transform.translate_increment = -Vec3::UNIT_X * self.push_back;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode};
    use crate::game::controller::{Controller, PickupParameters};

    const TICK: Duration = Duration::from_millis(100);

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    fn player(objects: &mut ObjectManager, at: Vec3) -> Player {
        let id = objects.allocate_id();
        let actor = Actor::new(id, "player", ActorKind::Player, Transform3D::new(at, Vec3::ONE));
        Player::new(actor, CollisionShape::Box, &settings())
    }

    fn place(objects: &mut ObjectManager, name: &str, kind: ActorKind, at: Vec3) -> ActorId {
        let id = objects.allocate_id();
        let shape = if kind == ActorKind::Zone {
            CollisionShape::Sphere { radius: 1.0 }
        } else {
            CollisionShape::Box
        };
        objects.add(
            Actor::new(id, name, kind, Transform3D::new(at, Vec3::ONE)).with_collision(shape),
        );
        id
    }

    fn holding(key: KeyCode) -> InputSystem {
        let mut input = InputSystem::new();
        input.process_frame(&[vec![InputEvent::key_down(key)]]);
        input
    }

    fn idle() -> InputSystem {
        InputSystem::new()
    }

    //=====================================================================
    // Input
    //=====================================================================

    #[test]
    fn arrows_move_along_x() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        let mut events = EventQueue::new();

        player.update(&holding(KeyCode::ArrowRight), TICK, &mut objects, &mut events);
        assert!((player.position().x - 1.0).abs() < 1e-5);

        player.update(&holding(KeyCode::ArrowLeft), TICK, &mut objects, &mut events);
        assert!(player.position().x.abs() < 1e-5);
    }

    #[test]
    fn power_toggles_on_first_press_only() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        let mut events = EventQueue::new();

        let mut input = holding(KeyCode::Space);
        player.update(&input, TICK, &mut objects, &mut events);
        assert!(player.is_power_active());

        // Still held: no new press
        input.process_frame(&[]);
        player.update(&input, TICK, &mut objects, &mut events);
        assert!(player.is_power_active());
    }

    #[test]
    fn lane_edges_push_back() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::new(9.0, 0.0, 0.0));
        let mut events = EventQueue::new();

        player.update(&holding(KeyCode::ArrowRight), TICK, &mut objects, &mut events);
        assert!((player.position().x - 8.75).abs() < 1e-5);

        player.set_position(Vec3::new(-9.0, 0.0, 0.0));
        player.update(&idle(), TICK, &mut objects, &mut events);
        assert!((player.position().x + 8.75).abs() < 1e-5);
    }

    //=====================================================================
    // Collision Response
    //=====================================================================

    #[test]
    fn architecture_blocks_and_flags_collision() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        place(&mut objects, "wall", ActorKind::CollidableArchitecture, Vec3::new(1.0, 0.0, 0.0));
        let mut events = EventQueue::new();

        // Touching edges do not overlap; the projected step does
        player.update(&holding(KeyCode::ArrowRight), TICK, &mut objects, &mut events);

        assert!(player.has_collided());
        assert_eq!(player.position(), Vec3::ZERO);
    }

    #[test]
    fn collision_flag_persists_until_reset() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        let wall = place(&mut objects, "wall", ActorKind::CollidableArchitecture, Vec3::ZERO);
        let mut events = EventQueue::new();

        player.update(&idle(), TICK, &mut objects, &mut events);
        assert!(player.has_collided());

        objects.remove(wall);
        player.update(&idle(), TICK, &mut objects, &mut events);
        assert!(player.has_collided());

        player.reset();
        assert!(!player.has_collided());
    }

    #[test]
    fn decorator_turns_yellow() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        let post = place(&mut objects, "post", ActorKind::CollidableDecorator, Vec3::ZERO);

        player.update(&idle(), TICK, &mut objects, &mut EventQueue::new());

        assert_eq!(objects.find(post).map(|a| a.effect.diffuse_color), Some(Color::YELLOW));
    }

    #[test]
    fn ammo_requests_removal_and_health() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        let ammo = place(&mut objects, "ammo", ActorKind::CollidableAmmo, Vec3::ZERO);
        let mut events = EventQueue::new();

        player.update(&idle(), TICK, &mut objects, &mut events);

        let removal = EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor)
            .with_sender(ammo);
        assert!(events.contains(&removal));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn activatable_starts_its_controllers() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        let id = objects.allocate_id();
        objects.add(
            Actor::new(id, "gem", ActorKind::CollidableActivatable, Transform3D::default())
                .with_collision(CollisionShape::Box)
                .with_controller(Controller::pickup_disappear("fade", PickupParameters::default())),
        );

        player.update(&idle(), TICK, &mut objects, &mut EventQueue::new());

        let status = objects
            .find(id)
            .and_then(|a| a.controllers().first())
            .map(Controller::play_status);
        assert_eq!(status, Some(PlayStatus::Play));
    }

    #[test]
    fn switch_zone_fires_once_per_entry_without_blocking() {
        let s = settings();
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        place(&mut objects, &s.switch_zone_id, ActorKind::Zone, Vec3::ZERO);
        let mut events = EventQueue::new();

        player.update(&holding(KeyCode::ArrowRight), TICK, &mut objects, &mut events);
        assert_eq!(events.len(), 1);
        assert!(player.position().x > 0.0, "zones never block");

        events.begin_tick();
        player.update(&idle(), TICK, &mut objects, &mut events);
        assert!(events.is_empty(), "guard holds while inside");

        // Leave, then re-enter
        player.set_position(Vec3::new(5.0, 0.0, 0.0));
        player.update(&idle(), TICK, &mut objects, &mut events);
        player.set_position(Vec3::ZERO);
        player.update(&idle(), TICK, &mut objects, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn zone_does_not_shadow_architecture() {
        let s = settings();
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::ZERO);
        place(&mut objects, &s.switch_zone_id, ActorKind::Zone, Vec3::ZERO);
        place(&mut objects, "wall", ActorKind::CollidableArchitecture, Vec3::ZERO);

        player.update(&idle(), TICK, &mut objects, &mut EventQueue::new());

        assert!(player.has_collided());
    }

    #[test]
    fn reset_restores_start() {
        let mut objects = ObjectManager::new(1000.0);
        let mut player = player(&mut objects, Vec3::new(0.0, 1.0, 145.0));
        player.set_position(Vec3::new(3.0, 1.0, 145.0));

        player.reset();

        assert_eq!(player.position(), Vec3::new(0.0, 1.0, 145.0));
        assert!(!player.is_power_active());
    }
}
