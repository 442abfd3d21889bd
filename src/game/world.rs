//=========================================================================
// World
//=========================================================================
//
// Everything the dispatcher's handlers mutate: managers, player, score.
//
// Per tick (after events are dispatched):
//
//   always   pause key, camera cycle, debug toggle, menu mouse
//   playing  physics → objects → player → cameras → score → spawn → lose
//   always   HUD
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData, EventQueue};
use crate::core::input::InputSystem;
use crate::core::math::{Color, Rect, Vec3};
use crate::game::actor::{Actor, ActorId, ActorKind, EffectParameters, StatusType, Transform3D};
use crate::game::collision::CollisionShape;
use crate::game::controller::{Controller, PickupParameters};
use crate::game::factory::PrimitiveFactory;
use crate::game::level::{LevelImage, LevelLoader, Placement};
use crate::game::managers::menu::{AUDIO_MENU, CONTROLS_MENU, LOSE_MENU, MAIN_MENU};
use crate::game::managers::{
    Camera3D, CameraController, CameraManager, GameStateManager, MenuManager, ObjectManager,
    PhysicsManager, ProgressBar, ProjectionParameters, RigidBody, ScreenManager, SoundManager,
    UiKind, UiManager, UiObject,
};
use crate::game::player::Player;
use crate::game::primitives::ShapeType;
use crate::game::settings::GameSettings;

const SCORE_TEXT_ID: &str = "score";
const HIGH_SCORE_TEXT_ID: &str = "highscore";

//=== ScoreBoard ==========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub high_score: u32,
    pub losses: u32,
}

impl ScoreBoard {
    /// Ends a run: keeps the best score and clears the current one.
    fn record_loss(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.losses += 1;
        self.score = 0;
    }
}

//=== World ===============================================================

pub struct World {
    pub settings: GameSettings,
    pub objects: ObjectManager,
    pub physics: PhysicsManager,
    pub cameras: CameraManager,
    pub screen: ScreenManager,
    pub menu: MenuManager,
    pub ui: UiManager,
    pub sound: SoundManager,
    pub game_state: GameStateManager,
    pub player: Player,
    factory: PrimitiveFactory,
    rng: fastrand::Rng,
    scores: ScoreBoard,
    play_ticks: u64,
    spawned: u64,
    debug: bool,
    exit_requested: bool,
}

impl World {
    /// Builds the main level. Obstacle placement is reproducible per `seed`.
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        let mut factory = PrimitiveFactory::new();
        let mut objects = ObjectManager::new(settings.despawn_z);

        build_scenery(&settings, &mut factory, &mut objects);
        let player = build_player(&settings, &mut factory, &mut objects);
        let cameras = build_cameras(&settings, player.id());

        let mut world = Self {
            physics: PhysicsManager::default(),
            screen: ScreenManager::new(settings.resolution, settings.keys.pause),
            menu: build_menus(&settings),
            ui: build_hud(&settings),
            sound: SoundManager::default(),
            game_state: GameStateManager::new(),
            objects,
            cameras,
            player,
            factory,
            rng: fastrand::Rng::with_seed(seed),
            scores: ScoreBoard::default(),
            play_ticks: 0,
            spawned: 0,
            debug: false,
            exit_requested: false,
            settings,
        };
        world.refresh_high_score_text();

        info!(
            target: "game",
            "Level ready: {} objects, {} cameras, seed {}",
            world.objects.len(),
            world.cameras.len(),
            seed
        );
        world
    }

    //--- Query API --------------------------------------------------------

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    pub fn is_playing(&self) -> bool {
        self.screen.is_playing()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
        info!(target: "game", "Debug overlay {}", if self.debug { "on" } else { "off" });
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        info!(target: "game", "Exit requested");
        self.exit_requested = true;
    }

    pub fn factory(&self) -> &PrimitiveFactory {
        &self.factory
    }

    /// World position of `id`, the player included.
    pub fn locate(&self, id: ActorId) -> Option<Vec3> {
        if id == self.player.id() {
            return Some(self.player.position());
        }
        self.objects.find(id).map(|a| a.transform.translation)
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, input: &InputSystem, elapsed: Duration, events: &mut EventQueue) {
        self.screen.handle_input(input, events);

        if input.is_key_pressed(self.settings.keys.camera_cycle) {
            events.publish(EventData::new(EventCategory::Camera, EventAction::OnCameraCycle));
        }
        if input.is_key_pressed(self.settings.keys.debug_toggle) {
            events.publish(EventData::new(EventCategory::Debug, EventAction::OnToggleDebug));
        }

        self.menu.update(input, events);

        if self.screen.is_playing() {
            self.physics.integrate(elapsed, &mut self.objects);
            self.objects.update(events);
            self.player.update(input, elapsed, &mut self.objects, events);

            let (player, objects) = (&self.player, &self.objects);
            self.cameras.update(|id| {
                if id == player.id() {
                    Some(player.position())
                } else {
                    objects.find(id).map(|a| a.transform.translation)
                }
            });

            self.scores.score += 1;
            self.play_ticks += 1;
            if self.settings.spawn_interval_ticks > 0
                && self.play_ticks % self.settings.spawn_interval_ticks == 0
            {
                self.spawn();
            }

            if self.player.has_collided() && !self.player.is_power_active() {
                self.lose(events);
            }
        }

        self.ui.update(self.scores.score);
    }

    //--- Spawning ---------------------------------------------------------

    fn random_in(&mut self, (min, max): (f64, f64)) -> f32 {
        let value = min + self.rng.f64() * (max - min);
        ((value * 100.0).round() / 100.0) as f32
    }

    /// Spawns the next obstacle (or pickup) at the far end of the road.
    pub fn spawn(&mut self) -> ActorId {
        self.spawned += 1;
        let s = &self.settings;
        let pickup_round = s.pickup_every > 0 && self.spawned % s.pickup_every == 0;
        let (spawn_z, height, speed) = (s.spawn_z, s.obstacle_height, s.obstacle_speed);
        let (x_range, width_range) = (s.spawn_x_range, s.obstacle_width_range);

        let x = self.random_in(x_range);
        let id = self.objects.allocate_id();
        let archetype = self
            .factory
            .archetype(ShapeType::TexturedCube, &EffectParameters::textured("crate"));

        let actor = if pickup_round {
            let (kind, color) = match (self.spawned / self.settings.pickup_every) % 3 {
                0 => (ActorKind::CollidableAmmo, Color::ORANGE),
                1 => (ActorKind::CollidableActivatable, Color::GREEN),
                _ => (ActorKind::CollidableDecorator, Color::BLUE),
            };
            let mut actor = Actor::from_archetype(id, format!("pickup {}", self.spawned), kind, &archetype)
                .with_effect(EffectParameters::colored(color))
                .with_collision(CollisionShape::Box);
            if kind == ActorKind::CollidableActivatable {
                actor = actor.with_controller(Controller::pickup_disappear(
                    "pickup disappear",
                    PickupParameters::default(),
                ));
            }
            actor.transform = Transform3D::new(Vec3::new(x, 1.0, spawn_z), Vec3::ONE);
            actor
        } else {
            let width = self.random_in(width_range);
            let mut actor = Actor::from_archetype(
                id,
                format!("obstacle {}", self.spawned),
                ActorKind::CollidableArchitecture,
                &archetype,
            )
            .with_collision(CollisionShape::Box);
            actor.transform = Transform3D::new(
                Vec3::new(x, height / 2.0, spawn_z),
                Vec3::new(width, height, 1.0),
            );
            actor
        };

        debug!(target: "game", "Spawned '{}' at {}", actor.name, actor.transform.translation);
        self.objects.add(actor);
        self.physics.add_body(id, RigidBody { velocity: Vec3::UNIT_Z * speed });
        id
    }

    //--- Run Lifecycle ----------------------------------------------------

    fn lose(&mut self, events: &mut EventQueue) {
        let score = self.scores.score;
        self.scores.record_loss();
        info!(
            target: "game",
            "Hit an obstacle: score {}, best {}",
            score,
            self.scores.high_score
        );

        self.refresh_high_score_text();
        self.menu.set_active_list(LOSE_MENU);
        events.publish(
            EventData::new(EventCategory::Player, EventAction::OnLose).with_sender(self.player.id()),
        );
        self.reset_level();
    }

    /// Clears spawned objects and puts the player back at the start.
    pub fn reset_level(&mut self) {
        let spawned: Vec<ActorId> = self.physics.body_ids().collect();
        for id in &spawned {
            self.objects.remove(*id);
        }
        self.physics.clear();

        self.player.reset();
        self.cameras.set_active(&self.settings.static_camera_id);
        self.ui.reset_progress(self.settings.max_health);
        self.scores.score = 0;
        self.play_ticks = 0;

        debug!(target: "game", "Level reset, {} spawned objects cleared", spawned.len());
    }

    fn refresh_high_score_text(&mut self) {
        let text = format!("Highscore: {}", self.scores.high_score);
        if let Some(object) = self.menu.find_mut(MAIN_MENU, |o| o.id == HIGH_SCORE_TEXT_ID) {
            object.text = text;
        }
    }
}

//=========================================================================
// Level Construction
//=========================================================================

fn build_scenery(settings: &GameSettings, factory: &mut PrimitiveFactory, objects: &mut ObjectManager) {
    //--- Ground -----------------------------------------------------------
    let road = factory.archetype(ShapeType::NormalCube, &EffectParameters::textured("road"));
    let mut ground = Actor::from_archetype(objects.allocate_id(), "ground", ActorKind::Decorator, &road);
    ground.transform = Transform3D::new(
        Vec3::ZERO,
        Vec3::new(settings.ground_size.0, 1.0, settings.ground_size.1),
    );
    objects.add(ground);

    //--- Roadside ---------------------------------------------------------
    let tree_archetype = factory.archetype(ShapeType::Billboard, &EffectParameters::textured("tree"));
    let lamp_archetype = factory.archetype(ShapeType::TexturedCube, &EffectParameters::textured("crate"));

    let mut loader = LevelLoader::new();
    loader.add_prototype(
        Color::GREEN,
        Actor::from_archetype(ActorId(0), "tree", ActorKind::Decorator, &tree_archetype),
    );
    loader.add_prototype(
        Color::ORANGE,
        Actor::from_archetype(ActorId(0), "lamp", ActorKind::Decorator, &lamp_archetype)
            .with_effect(EffectParameters::colored(Color::ORANGE)),
    );

    // Two columns (left and right verge), one row every 10 units
    let rows = (settings.ground_size.1 / 10.0) as usize;
    let image = LevelImage::from_fn(2, rows, Color::BLACK, |_, z| match z % 3 {
        0 => Some(Color::GREEN),
        1 => Some(Color::ORANGE),
        _ => None,
    });
    let half_ground = settings.ground_size.0 / 2.0;
    let placement = Placement {
        scale: (settings.ground_size.0 + 10.0, 10.0),
        height: 2.0,
        offset: Vec3::new(-(half_ground + 5.0), 0.0, -settings.ground_size.1 / 2.0),
    };
    for actor in loader.process(&image, placement, || objects.allocate_id()) {
        objects.add(actor);
    }

    //--- Switch Zone ------------------------------------------------------
    let mut zone = Actor::new(
        objects.allocate_id(),
        settings.switch_zone_id.as_str(),
        ActorKind::Zone,
        Transform3D::new(settings.player_start, Vec3::ONE),
    )
    .with_collision(CollisionShape::Sphere { radius: settings.zone_radius });
    zone.status = StatusType::UPDATE;
    objects.add(zone);
}

fn build_player(settings: &GameSettings, factory: &mut PrimitiveFactory, objects: &mut ObjectManager) -> Player {
    let archetype = factory.archetype(ShapeType::TexturedCube, &EffectParameters::textured("crate"));
    let mut actor = Actor::from_archetype(objects.allocate_id(), "player", ActorKind::Player, &archetype)
        .with_effect(EffectParameters::colored(Color::RED));
    actor.transform = Transform3D::new(settings.player_start, Vec3::ONE * settings.player_scale);
    Player::new(actor, CollisionShape::Box, settings)
}

fn build_cameras(settings: &GameSettings, player: ActorId) -> CameraManager {
    let projection = ProjectionParameters::standard(settings.aspect_ratio());
    let viewport = Rect::new(0.0, 0.0, settings.resolution.0 as f32, settings.resolution.1 as f32);
    let start = settings.player_start;

    let mut cameras = CameraManager::new();
    cameras.add(Camera3D::new(
        settings.static_camera_id.as_str(),
        Transform3D::new(start + Vec3::new(0.0, 12.0, 30.0), Vec3::ONE),
        projection,
        viewport,
    ));
    cameras.add(
        Camera3D::new(
            settings.third_person_camera_id.as_str(),
            Transform3D::new(start, Vec3::ONE),
            projection,
            viewport,
        )
        .with_controller(CameraController::ThirdPerson {
            target: player,
            distance: settings.third_person_distance,
            elevation_degrees: settings.third_person_elevation_degrees,
            lerp: 0.1,
        }),
    );
    cameras
}

/// Buttons stacked down the middle of the screen.
fn button_column(resolution: (u32, u32), buttons: &[(&str, &str)]) -> Vec<UiObject> {
    let centre_x = resolution.0 as f32 / 2.0;
    buttons
        .iter()
        .enumerate()
        .map(|(row, (id, label))| {
            let centre_y = resolution.1 as f32 * 0.35 + row as f32 * 90.0;
            UiObject::button(*id, *label, Rect::centered(centre_x, centre_y, 300.0, 60.0))
        })
        .collect()
}

fn build_menus(settings: &GameSettings) -> MenuManager {
    let (w, h) = (settings.resolution.0 as f32, settings.resolution.1 as f32);
    let background = |id: &str| {
        UiObject::new(id, UiKind::StaticTexture, Rect::new(0.0, 0.0, w, h)).with_depth(1.0)
    };

    let scenes: [(&str, Vec<(&str, &str)>); 4] = [
        (
            MAIN_MENU,
            vec![
                ("startbtn", "Start"),
                ("audiobtn", "Audio"),
                ("controlsbtn", "Controls"),
                ("exitbtn", "Exit"),
            ],
        ),
        (
            AUDIO_MENU,
            vec![
                ("volumeUpbtn", "Volume Up"),
                ("volumeDownbtn", "Volume Down"),
                ("volumeMutebtn", "Mute"),
                ("volumeUnMutebtn", "Unmute"),
                ("backbtn", "Back"),
            ],
        ),
        (CONTROLS_MENU, vec![("backbtn", "Back")]),
        (LOSE_MENU, vec![("restartbtn", "Restart"), ("backbtn", "Back")]),
    ];

    let mut menu = MenuManager::new();
    for (scene, buttons) in &scenes {
        menu.add(scene, background(format!("{}Texture", scene.replace(' ', "")).as_str()));
        for button in button_column(settings.resolution, buttons) {
            menu.add(scene, button);
        }
    }
    menu.add(
        MAIN_MENU,
        UiObject::new(HIGH_SCORE_TEXT_ID, UiKind::DynamicText, Rect::new(20.0, 20.0, 300.0, 40.0))
            .with_color(Color::GREEN),
    );
    menu
}

fn build_hud(settings: &GameSettings) -> UiManager {
    let mut ui = UiManager::new(SCORE_TEXT_ID);
    ui.add(
        UiObject::new(SCORE_TEXT_ID, UiKind::DynamicText, Rect::new(20.0, 20.0, 200.0, 40.0))
            .with_text("Score:")
            .with_color(Color::RED),
    );
    ui.add(UiObject::new(
        settings.health_bar_id.as_str(),
        UiKind::ProgressBar(ProgressBar::new(settings.max_health, settings.max_health)),
        Rect::new(20.0, 70.0, 200.0, 20.0),
    ));
    ui
}

//=========================================================================
// Unit Tests
//=========================================================================
