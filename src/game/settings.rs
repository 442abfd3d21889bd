//=========================================================================
// Game Settings
//=========================================================================
//
// Tuning values and key bindings for a game session. `Default` carries
// the shipped values; tests and the CLI override individual fields.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::math::Vec3;

//=== PlayerKeys ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerKeys {
    pub left: KeyCode,
    pub right: KeyCode,
    /// Toggles power (immune to architecture).
    pub power: KeyCode,
    /// Shows/hides the main menu.
    pub pause: KeyCode,
    pub camera_cycle: KeyCode,
    pub debug_toggle: KeyCode,
}

impl Default for PlayerKeys {
    fn default() -> Self {
        Self {
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            power: KeyCode::Space,
            pause: KeyCode::Escape,
            camera_cycle: KeyCode::F1,
            debug_toggle: KeyCode::F7,
        }
    }
}

//=== GameSettings ========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    //--- Window ------------------------------------------------------------
    pub window_title: String,
    pub resolution: (u32, u32),

    //--- Player ------------------------------------------------------------
    pub keys: PlayerKeys,
    pub player_start: Vec3,
    pub player_scale: f32,
    /// Lateral speed in world units per second.
    pub player_move_speed: f32,
    /// |x| at which the player is pushed back into the lane.
    pub lane_half_width: f32,
    pub lane_push_back: f32,

    //--- Level -------------------------------------------------------------
    pub ground_size: (f32, f32),
    pub zone_radius: f32,

    //--- Obstacles ---------------------------------------------------------
    /// Ticks between spawns while playing.
    pub spawn_interval_ticks: u64,
    /// Every n-th spawn is a pickup instead of a wall (0 disables pickups).
    pub pickup_every: u64,
    pub spawn_z: f32,
    pub spawn_x_range: (f64, f64),
    pub obstacle_width_range: (f64, f64),
    pub obstacle_height: f32,
    /// Forward speed of spawned objects (units per second, towards +Z).
    pub obstacle_speed: f32,
    /// Objects past this depth are removed.
    pub despawn_z: f32,

    //--- Cameras -----------------------------------------------------------
    pub static_camera_id: String,
    pub third_person_camera_id: String,
    pub switch_zone_id: String,
    pub third_person_distance: f32,
    pub third_person_elevation_degrees: f32,

    //--- HUD ---------------------------------------------------------------
    pub health_bar_id: String,
    pub max_health: i32,
}

impl GameSettings {
    pub fn aspect_ratio(&self) -> f32 {
        self.resolution.0 as f32 / self.resolution.1.max(1) as f32
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_title: "Horizon: Infinity".to_string(),
            resolution: (1280, 720),

            keys: PlayerKeys::default(),
            player_start: Vec3::new(0.0, 1.0, 145.0),
            player_scale: 2.0,
            player_move_speed: 10.0,
            lane_half_width: 8.925,
            lane_push_back: 0.25,

            ground_size: (20.0, 300.0),
            zone_radius: 4.0,

            spawn_interval_ticks: 18,
            pickup_every: 5,
            spawn_z: -100.0,
            spawn_x_range: (-9.0, 9.0),
            obstacle_width_range: (1.0, 8.0),
            obstacle_height: 3.0,
            obstacle_speed: 40.0,
            despawn_z: 160.0,

            static_camera_id: "static camera".to_string(),
            third_person_camera_id: "third person camera".to_string(),
            switch_zone_id: "switch to third person zone".to_string(),
            third_person_distance: 16.0,
            third_person_elevation_degrees: 25.0,

            health_bar_id: "health bar".to_string(),
            max_health: 10,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
