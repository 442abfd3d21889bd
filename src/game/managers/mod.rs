//=========================================================================
// Game Managers
//=========================================================================
//
// One manager per concern. Each exposes `handle_*` methods that the game
// subscribes to the dispatcher; none of them holds a reference to another.
//
//=========================================================================

pub mod camera;
pub mod game_state;
pub mod menu;
pub mod object;
pub mod physics;
pub mod screen;
pub mod sound;
pub mod ui;

pub use camera::{Camera3D, CameraController, CameraManager, ProjectionParameters, SortDirection};
pub use game_state::GameStateManager;
pub use menu::MenuManager;
pub use object::ObjectManager;
pub use physics::{PhysicsManager, RigidBody, SolverSettings};
pub use screen::{ScreenManager, ScreenType};
pub use sound::SoundManager;
pub use ui::{ProgressBar, UiKind, UiManager, UiObject};
