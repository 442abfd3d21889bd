//=========================================================================
// Game
//=========================================================================
//
// Owns the event dispatcher and the world it drives.
//
// Tick order:
//
//   input.process_frame ─► dispatcher.tick(world) ─► world.update
//
// Events published during `world.update` (or by handlers) are delivered
// at the start of the next tick.
//
// Subscriptions (registration order is delivery order):
//
//   Camera        cameras
//   MainMenu      screen, physics, menu, ui, exit
//   SystemRemove  objects, physics
//   Opacity       objects
//   Player        game state, ui
//   Sound         sound
//   Debug         debug toggle
//
// Screen events have no subscriber and are dropped as unrouted.
//
//=========================================================================

pub mod actor;
pub mod collision;
pub mod controller;
pub mod factory;
pub mod level;
pub mod managers;
pub mod player;
pub mod primitives;
pub mod settings;
pub mod world;

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::events::{
    EventAction, EventCategory, EventData, EventDispatcher, EventQueue, TickReport,
};
use crate::core::input::{InputEvent, InputSystem};

pub use settings::{GameSettings, PlayerKeys};
pub use world::{ScoreBoard, World};

//=== SessionSummary ======================================================

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    /// Score of the run in progress (0 right after a loss).
    pub score: u32,
    pub high_score: u32,
    pub losses: u32,
}

//=== Game ================================================================

pub struct Game {
    dispatcher: EventDispatcher<World>,
    world: World,
    input: InputSystem,
}

impl Game {
    /// Builds the main level, registers every subscription and queues
    /// `MainMenu/OnPause` so the first tick shows the main menu.
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        let mut dispatcher = EventDispatcher::new();
        register_subscriptions(&mut dispatcher);
        dispatcher.publish(EventData::new(EventCategory::MainMenu, EventAction::OnPause));

        Self {
            dispatcher,
            world: World::new(settings, seed),
            input: InputSystem::new(),
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    pub fn dispatcher(&self) -> &EventDispatcher<World> {
        &self.dispatcher
    }

    /// Events waiting for the next tick.
    pub fn pending_events(&self) -> &EventQueue {
        self.dispatcher.queue()
    }

    pub fn is_playing(&self) -> bool {
        self.world.is_playing()
    }

    pub fn scores(&self) -> ScoreBoard {
        self.world.scores()
    }

    pub fn exit_requested(&self) -> bool {
        self.world.exit_requested()
    }

    pub fn summary(&self) -> SessionSummary {
        let scores = self.scores();
        SessionSummary {
            ticks: self.dispatcher.ticks(),
            score: scores.score,
            high_score: scores.high_score.max(scores.score),
            losses: scores.losses,
        }
    }

    //--- Window -----------------------------------------------------------

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.world.screen.set_resolution(width, height) {
            let aspect = self.world.screen.aspect_ratio();
            self.world.cameras.set_aspect_ratio(aspect);
        }
    }

    /// Pauses a running game when the window loses focus.
    pub fn focus_lost(&mut self) {
        if self.is_playing() {
            debug!(target: "game", "Focus lost, pausing");
            self.publish(EventData::new(EventCategory::MainMenu, EventAction::OnPause));
        }
    }

    //--- Events -----------------------------------------------------------

    /// Queues `event` for the next tick. See [`EventQueue::publish`].
    pub fn publish(&mut self, event: EventData) -> bool {
        self.dispatcher.publish(event)
    }

    //--- Tick -------------------------------------------------------------

    pub fn tick(&mut self, elapsed: Duration, batches: &[Vec<InputEvent>]) -> TickReport {
        self.input.process_frame(batches);

        let report = self.dispatcher.tick(&mut self.world);
        if report.failures > 0 {
            warn!(target: "game", "{} handler failure(s) this tick", report.failures);
        }

        self.world
            .update(&self.input, elapsed, self.dispatcher.queue_mut());
        report
    }
}

//=== Subscriptions =======================================================

fn register_subscriptions(dispatcher: &mut EventDispatcher<World>) {
    dispatcher.subscribe(EventCategory::Camera, |world, event, _| {
        world.cameras.handle_event(event)
    });

    //--- Main menu ----------------------------------------------------------
    dispatcher.subscribe(EventCategory::MainMenu, |world, event, _| {
        world.screen.handle_menu_event(event)
    });
    dispatcher.subscribe(EventCategory::MainMenu, |world, event, _| {
        world.physics.handle_menu_event(event)
    });
    dispatcher.subscribe(EventCategory::MainMenu, |world, event, _| {
        world.menu.handle_menu_event(event)
    });
    dispatcher.subscribe(EventCategory::MainMenu, |world, event, _| {
        world.ui.handle_menu_event(event)
    });
    dispatcher.subscribe(EventCategory::MainMenu, |world, event, _| {
        if event.action() == EventAction::OnExit {
            world.request_exit();
        }
        Ok(())
    });

    //--- Object lifecycle ---------------------------------------------------
    dispatcher.subscribe(EventCategory::SystemRemove, |world, event, _| {
        world.objects.handle_remove_event(event)
    });
    dispatcher.subscribe(EventCategory::SystemRemove, |world, event, _| {
        world.physics.handle_remove_event(event)
    });
    dispatcher.subscribe(EventCategory::Opacity, |world, event, _| {
        world.objects.handle_opacity_event(event)
    });

    //--- Player -------------------------------------------------------------
    dispatcher.subscribe(EventCategory::Player, |world, event, events| {
        world.game_state.handle_player_event(event, events)
    });
    dispatcher.subscribe(EventCategory::Player, |world, event, _| {
        world.ui.handle_player_event(event)
    });

    dispatcher.subscribe(EventCategory::Sound, |world, event, _| {
        world.sound.handle_event(event)
    });
    dispatcher.subscribe(EventCategory::Debug, |world, event, _| {
        if event.action() == EventAction::OnToggleDebug {
            world.toggle_debug();
        }
        Ok(())
    });

    debug!(target: "game", "Event subscriptions registered");
}

//=========================================================================
// Unit Tests
//=========================================================================
