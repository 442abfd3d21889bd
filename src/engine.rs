//=========================================================================
// Engine
//=========================================================================
//
// Entry point: configures a game session and runs it either in a window
// or headless.
//
// ```text
//   EngineBuilder ──build()──► Engine ──init(|game| ..)──► Engine
//     ├─ with_tps()                │
//     ├─ with_channel_capacity()   ├─ run()       window + core thread
//     ├─ with_settings()           └─ simulate()  fixed steps, no window
//     └─ with_seed()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::events::{EventAction, EventCategory, EventData};
use crate::core::platform_bridge::PlatformError;
use crate::core::CoreSystemsOrchestrator;
use crate::game::{Game, GameSettings, SessionSummary};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Defaults: 60 TPS, 128-event channel, shipped [`GameSettings`], seed 0.
///
/// ```no_run
/// use horizon_infinity::EngineBuilder;
///
/// let summary = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_seed(42)
///     .build()
///     .run()?;
/// println!("best run: {}", summary.high_score);
/// # Ok::<(), horizon_infinity::PlatformError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    settings: GameSettings,
    seed: u64,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            settings: GameSettings::default(),
            seed: 0,
        }
    }

    /// Game ticks per second.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Platform events buffered between the window and the game thread.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Obstacle layout is fully determined by the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Engine {
        info!(
            target: "engine",
            "Building engine (TPS: {}, channel: {}, seed: {})",
            self.tps, self.channel_capacity, self.seed
        );

        let window = WindowConfig {
            title: self.settings.window_title.clone(),
            size: self.settings.resolution,
        };
        Engine {
            game: Game::new(self.settings, self.seed),
            window,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

pub struct Engine {
    game: Game,
    window: WindowConfig,
    tps: f64,
    channel_capacity: usize,
}

impl Engine {
    /// Gives access to the game before it starts, e.g. to queue events or
    /// subscribe extra handlers.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Game),
    {
        init_fn(&mut self.game);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and blocks until it closes or the game exits.
    ///
    /// Must be called on the main thread.
    pub fn run(self) -> Result<SessionSummary, PlatformError> {
        info!(target: "engine", "Starting (TPS: {})", self.tps);

        let (tx, rx) = bounded(self.channel_capacity);
        let orchestrator = CoreSystemsOrchestrator::new(self.game);
        let core_stopped = orchestrator.shutdown_flag();
        let core_handle = orchestrator.spawn_core_thread(rx, self.tps);

        let platform_result = Platform::new(self.window, tx, core_stopped).run();
        if let Err(e) = &platform_result {
            error!(target: "engine", "Platform error: {}", e);
        }

        let summary = match core_handle.join() {
            Ok(summary) => summary,
            Err(e) => {
                error!(target: "engine", "Core thread panicked: {:?}", e);
                SessionSummary::default()
            }
        };

        platform_result?;
        info!(target: "engine", "Shutdown complete: {:?}", summary);
        Ok(summary)
    }

    /// Plays `ticks` fixed-length ticks without a window, starting a new
    /// run whenever the previous one is lost.
    pub fn simulate(mut self, ticks: u64) -> SessionSummary {
        info!(target: "engine", "Simulating {} ticks", ticks);

        self.game
            .publish(EventData::new(EventCategory::MainMenu, EventAction::OnStart));
        let summary = CoreSystemsOrchestrator::new(self.game).run_headless(ticks, self.tps, true);

        info!(target: "engine", "Simulation finished: {:?}", summary);
        summary
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // EngineBuilder
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.seed, 0);
        assert_eq!(builder.settings, GameSettings::default());
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn zero_tps_panics() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn negative_tps_panics() {
        EngineBuilder::new().with_tps(-30.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn zero_capacity_panics() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn build_carries_configuration() {
        let settings = GameSettings {
            window_title: "runner".to_string(),
            resolution: (640, 480),
            ..GameSettings::default()
        };
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_settings(settings)
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window, WindowConfig { title: "runner".to_string(), size: (640, 480) });
    }

    //=====================================================================
    // Headless
    //=====================================================================

    #[test]
    fn init_runs_before_first_tick() {
        let engine = EngineBuilder::new().build().init(|game| {
            game.world_mut().toggle_debug();
        });
        assert!(engine.game().world().is_debug());
    }

    #[test]
    fn simulate_scores() {
        let summary = EngineBuilder::new().with_seed(7).build().simulate(120);
        assert_eq!(summary.ticks, 120);
        assert!(summary.high_score > 0);
    }

    #[test]
    fn simulate_is_deterministic_per_seed() {
        let a = EngineBuilder::new().with_seed(11).build().simulate(2_000);
        let b = EngineBuilder::new().with_seed(11).build().simulate(2_000);
        assert_eq!(a, b);
    }
}
