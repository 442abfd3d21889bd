//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Runs the game on its own thread at a fixed tick rate.
//
// Each tick:
//   1. EventCollector drains the platform channel
//   2. window changes (resize, focus loss) reach the game
//   3. Game::tick dispatches last tick's events, then updates the world
//   4. sleep off the rest of the frame
//
// The loop ends when the window closes, the channel disconnects or the
// game asks to exit. The shared shutdown flag then tells the platform
// thread to close the window.
//
//=========================================================================

pub mod events;
pub mod input;
pub mod math;
pub(crate) mod platform_bridge;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::game::{Game, SessionSummary};
use crate::core::events::{EventAction, EventCategory, EventData};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    game: Game,
    shutdown: Arc<AtomicBool>,
}

impl CoreSystemsOrchestrator {
    pub(crate) fn new(game: Game) -> Self {
        Self {
            game,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set once the core loop has stopped.
    pub(crate) fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    //--- Threaded ---------------------------------------------------------

    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<SessionSummary> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let Self { mut game, shutdown } = self;
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();
                let elapsed = frame_start.duration_since(last_tick);
                last_tick = frame_start;

                if Self::step(&mut game, &mut collector, elapsed) == TickControl::Exit {
                    break;
                }

                let busy = frame_start.elapsed();
                if busy < frame_duration {
                    thread::sleep(frame_duration - busy);
                }
            }

            shutdown.store(true, Ordering::Release);
            let summary = game.summary();
            info!(target: "core", "Core thread exiting after {} ticks", summary.ticks);
            summary
        })
    }

    fn step(game: &mut Game, collector: &mut EventCollector, elapsed: Duration) -> TickControl {
        if collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        if let Some((width, height)) = collector.resized() {
            game.resize(width, height);
        }
        if collector.focus_lost() {
            game.focus_lost();
        }

        game.tick(elapsed, collector.batches());

        if game.exit_requested() {
            debug!(target: "core", "Exit requested by game");
            return TickControl::Exit;
        }
        TickControl::Continue
    }

    //--- Headless ---------------------------------------------------------

    /// Runs `ticks` ticks without a window or pacing, each one `1/tps`
    /// long. With `auto_restart`, a new run starts whenever the game sits
    /// in a menu with nothing left to deliver.
    pub(crate) fn run_headless(self, ticks: u64, tps: f64, auto_restart: bool) -> SessionSummary {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let mut game = self.game;

        for _ in 0..ticks {
            if auto_restart && !game.is_playing() && game.pending_events().is_empty() {
                game.publish(EventData::new(EventCategory::MainMenu, EventAction::OnStart));
            }

            game.tick(frame_duration, &[]);

            if game.exit_requested() {
                break;
            }
        }

        self.shutdown.store(true, Ordering::Release);
        game.summary()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
