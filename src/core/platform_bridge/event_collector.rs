//=========================================================================
// Event Collector
//=========================================================================
//
// Drains the platform channel once per tick on the game thread.
//
//   Receiver<PlatformEvent> ─► collect_frame() ─► input batches
//                                              ─► window changes
//                                              ─► TickControl
//
// At most MAX_EVENTS_PER_FRAME events are taken per tick so a flood of
// input cannot stall the simulation. An empty channel sleeps briefly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

const MAX_EVENTS_PER_FRAME: usize = 100;
const IDLE_SLEEP: Duration = Duration::from_millis(10);

//=== TickControl =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    /// Window closed or the platform thread is gone.
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    resized: Option<(u32, u32)>,
    focus_lost: bool,
    idle_sleep: bool,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            resized: None,
            focus_lost: false,
            idle_sleep: true,
        }
    }

    #[cfg(test)]
    pub(crate) fn without_idle_sleep(mut self) -> Self {
        self.idle_sleep = false;
        self
    }

    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        self.resized = None;
        self.focus_lost = false;

        let mut drained = 0;
        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "core", "Platform channel disconnected");
                    return TickControl::Exit;
                }
            }
        }

        if drained == MAX_EVENTS_PER_FRAME {
            warn!(target: "core", "Platform backlog: {} events left for next tick", self.receiver.len());
        }
        if drained == 0 && self.idle_sleep {
            thread::sleep(IDLE_SLEEP);
        }

        TickControl::Continue
    }

    //--- Frame Results ----------------------------------------------------

    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Latest size reported this frame.
    pub(crate) fn resized(&self) -> Option<(u32, u32)> {
        self.resized
    }

    pub(crate) fn focus_lost(&self) -> bool {
        self.focus_lost
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                for batch in [discrete, continuous] {
                    if !batch.is_empty() {
                        self.input_batches.push(batch);
                    }
                }
            }
            PlatformEvent::Resized { width, height } => self.resized = Some((width, height)),
            PlatformEvent::FocusLost => self.focus_lost = true,
            PlatformEvent::WindowClosed => return TickControl::Exit,
        }
        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
