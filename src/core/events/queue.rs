//=========================================================================
// Event Queue
//=========================================================================
//
// Pending events for the next dispatcher tick, with per-tick dedup.
//
// Architecture:
//   publish() ──► seen: HashSet<EventKey> ──(new)──► pending: VecDeque
//                          │
//                          └──(duplicate)──► dropped
//
//   begin_tick() ──► takes pending, clears seen
//
// Pattern: publish (N producers) → begin_tick → deliver → repeat
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashSet, VecDeque};

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::data::{EventData, EventKey};
use super::error::EventError;

//=== EventQueue ==========================================================

/// Insertion-ordered pending events plus the dedup set for this tick.
///
/// Handlers receive `&mut EventQueue` while the dispatcher delivers, so
/// anything they publish lands here and waits for the next tick.
pub struct EventQueue {
    pending: VecDeque<EventData>,
    seen: HashSet<EventKey>,
}

impl EventQueue {
    pub fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            pending: VecDeque::with_capacity(BASE_CAPACITY),
            seen: HashSet::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Publishing -------------------------------------------------------

    /// Enqueues `event` unless it is invalid or a duplicate for this tick.
    ///
    /// Returns `true` if the event was queued. Invalid events are logged
    /// and dropped; duplicates are dropped silently.
    pub fn publish(&mut self, event: EventData) -> bool {
        match self.try_publish(event) {
            Ok(queued) => queued,
            Err(err) => {
                warn!(target: "events", "Rejected event: {}", err);
                false
            }
        }
    }

    /// Like [`publish`](Self::publish) but surfaces validation failures.
    pub fn try_publish(&mut self, event: EventData) -> Result<bool, EventError> {
        event.validate()?;

        if !self.seen.insert(event.key()) {
            trace!(target: "events", "Duplicate dropped: {}", event);
            return Ok(false);
        }

        trace!(target: "events", "Queued: {}", event);
        self.pending.push_back(event);
        Ok(true)
    }

    //--- Tick Boundary ----------------------------------------------------

    /// Takes every pending event and resets the dedup set.
    ///
    /// The returned batch is fixed: events published after this call go
    /// into the (now empty) queue for the following tick.
    pub fn begin_tick(&mut self) -> VecDeque<EventData> {
        self.seen.clear();
        std::mem::take(&mut self.pending)
    }

    /// Drops all pending events (e.g. on level reset).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.seen.clear();
    }

    //--- Query API --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns `true` if an event with the same identity is pending.
    pub fn contains(&self, event: &EventData) -> bool {
        self.seen.contains(&event.key())
    }

    /// Pending events in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &EventData> {
        self.pending.iter()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
