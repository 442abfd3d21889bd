//=========================================================================
// Event Dispatcher
//=========================================================================
//
// Frame-stepped publish/subscribe router.
//
// Architecture:
// ```text
//   Tick N (update)                  Tick N+1 (dispatcher.tick)
//   ───────────────                  ──────────────────────────
//   systems ─publish─► EventQueue ─begin_tick─► batch (fixed)
//                          ▲                      │ in order
//                          │                      ▼
//                          └──publish── handlers[category] (FIFO)
//                              (deferred to tick N+2)
// ```
//
// Guarantees:
// - Events reach handlers only inside `tick()`, never during `publish()`
// - Within a tick, events are delivered in publication order
// - Within a category, handlers run in subscription order
// - The batch is captured at entry; handler-published events wait a tick
// - A failing handler is logged and skipped; delivery continues
//
// The dispatcher is generic over the context `C` that handlers mutate,
// and is owned by whoever drives the update loop. There is no global
// instance.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::data::{EventCategory, EventData};
use super::error::{EventError, HandlerError};
use super::queue::EventQueue;

//=== Public API ==========================================================

/// Subscriber callback.
///
/// Receives the shared context, the event being delivered, and the queue
/// for follow-up events (delivered next tick).
pub type EventHandler<C> =
    Box<dyn FnMut(&mut C, &EventData, &mut EventQueue) -> Result<(), HandlerError> + Send>;

/// Handle returned by [`EventDispatcher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Counters for one [`EventDispatcher::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Events taken from the queue at tick entry.
    pub processed: usize,
    /// Handler invocations.
    pub deliveries: usize,
    /// Events whose category had no subscribers.
    pub unrouted: usize,
    /// Handler invocations that returned an error.
    pub failures: usize,
}

struct Subscription<C> {
    id: SubscriptionId,
    handler: EventHandler<C>,
}

//=== EventDispatcher =====================================================

pub struct EventDispatcher<C> {
    subscribers: HashMap<EventCategory, Vec<Subscription<C>>>,
    queue: EventQueue,
    next_id: u64,
    ticks: u64,
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            subscribers: HashMap::new(),
            queue: EventQueue::new(),
            next_id: 0,
            ticks: 0,
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `handler` for every event in `category`.
    ///
    /// Handlers for the same category are invoked in registration order.
    pub fn subscribe<F>(&mut self, category: EventCategory, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C, &EventData, &mut EventQueue) -> Result<(), HandlerError> + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.subscribers
            .entry(category)
            .or_default()
            .push(Subscription { id, handler: Box::new(handler) });

        debug!(target: "events", "Subscribed {:?} to {:?}", id, category);
        id
    }

    /// Removes a subscription. Returns `false` if it was not registered
    /// under `category`.
    pub fn unsubscribe(&mut self, category: EventCategory, id: SubscriptionId) -> bool {
        let Some(list) = self.subscribers.get_mut(&category) else {
            return false;
        };

        let before = list.len();
        list.retain(|sub| sub.id != id);
        let removed = list.len() != before;

        if removed {
            debug!(target: "events", "Unsubscribed {:?} from {:?}", id, category);
        }
        removed
    }

    pub fn subscriber_count(&self, category: EventCategory) -> usize {
        self.subscribers.get(&category).map_or(0, Vec::len)
    }

    //--- Publishing -------------------------------------------------------

    /// Queues an event for the next tick. See [`EventQueue::publish`].
    pub fn publish(&mut self, event: EventData) -> bool {
        self.queue.publish(event)
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Mutable queue access for systems that publish outside a handler.
    pub fn queue_mut(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    //--- Delivery ---------------------------------------------------------

    /// Delivers every event pending at entry.
    ///
    /// Must be called once per update cycle by the loop owner.
    pub fn tick(&mut self, ctx: &mut C) -> TickReport {
        self.ticks += 1;
        let batch = self.queue.begin_tick();

        let mut report = TickReport {
            processed: batch.len(),
            ..TickReport::default()
        };

        for event in &batch {
            let handlers = match self.subscribers.get_mut(&event.category()) {
                Some(list) if !list.is_empty() => list,
                _ => {
                    debug!(target: "events", "{} ({})", EventError::UnknownCategory(event.category()), event);
                    report.unrouted += 1;
                    continue;
                }
            };

            trace!(target: "events", "Delivering {} to {} handler(s)", event, handlers.len());

            for sub in handlers.iter_mut() {
                report.deliveries += 1;
                if let Err(err) = (sub.handler)(ctx, event, &mut self.queue) {
                    warn!(target: "events", "Handler {:?} failed on {}: {}", sub.id, event, err);
                    report.failures += 1;
                }
            }
        }

        if report.processed > 0 {
            trace!(target: "events", "Tick {}: {:?}", self.ticks, report);
        }
        report
    }

    /// Number of completed [`tick`](Self::tick) calls.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
