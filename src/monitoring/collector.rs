/*!
 * Event Collector
 * Bounded in-memory sink shared by the allocator, scheduler and I/O path
 */

use super::events::{Category, Event, EventFilter};
use crate::core::limits::EVENT_BUFFER_CAPACITY;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Observability collector
///
/// Keeps the most recent `capacity` events; older ones are dropped and counted.
pub struct Collector {
    events: Mutex<VecDeque<Event>>,
    capacity: usize,
    dropped: Mutex<u64>,
}

impl Collector {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
            dropped: Mutex::new(0),
        }
    }

    /// Emit an event (primary API)
    #[inline]
    pub fn emit(&self, event: Event) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
            *self.dropped.lock() += 1;
        }
        events.push_back(event);
    }

    /// Snapshot of all retained events, oldest first
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().iter().cloned().collect()
    }

    /// Retained events matching a filter
    pub fn query(&self, filter: &EventFilter) -> Vec<Event> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.matches(filter))
            .cloned()
            .collect()
    }

    pub fn count(&self, category: Category) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.category == category)
            .count()
    }

    /// Remove and return every retained event
    pub fn drain(&self) -> Vec<Event> {
        self.events.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Events discarded because the buffer was full
    pub fn dropped(&self) -> u64 {
        *self.dropped.lock()
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}
