/*!
 * Event System
 * Strongly-typed observability events for the simulator
 */

use crate::core::types::{Burst, OwnedRange, Pid, Size};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Event severity for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Event category for organization and querying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    Process,
    Memory,
    Scheduler,
    Io,
}

/// Unified event type - all observability events flow through this
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic timestamp (nanoseconds since first event)
    pub timestamp_ns: u64,
    pub severity: Severity,
    pub category: Category,
    /// Process ID if applicable
    pub pid: Option<Pid>,
    pub payload: Payload,
}

/// Event payload - one variant per observable state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    // Process events
    ProcessAdmitted {
        burst: Burst,
        memory_required: Size,
    },

    // Memory events
    MemoryAllocated {
        range: OwnedRange,
    },
    MemoryReleased {
        range: OwnedRange,
        freed: Size,
    },
    AllocationFailed {
        requested: Size,
        largest_free: Size,
    },
    ReleaseRejected {
        requested: OwnedRange,
    },

    // Scheduler events
    QuantumGranted {
        round: u64,
        before: Burst,
        after: Burst,
    },
    ProcessTerminated {
        round: u64,
    },
    ProcessWoken {
        round: u64,
    },
    RoundCompleted {
        round: u64,
        dispatched: usize,
    },
    ProcessStranded,

    // I/O events
    IoStarted {
        delay_ms: u64,
    },
    IoCompleted,
}

impl Event {
    /// Create a new event with current timestamp
    #[inline]
    pub fn new(severity: Severity, category: Category, payload: Payload) -> Self {
        Self {
            timestamp_ns: Self::now_ns(),
            severity,
            category,
            pid: None,
            payload,
        }
    }

    /// Attach process context
    #[inline]
    pub fn with_pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }

    #[inline]
    fn now_ns() -> u64 {
        static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        let start = START.get_or_init(Instant::now);
        start.elapsed().as_nanos() as u64
    }

    /// Check if event matches filter criteria
    #[inline]
    pub fn matches(&self, filter: &EventFilter) -> bool {
        if let Some(min_severity) = filter.min_severity {
            if self.severity < min_severity {
                return false;
            }
        }

        if let Some(category) = filter.category {
            if self.category != category {
                return false;
            }
        }

        if let Some(pid) = filter.pid {
            if self.pid != Some(pid) {
                return false;
            }
        }

        true
    }
}

/// Event filter for querying
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub min_severity: Option<Severity>,
    pub category: Option<Category>,
    pub pid: Option<Pid>,
}

impl EventFilter {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    #[inline]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[inline]
    pub fn pid(mut self, pid: Pid) -> Self {
        self.pid = Some(pid);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_filter() {
        let event = Event::new(
            Severity::Warn,
            Category::Memory,
            Payload::AllocationFailed {
                requested: 50,
                largest_free: 10,
            },
        )
        .with_pid(4);

        let filter = EventFilter::new()
            .severity(Severity::Info)
            .category(Category::Memory)
            .pid(4);
        assert!(event.matches(&filter));

        let filter = EventFilter::new().severity(Severity::Error);
        assert!(!event.matches(&filter));

        let filter = EventFilter::new().category(Category::Scheduler);
        assert!(!event.matches(&filter));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warn);
        assert!(Severity::Warn > Severity::Info);
    }
}
