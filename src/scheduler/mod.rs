/*!
 * CPU Scheduler
 * Round-robin time slicing over the process registry
 *
 * Every round walks the registry in registration order and grants one fixed
 * quantum to each Ready process. A process whose burst reaches zero is
 * terminated on the spot and its memory goes back to the allocator. The loop
 * stops after a round in which nothing was Ready and no timed wait is pending.
 */

use crate::core::types::Burst;
use crate::monitoring::Collector;
use std::sync::Arc;
use tracing::info;

mod operations;
pub mod traits;
pub mod types;

pub use traits::{NoopHook, SchedulerHook};
pub use types::{Dispatch, RoundReport, SchedulerError, SchedulerResult, SchedulerStats};

/// Round-robin scheduler
pub struct Scheduler {
    quantum: Burst,
    round: u64,
    stats: SchedulerStats,
    collector: Option<Arc<Collector>>,
}

impl Scheduler {
    /// Create a scheduler granting `quantum` CPU units per round
    pub fn new(quantum: Burst) -> SchedulerResult<Self> {
        if quantum == 0 {
            return Err(SchedulerError::InvalidQuantum);
        }
        info!(quantum, "Scheduler initialized (round-robin)");

        Ok(Self {
            quantum,
            round: 0,
            stats: SchedulerStats {
                quantum,
                ..SchedulerStats::default()
            },
            collector: None,
        })
    }

    /// Add observability collector
    pub fn with_collector(mut self, collector: Arc<Collector>) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn quantum(&self) -> Burst {
        self.quantum
    }

    /// Number of rounds started so far
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryAllocator;
    use crate::process::{ProcessRegistry, ProcessSpec, ProcessState};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_quantum_rejected() {
        assert!(matches!(Scheduler::new(0), Err(SchedulerError::InvalidQuantum)));
    }

    #[test]
    fn test_burst_sequence_for_single_process() {
        let mut registry = ProcessRegistry::new();
        registry.register(&ProcessSpec::new(1, 10, 1, 20)).unwrap();
        let mut allocator = MemoryAllocator::new(100);
        let mut scheduler = Scheduler::new(3).unwrap();

        let mut bursts = vec![registry.get(1).unwrap().remaining_burst];
        for _ in 0..4 {
            scheduler.run_round(&mut registry, &mut allocator, &mut NoopHook);
            bursts.push(registry.get(1).unwrap().remaining_burst);
        }

        assert_eq!(bursts, vec![10, 7, 4, 1, 0]);
        assert_eq!(registry.get(1).unwrap().state, ProcessState::Terminated);
    }

    #[test]
    fn test_round_order_follows_registration() {
        let mut registry = ProcessRegistry::new();
        for id in [3, 1, 2] {
            registry.register(&ProcessSpec::new(id, 6, 1, 1)).unwrap();
        }
        let mut allocator = MemoryAllocator::new(10);
        let mut scheduler = Scheduler::new(3).unwrap();

        let report = scheduler.run_round(&mut registry, &mut allocator, &mut NoopHook);
        let order: Vec<_> = report.dispatched.iter().map(|d| d.pid).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
