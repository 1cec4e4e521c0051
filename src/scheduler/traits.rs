/*!
 * Scheduler Hooks
 * Observation points for presenting state changes as they happen
 */

use super::types::RoundReport;
use crate::core::types::OwnedRange;
use crate::memory::MemoryPool;
use crate::process::{Process, ProcessRegistry, QuantumOutcome};

/// Callbacks fired by the scheduler; every method defaults to a no-op
pub trait SchedulerHook {
    /// A process has just consumed a quantum
    fn on_quantum(&mut self, _process: &Process, _outcome: &QuantumOutcome) {}

    /// A terminated process's blocks have been returned to the pool
    fn on_memory_released(&mut self, _process: &Process, _range: OwnedRange, _pool: &MemoryPool) {}

    /// A full pass over the collection has finished
    fn on_round_complete(&mut self, _report: &RoundReport, _registry: &ProcessRegistry) {}
}

/// Hook that observes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl SchedulerHook for NoopHook {}
