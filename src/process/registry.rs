/*!
 * Process Registry
 * Ordered process collection with a single mutation entry point per concern
 */

use super::types::{
    Process, ProcessError, ProcessResult, ProcessSpec, ProcessState, QuantumOutcome,
    WaitCondition,
};
use super::validation::{validate_spec, validate_transition};
use crate::core::types::{BlockIndex, Burst, OwnedRange, Pid};
use ahash::RandomState;
use log::{debug, info};
use std::collections::HashMap;

/// Process registry
///
/// Processes keep their registration order for the lifetime of the run; the
/// scheduler services them in that order. Terminated processes stay in place.
#[derive(Debug, Clone, Default)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    index: HashMap<Pid, usize, RandomState>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a new process in the Ready state with no memory
    pub fn register(&mut self, spec: &ProcessSpec) -> ProcessResult<Pid> {
        validate_spec(spec)?;
        if self.index.contains_key(&spec.id) {
            return Err(ProcessError::DuplicateProcess(spec.id));
        }

        self.index.insert(spec.id, self.processes.len());
        self.processes.push(Process::from_spec(spec));
        info!(
            "Registered process {} (burst: {}, priority: {}, memory: {})",
            spec.id, spec.burst_time, spec.priority, spec.memory_required
        );
        Ok(spec.id)
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.index.get(&pid).map(|&idx| &self.processes[idx])
    }

    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Pids in registration order
    pub fn pids(&self) -> Vec<Pid> {
        self.processes.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn count_in(&self, state: ProcessState) -> usize {
        self.processes.iter().filter(|p| p.state == state).count()
    }

    pub fn waiting_pids(&self) -> Vec<Pid> {
        self.processes
            .iter()
            .filter(|p| p.state == ProcessState::Waiting)
            .map(|p| p.id)
            .collect()
    }

    /// Whether any Waiting process will be woken by the scheduler
    pub fn has_timed_waiters(&self) -> bool {
        self.processes
            .iter()
            .any(|p| p.state == ProcessState::Waiting && p.wake_after_rounds.is_some())
    }

    /// Validated state change
    pub fn transition(&mut self, pid: Pid, to: ProcessState) -> ProcessResult<()> {
        let process = self.get_mut(pid)?;
        validate_transition(pid, process.state, to)?;

        let from = process.state;
        process.state = to;
        if to != ProcessState::Waiting {
            process.wake_after_rounds = None;
        }
        debug!("Process {} {} -> {}", pid, from, to);
        Ok(())
    }

    /// Move a Ready process to Waiting under the given condition
    pub fn block(&mut self, pid: Pid, condition: WaitCondition) -> ProcessResult<()> {
        self.transition(pid, ProcessState::Waiting)?;
        let process = self.get_mut(pid)?;
        process.wake_after_rounds = match condition {
            WaitCondition::Indefinite => None,
            // A zero-round wait still sits out until the end of the current round
            WaitCondition::Rounds(rounds) => Some(rounds.max(1)),
        };
        Ok(())
    }

    /// Grant one quantum to a Ready process.
    ///
    /// The burst decrement and the Terminated transition happen in one step, so
    /// a process leaves this call Terminated whenever its burst reaches zero.
    pub fn run_quantum(&mut self, pid: Pid, quantum: Burst) -> ProcessResult<QuantumOutcome> {
        let process = self.get_mut(pid)?;
        if process.state != ProcessState::Ready {
            return Err(ProcessError::InvalidStateTransition {
                pid,
                from: process.state,
                to: ProcessState::Terminated,
            });
        }

        let before = process.remaining_burst;
        let remaining = before.saturating_sub(quantum);
        process.remaining_burst = remaining;

        if remaining == 0 {
            process.state = ProcessState::Terminated;
            Ok(QuantumOutcome::Terminated { before })
        } else {
            Ok(QuantumOutcome::Continued { before, remaining })
        }
    }

    /// Record the start block of a successful allocation
    pub fn assign_memory(&mut self, pid: Pid, start: BlockIndex) -> ProcessResult<()> {
        let process = self.get_mut(pid)?;
        if let Some(existing) = process.memory_start {
            return Err(ProcessError::MemoryAlreadyAssigned {
                pid,
                start: existing,
            });
        }
        process.memory_start = Some(start);
        Ok(())
    }

    /// Hand out and clear the owned range; `None` on every call after the first
    pub fn take_memory(&mut self, pid: Pid) -> ProcessResult<Option<OwnedRange>> {
        let process = self.get_mut(pid)?;
        let required = process.memory_required;
        Ok(process
            .memory_start
            .take()
            .map(|start| OwnedRange::new(start, required)))
    }

    /// Count down timed waits by one round, waking processes that reach zero
    pub fn tick_waiters(&mut self) -> Vec<Pid> {
        let mut woken = Vec::new();
        for process in &mut self.processes {
            if process.state != ProcessState::Waiting {
                continue;
            }
            if let Some(rounds) = process.wake_after_rounds.as_mut() {
                *rounds -= 1;
                if *rounds == 0 {
                    process.wake_after_rounds = None;
                    process.state = ProcessState::Ready;
                    woken.push(process.id);
                }
            }
        }
        woken
    }

    fn get_mut(&mut self, pid: Pid) -> ProcessResult<&mut Process> {
        match self.index.get(&pid) {
            Some(&idx) => Ok(&mut self.processes[idx]),
            None => Err(ProcessError::ProcessNotFound(pid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> ProcessRegistry {
        let mut registry = ProcessRegistry::new();
        registry.register(&ProcessSpec::new(1, 10, 1, 20)).unwrap();
        registry.register(&ProcessSpec::new(2, 15, 2, 30)).unwrap();
        registry
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = registry();
        assert_eq!(
            registry.register(&ProcessSpec::new(1, 3, 1, 5)),
            Err(ProcessError::DuplicateProcess(1))
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_quantum_terminates_atomically() {
        let mut registry = registry();

        assert_eq!(
            registry.run_quantum(1, 9),
            Ok(QuantumOutcome::Continued {
                before: 10,
                remaining: 1
            })
        );
        assert_eq!(
            registry.run_quantum(1, 9),
            Ok(QuantumOutcome::Terminated { before: 1 })
        );

        let process = registry.get(1).unwrap();
        assert_eq!(process.remaining_burst, 0);
        assert_eq!(process.state, ProcessState::Terminated);

        // A terminated process can't be run again
        assert!(registry.run_quantum(1, 3).is_err());
    }

    #[test]
    fn test_take_memory_once() {
        let mut registry = registry();
        registry.assign_memory(2, 20).unwrap();

        assert_eq!(registry.take_memory(2), Ok(Some(OwnedRange::new(20, 30))));
        assert_eq!(registry.take_memory(2), Ok(None));
        assert_eq!(registry.get(2).unwrap().memory_start, None);
    }

    #[test]
    fn test_timed_wait_wakes() {
        let mut registry = registry();
        registry.block(2, WaitCondition::Rounds(2)).unwrap();
        assert!(registry.has_timed_waiters());

        assert!(registry.tick_waiters().is_empty());
        assert_eq!(registry.tick_waiters(), vec![2]);
        assert_eq!(registry.get(2).unwrap().state, ProcessState::Ready);
        assert!(!registry.has_timed_waiters());
    }

    #[test]
    fn test_unknown_pid() {
        let mut registry = registry();
        assert_eq!(
            registry.transition(42, ProcessState::Waiting),
            Err(ProcessError::ProcessNotFound(42))
        );
    }
}
