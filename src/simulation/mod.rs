/*!
 * Simulation Driver
 *
 * Owns every subsystem for the duration of a run and enforces the order of
 * operations: admit processes, allocate memory once per process, optionally
 * perform I/O, then schedule to completion.
 */

mod builder;

pub use builder::SimulationBuilder;

use crate::core::errors::{SimError, SimResult};
use crate::core::types::{BlockIndex, Pid};
use crate::core::SimConfig;
use crate::memory::{Allocation, MemoryAllocator, MemoryResult, MemoryStats};
use crate::monitoring::{Category, Collector, Event, Payload, Severity};
use crate::process::{
    IoCollaborator, Process, ProcessRegistry, ProcessSpec, Sleeper, ThreadSleeper, WaitCondition,
};
use crate::scheduler::{Scheduler, SchedulerHook, SchedulerStats};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Where the run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Admission, allocation and I/O are allowed
    Setup,
    /// The scheduler loop is executing
    Scheduling,
    /// The scheduler loop has returned
    Finished,
}

/// Outcome of the single allocation attempt made for a process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub pid: Pid,
    pub result: MemoryResult<BlockIndex>,
}

/// Serializable view of the whole simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub processes: Vec<Process>,
    pub memory: String,
    pub allocations: Vec<Allocation>,
    pub memory_stats: MemoryStats,
    pub scheduler: SchedulerStats,
}

/// A complete simulation run
pub struct Simulation<S: Sleeper = ThreadSleeper> {
    config: SimConfig,
    registry: ProcessRegistry,
    allocator: MemoryAllocator,
    scheduler: Scheduler,
    io: IoCollaborator<S>,
    collector: Arc<Collector>,
    phase: Phase,
    allocation_done: bool,
}

impl Simulation<ThreadSleeper> {
    pub fn builder() -> SimulationBuilder<ThreadSleeper> {
        SimulationBuilder::new()
    }
}

impl<S: Sleeper> Simulation<S> {
    /// Register every process of the configured roster
    pub fn admit_roster(&mut self) -> SimResult<()> {
        let roster = self.config.roster.clone();
        for spec in &roster {
            self.admit(spec)?;
        }
        Ok(())
    }

    /// Register one process; only allowed during setup
    pub fn admit(&mut self, spec: &ProcessSpec) -> SimResult<Pid> {
        self.ensure_setup()?;
        let pid = self.registry.register(spec)?;
        self.collector.emit(
            Event::new(
                Severity::Info,
                Category::Process,
                Payload::ProcessAdmitted {
                    burst: spec.burst_time,
                    memory_required: spec.memory_required,
                },
            )
            .with_pid(pid),
        );
        Ok(pid)
    }

    /// Attempt one first-fit allocation per registered process, in order.
    ///
    /// Failures are not fatal: the process keeps running without memory.
    /// Calling this a second time does nothing and returns an empty list.
    pub fn allocate_all(&mut self) -> SimResult<Vec<AllocationOutcome>> {
        self.ensure_setup()?;
        if self.allocation_done {
            warn!("Memory allocation already attempted for this run");
            return Ok(Vec::new());
        }
        self.allocation_done = true;

        let mut outcomes = Vec::with_capacity(self.registry.len());
        for pid in self.registry.pids() {
            let required = match self.registry.get(pid) {
                Some(process) => process.memory_required,
                None => continue,
            };

            let result = self.allocator.allocate(pid, required);
            match &result {
                Ok(start) => {
                    self.registry.assign_memory(pid, *start)?;
                    info!(pid, start, "Memory allocated");
                }
                Err(e) => warn!(pid, error = %e, "Memory allocation failed"),
            }
            outcomes.push(AllocationOutcome { pid, result });
        }
        Ok(outcomes)
    }

    /// Run the I/O collaborator for `pid` before scheduling starts
    pub fn perform_io<F>(&mut self, pid: Pid, on_waiting: F) -> SimResult<()>
    where
        F: FnOnce(&ProcessRegistry),
    {
        if self.phase != Phase::Setup {
            return Err(SimError::IoAfterSchedulingStarted);
        }
        self.io.perform(&mut self.registry, pid, on_waiting)?;
        Ok(())
    }

    /// Park a Ready process before scheduling starts.
    ///
    /// With `WaitCondition::Rounds(n)` the scheduler wakes it after `n` rounds;
    /// an indefinite wait is never cleared and the process ends up stranded.
    pub fn suspend(&mut self, pid: Pid, condition: WaitCondition) -> SimResult<()> {
        self.ensure_setup()?;
        self.registry.block(pid, condition)?;
        info!(pid, ?condition, "Process suspended");
        Ok(())
    }

    /// Schedule until no process can make progress
    pub fn run<H: SchedulerHook + ?Sized>(&mut self, hook: &mut H) -> SimResult<SchedulerStats> {
        match self.phase {
            Phase::Setup => {}
            Phase::Scheduling | Phase::Finished => return Err(SimError::AlreadyRun),
        }

        self.phase = Phase::Scheduling;
        let stats = self
            .scheduler
            .run(&mut self.registry, &mut self.allocator, hook);
        self.phase = Phase::Finished;
        Ok(stats)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn allocator(&self) -> &MemoryAllocator {
        &self.allocator
    }

    pub fn collector(&self) -> &Arc<Collector> {
        &self.collector
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            processes: self.registry.iter().cloned().collect(),
            memory: self.allocator.pool().to_bit_string(),
            allocations: self.allocator.allocations(),
            memory_stats: self.allocator.stats(),
            scheduler: self.scheduler.stats(),
        }
    }

    pub fn snapshot_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    fn ensure_setup(&self) -> SimResult<()> {
        if self.phase == Phase::Setup {
            Ok(())
        } else {
            Err(SimError::AlreadyRun)
        }
    }
}
