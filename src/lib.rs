/*!
 * Round-Robin Simulator Kernel Library
 * First-fit memory allocation and round-robin CPU scheduling, exposed as a library
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod scheduler;
pub mod simulation;

// Re-exports
pub use crate::core::{ConfigError, SimConfig, SimError, SimResult};
pub use memory::{Allocator, MemoryAllocator, MemoryError, MemoryPool, MemoryStats};
pub use monitoring::{init_tracing, Collector, RunSpan};
pub use process::{
    IoCollaborator, Process, ProcessError, ProcessRegistry, ProcessSpec, ProcessState,
    QuantumOutcome, WaitCondition,
};
pub use report::{render_memory_map, render_process_table};
pub use scheduler::{NoopHook, RoundReport, Scheduler, SchedulerHook, SchedulerStats};
pub use simulation::{AllocationOutcome, Phase, Simulation, SimulationBuilder, Snapshot};
