/*!
 * Error Types
 * Top-level simulator error with miette diagnostics
 */

use super::config::ConfigError;
use crate::memory::MemoryError;
use crate::process::ProcessError;
use crate::scheduler::SchedulerError;
use miette::Diagnostic;
use thiserror::Error;

/// Simulator operation result
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by the simulation driver
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(sim::config),
        help("Check the SIM_* environment variables and the roster file.")
    )]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(
        code(sim::process),
        help("The process may not be registered, or is in a state that forbids this operation.")
    )]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(code(sim::memory))]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    #[diagnostic(code(sim::scheduler), help("Use a quantum of at least 1."))]
    Scheduler(#[from] SchedulerError),

    #[error("I/O cannot be performed once scheduling has started")]
    #[diagnostic(
        code(sim::io_after_start),
        help("Run the I/O collaborator before calling run().")
    )]
    IoAfterSchedulingStarted,

    #[error("Simulation has already run")]
    #[diagnostic(code(sim::already_run))]
    AlreadyRun,

    #[error("Snapshot serialization failed: {0}")]
    #[diagnostic(code(sim::snapshot))]
    Snapshot(String),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Snapshot(err.to_string())
    }
}
