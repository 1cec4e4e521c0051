/*!
 * Process Types
 * Common types for process management
 */

use crate::core::types::{BlockIndex, Burst, OwnedRange, Pid, Priority, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Process not found: {0}")]
    ProcessNotFound(Pid),

    #[error("Process {0} is already registered")]
    DuplicateProcess(Pid),

    #[error("Process {0} must require at least one memory block")]
    InvalidMemoryRequirement(Pid),

    #[error("Invalid state transition for process {pid}: {from} -> {to}")]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },

    #[error("Process {pid} already owns memory starting at block {start}")]
    MemoryAlreadyAssigned { pid: Pid, start: BlockIndex },

    #[error("I/O already in progress for process {0}")]
    IoBusy(Pid),
}

/// Process state
///
/// "Running" is never stored: a process only executes for the duration of a
/// single quantum inside the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Eligible for a quantum
    Ready,
    /// Blocked on I/O or a timed wait
    Waiting,
    /// Finished; terminal
    Terminated,
}

impl ProcessState {
    /// Whether `self -> to` is a legal transition
    pub fn can_transition_to(self, to: ProcessState) -> bool {
        matches!(
            (self, to),
            (ProcessState::Ready, ProcessState::Waiting)
                | (ProcessState::Waiting, ProcessState::Ready)
                | (ProcessState::Ready, ProcessState::Terminated)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessState::Ready => "READY",
            ProcessState::Waiting => "WAITING",
            ProcessState::Terminated => "TERMINATED",
        }
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction contract for a process; also the roster file schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub id: Pid,
    pub burst_time: Burst,
    pub priority: Priority,
    pub memory_required: Size,
}

impl ProcessSpec {
    pub fn new(id: Pid, burst_time: Burst, priority: Priority, memory_required: Size) -> Self {
        Self {
            id,
            burst_time,
            priority,
            memory_required,
        }
    }
}

/// Why a process is waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitCondition {
    /// Cleared by whoever put the process to sleep
    Indefinite,
    /// Cleared by the scheduler after this many rounds
    Rounds(u32),
}

/// Simulated process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub id: Pid,
    pub state: ProcessState,
    pub remaining_burst: Burst,
    pub priority: Priority,
    pub memory_required: Size,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub memory_start: Option<BlockIndex>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wake_after_rounds: Option<u32>,
}

impl Process {
    /// Fresh Ready process with no memory
    pub fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            id: spec.id,
            state: ProcessState::Ready,
            remaining_burst: spec.burst_time,
            priority: spec.priority,
            memory_required: spec.memory_required,
            memory_start: None,
            wake_after_rounds: None,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == ProcessState::Ready
    }

    /// Range this process owns, if its allocation succeeded
    pub fn owned_range(&self) -> Option<OwnedRange> {
        self.memory_start
            .map(|start| OwnedRange::new(start, self.memory_required))
    }
}

/// Result of granting one quantum to a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantumOutcome {
    /// Still has work left and stays Ready
    Continued { before: Burst, remaining: Burst },
    /// Burst exhausted; the process is now Terminated
    Terminated { before: Burst },
}

impl QuantumOutcome {
    pub fn before(&self) -> Burst {
        match *self {
            QuantumOutcome::Continued { before, .. } | QuantumOutcome::Terminated { before } => {
                before
            }
        }
    }

    pub fn remaining(&self) -> Burst {
        match *self {
            QuantumOutcome::Continued { remaining, .. } => remaining,
            QuantumOutcome::Terminated { .. } => 0,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, QuantumOutcome::Terminated { .. })
    }
}
