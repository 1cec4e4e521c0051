/*!
 * Scheduler Types
 * Errors, per-round reports and run statistics
 */

use crate::core::types::{Burst, OwnedRange, Pid};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Quantum must be at least one CPU unit")]
    InvalidQuantum,
}

/// One quantum granted during a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    pub pid: Pid,
    pub before: Burst,
    pub after: Burst,
}

/// What happened during one pass over the process collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u64,
    pub dispatched: Vec<Dispatch>,
    pub terminated: Vec<Pid>,
    pub released: Vec<(Pid, OwnedRange)>,
    pub woken: Vec<Pid>,
}

impl RoundReport {
    pub(super) fn new(round: u64) -> Self {
        Self {
            round,
            ..Self::default()
        }
    }

    /// A round is productive when at least one process was Ready
    #[inline]
    pub fn is_productive(&self) -> bool {
        !self.dispatched.is_empty()
    }
}

/// Scheduler statistics for a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub quantum: Burst,
    /// Rounds in which at least one process ran
    pub rounds: u64,
    /// Rounds in which nothing was Ready, including the final empty pass
    pub idle_rounds: u64,
    pub quanta_granted: u64,
    pub terminations: u64,
    pub releases: u64,
    pub release_failures: u64,
    /// Processes still Waiting on an indefinite wait when the loop ended
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub stranded: Vec<Pid>,
}
