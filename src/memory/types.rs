/*!
 * Memory Types
 * Common types for memory management
 */

use crate::core::limits::{CRITICAL_PRESSURE_RATIO, HIGH_PRESSURE_RATIO, MEDIUM_PRESSURE_RATIO};
use crate::core::types::{OwnedRange, Pid, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("No space: PID {pid} requested {requested} contiguous blocks, largest free run is {largest_free} ({free} free / {total} total)")]
    NoSpace {
        pid: Pid,
        requested: Size,
        largest_free: Size,
        free: Size,
        total: Size,
    },

    #[error("Zero-sized allocation requested by PID {0}")]
    ZeroSized(Pid),

    #[error("PID {pid} already owns blocks {range}")]
    AlreadyOwned { pid: Pid, range: OwnedRange },

    #[error("PID {pid} does not own blocks {requested} (owns {owned:?})")]
    OwnershipViolation {
        pid: Pid,
        requested: OwnedRange,
        owned: Option<OwnedRange>,
    },
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_blocks: Size,
    pub used_blocks: Size,
    pub free_blocks: Size,
    pub usage_percentage: f64,
    pub largest_free_run: Size,
    pub free_fragments: usize,
    pub owners: usize,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }

    /// A pool is fragmented when its free space is split into more than one run
    pub fn is_fragmented(&self) -> bool {
        self.free_fragments > 1
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= CRITICAL_PRESSURE_RATIO {
            MemoryPressure::Critical
        } else if ratio >= HIGH_PRESSURE_RATIO {
            MemoryPressure::High
        } else if ratio >= MEDIUM_PRESSURE_RATIO {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Ownership record entry exported for snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub pid: Pid,
    pub range: OwnedRange,
}
