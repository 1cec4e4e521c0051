/*!
 * Core Types
 * Common types used across the simulator
 */

use serde::{Deserialize, Serialize};

/// Process ID type
pub type Pid = u32;

/// Index of a block in the memory pool
pub type BlockIndex = usize;

/// Size type for memory operations (in blocks)
pub type Size = usize;

/// CPU time units
pub type Burst = u32;

/// Priority level (stored and reported, never consulted by the scheduler)
pub type Priority = u8;

/// Half-open block range `[start, start + length)` owned by a single process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnedRange {
    pub start: BlockIndex,
    pub length: Size,
}

impl OwnedRange {
    pub fn new(start: BlockIndex, length: Size) -> Self {
        Self { start, length }
    }

    /// One past the last block of the range
    #[inline]
    pub fn end(&self) -> BlockIndex {
        self.start + self.length
    }

    #[inline]
    pub fn contains(&self, block: BlockIndex) -> bool {
        block >= self.start && block < self.end()
    }

    /// Whether two ranges share at least one block
    pub fn overlaps(&self, other: &OwnedRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

impl std::fmt::Display for OwnedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}..{})", self.start, self.end())
    }
}
