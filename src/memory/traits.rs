/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::pool::MemoryPool;
use super::types::*;
use crate::core::types::{BlockIndex, OwnedRange, Pid, Size};

/// Memory allocator interface consumed by the scheduler
pub trait Allocator {
    /// Allocate `required` contiguous blocks for a process
    fn allocate(&mut self, pid: Pid, required: Size) -> MemoryResult<BlockIndex>;

    /// Release a range previously handed to `pid`
    fn release(&mut self, pid: Pid, start: BlockIndex, length: Size) -> MemoryResult<Size>;

    /// Range currently recorded for `pid`
    fn owned_range(&self, pid: Pid) -> Option<OwnedRange>;

    /// Read-only view of the block pool
    fn pool(&self) -> &MemoryPool;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}

impl Allocator for super::MemoryAllocator {
    fn allocate(&mut self, pid: Pid, required: Size) -> MemoryResult<BlockIndex> {
        super::MemoryAllocator::allocate(self, pid, required)
    }

    fn release(&mut self, pid: Pid, start: BlockIndex, length: Size) -> MemoryResult<Size> {
        super::MemoryAllocator::release(self, pid, start, length)
    }

    fn owned_range(&self, pid: Pid) -> Option<OwnedRange> {
        super::MemoryAllocator::owned_range(self, pid)
    }

    fn pool(&self) -> &MemoryPool {
        super::MemoryAllocator::pool(self)
    }
}

impl MemoryInfo for super::MemoryAllocator {
    fn stats(&self) -> MemoryStats {
        super::MemoryAllocator::stats(self)
    }
}
