/*!
 * Memory Allocator Implementation
 * First-fit allocation with a per-process ownership record
 */

use super::pool::MemoryPool;
use super::types::{Allocation, MemoryError, MemoryPressure, MemoryResult, MemoryStats};
use crate::core::types::{BlockIndex, OwnedRange, Pid, Size};
use crate::monitoring::{Category, Collector, Event, Payload, Severity};
use ahash::RandomState;
use log::{error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Memory allocator
///
/// Sole owner of the block pool. Every live range is recorded against the pid
/// that requested it, and `release` only clears a range that matches the record.
pub struct MemoryAllocator {
    pool: MemoryPool,
    owners: HashMap<Pid, OwnedRange, RandomState>,
    collector: Option<Arc<Collector>>,
}

impl MemoryAllocator {
    pub fn new(pool_size: Size) -> Self {
        info!(
            "Memory allocator initialized with {} blocks (first-fit)",
            pool_size
        );
        Self {
            pool: MemoryPool::new(pool_size),
            owners: HashMap::with_hasher(RandomState::new()),
            collector: None,
        }
    }

    /// Add observability collector
    pub fn with_collector(mut self, collector: Arc<Collector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Allocate `required` contiguous blocks for `pid` using first-fit
    pub fn allocate(&mut self, pid: Pid, required: Size) -> MemoryResult<BlockIndex> {
        if required == 0 {
            return Err(MemoryError::ZeroSized(pid));
        }
        if let Some(range) = self.owners.get(&pid) {
            return Err(MemoryError::AlreadyOwned { pid, range: *range });
        }

        let start = match self.pool.allocate_first_fit(required) {
            Some(start) => start,
            None => {
                let largest_free = self.pool.largest_free_run();
                warn!(
                    "Allocation failed for PID {}: requested {} blocks, largest free run {}",
                    pid, required, largest_free
                );
                self.emit(
                    Event::new(
                        Severity::Warn,
                        Category::Memory,
                        Payload::AllocationFailed {
                            requested: required,
                            largest_free,
                        },
                    )
                    .with_pid(pid),
                );
                return Err(MemoryError::NoSpace {
                    pid,
                    requested: required,
                    largest_free,
                    free: self.pool.free(),
                    total: self.pool.len(),
                });
            }
        };

        let range = OwnedRange::new(start, required);
        self.owners.insert(pid, range);
        self.emit(
            Event::new(
                Severity::Debug,
                Category::Memory,
                Payload::MemoryAllocated { range },
            )
            .with_pid(pid),
        );

        let used = self.pool.used();
        let pressure = MemoryPressure::from_ratio(used as f64 / self.pool.len() as f64);
        if pressure > MemoryPressure::Medium {
            warn!(
                "Memory pressure {}: allocated blocks {} for PID {} ({} / {} used)",
                pressure,
                range,
                pid,
                used,
                self.pool.len()
            );
        } else {
            info!("Allocated blocks {} for PID {}", range, pid);
        }

        Ok(start)
    }

    /// Release the range `[start, start + length)` held by `pid`.
    ///
    /// Returns the number of blocks freed. Releasing a range that is already
    /// entirely free (and no longer recorded) is a no-op returning `Ok(0)`.
    /// Any other mismatch with the ownership record is rejected without touching
    /// the pool.
    pub fn release(&mut self, pid: Pid, start: BlockIndex, length: Size) -> MemoryResult<Size> {
        let requested = OwnedRange::new(start, length);

        match self.owners.get(&pid).copied() {
            Some(owned) if owned == requested => {
                let freed = self.pool.release(start, length);
                self.owners.remove(&pid);
                info!(
                    "Released blocks {} for PID {} ({} blocks now free)",
                    requested,
                    pid,
                    self.pool.free()
                );
                self.emit(
                    Event::new(
                        Severity::Info,
                        Category::Memory,
                        Payload::MemoryReleased {
                            range: requested,
                            freed,
                        },
                    )
                    .with_pid(pid),
                );
                Ok(freed)
            }
            None if self.pool.is_range_free(start, length) => {
                warn!(
                    "PID {} released blocks {} that are already free - ignoring",
                    pid, requested
                );
                Ok(0)
            }
            owned => {
                error!(
                    "Rejected release of blocks {} by PID {} (ownership record: {:?})",
                    requested, pid, owned
                );
                self.emit(
                    Event::new(
                        Severity::Error,
                        Category::Memory,
                        Payload::ReleaseRejected { requested },
                    )
                    .with_pid(pid),
                );
                Err(MemoryError::OwnershipViolation {
                    pid,
                    requested,
                    owned,
                })
            }
        }
    }

    /// Release whatever `pid` currently owns
    pub fn release_process(&mut self, pid: Pid) -> MemoryResult<Size> {
        match self.owners.get(&pid).copied() {
            Some(range) => self.release(pid, range.start, range.length),
            None => Ok(0),
        }
    }

    pub fn pool(&self) -> &MemoryPool {
        &self.pool
    }

    pub fn capacity(&self) -> Size {
        self.pool.len()
    }

    pub fn owned_range(&self, pid: Pid) -> Option<OwnedRange> {
        self.owners.get(&pid).copied()
    }

    /// Which process owns a given block, if any
    pub fn owner_of(&self, block: BlockIndex) -> Option<Pid> {
        self.owners
            .iter()
            .find(|(_, range)| range.contains(block))
            .map(|(pid, _)| *pid)
    }

    /// Ownership record sorted by start block
    pub fn allocations(&self) -> Vec<Allocation> {
        let mut allocations: Vec<Allocation> = self
            .owners
            .iter()
            .map(|(pid, range)| Allocation {
                pid: *pid,
                range: *range,
            })
            .collect();
        allocations.sort_by_key(|a| a.range.start);
        allocations
    }

    pub fn stats(&self) -> MemoryStats {
        let total = self.pool.len();
        let used = self.pool.used();
        let runs = self.pool.free_runs();

        MemoryStats {
            total_blocks: total,
            used_blocks: used,
            free_blocks: total - used,
            usage_percentage: if total == 0 {
                0.0
            } else {
                (used as f64 / total as f64) * 100.0
            },
            largest_free_run: runs.iter().copied().max().unwrap_or(0),
            free_fragments: runs.len(),
            owners: self.owners.len(),
        }
    }

    fn emit(&self, event: Event) {
        if let Some(ref collector) = self.collector {
            collector.emit(event);
        }
    }
}
