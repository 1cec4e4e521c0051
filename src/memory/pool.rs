/*!
 * Memory Pool
 * Fixed-length block bitmap with a first-fit scan
 *
 * The pool only knows which blocks are taken. It has no notion of owners;
 * ownership is tracked one level up by `MemoryAllocator`.
 */

use crate::core::types::{BlockIndex, Size};
use serde::{Deserialize, Serialize};

/// Fixed-length sequence of blocks, `false` = free, `true` = allocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryPool {
    blocks: Vec<bool>,
}

impl MemoryPool {
    /// Create a pool with every block free
    pub fn new(size: Size) -> Self {
        Self {
            blocks: vec![false; size],
        }
    }

    /// Number of blocks in the pool (never changes)
    #[inline]
    pub fn len(&self) -> Size {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether a block is allocated. Out-of-range indices read as free.
    #[inline]
    pub fn is_allocated(&self, index: BlockIndex) -> bool {
        self.blocks.get(index).copied().unwrap_or(false)
    }

    /// Read-only view of the block bitmap
    pub fn blocks(&self) -> &[bool] {
        &self.blocks
    }

    /// First-fit allocation.
    ///
    /// Returns the lowest index `i` such that `[i, i + required)` is free and in
    /// bounds, after marking that range allocated. Returns `None` (and leaves the
    /// pool untouched) when no such run exists or `required` is zero.
    pub fn allocate_first_fit(&mut self, required: Size) -> Option<BlockIndex> {
        let start = self.find_first_fit(required)?;
        self.blocks[start..start + required].fill(true);
        Some(start)
    }

    /// Locate the first-fit start for `required` blocks without marking anything
    pub fn find_first_fit(&self, required: Size) -> Option<BlockIndex> {
        if required == 0 || required > self.blocks.len() {
            return None;
        }

        let mut run_start = 0;
        let mut run_len = 0;
        for (index, &allocated) in self.blocks.iter().enumerate() {
            if allocated {
                run_len = 0;
                continue;
            }
            if run_len == 0 {
                run_start = index;
            }
            run_len += 1;
            if run_len == required {
                return Some(run_start);
            }
        }

        None
    }

    /// Clear `[start, min(start + length, len))`.
    ///
    /// Already-free blocks stay free, so releasing twice is harmless.
    /// Returns the number of blocks that actually flipped from allocated to free.
    pub fn release(&mut self, start: BlockIndex, length: Size) -> Size {
        let len = self.blocks.len();
        if start >= len {
            return 0;
        }
        let end = start.saturating_add(length).min(len);

        let mut freed = 0;
        for block in &mut self.blocks[start..end] {
            if *block {
                *block = false;
                freed += 1;
            }
        }
        freed
    }

    /// True when every block of the (clamped) range is allocated
    pub fn is_range_allocated(&self, start: BlockIndex, length: Size) -> bool {
        let end = start.saturating_add(length);
        end <= self.blocks.len() && self.blocks[start..end].iter().all(|&b| b)
    }

    /// True when every in-bounds block of the range is free
    pub fn is_range_free(&self, start: BlockIndex, length: Size) -> bool {
        let len = self.blocks.len();
        if start >= len {
            return true;
        }
        let end = start.saturating_add(length).min(len);
        self.blocks[start..end].iter().all(|&b| !b)
    }

    pub fn used(&self) -> Size {
        self.blocks.iter().filter(|&&b| b).count()
    }

    pub fn free(&self) -> Size {
        self.len() - self.used()
    }

    /// Lengths of every maximal free run, left to right
    pub fn free_runs(&self) -> Vec<Size> {
        let mut runs = Vec::new();
        let mut current = 0;
        for &allocated in &self.blocks {
            if allocated {
                if current > 0 {
                    runs.push(current);
                    current = 0;
                }
            } else {
                current += 1;
            }
        }
        if current > 0 {
            runs.push(current);
        }
        runs
    }

    pub fn largest_free_run(&self) -> Size {
        self.free_runs().into_iter().max().unwrap_or(0)
    }

    /// Render the bitmap as one `0`/`1` digit per block
    pub fn to_bit_string(&self) -> String {
        self.blocks
            .iter()
            .map(|&b| if b { '1' } else { '0' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_fit_sequential() {
        let mut pool = MemoryPool::new(100);

        assert_eq!(pool.allocate_first_fit(20), Some(0));
        assert_eq!(pool.allocate_first_fit(30), Some(20));
        assert_eq!(pool.allocate_first_fit(40), Some(50));
        assert_eq!(pool.used(), 90);
        assert!(pool.is_range_free(90, 10));
    }

    #[test]
    fn test_first_fit_prefers_lowest_hole() {
        let mut pool = MemoryPool::new(30);
        pool.allocate_first_fit(10);
        pool.allocate_first_fit(10);
        pool.allocate_first_fit(10);

        pool.release(0, 5);
        pool.release(20, 10);

        // Lowest hole that fits wins, not the tightest
        assert_eq!(pool.allocate_first_fit(4), Some(0));
        assert_eq!(pool.allocate_first_fit(4), Some(20));
    }

    #[test]
    fn test_allocation_failure_leaves_pool_untouched() {
        let mut pool = MemoryPool::new(100);
        pool.allocate_first_fit(90);
        let before = pool.clone();

        assert_eq!(pool.allocate_first_fit(50), None);
        assert_eq!(pool, before);
    }

    #[test]
    fn test_oversized_and_zero_requests() {
        let mut pool = MemoryPool::new(10);
        assert_eq!(pool.allocate_first_fit(11), None);
        assert_eq!(pool.allocate_first_fit(0), None);
        assert_eq!(pool.allocate_first_fit(10), Some(0));
    }

    #[test]
    fn test_release_clamps_to_pool_end() {
        let mut pool = MemoryPool::new(10);
        pool.allocate_first_fit(10);

        assert_eq!(pool.release(8, 50), 2);
        assert_eq!(pool.release(12, 3), 0);
        assert_eq!(pool.to_bit_string(), "1111111100");
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut pool = MemoryPool::new(10);
        pool.allocate_first_fit(4);
        assert_eq!(pool.release(0, 4), 4);
        let snapshot = pool.clone();

        assert_eq!(pool.release(0, 4), 0);
        assert_eq!(pool, snapshot);
    }

    #[test]
    fn test_free_runs() {
        let mut pool = MemoryPool::new(12);
        pool.allocate_first_fit(12);
        pool.release(1, 2);
        pool.release(6, 4);

        assert_eq!(pool.free_runs(), vec![2, 4]);
        assert_eq!(pool.largest_free_run(), 4);
    }
}
