/*!
 * Memory Module
 *
 * Contiguous-block memory management for simulated processes.
 *
 * ## Allocation
 *
 * The pool is a fixed-length bitmap of blocks. Allocation is pure **first-fit**:
 * the scan runs left to right and the lowest starting index with enough free
 * blocks wins. This is deterministic and O(pool size) per request, at the cost
 * of fragmentation.
 *
 * ## Ownership
 *
 * The allocator keeps a record of which pid owns which range. Releases are
 * checked against that record, so a process can never free blocks it does not
 * own. Releasing an already-free, unrecorded range is a no-op.
 */

pub mod allocator;
pub mod pool;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use allocator::MemoryAllocator;
pub use pool::MemoryPool;
pub use traits::*;
pub use types::*;
