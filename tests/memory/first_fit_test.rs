/*!
 * First-Fit Allocation Tests
 * Placement, failure and reuse behaviour of the block pool
 */

use pretty_assertions::assert_eq;
use rr_sim_kernel::memory::{MemoryAllocator, MemoryError, MemoryPool};

#[test]
fn test_sequential_requests_pack_from_zero() {
    let mut allocator = MemoryAllocator::new(100);

    assert_eq!(allocator.allocate(1, 20), Ok(0));
    assert_eq!(allocator.allocate(2, 30), Ok(20));
    assert_eq!(allocator.allocate(3, 40), Ok(50));

    let stats = allocator.stats();
    assert_eq!(stats.used_blocks, 90);
    assert_eq!(stats.free_blocks, 10);
    assert_eq!(stats.largest_free_run, 10);
    assert!(allocator.pool().is_range_free(90, 10));
    assert!(allocator.pool().is_range_allocated(0, 90));
}

#[test]
fn test_request_larger_than_free_tail_fails_cleanly() {
    let mut allocator = MemoryAllocator::new(100);
    allocator.allocate(1, 20).unwrap();
    allocator.allocate(2, 30).unwrap();
    allocator.allocate(3, 40).unwrap();
    let before = allocator.pool().clone();

    let err = allocator.allocate(4, 50).unwrap_err();

    assert!(matches!(
        err,
        MemoryError::NoSpace {
            pid: 4,
            requested: 50,
            largest_free: 10,
            ..
        }
    ));
    assert_eq!(allocator.pool(), &before);
    assert_eq!(allocator.owned_range(4), None);
}

#[test]
fn test_request_larger_than_pool() {
    let mut allocator = MemoryAllocator::new(10);
    assert!(matches!(
        allocator.allocate(1, 11),
        Err(MemoryError::NoSpace { .. })
    ));
    assert_eq!(allocator.pool().used(), 0);
}

#[test]
fn test_release_then_same_size_reuses_start() {
    let mut allocator = MemoryAllocator::new(100);
    allocator.allocate(1, 20).unwrap();
    let start = allocator.allocate(2, 30).unwrap();
    allocator.allocate(3, 40).unwrap();

    allocator.release(2, start, 30).unwrap();
    assert_eq!(allocator.allocate(5, 30), Ok(start));
}

#[test]
fn test_fragmentation_is_first_fit_not_best_fit() {
    let mut allocator = MemoryAllocator::new(100);
    allocator.allocate(1, 30).unwrap(); // [0..30)
    allocator.allocate(2, 10).unwrap(); // [30..40)
    allocator.allocate(3, 5).unwrap(); // [40..45)
    allocator.allocate(4, 55).unwrap(); // [45..100)

    allocator.release_process(1).unwrap();
    allocator.release_process(3).unwrap();

    // A best-fit allocator would pick the 5-block hole at 40
    assert_eq!(allocator.allocate(5, 5), Ok(0));

    let stats = allocator.stats();
    assert_eq!(stats.free_fragments, 2);
    assert!(stats.is_fragmented());
}

#[test]
fn test_pool_release_is_idempotent() {
    let mut pool = MemoryPool::new(100);
    let start = pool.allocate_first_fit(40).unwrap();
    pool.release(start, 40);
    let once = pool.clone();

    pool.release(start, 40);
    assert_eq!(pool, once);
    assert_eq!(pool.to_bit_string(), "0".repeat(100));
}
