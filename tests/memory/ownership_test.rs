/*!
 * Ownership Record Tests
 * Checked release against the per-process allocation record
 */

use pretty_assertions::assert_eq;
use rr_sim_kernel::core::types::OwnedRange;
use rr_sim_kernel::memory::{Allocation, MemoryAllocator, MemoryError, MemoryInfo, MemoryPressure};

#[test]
fn test_release_requires_exact_owned_range() {
    let mut allocator = MemoryAllocator::new(100);
    allocator.allocate(1, 20).unwrap();

    // Shorter range than the one recorded
    let err = allocator.release(1, 0, 10).unwrap_err();
    assert_eq!(
        err,
        MemoryError::OwnershipViolation {
            pid: 1,
            requested: OwnedRange::new(0, 10),
            owned: Some(OwnedRange::new(0, 20)),
        }
    );
    assert_eq!(allocator.pool().used(), 20);

    assert_eq!(allocator.release(1, 0, 20), Ok(20));
    assert_eq!(allocator.pool().used(), 0);
}

#[test]
fn test_process_cannot_free_someone_elses_blocks() {
    let mut allocator = MemoryAllocator::new(100);
    allocator.allocate(1, 20).unwrap();
    allocator.allocate(2, 30).unwrap();

    // PID 3 owns nothing, and the range is live
    assert!(matches!(
        allocator.release(3, 20, 30),
        Err(MemoryError::OwnershipViolation { pid: 3, owned: None, .. })
    ));
    assert_eq!(allocator.owner_of(20), Some(2));
}

#[test]
fn test_double_release_is_a_noop() {
    let mut allocator = MemoryAllocator::new(100);
    allocator.allocate(1, 20).unwrap();
    allocator.allocate(2, 30).unwrap();

    assert_eq!(allocator.release(2, 20, 30), Ok(30));
    let pool = allocator.pool().clone();

    assert_eq!(allocator.release(2, 20, 30), Ok(0));
    assert_eq!(allocator.pool(), &pool);
}

#[test]
fn test_allocations_sorted_by_start() {
    let mut allocator = MemoryAllocator::new(100);
    allocator.allocate(7, 10).unwrap();
    allocator.allocate(3, 10).unwrap();
    allocator.allocate(5, 10).unwrap();

    let pids: Vec<_> = allocator.allocations().iter().map(|a| a.pid).collect();
    assert_eq!(pids, vec![7, 3, 5]);
    assert_eq!(
        allocator.allocations()[1],
        Allocation {
            pid: 3,
            range: OwnedRange::new(10, 10)
        }
    );
}

#[test]
fn test_pressure_through_info_trait() {
    let mut allocator = MemoryAllocator::new(100);
    assert_eq!(allocator.pressure(), MemoryPressure::Low);

    allocator.allocate(1, 85).unwrap();
    assert_eq!(allocator.pressure(), MemoryPressure::High);

    allocator.allocate(2, 15).unwrap();
    assert_eq!(allocator.pressure(), MemoryPressure::Critical);
}
