/*!
 * System Limits and Constants
 *
 * Centralized location for the simulator's default sizes and thresholds.
 * Every value here can be overridden through `SimConfig`.
 */

// =============================================================================
// MEMORY
// =============================================================================

/// Default number of blocks in the memory pool
pub const DEFAULT_POOL_SIZE: usize = 100;

/// Usage ratio at which allocations start logging pressure
pub const MEDIUM_PRESSURE_RATIO: f64 = 0.60;

/// Usage ratio reported as high pressure
pub const HIGH_PRESSURE_RATIO: f64 = 0.80;

/// Usage ratio reported as critical pressure
pub const CRITICAL_PRESSURE_RATIO: f64 = 0.95;

// =============================================================================
// SCHEDULING
// =============================================================================

/// CPU units granted to a Ready process per round
pub const DEFAULT_QUANTUM: u32 = 3;

// =============================================================================
// I/O
// =============================================================================

/// Simulated I/O delay in milliseconds
pub const DEFAULT_IO_DELAY_MS: u64 = 2_000;

/// Process that performs the pre-scheduling I/O in the default roster
pub const DEFAULT_IO_PID: u32 = 2;

// =============================================================================
// MONITORING
// =============================================================================

/// Events retained by the collector before the oldest are dropped
pub const EVENT_BUFFER_CAPACITY: usize = 4_096;
