/*!
 * I/O Collaborator Tests
 * Ready -> Waiting -> Ready toggle with the real thread sleeper
 */

use pretty_assertions::assert_eq;
use rr_sim_kernel::{IoCollaborator, ProcessError, ProcessRegistry, ProcessSpec, ProcessState};
use std::time::{Duration, Instant};

fn registry() -> ProcessRegistry {
    let mut registry = ProcessRegistry::new();
    registry.register(&ProcessSpec::new(1, 10, 1, 20)).unwrap();
    registry.register(&ProcessSpec::new(2, 15, 2, 30)).unwrap();
    registry
}

#[test]
fn test_io_leaves_only_target_waiting_mid_cycle() {
    let io = IoCollaborator::new(Duration::ZERO);
    let mut registry = registry();
    let mut during = Vec::new();

    io.perform(&mut registry, 2, |r| {
        during = r.iter().map(|p| (p.id, p.state)).collect();
    })
    .unwrap();

    assert_eq!(
        during,
        vec![(1, ProcessState::Ready), (2, ProcessState::Waiting)]
    );
    assert_eq!(registry.get(2).unwrap().state, ProcessState::Ready);
    assert_eq!(registry.get(2).unwrap().remaining_burst, 15);
}

#[test]
fn test_io_blocks_for_configured_delay() {
    let delay = Duration::from_millis(20);
    let io = IoCollaborator::new(delay);
    let mut registry = registry();

    let started = Instant::now();
    io.perform(&mut registry, 1, |_| {}).unwrap();

    assert!(started.elapsed() >= delay);
    assert_eq!(io.delay(), delay);
}

#[test]
fn test_io_on_unknown_or_terminated_process() {
    let io = IoCollaborator::new(Duration::ZERO);
    let mut registry = registry();

    assert_eq!(
        io.perform(&mut registry, 7, |_| {}),
        Err(ProcessError::ProcessNotFound(7))
    );

    registry.run_quantum(1, 10).unwrap();
    assert!(matches!(
        io.perform(&mut registry, 1, |_| {}),
        Err(ProcessError::InvalidStateTransition { pid: 1, .. })
    ));

    // A failed attempt does not leave the device busy
    io.perform(&mut registry, 2, |_| {}).unwrap();
}
