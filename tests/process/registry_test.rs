/*!
 * Process Registry Tests
 * Admission, state machine and memory bookkeeping
 */

use pretty_assertions::assert_eq;
use rr_sim_kernel::core::types::OwnedRange;
use rr_sim_kernel::{
    ProcessError, ProcessRegistry, ProcessSpec, ProcessState, QuantumOutcome, WaitCondition,
};

fn demo_registry() -> ProcessRegistry {
    let mut registry = ProcessRegistry::new();
    registry.register(&ProcessSpec::new(1, 10, 1, 20)).unwrap();
    registry.register(&ProcessSpec::new(2, 15, 2, 30)).unwrap();
    registry.register(&ProcessSpec::new(3, 8, 3, 40)).unwrap();
    registry
}

#[test]
fn test_new_processes_are_ready_without_memory() {
    let registry = demo_registry();

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.pids(), vec![1, 2, 3]);
    for process in registry.iter() {
        assert_eq!(process.state, ProcessState::Ready);
        assert_eq!(process.memory_start, None);
    }
    assert_eq!(registry.get(2).unwrap().remaining_burst, 15);
    assert_eq!(registry.get(3).unwrap().priority, 3);
}

#[test]
fn test_duplicate_and_zero_memory_rejected() {
    let mut registry = demo_registry();

    assert_eq!(
        registry.register(&ProcessSpec::new(2, 1, 1, 1)),
        Err(ProcessError::DuplicateProcess(2))
    );
    assert_eq!(
        registry.register(&ProcessSpec::new(4, 1, 1, 0)),
        Err(ProcessError::InvalidMemoryRequirement(4))
    );
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_terminated_process_cannot_be_revived() {
    let mut registry = demo_registry();
    registry.run_quantum(3, 8).unwrap();

    for to in [ProcessState::Ready, ProcessState::Waiting] {
        assert!(matches!(
            registry.transition(3, to),
            Err(ProcessError::InvalidStateTransition {
                pid: 3,
                from: ProcessState::Terminated,
                ..
            })
        ));
    }
    assert!(registry.run_quantum(3, 3).is_err());
}

#[test]
fn test_waiting_process_is_not_runnable() {
    let mut registry = demo_registry();
    registry.block(2, WaitCondition::Indefinite).unwrap();

    assert!(registry.run_quantum(2, 3).is_err());
    assert_eq!(registry.get(2).unwrap().remaining_burst, 15);
    assert_eq!(registry.waiting_pids(), vec![2]);
    assert!(!registry.has_timed_waiters());
}

#[test]
fn test_quantum_terminates_in_same_step() {
    let mut registry = demo_registry();

    assert_eq!(
        registry.run_quantum(1, 3),
        Ok(QuantumOutcome::Continued {
            before: 10,
            remaining: 7
        })
    );
    registry.run_quantum(1, 3).unwrap();
    registry.run_quantum(1, 3).unwrap();

    let last = registry.run_quantum(1, 3).unwrap();
    assert_eq!(last, QuantumOutcome::Terminated { before: 1 });
    let process = registry.get(1).unwrap();
    assert_eq!(process.remaining_burst, 0);
    assert_eq!(process.state, ProcessState::Terminated);
}

#[test]
fn test_timed_wait_wakes_after_rounds() {
    let mut registry = demo_registry();
    registry.block(1, WaitCondition::Rounds(2)).unwrap();
    assert!(registry.has_timed_waiters());

    assert!(registry.tick_waiters().is_empty());
    assert_eq!(registry.tick_waiters(), vec![1]);
    assert_eq!(registry.get(1).unwrap().state, ProcessState::Ready);
    assert_eq!(registry.get(1).unwrap().wake_after_rounds, None);
}

#[test]
fn test_memory_is_taken_only_once() {
    let mut registry = demo_registry();
    registry.assign_memory(2, 20).unwrap();

    assert!(matches!(
        registry.assign_memory(2, 50),
        Err(ProcessError::MemoryAlreadyAssigned { pid: 2, start: 20 })
    ));
    assert_eq!(registry.take_memory(2), Ok(Some(OwnedRange::new(20, 30))));
    assert_eq!(registry.take_memory(2), Ok(None));
    assert_eq!(registry.take_memory(9), Err(ProcessError::ProcessNotFound(9)));
}
