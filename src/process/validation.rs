/*!
 * Process Validation
 * Admission and state-transition checks
 */

use super::types::{ProcessError, ProcessResult, ProcessSpec, ProcessState};
use crate::core::types::Pid;

/// Validate a process spec before admission
pub(super) fn validate_spec(spec: &ProcessSpec) -> ProcessResult<()> {
    if spec.memory_required == 0 {
        return Err(ProcessError::InvalidMemoryRequirement(spec.id));
    }
    Ok(())
}

/// Validate a state change against the transition table
pub(super) fn validate_transition(
    pid: Pid,
    from: ProcessState,
    to: ProcessState,
) -> ProcessResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(ProcessError::InvalidStateTransition { pid, from, to })
    }
}
