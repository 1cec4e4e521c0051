/*!
 * I/O Collaborator
 * Blocking Ready -> Waiting -> Ready toggle around a simulated device delay
 */

use super::registry::ProcessRegistry;
use super::types::{ProcessError, ProcessResult, ProcessState};
use crate::core::types::Pid;
use crate::monitoring::{Category, Collector, Event, Payload, Severity};
use log::info;
use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;

/// Source of the artificial I/O pause
#[cfg_attr(test, mockall::automock)]
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Single-shot I/O simulation for one process at a time
pub struct IoCollaborator<S: Sleeper = ThreadSleeper> {
    delay: Duration,
    sleeper: S,
    busy: Cell<Option<Pid>>,
    collector: Option<Arc<Collector>>,
}

impl IoCollaborator<ThreadSleeper> {
    pub fn new(delay: Duration) -> Self {
        Self::with_sleeper(delay, ThreadSleeper)
    }
}

impl<S: Sleeper> IoCollaborator<S> {
    pub fn with_sleeper(delay: Duration, sleeper: S) -> Self {
        Self {
            delay,
            sleeper,
            busy: Cell::new(None),
            collector: None,
        }
    }

    /// Add observability collector
    pub fn with_collector(mut self, collector: Arc<Collector>) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run the I/O for `pid`.
    ///
    /// `on_waiting` sees the registry while the process is Waiting, before the
    /// delay starts. The process is Ready again when this returns `Ok`.
    pub fn perform<F>(
        &self,
        registry: &mut ProcessRegistry,
        pid: Pid,
        on_waiting: F,
    ) -> ProcessResult<()>
    where
        F: FnOnce(&ProcessRegistry),
    {
        if let Some(active) = self.busy.get() {
            return Err(ProcessError::IoBusy(active));
        }

        registry.transition(pid, ProcessState::Waiting)?;
        self.busy.set(Some(pid));
        info!("Process {} performing I/O ({:?})", pid, self.delay);
        self.emit(
            Event::new(
                Severity::Info,
                Category::Io,
                Payload::IoStarted {
                    delay_ms: self.delay.as_millis() as u64,
                },
            )
            .with_pid(pid),
        );

        on_waiting(registry);
        self.sleeper.sleep(self.delay);

        let result = registry.transition(pid, ProcessState::Ready);
        self.busy.set(None);
        result?;

        info!("Process {} completed I/O", pid);
        self.emit(Event::new(Severity::Info, Category::Io, Payload::IoCompleted).with_pid(pid));
        Ok(())
    }

    fn emit(&self, event: Event) {
        if let Some(ref collector) = self.collector {
            collector.emit(event);
        }
    }
}
