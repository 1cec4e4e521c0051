/*!
 * Scheduler Core Operations
 * Single rounds and the run-to-completion loop
 */

use super::traits::SchedulerHook;
use super::types::{Dispatch, RoundReport, SchedulerStats};
use super::Scheduler;
use crate::core::types::Pid;
use crate::memory::Allocator;
use crate::monitoring::{Category, Event, Payload, Severity};
use crate::process::ProcessRegistry;
use tracing::{debug, error, info, warn};

impl Scheduler {
    /// Run one round: a quantum for every Ready process, in registration order,
    /// followed by one tick of the timed waits.
    pub fn run_round<A, H>(
        &mut self,
        registry: &mut ProcessRegistry,
        allocator: &mut A,
        hook: &mut H,
    ) -> RoundReport
    where
        A: Allocator + ?Sized,
        H: SchedulerHook + ?Sized,
    {
        self.round += 1;
        let round = self.round;
        let mut report = RoundReport::new(round);

        for pid in registry.pids() {
            if !registry.get(pid).is_some_and(|p| p.is_ready()) {
                continue;
            }

            debug!(pid, round, "Running process");
            let outcome = match registry.run_quantum(pid, self.quantum) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(pid, round, error = %e, "Quantum could not be granted");
                    continue;
                }
            };

            self.stats.quanta_granted += 1;
            report.dispatched.push(Dispatch {
                pid,
                before: outcome.before(),
                after: outcome.remaining(),
            });
            self.emit(
                Event::new(
                    Severity::Debug,
                    Category::Scheduler,
                    Payload::QuantumGranted {
                        round,
                        before: outcome.before(),
                        after: outcome.remaining(),
                    },
                )
                .with_pid(pid),
            );
            if let Some(process) = registry.get(pid) {
                hook.on_quantum(process, &outcome);
            }

            if outcome.is_terminated() {
                info!(pid, round, "Process terminated");
                self.stats.terminations += 1;
                report.terminated.push(pid);
                self.emit(
                    Event::new(
                        Severity::Info,
                        Category::Process,
                        Payload::ProcessTerminated { round },
                    )
                    .with_pid(pid),
                );
                self.release_memory(pid, registry, allocator, hook, &mut report);
            } else {
                info!(
                    pid,
                    round,
                    executed = self.quantum,
                    remaining = outcome.remaining(),
                    "Process executed"
                );
            }
        }

        report.woken = registry.tick_waiters();
        for &pid in &report.woken {
            info!(pid, round, "Process woke from timed wait");
            self.emit(
                Event::new(
                    Severity::Info,
                    Category::Scheduler,
                    Payload::ProcessWoken { round },
                )
                .with_pid(pid),
            );
        }

        if report.is_productive() {
            self.stats.rounds += 1;
        } else {
            self.stats.idle_rounds += 1;
        }
        self.emit(Event::new(
            Severity::Debug,
            Category::Scheduler,
            Payload::RoundCompleted {
                round,
                dispatched: report.dispatched.len(),
            },
        ));

        hook.on_round_complete(&report, registry);
        report
    }

    /// Run rounds until nothing is Ready, nobody woke and no timed wait remains.
    ///
    /// Processes left Waiting on an indefinite wait are reported as stranded.
    pub fn run<A, H>(
        &mut self,
        registry: &mut ProcessRegistry,
        allocator: &mut A,
        hook: &mut H,
    ) -> SchedulerStats
    where
        A: Allocator + ?Sized,
        H: SchedulerHook + ?Sized,
    {
        info!(
            quantum = self.quantum,
            processes = registry.len(),
            "Round-robin scheduling started"
        );

        loop {
            let report = self.run_round(registry, allocator, hook);
            if !report.is_productive() && report.woken.is_empty() && !registry.has_timed_waiters()
            {
                break;
            }
        }

        let stranded = registry.waiting_pids();
        for &pid in &stranded {
            warn!(pid, "Process left waiting with nothing to wake it");
            self.emit(
                Event::new(Severity::Warn, Category::Scheduler, Payload::ProcessStranded)
                    .with_pid(pid),
            );
        }
        self.stats.stranded = stranded;

        info!(
            rounds = self.stats.rounds,
            idle_rounds = self.stats.idle_rounds,
            terminations = self.stats.terminations,
            "Round-robin scheduling finished"
        );
        self.stats()
    }

    fn release_memory<A, H>(
        &mut self,
        pid: Pid,
        registry: &mut ProcessRegistry,
        allocator: &mut A,
        hook: &mut H,
        report: &mut RoundReport,
    ) where
        A: Allocator + ?Sized,
        H: SchedulerHook + ?Sized,
    {
        let range = match registry.get(pid).and_then(|p| p.owned_range()) {
            Some(range) => range,
            None => return,
        };

        // The registry keeps its record until the allocator accepts the release
        match allocator.release(pid, range.start, range.length) {
            Ok(freed) => {
                if let Err(e) = registry.take_memory(pid) {
                    error!(pid, error = %e, "Could not clear memory ownership");
                }
                info!(pid, range = %range, freed, "Memory released");
                self.stats.releases += 1;
                report.released.push((pid, range));
                if let Some(process) = registry.get(pid) {
                    hook.on_memory_released(process, range, allocator.pool());
                }
            }
            Err(e) => {
                error!(pid, range = %range, error = %e, "Memory release rejected");
                self.stats.release_failures += 1;
                debug_assert!(false, "memory release rejected for process {pid}: {e}");
            }
        }
    }

    fn emit(&self, event: Event) {
        if let Some(ref collector) = self.collector {
            collector.emit(event);
        }
    }
}
