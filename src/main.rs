/*!
 * Round-Robin Simulator - Main Entry Point
 *
 * Runs the classic demo:
 * - Admit the roster and allocate memory first-fit
 * - Put one process through a blocking I/O cycle
 * - Schedule round-robin until every process is done
 *
 * Reports go to stdout, structured logs to stderr.
 */

use miette::{IntoDiagnostic, Result};
use rr_sim_kernel::core::types::OwnedRange;
use rr_sim_kernel::{
    init_tracing, render_memory_map, render_process_table, MemoryPool, Process, ProcessRegistry,
    QuantumOutcome, RoundReport, RunSpan, SchedulerHook, SimConfig, SimError, Simulation,
};
use std::io::Write;
use tracing::info;

/// Prints the tables after every state change
///
/// Hook callbacks cannot return errors, so the first failed write is kept and
/// later output is skipped; `finish` reports it.
struct ConsoleReporter<W: Write> {
    out: W,
    failed: Option<std::io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    fn new(out: W) -> Self {
        Self { out, failed: None }
    }

    fn print(&mut self, text: &str) {
        if self.failed.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", text) {
            self.failed = Some(e);
        }
    }

    fn finish(mut self) -> std::io::Result<()> {
        match self.failed.take() {
            Some(e) => Err(e),
            None => self.out.flush(),
        }
    }
}

impl<W: Write> SchedulerHook for ConsoleReporter<W> {
    fn on_quantum(&mut self, process: &Process, outcome: &QuantumOutcome) {
        self.print(&format!("Running process {}...", process.id));
        match outcome {
            QuantumOutcome::Terminated { .. } => {
                self.print(&format!("Process {} terminated.", process.id))
            }
            QuantumOutcome::Continued { before, remaining } => self.print(&format!(
                "Process {} executed for {} units.",
                process.id,
                before - remaining
            )),
        }
    }

    fn on_memory_released(&mut self, process: &Process, _range: OwnedRange, pool: &MemoryPool) {
        self.print(&format!("Memory released for process {}.", process.id));
        self.print(&render_memory_map(pool));
    }

    fn on_round_complete(&mut self, _report: &RoundReport, registry: &ProcessRegistry) {
        self.print(&render_process_table(registry.iter()));
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = SimConfig::from_env().map_err(SimError::from)?;
    let span = RunSpan::new(config.pool_size, config.quantum);
    let _entered = span.enter();
    info!(run_id = span.run_id(), "Simulator starting");

    let io_pid = config.io_pid;
    let mut simulation = Simulation::builder().with_config(config).build()?;
    let mut reporter = ConsoleReporter::new(std::io::stdout().lock());

    simulation.admit_roster()?;
    reporter.print(&render_memory_map(simulation.allocator().pool()));

    for outcome in simulation.allocate_all()? {
        match outcome.result {
            Ok(start) => reporter.print(&format!(
                "Memory allocated for process {} at block {}.",
                outcome.pid, start
            )),
            Err(_) => reporter.print(&format!(
                "Memory allocation failed for process {}!",
                outcome.pid
            )),
        }
    }
    reporter.print(&render_memory_map(simulation.allocator().pool()));
    reporter.print(&render_process_table(simulation.registry().iter()));

    if let Some(pid) = io_pid {
        reporter.print(&format!("Process {} performing I/O...", pid));
        simulation.perform_io(pid, |registry| {
            reporter.print(&render_process_table(registry.iter()));
        })?;
        reporter.print(&format!("Process {} completed I/O.", pid));
    }

    let stats = simulation.run(&mut reporter)?;
    info!(
        rounds = stats.rounds,
        terminations = stats.terminations,
        releases = stats.releases,
        stranded = stats.stranded.len(),
        "Simulation complete"
    );

    if std::env::var("SIM_SNAPSHOT").map(|v| v == "1").unwrap_or(false) {
        let json = simulation.snapshot_json()?;
        reporter.print(&json);
    }

    reporter.finish().into_diagnostic()
}
