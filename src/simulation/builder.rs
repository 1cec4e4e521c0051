/*!
 * Simulation Builder
 * Builder pattern for Simulation construction
 */

use super::{Phase, Simulation};
use crate::core::errors::SimResult;
use crate::core::SimConfig;
use crate::memory::MemoryAllocator;
use crate::monitoring::Collector;
use crate::process::{IoCollaborator, ProcessRegistry, Sleeper, ThreadSleeper};
use crate::scheduler::Scheduler;
use std::sync::Arc;
use tracing::info;

/// Builder for Simulation
pub struct SimulationBuilder<S: Sleeper = ThreadSleeper> {
    config: SimConfig,
    collector: Option<Arc<Collector>>,
    sleeper: S,
}

impl SimulationBuilder<ThreadSleeper> {
    /// Create a new builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
            collector: None,
            sleeper: ThreadSleeper,
        }
    }
}

impl Default for SimulationBuilder<ThreadSleeper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sleeper> SimulationBuilder<S> {
    /// Use a specific configuration
    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing event collector
    pub fn with_collector(mut self, collector: Arc<Collector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Replace the source of the I/O pause
    pub fn with_sleeper<T: Sleeper>(self, sleeper: T) -> SimulationBuilder<T> {
        SimulationBuilder {
            config: self.config,
            collector: self.collector,
            sleeper,
        }
    }

    /// Validate the configuration and wire the subsystems together
    pub fn build(self) -> SimResult<Simulation<S>> {
        self.config.validate()?;

        let collector = self.collector.unwrap_or_else(|| Arc::new(Collector::new()));
        let allocator =
            MemoryAllocator::new(self.config.pool_size).with_collector(Arc::clone(&collector));
        let scheduler = Scheduler::new(self.config.quantum)?.with_collector(Arc::clone(&collector));
        let io = IoCollaborator::with_sleeper(self.config.io_delay(), self.sleeper)
            .with_collector(Arc::clone(&collector));

        info!(
            pool_size = self.config.pool_size,
            quantum = self.config.quantum,
            roster = self.config.roster.len(),
            "Simulation built"
        );

        Ok(Simulation {
            config: self.config,
            registry: ProcessRegistry::new(),
            allocator,
            scheduler,
            io,
            collector,
            phase: Phase::Setup,
            allocation_done: false,
        })
    }
}
