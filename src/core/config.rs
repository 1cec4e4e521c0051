/*!
 * Simulation Configuration
 *
 * Defaults reproduce the classic three-process demo. Every field can be
 * overridden from the environment:
 *
 * - `SIM_POOL_SIZE`: number of memory blocks
 * - `SIM_QUANTUM`: CPU units per round
 * - `SIM_IO_DELAY_MS`: length of the simulated I/O pause
 * - `SIM_IO_PID`: process that performs I/O before scheduling (`none` disables it)
 * - `SIM_ROSTER`: path to a JSON array of process specs
 */

use super::limits::{DEFAULT_IO_DELAY_MS, DEFAULT_IO_PID, DEFAULT_POOL_SIZE, DEFAULT_QUANTUM};
use super::types::{Burst, Pid, Size};
use crate::process::ProcessSpec;
use ahash::RandomState;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("pool_size must be greater than zero")]
    EmptyPool,

    #[error("quantum must be greater than zero")]
    ZeroQuantum,

    #[error("roster is empty")]
    EmptyRoster,

    #[error("roster entry {0} requires zero memory blocks")]
    ZeroMemory(Pid),

    #[error("roster contains process {0} more than once")]
    DuplicatePid(Pid),

    #[error("I/O process {0} is not in the roster")]
    UnknownIoPid(Pid),

    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: String, value: String },

    #[error("could not read roster file {path}: {reason}")]
    RosterFile { path: PathBuf, reason: String },
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimConfig {
    pub pool_size: Size,
    pub quantum: Burst,
    pub io_delay_ms: u64,
    pub io_pid: Option<Pid>,
    pub roster: Vec<ProcessSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            quantum: DEFAULT_QUANTUM,
            io_delay_ms: DEFAULT_IO_DELAY_MS,
            io_pid: Some(DEFAULT_IO_PID),
            roster: default_roster(),
        }
    }
}

/// The compiled-in demo roster
pub fn default_roster() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new(1, 10, 1, 20),
        ProcessSpec::new(2, 15, 2, 30),
        ProcessSpec::new(3, 8, 3, 40),
    ]
}

impl SimConfig {
    /// Defaults overridden by any `SIM_*` variables present
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = env_var("SIM_POOL_SIZE") {
            config.pool_size = parse_env("SIM_POOL_SIZE", &value)?;
        }
        if let Some(value) = env_var("SIM_QUANTUM") {
            config.quantum = parse_env("SIM_QUANTUM", &value)?;
        }
        if let Some(value) = env_var("SIM_IO_DELAY_MS") {
            config.io_delay_ms = parse_env("SIM_IO_DELAY_MS", &value)?;
        }
        if let Some(value) = env_var("SIM_IO_PID") {
            config.io_pid = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_env("SIM_IO_PID", &value)?)
            };
        }
        if let Some(path) = env_var("SIM_ROSTER") {
            config.roster = load_roster(Path::new(&path))?;
        }

        config.validate()?;
        info!(
            "Config loaded: pool_size={}, quantum={}, io_delay_ms={}, io_pid={:?}, processes={}",
            config.pool_size,
            config.quantum,
            config.io_delay_ms,
            config.io_pid,
            config.roster.len()
        );
        Ok(config)
    }

    pub fn with_pool_size(mut self, pool_size: Size) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_quantum(mut self, quantum: Burst) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_io_delay(mut self, delay: Duration) -> Self {
        self.io_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_io_pid(mut self, io_pid: Option<Pid>) -> Self {
        self.io_pid = io_pid;
        self
    }

    pub fn with_roster(mut self, roster: Vec<ProcessSpec>) -> Self {
        self.roster = roster;
        self
    }

    pub fn io_delay(&self) -> Duration {
        Duration::from_millis(self.io_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        if self.roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let mut seen: HashSet<Pid, RandomState> = HashSet::with_hasher(RandomState::new());
        for spec in &self.roster {
            if spec.memory_required == 0 {
                return Err(ConfigError::ZeroMemory(spec.id));
            }
            if !seen.insert(spec.id) {
                return Err(ConfigError::DuplicatePid(spec.id));
            }
        }

        if let Some(pid) = self.io_pid {
            if !seen.contains(&pid) {
                return Err(ConfigError::UnknownIoPid(pid));
            }
        }
        Ok(())
    }
}

/// Read a JSON array of process specs
pub fn load_roster(path: &Path) -> Result<Vec<ProcessSpec>, ConfigError> {
    let roster_error = |reason: String| ConfigError::RosterFile {
        path: path.to_path_buf(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| roster_error(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| roster_error(e.to_string()))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name: name.to_string(),
        value: value.to_string(),
    })
}
