/*!
 * Core Module
 * Fundamental types, defaults, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::{default_roster, load_roster, ConfigError, SimConfig};
pub use errors::*;
pub use types::*;
