/*!
 * Process Module
 * Process records, the registry that owns them, and the I/O collaborator
 */

pub mod io;
pub mod registry;
pub mod types;
mod validation;

// Re-export for convenience
pub use io::{IoCollaborator, Sleeper, ThreadSleeper};
pub use registry::ProcessRegistry;
pub use types::*;
