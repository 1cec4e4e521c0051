/*!
 * Monitoring
 * Tracing setup and structured simulation events
 */

mod collector;
mod events;
mod tracer;

pub use collector::Collector;
pub use events::{Category, Event, EventFilter, Payload, Severity};
pub use tracer::{generate_run_id, init_tracing, RunSpan};
