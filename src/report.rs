/*!
 * Console Reports
 * Text rendering of the process table and the memory map
 */

use crate::memory::MemoryPool;
use crate::process::{Process, ProcessState};
use std::fmt::Write;

const TABLE_HEADER: &str = "ID      State           Burst Time      Priority    Memory";
const TABLE_RULE: &str = "--------------------------------------------------------------";

/// Render the process table, one row per process in the given order.
///
/// Burst time shows `-` once a process has terminated; memory always shows the
/// static requirement, whether or not the allocation succeeded.
pub fn render_process_table<'a, I>(processes: I) -> String
where
    I: IntoIterator<Item = &'a Process>,
{
    let mut out = String::new();
    out.push_str(TABLE_HEADER);
    out.push('\n');
    out.push_str(TABLE_RULE);
    out.push('\n');

    for process in processes {
        let burst = if process.state == ProcessState::Terminated {
            "-".to_string()
        } else {
            process.remaining_burst.to_string()
        };
        // Writing into a String can't fail
        let _ = writeln!(
            out,
            "{:<8}{:<16}{:<16}{:<12}{}KB",
            process.id,
            process.state.as_str(),
            burst,
            process.priority,
            process.memory_required
        );
    }
    out
}

/// Render the pool as `Memory Blocks:` followed by one digit per block
pub fn render_memory_map(pool: &MemoryPool) -> String {
    format!("Memory Blocks:\n{}\n", pool.to_bit_string())
}
