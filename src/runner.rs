//! The add-then-search round trip.

use std::io::Write;

use crate::errors::Error;
use crate::memory::Memory;
use crate::output::{format_top_memories, to_compact_json, to_pretty_json};

/// Message written by the round trip.
pub const TEST_MESSAGE: &str = "My name is Alice and I am building a SaaS startup.";
/// Query issued after the write.
pub const TEST_QUERY: &str = "What is my name?";
/// Number of memories requested from the search.
pub const SEARCH_LIMIT: usize = 5;

/// Run one `add` and one `search` for `user_id`, writing progress and results to `out`.
///
/// # Errors
///
/// Returns the first error from either call, or from writing to `out`.
pub fn run_round_trip(memory: &mut Memory, user_id: &str, out: &mut dyn Write) -> Result<(), Error> {
    writeln!(out, "[memory] Adding memory for user_id={user_id:?}: {TEST_MESSAGE}")?;
    let add_result = memory.add(TEST_MESSAGE, user_id)?;
    writeln!(out, "[memory] Add result: {}", to_compact_json(&add_result)?)?;

    writeln!(out, "[memory] Searching memories with query: {TEST_QUERY:?}")?;
    let search_result = memory.search(TEST_QUERY, user_id, SEARCH_LIMIT)?;

    writeln!(out, "[memory] Search raw result:")?;
    writeln!(out, "{}", to_pretty_json(&search_result)?)?;

    writeln!(out, "\n[memory] Top memories:")?;
    for line in format_top_memories(&search_result.results) {
        writeln!(out, "{line}")?;
    }

    Ok(())
}
