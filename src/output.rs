//! Formatting of round-trip results for the terminal.

use serde::Serialize;

use crate::errors::Error;
use crate::memory_types::MemoryItem;

/// Render a value as pretty JSON.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render a value as single-line JSON.
pub fn to_compact_json<T: Serialize>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string(value)?)
}

/// One display line per search hit, numbered from 1.
///
/// Scores and texts are printed exactly as they appear in the result; a
/// missing value prints as `None`.
pub fn format_top_memories(results: &[MemoryItem]) -> Vec<String> {
    results
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let score = item
                .score
                .map_or_else(|| "None".to_string(), |s| s.to_string());
            let text = item.display_text().unwrap_or("None");
            format!("  {}. score={} memory={}", idx + 1, score, text)
        })
        .collect()
}
