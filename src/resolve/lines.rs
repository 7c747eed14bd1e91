//! Line splitting and context windows.

use serde::{Deserialize, Serialize};

/// A clamped window of lines around a center line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextWindow {
    /// First line of the window (1-based, inclusive).
    pub start_line: usize,

    /// Last line of the window (1-based, inclusive).
    pub end_line: usize,

    /// Lines `start_line..=end_line` joined with `\n`.
    pub content: String,
}

/// Split content into lines, treating `\n` and `\r\n` alike.
///
/// Always yields at least one line; a trailing newline yields a final empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Window of `context_lines` lines on each side of `center_line` (1-based).
///
/// The window shrinks at file boundaries instead of failing; an
/// out-of-range center is clamped into the file first.
pub fn extract_context(content: &str, center_line: usize, context_lines: usize) -> ContextWindow {
    let lines = split_lines(content);
    window_of(&lines, center_line, context_lines)
}

pub(crate) fn window_of(lines: &[&str], center_line: usize, context_lines: usize) -> ContextWindow {
    let total_lines = lines.len().max(1);
    let center = center_line.clamp(1, total_lines);
    let start_line = center.saturating_sub(context_lines).max(1);
    let end_line = center.saturating_add(context_lines).min(total_lines);

    let content = lines
        .get(start_line - 1..end_line)
        .map(|window| window.join("\n"))
        .unwrap_or_default();

    ContextWindow {
        start_line,
        end_line,
        content,
    }
}
