//! Textual reference search.
//!
//! Applies the symbol matcher to every line of a file, producing the
//! approximate result that [`super::merge`] reconciles with a structured one.
//! Only code-context occurrences are reported, so strings, comments and
//! template text never show up as references.

use super::{DisplayRange, Location, Range, ReferenceResult};
use crate::error::{LocusError, Result};
use crate::matcher::{find_occurrences, is_identifier_char, utf16_len};
use crate::query::Query;
use crate::resolve::lines::window_of;
use crate::resolve::{split_lines, Position};
use crate::source::SourceReader;
use glob::glob;
use std::path::PathBuf;

/// Keywords that, directly preceding a name, mark a declaration.
const DECLARATION_KEYWORDS: &[&str] = &[
    "class",
    "const",
    "def",
    "enum",
    "fn",
    "function",
    "impl",
    "interface",
    "let",
    "mod",
    "namespace",
    "static",
    "struct",
    "trait",
    "type",
    "var",
];

/// Whether the identifier ending right before `offset` is a declaration keyword.
///
/// `offset` is in UTF-16 units, like match offsets.
fn is_declaration_site(line: &str, offset: usize) -> bool {
    let prefix: String = char::decode_utf16(line.encode_utf16().take(offset))
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    let trimmed = prefix.trim_end();
    if trimmed.len() == prefix.len() {
        // No whitespace between keyword and name.
        return false;
    }
    let keyword_start = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| !is_identifier_char(*c))
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);
    DECLARATION_KEYWORDS.contains(&&trimmed[keyword_start..])
}

/// All code-context occurrences of the query's symbol in one file.
///
/// `content` and `display_range` cover `query.context_lines` lines around
/// each hit. Declarations are dropped unless `query.include_declaration`.
pub fn search_text(uri: &str, content: &str, query: &Query) -> Vec<Location> {
    if query.symbol_name.is_empty() {
        return Vec::new();
    }

    let lines = split_lines(content);
    let name_len = utf16_len(&query.symbol_name);
    let mut locations = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        for character in find_occurrences(line, &query.symbol_name) {
            let is_definition = is_declaration_site(line, character);
            if is_definition && !query.include_declaration {
                continue;
            }

            let window = window_of(&lines, idx + 1, query.context_lines);
            locations.push(Location {
                uri: uri.to_string(),
                range: Range {
                    start: Position {
                        line: idx,
                        character,
                    },
                    end: Position {
                        line: idx,
                        character: character + name_len,
                    },
                },
                content: window.content,
                is_definition,
                display_range: DisplayRange {
                    start_line: window.start_line,
                    end_line: window.end_line,
                },
            });
        }
    }

    locations
}

/// Search every file matching a glob pattern, in path order.
///
/// Directories are skipped; files the reader cannot read are logged and skipped.
///
/// # Errors
/// - `Glob` - the pattern is malformed
pub async fn search_glob<R>(reader: &R, pattern: &str, query: &Query) -> Result<ReferenceResult>
where
    R: SourceReader + ?Sized,
{
    let entries = glob(pattern).map_err(|e| LocusError::Glob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_dir() => continue,
            Ok(path) => paths.push(path),
            Err(e) => log::warn!("Skipping unreadable glob entry: {}", e),
        }
    }
    paths.sort();

    let mut locations = Vec::new();
    for path in paths {
        let uri = path.to_string_lossy().to_string();
        match reader.read_source(&uri).await {
            Ok(content) => locations.extend(search_text(&uri, &content, query)),
            Err(e) => log::warn!("Skipping {}: {}", uri, e),
        }
    }

    log::debug!(
        "text search found {} reference(s) to '{}' for {}",
        locations.len(),
        query.symbol_name,
        pattern
    );

    Ok(ReferenceResult::from_locations(locations))
}
