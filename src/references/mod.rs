//! Reference locations from structured and textual sources.
//!
//! # Architecture
//! - Structured source: a precise lookup (e.g. a language server), supplied by the caller
//! - Textual source: [`text_search`], the matcher applied to every line of a file
//! - [`merge`]: reconciles the two into one deduplicated, paginated result
//!
//! # Key Concepts
//! - **Dedup key**: `(uri, start line, start character)`; content and display range are ignored
//! - **totalReferences**: always the size of the full set, never of a page

pub mod merge;
pub mod text_search;

pub use merge::{merge, paginate};
pub use text_search::{search_glob, search_text};

use crate::resolve::Position;
use serde::{Deserialize, Serialize};

/// Start and end positions of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// First character of the reference.
    pub start: Position,

    /// One past the last character of the reference.
    pub end: Position,
}

/// Lines shown to the user for a location (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRange {
    /// First displayed line.
    pub start_line: usize,

    /// Last displayed line.
    pub end_line: usize,
}

/// A reference site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// File identifier.
    pub uri: String,

    /// Exact span of the reference.
    pub range: Range,

    /// Source line(s) around the reference.
    pub content: String,

    /// Whether this site declares the symbol.
    #[serde(default)]
    pub is_definition: bool,

    /// Lines covered by `content`.
    pub display_range: DisplayRange,
}

impl Location {
    /// Identity used for deduplication across sources.
    pub fn dedup_key(&self) -> (&str, usize, usize) {
        (
            self.uri.as_str(),
            self.range.start.line,
            self.range.start.character,
        )
    }
}

/// Outcome status of a reference lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceStatus {
    /// At least one location.
    HasResults,
    /// Lookup succeeded with nothing found.
    Empty,
    /// Lookup failed upstream.
    Error,
}

/// Paging metadata for a result whose locations are one page of a larger set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Size of the full set.
    pub total_results: usize,

    /// Whether pages follow the current one.
    pub has_more: bool,

    /// 1-based page number.
    pub current_page: usize,

    /// Number of pages.
    pub total_pages: usize,
}

/// A set of reference locations with advisory hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceResult {
    /// Lookup status.
    pub status: ReferenceStatus,

    /// Locations, possibly one page of the full set.
    #[serde(default)]
    pub locations: Vec<Location>,

    /// Size of the full (pre-pagination) set.
    pub total_references: usize,

    /// Advisory messages for the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,

    /// Present when `locations` is a page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl ReferenceResult {
    /// Unpaginated result over `locations`, status derived from emptiness.
    pub fn from_locations(locations: Vec<Location>) -> Self {
        let status = if locations.is_empty() {
            ReferenceStatus::Empty
        } else {
            ReferenceStatus::HasResults
        };
        ReferenceResult {
            status,
            total_references: locations.len(),
            locations,
            hints: None,
            pagination: None,
        }
    }

    /// Whether this result contributes any locations.
    pub fn has_locations(&self) -> bool {
        self.status == ReferenceStatus::HasResults && !self.locations.is_empty()
    }

    /// Append an advisory hint, creating the list if absent.
    pub fn push_hint(&mut self, hint: impl Into<String>) {
        self.hints.get_or_insert_with(Vec::new).push(hint.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_and_omits_absent_fields() {
        let result = ReferenceResult::from_locations(vec![Location {
            uri: "a.ts".to_string(),
            range: Range {
                start: Position { line: 1, character: 2 },
                end: Position { line: 1, character: 5 },
            },
            content: "  foo();".to_string(),
            is_definition: false,
            display_range: DisplayRange {
                start_line: 2,
                end_line: 2,
            },
        }]);

        let value = serde_json::to_value(&result).expect("Failed to serialize");
        assert_eq!(value["status"], "hasResults");
        assert_eq!(value["totalReferences"], 1);
        assert_eq!(value["locations"][0]["isDefinition"], false);
        assert_eq!(value["locations"][0]["displayRange"]["startLine"], 2);
        assert!(value.get("hints").is_none());
        assert!(value.get("pagination").is_none());
    }

    #[test]
    fn test_empty_result_has_no_locations() {
        let result = ReferenceResult::from_locations(Vec::new());
        assert_eq!(result.status, ReferenceStatus::Empty);
        assert!(!result.has_locations());
    }
}
