//! Reconciling structured and textual reference results.
//!
//! The merge never fails. When one side has nothing to offer, the other is
//! returned unchanged; otherwise the structured result is extended, never
//! replaced.

use super::{Location, Pagination, ReferenceResult};
use crate::query::Query;
use std::collections::HashSet;

/// Hint appended when text search found nothing the structured source missed.
pub const CONFIRMATION_HINT: &str =
    "Text search confirmed the structured results; no additional references found";

/// Hint naming how many references came only from text search.
pub fn added_references_hint(count: usize) -> String {
    format!("Added {} reference(s) from text search", count)
}

/// Hint naming the current page.
pub fn page_hint(current_page: usize, total_pages: usize) -> String {
    format!("Showing page {} of {}", current_page, total_pages)
}

/// Merge a structured result (absent when no structured capability was
/// available) with a textual one.
///
/// 1. No structured locations: `textual` is returned unchanged
/// 2. No textual locations: `structured` is returned unchanged
/// 3. Textual adds nothing new: `structured` plus one confirmation hint
/// 4. Otherwise: structured-first union, paginated per `query`
pub fn merge(
    structured: Option<ReferenceResult>,
    textual: ReferenceResult,
    query: &Query,
) -> ReferenceResult {
    let mut structured = match structured {
        Some(result) if result.has_locations() => result,
        _ => return textual,
    };

    if !textual.has_locations() {
        return structured;
    }

    let additional: Vec<Location> = {
        let known: HashSet<(&str, usize, usize)> =
            structured.locations.iter().map(Location::dedup_key).collect();
        let mut seen = HashSet::new();
        textual
            .locations
            .iter()
            .filter(|location| {
                let key = location.dedup_key();
                !known.contains(&key) && seen.insert(key)
            })
            .cloned()
            .collect()
    };

    if additional.is_empty() {
        log::debug!(
            "text search confirmed {} structured reference(s) for '{}'",
            structured.locations.len(),
            query.symbol_name
        );
        let already_confirmed = structured
            .hints
            .as_ref()
            .is_some_and(|hints| hints.iter().any(|h| h == CONFIRMATION_HINT));
        if !already_confirmed {
            structured.push_hint(CONFIRMATION_HINT);
        }
        return structured;
    }

    log::debug!(
        "text search added {} reference(s) for '{}' to {} structured",
        additional.len(),
        query.symbol_name,
        structured.locations.len()
    );

    let added = additional.len();
    structured.locations.extend(additional);
    structured.total_references = structured.locations.len();
    structured.push_hint(added_references_hint(added));

    paginate(structured, query.page, query.references_per_page)
}

/// Cut `result.locations` down to one page and record the paging metadata.
///
/// `total_references` keeps reporting the full set. A page or page size of
/// zero is treated as 1. A page past the end yields no locations.
pub fn paginate(mut result: ReferenceResult, page: usize, per_page: usize) -> ReferenceResult {
    let per_page = per_page.max(1);
    let current_page = page.max(1);
    let total_results = result.locations.len();
    let total_pages = total_results.div_ceil(per_page);

    let start = (current_page - 1).saturating_mul(per_page).min(total_results);
    let end = start.saturating_add(per_page).min(total_results);
    result.locations = result.locations.drain(start..end).collect();
    result.total_references = total_results;
    result.pagination = Some(Pagination {
        total_results,
        has_more: current_page < total_pages,
        current_page,
        total_pages,
    });

    if total_pages > 1 {
        result.push_hint(page_hint(current_page, total_pages));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::references::{DisplayRange, Range, ReferenceStatus};
    use crate::resolve::Position;

    fn loc(uri: &str, line: usize, character: usize) -> Location {
        Location {
            uri: uri.to_string(),
            range: Range {
                start: Position { line, character },
                end: Position {
                    line,
                    character: character + 1,
                },
            },
            content: format!("line {}", line + 1),
            is_definition: false,
            display_range: DisplayRange {
                start_line: line + 1,
                end_line: line + 1,
            },
        }
    }

    fn query(per_page: usize, page: usize) -> Query {
        let mut query = Query::new("a.ts", "A", 5);
        query.references_per_page = per_page;
        query.page = page;
        query
    }

    #[test]
    fn test_absent_structured_passes_textual_through() {
        let textual = ReferenceResult::from_locations(vec![loc("a.ts", 4, 0)]);
        assert_eq!(merge(None, textual.clone(), &query(20, 1)), textual);

        let empty = ReferenceResult::from_locations(Vec::new());
        assert_eq!(merge(Some(empty), textual.clone(), &query(20, 1)), textual);
    }

    #[test]
    fn test_error_structured_passes_textual_through() {
        let mut broken = ReferenceResult::from_locations(vec![loc("a.ts", 1, 0)]);
        broken.status = ReferenceStatus::Error;
        let textual = ReferenceResult::from_locations(vec![loc("a.ts", 4, 0)]);
        assert_eq!(merge(Some(broken), textual.clone(), &query(20, 1)), textual);
    }

    #[test]
    fn test_error_textual_with_locations_passes_structured_through() {
        let structured = ReferenceResult::from_locations(vec![loc("a.ts", 4, 0)]);
        let mut textual =
            ReferenceResult::from_locations(vec![loc("a.ts", 4, 0), loc("b.ts", 7, 1)]);
        textual.status = ReferenceStatus::Error;

        let merged = merge(Some(structured.clone()), textual, &query(20, 1));
        assert_eq!(merged, structured);
        assert_eq!(merged.hints, None);
    }

    #[test]
    fn test_empty_textual_passes_structured_through() {
        let structured = ReferenceResult::from_locations(vec![loc("a.ts", 4, 0)]);
        let textual = ReferenceResult::from_locations(Vec::new());
        assert_eq!(
            merge(Some(structured.clone()), textual, &query(20, 1)),
            structured
        );
    }

    #[test]
    fn test_subset_appends_single_confirmation() {
        let structured =
            ReferenceResult::from_locations(vec![loc("a.ts", 4, 0), loc("a.ts", 9, 2)]);
        let mut textual_loc = loc("a.ts", 9, 2);
        textual_loc.content = "different text".to_string();
        let textual = ReferenceResult::from_locations(vec![textual_loc]);

        let merged = merge(Some(structured.clone()), textual.clone(), &query(20, 1));
        assert_eq!(merged.locations, structured.locations);
        assert_eq!(merged.total_references, 2);
        assert_eq!(merged.pagination, None);
        assert_eq!(merged.hints, Some(vec![CONFIRMATION_HINT.to_string()]));

        let again = merge(Some(merged.clone()), textual, &query(20, 1));
        assert_eq!(again, merged);
    }

    #[test]
    fn test_adds_missing_textual_locations_after_structured() {
        let structured = ReferenceResult::from_locations(vec![loc("a.ts", 4, 6)]);
        let textual = ReferenceResult::from_locations(vec![loc("a.ts", 4, 6), loc("a.ts", 11, 2)]);

        let merged = merge(Some(structured), textual, &query(20, 1));
        assert_eq!(merged.locations, vec![loc("a.ts", 4, 6), loc("a.ts", 11, 2)]);
        assert_eq!(merged.total_references, 2);
        assert_eq!(merged.hints, Some(vec![added_references_hint(1)]));
        assert_eq!(
            merged.pagination,
            Some(Pagination {
                total_results: 2,
                has_more: false,
                current_page: 1,
                total_pages: 1,
            })
        );
    }

    #[test]
    fn test_existing_hints_are_kept() {
        let mut structured = ReferenceResult::from_locations(vec![loc("a.ts", 0, 0)]);
        structured.hints = Some(vec!["from server".to_string()]);
        let textual = ReferenceResult::from_locations(vec![loc("b.ts", 0, 0)]);

        let merged = merge(Some(structured), textual, &query(20, 1));
        assert_eq!(
            merged.hints,
            Some(vec!["from server".to_string(), added_references_hint(1)])
        );
    }

    #[test]
    fn test_same_position_in_other_file_is_not_duplicate() {
        let structured = ReferenceResult::from_locations(vec![loc("a.ts", 3, 3)]);
        let textual = ReferenceResult::from_locations(vec![loc("b.ts", 3, 3)]);
        let merged = merge(Some(structured), textual, &query(20, 1));
        assert_eq!(merged.total_references, 2);
    }

    #[test]
    fn test_pagination_reports_full_total() {
        let structured = ReferenceResult::from_locations(vec![loc("a.ts", 0, 0)]);
        let textual = ReferenceResult::from_locations((1..5).map(|l| loc("a.ts", l, 0)).collect());

        let first = merge(Some(structured.clone()), textual.clone(), &query(2, 1));
        assert_eq!(first.locations.len(), 2);
        assert_eq!(first.total_references, 5);
        let pagination = first.pagination.expect("pagination present");
        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_more);
        assert_eq!(
            first.hints,
            Some(vec![added_references_hint(4), page_hint(1, 3)])
        );

        let last = merge(Some(structured), textual, &query(2, 3));
        assert_eq!(last.locations, vec![loc("a.ts", 4, 0)]);
        assert!(!last.pagination.expect("pagination present").has_more);
    }

    #[test]
    fn test_paginate_arithmetic() {
        for n in 1..12usize {
            for p in 1..5usize {
                let locations: Vec<Location> = (0..n).map(|l| loc("a.ts", l, 0)).collect();
                let total_pages = n.div_ceil(p);
                let last = paginate(ReferenceResult::from_locations(locations), total_pages, p);
                assert_eq!(last.locations.len(), n - p * (total_pages - 1));
                assert_eq!(last.total_references, n);
                assert!(!last.pagination.expect("pagination").has_more);
            }
        }
    }

    #[test]
    fn test_paginate_past_end_is_empty_page() {
        let locations: Vec<Location> = (0..3).map(|l| loc("a.ts", l, 0)).collect();
        let result = paginate(ReferenceResult::from_locations(locations), 4, 2);
        assert!(result.locations.is_empty());
        assert_eq!(result.total_references, 3);
    }
}
