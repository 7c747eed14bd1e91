//! Hint-tolerant symbol position resolution.
//!
//! Turns a symbol name plus an approximate 1-based line into an exact
//! 0-based position. The hint line is probed first and honors the order
//! hint; if it has no suitable occurrence, nearby lines are probed
//! alternately above and below, taking the first code occurrence there.
//!
//! # Resolution Rules
//! 1. A line hint outside the file fails immediately, with no search
//! 2. On the hint line, occurrence number `order_hint` is selected
//! 3. On any other probed line, the order hint is ignored
//! 4. At equal distance, the line above wins over the line below

pub mod lines;

pub use lines::{extract_context, split_lines, ContextWindow};

use crate::error::{LocusError, ResolutionFailure, Result};
use crate::matcher::find_occurrences;
use crate::query::Query;
use crate::source::{read_text, SourceReader};
use serde::{Deserialize, Serialize};

/// Default number of lines probed above and below the hint line.
pub const DEFAULT_LINE_SEARCH_RADIUS: usize = 5;

/// A 0-based position; `character` counts UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line (0-based).
    pub line: usize,

    /// Character offset within the line (0-based, UTF-16 units).
    pub character: usize,
}

/// A successfully resolved occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOccurrence {
    /// Exact position of the first character of the symbol.
    pub position: Position,

    /// Line the symbol was found on (1-based).
    pub found_at_line: usize,

    /// `found_at_line - line_hint`; negative when found above the hint.
    pub line_offset: isize,

    /// Full text of the matched line.
    pub line_content: String,
}

/// Parameters for a single resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Symbol to locate.
    pub symbol_name: String,

    /// Approximate 1-based line.
    pub line_hint: usize,

    /// Zero-based occurrence index, honored on the hint line only.
    pub order_hint: usize,

    /// Overrides the resolver's radius for this call.
    pub line_search_radius: Option<usize>,
}

impl ResolveRequest {
    /// Request with order hint 0 and the resolver's default radius.
    pub fn new(symbol_name: impl Into<String>, line_hint: usize) -> Self {
        ResolveRequest {
            symbol_name: symbol_name.into(),
            line_hint,
            order_hint: 0,
            line_search_radius: None,
        }
    }

    /// Set the order hint.
    pub fn with_order_hint(mut self, order_hint: usize) -> Self {
        self.order_hint = order_hint;
        self
    }

    /// Override the search radius.
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.line_search_radius = Some(radius);
        self
    }
}

impl From<&Query> for ResolveRequest {
    fn from(query: &Query) -> Self {
        ResolveRequest {
            symbol_name: query.symbol_name.clone(),
            line_hint: query.line_hint,
            order_hint: query.order_hint,
            line_search_radius: None,
        }
    }
}

/// Stateless resolver configured only by its search radius.
///
/// Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionResolver {
    line_search_radius: usize,
}

impl Default for PositionResolver {
    fn default() -> Self {
        PositionResolver::new(DEFAULT_LINE_SEARCH_RADIUS)
    }
}

impl PositionResolver {
    /// Resolver probing `line_search_radius` lines on each side of the hint.
    pub fn new(line_search_radius: usize) -> Self {
        PositionResolver { line_search_radius }
    }

    /// Configured default radius.
    pub fn line_search_radius(&self) -> usize {
        self.line_search_radius
    }

    /// Resolve a symbol in already-loaded text.
    ///
    /// # Errors
    /// - `InvalidQuery` - empty symbol name
    /// - `SymbolResolution` - hint out of range, or no code occurrence within the radius
    pub fn resolve_from_text(
        &self,
        content: &str,
        request: &ResolveRequest,
    ) -> Result<ResolvedOccurrence> {
        if request.symbol_name.is_empty() {
            return Err(LocusError::InvalidQuery {
                message: "symbol name must not be empty".to_string(),
            });
        }

        let radius = request
            .line_search_radius
            .unwrap_or(self.line_search_radius);
        let lines = split_lines(content);
        let total_lines = lines.len();
        let hint = request.line_hint;

        let failure = |reason: ResolutionFailure| LocusError::SymbolResolution {
            symbol: request.symbol_name.clone(),
            line_hint: hint,
            reason,
            search_radius: radius,
        };

        if hint == 0 || hint > total_lines {
            return Err(failure(ResolutionFailure::LineOutOfRange { total_lines }));
        }

        let mut hint_line_occurrences = 0;

        for line_number in probe_order(hint, radius, total_lines) {
            let line = lines[line_number - 1];
            let occurrences = find_occurrences(line, &request.symbol_name);

            let character = if line_number == hint {
                hint_line_occurrences = occurrences.len();
                occurrences.get(request.order_hint).copied()
            } else {
                occurrences.first().copied()
            };

            if let Some(character) = character {
                let line_offset = line_number as isize - hint as isize;
                if line_offset != 0 {
                    log::debug!(
                        "'{}' not on hint line {}, found {} line(s) away at line {}",
                        request.symbol_name,
                        hint,
                        line_offset,
                        line_number
                    );
                }

                return Ok(ResolvedOccurrence {
                    position: Position {
                        line: line_number - 1,
                        character,
                    },
                    found_at_line: line_number,
                    line_offset,
                    line_content: line.to_string(),
                });
            }
        }

        let reason = if hint_line_occurrences > 0 {
            ResolutionFailure::OrderHintOutOfRange {
                occurrences: hint_line_occurrences,
                order_hint: request.order_hint,
            }
        } else {
            ResolutionFailure::NotFoundWithinRadius
        };
        Err(failure(reason))
    }

    /// Read the query's file through `reader`, then resolve in its text.
    ///
    /// # Errors
    /// - `FileAccess` - the reader failed; never reported as a resolution failure
    /// - everything [`PositionResolver::resolve_from_text`] returns
    pub async fn resolve_from_source<R>(
        &self,
        reader: &R,
        query: &Query,
    ) -> Result<ResolvedOccurrence>
    where
        R: SourceReader + ?Sized,
    {
        let content = read_text(reader, &query.uri).await?;
        self.resolve_from_text(&content, &ResolveRequest::from(query))
    }
}

/// Hint line first, then `hint-1, hint+1, hint-2, hint+2, ...` within the file.
///
/// No probe can leave the file, so the radius is capped at `total_lines`.
fn probe_order(hint: usize, radius: usize, total_lines: usize) -> Vec<usize> {
    let radius = radius.min(total_lines);
    let mut order = Vec::with_capacity(2 * radius + 1);
    order.push(hint);

    for distance in 1..=radius {
        if hint > distance {
            order.push(hint - distance);
        }
        if hint + distance <= total_lines {
            order.push(hint + distance);
        }
    }

    order
}
