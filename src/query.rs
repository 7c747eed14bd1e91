//! Resolution and reference-merge request.

use crate::error::{LocusError, Result};
use serde::{Deserialize, Serialize};

/// Default number of references per page.
pub const DEFAULT_REFERENCES_PER_PAGE: usize = 20;

/// A symbol lookup request. Never mutated by the components that consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// File the symbol is believed to be in.
    pub uri: String,

    /// Name of the symbol; must be non-empty.
    pub symbol_name: String,

    /// Approximate 1-based line of the symbol.
    pub line_hint: usize,

    /// Zero-based index among same-name occurrences on the hint line.
    #[serde(default)]
    pub order_hint: usize,

    /// Lines of context on each side of a reported location.
    #[serde(default)]
    pub context_lines: usize,

    /// 1-based page of merged references to return.
    #[serde(default = "default_page")]
    pub page: usize,

    /// Whether declarations count as references.
    #[serde(default)]
    pub include_declaration: bool,

    /// Page size for merged references.
    #[serde(default = "default_references_per_page")]
    pub references_per_page: usize,
}

fn default_page() -> usize {
    1
}

fn default_references_per_page() -> usize {
    DEFAULT_REFERENCES_PER_PAGE
}

impl Query {
    /// Query with default order hint, paging and no context lines.
    pub fn new(uri: impl Into<String>, symbol_name: impl Into<String>, line_hint: usize) -> Self {
        Query {
            uri: uri.into(),
            symbol_name: symbol_name.into(),
            line_hint,
            order_hint: 0,
            context_lines: 0,
            page: default_page(),
            include_declaration: false,
            references_per_page: DEFAULT_REFERENCES_PER_PAGE,
        }
    }

    /// Check the field constraints.
    ///
    /// # Errors
    /// - `InvalidQuery` - empty symbol name, or a zero line hint, page or page size
    pub fn validate(&self) -> Result<()> {
        let problem = if self.symbol_name.is_empty() {
            Some("symbol name must not be empty")
        } else if self.line_hint == 0 {
            Some("line hint is 1-based and must be positive")
        } else if self.page == 0 {
            Some("page is 1-based and must be positive")
        } else if self.references_per_page == 0 {
            Some("references per page must be positive")
        } else {
            None
        };

        match problem {
            Some(message) => Err(LocusError::InvalidQuery {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }
}
