//! Locus configuration.
//!
//! Loaded from a JSON file; every field has a default, so a partial file is
//! fine. A missing file means defaults, but a malformed one is an error.

use crate::error::{LocusError, Result};
use crate::query::DEFAULT_REFERENCES_PER_PAGE;
use crate::resolve::{PositionResolver, DEFAULT_LINE_SEARCH_RADIUS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "locus.json";

/// Tunables for resolution and reference paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LocusConfig {
    /// Lines probed above and below a line hint.
    pub line_search_radius: usize,

    /// Page size for merged references.
    pub references_per_page: usize,

    /// Lines of context around reported locations.
    pub context_lines: usize,
}

impl Default for LocusConfig {
    fn default() -> Self {
        LocusConfig {
            line_search_radius: DEFAULT_LINE_SEARCH_RADIUS,
            references_per_page: DEFAULT_REFERENCES_PER_PAGE,
            context_lines: 2,
        }
    }
}

impl LocusConfig {
    /// Load config from `path`.
    ///
    /// # Returns
    /// * `Ok(LocusConfig::default())` - the file does not exist
    /// * `Ok(config)` - the file parsed and validated
    ///
    /// # Errors
    /// - `Io` - the file exists but cannot be read
    /// - `InvalidConfig` - malformed JSON, unknown fields, or a zero page size
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(LocusConfig::default());
            }
            Err(e) => {
                return Err(LocusError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        Self::parse(&content).map_err(|message| LocusError::InvalidConfig {
            message: format!("{}: {}", path.display(), message),
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: LocusConfig =
            serde_json::from_str(content).map_err(|e| format!("JSON parse error: {}", e))?;

        if config.references_per_page == 0 {
            return Err("referencesPerPage must be positive".to_string());
        }

        Ok(config)
    }

    /// Resolver using the configured search radius.
    pub fn resolver(&self) -> PositionResolver {
        PositionResolver::new(self.line_search_radius)
    }
}
