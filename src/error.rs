//! Locus error types.
//!
//! All errors are typed and provide root cause information. Resolution
//! failures and file-access failures are deliberately separate variants so
//! callers can tell "could not locate" apart from "could not read".

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Locus operations.
#[derive(Error, Debug)]
pub enum LocusError {
    /// The symbol could not be matched to a code-context occurrence.
    #[error("Cannot resolve '{symbol}' near line {line_hint} (radius {search_radius}): {reason}")]
    SymbolResolution {
        /// The symbol name that was searched for.
        symbol: String,
        /// The 1-based line hint supplied by the caller.
        line_hint: usize,
        /// Why resolution failed.
        reason: ResolutionFailure,
        /// The search radius actually used.
        search_radius: usize,
    },

    /// The source text for a URI could not be read.
    #[error("Could not read source '{uri}': {source}")]
    FileAccess {
        /// The URI or path that was requested.
        uri: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error while reading a local input file (config, structured results).
    #[error("I/O error for path {path}: {source}")]
    Io {
        /// The file path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The query is malformed (empty symbol name, zero line hint, ...).
    #[error("Invalid query: {message}")]
    InvalidQuery {
        /// What is wrong with the query.
        message: String,
    },

    /// The configuration file exists but is unusable.
    #[error("Invalid config: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern could not be expanded.
    #[error("Invalid glob pattern '{pattern}': {message}")]
    Glob {
        /// The offending pattern.
        pattern: String,
        /// The glob error message.
        message: String,
    },
}

/// Reason attached to [`LocusError::SymbolResolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// The line hint lies outside `[1, total_lines]`; no search was performed.
    LineOutOfRange {
        /// Number of lines in the searched content.
        total_lines: usize,
    },
    /// The hint line had some occurrences, but not enough for the order hint,
    /// and no nearby line had any.
    OrderHintOutOfRange {
        /// Code-context occurrences found on the hint line.
        occurrences: usize,
        /// The requested zero-based occurrence index.
        order_hint: usize,
    },
    /// No code-context occurrence exists anywhere in the probed window.
    NotFoundWithinRadius,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionFailure::LineOutOfRange { total_lines } => {
                write!(f, "line hint is outside the file (1..={})", total_lines)
            }
            ResolutionFailure::OrderHintOutOfRange {
                occurrences,
                order_hint,
            } => write!(
                f,
                "order hint {} requested but the hint line has only {} occurrence(s)",
                order_hint, occurrences
            ),
            ResolutionFailure::NotFoundWithinRadius => write!(f, "not found within search radius"),
        }
    }
}

impl LocusError {
    /// Stable identifier for the error kind, used in JSON payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            LocusError::SymbolResolution { .. } => "SymbolResolution",
            LocusError::FileAccess { .. } => "FileAccess",
            LocusError::Io { .. } => "Io",
            LocusError::InvalidQuery { .. } => "InvalidQuery",
            LocusError::InvalidConfig { .. } => "InvalidConfig",
            LocusError::Json(_) => "Json",
            LocusError::Glob { .. } => "Glob",
        }
    }

    /// The symbol involved in the failure, if any.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            LocusError::SymbolResolution { symbol, .. } => Some(symbol),
            _ => None,
        }
    }

    /// Remediation hint for callers.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LocusError::SymbolResolution { reason, .. } => Some(match reason {
                ResolutionFailure::LineOutOfRange { .. } => {
                    "Use a 1-based line number within the file"
                }
                ResolutionFailure::OrderHintOutOfRange { .. } => {
                    "Lower the order hint or correct the line hint"
                }
                ResolutionFailure::NotFoundWithinRadius => {
                    "Correct the line hint, widen the search radius, or fall back to text search"
                }
            }),
            LocusError::FileAccess { .. } => Some("Check that the file exists and is readable"),
            LocusError::InvalidConfig { .. } => Some("Fix or remove the configuration file"),
            _ => None,
        }
    }
}

/// Result type alias for Locus operations.
pub type Result<T> = std::result::Result<T, LocusError>;
