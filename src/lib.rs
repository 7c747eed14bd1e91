//! Locus: hint-tolerant symbol positions and reference merging.
//!
//! This library turns a symbol name plus an approximate line number into an
//! exact position, using a single-line lexical classifier so that only code
//! occurrences count, and reconciles structured reference results with
//! textual ones.

#![warn(missing_docs)]
// env_logger is used by src/main.rs (binary), not this library
#![expect(unused_crate_dependencies)]

pub mod cli;
pub mod config;
pub mod error;
pub mod lexical;
pub mod matcher;
pub mod query;
pub mod references;
pub mod resolve;
pub mod source;

/// Re-export common error types for convenience.
pub use error::{LocusError, ResolutionFailure, Result};

/// Re-export the core entry points.
pub use query::Query;
pub use references::{merge, ReferenceResult};
pub use resolve::{extract_context, PositionResolver, ResolveRequest, ResolvedOccurrence};

/// Locus version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
