//! Command-line interface for Locus.
//!
//! This module handles argument parsing and JSON payload shapes only.
//! Resolution and merging live in the library modules.

use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Locus: locate symbols from approximate line hints and merge reference sets.
#[derive(Parser, Debug)]
#[command(name = "locus")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_required = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a JSON config file (defaults to ./locus.json when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available Locus commands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Resolve a symbol near a line hint to an exact position.
    Resolve {
        /// Source file to search.
        #[arg(short, long)]
        file: PathBuf,

        /// Symbol name to locate.
        #[arg(short, long)]
        symbol: String,

        /// Approximate line of the symbol (1-based).
        #[arg(short, long)]
        line: usize,

        /// Which occurrence on the hint line (0-based).
        #[arg(short, long, default_value_t = 0)]
        order: usize,

        /// Lines to probe above and below the hint (overrides config).
        #[arg(short, long)]
        radius: Option<usize>,

        /// Lines of context around the match (overrides config).
        #[arg(short, long)]
        context: Option<usize>,
    },

    /// Print a window of lines around a line.
    Context {
        /// Source file to read.
        #[arg(short, long)]
        file: PathBuf,

        /// Center line (1-based).
        #[arg(short, long)]
        line: usize,

        /// Lines on each side (overrides config).
        #[arg(short = 'n', long)]
        lines: Option<usize>,
    },

    /// Find references by text search and merge them with structured results.
    References {
        /// Glob pattern for files to search (e.g., "src/**/*.ts").
        #[arg(short, long)]
        glob: String,

        /// Symbol name to find.
        #[arg(short, long)]
        symbol: String,

        /// JSON file holding a structured reference result to merge with.
        #[arg(long, value_name = "FILE")]
        structured: Option<PathBuf>,

        /// Page to return (1-based).
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// References per page (overrides config).
        #[arg(long)]
        per_page: Option<usize>,

        /// Count declarations as references.
        #[arg(long)]
        include_declaration: bool,

        /// Lines of context around each reference (overrides config).
        #[arg(short, long)]
        context: Option<usize>,
    },
}

/// Parse command-line arguments.
///
/// Returns the parsed Cli struct or exits on error.
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// JSON success payload for CLI responses.
#[derive(Serialize)]
pub struct CliSuccessPayload {
    /// Status indicator ("ok").
    pub status: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CliSuccessPayload {
    /// Construct a payload with structured data.
    pub fn with_data(message: String, data: Value) -> Self {
        Self {
            status: "ok",
            message,
            data: Some(data),
        }
    }
}

/// JSON error payload for CLI responses.
#[derive(Serialize)]
pub struct CliErrorPayload {
    /// Status indicator ("error").
    pub status: &'static str,
    /// Structured error details.
    pub error: ErrorDetails,
}

/// Details for a CLI error payload.
#[derive(Serialize)]
pub struct ErrorDetails {
    /// Error kind identifier (SymbolResolution, FileAccess, ...).
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional symbol context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Optional hint for remediation steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliErrorPayload {
    /// Build payload from a LocusError instance.
    pub fn from_error(error: &crate::LocusError) -> Self {
        CliErrorPayload {
            status: "error",
            error: ErrorDetails {
                kind: error.kind(),
                message: error.to_string(),
                symbol: error.symbol().map(|s| s.to_string()),
                hint: error.hint().map(|h| h.to_string()),
            },
        }
    }
}
