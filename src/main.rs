//! Locus CLI binary
//!
//! This is the main entry point for the locus command-line interface.
//! The CLI is a thin adapter over the library APIs.

use locus::cli::{CliErrorPayload, CliSuccessPayload, Commands};
use locus::config::{LocusConfig, CONFIG_FILE_NAME};
use locus::references::{merge, search_glob, ReferenceResult};
use locus::resolve::{extract_context, ResolveRequest};
use locus::source::{read_text, FsSourceReader};
use locus::{LocusError, Query};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = locus::cli::parse_args();

    // Initialize logger if verbose
    if cli.verbose {
        env_logger::init();
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    let result = match LocusConfig::load(&config_path) {
        Ok(config) => run(cli.command, &config).await,
        Err(e) => Err(e),
    };

    match result.and_then(|payload| serde_json::to_string_pretty(&payload).map_err(Into::into)) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let payload = CliErrorPayload::from_error(&e);
            match serde_json::to_string_pretty(&payload) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("Error: {}", e),
            }
            ExitCode::from(1)
        }
    }
}

async fn run(command: Commands, config: &LocusConfig) -> locus::Result<CliSuccessPayload> {
    let reader = FsSourceReader::new();

    match command {
        Commands::Resolve {
            file,
            symbol,
            line,
            order,
            radius,
            context,
        } => {
            execute_resolve(
                &reader,
                config,
                &file,
                ResolveRequest {
                    symbol_name: symbol,
                    line_hint: line,
                    order_hint: order,
                    line_search_radius: radius,
                },
                context.unwrap_or(config.context_lines),
            )
            .await
        }

        Commands::Context { file, line, lines } => {
            let uri = file.to_string_lossy().to_string();
            let content = read_text(&reader, &uri).await?;
            let window = extract_context(&content, line, lines.unwrap_or(config.context_lines));
            Ok(CliSuccessPayload::with_data(
                format!("Lines {}..={} of {}", window.start_line, window.end_line, uri),
                serde_json::to_value(&window)?,
            ))
        }

        Commands::References {
            glob,
            symbol,
            structured,
            page,
            per_page,
            include_declaration,
            context,
        } => {
            let mut query = Query::new(glob.clone(), symbol, 1);
            query.page = page;
            query.references_per_page = per_page.unwrap_or(config.references_per_page);
            query.include_declaration = include_declaration;
            query.context_lines = context.unwrap_or(config.context_lines);
            query.validate()?;

            let structured = structured
                .as_deref()
                .map(load_structured)
                .transpose()?;
            let textual = search_glob(&reader, &glob, &query).await?;
            let merged = merge(structured, textual, &query);

            Ok(CliSuccessPayload::with_data(
                format!(
                    "{} reference(s) to '{}'",
                    merged.total_references, query.symbol_name
                ),
                serde_json::to_value(&merged)?,
            ))
        }
    }
}

/// Execute the resolve command.
///
/// Reads the file, resolves the symbol and attaches a context window
/// around the line it was found on.
async fn execute_resolve(
    reader: &FsSourceReader,
    config: &LocusConfig,
    file: &Path,
    request: ResolveRequest,
    context_lines: usize,
) -> locus::Result<CliSuccessPayload> {
    let uri = file.to_string_lossy().to_string();
    // The context window needs the whole text, so read once here rather
    // than going through `resolve_from_source`.
    let content = read_text(reader, &uri).await?;

    let occurrence = config.resolver().resolve_from_text(&content, &request)?;
    let window = extract_context(&content, occurrence.found_at_line, context_lines);

    Ok(CliSuccessPayload::with_data(
        format!(
            "Resolved '{}' at {}:{}:{}",
            request.symbol_name,
            uri,
            occurrence.found_at_line,
            occurrence.position.character + 1
        ),
        serde_json::json!({
            "occurrence": occurrence,
            "context": window,
        }),
    ))
}

/// Load a structured reference result produced by an external lookup.
fn load_structured(path: &Path) -> locus::Result<ReferenceResult> {
    let content = std::fs::read_to_string(path).map_err(|source| LocusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
