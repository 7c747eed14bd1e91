//! Position resolution tests over realistic source files.

use locus::resolve::{extract_context, Position, PositionResolver, ResolveRequest};
use locus::source::{FsSourceReader, MemorySource};
use locus::{LocusError, Query, ResolutionFailure};
use tempfile::TempDir;

const HANDLER: &str = r#"import { ToolError } from './errors';
import { log } from './log';

// ToolError is thrown when a tool fails
export function handle(input) {
  const label = `tool ${input.name}: ToolError`;
  if (!input.ok) {
    throw new ToolError(label, { cause: input.error });
  }
  log('ToolError not raised');
  return input;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_hint_line() {
        let resolver = PositionResolver::default();
        let found = resolver
            .resolve_from_text(HANDLER, &ResolveRequest::new("ToolError", 8))
            .expect("Failed to resolve");

        assert_eq!(found.position, Position { line: 7, character: 14 });
        assert_eq!(found.line_offset, 0);
        assert_eq!(found.line_content, "    throw new ToolError(label, { cause: input.error });");
    }

    #[test]
    fn test_comment_and_string_lines_are_skipped() {
        // Lines 4 (comment), 6 (template text) and 10 (string) mention the
        // name but never in code, so the search lands on line 8.
        let resolver = PositionResolver::default();
        let found = resolver
            .resolve_from_text(HANDLER, &ResolveRequest::new("ToolError", 6))
            .expect("Failed to resolve");

        assert_eq!(found.found_at_line, 8);
        assert_eq!(found.line_offset, 2);
    }

    #[test]
    fn test_hint_above_definition_walks_down() {
        let resolver = PositionResolver::default();
        let found = resolver
            .resolve_from_text(HANDLER, &ResolveRequest::new("handle", 3))
            .expect("Failed to resolve");

        assert_eq!(found.found_at_line, 5);
        assert_eq!(found.line_offset, 2);
        assert_eq!(found.position.character, 16);
    }

    #[test]
    fn test_template_expression_member_is_code() {
        let resolver = PositionResolver::default();
        let found = resolver
            .resolve_from_text(HANDLER, &ResolveRequest::new("input", 6))
            .expect("Failed to resolve");

        assert_eq!(found.found_at_line, 6);
        assert_eq!(found.position.character, 24);
    }

    #[test]
    fn test_narrow_radius_reports_radius_used() {
        let resolver = PositionResolver::new(1);
        let err = resolver
            .resolve_from_text(HANDLER, &ResolveRequest::new("ToolError", 4))
            .unwrap_err();

        match err {
            LocusError::SymbolResolution {
                reason,
                search_radius,
                line_hint,
                ..
            } => {
                assert_eq!(reason, ResolutionFailure::NotFoundWithinRadius);
                assert_eq!(search_radius, 1);
                assert_eq!(line_hint, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_context_around_match() {
        let window = extract_context(HANDLER, 8, 1);
        assert_eq!((window.start_line, window.end_line), (7, 9));
        assert!(window.content.starts_with("  if (!input.ok) {"));
    }

    #[tokio::test]
    async fn test_resolve_from_source_reads_through_reader() {
        let workspace = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(workspace.path().join("handler.js"), HANDLER).expect("Failed to write file");

        let reader = FsSourceReader::with_root(workspace.path());
        let query = Query::new("handler.js", "log", 10);

        let found = PositionResolver::default()
            .resolve_from_source(&reader, &query)
            .await
            .expect("Failed to resolve");
        assert_eq!(found.position, Position { line: 9, character: 2 });
    }

    #[tokio::test]
    async fn test_read_failure_is_file_access_error() {
        let reader = MemorySource::new();
        let query = Query::new("missing.js", "log", 1);

        let err = PositionResolver::default()
            .resolve_from_source(&reader, &query)
            .await
            .unwrap_err();
        assert!(matches!(err, LocusError::FileAccess { ref uri, .. } if uri == "missing.js"));
    }
}
