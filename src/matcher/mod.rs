//! Word-bounded symbol matching on a single line.
//!
//! A match is a maximal run of identifier characters equal to the symbol
//! name. Only matches whose first offset is code context count as
//! occurrences; the rest are still reported by [`find_candidates`] for
//! diagnostics.

use crate::lexical::{classify, LexicalContext, LineContexts};

/// A word-bounded match of the symbol, in any context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// UTF-16 offset of the first character.
    pub offset: usize,

    /// Lexical context at `offset`.
    pub context: LexicalContext,
}

/// Identifier characters: letters, digits, `_` and `$`.
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Length of a symbol name in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Byte offsets of word-bounded matches, left to right.
fn word_bounded_matches<'a>(
    line: &'a str,
    symbol_name: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    line.match_indices(symbol_name)
        .map(|(byte, _)| byte)
        .filter(move |&byte| {
            let before = line[..byte].chars().next_back();
            let after = line[byte + symbol_name.len()..].chars().next();
            !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
        })
}

/// All word-bounded matches with their lexical context.
pub fn find_candidates(line: &str, symbol_name: &str) -> Vec<Candidate> {
    if symbol_name.is_empty() {
        return Vec::new();
    }
    let contexts = classify(line);
    candidates_with(line, symbol_name, &contexts)
}

fn candidates_with(line: &str, symbol_name: &str, contexts: &LineContexts) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    // Running UTF-16 offset so the line is walked once.
    let mut last_byte = 0;
    let mut last_offset = 0;

    for byte in word_bounded_matches(line, symbol_name) {
        last_offset += utf16_len(&line[last_byte..byte]);
        last_byte = byte;

        let context = contexts
            .context_at(last_offset)
            .unwrap_or(LexicalContext::Code);
        candidates.push(Candidate {
            offset: last_offset,
            context,
        });
    }

    candidates
}

/// UTF-16 offsets of code-context occurrences of `symbol_name`, left to right.
pub fn find_occurrences(line: &str, symbol_name: &str) -> Vec<usize> {
    find_candidates(line, symbol_name)
        .into_iter()
        .filter(|candidate| candidate.context.is_code())
        .map(|candidate| candidate.offset)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_every_code_occurrence_in_order() {
        assert_eq!(find_occurrences("const x = x + x;", "x"), vec![6, 10, 14]);
    }

    #[test]
    fn test_respects_word_boundaries() {
        assert!(find_occurrences("fooBar + barfoo + foo_1", "foo").is_empty());
        assert_eq!(find_occurrences("foo(fooBar, foo)", "foo"), vec![0, 12]);
    }

    #[test]
    fn test_dollar_is_identifier_char() {
        assert!(find_occurrences("$foo + foo$", "foo").is_empty());
        assert_eq!(find_occurrences("$foo + foo", "$foo"), vec![0]);
    }

    #[test]
    fn test_skips_strings_comments_and_template_text() {
        let line = r#"'foo' + "foo" + `foo` // foo"#;
        assert!(find_occurrences(line, "foo").is_empty());

        let candidates = find_candidates(line, "foo");
        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|c| !c.context.is_code()));
    }

    #[test]
    fn test_matches_inside_template_expression() {
        let line = "log(`value: ${foo({ deep: foo })}`)";
        let offsets = find_occurrences(line, "foo");
        assert_eq!(offsets.len(), 2);
        assert_eq!(offsets[0], 14);
    }

    #[test]
    fn test_offsets_count_utf16_units() {
        // The emoji is two UTF-16 units but four bytes.
        assert_eq!(find_occurrences("/*😀*/ x", "x"), vec![7]);
    }

    #[test]
    fn test_empty_symbol_matches_nothing() {
        assert!(find_occurrences("anything", "").is_empty());
    }
}
