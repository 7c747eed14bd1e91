//! Single-line lexical classification.
//!
//! Labels every offset of a line as code, string literal, line comment or
//! template text. The scanner is a small state machine: each state has one
//! arm in [`step`], and every transition is spelled out there.
//!
//! # Limitations
//! - State resets at the start of every line. A string or template literal
//!   that continues across a line break is not tracked.
//! - Offsets are UTF-16 code units, matching `Position::character`.

use std::ops::Range;

/// Lexical context of a span of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalContext {
    /// Ordinary code, including `${...}` expressions inside templates.
    Code,
    /// Inside a single- or double-quoted string (quotes included).
    StringLiteral,
    /// From `//` to the end of the line.
    LineComment,
    /// Decorative text of a backtick template (backticks included).
    TemplateText,
}

impl LexicalContext {
    /// Whether identifiers in this context are real code occurrences.
    pub fn is_code(self) -> bool {
        matches!(self, LexicalContext::Code)
    }
}

/// A maximal run of offsets sharing one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSpan {
    /// Half-open UTF-16 offset range.
    pub range: Range<usize>,

    /// Context of every offset in `range`.
    pub context: LexicalContext,
}

/// Classification of a whole line: ordered, gap-free, non-overlapping spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineContexts {
    spans: Vec<ContextSpan>,
}

impl LineContexts {
    /// The spans, left to right.
    pub fn spans(&self) -> &[ContextSpan] {
        &self.spans
    }

    /// Context at a UTF-16 offset, or `None` past the end of the line.
    pub fn context_at(&self, offset: usize) -> Option<LexicalContext> {
        let idx = self
            .spans
            .partition_point(|span| span.range.end <= offset);
        self.spans
            .get(idx)
            .filter(|span| span.range.contains(&offset))
            .map(|span| span.context)
    }

    /// Whether the offset is in code context.
    pub fn is_code_at(&self, offset: usize) -> bool {
        self.context_at(offset).is_some_and(LexicalContext::is_code)
    }

    fn push(&mut self, range: Range<usize>, context: LexicalContext) {
        if range.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.context == context && last.range.end == range.start {
                last.range.end = range.end;
                return;
            }
        }
        self.spans.push(ContextSpan { range, context });
    }
}

/// Scanner state while walking a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    SingleQuote,
    DoubleQuote,
    TemplateText,
    /// Inside `${...}`; depth counts unclosed braces including the opening one.
    TemplateExpr { depth: usize },
    LineComment,
}

/// One transition: how many characters were consumed, their context, and
/// the state that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    width: usize,
    context: LexicalContext,
    next: ScanState,
}

impl Step {
    fn one(context: LexicalContext, next: ScanState) -> Self {
        Step {
            width: 1,
            context,
            next,
        }
    }

    fn two(context: LexicalContext, next: ScanState) -> Self {
        Step {
            width: 2,
            context,
            next,
        }
    }
}

/// Transition table.
fn step(state: ScanState, current: char, lookahead: Option<char>) -> Step {
    use LexicalContext::{Code, LineComment, StringLiteral, TemplateText};

    match state {
        ScanState::Code => match (current, lookahead) {
            ('/', Some('/')) => Step::two(LineComment, ScanState::LineComment),
            ('\'', _) => Step::one(StringLiteral, ScanState::SingleQuote),
            ('"', _) => Step::one(StringLiteral, ScanState::DoubleQuote),
            ('`', _) => Step::one(TemplateText, ScanState::TemplateText),
            _ => Step::one(Code, ScanState::Code),
        },
        ScanState::SingleQuote => match (current, lookahead) {
            ('\\', Some(_)) => Step::two(StringLiteral, state),
            ('\'', _) => Step::one(StringLiteral, ScanState::Code),
            _ => Step::one(StringLiteral, state),
        },
        ScanState::DoubleQuote => match (current, lookahead) {
            ('\\', Some(_)) => Step::two(StringLiteral, state),
            ('"', _) => Step::one(StringLiteral, ScanState::Code),
            _ => Step::one(StringLiteral, state),
        },
        ScanState::TemplateText => match (current, lookahead) {
            ('\\', Some(_)) => Step::two(TemplateText, state),
            ('$', Some('{')) => Step::two(Code, ScanState::TemplateExpr { depth: 1 }),
            ('`', _) => Step::one(TemplateText, ScanState::Code),
            _ => Step::one(TemplateText, state),
        },
        ScanState::TemplateExpr { depth } => match current {
            '{' => Step::one(Code, ScanState::TemplateExpr { depth: depth + 1 }),
            '}' if depth <= 1 => Step::one(Code, ScanState::TemplateText),
            '}' => Step::one(Code, ScanState::TemplateExpr { depth: depth - 1 }),
            _ => Step::one(Code, state),
        },
        ScanState::LineComment => Step::one(LineComment, state),
    }
}

/// Classify every offset of a single line.
///
/// Any trailing `\r` is treated as an ordinary character; callers split
/// lines before classifying.
pub fn classify(line: &str) -> LineContexts {
    let chars: Vec<char> = line.chars().collect();
    let mut contexts = LineContexts::default();
    let mut state = ScanState::Code;
    let mut idx = 0;
    let mut offset = 0;

    while idx < chars.len() {
        if state == ScanState::LineComment {
            let rest: usize = chars[idx..].iter().map(|c| c.len_utf16()).sum();
            contexts.push(offset..offset + rest, LexicalContext::LineComment);
            break;
        }

        let transition = step(state, chars[idx], chars.get(idx + 1).copied());
        let consumed = &chars[idx..idx + transition.width];
        let width: usize = consumed.iter().map(|c| c.len_utf16()).sum();

        contexts.push(offset..offset + width, transition.context);
        offset += width;
        idx += transition.width;
        state = transition.next;
    }

    contexts
}
