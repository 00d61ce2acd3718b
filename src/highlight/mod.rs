//! Per-line style classification.
//!
//! The editor treats highlighting as an opaque collaborator: given one line
//! of text it receives sorted, non-overlapping byte spans tagged with a
//! [`StyleId`]. [`SyntectHighlighter`] derives those from Sublime Text syntax
//! scopes via syntect; [`PlainHighlighter`] returns nothing.

use std::path::Path;
use std::sync::OnceLock;

use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};

use crate::editor::{Span, StyleId};

/// Produces style spans for a single line.
pub trait Highlighter {
    /// Spans over `text` as byte offsets, sorted and non-overlapping.
    ///
    /// Unstyled text is left uncovered; it renders with [`StyleId::DEFAULT`].
    fn highlight_line(&self, text: &str) -> Vec<Span>;
}

/// No highlighting at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight_line(&self, _text: &str) -> Vec<Span> {
        Vec::new()
    }
}

/// Scope-based classifier for one syntax.
///
/// Each line is parsed from a fresh state, so constructs spanning lines
/// (block comments, raw strings) are only recognized on their opening line.
/// That keeps the cost proportional to the rows being rendered.
#[derive(Debug, Clone, Copy)]
pub struct SyntectHighlighter {
    syntax: &'static SyntaxReference,
}

impl SyntectHighlighter {
    /// Highlighter for a language token (`"rs"`, `"rust"`, `"Python"`, ...).
    pub fn for_token(token: &str) -> Option<Self> {
        let syntax_set = syntax_set();
        syntax_set
            .find_syntax_by_token(token)
            .or_else(|| syntax_set.find_syntax_by_name(token))
            .map(|syntax| Self { syntax })
    }

    /// Highlighter chosen from a file's extension.
    pub fn for_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        syntax_set()
            .find_syntax_by_extension(extension)
            .filter(|syntax| syntax.name != "Plain Text")
            .map(|syntax| Self { syntax })
    }

    pub fn syntax_name(&self) -> &str {
        &self.syntax.name
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight_line(&self, text: &str) -> Vec<Span> {
        let syntax_set = syntax_set();
        // The bundled grammars expect newline-terminated input.
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        let mut state = ParseState::new(self.syntax);
        let ops = match state.parse_line(&line, syntax_set) {
            Ok(ops) => ops,
            Err(err) => {
                tracing::debug!(syntax = %self.syntax.name, %err, "line parse failed");
                return Vec::new();
            }
        };

        let mut stack = ScopeStack::new();
        let mut spans: Vec<Span> = Vec::new();
        for (range, op) in ScopeRangeIterator::new(&ops, &line) {
            if stack.apply(op).is_err() {
                break;
            }
            let end = range.end.min(text.len());
            if range.start >= end {
                continue;
            }
            let style = classify(stack.as_slice());
            if style == StyleId::DEFAULT {
                continue;
            }
            match spans.last_mut() {
                Some(last) if last.end == range.start && last.style == style => last.end = end,
                _ => spans.push(Span::new(range.start, end, style)),
            }
        }
        spans
    }
}

/// Pick a highlighter for `path`, or plain text when disabled or unknown.
pub fn highlighter_for(path: Option<&Path>, enabled: bool) -> Box<dyn Highlighter> {
    if !enabled {
        return Box::new(PlainHighlighter);
    }
    match path.and_then(SyntectHighlighter::for_path) {
        Some(highlighter) => {
            tracing::debug!(syntax = highlighter.syntax_name(), "highlighting enabled");
            Box::new(highlighter)
        }
        None => Box::new(PlainHighlighter),
    }
}

/// Map the innermost matching scope to a style.
fn classify(stack: &[Scope]) -> StyleId {
    let rules = scope_rules();
    stack
        .iter()
        .rev()
        .find_map(|scope| {
            rules
                .iter()
                .find(|(selector, _)| selector.is_prefix_of(*scope))
                .map(|(_, style)| *style)
        })
        .unwrap_or(StyleId::DEFAULT)
}

fn scope_rules() -> &'static [(Scope, StyleId)] {
    static RULES: OnceLock<Vec<(Scope, StyleId)>> = OnceLock::new();
    RULES.get_or_init(|| {
        // Order matters: more specific selectors first.
        [
            ("comment", StyleId::COMMENT),
            ("string", StyleId::STRING),
            ("constant.character.escape", StyleId::LITERAL),
            ("constant", StyleId::LITERAL),
            ("entity.name.function", StyleId::FUNCTION),
            ("support.function", StyleId::FUNCTION),
            ("variable.function", StyleId::FUNCTION),
            ("entity.name.type", StyleId::TYPE),
            ("entity.name.class", StyleId::TYPE),
            ("entity.name.struct", StyleId::TYPE),
            ("entity.name.enum", StyleId::TYPE),
            ("support.type", StyleId::TYPE),
            ("support.class", StyleId::TYPE),
            ("storage.type", StyleId::TYPE),
            ("storage", StyleId::KEYWORD),
            ("keyword.operator", StyleId::DEFAULT),
            ("keyword", StyleId::KEYWORD),
        ]
        .into_iter()
        .filter_map(|(selector, style)| Scope::new(selector).ok().map(|scope| (scope, style)))
        .collect()
    })
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}
