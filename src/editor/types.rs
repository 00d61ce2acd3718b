//! Value types shared by the buffer, the cursor set and the render step.

use std::cmp::Ordering;
use std::fmt;

/// A location in the buffer.
///
/// `column` counts Unicode scalar values from the start of the line, so it
/// always falls on a character boundary. `column == line_len` is the line end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based character column.
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open span of the document, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: Position, end: Position) -> Self {
        assert!(start <= end, "inverted range: {start} > {end}");
        Self { start, end }
    }

    /// The range covering two positions in either order.
    pub fn spanning(a: Position, b: Position) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub const fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Index into the theme's style table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleId(pub u16);

impl StyleId {
    pub const DEFAULT: Self = Self(0);
    pub const LINE_NUMBER: Self = Self(1);
    pub const LINE_NUMBER_ACTIVE: Self = Self(2);
    pub const COMMENT: Self = Self(3);
    pub const KEYWORD: Self = Self(4);
    pub const TYPE: Self = Self(5);
    pub const STRING: Self = Self(6);
    pub const LITERAL: Self = Self(7);
    pub const FUNCTION: Self = Self(8);

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A style assignment over `[start, end)` bytes of one line.
///
/// Byte offsets (not character columns) so shaping libraries can consume
/// them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub style: StyleId,
}

impl Span {
    pub const fn new(start: usize, end: usize, style: StyleId) -> Self {
        Self { start, end, style }
    }
}

/// Snapshot of one visible row, produced by [`Editor::render`](super::Editor::render).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Zero-based line index.
    pub number: usize,
    pub text: String,
    pub spans: Vec<Span>,
    /// Character columns of every caret on this line, ascending.
    pub cursors: Vec<usize>,
    /// Selected character columns on this line, ascending.
    ///
    /// A segment may be empty (`start == end`) when only the line break is
    /// selected, e.g. an empty line in the middle of a multi-line selection.
    pub selections: Vec<std::ops::Range<usize>>,
}

impl RenderedLine {
    /// Whether the row carries a caret or part of a selection.
    pub fn is_active(&self) -> bool {
        !self.cursors.is_empty() || !self.selections.is_empty()
    }

    /// Byte offset of a character column in `text`.
    ///
    /// Columns past the end map to `text.len()`.
    pub fn byte_offset(&self, column: usize) -> usize {
        self.text
            .char_indices()
            .nth(column)
            .map_or(self.text.len(), |(idx, _)| idx)
    }
}
