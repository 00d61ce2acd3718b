use std::borrow::Cow;

use ropey::{Rope, RopeSlice};

use super::types::{Position, Range};

/// Line terminator written when the buffer is serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the terminator from the first line break in `text`.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if text[..idx].ends_with('\r') => Self::CrLf,
            _ => Self::Lf,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Document content as lines of Unicode text, backed by a rope.
///
/// All public offsets are character based. Line terminators are never part
/// of line content: `\r\n` and lone `\r` are folded into `\n` on the way in
/// and re-expanded according to [`LineEnding`] on the way out.
pub struct TextBuffer {
    rope: Rope,
    line_ending: LineEnding,
    dirty: bool,
}

impl TextBuffer {
    /// Create a buffer from a string.
    pub fn from_text(text: &str) -> Self {
        let line_ending = LineEnding::detect(text);
        Self {
            rope: Rope::from_str(&normalize_newlines(text)),
            line_ending,
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Total number of lines in the buffer. Never zero.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Same as [`line_count`](Self::line_count); the name viewport code uses.
    pub fn total_lines(&self) -> usize {
        self.line_count()
    }

    /// Content of a line without its terminator.
    ///
    /// Borrowed when the line lives in a single rope chunk.
    ///
    /// # Panics
    ///
    /// Panics if `line >= line_count()`.
    pub fn line_text(&self, line: usize) -> Cow<'_, str> {
        let content = self.line_slice(line);
        content
            .as_str()
            .map_or_else(|| Cow::Owned(content.to_string()), Cow::Borrowed)
    }

    /// Length of a line in characters, terminator excluded.
    ///
    /// # Panics
    ///
    /// Panics if `line >= line_count()`.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_slice(line).len_chars()
    }

    /// Total number of characters, line breaks included.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Position just past the last character.
    pub fn end_position(&self) -> Position {
        let last = self.line_count() - 1;
        Position::new(last, self.line_len(last))
    }

    /// The full text content with `\n` line breaks.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text in `range`, line breaks as `\n`.
    pub fn text_in(&self, range: Range) -> String {
        let start = self.char_index(range.start);
        let end = self.char_index(range.end);
        self.rope.slice(start..end).to_string()
    }

    /// Serialized content using the buffer's line ending.
    pub fn to_bytes(&self) -> Vec<u8> {
        let text = self.text();
        match self.line_ending {
            LineEnding::Lf => text.into_bytes(),
            LineEnding::CrLf => text.replace('\n', "\r\n").into_bytes(),
        }
    }

    /// Insert `text` at `pos`, returning the position just after it.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a valid position in this buffer.
    pub fn insert(&mut self, pos: Position, text: &str) -> Position {
        let start = self.char_index(pos);
        let inserted = self.insert_at(start, text);
        self.position_of(start + inserted)
    }

    /// Remove the text in `range`, merging lines when it spans a break.
    ///
    /// # Panics
    ///
    /// Panics if either end of `range` is not a valid position.
    pub fn delete(&mut self, range: Range) {
        let start = self.char_index(range.start);
        let end = self.char_index(range.end);
        self.remove(start..end);
    }

    /// Convert a position to a rope character index.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the buffer.
    pub fn char_index(&self, pos: Position) -> usize {
        let line_count = self.line_count();
        assert!(
            pos.line < line_count,
            "line {} out of bounds ({line_count} lines)",
            pos.line
        );
        let len = self.line_len(pos.line);
        assert!(
            pos.column <= len,
            "column {} out of bounds on line {} ({len} chars)",
            pos.column,
            pos.line
        );
        self.rope.line_to_char(pos.line) + pos.column
    }

    /// Convert a rope character index back to a position.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len_chars()`.
    pub fn position_of(&self, idx: usize) -> Position {
        let line = self.rope.char_to_line(idx);
        Position::new(line, idx - self.rope.line_to_char(line))
    }

    /// Clamp arbitrary coordinates into the buffer.
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count() - 1);
        Position::new(line, pos.column.min(self.line_len(line)))
    }

    /// Insert at a character index; returns the number of characters added.
    pub(crate) fn insert_at(&mut self, idx: usize, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let text = normalize_newlines(text);
        self.rope.insert(idx, &text);
        self.dirty = true;
        text.chars().count()
    }

    pub(crate) fn remove(&mut self, range: std::ops::Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.rope.remove(range);
        self.dirty = true;
    }

    fn line_slice(&self, line: usize) -> RopeSlice<'_> {
        let line_count = self.line_count();
        assert!(line < line_count, "line {line} out of bounds ({line_count} lines)");
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            slice.slice(..len - 1)
        } else {
            slice
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("line_ending", &self.line_ending)
            .field("dirty", &self.dirty)
            .finish()
    }
}

/// Fold `\r\n` and lone `\r` into `\n`.
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
