use std::ops::Range as CharRange;
use std::path::Path;

use super::buffer::{TextBuffer, normalize_newlines};
use super::cursor::{Cursor, CursorSet};
use super::input::{EditCommand, InputEvent, MoveCommand, PointerModifier};
use super::io::{self, EditorError};
use super::types::{Position, RenderedLine};
use crate::highlight::{Highlighter, PlainHighlighter};
use crate::perf;
use crate::theme::Theme;

/// One cursor's share of a batch edit: replace a char range with text.
type Edit<'t> = Option<(CharRange<usize>, &'t str)>;

/// The editing engine: buffer, cursors, theme and highlighter.
///
/// All mutation goes through `Editor`; [`render`](Self::render) is a pure
/// read over the current state.
pub struct Editor {
    buffer: TextBuffer,
    cursors: CursorSet,
    theme: Theme,
    highlighter: Box<dyn Highlighter>,
}

impl Editor {
    /// An empty, unnamed document.
    pub fn new() -> Self {
        Self::from_buffer(TextBuffer::empty())
    }

    /// A document holding `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self::from_buffer(TextBuffer::from_text(text))
    }

    fn from_buffer(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            cursors: CursorSet::default(),
            theme: Theme::default(),
            highlighter: Box::new(PlainHighlighter),
        }
    }

    /// Load a document from disk.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD and the buffer starts out dirty,
    /// since saving it will not reproduce the original bytes.
    pub fn open(path: &Path) -> Result<Self, EditorError> {
        let _scope = perf::scope("editor.open");
        let bytes = io::read_all(path)?;
        let (text, lossy) = io::decode(&bytes);
        let mut editor = Self::from_text(&text);
        if lossy {
            tracing::warn!(
                path = %path.display(),
                "file is not valid UTF-8; invalid sequences replaced"
            );
            editor.buffer.mark_dirty();
        }
        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            lines = editor.total_lines(),
            "opened"
        );
        Ok(editor)
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Box<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Write the buffer to `path`; the buffer is marked clean on success.
    pub fn save(&mut self, path: &Path) -> Result<(), EditorError> {
        let bytes = self.buffer.to_bytes();
        io::write_all(path, &bytes)?;
        self.buffer.mark_clean();
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved");
        Ok(())
    }

    // --- Queries ---

    pub fn total_lines(&self) -> usize {
        self.buffer.total_lines()
    }

    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub const fn cursors(&self) -> &CursorSet {
        &self.cursors
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Styled snapshots of lines `[start_line, end_line)`.
    ///
    /// The window is clipped to the document. Only the requested lines and
    /// the cursors touching them are visited.
    pub fn render(&self, start_line: usize, end_line: usize) -> Vec<RenderedLine> {
        let _scope = perf::scope("editor.render");
        let end_line = end_line.min(self.total_lines());
        let start_line = start_line.min(end_line);

        let mut lines: Vec<RenderedLine> = (start_line..end_line)
            .map(|number| self.bare_line(number))
            .collect();
        for cursor in self.cursors.overlapping_lines(start_line, end_line) {
            let range = cursor.range();
            let first = range.start.line.max(start_line);
            let last = range.end.line.min(end_line - 1);
            for number in first..=last {
                self.decorate(&mut lines[number - start_line], cursor);
            }
        }
        lines
    }

    /// Snapshot of a single line.
    ///
    /// # Panics
    ///
    /// Panics if `line >= total_lines()`.
    pub fn render_line(&self, line: usize) -> RenderedLine {
        let total = self.total_lines();
        assert!(line < total, "line {line} out of bounds ({total} lines)");
        let mut rendered = self.bare_line(line);
        for cursor in self.cursors.overlapping_lines(line, line + 1) {
            self.decorate(&mut rendered, cursor);
        }
        rendered
    }

    fn bare_line(&self, number: usize) -> RenderedLine {
        let text = self.buffer.line_text(number).into_owned();
        let spans = self.highlighter.highlight_line(&text);
        RenderedLine {
            number,
            text,
            spans,
            cursors: Vec::new(),
            selections: Vec::new(),
        }
    }

    /// Add `cursor`'s caret and its selection segment on this line.
    fn decorate(&self, line: &mut RenderedLine, cursor: &Cursor) {
        let number = line.number;
        if cursor.point.line == number {
            line.cursors.push(cursor.point.column);
        }
        if cursor.is_collapsed() {
            return;
        }
        let range = cursor.range();
        if number < range.start.line || number > range.end.line {
            return;
        }
        let start = if number == range.start.line {
            range.start.column
        } else {
            0
        };
        let end = if number == range.end.line {
            range.end.column
        } else {
            self.buffer.line_len(number)
        };
        // An empty segment still matters when the line break is selected.
        if start < end || number < range.end.line {
            line.selections.push(start..end);
        }
    }

    // --- Navigation ---

    pub fn move_left(&mut self, extend: bool) {
        self.cursors.move_left(&self.buffer, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.cursors.move_right(&self.buffer, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        self.cursors.move_up(&self.buffer, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        self.cursors.move_down(&self.buffer, extend);
    }

    pub fn move_to_beginning_of_line(&mut self, extend: bool) {
        self.cursors.move_to_beginning_of_line(extend);
    }

    pub fn move_to_end_of_line(&mut self, extend: bool) {
        self.cursors.move_to_end_of_line(&self.buffer, extend);
    }

    /// Replace all cursors with one at the (clamped) position.
    pub fn set_cursor(&mut self, column: usize, line: usize) {
        let pos = self.buffer.clamp(Position::new(line, column));
        self.cursors.set_cursor(pos);
    }

    /// Add a cursor at the (clamped) position, or remove the one there.
    pub fn toggle_cursor(&mut self, column: usize, line: usize) {
        let pos = self.buffer.clamp(Position::new(line, column));
        self.cursors.toggle_cursor(pos);
    }

    /// Move the newest cursor's point to the (clamped) position.
    pub fn extend_selection(&mut self, column: usize, line: usize) {
        let pos = self.buffer.clamp(Position::new(line, column));
        self.cursors.extend_selection(pos);
    }

    pub fn select_all(&mut self) {
        self.cursors.select_all(&self.buffer);
    }

    // --- Editing ---

    /// Replace every selection (or insert at every caret) with `text`.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let edits: Vec<Edit<'_>> = self
            .cursors
            .iter()
            .map(|cursor| Some((self.char_range(cursor), text)))
            .collect();
        self.apply(edits);
    }

    pub fn insert_newline(&mut self) {
        self.insert_text("\n");
    }

    /// Delete each selection, or the character before each caret.
    pub fn delete_backward(&mut self) {
        let edits: Vec<Edit<'_>> = self
            .cursors
            .iter()
            .map(|cursor| {
                let range = self.char_range(cursor);
                if !range.is_empty() {
                    Some((range, ""))
                } else if range.start > 0 {
                    Some((range.start - 1..range.start, ""))
                } else {
                    None
                }
            })
            .collect();
        self.apply(edits);
    }

    /// Delete each selection, or the character after each caret.
    pub fn delete_forward(&mut self) {
        let len = self.buffer.len_chars();
        let edits: Vec<Edit<'_>> = self
            .cursors
            .iter()
            .map(|cursor| {
                let range = self.char_range(cursor);
                if !range.is_empty() {
                    Some((range, ""))
                } else if range.end < len {
                    Some((range.end..range.end + 1, ""))
                } else {
                    None
                }
            })
            .collect();
        self.apply(edits);
    }

    /// Selected text of every non-collapsed cursor, in order, joined by `\n`.
    pub fn copy(&self) -> String {
        self.cursors
            .iter()
            .filter(|cursor| !cursor.is_collapsed())
            .map(|cursor| self.buffer.text_in(cursor.range()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Like [`copy`](Self::copy), then delete the selections.
    pub fn cut(&mut self) -> String {
        let text = self.copy();
        let edits: Vec<Edit<'_>> = self
            .cursors
            .iter()
            .map(|cursor| {
                let range = self.char_range(cursor);
                (!range.is_empty()).then_some((range, ""))
            })
            .collect();
        self.apply(edits);
        text
    }

    /// Insert clipboard text.
    ///
    /// With N > 1 cursors and text of exactly N lines (one trailing newline
    /// ignored), cursor *i* receives line *i*. Otherwise every cursor
    /// receives the whole text.
    pub fn paste(&mut self, text: &str) {
        let text = normalize_newlines(text);
        let count = self.cursors.len();
        if count > 1 {
            let body = text.strip_suffix('\n').unwrap_or(&text);
            let pieces: Vec<&str> = body.split('\n').collect();
            if pieces.len() == count {
                let edits: Vec<Edit<'_>> = self
                    .cursors
                    .iter()
                    .zip(&pieces)
                    .map(|(cursor, piece)| Some((self.char_range(cursor), *piece)))
                    .collect();
                self.apply(edits);
                return;
            }
        }
        self.insert_text(&text);
    }

    /// Dispatch one input event.
    ///
    /// Returns text to publish to the clipboard for copy and cut.
    pub fn handle(&mut self, event: InputEvent) -> Option<String> {
        match event {
            InputEvent::Move { command, extend } => match command {
                MoveCommand::Left => self.move_left(extend),
                MoveCommand::Right => self.move_right(extend),
                MoveCommand::Up => self.move_up(extend),
                MoveCommand::Down => self.move_down(extend),
                MoveCommand::LineStart => self.move_to_beginning_of_line(extend),
                MoveCommand::LineEnd => self.move_to_end_of_line(extend),
            },
            InputEvent::Edit(command) => return self.edit(command),
            InputEvent::PointerDown {
                line,
                column,
                modifier,
            } => {
                if line >= self.total_lines() {
                    return None;
                }
                match modifier {
                    PointerModifier::None => self.set_cursor(column, line),
                    PointerModifier::Toggle => self.toggle_cursor(column, line),
                    PointerModifier::Extend => self.extend_selection(column, line),
                }
            }
            InputEvent::PointerDrag { line, column } => {
                if line < self.total_lines() {
                    self.extend_selection(column, line);
                }
            }
            InputEvent::TextCommit(text) => self.insert_text(&text),
        }
        None
    }

    fn edit(&mut self, command: EditCommand) -> Option<String> {
        match command {
            EditCommand::InsertNewline => self.insert_newline(),
            EditCommand::DeleteBackward => self.delete_backward(),
            EditCommand::DeleteForward => self.delete_forward(),
            EditCommand::SelectAll => self.select_all(),
            EditCommand::Copy => return Some(self.copy()).filter(|text| !text.is_empty()),
            EditCommand::Cut => return Some(self.cut()).filter(|text| !text.is_empty()),
            EditCommand::Paste(text) => self.paste(&text),
        }
        None
    }

    fn char_range(&self, cursor: &Cursor) -> CharRange<usize> {
        let range = cursor.range();
        self.buffer.char_index(range.start)..self.buffer.char_index(range.end)
    }

    /// Apply one edit per cursor, last cursor first.
    ///
    /// `edits[i]` belongs to the i-th cursor in document order. Earlier
    /// cursors sit before every later edit so their offsets stay valid; each
    /// applied edit shifts the cursors after it by its length delta.
    fn apply(&mut self, edits: Vec<Edit<'_>>) {
        debug_assert_eq!(edits.len(), self.cursors.len());
        let mut offsets: Vec<(usize, usize)> = self
            .cursors
            .iter()
            .map(|cursor| {
                (
                    self.buffer.char_index(cursor.point),
                    self.buffer.char_index(cursor.anchor),
                )
            })
            .collect();

        let mut applied = 0_usize;
        for (idx, edit) in edits.into_iter().enumerate().rev() {
            let Some((range, text)) = edit else {
                continue;
            };
            let removed = range.len();
            let start = range.start;
            self.buffer.remove(range);
            let inserted = self.buffer.insert_at(start, text);
            let caret = start + inserted;
            offsets[idx] = (caret, caret);
            for (point, anchor) in &mut offsets[idx + 1..] {
                *point = *point - removed + inserted;
                *anchor = *anchor - removed + inserted;
            }
            applied += 1;
        }
        if applied == 0 {
            return;
        }

        let positions: Vec<(Position, Position)> = offsets
            .into_iter()
            .map(|(point, anchor)| {
                (
                    self.buffer.position_of(point),
                    self.buffer.position_of(anchor),
                )
            })
            .collect();
        self.cursors.reposition(&positions);
        tracing::debug!(
            edits = applied,
            cursors = self.cursors.len(),
            lines = self.total_lines(),
            "batch edit applied"
        );
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("buffer", &self.buffer)
            .field("cursors", &self.cursors.len())
            .finish_non_exhaustive()
    }
}
