//! Input events the editor understands.
//!
//! Front ends translate their native key, pointer and IME events into these
//! and hand them to [`Editor::handle`](super::Editor::handle).

/// Cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveCommand {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Text and selection commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    SelectAll,
    Copy,
    Cut,
    Paste(String),
}

/// Modifier state of a pointer press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerModifier {
    /// Plain click: place a single cursor.
    #[default]
    None,
    /// Add or remove a cursor (Ctrl-click).
    Toggle,
    /// Extend the newest selection (Shift-click).
    Extend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Move { command: MoveCommand, extend: bool },
    Edit(EditCommand),
    /// Pointer press at a document position (already hit-tested).
    PointerDown {
        line: usize,
        column: usize,
        modifier: PointerModifier,
    },
    /// Pointer motion with the button held.
    PointerDrag { line: usize, column: usize },
    /// Committed text from the keyboard or an input method.
    TextCommit(String),
}
