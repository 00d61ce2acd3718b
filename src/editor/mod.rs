//! The text-editing engine.
//!
//! A rope-backed [`TextBuffer`], a multi-cursor [`CursorSet`] and the
//! [`Editor`] that owns both. Front ends feed [`InputEvent`]s in and pull
//! [`RenderedLine`] snapshots out for the rows they display.

mod buffer;
mod cursor;
mod engine;
mod input;
mod io;
mod types;

#[cfg(test)]
mod tests;

pub use buffer::{LineEnding, TextBuffer};
pub use cursor::{Cursor, CursorSet};
pub use engine::Editor;
pub use input::{EditCommand, InputEvent, MoveCommand, PointerModifier};
pub use io::{EditorError, decode, read_all, write_all};
pub use types::{Position, Range, RenderedLine, Span, StyleId};
