// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorError)
    clippy::module_name_repetitions
)]

//! # Platon
//!
//! A multi-cursor plain-text editor for the terminal.
//!
//! The editing core is independent of the terminal:
//! - [`editor::TextBuffer`] stores the document as a rope of lines
//! - [`editor::CursorSet`] keeps any number of sorted, non-overlapping cursors
//! - [`editor::Editor`] applies edits at every cursor and renders line ranges
//!   into [`editor::RenderedLine`] values
//! - [`layout::LayoutCache`] memoizes shaped lines between frames and evicts
//!   whatever a frame did not use
//!
//! ## Architecture
//!
//! The terminal front end uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Buffer, cursors and the editing engine
//! - [`layout`]: Generation-evicting layout cache
//! - [`highlight`]: Syntax highlighting
//! - [`theme`]: Colors and text styles
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod layout;
pub mod perf;
pub mod theme;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Editor, InputEvent, Position, Range, RenderedLine};
    pub use crate::layout::{LayoutCache, Shaper};
    pub use crate::theme::Theme;
    pub use crate::ui::viewport::Viewport;
}
