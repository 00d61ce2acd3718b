//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod clipboard;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use clipboard::{Clipboard, MemoryClipboard, TerminalClipboard};
pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::theme::Theme;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    theme: Theme,
    highlighting: bool,
}

impl App {
    /// Create a new application for the given file.
    ///
    /// A missing file is created on the first save.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            theme: Theme::default(),
            highlighting: true,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable syntax highlighting.
    #[must_use]
    pub const fn with_highlighting(mut self, enabled: bool) -> Self {
        self.highlighting = enabled;
        self
    }
}
