use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::Editor;
use crate::layout::LayoutCache;
use crate::ui::TerminalShaper;
use crate::ui::viewport::Viewport;

use super::clipboard::{Clipboard, MemoryClipboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document being edited
    pub editor: Editor,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Shaped lines reused across frames
    pub layout: LayoutCache<TerminalShaper>,
    /// Where copied text goes
    pub clipboard: Box<dyn Clipboard>,
    /// Copied or cut text waiting to be published
    pub pending_clipboard: Option<String>,
    /// Path the document is saved to
    pub file_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Quit was requested once with unsaved changes
    pub quit_confirmed: bool,
    toast: Option<Toast>,
}

impl Model {
    /// Create a new model. `terminal_size` includes the status row.
    pub fn new(editor: Editor, file_path: Option<PathBuf>, terminal_size: (u16, u16)) -> Self {
        let total_lines = editor.total_lines();
        Self {
            editor,
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(1),
                total_lines,
            ),
            layout: LayoutCache::default(),
            clipboard: Box::new(MemoryClipboard::default()),
            pending_clipboard: None,
            file_path,
            should_quit: false,
            quit_confirmed: false,
            toast: None,
        }
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Document position under a text-area cell.
    ///
    /// Returns `(line, column)`. Cells in the gutter map to column 0 and
    /// cells past the end of a line map to its end. Rows below the document
    /// give a line number past the last line.
    pub fn position_at(&mut self, row: u16, x: u16) -> (usize, usize) {
        let line = self.viewport.line_at_row(row);
        let total = self.editor.total_lines();
        if line >= total {
            return (line, usize::MAX);
        }
        let gutter = crate::ui::gutter_width(total).min(self.viewport.width());
        let Some(x) = x.checked_sub(gutter) else {
            return (line, 0);
        };
        let rendered = self.editor.render_line(line);
        let shaped = self.layout.layout_for_line(self.editor.theme(), &rendered);
        (line, shaped.x_to_column(usize::from(x)))
    }

    /// Follow the newest cursor after an edit or a move.
    pub(super) fn reveal_cursor(&mut self) {
        self.viewport.set_total_lines(self.editor.total_lines());
        let line = self.editor.cursors().newest().point.line;
        self.viewport.ensure_visible(line);
    }

    /// Write the document to its file, reporting the outcome as a toast.
    pub(super) fn save(&mut self) {
        let Some(path) = self.file_path.clone() else {
            self.show_toast(ToastLevel::Warning, "No file name");
            return;
        };
        match self.editor.save(&path) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().to_string());
                self.show_toast(ToastLevel::Info, format!("Saved {name}"));
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "save failed");
                self.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Editor::default(), None, (80, 24))
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("editor", &self.editor)
            .field("viewport", &self.viewport)
            .field("file_path", &self.file_path)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}
