use crate::app::{Model, ToastLevel};
use crate::editor::{EditCommand, InputEvent, PointerModifier};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Forward an input event to the editor
    Input(InputEvent),
    /// Paste the current clipboard text
    PasteFromClipboard,

    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,

    // Mouse, in terminal cells relative to the text area
    /// Primary button pressed
    Click {
        row: u16,
        column: u16,
        modifier: PointerModifier,
    },
    /// Pointer moved with the primary button held
    Drag { row: u16, column: u16 },

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Repaint without changing state
    Redraw,

    // Application
    /// Write the document to disk
    Save,
    /// Quit the application
    Quit,
}

/// Pure state transition.
///
/// Side effects (clipboard publishing, file writes) run afterwards in
/// [`App::handle_message_side_effects`](crate::app::App).
pub fn update(mut model: Model, msg: Message) -> Model {
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::Input(event) => {
            if let Some(text) = model.editor.handle(event) {
                model.pending_clipboard = Some(text);
            }
            model.reveal_cursor();
        }
        Message::PasteFromClipboard => {
            if let Some(text) = model.clipboard.request() {
                model.editor.handle(InputEvent::Edit(EditCommand::Paste(text)));
                model.reveal_cursor();
            }
        }
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::Click {
            row,
            column,
            modifier,
        } => {
            let (line, column) = model.position_at(row, column);
            model.editor.handle(InputEvent::PointerDown {
                line,
                column,
                modifier,
            });
        }
        Message::Drag { row, column } => {
            let (line, column) = model.position_at(row, column);
            model.editor.handle(InputEvent::PointerDrag { line, column });
            model.reveal_cursor();
        }
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.layout.clear();
        }
        Message::Save | Message::Redraw => {}
        Message::Quit => {
            if model.editor.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}
