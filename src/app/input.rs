use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::editor::{EditCommand, InputEvent, MoveCommand, PointerModifier};

use super::event_loop::ResizeDebouncer;

/// Lines scrolled per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Some(Message::Input(InputEvent::Edit(EditCommand::Paste(
                text.clone(),
            )))),
            Event::Resize(width, height) => {
                tracing::trace!(width, height, "resize queued");
                resize_debouncer.queue(*width, *height, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent) -> Option<Message> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let extend = key.modifiers.contains(KeyModifiers::SHIFT);
        let edit = |command| Some(Message::Input(InputEvent::Edit(command)));
        let step = |command| {
            Some(Message::Input(InputEvent::Move {
                command,
                extend,
            }))
        };

        match key.code {
            KeyCode::Char('q') if ctrl => Some(Message::Quit),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('a') if ctrl => edit(EditCommand::SelectAll),
            KeyCode::Char('c') if ctrl => edit(EditCommand::Copy),
            KeyCode::Char('x') if ctrl => edit(EditCommand::Cut),
            KeyCode::Char('v') if ctrl => Some(Message::PasteFromClipboard),
            KeyCode::Char('l') if ctrl => Some(Message::Redraw),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => None,
            KeyCode::Char(c) => Some(Message::Input(InputEvent::TextCommit(c.to_string()))),
            KeyCode::Tab => Some(Message::Input(InputEvent::TextCommit("\t".to_string()))),
            KeyCode::Enter => edit(EditCommand::InsertNewline),
            KeyCode::Backspace => edit(EditCommand::DeleteBackward),
            KeyCode::Delete => edit(EditCommand::DeleteForward),
            KeyCode::Left => step(MoveCommand::Left),
            KeyCode::Right => step(MoveCommand::Right),
            KeyCode::Up => step(MoveCommand::Up),
            KeyCode::Down => step(MoveCommand::Down),
            KeyCode::Home => step(MoveCommand::LineStart),
            KeyCode::End => step(MoveCommand::LineEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // The status bar is not part of the document.
                if mouse.row >= model.viewport.height() {
                    return None;
                }
                let modifier = if mouse.modifiers.contains(KeyModifiers::CONTROL)
                    || mouse.modifiers.contains(KeyModifiers::ALT)
                {
                    PointerModifier::Toggle
                } else if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                    PointerModifier::Extend
                } else {
                    PointerModifier::None
                };
                Some(Message::Click {
                    row: mouse.row,
                    column: mouse.column,
                    modifier,
                })
            }
            MouseEventKind::Drag(MouseButton::Left) => Some(Message::Drag {
                row: mouse.row,
                column: mouse.column,
            }),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
            _ => None,
        }
    }
}
