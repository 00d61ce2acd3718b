use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use super::*;
use crate::app::{Message, Model, update};
use crate::editor::{EditCommand, Editor, InputEvent};
use crate::theme::Theme;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn draw(model: &mut Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[test]
fn test_render_shows_numbered_lines() {
    let mut model = Model::new(Editor::from_text("hello\nworld"), None, (80, 24));
    let buffer = draw(&mut model);
    assert_eq!(row_text(&buffer, 0), "  1  hello");
    assert_eq!(row_text(&buffer, 1), "  2  world");
    assert_eq!(row_text(&buffer, 2), "");
}

#[test]
fn test_render_status_bar_on_last_row() {
    let mut model = Model::new(
        Editor::from_text("abc"),
        Some(PathBuf::from("/tmp/notes.txt")),
        (80, 24),
    );
    let buffer = draw(&mut model);
    assert_eq!(row_text(&buffer, 23), " notes.txt  Ln 1, Col 1");
}

#[test]
fn test_status_text_reports_dirty_and_cursor_count() {
    let model = Model::new(Editor::from_text("ab\ncd"), None, (80, 24));
    let model = update(
        model,
        Message::Input(InputEvent::Edit(EditCommand::SelectAll)),
    );
    let model = update(
        model,
        Message::Input(InputEvent::TextCommit("x\ny".to_string())),
    );
    assert_eq!(status_text(&model), " [No Name] [+]  Ln 2, Col 2");
}

#[test]
fn test_render_paints_caret() {
    let mut model = Model::new(Editor::from_text("hello"), None, (80, 24));
    let buffer = draw(&mut model);
    let caret = style::caret(&Theme::dark());
    assert_eq!(buffer[(5, 0)].bg, caret.bg.unwrap());
    assert_ne!(buffer[(6, 0)].bg, caret.bg.unwrap());
}

#[test]
fn test_render_paints_selection_across_lines() {
    let model = Model::new(Editor::from_text("ab\ncd"), None, (80, 24));
    let mut model = update(
        model,
        Message::Input(InputEvent::Edit(EditCommand::SelectAll)),
    );
    let buffer = draw(&mut model);
    let theme = Theme::dark();
    let selected = style::selection(&theme, true).bg.unwrap();
    assert_eq!(buffer[(5, 0)].bg, selected);
    assert_eq!(buffer[(6, 0)].bg, selected);
    assert_eq!(buffer[(5, 1)].bg, selected);
    // Caret sits after "cd" on the last line.
    assert_eq!(buffer[(7, 1)].bg, style::caret(&theme).bg.unwrap());
}

#[test]
fn test_render_follows_viewport_offset() {
    let text = (1..=50).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let model = Model::new(Editor::from_text(&text), None, (80, 24));
    let mut model = update(model, Message::ScrollDown(10));
    let buffer = draw(&mut model);
    assert_eq!(row_text(&buffer, 0), "  11  line 11");
}

#[test]
fn test_render_expands_tabs() {
    let mut model = Model::new(Editor::from_text("\tx"), None, (80, 24));
    let buffer = draw(&mut model);
    assert_eq!(row_text(&buffer, 0), "  1      x");
}

#[test]
fn test_layout_cache_evicts_lines_scrolled_away() {
    let text = (1..=100).map(|i| format!("row {i}")).collect::<Vec<_>>().join("\n");
    let mut model = Model::new(Editor::from_text(&text), None, (80, 24));
    draw(&mut model);
    let first = model.layout.len();
    assert!(first > 0);

    let mut model = update(model, Message::PageDown);
    draw(&mut model);
    // Every entry left over from the first page was swept.
    assert!(model.layout.len() <= first);
    assert_eq!(model.layout.generation(), 2);
}
