use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = model.editor.theme();
    let bar = Paragraph::new(status_text(model)).style(match model.active_toast() {
        Some((_, ToastLevel::Warning)) => Style::default().bg(Color::Yellow).fg(Color::Black),
        Some((_, ToastLevel::Error)) => Style::default().bg(Color::Red).fg(Color::White),
        _ => style::status_bar(theme),
    });
    frame.render_widget(bar, area);
}

/// Status line: file, modified marker, newest cursor, cursor count, toast.
pub fn status_text(model: &Model) -> String {
    let filename = model
        .file_path
        .as_deref()
        .and_then(std::path::Path::file_name)
        .map_or_else(|| "[No Name]".to_string(), |s| s.to_string_lossy().to_string());
    let dirty = if model.editor.is_dirty() { " [+]" } else { "" };

    let cursors = model.editor.cursors();
    let point = cursors.newest().point;
    let count = match cursors.len() {
        1 => String::new(),
        n => format!("  {n} cursors"),
    };

    let toast = model
        .active_toast()
        .map_or_else(String::new, |(message, _)| format!("  {message}"));

    format!(
        " {filename}{dirty}  Ln {}, Col {}{count}{toast}",
        point.line + 1,
        point.column + 1
    )
}
