//! Theme colors as terminal styles.
//!
//! Truecolor throughout. Translucent theme colors (the selection) are
//! composited over the row background, since terminal cells have no alpha.

use ratatui::style::{Color, Modifier, Style};

use crate::editor::StyleId;
use crate::theme::{self, Theme};

/// Resolve a theme color against the background it is painted on.
pub fn color(color: theme::Color, background: theme::Color) -> Color {
    let opaque = if color.a == u8::MAX {
        color
    } else {
        color.over(background)
    };
    Color::Rgb(opaque.r, opaque.g, opaque.b)
}

/// Foreground and modifiers for a style id; no background.
pub fn text_style(theme: &Theme, id: StyleId) -> Style {
    let entry = theme.style(id);
    let mut style = Style::default().fg(color(entry.color, theme.background));
    if entry.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if entry.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    style
}

/// Background of a text row.
pub fn row_background(theme: &Theme, active: bool) -> Style {
    let bg = if active {
        theme.background_active
    } else {
        theme.background
    };
    Style::default().bg(color(bg, theme.background))
}

/// Background of a gutter cell.
pub fn gutter_background(theme: &Theme, active: bool) -> Style {
    let bg = if active {
        theme.gutter_background_active
    } else {
        theme.gutter_background
    };
    Style::default().bg(color(bg, theme.background))
}

/// Selection highlight over a row's background.
pub fn selection(theme: &Theme, active: bool) -> Style {
    let row = if active {
        theme.background_active
    } else {
        theme.background
    };
    Style::default().bg(color(theme.selection, row))
}

/// Block caret: cursor color behind the character, background in front.
pub fn caret(theme: &Theme) -> Style {
    Style::default()
        .bg(color(theme.cursor, theme.background))
        .fg(color(theme.background, theme.background))
}

/// Status bar colors.
pub fn status_bar(theme: &Theme) -> Style {
    Style::default()
        .bg(color(theme.gutter_background_active, theme.background))
        .fg(color(theme.style(StyleId::DEFAULT).color, theme.background))
}
