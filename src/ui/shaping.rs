//! Cell-grid shaping for terminal output.

use ratatui::text::{Line, Span as TextSpan};
use unicode_width::UnicodeWidthChar;

use crate::editor::{Span, StyleId};
use crate::layout::Shaper;
use crate::theme::Theme;

use super::style;

/// Tab stops every this many cells.
pub const TAB_WIDTH: usize = 4;

/// Shapes lines into styled ratatui [`Line`]s.
///
/// Tabs expand to the next tab stop and control characters show as their
/// Unicode control pictures, so every character occupies a known number of
/// cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalShaper;

/// A shaped line plus the cell geometry of each character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedLine {
    line: Line<'static>,
    /// Left cell of every character, then the total width.
    boundaries: Vec<usize>,
}

impl ShapedLine {
    pub const fn line(&self) -> &Line<'static> {
        &self.line
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.boundaries.last().copied().unwrap_or(0)
    }

    /// Cell offset of a character column; columns past the end map to the
    /// line width.
    pub fn column_to_x(&self, column: usize) -> usize {
        let last = self.boundaries.len() - 1;
        self.boundaries[column.min(last)]
    }

    /// Character column under cell `x`; cells past the end map to the line
    /// length.
    pub fn x_to_column(&self, x: usize) -> usize {
        let chars = self.boundaries.len() - 1;
        let at_or_before = self.boundaries.partition_point(|&edge| edge <= x);
        at_or_before.saturating_sub(1).min(chars)
    }
}

impl Shaper for TerminalShaper {
    type Layout = ShapedLine;

    fn shape(&self, theme: &Theme, text: &str, style: StyleId, spans: &[Span]) -> ShapedLine {
        let base = style::text_style(theme, style);
        let mut pieces: Vec<TextSpan<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style = base;
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut x = 0;
        let mut spans = spans.iter().peekable();

        for (idx, ch) in text.char_indices() {
            while spans.next_if(|span| span.end <= idx).is_some() {}
            let char_style = match spans.peek() {
                Some(span) if span.start <= idx => style::text_style(theme, span.style),
                _ => base,
            };
            if char_style != run_style && !run.is_empty() {
                pieces.push(TextSpan::styled(std::mem::take(&mut run), run_style));
            }
            run_style = char_style;
            boundaries.push(x);
            x += push_cells(&mut run, ch, x);
        }
        boundaries.push(x);
        if !run.is_empty() {
            pieces.push(TextSpan::styled(run, run_style));
        }

        ShapedLine {
            line: Line::from(pieces),
            boundaries,
        }
    }
}

/// Append the display form of `ch` starting at cell `x`; returns its width.
fn push_cells(out: &mut String, ch: char, x: usize) -> usize {
    match ch {
        '\t' => {
            let width = TAB_WIDTH - x % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', width));
            width
        }
        c if c.is_control() => {
            out.push(control_picture(c));
            1
        }
        c => {
            out.push(c);
            c.width().unwrap_or(0)
        }
    }
}

fn control_picture(c: char) -> char {
    match u32::from(c) {
        code @ 0..=0x1f => char::from_u32(0x2400 + code).unwrap_or(char::REPLACEMENT_CHARACTER),
        0x7f => '\u{2421}',
        _ => char::REPLACEMENT_CHARACTER,
    }
}
