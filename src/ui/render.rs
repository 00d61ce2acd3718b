use std::ops::Range;

use ratatui::prelude::*;

use crate::app::Model;

use super::{status, style};

/// Cells left blank between the line numbers and the text.
const GUTTER_PADDING: u16 = 2;

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.draw");
    let area = frame.area();
    let text_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    render_text(model, frame.buffer_mut(), text_area);
    status::render_status_bar(model, frame, status_area);
}

/// Gutter width in cells: the digits of the largest line number plus
/// padding on both sides.
pub const fn gutter_width(total_lines: usize) -> u16 {
    let mut digits = 1;
    let mut rest = total_lines;
    while rest >= 10 {
        rest /= 10;
        digits += 1;
    }
    digits + 2 + GUTTER_PADDING
}

fn render_text(model: &mut Model, buf: &mut Buffer, area: Rect) {
    let theme = model.editor.theme();
    let gutter = gutter_width(model.editor.total_lines()).min(area.width);
    let text_x = area.x + gutter;
    let text_width = area.width - gutter;

    buf.set_style(area, style::row_background(theme, false));
    buf.set_style(
        Rect {
            width: gutter,
            ..area
        },
        style::gutter_background(theme, false),
    );

    let window = model.viewport.visible_range();
    let rows = model.editor.render(window.start, window.end);
    let mut layouts = model.layout.begin_frame();

    for (row, line) in (0..area.height).zip(&rows) {
        let y = area.y + row;
        let active = line.is_active();
        if active {
            buf.set_style(
                Rect::new(area.x, y, gutter, 1),
                style::gutter_background(theme, true),
            );
            buf.set_style(
                Rect::new(text_x, y, text_width, 1),
                style::row_background(theme, true),
            );
        }

        // Line numbers are right aligned, ending GUTTER_PADDING cells before the text.
        let number = layouts.layout_for_line_number(theme, line.number + 1, active);
        let number_end = text_x.saturating_sub(GUTTER_PADDING).max(area.x);
        let number_x = number_end
            .saturating_sub(cells(number.width()))
            .max(area.x);
        buf.set_line(number_x, y, number.line(), number_end - number_x);

        let shaped = layouts.layout_for_line(theme, line);
        buf.set_line(text_x, y, shaped.line(), text_width);

        let selection = style::selection(theme, active);
        for segment in &line.selections {
            let start = shaped.column_to_x(segment.start);
            // A selected line break shows as one cell.
            let end = shaped.column_to_x(segment.end).max(start + 1);
            paint(buf, text_x, text_width, y, start..end, selection);
        }
        let caret = style::caret(theme);
        for &column in &line.cursors {
            let x = shaped.column_to_x(column);
            paint(buf, text_x, text_width, y, x..x + 1, caret);
        }
    }
}

/// Apply `style` to cells `[start, end)` of a row, clipped to `width`.
fn paint(buf: &mut Buffer, origin: u16, width: u16, y: u16, span: Range<usize>, style: Style) {
    let limit = usize::from(width);
    let start = span.start.min(limit);
    let end = span.end.min(limit);
    if start >= end {
        return;
    }
    buf.set_style(Rect::new(origin + cells(start), y, cells(end - start), 1), style);
}

fn cells(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_width_grows_with_digits() {
        assert_eq!(gutter_width(1), 5);
        assert_eq!(gutter_width(9), 5);
        assert_eq!(gutter_width(10), 6);
        assert_eq!(gutter_width(12_345), 9);
    }
}
