use super::*;
use crate::highlight::Highlighter;

fn lines(editor: &Editor) -> Vec<String> {
    (0..editor.total_lines())
        .map(|i| editor.buffer().line_text(i).into_owned())
        .collect()
}

fn points(editor: &Editor) -> Vec<Position> {
    editor.cursors().iter().map(|c| c.point).collect()
}

/// Marks every `x` as a keyword; enough to check span plumbing.
struct LetterX;

impl Highlighter for LetterX {
    fn highlight_line(&self, text: &str) -> Vec<Span> {
        text.match_indices('x')
            .map(|(idx, _)| Span::new(idx, idx + 1, StyleId::KEYWORD))
            .collect()
    }
}

// --- Editing ---

#[test]
fn test_insert_newline_at_line_end() {
    let mut editor = Editor::from_text("abc\ndef");
    editor.set_cursor(3, 0);
    editor.insert_newline();
    assert_eq!(lines(&editor), vec!["abc", "", "def"]);
    assert_eq!(points(&editor), vec![Position::new(1, 0)]);
}

#[test]
fn test_delete_backward_removes_selection_not_char() {
    let mut editor = Editor::from_text("hello world");
    editor.set_cursor(0, 0);
    editor.extend_selection(5, 0);
    editor.delete_backward();
    assert_eq!(lines(&editor), vec![" world"]);
    let cursor = editor.cursors().newest();
    assert!(cursor.is_collapsed());
    assert_eq!(cursor.point, Position::new(0, 0));
}

#[test]
fn test_delete_backward_joins_lines() {
    let mut editor = Editor::from_text("ab\ncd");
    editor.set_cursor(0, 1);
    editor.delete_backward();
    assert_eq!(lines(&editor), vec!["abcd"]);
    assert_eq!(points(&editor), vec![Position::new(0, 2)]);
}

#[test]
fn test_delete_at_document_edges_is_noop() {
    let mut editor = Editor::from_text("ab");
    editor.delete_backward();
    editor.move_to_end_of_line(false);
    editor.delete_forward();
    assert_eq!(editor.text(), "ab");
    assert!(!editor.is_dirty());
}

#[test]
fn test_delete_forward_removes_next_char_across_line() {
    let mut editor = Editor::from_text("ab\ncd");
    editor.set_cursor(2, 0);
    editor.delete_forward();
    assert_eq!(editor.text(), "abcd");
    assert_eq!(points(&editor), vec![Position::new(0, 2)]);
}

#[test]
fn test_insert_replaces_selection() {
    let mut editor = Editor::from_text("hello world");
    editor.set_cursor(6, 0);
    editor.extend_selection(11, 0);
    editor.insert_text("there");
    assert_eq!(editor.text(), "hello there");
    assert_eq!(points(&editor), vec![Position::new(0, 11)]);
}

#[test]
fn test_multibyte_columns_are_characters() {
    let mut editor = Editor::from_text("añb");
    editor.set_cursor(2, 0);
    editor.delete_backward();
    assert_eq!(editor.text(), "ab");
    editor.insert_text("é");
    assert_eq!(editor.text(), "aéb");
    assert_eq!(points(&editor), vec![Position::new(0, 2)]);
}

// --- Multi-cursor edits ---

#[test]
fn test_edit_on_line_zero_leaves_distant_cursor_alone() {
    let mut editor = Editor::from_text("zero\none\ntwo\nthree\nfour\nfive six");
    editor.set_cursor(0, 0);
    editor.toggle_cursor(3, 5);
    editor.insert_text("X");
    assert_eq!(editor.buffer().line_text(0), "Xzero");
    assert_eq!(editor.buffer().line_text(5), "fivXe six");
    // Only its own insertion moved the second cursor.
    assert_eq!(points(&editor), vec![Position::new(0, 1), Position::new(5, 4)]);
}

#[test]
fn test_skipped_cursor_is_not_shifted_by_later_edits() {
    let mut editor = Editor::from_text("zero\none\ntwo\nthree\nfour\nfive");
    editor.set_cursor(0, 0);
    editor.toggle_cursor(2, 5);
    editor.delete_backward();
    assert_eq!(editor.buffer().line_text(5), "fve");
    assert_eq!(points(&editor), vec![Position::new(0, 0), Position::new(5, 1)]);
}

#[test]
fn test_cursors_on_same_line_shift_together() {
    let mut editor = Editor::from_text("a b c");
    editor.set_cursor(1, 0);
    editor.toggle_cursor(3, 0);
    editor.toggle_cursor(5, 0);
    editor.insert_text("!!");
    assert_eq!(editor.text(), "a!! b!! c!!");
    assert_eq!(
        points(&editor),
        vec![Position::new(0, 3), Position::new(0, 7), Position::new(0, 11)]
    );
}

#[test]
fn test_multi_cursor_newline_shifts_lines() {
    let mut editor = Editor::from_text("ab\ncd");
    editor.set_cursor(1, 0);
    editor.toggle_cursor(1, 1);
    editor.insert_newline();
    assert_eq!(lines(&editor), vec!["a", "b", "c", "d"]);
    assert_eq!(points(&editor), vec![Position::new(1, 0), Position::new(3, 0)]);
}

#[test]
fn test_adjacent_carets_delete_backward_merge() {
    let mut editor = Editor::from_text("abcd");
    editor.set_cursor(2, 0);
    editor.toggle_cursor(3, 0);
    editor.delete_backward();
    assert_eq!(editor.text(), "ad");
    assert_eq!(points(&editor), vec![Position::new(0, 1)]);
}

#[test]
fn test_delete_backward_at_start_keeps_that_cursor_but_edits_others() {
    let mut editor = Editor::from_text("ab\ncd");
    editor.set_cursor(0, 0);
    editor.toggle_cursor(1, 1);
    editor.delete_backward();
    assert_eq!(editor.text(), "ab\nd");
    assert_eq!(points(&editor), vec![Position::new(0, 0), Position::new(1, 0)]);
}

#[test]
fn test_toggle_at_only_cursor_keeps_it() {
    let mut editor = Editor::from_text("abc");
    editor.set_cursor(1, 0);
    editor.toggle_cursor(1, 0);
    assert_eq!(editor.cursors().len(), 1);
    assert_eq!(points(&editor), vec![Position::new(0, 1)]);
}

// --- Clipboard ---

#[test]
fn test_copy_joins_selections_in_order() {
    let mut editor = Editor::from_text("one two three");
    editor.set_cursor(8, 0);
    editor.extend_selection(13, 0);
    editor.toggle_cursor(0, 0);
    editor.extend_selection(3, 0);
    assert_eq!(editor.copy(), "one\nthree");
}

#[test]
fn test_copy_without_selection_is_empty() {
    let mut editor = Editor::from_text("abc");
    assert_eq!(editor.copy(), "");
    assert_eq!(editor.handle(InputEvent::Edit(EditCommand::Copy)), None);
}

#[test]
fn test_cut_removes_selected_text() {
    let mut editor = Editor::from_text("hello world");
    editor.set_cursor(5, 0);
    editor.extend_selection(11, 0);
    let text = editor.handle(InputEvent::Edit(EditCommand::Cut));
    assert_eq!(text.as_deref(), Some(" world"));
    assert_eq!(editor.text(), "hello");
}

#[test]
fn test_paste_distributes_one_line_per_cursor() {
    let mut editor = Editor::from_text("a\nb\nc");
    editor.set_cursor(1, 0);
    editor.toggle_cursor(1, 1);
    editor.toggle_cursor(1, 2);
    editor.paste("1\n2\n3\n");
    assert_eq!(editor.text(), "a1\nb2\nc3");
}

#[test]
fn test_paste_broadcasts_when_line_count_differs() {
    let mut editor = Editor::from_text("a\nb");
    editor.set_cursor(1, 0);
    editor.toggle_cursor(1, 1);
    editor.paste("xy");
    assert_eq!(editor.text(), "axy\nbxy");
}

#[test]
fn test_paste_folds_crlf() {
    let mut editor = Editor::from_text("");
    editor.paste("a\r\nb");
    assert_eq!(lines(&editor), vec!["a", "b"]);
}

#[test]
fn test_copy_then_paste_round_trips_across_cursors() {
    let mut editor = Editor::from_text("foo bar");
    editor.set_cursor(0, 0);
    editor.extend_selection(3, 0);
    editor.toggle_cursor(4, 0);
    editor.extend_selection(7, 0);
    let copied = editor.cut();
    assert_eq!(editor.text(), " ");
    editor.paste(&copied);
    assert_eq!(editor.text(), "foo bar");
}

// --- Navigation ---

#[test]
fn test_move_right_without_extend_collapses() {
    let mut editor = Editor::from_text("hello\nworld");
    editor.set_cursor(1, 0);
    editor.extend_selection(3, 1);
    editor.move_right(false);
    assert!(editor.cursors().iter().all(Cursor::is_collapsed));
}

#[test]
fn test_pointer_coordinates_are_clamped() {
    let mut editor = Editor::from_text("hi\nthere");
    editor.set_cursor(99, 1);
    assert_eq!(points(&editor), vec![Position::new(1, 5)]);
    editor.extend_selection(99, 99);
    assert_eq!(editor.cursors().newest().point, Position::new(1, 5));
}

#[test]
fn test_pointer_below_last_line_is_ignored() {
    let mut editor = Editor::from_text("hi");
    editor.set_cursor(1, 0);
    editor.handle(InputEvent::PointerDown {
        line: 3,
        column: 0,
        modifier: PointerModifier::None,
    });
    assert_eq!(points(&editor), vec![Position::new(0, 1)]);
}

#[test]
fn test_pointer_modifiers_dispatch() {
    let mut editor = Editor::from_text("abcdef");
    let down = |column, modifier| InputEvent::PointerDown {
        line: 0,
        column,
        modifier,
    };
    editor.handle(down(1, PointerModifier::None));
    editor.handle(down(4, PointerModifier::Toggle));
    assert_eq!(editor.cursors().len(), 2);
    editor.handle(down(5, PointerModifier::Extend));
    assert_eq!(editor.cursors().newest().range().start, Position::new(0, 4));
    assert_eq!(editor.cursors().newest().point, Position::new(0, 5));
    editor.handle(InputEvent::PointerDrag { line: 0, column: 6 });
    assert_eq!(editor.cursors().newest().point, Position::new(0, 6));
}

#[test]
fn test_pointer_drag_below_document_is_ignored() {
    let mut editor = Editor::from_text("one\ntwo");
    editor.handle(InputEvent::PointerDown {
        line: 0,
        column: 1,
        modifier: PointerModifier::None,
    });
    editor.handle(InputEvent::PointerDrag { line: 2, column: 0 });
    let cursor = editor.cursors().newest();
    assert!(cursor.is_collapsed());
    assert_eq!(cursor.point, Position::new(0, 1));
}

#[test]
fn test_text_commit_and_moves_through_handle() {
    let mut editor = Editor::from_text("ac");
    editor.handle(InputEvent::Move {
        command: MoveCommand::Right,
        extend: false,
    });
    editor.handle(InputEvent::TextCommit("b".to_string()));
    assert_eq!(editor.text(), "abc");
    editor.handle(InputEvent::Move {
        command: MoveCommand::LineStart,
        extend: true,
    });
    assert_eq!(editor.copy(), "ab");
}

#[test]
fn test_select_all_then_type_replaces_document() {
    let mut editor = Editor::from_text("one\ntwo");
    editor.handle(InputEvent::Edit(EditCommand::SelectAll));
    editor.insert_text("x");
    assert_eq!(editor.text(), "x");
}

// --- Rendering ---

#[test]
fn test_render_is_idempotent() {
    let mut editor = Editor::from_text("one\ntwo\nthree").with_highlighter(Box::new(LetterX));
    editor.set_cursor(1, 0);
    editor.extend_selection(2, 2);
    assert_eq!(editor.render(0, 3), editor.render(0, 3));
}

#[test]
fn test_render_reports_cursors_and_selection_segments() {
    let mut editor = Editor::from_text("abc\n\ndef");
    editor.set_cursor(1, 0);
    editor.extend_selection(2, 2);
    let rows = editor.render(0, 3);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].selections, vec![1..3]);
    assert!(rows[0].cursors.is_empty());
    assert_eq!(rows[1].selections, vec![0..0]);
    assert_eq!(rows[2].selections, vec![0..2]);
    assert_eq!(rows[2].cursors, vec![2]);
    assert!(rows.iter().all(RenderedLine::is_active));
}

#[test]
fn test_render_selection_ending_at_column_zero_skips_last_line() {
    let mut editor = Editor::from_text("ab\ncd");
    editor.set_cursor(0, 0);
    editor.extend_selection(0, 1);
    let rows = editor.render(0, 2);
    assert_eq!(rows[0].selections, vec![0..2]);
    assert!(rows[1].selections.is_empty());
    assert_eq!(rows[1].cursors, vec![0]);
}

#[test]
fn test_render_window_only_sees_its_lines() {
    let text = (0..100).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    let mut editor = Editor::from_text(&text);
    editor.set_cursor(0, 10);
    editor.toggle_cursor(0, 50);
    let rows = editor.render(40, 60);
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[0].number, 40);
    assert_eq!(rows[0].text, "line 40");
    let active: Vec<usize> = rows.iter().filter(|r| r.is_active()).map(|r| r.number).collect();
    assert_eq!(active, vec![50]);
}

#[test]
fn test_render_clips_window_to_document() {
    let editor = Editor::from_text("a\nb");
    assert_eq!(editor.render(1, 10).len(), 1);
    assert!(editor.render(5, 10).is_empty());
}

#[test]
fn test_render_carries_highlighter_spans() {
    let editor = Editor::from_text("axbx").with_highlighter(Box::new(LetterX));
    let row = editor.render_line(0);
    assert_eq!(
        row.spans,
        vec![
            Span::new(1, 2, StyleId::KEYWORD),
            Span::new(3, 4, StyleId::KEYWORD)
        ]
    );
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_render_line_past_end_panics() {
    let editor = Editor::from_text("a");
    let _ = editor.render_line(1);
}

#[test]
fn test_render_line_matches_render_window() {
    let mut editor = Editor::from_text("ab\ncd\nef");
    editor.set_cursor(1, 0);
    editor.extend_selection(1, 2);
    for line in 0..3 {
        assert_eq!(editor.render_line(line), editor.render(line, line + 1)[0]);
    }
}

// --- Unusual separators ---

#[test]
fn test_form_feed_is_ordinary_content() {
    let mut editor = Editor::from_text("a\x0cb");
    assert_eq!(editor.total_lines(), 1);
    editor.set_cursor(2, 0);
    // Line 1 does not exist; the click clamps onto line 0.
    editor.toggle_cursor(0, 1);
    assert_eq!(points(&editor), vec![Position::new(0, 0), Position::new(0, 2)]);

    editor.delete_forward();
    assert_eq!(editor.text(), "\x0c");
    assert_eq!(points(&editor), vec![Position::new(0, 0), Position::new(0, 1)]);

    editor.delete_forward();
    assert_eq!(editor.text(), "");
    assert_eq!(points(&editor), vec![Position::new(0, 0)]);
}

#[test]
fn test_insert_after_line_separator_stays_on_line() {
    let mut editor = Editor::from_text("a\u{2028}b");
    editor.move_to_end_of_line(false);
    assert_eq!(points(&editor), vec![Position::new(0, 3)]);
    editor.insert_text("X");
    assert_eq!(editor.text(), "a\u{2028}bX");
    assert_eq!(points(&editor), vec![Position::new(0, 4)]);
}

#[test]
fn test_cursors_around_separator_edit_independently() {
    let mut editor = Editor::from_text("a\u{2029}b");
    editor.set_cursor(1, 0);
    editor.toggle_cursor(2, 0);
    editor.delete_forward();
    assert_eq!(editor.text(), "a");
    assert_eq!(points(&editor), vec![Position::new(0, 1)]);
}
