use super::buffer::TextBuffer;
use super::types::{Position, Range};

/// A caret plus selection anchor.
///
/// `point == anchor` means nothing is selected. Otherwise the text between
/// them, `[min, max)`, is selected; the point may sit on either side.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pub point: Position,
    pub anchor: Position,
    /// Column vertical motion aims for (sticky column).
    goal_column: Option<usize>,
    /// Insertion order; the highest serial is the newest cursor.
    serial: u64,
}

impl Cursor {
    const fn at(pos: Position, serial: u64) -> Self {
        Self {
            point: pos,
            anchor: pos,
            goal_column: None,
            serial,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.point == self.anchor
    }

    /// The selected range, `[min(point, anchor), max(point, anchor))`.
    pub fn range(&self) -> Range {
        Range::spanning(self.point, self.anchor)
    }

    fn is_backward(&self) -> bool {
        self.point < self.anchor
    }
}

/// Ordered set of cursors that always holds at least one member.
///
/// After every operation the set is sorted by position and no two members'
/// selections overlap; cursors that come to overlap, share a point, or where a
/// caret touches a selection edge are merged.
#[derive(Debug, Clone)]
pub struct CursorSet {
    cursors: Vec<Cursor>,
    next_serial: u64,
}

impl CursorSet {
    /// A set with one collapsed cursor at `pos`.
    pub fn new(pos: Position) -> Self {
        Self {
            cursors: vec![Cursor::at(pos, 0)],
            next_serial: 1,
        }
    }

    pub fn as_slice(&self) -> &[Cursor] {
        &self.cursors
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// Never true outside of a bug.
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cursor> {
        self.cursors.iter()
    }

    /// The most recently added cursor.
    pub fn newest(&self) -> &Cursor {
        self.cursors
            .iter()
            .max_by_key(|c| c.serial)
            .expect("cursor set is never empty")
    }

    /// Cursors whose selection touches any line in `[start_line, end_line)`.
    ///
    /// Binary search over the sorted set, so the cost does not grow with the
    /// number of cursors outside the window.
    pub fn overlapping_lines(&self, start_line: usize, end_line: usize) -> &[Cursor] {
        let first = self
            .cursors
            .partition_point(|c| c.range().end.line < start_line);
        let last = self
            .cursors
            .partition_point(|c| c.range().start.line < end_line);
        &self.cursors[first..last.max(first)]
    }

    // --- Whole-set replacement ---

    /// Replace every cursor with one collapsed cursor at `pos`.
    pub fn set_cursor(&mut self, pos: Position) {
        let serial = self.bump_serial();
        self.cursors = vec![Cursor::at(pos, serial)];
    }

    /// Remove the cursor whose point is exactly `pos`, or add one there.
    ///
    /// The last remaining cursor is never removed. Returns `true` if a cursor
    /// was added.
    pub fn toggle_cursor(&mut self, pos: Position) -> bool {
        if let Some(idx) = self.cursors.iter().position(|c| c.point == pos) {
            if self.cursors.len() > 1 {
                self.cursors.remove(idx);
            }
            return false;
        }
        let serial = self.bump_serial();
        self.cursors.push(Cursor::at(pos, serial));
        self.normalize();
        true
    }

    /// Move the newest cursor's point to `pos`, keeping its anchor.
    pub fn extend_selection(&mut self, pos: Position) {
        let newest = self.newest().serial;
        if let Some(cursor) = self.cursors.iter_mut().find(|c| c.serial == newest) {
            cursor.point = pos;
            cursor.goal_column = None;
        }
        self.normalize();
    }

    /// One cursor selecting the whole buffer, point at the end.
    pub fn select_all(&mut self, buffer: &TextBuffer) {
        let serial = self.bump_serial();
        self.cursors = vec![Cursor {
            point: buffer.end_position(),
            anchor: Position::default(),
            goal_column: None,
            serial,
        }];
    }

    // --- Navigation ---

    pub fn move_left(&mut self, buffer: &TextBuffer, extend: bool) {
        self.move_each(extend, |c| (left_of(buffer, c.point), None));
    }

    pub fn move_right(&mut self, buffer: &TextBuffer, extend: bool) {
        self.move_each(extend, |c| (right_of(buffer, c.point), None));
    }

    pub fn move_up(&mut self, buffer: &TextBuffer, extend: bool) {
        self.move_each(extend, |c| {
            let goal = c.goal_column.unwrap_or(c.point.column);
            if c.point.line == 0 {
                return (c.point, Some(goal));
            }
            let line = c.point.line - 1;
            (Position::new(line, goal.min(buffer.line_len(line))), Some(goal))
        });
    }

    pub fn move_down(&mut self, buffer: &TextBuffer, extend: bool) {
        self.move_each(extend, |c| {
            let goal = c.goal_column.unwrap_or(c.point.column);
            if c.point.line + 1 >= buffer.line_count() {
                return (c.point, Some(goal));
            }
            let line = c.point.line + 1;
            (Position::new(line, goal.min(buffer.line_len(line))), Some(goal))
        });
    }

    pub fn move_to_beginning_of_line(&mut self, extend: bool) {
        self.move_each(extend, |c| (Position::new(c.point.line, 0), None));
    }

    pub fn move_to_end_of_line(&mut self, buffer: &TextBuffer, extend: bool) {
        self.move_each(extend, |c| {
            let line = c.point.line;
            (Position::new(line, buffer.line_len(line)), None)
        });
    }

    /// Apply a motion to every cursor, then renormalize.
    fn move_each<F>(&mut self, extend: bool, mut motion: F)
    where
        F: FnMut(&Cursor) -> (Position, Option<usize>),
    {
        for cursor in &mut self.cursors {
            let (point, goal) = motion(cursor);
            cursor.point = point;
            cursor.goal_column = goal;
            if !extend {
                cursor.anchor = point;
            }
        }
        self.normalize();
    }

    /// Reposition every cursor after a batch edit.
    ///
    /// `positions` holds the new `(point, anchor)` for each cursor in the
    /// current order. Goal columns reset.
    pub(crate) fn reposition(&mut self, positions: &[(Position, Position)]) {
        debug_assert_eq!(positions.len(), self.cursors.len());
        for (cursor, &(point, anchor)) in self.cursors.iter_mut().zip(positions) {
            cursor.point = point;
            cursor.anchor = anchor;
            cursor.goal_column = None;
        }
        self.normalize();
    }

    const fn bump_serial(&mut self) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }

    /// Sort and merge overlapping members.
    fn normalize(&mut self) {
        self.cursors.sort_by_key(|c| {
            let range = c.range();
            (range.start, range.end)
        });

        let mut merged: Vec<Cursor> = Vec::with_capacity(self.cursors.len());
        for next in self.cursors.drain(..) {
            match merged.last_mut() {
                Some(current) if should_merge(current, &next) => *current = merge(current, &next),
                _ => merged.push(next),
            }
        }
        self.cursors = merged;
    }
}

impl Default for CursorSet {
    fn default() -> Self {
        Self::new(Position::default())
    }
}

/// `current` sorts before or at `next`.
fn should_merge(current: &Cursor, next: &Cursor) -> bool {
    let a = current.range();
    let b = next.range();
    b.start < a.end
        || current.point == next.point
        || (b.start == a.end && (current.is_collapsed() || next.is_collapsed()))
}

fn merge(current: &Cursor, next: &Cursor) -> Cursor {
    let a = current.range();
    let b = next.range();
    let start = a.start.min(b.start);
    let end = a.end.max(b.end);
    let (survivor, other) = if current.serial >= next.serial {
        (current, next)
    } else {
        (next, current)
    };
    let backward = if survivor.is_collapsed() {
        other.is_backward()
    } else {
        survivor.is_backward()
    };
    let (point, anchor) = if backward { (start, end) } else { (end, start) };
    Cursor {
        point,
        anchor,
        goal_column: survivor.goal_column,
        serial: survivor.serial,
    }
}

/// One character left, crossing to the previous line end at column 0.
fn left_of(buffer: &TextBuffer, pos: Position) -> Position {
    if pos.column > 0 {
        Position::new(pos.line, pos.column - 1)
    } else if pos.line > 0 {
        Position::new(pos.line - 1, buffer.line_len(pos.line - 1))
    } else {
        pos
    }
}

/// One character right, crossing to the next line start at line end.
fn right_of(buffer: &TextBuffer, pos: Position) -> Position {
    if pos.column < buffer.line_len(pos.line) {
        Position::new(pos.line, pos.column + 1)
    } else if pos.line + 1 < buffer.line_count() {
        Position::new(pos.line + 1, 0)
    } else {
        pos
    }
}
