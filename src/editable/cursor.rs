//! Cursor position and navigation rules.

use super::buffer::TextBuffer;

/// A position in the text buffer (line and column, both 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// The single editing cursor.
///
/// Movement methods return `true` when the cursor changed. Conditions like
/// moving left at column 0 are silent no-ops, not errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

/// Column to land on when entering `row` from `column`.
///
/// A column past the destination's end lands on its last character (the pad
/// space, once lines are padded), floored at 0.
fn clamp_for_vertical(buffer: &TextBuffer, row: usize, column: usize) -> usize {
    let len = buffer.line_len(row).unwrap_or(0);
    if column > len {
        len.saturating_sub(1)
    } else {
        column
    }
}

impl Cursor {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn to_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Move down one line, unless the line below is the last one.
    pub fn move_down(&mut self, buffer: &TextBuffer) -> bool {
        let target = self.line + 1;
        if target + 1 >= buffer.line_count() {
            return false;
        }
        self.column = clamp_for_vertical(buffer, target, self.column);
        self.line = target;
        true
    }

    /// Move up one line. A no-op on the first line.
    pub fn move_up(&mut self, buffer: &TextBuffer) -> bool {
        let Some(target) = self.line.checked_sub(1) else {
            return false;
        };
        self.column = clamp_for_vertical(buffer, target, self.column);
        self.line = target;
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.column > 0 {
            self.column -= 1;
            true
        } else {
            false
        }
    }

    /// Move right, stopping one short of the line end (the pad space).
    pub fn move_right(&mut self, buffer: &TextBuffer) -> bool {
        let len = buffer.line_len(self.line).unwrap_or(0);
        if len > 0 && self.column < len - 1 {
            self.column += 1;
            true
        } else {
            false
        }
    }

    /// Pull the cursor back inside the buffer: line into `[0, line_count)`,
    /// column into `[0, line_len]`. Returns `true` if anything changed.
    pub fn clamp(&mut self, buffer: &TextBuffer) -> bool {
        let before = *self;
        self.line = self.line.min(buffer.line_count() - 1);
        self.column = self.column.min(buffer.line_len(self.line).unwrap_or(0));
        *self != before
    }

    /// Whether the cursor addresses a valid position in `buffer`
    pub fn is_within(&self, buffer: &TextBuffer) -> bool {
        buffer
            .line_len(self.line)
            .is_ok_and(|len| self.column <= len)
    }
}

impl From<Position> for Cursor {
    fn from(pos: Position) -> Self {
        Self::new(pos.line, pos.column)
    }
}

impl From<Cursor> for Position {
    fn from(cursor: Cursor) -> Self {
        cursor.to_position()
    }
}
