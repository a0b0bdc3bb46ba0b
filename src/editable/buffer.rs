//! Line-addressed text buffer backed by `ropey::Rope`.
//!
//! Lines are stored joined by `\n` with no trailing newline, so the rope's
//! line count is the document's line count and an empty rope is a single
//! empty line. Columns are character indices into a line.

use ropey::Rope;

use super::error::BufferError;

/// Characters ropey treats as line breaks. None of them may live inside a line.
fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

fn strip_line_breaks(text: &str) -> std::borrow::Cow<'_, str> {
    if text.chars().any(is_line_break) {
        std::borrow::Cow::Owned(text.chars().filter(|c| !is_line_break(*c)).collect())
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}

/// The document model: an ordered sequence of lines, never empty.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// A buffer holding one empty line
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a buffer from a sequence of lines.
    ///
    /// Line-break characters inside a line are dropped; an empty iterator
    /// yields a single empty line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                joined.push('\n');
            }
            joined.push_str(&strip_line_breaks(line.as_ref()));
        }
        Self {
            rope: Rope::from_str(&joined),
        }
    }

    /// Build a buffer by splitting `text` on `\n` (carriage returns are dropped)
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n'))
    }

    /// Number of lines (always >= 1)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn check_row(&self, row: usize) -> Result<(), BufferError> {
        if row < self.line_count() {
            Ok(())
        } else {
            Err(BufferError::LineOutOfRange {
                row,
                line_count: self.line_count(),
            })
        }
    }

    fn check_column(&self, row: usize, column: usize) -> Result<usize, BufferError> {
        let line_len = self.line_len(row)?;
        if column <= line_len {
            Ok(line_len)
        } else {
            Err(BufferError::ColumnOutOfRange {
                row,
                column,
                line_len,
            })
        }
    }

    /// Length of a line in characters
    pub fn line_len(&self, row: usize) -> Result<usize, BufferError> {
        self.check_row(row)?;
        let slice = self.rope.line(row);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            Ok(len - 1)
        } else {
            Ok(len)
        }
    }

    /// Text of a line, without any line terminator
    pub fn line_at(&self, row: usize) -> Result<String, BufferError> {
        let len = self.line_len(row)?;
        let start = self.rope.line_to_char(row);
        Ok(self.rope.slice(start..start + len).to_string())
    }

    /// Owned snapshot of every line, in order
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .map(|row| {
                let start = self.rope.line_to_char(row);
                let len = self.line_len(row).unwrap_or(0);
                self.rope.slice(start..start + len).to_string()
            })
            .collect()
    }

    /// The whole document, lines joined with `\n`
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Character offset of (row, column) in the rope
    fn offset(&self, row: usize, column: usize) -> usize {
        self.rope.line_to_char(row) + column
    }

    /// Split `row` at `column`: the prefix stays, the suffix becomes line `row + 1`.
    pub fn split_line_at(&mut self, row: usize, column: usize) -> Result<(), BufferError> {
        self.check_column(row, column)?;
        let at = self.offset(row, column);
        self.rope.insert_char(at, '\n');
        Ok(())
    }

    /// Append line `row` onto line `row - 1` and remove it.
    pub fn join_with_previous(&mut self, row: usize) -> Result<(), BufferError> {
        self.check_row(row)?;
        if row == 0 {
            return Err(BufferError::InvalidOperation(
                "the first line has no previous line to join",
            ));
        }
        let newline = self.rope.line_to_char(row) - 1;
        self.rope.remove(newline..newline + 1);
        Ok(())
    }

    /// Delete line `row`, shifting later lines up.
    ///
    /// Fails rather than leave the buffer without lines.
    pub fn remove_line(&mut self, row: usize) -> Result<(), BufferError> {
        self.check_row(row)?;
        if self.line_count() == 1 {
            return Err(BufferError::InvalidOperation(
                "cannot remove the only line of the buffer",
            ));
        }
        let start = self.rope.line_to_char(row);
        let range = if row + 1 < self.line_count() {
            start..self.rope.line_to_char(row + 1)
        } else {
            // Last line: take the newline that precedes it instead
            start - 1..self.rope.len_chars()
        };
        self.rope.remove(range);
        Ok(())
    }

    /// Splice `text` into `row` at `column`, returning the number of characters inserted.
    ///
    /// The text goes in as one contiguous run; line-break characters are dropped
    /// instead of splitting the line.
    pub fn insert_text(
        &mut self,
        row: usize,
        column: usize,
        text: &str,
    ) -> Result<usize, BufferError> {
        self.check_column(row, column)?;
        let text = strip_line_breaks(text);
        if text.is_empty() {
            return Ok(0);
        }
        let at = self.offset(row, column);
        self.rope.insert(at, &text);
        Ok(text.chars().count())
    }

    /// Remove the character immediately left of `column` on `row`.
    pub fn delete_char(&mut self, row: usize, column: usize) -> Result<(), BufferError> {
        self.check_column(row, column)?;
        if column == 0 {
            return Err(BufferError::InvalidOperation(
                "no character left of column 0",
            ));
        }
        let at = self.offset(row, column);
        self.rope.remove(at - 1..at);
        Ok(())
    }

    /// Append a pad space to every line that doesn't already end in one.
    ///
    /// Returns how many lines were padded.
    pub fn pad_lines(&mut self) -> usize {
        let mut padded = 0;
        for row in 0..self.line_count() {
            let len = self.line_len(row).unwrap_or(0);
            let start = self.rope.line_to_char(row);
            if len == 0 || self.rope.char(start + len - 1) != ' ' {
                self.rope.insert_char(start + len, ' ');
                padded += 1;
            }
        }
        padded
    }

    /// Replace the whole document with `other`'s contents
    pub fn replace_all(&mut self, other: TextBuffer) {
        self.rope = other.rope;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = TextBuffer::new();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0).unwrap(), "");

        let buf = TextBuffer::from_lines(Vec::<String>::new());
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_from_text_splits_on_newline() {
        let buf = TextBuffer::from_text("package main\r\n\nfunc Fragment()");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_at(0).unwrap(), "package main");
        assert_eq!(buf.line_at(1).unwrap(), "");
        assert_eq!(buf.line_at(2).unwrap(), "func Fragment()");
    }

    #[test]
    fn test_trailing_newline_yields_trailing_empty_line() {
        let buf = TextBuffer::from_text("a\nb\n");
        assert_eq!(buf.lines(), vec!["a", "b", ""]);
    }

    #[test]
    fn test_line_at_out_of_range() {
        let buf = TextBuffer::from_text("one\ntwo");
        assert_eq!(
            buf.line_at(2),
            Err(BufferError::LineOutOfRange {
                row: 2,
                line_count: 2
            })
        );
    }

    #[test]
    fn test_split_line_at_middle() {
        let mut buf = TextBuffer::from_text("abcdef");
        buf.split_line_at(0, 2).unwrap();
        assert_eq!(buf.lines(), vec!["ab", "cdef"]);
    }

    #[test]
    fn test_split_line_at_end_creates_empty_line() {
        let mut buf = TextBuffer::from_text("abc\nxyz");
        buf.split_line_at(0, 3).unwrap();
        assert_eq!(buf.lines(), vec!["abc", "", "xyz"]);
    }

    #[test]
    fn test_split_column_past_end_is_rejected() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(matches!(
            buf.split_line_at(0, 4),
            Err(BufferError::ColumnOutOfRange { column: 4, .. })
        ));
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_split_then_join_round_trip() {
        let mut buf = TextBuffer::from_text("var Time float");
        buf.split_line_at(0, 4).unwrap();
        buf.join_with_previous(1).unwrap();
        assert_eq!(buf.lines(), vec!["var Time float"]);
    }

    #[test]
    fn test_join_first_line_is_invalid() {
        let mut buf = TextBuffer::from_text("a\nb");
        assert!(matches!(
            buf.join_with_previous(0),
            Err(BufferError::InvalidOperation(_))
        ));
        assert_eq!(buf.lines(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_middle_and_last_line() {
        let mut buf = TextBuffer::from_text("a\nb\nc");
        buf.remove_line(1).unwrap();
        assert_eq!(buf.lines(), vec!["a", "c"]);
        buf.remove_line(1).unwrap();
        assert_eq!(buf.lines(), vec!["a"]);
    }

    #[test]
    fn test_remove_only_line_fails() {
        let mut buf = TextBuffer::from_text("solo");
        assert!(buf.remove_line(0).is_err());
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_insert_text_is_single_splice() {
        let mut buf = TextBuffer::from_text("fn()");
        let n = buf.insert_text(0, 3, "x, y").unwrap();
        assert_eq!(n, 4);
        assert_eq!(buf.line_at(0).unwrap(), "fn(x, y)");
    }

    #[test]
    fn test_insert_text_drops_line_breaks() {
        let mut buf = TextBuffer::from_text("ab");
        assert_eq!(buf.insert_text(0, 1, "x\r\ny\u{2028}").unwrap(), 2);
        assert_eq!(buf.lines(), vec!["axyb"]);
        assert_eq!(buf.insert_text(0, 0, "\n").unwrap(), 0);
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_insert_text_counts_chars_not_bytes() {
        let mut buf = TextBuffer::from_text("ab");
        assert_eq!(buf.insert_text(0, 1, "éü").unwrap(), 2);
        assert_eq!(buf.line_at(0).unwrap(), "aéüb");
        assert_eq!(buf.line_len(0).unwrap(), 4);
        buf.delete_char(0, 3).unwrap();
        assert_eq!(buf.line_at(0).unwrap(), "aéb");
    }

    #[test]
    fn test_delete_char_left_of_column() {
        let mut buf = TextBuffer::from_text("hello");
        buf.delete_char(0, 5).unwrap();
        assert_eq!(buf.line_at(0).unwrap(), "hell");
        buf.delete_char(0, 1).unwrap();
        assert_eq!(buf.line_at(0).unwrap(), "ell");
        assert!(buf.delete_char(0, 0).is_err());
    }

    #[test]
    fn test_pad_lines_is_idempotent() {
        let mut buf = TextBuffer::from_text("a\n\nb ");
        assert_eq!(buf.pad_lines(), 2);
        assert_eq!(buf.lines(), vec!["a ", " ", "b "]);
        assert_eq!(buf.pad_lines(), 0);
        assert_eq!(buf.lines(), vec!["a ", " ", "b "]);
    }

    #[test]
    fn test_text_joins_lines() {
        let buf = TextBuffer::from_lines(["package main", "", "func Fragment()"]);
        assert_eq!(buf.text(), "package main\n\nfunc Fragment()");
    }
}
