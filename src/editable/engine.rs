//! Per-tick edit state machine.
//!
//! Each tick the engine pads lines, applies the scroll delta, fires at most one
//! structural edit (gated by the repeat counter), then splices in whatever was
//! typed. The engine is the only writer of the buffer and cursor.

use super::buffer::TextBuffer;
use super::cursor::Cursor;
use super::error::BufferError;
use super::input::{EditKey, HeldKeys, InputSnapshot};
use crate::tracing::CursorSnapshot;

/// Structural edits, at most one per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    MoveDown,
    MoveUp,
    MoveLeft,
    MoveRight,
    Backspace,
    Newline,
}

impl EditAction {
    pub fn name(&self) -> &'static str {
        match self {
            EditAction::MoveDown => "move_down",
            EditAction::MoveUp => "move_up",
            EditAction::MoveLeft => "move_left",
            EditAction::MoveRight => "move_right",
            EditAction::Backspace => "backspace",
            EditAction::Newline => "newline",
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            EditAction::MoveDown | EditAction::MoveUp | EditAction::MoveLeft | EditAction::MoveRight
        )
    }
}

/// Key priority for structural edits. The first held key wins; order is observable.
pub const DISPATCH_ORDER: [(EditKey, EditAction); 6] = [
    (EditKey::Down, EditAction::MoveDown),
    (EditKey::Up, EditAction::MoveUp),
    (EditKey::Left, EditAction::MoveLeft),
    (EditKey::Right, EditAction::MoveRight),
    (EditKey::Backspace, EditAction::Backspace),
    (EditKey::Enter, EditAction::Newline),
];

/// Pick the structural edit for this tick from the held keys
pub fn select_action(held: &HeldKeys) -> Option<EditAction> {
    DISPATCH_ORDER
        .iter()
        .find(|(key, _)| held.is_held(*key))
        .map(|(_, action)| *action)
}

/// Cooldown (in ticks) armed after a structural edit fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatIntervals {
    pub navigation: u32,
    pub edit: u32,
}

impl Default for RepeatIntervals {
    fn default() -> Self {
        Self {
            navigation: 10,
            edit: 5,
        }
    }
}

impl RepeatIntervals {
    pub fn for_action(&self, action: EditAction) -> u32 {
        if action.is_navigation() {
            self.navigation
        } else {
            self.edit
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Structural edit that fired, if any
    pub action: Option<EditAction>,
    /// Characters spliced in from typed input
    pub inserted: usize,
    /// Lines that received a pad space
    pub padded: usize,
    /// Whether the document text differs from the previous tick
    pub text_changed: bool,
}

/// Owns the document and cursor and applies input to them once per tick.
#[derive(Debug, Clone)]
pub struct EditEngine {
    buffer: TextBuffer,
    cursor: Cursor,
    scroll_offset: f32,
    repeat_counter: u32,
    intervals: RepeatIntervals,
}

impl Default for EditEngine {
    fn default() -> Self {
        Self::new(TextBuffer::new())
    }
}

impl EditEngine {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            scroll_offset: 0.0,
            repeat_counter: 0,
            intervals: RepeatIntervals::default(),
        }
    }

    pub fn with_intervals(mut self, intervals: RepeatIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Start from a given cursor, clamped into the buffer
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self.cursor.clamp(&self.buffer);
        self
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn repeat_counter(&self) -> u32 {
        self.repeat_counter
    }

    pub fn intervals(&self) -> RepeatIntervals {
        self.intervals
    }

    /// True while structural edits are suppressed
    pub fn is_cooling(&self) -> bool {
        self.repeat_counter > 0
    }

    /// Replace the document, homing the cursor and clearing the cooldown
    pub fn load(&mut self, buffer: TextBuffer) {
        tracing::info!(lines = buffer.line_count(), "Loading document into editor");
        self.buffer.replace_all(buffer);
        self.cursor = Cursor::default();
        self.scroll_offset = 0.0;
        self.repeat_counter = 0;
    }

    /// Advance one tick.
    pub fn tick(&mut self, input: &InputSnapshot) -> Result<TickReport, BufferError> {
        let padded = self.buffer.pad_lines();
        self.scroll_offset += input.scroll_delta;

        let mut report = TickReport {
            padded,
            text_changed: padded > 0,
            ..TickReport::default()
        };

        if self.repeat_counter == 0 {
            if let Some(action) = select_action(&input.held) {
                let before = CursorSnapshot::capture(&self.buffer, self.cursor);
                self.repeat_counter = self.intervals.for_action(action);
                report.text_changed |= self.apply(action)?;
                self.settle_cursor(action.name());
                report.action = Some(action);

                let after = CursorSnapshot::capture(&self.buffer, self.cursor);
                match before.diff(&after) {
                    Some(diff) => tracing::debug!(action = action.name(), "{}", diff),
                    None => tracing::trace!(action = action.name(), "no-op"),
                }
            }
        } else {
            self.repeat_counter -= 1;
        }

        if !input.typed.is_empty() {
            let inserted =
                self.buffer
                    .insert_text(self.cursor.line, self.cursor.column, &input.typed)?;
            self.cursor.column += inserted;
            self.settle_cursor("insert");
            tracing::trace!(
                line = self.cursor.line,
                inserted,
                "Inserted typed text {:?}",
                input.typed
            );
            report.inserted = inserted;
            report.text_changed |= inserted > 0;
        }

        Ok(report)
    }

    /// Apply one structural edit, returning whether the text changed
    fn apply(&mut self, action: EditAction) -> Result<bool, BufferError> {
        match action {
            EditAction::MoveDown => {
                self.cursor.move_down(&self.buffer);
                Ok(false)
            }
            EditAction::MoveUp => {
                self.cursor.move_up(&self.buffer);
                Ok(false)
            }
            EditAction::MoveLeft => {
                self.cursor.move_left();
                Ok(false)
            }
            EditAction::MoveRight => {
                self.cursor.move_right(&self.buffer);
                Ok(false)
            }
            EditAction::Backspace => self.backspace(),
            EditAction::Newline => {
                self.buffer
                    .split_line_at(self.cursor.line, self.cursor.column)?;
                self.cursor.line += 1;
                self.cursor.column = 0;
                Ok(true)
            }
        }
    }

    fn backspace(&mut self) -> Result<bool, BufferError> {
        let Cursor { line, column } = self.cursor;

        if column > 0 {
            self.buffer.delete_char(line, column)?;
            self.cursor.column -= 1;
            return Ok(true);
        }

        // Start of document: nothing to the left
        if line == 0 {
            return Ok(false);
        }

        if self.buffer.line_len(line)? > 0 {
            self.buffer.join_with_previous(line)?;
        } else {
            self.buffer.remove_line(line)?;
        }
        // Column stays 0 on the line above; no vertical re-clamp
        self.cursor.line -= 1;
        Ok(true)
    }

    /// Enforce the cursor invariant after a mutation.
    ///
    /// Clamping should never have to move the cursor; debug builds treat that
    /// as a bug.
    fn settle_cursor(&mut self, after: &'static str) {
        let before = self.cursor;
        if self.cursor.clamp(&self.buffer) {
            tracing::warn!(
                "Cursor ({}, {}) escaped the buffer after {}; clamped to ({}, {})",
                before.line,
                before.column,
                after,
                self.cursor.line,
                self.cursor.column
            );
            debug_assert!(false, "cursor escaped the buffer after {after}");
        }
    }
}
