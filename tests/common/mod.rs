//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use kager::editable::{Cursor, EditEngine, EditKey, InputSnapshot, TextBuffer};

/// Engine over `lines` with the cursor at (line, column)
pub fn test_engine(lines: &[&str], line: usize, column: usize) -> EditEngine {
    EditEngine::new(TextBuffer::from_lines(lines.iter().copied()))
        .with_cursor(Cursor::new(line, column))
}

/// Engine over `count` lines of the form "line N"
pub fn engine_with_lines(count: usize) -> EditEngine {
    let lines: Vec<String> = (0..count).map(|i| format!("line {}", i)).collect();
    EditEngine::new(TextBuffer::from_lines(lines))
}

pub fn lines_of(engine: &EditEngine) -> Vec<String> {
    engine.buffer().lines()
}

/// Tick once with `key` held
pub fn press(engine: &mut EditEngine, key: EditKey) {
    engine
        .tick(&InputSnapshot::holding(&[key]))
        .expect("tick should succeed");
}

/// Tick once with no input
pub fn idle(engine: &mut EditEngine) {
    engine
        .tick(&InputSnapshot::idle())
        .expect("tick should succeed");
}

/// Tick once typing `text`
pub fn type_text(engine: &mut EditEngine, text: &str) {
    engine
        .tick(&InputSnapshot::typing(text))
        .expect("tick should succeed");
}

/// Idle until the repeat counter has run down
pub fn cool_down(engine: &mut EditEngine) {
    while engine.is_cooling() {
        idle(engine);
    }
}

/// Every cursor the engine can hold must address a real position
pub fn assert_cursor_in_bounds(engine: &EditEngine) {
    let cursor = engine.cursor();
    let buffer = engine.buffer();
    assert!(
        cursor.line < buffer.line_count(),
        "cursor line {} outside {} lines",
        cursor.line,
        buffer.line_count()
    );
    let len = buffer.line_len(cursor.line).expect("cursor line exists");
    assert!(
        cursor.column <= len,
        "cursor column {} past line length {}",
        cursor.column,
        len
    );
}
