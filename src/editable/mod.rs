//! Text editing core for the shader editor.
//!
//! # Architecture
//!
//! - [`TextBuffer`]: the document, an ordered sequence of lines (never empty)
//! - [`Cursor`] / [`Position`]: the single cursor and its navigation rules
//! - [`EditEngine`]: per-tick state machine that owns both and applies input
//! - [`InputSnapshot`]: what the runtime sampled since the previous tick
//!
//! # Example
//!
//! ```
//! use kager::editable::{EditEngine, EditKey, InputSnapshot, TextBuffer};
//!
//! let mut engine = EditEngine::new(TextBuffer::from_text("var Time float"));
//! engine.tick(&InputSnapshot::typing("// ")).unwrap();
//! engine.tick(&InputSnapshot::holding(&[EditKey::Enter])).unwrap();
//!
//! assert_eq!(engine.buffer().line_count(), 2);
//! assert_eq!(engine.buffer().line_at(0).unwrap(), "// ");
//! ```

mod buffer;
mod cursor;
mod engine;
mod error;
mod input;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Position};
pub use engine::{
    select_action, EditAction, EditEngine, RepeatIntervals, TickReport, DISPATCH_ORDER,
};
pub use error::BufferError;
pub use input::{EditKey, HeldKeys, InputSnapshot};
