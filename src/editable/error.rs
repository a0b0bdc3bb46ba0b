//! Error types for buffer operations.

use thiserror::Error;

/// Errors raised by [`TextBuffer`](super::TextBuffer) operations.
///
/// These are contract violations: the engine's clamping rules keep every
/// index it computes in range, so seeing one of these means a bug upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("line {row} out of range (buffer has {line_count} lines)")]
    LineOutOfRange { row: usize, line_count: usize },

    #[error("column {column} out of range on line {row} (length {line_len})")]
    ColumnOutOfRange {
        row: usize,
        column: usize,
        line_len: usize,
    },

    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}
