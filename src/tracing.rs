//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! cursor and buffer state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=kager::editable=trace` - every keystroke, including typed text
//! - `RUST_LOG=kager::preview=debug` - preview status transitions
//!
//! # Log Files
//!
//! Logs are written to `~/.config/kager/logs/kager.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::{Cursor, TextBuffer};

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG env var for filtering, defaulting to `warn`.
/// File logging writes to `~/.config/kager/logs/kager.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "kager.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of cursor/buffer state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub line_count: usize,
    pub line: usize,
    pub column: usize,
    pub line_len: usize,
}

impl CursorSnapshot {
    pub fn capture(buffer: &TextBuffer, cursor: Cursor) -> Self {
        Self {
            line_count: buffer.line_count(),
            line: cursor.line,
            column: cursor.column,
            line_len: buffer.line_len(cursor.line).unwrap_or(0),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &CursorSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.line_count != other.line_count {
            changes.push(format!("lines: {} → {}", self.line_count, other.line_count));
        }
        if self.line != other.line || self.column != other.column {
            changes.push(format!(
                "cursor: ({},{}) → ({},{})",
                self.line, self.column, other.line, other.column
            ));
        }
        if self.line_len != other.line_len {
            changes.push(format!(
                "line length: {} → {}",
                self.line_len, other.line_len
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
