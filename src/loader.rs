//! Seeds the text buffer from a shader file on disk.

use std::path::Path;

use anyhow::{Context, Result};

use crate::editable::TextBuffer;

/// Turn raw file contents into buffer lines, expanding tabs to `tab_width` spaces
pub fn buffer_from_source(source: &str, tab_width: usize) -> TextBuffer {
    let expanded = source.replace('\t', &" ".repeat(tab_width));
    TextBuffer::from_text(&expanded)
}

/// Read `path` into a fresh buffer
pub fn load_file(path: &Path, tab_width: usize) -> Result<TextBuffer> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shader source {}", path.display()))?;
    let buffer = buffer_from_source(&source, tab_width);
    tracing::info!(
        "Loaded {} ({} lines)",
        path.display(),
        buffer.line_count()
    );
    Ok(buffer)
}
