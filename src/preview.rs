//! Live preview contract
//!
//! The previewer is handed the whole buffer once per tick and reports whether
//! it compiled. Failures are shown as text; they never reach the buffer.

/// Outcome of one preview attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewStatus {
    Compiled,
    Failed(String),
}

impl PreviewStatus {
    pub fn is_compiled(&self) -> bool {
        matches!(self, PreviewStatus::Compiled)
    }

    /// Error text, if the attempt failed
    pub fn error(&self) -> Option<&str> {
        match self {
            PreviewStatus::Compiled => None,
            PreviewStatus::Failed(message) => Some(message),
        }
    }
}

/// Compiles and shows the editor's text
pub trait Previewer {
    /// Attempt to preview `source` for frame number `frame`
    fn preview(&mut self, source: &str, frame: u64) -> PreviewStatus;
}

/// Previewer that only checks there is something to compile.
///
/// Logs status transitions once instead of every tick.
#[derive(Debug, Default)]
pub struct SourceCheckPreviewer {
    last: Option<PreviewStatus>,
}

impl SourceCheckPreviewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<&PreviewStatus> {
        self.last.as_ref()
    }
}

impl Previewer for SourceCheckPreviewer {
    fn preview(&mut self, source: &str, frame: u64) -> PreviewStatus {
        let status = if source.trim().is_empty() {
            PreviewStatus::Failed("empty shader source".to_string())
        } else {
            PreviewStatus::Compiled
        };

        if self.last.as_ref() != Some(&status) {
            match &status {
                PreviewStatus::Compiled => tracing::debug!(frame, "Preview compiled"),
                PreviewStatus::Failed(message) => {
                    tracing::debug!(frame, "Preview failed: {}", message)
                }
            }
            self.last = Some(status.clone());
        }
        status
    }
}
