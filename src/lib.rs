//! Kager - a shader editor with a live preview pane
//!
//! This crate provides the editing core (document model, cursor rules and the
//! per-tick edit engine), highlighting, and the contracts the desktop runtime
//! uses to render and preview the document.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod loader;
pub mod preview;
pub mod session;
pub mod syntax;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editable::{EditEngine, InputSnapshot, TextBuffer};
pub use session::Session;
pub use theme::Theme;
