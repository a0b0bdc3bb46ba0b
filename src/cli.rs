//! Command-line argument parsing for the editor

use clap::Parser;
use std::path::PathBuf;

use crate::config::EditorConfig;

/// A shader editor with a live preview pane
#[derive(Parser, Debug)]
#[command(name = "kager", version, about = "A shader editor with a live preview pane")]
pub struct CliArgs {
    /// Shader source to open (starts with an empty document when omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Spaces substituted for each tab in the loaded file
    #[arg(long, value_name = "N")]
    pub tab_width: Option<usize>,

    /// Read settings from this file instead of ~/.config/kager/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// File to seed the buffer with
    pub path: Option<PathBuf>,
    /// Settings with CLI overrides applied
    pub editor: EditorConfig,
}

impl CliArgs {
    /// Resolve the settings file and apply CLI overrides on top of it
    pub fn into_config(self) -> StartupConfig {
        let editor = match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => EditorConfig::load(),
        };
        self.apply_to(editor)
    }

    fn apply_to(self, mut editor: EditorConfig) -> StartupConfig {
        if let Some(tab_width) = self.tab_width {
            editor.tab_width = tab_width;
        }
        StartupConfig {
            path: self.path,
            editor,
        }
    }
}
