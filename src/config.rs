//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/kager/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editable::RepeatIntervals;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Ticks a held arrow key waits before repeating
    pub navigation_repeat_ticks: u32,
    /// Ticks a held Backspace/Enter waits before repeating
    pub edit_repeat_ticks: u32,
    /// Spaces substituted for each tab when loading a file
    pub tab_width: usize,
    /// Font size in logical pixels
    pub font_size: f32,
    /// Explicit font file; when unset, common system monospace fonts are probed
    pub font_path: Option<PathBuf>,
    pub window_width: u32,
    pub window_height: u32,
    /// Simulation rate of the edit loop
    pub ticks_per_second: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let intervals = RepeatIntervals::default();
        Self {
            navigation_repeat_ticks: intervals.navigation,
            edit_repeat_ticks: intervals.edit,
            tab_width: 8,
            font_size: 14.0,
            font_path: None,
            window_width: 1280,
            window_height: 480,
            ticks_per_second: 60,
        }
    }
}

impl EditorConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Key-repeat cooldowns for the edit engine
    pub fn repeat_intervals(&self) -> RepeatIntervals {
        RepeatIntervals {
            navigation: self.navigation_repeat_ticks,
            edit: self.edit_repeat_ticks,
        }
    }
}
