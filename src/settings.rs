//! Game settings
//!
//! Read from a JSON file; any field left out takes its default.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play area ===
    pub screen_width: u32,
    pub screen_height: u32,

    // === Simulation ===
    /// Seed for power-up spawn rolls
    pub seed: u64,
    /// Directory holding `one.lvl` .. `four.lvl`; built-in levels otherwise
    pub level_dir: Option<PathBuf>,
    /// Pass-through balls slide through breakable bricks instead of
    /// bouncing off them
    pub pass_through_skips_resolution: bool,

    // === Headless driver ===
    /// Frames to run before exiting
    pub frames: u32,
    /// Target frame time (seconds)
    pub frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            seed: 0x0b5e_55ed,
            level_dir: None,
            pass_through_skips_resolution: false,

            frames: 3600,
            frame_dt: 1.0 / 60.0,
        }
    }
}

impl Settings {
    /// Height of the brick area: the top half of the screen
    pub fn level_height(&self) -> f32 {
        self.screen_height as f32 / 2.0
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid settings JSON")
    }

    /// Read settings from a file
    pub fn try_load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Read settings from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings
            }
            Err(e) => {
                log::warn!("{:#} - using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings saved");
        Ok(())
    }
}
