//=========================================================================
// Startup Configuration
//=========================================================================
//
// Loads and validates `config.json` before any rendering resource
// exists.
//
// Format (every key optional, camelCase):
// ```json
// {
//   "windowWidth": 800,
//   "windowHeight": 600,
//   "cursorTrailElements": 10,
//   "cursorTrailSpawnTime": 30,
//   "cursorSize": 100,
//   "trailSize": 100,
//   "cursorImage": "img/cursor.png",
//   "trailImage": "img/cursortrail.png",
//   "vsync": true,
//   "windowTitle": "Cursor Trail"
// }
// ```
//
// A missing file means "use the defaults". A file that cannot be read or
// parsed, or that holds a zero size/count/interval, is a `ConfigError`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::{CursorAssets, CursorSettings};

//=== ConfigError =========================================================

/// Malformed startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON for this schema (including negative numbers).
    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

//=== Config ==============================================================

/// Window, cursor and trail parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Inner window width (physical pixels).
    pub window_width: u32,

    /// Inner window height (physical pixels).
    pub window_height: u32,

    /// Title bar text.
    pub window_title: String,

    /// Number of trail entries.
    pub cursor_trail_elements: u32,

    /// Milliseconds between two trail spawns.
    pub cursor_trail_spawn_time: u32,

    /// Primary cursor side length (pixels).
    pub cursor_size: u32,

    /// Trail entry side length (pixels).
    pub trail_size: u32,

    pub cursor_image: PathBuf,
    pub trail_image: PathBuf,

    /// Sync presentation to the display refresh.
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        let assets = CursorAssets::default();
        Self {
            window_width: 800,
            window_height: 600,
            window_title: "Cursor Trail".to_string(),
            cursor_trail_elements: 10,
            cursor_trail_spawn_time: 30,
            cursor_size: 100,
            trail_size: 100,
            cursor_image: assets.cursor_image,
            trail_image: assets.trail_image,
            vsync: true,
        }
    }
}

impl Config {
    //--- Loading ----------------------------------------------------------

    /// Reads and validates the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        info!(target: "config", "Loaded configuration from '{}'", path.display());
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(target: "config", "No config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    //--- Validation -------------------------------------------------------

    /// Rejects zero sizes, counts and intervals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("windowWidth", self.window_width),
            ("windowHeight", self.window_height),
            ("cursorTrailElements", self.cursor_trail_elements),
            ("cursorTrailSpawnTime", self.cursor_trail_spawn_time),
            ("cursorSize", self.cursor_size),
            ("trailSize", self.trail_size),
        ];

        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive integer".to_string(),
                });
            }
        }
        Ok(())
    }

    //--- Conversions ------------------------------------------------------

    pub fn cursor_settings(&self) -> CursorSettings {
        CursorSettings {
            cursor_size: self.cursor_size,
            trail_size: self.trail_size,
            trail_length: self.cursor_trail_elements as usize,
            spawn_interval_ms: f64::from(self.cursor_trail_spawn_time),
        }
    }

    pub fn cursor_assets(&self) -> CursorAssets {
        CursorAssets {
            cursor_image: self.cursor_image.clone(),
            trail_image: self.trail_image.clone(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
