use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Glyphs used to draw the maze and its actors. Keys missing from the config
/// file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub player: String,
    pub ghost: String,
    pub wall: String,
    pub dot: String,
    pub pill: String,
    pub death: String,
    pub space: String,
    /// Glyphs are two columns wide; cursor columns are doubled.
    pub use_emoji: bool,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            player: "P".into(),
            ghost: "G".into(),
            wall: " ".into(),
            dot: ".".into(),
            pill: "X".into(),
            death: "S".into(),
            space: " ".into(),
            use_emoji: false,
        }
    }
}

impl Glyphs {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Glyphs::load`], but a missing or broken file only costs a
    /// warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(glyphs) => glyphs,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load configuration, using default glyphs");
                Self::default()
            }
        }
    }

    /// Terminal columns taken by one maze cell.
    pub fn cell_width(&self) -> usize {
        if self.use_emoji {
            2
        } else {
            1
        }
    }
}
