//! Game configuration loaded from an optional JSON file.
//!
//! Every field has a default, so an empty object (or no file at all) yields a
//! playable setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_PLAYFIELD_HEIGHT, DEFAULT_PLAYFIELD_WIDTH, TICK_RATE};
use crate::types::Playfield;

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. Same seed and same input = same game.
    pub seed: u64,
    /// Playfield width in pixels.
    pub width: f64,
    /// Playfield height in pixels.
    pub height: f64,
    /// Frames per second the driver aims for.
    pub tick_rate: u32,
    /// WAVE file played when the player fires.
    pub sound_path: PathBuf,
    /// Stop after this many frames. `None` runs until shut down.
    pub max_ticks: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: DEFAULT_PLAYFIELD_WIDTH,
            height: DEFAULT_PLAYFIELD_HEIGHT,
            tick_rate: TICK_RATE,
            sound_path: PathBuf::from("sounds/shoot.wav"),
            max_ticks: None,
        }
    }
}

impl GameConfig {
    /// Read and validate a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject dimensions and rates the frame driver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        if self.tick_rate == 0 || self.tick_rate > 1000 {
            return Err(ConfigError::Invalid(format!(
                "tick_rate must be within 1..=1000, got {}",
                self.tick_rate
            )));
        }
        Ok(())
    }

    pub fn playfield(&self) -> Playfield {
        Playfield {
            width: self.width,
            height: self.height,
        }
    }
}
