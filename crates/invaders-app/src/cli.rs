//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use invaders_core::config::{ConfigError, GameConfig};

/// A minimal invaders game for the terminal
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// RNG seed for enemy fire
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shoot sound (RIFF/WAVE)
    #[arg(long)]
    pub sound: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Run without drawing to the terminal
    #[arg(long)]
    pub headless: bool,

    /// Do not load or play the shoot sound
    #[arg(long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Load the config file (or defaults), apply flag overrides, and validate.
    pub fn resolve_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_path(path)?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(sound) = &self.sound {
            config.sound_path = sound.clone();
        }
        if self.ticks.is_some() {
            config.max_ticks = self.ticks;
        }
        config.validate()?;
        Ok(config)
    }
}
