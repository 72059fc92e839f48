use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Launch-time settings for a play session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Visible arena width in world units
    pub arena_width: f32,
    /// Visible arena height in world units
    pub arena_height: f32,
    /// Simulation ticks (and rendered frames) per second
    pub fps: u32,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Where tracing output goes (stdout belongs to the renderer)
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 1152.0,
            arena_height: 648.0,
            fps: 30,
            seed: None,
            log_file: PathBuf::from("neon_survivor.log"),
        }
    }
}

impl GameConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::load_or_default`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(width) = lookup("NEON_ARENA_WIDTH") {
            match width.parse::<f32>() {
                Ok(parsed) if parsed >= 200.0 => config.arena_width = parsed,
                _ => tracing::warn!("Invalid NEON_ARENA_WIDTH '{}', using default", width),
            }
        }

        if let Some(height) = lookup("NEON_ARENA_HEIGHT") {
            match height.parse::<f32>() {
                Ok(parsed) if parsed >= 200.0 => config.arena_height = parsed,
                _ => tracing::warn!("Invalid NEON_ARENA_HEIGHT '{}', using default", height),
            }
        }

        if let Some(fps) = lookup("NEON_FPS") {
            match fps.parse::<u32>() {
                Ok(parsed) if (1..=240).contains(&parsed) => config.fps = parsed,
                _ => tracing::warn!("NEON_FPS must be 1-240, got '{}', using default", fps),
            }
        }

        if let Some(seed) = lookup("NEON_SEED") {
            match seed.parse::<u64>() {
                Ok(parsed) => config.seed = Some(parsed),
                Err(_) => tracing::warn!("Invalid NEON_SEED '{}', seeding from entropy", seed),
            }
        }

        if let Some(path) = lookup("NEON_LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            return Err(Error::InvalidConfig("arena_width must be positive".to_string()));
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            return Err(Error::InvalidConfig("arena_height must be positive".to_string()));
        }
        if self.fps == 0 {
            return Err(Error::InvalidConfig("fps must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Wall-clock length of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Simulated seconds advanced per tick.
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}
