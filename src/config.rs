//! Board geometry and game rules
//!
//! Fixed when a session is created. Loadable from JSON; any field left out
//! falls back to the arcade defaults in [`crate::consts`].

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the score threshold speed-up behaves once crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedEscalation {
    /// Apply the speed-up a single time per game
    #[default]
    Once,
    /// Re-apply on every tick past the threshold (pipes accelerate without bound)
    EveryTick,
}

impl SpeedEscalation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedEscalation::Once => "once",
            SpeedEscalation::EveryTick => "every_tick",
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Board ===
    pub board_width: i32,
    pub board_height: i32,

    // === Bird ===
    pub bird_x: i32,
    pub bird_width: i32,
    pub bird_height: i32,
    pub gravity: i32,
    pub jump_velocity: i32,

    // === Pipes ===
    pub pipe_width: i32,
    pub pipe_height: i32,
    pub pipe_velocity_x: i32,
    pub spawn_period_ms: u64,

    // === Scoring and speed ===
    pub score_per_pipe: f64,
    pub speed_up_score: f64,
    pub speed_up_delta_x: i32,
    pub base_tick_rate_hz: u32,
    pub fast_tick_rate_hz: u32,
    pub speed_escalation: SpeedEscalation,

    /// Drop pipes once they are passed and fully off the left edge
    pub prune_offscreen_pipes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            pipe_velocity_x: PIPE_VELOCITY_X,
            spawn_period_ms: SPAWN_PERIOD_MS,

            score_per_pipe: SCORE_PER_PIPE,
            speed_up_score: SPEED_UP_SCORE,
            speed_up_delta_x: SPEED_UP_DELTA_X,
            base_tick_rate_hz: BASE_TICK_RATE_HZ,
            fast_tick_rate_hz: FAST_TICK_RATE_HZ,
            speed_escalation: SpeedEscalation::Once,

            prune_offscreen_pipes: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{} ({}), using default config", e, path.as_ref().display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
        ];
        for (name, value) in positive {
            if value <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.spawn_period_ms == 0 {
            return Err(ConfigError::Invalid("spawn_period_ms must be positive".into()));
        }
        if self.base_tick_rate_hz == 0 || self.fast_tick_rate_hz == 0 {
            return Err(ConfigError::Invalid("tick rates must be positive".into()));
        }
        if self.score_per_pipe.is_nan() || self.score_per_pipe <= 0.0 {
            return Err(ConfigError::Invalid("score_per_pipe must be positive".into()));
        }
        Ok(())
    }

    /// Vertical gap between the pipes of a pair
    #[inline]
    pub fn opening_space(&self) -> i32 {
        self.board_height / 4
    }

    /// Where the bird sits at the start of every game
    #[inline]
    pub fn bird_start(&self) -> IVec2 {
        IVec2::new(self.bird_x, self.board_height / 2)
    }
}
