//! Flappy - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, game phases)
//! - `scheduler`: Fixed-rate tick and pipe-spawn timers driven by host time
//! - `config`: Board geometry and rule switches
//! - `render`: Frame snapshots and a text renderer
//! - `audio`: Sound effect sinks fed by simulation events

pub mod audio;
pub mod config;
pub mod render;
pub mod scheduler;
pub mod sim;

pub use config::{Config, ConfigError, SpeedEscalation};
pub use scheduler::Scheduler;

/// Game configuration constants
pub mod consts {
    /// Board dimensions
    pub const BOARD_WIDTH: i32 = 360;
    pub const BOARD_HEIGHT: i32 = 640;

    /// Bird defaults - x never changes, pipes scroll past instead
    pub const BIRD_X: i32 = 50;
    pub const BIRD_Y: i32 = BOARD_HEIGHT / 2;
    pub const BIRD_WIDTH: i32 = 34;
    pub const BIRD_HEIGHT: i32 = 24;

    /// Pipe defaults
    pub const PIPE_WIDTH: i32 = 64;
    pub const PIPE_HEIGHT: i32 = 512;
    /// Pipes are placed relative to the top of the board
    pub const PIPE_BASELINE_Y: i32 = 0;

    /// Horizontal pipe velocity (units/tick, negative = leftward)
    pub const PIPE_VELOCITY_X: i32 = -4;
    /// Extra leftward speed applied on escalation
    pub const SPEED_UP_DELTA_X: i32 = -2;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: i32 = 1;
    /// Velocity set by a flap
    pub const JUMP_VELOCITY: i32 = -9;

    /// Score added per pipe cleared (a pair is worth 1.0)
    pub const SCORE_PER_PIPE: f64 = 0.5;
    /// Score at which the game speeds up
    pub const SPEED_UP_SCORE: f64 = 1000.0;

    /// Simulation tick rates
    pub const BASE_TICK_RATE_HZ: u32 = 60;
    pub const FAST_TICK_RATE_HZ: u32 = 75;
    /// Pipe spawn period
    pub const SPAWN_PERIOD_MS: u64 = 1500;
    /// Largest host time delta consumed by one scheduler advance
    pub const MAX_CATCH_UP_MS: u64 = 250;
}

/// Interval between simulation ticks for a rate, truncated to whole milliseconds
#[inline]
pub fn tick_interval_ms(rate_hz: u32) -> u64 {
    1000 / u64::from(rate_hz.max(1))
}
