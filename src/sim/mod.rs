//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer physics in board units, one step per tick
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::{pipe_pair, prune_offscreen, spawn_pipes, spawn_pipes_with, top_pipe_y};
pub use state::{Bird, Command, GameEvent, GamePhase, GameState, Pipe, PipeKind, RngState};
pub use tick::{TickInput, tick};
