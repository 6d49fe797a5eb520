//! Pipe pair generation
//!
//! Each spawn places one top/bottom pair just past the right edge. The
//! opening between them is always `board_height / 4`; only its height varies.

use super::state::{GameState, Pipe, PipeKind};
use crate::config::Config;
use crate::consts::PIPE_BASELINE_Y;

/// Top pipe y for a unit sample in [0, 1)
///
/// Ranges over `(baseline - 3h/4, baseline - h/4]` for pipe height `h`,
/// truncated toward zero.
pub fn top_pipe_y(config: &Config, unit: f64) -> i32 {
    let base = PIPE_BASELINE_Y - config.pipe_height / 4;
    let spread = f64::from(config.pipe_height / 2);
    (f64::from(base) - unit * spread) as i32
}

/// Build a pair with the top pipe at `top_y`, positioned at the right edge
pub fn pipe_pair(config: &Config, top_y: i32) -> [Pipe; 2] {
    let x = config.board_width;
    let bottom_y = top_y + config.pipe_height + config.opening_space();
    [
        Pipe::new(PipeKind::Top, x, top_y, config),
        Pipe::new(PipeKind::Bottom, x, bottom_y, config),
    ]
}

/// Spawn a pair using the session RNG. No-op unless playing.
pub fn spawn_pipes(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }
    let unit = state.next_unit();
    spawn_pipes_with(state, unit);
}

/// Spawn a pair from an explicit unit sample. No-op unless playing.
pub fn spawn_pipes_with(state: &mut GameState, unit: f64) {
    if !state.is_playing() {
        return;
    }
    let top_y = top_pipe_y(&state.config, unit);
    state.pipes.extend(pipe_pair(&state.config, top_y));
    state.pairs_spawned += 1;
    log::debug!(
        "Spawned pair {} at top_y={} ({} pipes active)",
        state.pairs_spawned,
        top_y,
        state.pipes.len()
    );
}

/// Remove pipes that can no longer interact with the bird
pub fn prune_offscreen(state: &mut GameState) -> usize {
    let before = state.pipes.len();
    state.pipes.retain(|p| !(p.passed && p.right() < 0));
    let removed = before - state.pipes.len();
    if removed > 0 {
        log::debug!("Pruned {} off-screen pipes", removed);
    }
    removed
}
