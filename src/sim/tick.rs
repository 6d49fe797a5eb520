//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::autopilot;
use super::spawn::prune_offscreen;
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::SpeedEscalation;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space/tap); starts the game from the menu
    pub flap: bool,
    /// Idle/demo mode - AI decides when to flap
    pub idle_mode: bool,
}

/// Advance the game state by one tick
///
/// Does nothing unless the game is playing. A flap that starts the game
/// from the menu ends the call; the first step runs on the next tick.
/// Order within a tick: gravity, top clamp, scroll, scoring, pipe collision,
/// ground, speed-up.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.flap || (input.idle_mode && autopilot::wants_flap(state)) {
        let from_menu = state.phase == GamePhase::Menu;
        if state.flap() && from_menu {
            return;
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Gravity
    state.velocity_y += state.config.gravity;
    state.bird.pos.y += state.velocity_y;

    // Can't fly above the top of the board
    state.bird.pos.y = state.bird.pos.y.max(0);

    // Scroll pipes left; saturates so runaway speed-ups can't wrap around
    for pipe in &mut state.pipes {
        pipe.pos.x = pipe.pos.x.saturating_add(state.velocity_x);
    }

    // Score each pipe once, when the bird's x clears its trailing edge
    let bird_x = state.bird.pos.x;
    let mut scored = 0;
    for pipe in &mut state.pipes {
        if !pipe.passed && bird_x > pipe.right() {
            pipe.passed = true;
            scored += 1;
        }
    }
    for _ in 0..scored {
        state.score += state.config.score_per_pipe;
        state.emit(GameEvent::Scored);
    }

    // Pipe collision
    let bird = state.bird.rect();
    if state.pipes.iter().any(|pipe| bird.overlaps(&pipe.rect())) {
        state.end_game();
    }

    // Fell off the bottom
    if state.bird.pos.y > state.config.board_height {
        state.end_game();
    }

    apply_speed_up(state);

    if state.config.prune_offscreen_pipes {
        prune_offscreen(state);
    }
}

/// Speed pipes and the tick rate up once the score threshold is reached
fn apply_speed_up(state: &mut GameState) {
    if state.score < state.config.speed_up_score {
        return;
    }
    if state.sped_up && state.config.speed_escalation == SpeedEscalation::Once {
        return;
    }

    state.velocity_x = state.velocity_x.saturating_add(state.config.speed_up_delta_x);
    state.tick_rate_hz = state.config.fast_tick_rate_hz;
    if !state.sped_up {
        state.sped_up = true;
        state.emit(GameEvent::SpeedUp);
        log::info!(
            "Speed up at score {} ({}): pipes {}/tick, {} Hz",
            state.display_score(),
            state.config.speed_escalation.as_str(),
            state.velocity_x,
            state.tick_rate_hz
        );
    }
}
