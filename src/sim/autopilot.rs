//! Idle/demo mode pilot
//!
//! Aims the bird just above the bottom pipe of the nearest pair it has not
//! cleared yet, flapping whenever the next step would drop it below that line.

use super::state::{GamePhase, GameState, PipeKind};

/// Clearance kept between the bird's bottom edge and the bottom pipe
const BOTTOM_MARGIN: i32 = 12;

/// Target y for the bird's top edge
pub fn target_y(state: &GameState) -> i32 {
    let bird_left = state.bird.pos.x;
    let next_bottom = state
        .pipes
        .iter()
        .filter(|p| p.kind == PipeKind::Bottom && p.right() >= bird_left)
        .min_by_key(|p| p.pos.x);

    match next_bottom {
        Some(pipe) => pipe.pos.y - state.bird.size.y - BOTTOM_MARGIN,
        None => state.config.board_height / 2,
    }
}

/// Whether the pilot would flap this tick. Always true on the menu.
pub fn wants_flap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Menu => true,
        GamePhase::GameOver => false,
        GamePhase::Playing => {
            let next_velocity = state.velocity_y + state.config.gravity;
            state.bird.pos.y + next_velocity >= target_y(state)
        }
    }
}
