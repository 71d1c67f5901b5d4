//! Demo mode controller
//!
//! Decides when to jump so the game can play itself (attract screen and the
//! native headless run). Reads the state, never mutates it.

use super::state::{GameState, RoundPhase, Viewport};
use crate::consts::*;

/// Clearance kept between the character and the lower pipe
const FLOOR_MARGIN: f32 = 20.0;

/// Whether the autopilot wants to jump this frame
///
/// Rides just above the bottom of the next gap, flapping whenever the
/// character sinks below that line.
pub fn wants_jump(state: &GameState, viewport: &Viewport) -> bool {
    match state.phase {
        RoundPhase::Over => false,
        RoundPhase::Idle => true,
        RoundPhase::Active => {
            let c = &state.character;
            // First obstacle the character hasn't fully cleared
            let floor_line = state
                .obstacles
                .iter()
                .find(|o| o.right_edge() >= c.x)
                .map(|o| o.gap_y + o.gap - FLOOR_MARGIN)
                .unwrap_or(viewport.floor_y() / 2.0 + CHARACTER_SIZE);

            c.y + CHARACTER_SIZE > floor_line
        }
    }
}
