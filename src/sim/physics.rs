//! Character physics
//!
//! One integration step per rendered frame. There is no fixed timestep, so
//! frame-rate variance changes simulation speed.

use super::state::{Character, RoundPhase};
use crate::consts::*;

/// Visual tilt for a given vertical velocity (degrees)
#[inline]
pub fn rotation_for_velocity(vel: f32) -> f32 {
    (vel * ROTATION_PER_VELOCITY).clamp(MIN_ROTATION, MAX_ROTATION)
}

/// Advance the character by one tick
///
/// Velocity is updated before position. Nothing moves in `Idle` or once the
/// character rests on the floor. The ceiling clamp only applies in `Active`;
/// after a collision the character is free to leave the top of the screen
/// while it settles.
pub fn integrate(character: &mut Character, phase: RoundPhase, gravity: f32, floor_y: f32) {
    if phase != RoundPhase::Idle && !character.is_grounded(floor_y) {
        character.vel += gravity;
        let new_y = character.y + character.vel;

        if new_y >= floor_y {
            character.y = floor_y;
        } else if new_y < 0.0 && phase == RoundPhase::Active {
            character.y = 0.0;
            character.vel = 0.0;
        } else {
            character.y = new_y;
        }
    }

    character.rotation = rotation_for_velocity(character.vel);
}

/// Apply a jump impulse. The impulse replaces velocity rather than adding to it.
#[inline]
pub fn apply_jump(character: &mut Character, jump_force: f32) {
    character.vel = jump_force;
}
