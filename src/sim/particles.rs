//! Jump particle bursts
//!
//! Cosmetic only: nothing here feeds back into scoring or collision.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::consts::*;

/// Emit a burst of particles at the character's centre
pub fn spawn_jump_burst(state: &mut GameState) {
    let origin = state.character.center();
    for _ in 0..JUMP_PARTICLES {
        let rx: f32 = state.rng.random();
        let ry: f32 = state.rng.random();
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos: origin,
            vel: Vec2::new((rx - 0.5) * 3.0, -ry * 5.0 - 2.0),
            alpha: 1.0,
        });
    }

    // Drop the oldest once over the cap
    if state.particles.len() > MAX_PARTICLES {
        let excess = state.particles.len() - MAX_PARTICLES;
        state.particles.drain(..excess);
    }
}

/// Move, fall and fade every particle; remove the invisible ones
pub fn update(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.alpha -= PARTICLE_FADE;
    }
    particles.retain(|p| p.alpha > 0.0);
}
