//! Obstacle spawning, scrolling, pass detection and culling

use rand::Rng;

use super::state::{GameState, Obstacle, Viewport};
use crate::consts::*;

/// Scroll every obstacle left by `speed`
pub fn advance(obstacles: &mut [Obstacle], speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
    }
}

/// Mark obstacles whose right edge is behind `character_left`.
///
/// Returns how many obstacles were newly passed. An obstacle is only ever
/// counted once.
pub fn mark_passed(obstacles: &mut [Obstacle], character_left: f32) -> u32 {
    let mut newly_passed = 0;
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && obstacle.right_edge() < character_left {
            obstacle.passed = true;
            newly_passed += 1;
            log::debug!("Obstacle {} passed", obstacle.id);
        }
    }
    newly_passed
}

/// Drop obstacles that have scrolled fully off the left edge. Order is kept.
pub fn cull(obstacles: &mut Vec<Obstacle>) {
    obstacles.retain(|o| o.x > -PIPE_WIDTH);
}

/// Whether enough wall-clock time has passed for another spawn
#[inline]
pub fn spawn_due(now_ms: f64, last_spawn_ms: f64) -> bool {
    now_ms - last_spawn_ms > PIPE_SPAWN_INTERVAL_MS
}

/// Top of a gap of height `gap` for a uniform sample `r` in [0, 1)
///
/// Keeps the whole gap plus margins above the floor. Tiny viewports collapse
/// the span to zero rather than going negative.
pub fn gap_top_for_sample(r: f32, viewport: &Viewport, gap: f32) -> f32 {
    let span = (viewport.floor_y() - gap - GAP_TOTAL_MARGIN).max(0.0);
    r * span + GAP_TOP_MARGIN
}

/// Spawn a new obstacle at the right edge of the viewport if one is due
pub fn spawn_if_due(state: &mut GameState, now_ms: f64, viewport: &Viewport, gap: f32) -> bool {
    if !spawn_due(now_ms, state.last_spawn_ms) {
        return false;
    }

    state.last_spawn_ms = now_ms;
    let r: f32 = state.rng.random();
    let gap_y = gap_top_for_sample(r, viewport, gap);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        spawned_at_ms: now_ms,
        x: viewport.width,
        gap_y,
        gap,
        passed: false,
    });
    log::debug!("Spawned obstacle {} (gap {:.0} at {:.1})", id, gap, gap_y);
    true
}
