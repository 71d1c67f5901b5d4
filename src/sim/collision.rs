//! Collision detection between the character and the world
//!
//! Everything is axis-aligned: the character is a square, each obstacle is
//! two solid rectangles, the ground is a horizontal line. Ground contact is
//! checked first and short-circuits the obstacle scan.

use super::state::{Character, Obstacle};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }
}

/// What the character ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Ground,
    /// Obstacle by ID
    Obstacle(u32),
}

/// Find the first collision for this tick, if any
///
/// Obstacles are scanned in collection order and the scan stops at the
/// first hit.
pub fn check_collision(
    character: &Character,
    obstacles: &[Obstacle],
    floor_y: f32,
) -> Option<Collision> {
    if character.is_grounded(floor_y) {
        return Some(Collision::Ground);
    }

    let body = character.rect();
    obstacles
        .iter()
        .find(|o| body.intersects(&o.top_rect()) || body.intersects(&o.bottom_rect(floor_y)))
        .map(|o| Collision::Obstacle(o.id))
}
