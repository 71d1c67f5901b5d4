//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, time supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (obstacles leftmost-first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod feedback;
pub mod obstacles;
pub mod particles;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Collision, Rect, check_collision};
pub use difficulty::{LevelParams, VOICE_LINES};
pub use feedback::{MilestoneText, TimedFlag, VisualFlags};
pub use snapshot::RenderSnapshot;
pub use state::{Character, GameState, Obstacle, Particle, RoundPhase, Viewport};
pub use tick::{GameEvent, TickInput, tick};
