//! Flappy Meme - a one-button side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, scoring, collisions)
//! - `session`: Application flow around a round (loading, playing, game over)
//! - `audio`: Sound and speech capabilities the simulation triggers
//! - `settings`: Tunable physics and difficulty presets
//! - `highscores`: Persisted best score

pub mod audio;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScore;
pub use session::{AppPhase, Session};
pub use settings::{Difficulty, GameSettings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Character bounding box (square)
    pub const CHARACTER_SIZE: f32 = 80.0;
    /// Fixed horizontal position of the character
    pub const CHARACTER_X: f32 = 50.0;
    /// Vertical position at the start of every round
    pub const CHARACTER_START_Y: f32 = 150.0;
    /// Visual rotation limits (degrees)
    pub const MIN_ROTATION: f32 = -30.0;
    pub const MAX_ROTATION: f32 = 90.0;
    /// Degrees of rotation per unit of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 5.0;

    /// Obstacle (pipe) width
    pub const PIPE_WIDTH: f32 = 100.0;
    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 80.0;
    /// Minimum wall-clock time between spawns (ms)
    pub const PIPE_SPAWN_INTERVAL_MS: f64 = 1400.0;
    /// Top margin kept above every gap
    pub const GAP_TOP_MARGIN: f32 = 50.0;
    /// Top + bottom margins subtracted from the spawn span
    pub const GAP_TOTAL_MARGIN: f32 = 100.0;

    /// Score points per difficulty level
    pub const POINTS_PER_LEVEL: u32 = 10;
    /// Scroll speed added per level
    pub const SPEED_PER_LEVEL: f32 = 0.25;
    /// Gap shrink per level
    pub const GAP_SHRINK_PER_LEVEL: f32 = 5.0;
    /// Gap never shrinks below this
    pub const MIN_PIPE_GAP: f32 = 150.0;
    /// Largest accepted base gap
    pub const MAX_PIPE_GAP: f32 = 400.0;

    /// Default points between milestones
    pub const MILESTONE_INTERVAL: u32 = 5;

    /// Transient effect durations (ms)
    pub const JUMP_SQUASH_MS: f64 = 100.0;
    pub const SCORE_POP_MS: f64 = 300.0;
    pub const FLASH_MS: f64 = 150.0;
    pub const SHAKE_MS: f64 = 300.0;
    pub const MILESTONE_TEXT_MS: f64 = 2000.0;

    /// Particles per jump burst
    pub const JUMP_PARTICLES: usize = 15;
    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;
    /// Light gravity applied to particles each tick
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    /// Alpha lost per tick
    pub const PARTICLE_FADE: f32 = 0.02;
}
