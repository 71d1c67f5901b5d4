//! Score-driven difficulty and milestone feedback
//!
//! Every `POINTS_PER_LEVEL` points the scroll speed steps up and the gap
//! steps down, never below `MIN_PIPE_GAP`.

use rand::Rng;

use crate::consts::*;
use crate::settings::GameSettings;

/// Celebration phrases for milestones
pub const VOICE_LINES: [&str; 5] = [
    "PRO MAX GAMER!",
    "He's cooking!",
    "EZ clap!",
    "UNSTOPPABLE!",
    "GOATed!",
];

/// Effective gameplay parameters for the current score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Horizontal scroll speed (units/tick)
    pub speed: f32,
    /// Gap height for newly spawned obstacles
    pub gap: f32,
}

/// Difficulty level for a score
#[inline]
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL
}

impl LevelParams {
    pub fn for_score(settings: &GameSettings, score: u32) -> Self {
        let level = level_for_score(score) as f32;
        Self {
            speed: settings.pipe_speed + level * SPEED_PER_LEVEL,
            gap: (settings.pipe_gap - level * GAP_SHRINK_PER_LEVEL).max(MIN_PIPE_GAP),
        }
    }
}

/// Whether reaching `score` earns milestone feedback every `interval` points
#[inline]
pub fn is_milestone(score: u32, interval: u32) -> bool {
    interval > 0 && score > 0 && score % interval == 0
}

/// Pick a phrase uniformly at random
pub fn pick_voice_line<R: Rng>(rng: &mut R) -> &'static str {
    VOICE_LINES[rng.random_range(0..VOICE_LINES.len())]
}
