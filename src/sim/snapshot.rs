//! Read-only view of a frame for the renderer

use serde::Serialize;

use super::state::{GameState, Obstacle, Particle, RoundPhase};
use crate::consts::*;

/// Character pose as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterPose {
    pub x: f32,
    pub y: f32,
    /// Degrees
    pub rotation: f32,
    /// Squashed right after a jump
    pub squashed: bool,
    /// Idle bobbing animation before the first jump
    pub bobbing: bool,
}

/// Transient effects currently on
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectFlags {
    pub score_pop: bool,
    pub flash: bool,
    pub shake: bool,
}

/// Everything a renderer needs for one frame, borrowed from the state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot<'a> {
    pub phase: RoundPhase,
    pub character: CharacterPose,
    pub obstacles: &'a [Obstacle],
    pub particles: &'a [Particle],
    pub effects: EffectFlags,
    pub milestone_text: Option<&'a str>,
    pub score: u32,
    pub best_score: u32,
    pub meme_background: bool,
    pub pipe_width: f32,
    pub ground_height: f32,
}

impl<'a> RenderSnapshot<'a> {
    pub fn capture(state: &'a GameState, best_score: u32) -> Self {
        let c = &state.character;
        Self {
            phase: state.phase,
            character: CharacterPose {
                x: c.x,
                y: c.y,
                rotation: c.rotation,
                squashed: state.flags.jump_squash.is_active(),
                bobbing: state.phase == RoundPhase::Idle,
            },
            obstacles: &state.obstacles,
            particles: &state.particles,
            effects: EffectFlags {
                score_pop: state.flags.score_pop.is_active(),
                flash: state.flags.flash.is_active(),
                shake: state.flags.shake.is_active(),
            },
            milestone_text: state.milestone.as_ref().map(|m| m.phrase.as_str()),
            score: state.score,
            best_score,
            meme_background: state.settings.meme_background,
            pipe_width: PIPE_WIDTH,
            ground_height: GROUND_HEIGHT,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
