//! Per-frame simulation tick
//!
//! Core game loop. Runs components in a fixed order: physics, obstacles and
//! scoring, collision, particles. Side effects (sound, speech, high score)
//! are returned as [`GameEvent`]s for the caller to dispatch; the tick never
//! waits on them.

use super::collision::{Collision, check_collision};
use super::difficulty::{LevelParams, is_milestone, pick_voice_line};
use super::feedback::MilestoneText;
use super::state::{GameState, RoundPhase, Viewport};
use super::{obstacles, particles, physics};
use crate::audio::SoundCue;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Wall-clock timestamp of this frame (ms)
    pub now_ms: f64,
    /// Current drawable area
    pub viewport: Viewport,
    /// Jump pressed since the previous tick
    pub jump: bool,
}

/// Something the outside world should react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// First jump of the round
    RoundStarted,
    /// Fire-and-forget sound trigger
    Sound(SoundCue),
    /// Score increased to this value
    Scored { score: u32 },
    /// Milestone phrase to show and speak
    Milestone { phrase: String },
    /// Round finished with this final score
    RoundEnded { score: u32, cause: Collision },
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let now = input.now_ms;
    let mut events = Vec::new();

    state.flags.expire(now);
    if state.milestone.as_ref().is_some_and(|m| m.is_expired(now)) {
        state.milestone = None;
    }

    if input.jump {
        handle_jump(state, now, &mut events);
    }

    let floor_y = input.viewport.floor_y();
    let gravity = state.settings.gravity;
    physics::integrate(&mut state.character, state.phase, gravity, floor_y);

    // Obstacles, scoring and collision are frozen outside active play
    if state.phase != RoundPhase::Active {
        return events;
    }

    state.time_ticks += 1;

    let params = LevelParams::for_score(&state.settings, state.score);
    obstacles::advance(&mut state.obstacles, params.speed);
    let passed = obstacles::mark_passed(&mut state.obstacles, state.character.x);
    for _ in 0..passed {
        score_point(state, now, &mut events);
    }
    obstacles::cull(&mut state.obstacles);
    obstacles::spawn_if_due(state, now, &input.viewport, params.gap);

    if let Some(cause) = check_collision(&state.character, &state.obstacles, floor_y) {
        end_round(state, now, cause, &mut events);
    }

    particles::update(&mut state.particles);

    events
}

fn handle_jump(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    match state.phase {
        RoundPhase::Over => return,
        RoundPhase::Idle => {
            state.phase = RoundPhase::Active;
            log::info!("Round {} started", state.round);
            events.push(GameEvent::RoundStarted);
        }
        RoundPhase::Active => {}
    }

    physics::apply_jump(&mut state.character, state.settings.jump_force);
    state.flags.on_jump(now);
    particles::spawn_jump_burst(state);
    events.push(GameEvent::Sound(SoundCue::Jump));
}

fn score_point(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    state.score += 1;
    state.flags.on_score(now);
    events.push(GameEvent::Sound(SoundCue::ScorePop));
    events.push(GameEvent::Scored { score: state.score });

    if state.settings.score_voice_lines
        && is_milestone(state.score, state.settings.milestone_interval)
    {
        let phrase = pick_voice_line(&mut state.rng);
        state.milestone = Some(MilestoneText::new(phrase, now));
        events.push(GameEvent::Milestone {
            phrase: phrase.to_string(),
        });
    }
}

fn end_round(state: &mut GameState, now: f64, cause: Collision, events: &mut Vec<GameEvent>) {
    state.phase = RoundPhase::Over;
    state.flags.on_death(now);
    log::info!(
        "Round {} over ({:?}) with score {}",
        state.round,
        cause,
        state.score
    );
    events.push(GameEvent::Sound(SoundCue::Death));
    events.push(GameEvent::RoundEnded {
        score: state.score,
        cause,
    });
}
