//! Application flow around the simulation
//!
//! A [`Session`] owns the round state, the injected sound and speech
//! capabilities and the best score. It takes the host's commands (start,
//! restart, jump, settings changes), runs one tick per frame and dispatches
//! the resulting events.

use serde::{Deserialize, Serialize};

use crate::audio::{Announcer, SoundCue, SoundSink};
use crate::highscores::HighScore;
use crate::settings::{GameSettings, SettingsError};
use crate::sim::{GameEvent, GameState, RenderSnapshot, TickInput, Viewport, tick};

/// Screen-level state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppPhase {
    /// Start screen, waiting for assets and a difficulty
    Waiting,
    /// Assets are being fetched and decoded
    Loading,
    /// A round is on screen (idle or active)
    Playing,
    /// Round ended; character may still be settling
    GameOver,
}

pub struct Session<S: SoundSink, A: Announcer> {
    phase: AppPhase,
    state: GameState,
    high_score: HighScore,
    sound: S,
    announcer: A,
    /// Jump received since the last frame
    pending_jump: bool,
}

impl<S: SoundSink, A: Announcer> Session<S, A> {
    pub fn new(settings: GameSettings, high_score: HighScore, sound: S, announcer: A, seed: u64) -> Self {
        log::info!("Session created with seed {} (best {})", seed, high_score.best);
        Self {
            phase: AppPhase::Waiting,
            state: GameState::new(settings, seed),
            high_score,
            sound,
            announcer,
            pending_jump: false,
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.state.settings
    }

    pub fn high_score(&self) -> HighScore {
        self.high_score
    }

    /// Swap the sound capability (e.g. once recordings are decoded)
    pub fn set_sound(&mut self, sound: S) {
        self.sound = sound;
    }

    /// Accept settings from the start screen and wait for assets
    pub fn begin_loading(&mut self, settings: GameSettings) -> Result<(), SettingsError> {
        if let Err(e) = settings.validate() {
            log::warn!("Rejected settings: {}", e);
            return Err(e);
        }
        self.state.settings = settings;
        self.set_phase(AppPhase::Loading);
        Ok(())
    }

    /// Assets decoded; put a fresh round on screen
    pub fn assets_ready(&mut self) {
        if self.phase != AppPhase::Loading {
            log::warn!("Assets ready while {:?}, ignoring", self.phase);
            return;
        }
        self.reset_round();
    }

    /// Asset loading failed; back to the start screen. Not retried.
    pub fn assets_failed(&mut self, error: &dyn std::error::Error) {
        log::error!("Error loading assets: {}", error);
        self.set_phase(AppPhase::Waiting);
    }

    /// Start a round right away with new settings
    pub fn start_round(&mut self, settings: GameSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.state.settings = settings;
        self.reset_round();
        Ok(())
    }

    /// New round with the current settings
    pub fn restart(&mut self) {
        self.reset_round();
    }

    /// Replace settings mid-session (admin panel). Applies from the next tick.
    pub fn update_settings(&mut self, settings: GameSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        settings.save();
        self.state.settings = settings;
        Ok(())
    }

    pub fn reset_high_score(&mut self) {
        self.high_score.reset();
        self.high_score.save();
        log::info!("High score reset");
    }

    /// Queue a jump for the next frame
    pub fn jump(&mut self) {
        if self.phase == AppPhase::Playing {
            self.pending_jump = true;
        }
    }

    /// Run one tick and dispatch its events
    pub fn frame(&mut self, now_ms: f64, viewport: Viewport) -> Vec<GameEvent> {
        if !matches!(self.phase, AppPhase::Playing | AppPhase::GameOver) {
            return Vec::new();
        }

        let input = TickInput {
            now_ms,
            viewport,
            jump: std::mem::take(&mut self.pending_jump),
        };
        let events = tick(&mut self.state, &input);
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    /// Read-only view of the current frame
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::capture(&self.state, self.high_score.best)
    }

    fn dispatch(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(cue) => self.sound.play(*cue),
            GameEvent::Milestone { phrase } => self.announcer.announce(phrase),
            GameEvent::RoundEnded { score, .. } => {
                self.set_phase(AppPhase::GameOver);
                if self.high_score.submit(*score) {
                    log::info!("New high score: {}", score);
                    self.high_score.save();
                    self.sound.play(SoundCue::HighScore);
                }
            }
            GameEvent::RoundStarted | GameEvent::Scored { .. } => {}
        }
    }

    fn reset_round(&mut self) {
        let settings = self.state.settings.clone();
        self.state.reset(settings);
        self.pending_jump = false;
        self.set_phase(AppPhase::Playing);
    }

    fn set_phase(&mut self, phase: AppPhase) {
        if self.phase != phase {
            log::info!("{:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AssetError;
    use crate::sim::RoundPhase;

    impl SoundSink for Vec<SoundCue> {
        fn play(&mut self, cue: SoundCue) {
            self.push(cue);
        }
    }

    impl Announcer for Vec<String> {
        fn announce(&mut self, phrase: &str) {
            self.push(phrase.to_string());
        }
    }

    type TestSession = Session<Vec<SoundCue>, Vec<String>>;

    const VIEWPORT: Viewport = Viewport {
        width: 400.0,
        height: 720.0,
    };

    fn session(best: u32) -> TestSession {
        Session::new(
            GameSettings::default(),
            HighScore::new(best),
            Vec::new(),
            Vec::new(),
            777,
        )
    }

    fn playing_session(best: u32) -> TestSession {
        let mut s = session(best);
        s.begin_loading(GameSettings::default()).unwrap();
        s.assets_ready();
        s
    }

    /// Jump once, then fall until the round ends
    fn play_until_over(s: &mut TestSession) {
        s.jump();
        let mut now = 100.0;
        for _ in 0..500 {
            s.frame(now, VIEWPORT);
            now += 16.0;
            if s.phase() == AppPhase::GameOver {
                return;
            }
        }
        panic!("round never ended");
    }

    #[test]
    fn test_invalid_settings_stay_on_start_screen() {
        let mut s = session(0);
        let bad = GameSettings {
            pipe_gap: -1.0,
            ..Default::default()
        };
        assert!(s.begin_loading(bad).is_err());
        assert_eq!(s.phase(), AppPhase::Waiting);
    }

    #[test]
    fn test_asset_failure_returns_to_waiting() {
        let mut s = session(0);
        s.begin_loading(GameSettings::default()).unwrap();
        assert_eq!(s.phase(), AppPhase::Loading);
        s.assets_failed(&AssetError::Decode {
            url: "blob:death".to_string(),
        });
        assert_eq!(s.phase(), AppPhase::Waiting);
        // No ticks run without a round
        assert!(s.frame(1000.0, VIEWPORT).is_empty());
    }

    #[test]
    fn test_jump_ignored_before_playing() {
        let mut s = session(0);
        s.jump();
        assert!(!s.pending_jump);
    }

    #[test]
    fn test_round_plays_sounds_and_ends() {
        let mut s = playing_session(0);
        assert_eq!(s.phase(), AppPhase::Playing);
        assert_eq!(s.state().phase, RoundPhase::Idle);

        play_until_over(&mut s);

        assert_eq!(s.state().phase, RoundPhase::Over);
        assert_eq!(s.sound.first(), Some(&SoundCue::Jump));
        assert_eq!(
            s.sound.iter().filter(|c| **c == SoundCue::Death).count(),
            1
        );
        // Score 0 does not beat a best of 0
        assert!(!s.sound.contains(&SoundCue::HighScore));
        assert_eq!(s.high_score().best, 0);
    }

    #[test]
    fn test_new_best_plays_sparkle() {
        let mut s = playing_session(2);
        s.jump();
        s.frame(100.0, VIEWPORT);
        s.state.score = 5;
        play_until_over(&mut s);
        assert_eq!(s.high_score().best, 5);
        assert_eq!(s.sound.last(), Some(&SoundCue::HighScore));
    }

    #[test]
    fn test_worse_score_keeps_best() {
        let mut s = playing_session(50);
        s.jump();
        s.frame(100.0, VIEWPORT);
        s.state.score = 5;
        play_until_over(&mut s);
        assert_eq!(s.high_score().best, 50);
        assert!(!s.sound.contains(&SoundCue::HighScore));
    }

    #[test]
    fn test_restart_resets_round() {
        let mut s = playing_session(0);
        play_until_over(&mut s);
        let round = s.state().round;

        s.jump(); // ignored on the game over screen
        assert!(!s.pending_jump);

        s.restart();
        assert_eq!(s.phase(), AppPhase::Playing);
        assert_eq!(s.state().phase, RoundPhase::Idle);
        assert_eq!(s.state().score, 0);
        assert!(s.state().obstacles.is_empty());
        assert_eq!(s.state().round, round + 1);
    }

    #[test]
    fn test_milestone_is_announced() {
        let mut s = playing_session(0);
        s.jump();
        s.frame(100.0, VIEWPORT);
        s.state.score = 4;
        s.state.obstacles.push(crate::sim::Obstacle {
            id: 999,
            spawned_at_ms: 0.0,
            x: -48.0,
            gap_y: 100.0,
            gap: 220.0,
            passed: false,
        });
        s.frame(116.0, VIEWPORT);
        assert_eq!(s.state().score, 5);
        assert_eq!(s.announcer.len(), 1);
        assert!(crate::sim::VOICE_LINES.contains(&s.announcer[0].as_str()));
    }

    #[test]
    fn test_update_settings_validates() {
        let mut s = playing_session(0);
        let faster = GameSettings {
            pipe_speed: 6.0,
            ..Default::default()
        };
        assert!(s.update_settings(faster).is_ok());
        assert_eq!(s.settings().pipe_speed, 6.0);

        let broken = GameSettings {
            gravity: f32::INFINITY,
            ..Default::default()
        };
        assert!(s.update_settings(broken).is_err());
        assert_eq!(s.settings().gravity, 0.30);
    }

    #[test]
    fn test_reset_high_score() {
        let mut s = session(30);
        s.reset_high_score();
        assert_eq!(s.high_score().best, 0);
    }

    #[test]
    fn test_snapshot_reports_best() {
        let s = playing_session(12);
        let snap = s.snapshot();
        assert_eq!(snap.best_score, 12);
        assert_eq!(snap.score, 0);
    }
}
