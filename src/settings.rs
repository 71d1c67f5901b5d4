//! Game settings and difficulty presets
//!
//! Persisted separately from the high score in LocalStorage. Settings are
//! validated when a round is started, never inside the tick loop.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PIPE_GAP, MILESTONE_INTERVAL, MIN_PIPE_GAP};

/// Accepted gravity (units/tick²)
pub const GRAVITY_RANGE: RangeInclusive<f32> = 0.1..=1.0;
/// Accepted jump impulse (negative = upward)
pub const JUMP_FORCE_RANGE: RangeInclusive<f32> = -12.0..=-3.0;
/// Accepted base scroll speed (units/tick)
pub const PIPE_SPEED_RANGE: RangeInclusive<f32> = 1.0..=10.0;
/// Accepted base gap height
pub const PIPE_GAP_RANGE: RangeInclusive<f32> = MIN_PIPE_GAP..=MAX_PIPE_GAP;
/// Accepted points between milestones
pub const MILESTONE_INTERVAL_RANGE: RangeInclusive<u32> = 1..=100;

/// Difficulty presets (choose the starting gap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Base gap height for this preset
    pub fn pipe_gap(&self) -> f32 {
        match self {
            Difficulty::Easy => 250.0,
            Difficulty::Medium => 220.0,
            Difficulty::Hard => 200.0,
        }
    }
}

/// Tunable game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity set on jump (negative = upward)
    pub jump_force: f32,
    /// Base horizontal scroll speed per tick
    pub pipe_speed: f32,
    /// Base gap height
    pub pipe_gap: f32,
    /// Decorative background (cosmetic only)
    pub meme_background: bool,
    /// Celebrate score milestones with a spoken phrase
    pub score_voice_lines: bool,
    /// Points between milestones
    pub milestone_interval: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            gravity: 0.30,
            jump_force: -6.0,
            pipe_speed: 3.0,
            pipe_gap: Difficulty::Medium.pipe_gap(),
            meme_background: true,
            score_voice_lines: true,
            milestone_interval: MILESTONE_INTERVAL,
        }
    }
}

/// A setting that cannot be used
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Value is NaN or infinite
    NotFinite { field: &'static str },
    /// Value is outside its accepted range
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NotFinite { field } => write!(f, "{} must be a finite number", field),
            SettingsError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{} = {} is outside {}..={}", field, value, min, max),
        }
    }
}

impl std::error::Error for SettingsError {}

fn check(field: &'static str, value: f32, range: RangeInclusive<f32>) -> Result<(), SettingsError> {
    if !value.is_finite() {
        return Err(SettingsError::NotFinite { field });
    }
    if !range.contains(&value) {
        return Err(SettingsError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

impl GameSettings {
    /// Default settings with a difficulty preset applied
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::default().with_difficulty(difficulty)
    }

    /// Apply a difficulty preset (updates the base gap)
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.pipe_gap = difficulty.pipe_gap();
        self
    }

    /// Check every numeric setting against its accepted range
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("gravity", self.gravity, GRAVITY_RANGE)?;
        check("jumpForce", self.jump_force, JUMP_FORCE_RANGE)?;
        check("pipeSpeed", self.pipe_speed, PIPE_SPEED_RANGE)?;
        check("pipeGap", self.pipe_gap, PIPE_GAP_RANGE)?;
        if !MILESTONE_INTERVAL_RANGE.contains(&self.milestone_interval) {
            return Err(SettingsError::OutOfRange {
                field: "milestoneInterval",
                value: self.milestone_interval as f32,
                min: *MILESTONE_INTERVAL_RANGE.start() as f32,
                max: *MILESTONE_INTERVAL_RANGE.end() as f32,
            });
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_meme_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<GameSettings>(&json) {
                    Ok(settings) if settings.validate().is_ok() => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Ok(_) => log::warn!("Stored settings out of range, ignoring"),
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GameSettings::default().validate(), Ok(()));
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(GameSettings::from_difficulty(d).validate(), Ok(()));
        }
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(GameSettings::from_difficulty(Difficulty::Easy).pipe_gap, 250.0);
        assert_eq!(GameSettings::from_difficulty(Difficulty::Hard).pipe_gap, 200.0);
        assert_eq!(Difficulty::from_str("MED"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
    }

    #[test]
    fn test_rejects_non_positive_gap() {
        let settings = GameSettings {
            pipe_gap: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OutOfRange { field: "pipeGap", .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let settings = GameSettings {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotFinite { field: "gravity" })
        );
    }

    #[test]
    fn test_rejects_upward_gravity_and_downward_jump() {
        let up = GameSettings {
            gravity: -0.3,
            ..Default::default()
        };
        assert!(up.validate().is_err());
        let down = GameSettings {
            jump_force: 6.0,
            ..Default::default()
        };
        assert!(down.validate().is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = GameSettings {
            pipe_speed: 50.0,
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "pipeSpeed = 50 is outside 1..=10");
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let json = r#"{"gravity":0.5,"jumpForce":-8.0,"pipeSpeed":4.5,"pipeGap":200,"memeBackground":false,"scoreVoiceLines":true}"#;
        let settings: GameSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.jump_force, -8.0);
        assert_eq!(settings.pipe_speed, 4.5);
        assert!(!settings.meme_background);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{"gravity":0.5}"#).unwrap();
        assert_eq!(settings.gravity, 0.5);
        assert_eq!(settings.pipe_gap, 220.0);
        assert_eq!(settings.milestone_interval, 5);
    }

    #[test]
    fn test_milestone_interval_must_be_positive() {
        let zero = GameSettings {
            milestone_interval: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(SettingsError::OutOfRange {
                field: "milestoneInterval",
                ..
            })
        ));
        let three = GameSettings {
            milestone_interval: 3,
            ..Default::default()
        };
        assert_eq!(three.validate(), Ok(()));
    }
}
