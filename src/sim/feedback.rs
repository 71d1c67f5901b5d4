//! Transient visual feedback
//!
//! Each flag stores the wall-clock time at which it expires. Clearing is a
//! pure function of the current tick time, so a reset round never inherits a
//! pending clear from the previous one.

use crate::consts::*;

/// A one-shot flag that switches itself off at `expires_at_ms`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimedFlag {
    expires_at_ms: Option<f64>,
}

impl TimedFlag {
    /// Raise the flag for `duration_ms`. Re-triggering extends it.
    pub fn trigger(&mut self, now_ms: f64, duration_ms: f64) {
        self.expires_at_ms = Some(now_ms + duration_ms);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.expires_at_ms.is_some()
    }

    /// Clear the flag if `now_ms` has reached its expiry
    pub fn expire(&mut self, now_ms: f64) {
        if self.expires_at_ms.is_some_and(|at| now_ms >= at) {
            self.expires_at_ms = None;
        }
    }
}

/// All flags the renderer reads
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisualFlags {
    /// Squash the character right after a jump
    pub jump_squash: TimedFlag,
    /// Bounce the score display
    pub score_pop: TimedFlag,
    /// Full-screen red flash on death
    pub flash: TimedFlag,
    /// Screen shake on death
    pub shake: TimedFlag,
}

impl VisualFlags {
    pub fn expire(&mut self, now_ms: f64) {
        self.jump_squash.expire(now_ms);
        self.score_pop.expire(now_ms);
        self.flash.expire(now_ms);
        self.shake.expire(now_ms);
    }

    pub fn on_jump(&mut self, now_ms: f64) {
        self.jump_squash.trigger(now_ms, JUMP_SQUASH_MS);
    }

    pub fn on_score(&mut self, now_ms: f64) {
        self.score_pop.trigger(now_ms, SCORE_POP_MS);
    }

    pub fn on_death(&mut self, now_ms: f64) {
        self.flash.trigger(now_ms, FLASH_MS);
        self.shake.trigger(now_ms, SHAKE_MS);
    }
}

/// Milestone phrase shown on screen
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneText {
    pub phrase: String,
    pub expires_at_ms: f64,
}

impl MilestoneText {
    pub fn new(phrase: &str, now_ms: f64) -> Self {
        Self {
            phrase: phrase.to_string(),
            expires_at_ms: now_ms + MILESTONE_TEXT_MS,
        }
    }

    #[inline]
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_expires_at_deadline() {
        let mut flag = TimedFlag::default();
        assert!(!flag.is_active());
        flag.trigger(1000.0, 100.0);
        flag.expire(1099.9);
        assert!(flag.is_active());
        flag.expire(1100.0);
        assert!(!flag.is_active());
    }

    #[test]
    fn test_retrigger_extends() {
        let mut flag = TimedFlag::default();
        flag.trigger(0.0, 100.0);
        flag.trigger(80.0, 100.0);
        flag.expire(150.0);
        assert!(flag.is_active());
    }

    #[test]
    fn test_death_flash_clears_before_shake() {
        let mut flags = VisualFlags::default();
        flags.on_death(500.0);
        flags.expire(500.0 + FLASH_MS);
        assert!(!flags.flash.is_active());
        assert!(flags.shake.is_active());
        flags.expire(500.0 + SHAKE_MS);
        assert!(!flags.shake.is_active());
    }

    #[test]
    fn test_milestone_text_expiry() {
        let text = MilestoneText::new("EZ clap!", 1000.0);
        assert!(!text.is_expired(1000.0 + MILESTONE_TEXT_MS - 1.0));
        assert!(text.is_expired(1000.0 + MILESTONE_TEXT_MS));
    }
}
