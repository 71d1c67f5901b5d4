//! Best score tracking
//!
//! A single integer persisted to LocalStorage. The simulation never touches
//! it; the session submits each finished round's score.

/// Persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappyMemeHighScore";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Record a finished round. Returns true if it set a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.best = 0;
    }

    /// Parse the stored text form; anything unreadable counts as zero
    pub fn parse(text: &str) -> Self {
        Self::new(text.trim().parse().unwrap_or(0))
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(text)) = storage.get_item(Self::STORAGE_KEY) {
                let score = Self::parse(&text);
                log::info!("Loaded high score {}", score.best);
                return score;
            }
        }

        log::info!("No high score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("High score saved ({})", self.best);
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
