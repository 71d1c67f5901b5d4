//! Browser bindings
//!
//! The host page owns the canvas, the upload form and `requestAnimationFrame`.
//! It drives the game through [`WebGame`]: start with settings and sound URLs,
//! call `frame` once per display frame and draw the returned JSON snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{AudioContext, Event, KeyboardEvent};

use crate::audio::{AssetError, SoundCue, SoundSink, WebAudio, WebSpeech, load_sound_bank};
use crate::highscores::HighScore;
use crate::session::Session;
use crate::settings::GameSettings;
use crate::sim::Viewport;

impl From<AssetError> for JsValue {
    fn from(e: AssetError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Sound output before and after the recordings are decoded
enum WebSound {
    Silent,
    Ready(WebAudio),
}

impl SoundSink for WebSound {
    fn play(&mut self, cue: SoundCue) {
        match self {
            WebSound::Silent => log::debug!("No audio loaded, dropping {:?}", cue),
            WebSound::Ready(audio) => audio.play(cue),
        }
    }
}

type WebSession = Session<WebSound, WebSpeech>;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Flappy Meme starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Rc<RefCell<WebSession>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            GameSettings::load(),
            HighScore::load(),
            WebSound::Silent,
            WebSpeech,
            seed,
        );
        WebGame {
            session: Rc::new(RefCell::new(session)),
        }
    }

    /// Validate settings, then fetch and decode the two recordings.
    ///
    /// Resolves once the round is on screen; rejects (and returns to the
    /// start screen) if any asset fails.
    pub fn start(
        &self,
        settings_json: &str,
        jump_url: String,
        death_url: String,
    ) -> Result<js_sys::Promise, JsValue> {
        let settings: GameSettings = serde_json::from_str(settings_json).map_err(js_error)?;
        self.session
            .borrow_mut()
            .begin_loading(settings)
            .map_err(js_error)?;

        let session = self.session.clone();
        Ok(future_to_promise(async move {
            let loaded = match AudioContext::new() {
                Ok(ctx) => load_sound_bank(&ctx, &jump_url, &death_url)
                    .await
                    .map(|bank| WebAudio::new(ctx, bank)),
                Err(_) => Err(AssetError::NoAudio),
            };

            let mut session = session.borrow_mut();
            match loaded {
                Ok(audio) => {
                    session.set_sound(WebSound::Ready(audio));
                    session.assets_ready();
                    Ok(JsValue::UNDEFINED)
                }
                Err(e) => {
                    session.assets_failed(&e);
                    Err(e.into())
                }
            }
        }))
    }

    /// Start over after game over
    pub fn restart(&self) {
        self.session.borrow_mut().restart();
    }

    pub fn jump(&self) {
        self.session.borrow_mut().jump();
    }

    /// Advance one frame and return the render snapshot as JSON
    pub fn frame(&self, now_ms: f64, width: f32, height: f32) -> String {
        let mut session = self.session.borrow_mut();
        session.frame(now_ms, Viewport::new(width, height));
        match session.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Snapshot serialization failed: {}", e);
                String::from("{}")
            }
        }
    }

    /// Current screen: "waiting", "loading", "playing" or "gameOver"
    pub fn phase(&self) -> String {
        serde_json::to_value(self.session.borrow().phase())
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> String {
        serde_json::to_string(self.session.borrow().settings()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = updateSettings)]
    pub fn update_settings(&self, settings_json: &str) -> Result<(), JsValue> {
        let settings: GameSettings = serde_json::from_str(settings_json).map_err(js_error)?;
        self.session
            .borrow_mut()
            .update_settings(settings)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> u32 {
        self.session.borrow().high_score().best
    }

    #[wasm_bindgen(js_name = resetHighScore)]
    pub fn reset_high_score(&self) {
        self.session.borrow_mut().reset_high_score();
    }

    /// Jump on Space, mouse down and touch start
    #[wasm_bindgen(js_name = attachInput)]
    pub fn attach_input(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let session = self.session.clone();
            let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                if e.code() == "Space" {
                    e.prevent_default();
                    session.borrow_mut().jump();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        for kind in ["mousedown", "touchstart"] {
            let session = self.session.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
                e.prevent_default();
                session.borrow_mut().jump();
            });
            window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
