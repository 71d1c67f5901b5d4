//! Sound and speech capabilities
//!
//! The simulation only names cues; whoever owns the audio device decides
//! how to play them. Every call is fire-and-forget and failures are logged,
//! never returned to the game loop.
//!
//! In the browser, jump/death use the player's decoded recordings while the
//! score pop and high-score sparkle are synthesized with oscillators.

use std::fmt;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Character jumped
    Jump,
    /// Obstacle passed
    ScorePop,
    /// Collision
    Death,
    /// Finished round beat the best score
    HighScore,
}

/// Something that can play sound cues
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Something that can speak or display a milestone phrase
pub trait Announcer {
    fn announce(&mut self, phrase: &str);
}

/// Logs cues instead of playing them (native builds, headless runs)
#[derive(Debug, Default)]
pub struct LogSound;

impl SoundSink for LogSound {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("Sound: {:?}", cue);
    }
}

/// Logs milestone phrases instead of speaking them
#[derive(Debug, Default)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&mut self, phrase: &str) {
        log::info!("Milestone: {}", phrase);
    }
}

/// Failure while loading the player's sound files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// No audio output available
    NoAudio,
    /// Request never completed
    Fetch { url: String },
    /// Server answered with a non-success status
    Status { url: String, status: u16 },
    /// Bytes could not be decoded as audio
    Decode { url: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NoAudio => write!(f, "audio is not available"),
            AssetError::Fetch { url } => write!(f, "failed to fetch {}", url),
            AssetError::Status { url, status } => {
                write!(f, "failed to fetch {} (status {})", url, status)
            }
            AssetError::Decode { url } => {
                write!(f, "could not decode {} (try MP3, WAV or OGG)", url)
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(target_arch = "wasm32")]
pub use browser::{SoundBank, WebAudio, WebSpeech, load_sound_bank};

#[cfg(target_arch = "wasm32")]
mod browser {
    use futures::future::try_join;
    use js_sys::{ArrayBuffer, Promise};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AudioBuffer, AudioContext, GainNode, OscillatorNode, OscillatorType, Response,
        SpeechSynthesisUtterance,
    };

    use super::{Announcer, AssetError, SoundCue, SoundSink};

    /// Decoded player recordings
    #[derive(Clone)]
    pub struct SoundBank {
        pub jump: AudioBuffer,
        pub death: AudioBuffer,
    }

    /// Fetch and decode both recordings concurrently. Fails on the first error.
    pub async fn load_sound_bank(
        ctx: &AudioContext,
        jump_url: &str,
        death_url: &str,
    ) -> Result<SoundBank, AssetError> {
        let window = web_sys::window().ok_or(AssetError::NoAudio)?;
        let jump_req = window.fetch_with_str(jump_url);
        let death_req = window.fetch_with_str(death_url);

        let (jump, death) = try_join(
            fetch_and_decode(ctx, jump_req, jump_url),
            fetch_and_decode(ctx, death_req, death_url),
        )
        .await?;
        log::info!("Decoded jump and death sounds");
        Ok(SoundBank { jump, death })
    }

    async fn fetch_and_decode(
        ctx: &AudioContext,
        request: Promise,
        url: &str,
    ) -> Result<AudioBuffer, AssetError> {
        let fetch_err = || AssetError::Fetch {
            url: url.to_string(),
        };
        let decode_err = || AssetError::Decode {
            url: url.to_string(),
        };

        let response: Response = JsFuture::from(request)
            .await
            .map_err(|_| fetch_err())?
            .dyn_into()
            .map_err(|_| fetch_err())?;
        if !response.ok() {
            return Err(AssetError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let bytes: ArrayBuffer = JsFuture::from(response.array_buffer().map_err(|_| fetch_err())?)
            .await
            .map_err(|_| fetch_err())?
            .dyn_into()
            .map_err(|_| fetch_err())?;

        JsFuture::from(ctx.decode_audio_data(&bytes).map_err(|_| decode_err())?)
            .await
            .map_err(|_| decode_err())?
            .dyn_into::<AudioBuffer>()
            .map_err(|_| decode_err())
    }

    /// Audio manager for the game
    pub struct WebAudio {
        ctx: AudioContext,
        bank: SoundBank,
        master_volume: f32,
    }

    impl WebAudio {
        pub fn new(ctx: AudioContext, bank: SoundBank) -> Self {
            Self {
                ctx,
                bank,
                master_volume: 0.8,
            }
        }

        /// Gain node wired to the output
        fn output(&self, vol: f32) -> Option<GainNode> {
            let gain = self.ctx.create_gain().ok()?;
            gain.gain().set_value(vol);
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;
            Some(gain)
        }

        fn play_buffer(&self, buffer: &AudioBuffer, vol: f32) -> Option<()> {
            let gain = self.output(vol)?;
            let source = self.ctx.create_buffer_source().ok()?;
            source.set_buffer(Some(buffer));
            source.connect_with_audio_node(&gain).ok()?;
            source.start().ok()
        }

        /// Create an oscillator with gain envelope
        fn create_osc(&self, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Score pop - short falling blip
        fn play_pop(&self, vol: f32) -> Option<()> {
            let (osc, gain) = self.create_osc(700.0, OscillatorType::Sine)?;
            let t = self.ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok()?;
            osc.frequency()
                .exponential_ramp_to_value_at_time(350.0, t + 0.08)
                .ok()?;

            osc.start().ok()?;
            osc.stop_with_when(t + 0.1).ok()
        }

        /// New best - high shimmering arpeggio
        fn play_sparkle(&self, vol: f32) -> Option<()> {
            for (i, freq) in [1600.0, 2000.0, 2400.0, 3200.0].iter().enumerate() {
                let (osc, gain) = self.create_osc(*freq, OscillatorType::Triangle)?;
                let t = self.ctx.current_time() + i as f64 * 0.06;
                gain.gain().set_value_at_time(vol * 0.3, t).ok()?;
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok()?;
                osc.start_with_when(t).ok()?;
                osc.stop_with_when(t + 0.35).ok()?;
            }
            Some(())
        }
    }

    impl SoundSink for WebAudio {
        fn play(&mut self, cue: SoundCue) {
            let vol = self.master_volume;

            // Resume context if suspended (browsers require user gesture)
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }

            let played = match cue {
                SoundCue::Jump => self.play_buffer(&self.bank.jump, vol),
                SoundCue::Death => self.play_buffer(&self.bank.death, vol),
                SoundCue::ScorePop => self.play_pop(vol),
                SoundCue::HighScore => self.play_sparkle(vol),
            };
            if played.is_none() {
                log::warn!("Failed to play {:?}", cue);
            }
        }
    }

    /// Speaks milestone phrases with the browser's speech synthesis
    #[derive(Default)]
    pub struct WebSpeech;

    impl Announcer for WebSpeech {
        fn announce(&mut self, phrase: &str) {
            let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
            let utterance = SpeechSynthesisUtterance::new_with_text(phrase).ok();
            match (synth, utterance) {
                (Some(synth), Some(utterance)) => synth.speak(&utterance),
                _ => log::warn!("Speech synthesis unavailable, skipping \"{}\"", phrase),
            }
        }
    }
}
