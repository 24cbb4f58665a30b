use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use kids_core::model::Language;

use crate::error::VoiceError;

pub const DEFAULT_RATE: f32 = 0.8;
pub const DEFAULT_PITCH: f32 = 1.2;
pub const DEFAULT_VOLUME: f32 = 1.0;

const CHILD_VOICE_HINTS: [&str; 3] = ["child", "kid", "young"];

//
// ─── TYPES ─────────────────────────────────────────────────────────────────────
//

/// A voice offered by the speech engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
}

/// Optional overrides for a single utterance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeakOptions {
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub volume: Option<f32>,
    pub language: Option<Language>,
}

impl SpeakOptions {
    #[must_use]
    pub fn in_language(language: Language) -> Self {
        Self {
            language: Some(language),
            ..Self::default()
        }
    }
}

/// Fully resolved request handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Platform speech synthesis.
#[async_trait(?Send)]
pub trait SpeechOutput: Send + Sync {
    fn is_supported(&self) -> bool;

    async fn voices(&self) -> Vec<VoiceInfo>;

    /// Speak `utterance`, resolving once it has finished or was cancelled.
    async fn speak(&self, utterance: Utterance) -> Result<(), VoiceError>;

    fn cancel(&self);
    fn pause(&self);
    fn resume(&self);
}

/// Engine for environments without speech output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpeechOutput;

#[async_trait(?Send)]
impl SpeechOutput for SilentSpeechOutput {
    fn is_supported(&self) -> bool {
        false
    }

    async fn voices(&self) -> Vec<VoiceInfo> {
        Vec::new()
    }

    async fn speak(&self, _utterance: Utterance) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }

    fn cancel(&self) {}
    fn pause(&self) {}
    fn resume(&self) {}
}

/// Prefer a child-sounding voice in `lang_prefix`, then any voice in that
/// language, then whatever comes first.
#[must_use]
pub fn select_voice<'a>(voices: &'a [VoiceInfo], lang_prefix: &str) -> Option<&'a VoiceInfo> {
    let in_language = |voice: &&VoiceInfo| voice.lang.starts_with(lang_prefix);
    let sounds_young = |voice: &&VoiceInfo| {
        let name = voice.name.to_lowercase();
        CHILD_VOICE_HINTS.iter().any(|hint| name.contains(hint))
    };

    voices
        .iter()
        .filter(in_language)
        .find(sounds_young)
        .or_else(|| voices.iter().find(in_language))
        .or_else(|| voices.first())
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Reads text aloud with child-friendly defaults.
#[derive(Clone)]
pub struct TextToSpeech {
    engine: Arc<dyn SpeechOutput>,
    language: Language,
}

impl TextToSpeech {
    #[must_use]
    pub fn new(engine: Arc<dyn SpeechOutput>, language: Language) -> Self {
        Self { engine, language }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.engine.is_supported()
    }

    /// Resolve `text` and `options` against the available voices.
    ///
    /// # Errors
    ///
    /// Returns `VoiceError::EmptyText` for blank text.
    pub fn prepare(
        &self,
        text: &str,
        options: SpeakOptions,
        voices: &[VoiceInfo],
    ) -> Result<Utterance, VoiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VoiceError::EmptyText);
        }
        let language = options.language.unwrap_or(self.language);

        Ok(Utterance {
            text: text.to_string(),
            lang: language.speech_tag().to_string(),
            voice: select_voice(voices, language.code()).map(|voice| voice.name.clone()),
            rate: options.rate.unwrap_or(DEFAULT_RATE).clamp(0.1, 10.0),
            pitch: options.pitch.unwrap_or(DEFAULT_PITCH).clamp(0.0, 2.0),
            volume: options.volume.unwrap_or(DEFAULT_VOLUME).clamp(0.0, 1.0),
        })
    }

    /// Speak `text`, cancelling anything already being spoken.
    ///
    /// # Errors
    ///
    /// Returns `VoiceError::Unsupported` without a speech engine,
    /// `VoiceError::EmptyText` for blank text, or the engine's failure.
    pub async fn speak(&self, text: &str, options: SpeakOptions) -> Result<(), VoiceError> {
        if !self.engine.is_supported() {
            warn!("speech synthesis unsupported");
            return Err(VoiceError::Unsupported);
        }
        self.engine.cancel();

        let voices = self.engine.voices().await;
        let utterance = self.prepare(text, options, &voices)?;
        debug!(
            lang = %utterance.lang,
            voice = utterance.voice.as_deref().unwrap_or("default"),
            chars = utterance.text.len(),
            "speaking"
        );
        self.engine.speak(utterance).await
    }

    pub fn stop(&self) {
        self.engine.cancel();
    }

    pub fn pause(&self) {
        self.engine.pause();
    }

    pub fn resume(&self) {
        self.engine.resume();
    }
}

impl fmt::Debug for TextToSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextToSpeech")
            .field("language", &self.language)
            .field("supported", &self.engine.is_supported())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
