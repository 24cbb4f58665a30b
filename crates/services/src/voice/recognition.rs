use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use kids_core::model::Language;

use crate::error::RecognitionError;

//
// ─── TYPES ─────────────────────────────────────────────────────────────────────
//

/// Engine settings for one listening session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    pub lang: String,
    pub continuous: bool,
    pub interim_results: bool,
    pub max_alternatives: u32,
}

impl RecognitionConfig {
    /// One utterance, final results only, a single alternative.
    #[must_use]
    pub fn single_shot(language: Language) -> Self {
        Self {
            lang: language.speech_tag().to_string(),
            continuous: false,
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

/// A finalized recognition result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    /// Engine confidence in `0.0..=1.0`.
    pub confidence: f32,
}

impl Transcript {
    #[must_use]
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            text: text.into(),
            confidence,
        }
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Platform speech recognition.
///
/// `start` must not invoke `events` before it returns; results and errors are
/// delivered later through the handle.
pub trait RecognitionEngine: Send + Sync {
    fn is_supported(&self) -> bool;

    /// # Errors
    ///
    /// Returns an error if the engine refused to start.
    fn start(
        &self,
        config: &RecognitionConfig,
        events: RecognitionEvents,
    ) -> Result<(), RecognitionError>;

    /// Abort the running session, if any.
    fn stop(&self);
}

/// Engine for environments without speech recognition.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedRecognition;

impl RecognitionEngine for UnsupportedRecognition {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(
        &self,
        _config: &RecognitionConfig,
        _events: RecognitionEvents,
    ) -> Result<(), RecognitionError> {
        Err(RecognitionError::Unsupported)
    }

    fn stop(&self) {}
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

type ResultCallback = Box<dyn FnOnce(Transcript) + Send>;
type ErrorCallback = Box<dyn FnOnce(RecognitionError) + Send>;

struct Pending {
    generation: u64,
    on_result: ResultCallback,
    on_error: ErrorCallback,
}

#[derive(Default)]
struct ListenState {
    generation: u64,
    pending: Option<Pending>,
}

fn lock(state: &Mutex<ListenState>) -> MutexGuard<'_, ListenState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Delivery handle for one listening session.
///
/// Once the session is stopped or replaced the handle goes stale and every
/// delivery is dropped.
#[derive(Clone)]
pub struct RecognitionEvents {
    state: Arc<Mutex<ListenState>>,
    generation: u64,
}

impl RecognitionEvents {
    fn take_pending(&self) -> Option<Pending> {
        let mut state = lock(&self.state);
        let is_current = state
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == self.generation);
        if is_current { state.pending.take() } else { None }
    }

    /// Whether this session is still waiting for an outcome.
    #[must_use]
    pub fn is_current(&self) -> bool {
        lock(&self.state)
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == self.generation)
    }

    /// Deliver a final transcript. Returns `false` if the session is stale.
    pub fn result(&self, transcript: Transcript) -> bool {
        match self.take_pending() {
            Some(pending) => {
                debug!(confidence = transcript.confidence, "speech recognized");
                (pending.on_result)(transcript);
                true
            }
            None => false,
        }
    }

    /// Deliver a failure. Returns `false` if the session is stale.
    pub fn error(&self, error: RecognitionError) -> bool {
        match self.take_pending() {
            Some(pending) => {
                warn!(%error, "speech recognition failed");
                (pending.on_error)(error);
                true
            }
            None => false,
        }
    }

    /// The engine stopped without producing an outcome.
    pub fn ended(&self) {
        if self.take_pending().is_some() {
            debug!("speech recognition ended without a result");
        }
    }
}

impl fmt::Debug for RecognitionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognitionEvents")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Single-shot speech capture with cancellable callbacks.
#[derive(Clone)]
pub struct SpeechToText {
    engine: Arc<dyn RecognitionEngine>,
    language: Language,
    state: Arc<Mutex<ListenState>>,
}

impl SpeechToText {
    #[must_use]
    pub fn new(engine: Arc<dyn RecognitionEngine>, language: Language) -> Self {
        Self {
            engine,
            language,
            state: Arc::new(Mutex::new(ListenState::default())),
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.engine.is_supported()
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        lock(&self.state).pending.is_some()
    }

    /// Listen in the default language.
    pub fn start_listening<R, E>(&self, on_result: R, on_error: E)
    where
        R: FnOnce(Transcript) + Send + 'static,
        E: FnOnce(RecognitionError) + Send + 'static,
    {
        self.start_listening_in(self.language, on_result, on_error);
    }

    /// Begin a listening session, replacing any session already running.
    ///
    /// Exactly one of the callbacks runs, unless the session is stopped first.
    /// Unsupported engines and start failures call `on_error` before this
    /// returns.
    pub fn start_listening_in<R, E>(&self, language: Language, on_result: R, on_error: E)
    where
        R: FnOnce(Transcript) + Send + 'static,
        E: FnOnce(RecognitionError) + Send + 'static,
    {
        if !self.engine.is_supported() {
            warn!("speech recognition unsupported");
            on_error(RecognitionError::Unsupported);
            return;
        }

        self.stop_listening();

        let events = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.pending = Some(Pending {
                generation: state.generation,
                on_result: Box::new(on_result),
                on_error: Box::new(on_error),
            });
            RecognitionEvents {
                state: Arc::clone(&self.state),
                generation: state.generation,
            }
        };

        let config = RecognitionConfig::single_shot(language);
        debug!(lang = %config.lang, "listening");
        if let Err(error) = self.engine.start(&config, events.clone()) {
            let error = match error {
                RecognitionError::StartFailed(_) => error,
                other => RecognitionError::StartFailed(other.to_string()),
            };
            events.error(error);
        }
    }

    /// Cancel the running session. Its callbacks will never run.
    pub fn stop_listening(&self) {
        let cancelled = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.pending.take()
        };
        if cancelled.is_some() {
            debug!("listening cancelled");
            self.engine.stop();
        }
    }
}

impl fmt::Debug for SpeechToText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechToText")
            .field("language", &self.language)
            .field("listening", &self.is_listening())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[derive(Default)]
    struct ScriptedEngine {
        fail_start: bool,
        started: Mutex<Vec<(RecognitionConfig, RecognitionEvents)>>,
        stops: Mutex<u32>,
    }

    impl ScriptedEngine {
        fn last_events(&self) -> RecognitionEvents {
            self.started.lock().unwrap().last().unwrap().1.clone()
        }
    }

    impl RecognitionEngine for ScriptedEngine {
        fn is_supported(&self) -> bool {
            true
        }

        fn start(
            &self,
            config: &RecognitionConfig,
            events: RecognitionEvents,
        ) -> Result<(), RecognitionError> {
            if self.fail_start {
                return Err(RecognitionError::Other("busy".to_string()));
            }
            self.started.lock().unwrap().push((config.clone(), events));
            Ok(())
        }

        fn stop(&self) {
            *self.stops.lock().unwrap() += 1;
        }
    }

    #[derive(Debug, PartialEq)]
    enum Outcome {
        Heard(String, f32),
        Failed(RecognitionError),
    }

    fn listen(stt: &SpeechToText) -> mpsc::Receiver<Outcome> {
        let (tx, rx) = mpsc::channel();
        let err_tx = tx.clone();
        stt.start_listening(
            move |t| {
                let _ = tx.send(Outcome::Heard(t.text, t.confidence));
            },
            move |e| {
                let _ = err_tx.send(Outcome::Failed(e));
            },
        );
        rx
    }

    #[test]
    fn unsupported_engine_errors_synchronously() {
        let stt = SpeechToText::new(Arc::new(UnsupportedRecognition), Language::En);
        let rx = listen(&stt);
        assert_eq!(
            rx.try_recv().unwrap(),
            Outcome::Failed(RecognitionError::Unsupported)
        );
        assert!(!stt.is_listening());
    }

    #[test]
    fn start_failure_errors_synchronously() {
        let engine = Arc::new(ScriptedEngine {
            fail_start: true,
            ..ScriptedEngine::default()
        });
        let stt = SpeechToText::new(engine, Language::En);
        let rx = listen(&stt);
        assert!(matches!(
            rx.try_recv().unwrap(),
            Outcome::Failed(RecognitionError::StartFailed(_))
        ));
        assert!(!stt.is_listening());
    }

    #[test]
    fn result_is_delivered_once_with_single_shot_config() {
        let engine = Arc::new(ScriptedEngine::default());
        let stt = SpeechToText::new(engine.clone(), Language::Fr);
        let rx = listen(&stt);
        assert!(stt.is_listening());

        let (config, events) = engine.started.lock().unwrap()[0].clone();
        assert_eq!(config, RecognitionConfig::single_shot(Language::Fr));
        assert!(!config.continuous);
        assert_eq!(config.max_alternatives, 1);

        assert!(events.result(Transcript::new("un cercle", 1.7)));
        assert!(!events.error(RecognitionError::NoSpeech));
        assert_eq!(
            rx.try_recv().unwrap(),
            Outcome::Heard("un cercle".to_string(), 1.0)
        );
        assert!(rx.try_recv().is_err());
        assert!(!stt.is_listening());
    }

    #[test]
    fn stopped_session_never_calls_back() {
        let engine = Arc::new(ScriptedEngine::default());
        let stt = SpeechToText::new(engine.clone(), Language::En);
        let rx = listen(&stt);
        let events = engine.last_events();

        stt.stop_listening();
        assert!(!events.is_current());
        assert!(!events.result(Transcript::new("circle", 0.9)));
        assert!(rx.try_recv().is_err());
        assert_eq!(*engine.stops.lock().unwrap(), 1);
    }

    #[test]
    fn new_session_replaces_previous() {
        let engine = Arc::new(ScriptedEngine::default());
        let stt = SpeechToText::new(engine.clone(), Language::En);
        let first = listen(&stt);
        let first_events = engine.last_events();
        let second = listen(&stt);
        let second_events = engine.last_events();

        assert!(!first_events.result(Transcript::new("moo", 0.5)));
        assert!(second_events.error(RecognitionError::from_code("no-speech")));
        assert!(first.try_recv().is_err());
        assert_eq!(
            second.try_recv().unwrap(),
            Outcome::Failed(RecognitionError::NoSpeech)
        );
    }

    #[test]
    fn error_codes_are_classified() {
        assert_eq!(
            RecognitionError::from_code("service-not-allowed"),
            RecognitionError::NotAllowed
        );
        assert_eq!(
            RecognitionError::from_code("audio-capture"),
            RecognitionError::AudioCapture
        );
        assert_eq!(
            RecognitionError::from_code("bad-grammar"),
            RecognitionError::Other("bad-grammar".to_string())
        );
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Transcript::new("x", -0.5).confidence, 0.0);
        assert_eq!(Transcript::new("x", f32::NAN).confidence, 0.0);
        assert_eq!(Transcript::new("x", 0.25).confidence, 0.25);
    }
}
