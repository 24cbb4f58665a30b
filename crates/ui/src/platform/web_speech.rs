use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dioxus::document::eval;
use dioxus::prelude::spawn;
use serde::{Deserialize, Serialize};
use services::voice::{
    RecognitionConfig, RecognitionEngine, RecognitionError, RecognitionEvents, SpeechOutput,
    Transcript, Utterance, VoiceError, VoiceInfo,
};
use tracing::{debug, warn};

const PAYLOAD: &str = "__PAYLOAD__";

//
// ─── BRIDGE MESSAGES ───────────────────────────────────────────────────────────
//

/// Messages posted back by the speech scripts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum BridgeMessage {
    Result { transcript: String, confidence: f32 },
    Error { code: String },
    StartFailed { message: String },
    End,
}

fn with_payload<T: Serialize>(template: &str, payload: &T) -> Result<String, serde_json::Error> {
    Ok(template.replace(PAYLOAD, &serde_json::to_string(payload)?))
}

//
// ─── SCRIPTS ───────────────────────────────────────────────────────────────────
//

const VOICES_SCRIPT: &str = r#"
    const synth = window.speechSynthesis;
    if (!synth) { return null; }
    let voices = synth.getVoices();
    if (!voices.length) {
        await new Promise((resolve) => {
            synth.addEventListener("voiceschanged", resolve, { once: true });
            setTimeout(resolve, 1000);
        });
        voices = synth.getVoices();
    }
    return voices.map((voice) => ({ name: voice.name, lang: voice.lang }));
"#;

const SPEAK_SCRIPT_TEMPLATE: &str = r#"
    const request = __PAYLOAD__;
    const synth = window.speechSynthesis;
    if (!synth) { return { kind: "error", code: "unsupported" }; }
    return await new Promise((resolve) => {
        const utterance = new SpeechSynthesisUtterance(request.text);
        utterance.lang = request.lang;
        utterance.rate = request.rate;
        utterance.pitch = request.pitch;
        utterance.volume = request.volume;
        if (request.voice) {
            const match = synth.getVoices().find((voice) => voice.name === request.voice);
            if (match) { utterance.voice = match; }
        }
        utterance.onend = () => resolve({ kind: "end" });
        utterance.onerror = (event) => resolve({ kind: "error", code: event.error || "unknown" });
        synth.speak(utterance);
    });
"#;

const LISTEN_SCRIPT_TEMPLATE: &str = r#"
    const config = __PAYLOAD__;
    const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
    if (!Recognition) {
        dioxus.send({ kind: "error", code: "unsupported" });
        return;
    }
    if (window.__kidsRecognition) {
        try { window.__kidsRecognition.abort(); } catch (_) {}
    }
    const recognition = new Recognition();
    recognition.lang = config.lang;
    recognition.continuous = config.continuous;
    recognition.interimResults = config.interim_results;
    recognition.maxAlternatives = config.max_alternatives;
    window.__kidsRecognition = recognition;

    let settled = false;
    recognition.onresult = (event) => {
        const best = event.results[0][0];
        settled = true;
        dioxus.send({ kind: "result", transcript: best.transcript, confidence: best.confidence });
    };
    recognition.onerror = (event) => {
        settled = true;
        dioxus.send({ kind: "error", code: event.error || "unknown" });
    };
    recognition.onend = () => {
        if (window.__kidsRecognition === recognition) { window.__kidsRecognition = null; }
        if (!settled) { dioxus.send({ kind: "end" }); }
    };
    try {
        recognition.start();
    } catch (err) {
        settled = true;
        dioxus.send({ kind: "start-failed", message: String(err) });
    }
"#;

const STOP_LISTENING_SCRIPT: &str = r#"
    if (window.__kidsRecognition) {
        try { window.__kidsRecognition.abort(); } catch (_) {}
        window.__kidsRecognition = null;
    }
"#;

const CANCEL_SPEECH_SCRIPT: &str = "window.speechSynthesis && window.speechSynthesis.cancel();";
const PAUSE_SPEECH_SCRIPT: &str = "window.speechSynthesis && window.speechSynthesis.pause();";
const RESUME_SPEECH_SCRIPT: &str = "window.speechSynthesis && window.speechSynthesis.resume();";

//
// ─── SYNTHESIS ─────────────────────────────────────────────────────────────────
//

/// `speechSynthesis` in the desktop webview.
///
/// Assumed available until a script reports otherwise.
pub struct WebSpeechSynthesis {
    supported: AtomicBool,
}

impl WebSpeechSynthesis {
    #[must_use]
    pub fn new() -> Self {
        Self {
            supported: AtomicBool::new(true),
        }
    }

    fn mark_unsupported(&self) {
        if self.supported.swap(false, Ordering::AcqRel) {
            warn!("webview has no speech synthesis");
        }
    }
}

impl Default for WebSpeechSynthesis {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl SpeechOutput for WebSpeechSynthesis {
    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::Acquire)
    }

    async fn voices(&self) -> Vec<VoiceInfo> {
        match eval(VOICES_SCRIPT).join::<Option<Vec<VoiceInfo>>>().await {
            Ok(Some(voices)) => voices,
            Ok(None) => {
                self.mark_unsupported();
                Vec::new()
            }
            Err(err) => {
                debug!(error = %err, "voice list unavailable");
                Vec::new()
            }
        }
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), VoiceError> {
        let script = with_payload(SPEAK_SCRIPT_TEMPLATE, &utterance)
            .map_err(|err| VoiceError::Engine(err.to_string()))?;
        let message = eval(&script)
            .join::<BridgeMessage>()
            .await
            .map_err(|err| VoiceError::Engine(err.to_string()))?;

        match message {
            BridgeMessage::End => Ok(()),
            BridgeMessage::Error { code } => match code.as_str() {
                "unsupported" => {
                    self.mark_unsupported();
                    Err(VoiceError::Unsupported)
                }
                "interrupted" | "canceled" => Err(VoiceError::Interrupted),
                _ => Err(VoiceError::Engine(code)),
            },
            other => Err(VoiceError::Engine(format!("unexpected reply: {other:?}"))),
        }
    }

    fn cancel(&self) {
        let _ = eval(CANCEL_SPEECH_SCRIPT);
    }

    fn pause(&self) {
        let _ = eval(PAUSE_SPEECH_SCRIPT);
    }

    fn resume(&self) {
        let _ = eval(RESUME_SPEECH_SCRIPT);
    }
}

//
// ─── RECOGNITION ───────────────────────────────────────────────────────────────
//

/// `SpeechRecognition` in the desktop webview.
///
/// Results come back over the eval channel on a task owned by the calling
/// component, so unmounting the view drops a pending session. Once the webview
/// reports that recognition is missing, later sessions fail synchronously.
pub struct WebSpeechRecognition {
    supported: Arc<AtomicBool>,
}

impl WebSpeechRecognition {
    #[must_use]
    pub fn new() -> Self {
        Self {
            supported: Arc::new(AtomicBool::new(true)),
        }
    }
}

/// Classifies a recognition error code, remembering a missing engine.
fn recognition_error(supported: &AtomicBool, code: &str) -> RecognitionError {
    let error = RecognitionError::from_code(code);
    if error == RecognitionError::Unsupported && supported.swap(false, Ordering::AcqRel) {
        warn!("webview has no speech recognition");
    }
    error
}

impl Default for WebSpeechRecognition {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionEngine for WebSpeechRecognition {
    fn is_supported(&self) -> bool {
        self.supported.load(Ordering::Acquire)
    }

    fn start(
        &self,
        config: &RecognitionConfig,
        events: RecognitionEvents,
    ) -> Result<(), RecognitionError> {
        let script = with_payload(LISTEN_SCRIPT_TEMPLATE, config)
            .map_err(|err| RecognitionError::StartFailed(err.to_string()))?;

        let supported = Arc::clone(&self.supported);
        spawn(async move {
            let mut bridge = eval(&script);
            match bridge.recv::<BridgeMessage>().await {
                Ok(BridgeMessage::Result {
                    transcript,
                    confidence,
                }) => {
                    events.result(Transcript::new(transcript, confidence));
                }
                Ok(BridgeMessage::Error { code }) => {
                    events.error(recognition_error(&supported, &code));
                }
                Ok(BridgeMessage::StartFailed { message }) => {
                    events.error(RecognitionError::StartFailed(message));
                }
                Ok(BridgeMessage::End) => events.ended(),
                Err(err) => {
                    events.error(RecognitionError::Other(err.to_string()));
                }
            }
        });
        Ok(())
    }

    fn stop(&self) {
        let _ = eval(STOP_LISTENING_SCRIPT);
    }
}
