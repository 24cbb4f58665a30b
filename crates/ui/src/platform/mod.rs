use std::sync::Arc;

use services::SpeechEngines;

mod web_speech;

pub use web_speech::{WebSpeechRecognition, WebSpeechSynthesis};

/// Speech engines backed by the webview's Web Speech API.
#[must_use]
pub fn web_speech_engines() -> SpeechEngines {
    SpeechEngines {
        output: Arc::new(WebSpeechSynthesis::new()),
        recognition: Arc::new(WebSpeechRecognition::new()),
    }
}
