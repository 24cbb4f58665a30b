mod recognition;
mod synthesis;

// Public API of the voice subsystem.
pub use crate::error::{RecognitionError, VoiceError};
pub use recognition::{
    RecognitionConfig, RecognitionEngine, RecognitionEvents, SpeechToText, Transcript,
    UnsupportedRecognition,
};
pub use synthesis::{
    DEFAULT_PITCH, DEFAULT_RATE, DEFAULT_VOLUME, SilentSpeechOutput, SpeakOptions, SpeechOutput,
    TextToSpeech, Utterance, VoiceInfo, select_voice,
};
