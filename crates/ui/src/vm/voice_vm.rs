use kids_core::model::UserProfile;
use services::{RecognitionError, SpeakOptions, SpeechToText, Transcript};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

pub type ListenOutcome = Result<Transcript, RecognitionError>;

/// Start a listening session and receive its outcome on a channel.
///
/// The recognition callbacks may run on any thread, so the outcome is handed
/// to the view task through the channel. A cancelled session drops both
/// senders and the receiver yields `None`.
pub fn listen(speech_to_text: &SpeechToText) -> UnboundedReceiver<ListenOutcome> {
    let (tx, rx) = unbounded_channel();
    let on_error = tx.clone();
    speech_to_text.start_listening(
        move |transcript| {
            let _ = tx.send(Ok(transcript));
        },
        move |error| {
            let _ = on_error.send(Err(error));
        },
    );
    rx
}

/// Read aloud in the learner's language, or the app language without a profile.
#[must_use]
pub fn speak_options_for(user: Option<&UserProfile>) -> SpeakOptions {
    user.map_or_else(SpeakOptions::default, |user| {
        SpeakOptions::in_language(user.language())
    })
}

/// Notice shown to the child when listening fails.
#[must_use]
pub fn recognition_notice(error: &RecognitionError) -> &'static str {
    match error {
        RecognitionError::Unsupported => {
            "Speech recognition is not supported here. Ask a grown-up for help!"
        }
        RecognitionError::NotAllowed => "We need permission to use the microphone.",
        RecognitionError::NoSpeech => "We didn't hear anything. Try again!",
        RecognitionError::AudioCapture => "We couldn't find a microphone.",
        _ => "Speech recognition failed. Please try again.",
    }
}
