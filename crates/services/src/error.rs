//! Shared error types for the services crate.

use thiserror::Error;

use kids_core::catalog::CatalogError;
use kids_core::model::{ProfileError, QuizId, QuizResultError, VideoId};

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("no active profile")]
    NoActiveUser,
    #[error("progress state is unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Errors emitted by an in-progress quiz attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("quiz has no questions")]
    Empty,
    #[error("feedback for the current question is still showing")]
    FeedbackPending,
    #[error("quiz attempt already finished")]
    Finished,
    #[error(transparent)]
    Result(#[from] QuizResultError),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoopError {
    #[error("quiz {0} not found")]
    NotFound(QuizId),
    #[error("a profile is required to complete a quiz")]
    NoActiveUser,
    #[error(transparent)]
    Session(#[from] QuizSessionError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `VideoService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VideoServiceError {
    #[error("video {0} not found")]
    NotFound(VideoId),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by speech synthesis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VoiceError {
    #[error("speech synthesis is not supported")]
    Unsupported,
    #[error("nothing to speak")]
    EmptyText,
    #[error("speech was interrupted")]
    Interrupted,
    #[error("speech engine failed: {0}")]
    Engine(String),
}

/// Classified speech recognition failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecognitionError {
    #[error("speech recognition is not supported")]
    Unsupported,
    #[error("speech recognition could not start: {0}")]
    StartFailed(String),
    #[error("no speech was detected")]
    NoSpeech,
    #[error("microphone access was denied")]
    NotAllowed,
    #[error("no microphone was found")]
    AudioCapture,
    #[error("network error during recognition")]
    Network,
    #[error("recognition was aborted")]
    Aborted,
    #[error("speech recognition error: {0}")]
    Other(String),
}

impl RecognitionError {
    /// Maps a platform error code onto a classification.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "not-allowed" | "service-not-allowed" => Self::NotAllowed,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "aborted" => Self::Aborted,
            "unsupported" => Self::Unsupported,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
