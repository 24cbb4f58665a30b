#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod quizzes;
pub mod videos;
pub mod voice;

pub use kids_core::Clock;

pub use app_services::{AppServices, SpeechEngines};
pub use error::{
    AppServicesError, ProgressError, QuizLoopError, QuizSessionError, RecognitionError,
    VideoServiceError, VoiceError,
};
pub use progress_service::{ProgressService, ProgressSnapshot};
pub use quizzes::{
    Advance, AnswerFeedback, QuizCompletion, QuizLoopService, QuizProgress, QuizSession,
};
pub use videos::{PlaybackEvent, VideoPlayback, VideoService};
pub use voice::{
    RecognitionEngine, RecognitionEvents, SpeakOptions, SpeechOutput, SpeechToText, TextToSpeech,
    Transcript,
};
