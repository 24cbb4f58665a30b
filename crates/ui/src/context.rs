use std::sync::{Arc, Mutex, PoisonError};

use kids_core::Catalog;
use kids_core::model::{Language, QuizId};
use services::{
    AppServices, ProgressService, QuizCompletion, QuizLoopService, SpeechToText, TextToSpeech,
    VideoService,
};

pub trait UiApp: Send + Sync {
    fn language(&self) -> Language;

    fn catalog(&self) -> Arc<Catalog>;
    fn progress(&self) -> Arc<ProgressService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn videos(&self) -> Arc<VideoService>;
    fn text_to_speech(&self) -> Arc<TextToSpeech>;
    fn speech_to_text(&self) -> Arc<SpeechToText>;
}

impl UiApp for AppServices {
    fn language(&self) -> Language {
        AppServices::language(self)
    }

    fn catalog(&self) -> Arc<Catalog> {
        AppServices::catalog(self)
    }

    fn progress(&self) -> Arc<ProgressService> {
        AppServices::progress(self)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        AppServices::quiz_loop(self)
    }

    fn videos(&self) -> Arc<VideoService> {
        AppServices::videos(self)
    }

    fn text_to_speech(&self) -> Arc<TextToSpeech> {
        AppServices::text_to_speech(self)
    }

    fn speech_to_text(&self) -> Arc<SpeechToText> {
        AppServices::speech_to_text(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    language: Language,

    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    quiz_loop: Arc<QuizLoopService>,
    videos: Arc<VideoService>,
    text_to_speech: Arc<TextToSpeech>,
    speech_to_text: Arc<SpeechToText>,

    last_completion: Arc<Mutex<Option<QuizCompletion>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            language: app.language(),
            catalog: app.catalog(),
            progress: app.progress(),
            quiz_loop: app.quiz_loop(),
            videos: app.videos(),
            text_to_speech: app.text_to_speech(),
            speech_to_text: app.speech_to_text(),
            last_completion: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn videos(&self) -> Arc<VideoService> {
        Arc::clone(&self.videos)
    }

    #[must_use]
    pub fn text_to_speech(&self) -> Arc<TextToSpeech> {
        Arc::clone(&self.text_to_speech)
    }

    #[must_use]
    pub fn speech_to_text(&self) -> Arc<SpeechToText> {
        Arc::clone(&self.speech_to_text)
    }

    /// Hand a finished attempt over to the result screen.
    pub fn stash_completion(&self, completion: QuizCompletion) {
        *self
            .last_completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(completion);
    }

    /// One-shot: the stashed completion, if it belongs to `quiz_id`.
    #[must_use]
    pub fn take_completion(&self, quiz_id: &QuizId) -> Option<QuizCompletion> {
        let mut slot = self
            .last_completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot
            .as_ref()
            .is_some_and(|completion| completion.result.quiz_id() == quiz_id)
        {
            return slot.take();
        }
        None
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
