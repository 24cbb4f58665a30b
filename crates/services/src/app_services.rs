use std::sync::Arc;

use kids_core::Catalog;
use kids_core::model::Language;
use tracing::info;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::quizzes::QuizLoopService;
use crate::videos::VideoService;
use crate::voice::{
    RecognitionEngine, SilentSpeechOutput, SpeechOutput, SpeechToText, TextToSpeech,
    UnsupportedRecognition,
};

/// Platform speech engines handed to the services layer.
#[derive(Clone)]
pub struct SpeechEngines {
    pub output: Arc<dyn SpeechOutput>,
    pub recognition: Arc<dyn RecognitionEngine>,
}

impl SpeechEngines {
    /// Engines that report themselves as unsupported.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            output: Arc::new(SilentSpeechOutput),
            recognition: Arc::new(UnsupportedRecognition),
        }
    }
}

/// Assembles app-facing services around one shared progress store.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    language: Language,
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    quiz_loop: Arc<QuizLoopService>,
    videos: Arc<VideoService>,
    text_to_speech: Arc<TextToSpeech>,
    speech_to_text: Arc<SpeechToText>,
}

impl AppServices {
    /// Build services over the bundled catalog with in-memory progress.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the bundled content is invalid.
    pub fn in_memory(
        clock: Clock,
        language: Language,
        engines: SpeechEngines,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(Catalog::builtin()?);
        info!(
            quizzes = catalog.quizzes().len(),
            videos = catalog.videos().len(),
            "catalog loaded"
        );

        let progress = Arc::new(ProgressService::new());
        let quiz_loop = Arc::new(QuizLoopService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&progress),
        ));
        let videos = Arc::new(VideoService::new(Arc::clone(&catalog), Arc::clone(&progress)));
        let text_to_speech = Arc::new(TextToSpeech::new(engines.output, language));
        let speech_to_text = Arc::new(SpeechToText::new(engines.recognition, language));

        Ok(Self {
            clock,
            language,
            catalog,
            progress,
            quiz_loop,
            videos,
            text_to_speech,
            speech_to_text,
        })
    }

    /// Shuffle multiple-choice options for every quiz started afterwards.
    #[must_use]
    pub fn with_shuffle_options(mut self, shuffle_options: bool) -> Self {
        self.quiz_loop = Arc::new(
            QuizLoopService::new(self.clock, Arc::clone(&self.catalog), Arc::clone(&self.progress))
                .with_shuffle_options(shuffle_options),
        );
        self
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
}
