use std::sync::Arc;

use kids_core::Catalog;
use kids_core::model::{BadgeId, QuizId, QuizResult};
use tracing::{debug, info, warn};

use super::session::{Advance, AnswerFeedback, QuizSession};
use crate::Clock;
use crate::error::QuizLoopError;
use crate::progress_service::ProgressService;

/// Outcome of completing a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCompletion {
    pub result: QuizResult,
    pub new_badges: Vec<BadgeId>,
}

/// Orchestrates quiz start, answering and recording of results.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
    shuffle_options: bool,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, progress: Arc<ProgressService>) -> Self {
        Self {
            clock,
            catalog,
            progress,
            shuffle_options: false,
        }
    }

    #[must_use]
    pub fn with_shuffle_options(mut self, shuffle_options: bool) -> Self {
        self.shuffle_options = shuffle_options;
        self
    }

    /// Start an attempt at the quiz with `quiz_id` and mark it as current.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::NotFound` for an unknown id.
    pub fn start_quiz(&self, quiz_id: &QuizId) -> Result<QuizSession, QuizLoopError> {
        let quiz = self
            .catalog
            .quiz(quiz_id)
            .cloned()
            .ok_or_else(|| QuizLoopError::NotFound(quiz_id.clone()))?;

        let mut session = QuizSession::new(quiz, self.clock.now())?;
        if self.shuffle_options {
            session.shuffle_options(&mut rand::rng());
        }
        self.progress.set_current_quiz(quiz_id.clone())?;
        debug!(quiz = %quiz_id, "quiz started");
        Ok(session)
    }

    /// Grade an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::Session` if the attempt cannot take an answer.
    pub fn submit_answer(
        &self,
        session: &mut QuizSession,
        answer: &str,
    ) -> Result<AnswerFeedback, QuizLoopError> {
        let feedback = session.submit_answer(answer, self.clock.now())?.clone();
        debug!(
            quiz = %session.quiz().id(),
            question = %feedback.question_id,
            correct = feedback.is_correct,
            "answer graded"
        );
        Ok(feedback)
    }

    /// # Errors
    ///
    /// Returns `QuizLoopError::Session` once the attempt is finished.
    pub fn advance(&self, session: &mut QuizSession) -> Result<Advance, QuizLoopError> {
        Ok(session.advance()?)
    }

    /// Finish the attempt and record its result for the active profile.
    ///
    /// Nothing is recorded and the attempt stays open when no profile is
    /// active.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoopError::NoActiveUser` without a profile, or
    /// `QuizLoopError::Session` if the attempt was already finished.
    pub fn complete(&self, session: &mut QuizSession) -> Result<QuizCompletion, QuizLoopError> {
        let Some(user) = self.progress.active_user()? else {
            warn!(quiz = %session.quiz().id(), "quiz completed without a profile");
            return Err(QuizLoopError::NoActiveUser);
        };

        let result = session.finish(user.id(), self.clock.now())?;
        let new_badges = self.progress.record_quiz_result(result.clone())?;
        info!(
            quiz = %result.quiz_id(),
            score = result.score(),
            correct = result.correct_answers(),
            total = result.total_questions(),
            "quiz completed"
        );

        Ok(QuizCompletion { result, new_badges })
    }
}
