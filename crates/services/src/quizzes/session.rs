use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

use kids_core::grade_answer;
use kids_core::model::{Question, QuestionId, Quiz, QuizAnswer, QuizResult, UserId};
use kids_core::time::{elapsed_between, elapsed_millis};

use super::progress::QuizProgress;
use crate::error::QuizSessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Shown after an answer is submitted, until the learner moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_id: QuestionId,
    pub answer: String,
    pub is_correct: bool,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub is_last: bool,
}

/// Where `advance` left the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Next(usize),
    /// The last question has been answered.
    ReadyToFinish,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory attempt at a quiz.
///
/// Steps through the questions in order, grades each submitted answer and
/// builds the immutable `QuizResult` once the learner is done.
pub struct QuizSession {
    quiz: Quiz,
    options: Vec<Vec<String>>,
    current: usize,
    answers: Vec<Option<String>>,
    time_spent_ms: Vec<u64>,
    feedback: Option<AnswerFeedback>,
    started_at: DateTime<Utc>,
    last_answered_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start an attempt at `quiz`.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Empty` if the quiz has no questions.
    pub fn new(quiz: Quiz, started_at: DateTime<Utc>) -> Result<Self, QuizSessionError> {
        if quiz.question_count() == 0 {
            return Err(QuizSessionError::Empty);
        }

        let total = quiz.question_count();
        let options = quiz
            .questions()
            .iter()
            .map(|question| question.options().to_vec())
            .collect();

        Ok(Self {
            quiz,
            options,
            current: 0,
            answers: vec![None; total],
            time_spent_ms: vec![0; total],
            feedback: None,
            started_at,
            last_answered_at: started_at,
            finished_at: None,
        })
    }

    /// Shuffle the display order of every multiple-choice question's options.
    pub fn shuffle_options<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for options in &mut self.options {
            options.shuffle(rng);
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.quiz.question(self.current)
    }

    /// Options for the current question in display order.
    #[must_use]
    pub fn current_options(&self) -> &[String] {
        self.options
            .get(self.current)
            .map_or(&[][..], Vec::as_slice)
    }

    /// The answer recorded for the current question, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.answers.get(self.current)?.as_deref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.quiz.question_count()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress::new(
            self.current,
            self.quiz.question_count(),
            self.answers.iter().filter(|answer| answer.is_some()).count(),
        )
    }

    /// Record and grade an answer for the current question.
    ///
    /// An earlier answer to the same question is replaced.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::FeedbackPending` while feedback is showing and
    /// `QuizSessionError::Finished` once the attempt is over.
    pub fn submit_answer(
        &mut self,
        answer: impl Into<String>,
        answered_at: DateTime<Utc>,
    ) -> Result<&AnswerFeedback, QuizSessionError> {
        if self.is_finished() {
            return Err(QuizSessionError::Finished);
        }
        if self.feedback.is_some() {
            return Err(QuizSessionError::FeedbackPending);
        }
        let Some(question) = self.quiz.question(self.current) else {
            return Err(QuizSessionError::Finished);
        };

        let answer = answer.into();
        let feedback = AnswerFeedback {
            question_id: question.id().clone(),
            is_correct: grade_answer(question, &answer),
            correct_answer: question.correct_answer().to_string(),
            explanation: question.explanation().map(str::to_string),
            is_last: self.is_last_question(),
            answer: answer.clone(),
        };

        self.time_spent_ms[self.current] += elapsed_millis(self.last_answered_at, answered_at);
        self.last_answered_at = answered_at;
        self.answers[self.current] = Some(answer);

        Ok(&*self.feedback.insert(feedback))
    }

    /// Dismiss feedback and move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Finished` once the attempt is over.
    pub fn advance(&mut self) -> Result<Advance, QuizSessionError> {
        if self.is_finished() {
            return Err(QuizSessionError::Finished);
        }
        self.feedback = None;
        if self.is_last_question() {
            return Ok(Advance::ReadyToFinish);
        }
        self.current += 1;
        Ok(Advance::Next(self.current))
    }

    /// Step back one question. Returns `false` when that is not possible.
    pub fn previous(&mut self) -> bool {
        if self.is_finished() || self.feedback.is_some() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Grade every question and build the result.
    ///
    /// Unanswered questions are graded as an empty answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizSessionError::Finished` if called twice.
    pub fn finish(
        &mut self,
        user_id: UserId,
        completed_at: DateTime<Utc>,
    ) -> Result<QuizResult, QuizSessionError> {
        if self.is_finished() {
            return Err(QuizSessionError::Finished);
        }

        let answers = self
            .quiz
            .questions()
            .iter()
            .zip(&self.answers)
            .zip(&self.time_spent_ms)
            .map(|((question, answer), spent)| {
                let answer = answer.clone().unwrap_or_default();
                let is_correct = grade_answer(question, &answer);
                let mut record = QuizAnswer::new(question.id().clone(), answer, is_correct);
                record.time_spent_ms = *spent;
                record
            })
            .collect();

        let result = QuizResult::from_answers(
            self.quiz.id().clone(),
            user_id,
            answers,
            completed_at,
            elapsed_between(self.started_at, completed_at),
        )?;

        self.feedback = None;
        self.finished_at = Some(completed_at);
        Ok(result)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz_id", self.quiz.id())
            .field("current", &self.current)
            .field("answered", &self.answers.iter().filter(|a| a.is_some()).count())
            .field("feedback", &self.feedback.is_some())
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use kids_core::Catalog;
    use kids_core::model::QuizId;
    use kids_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn colors_quiz() -> Quiz {
        Catalog::builtin()
            .unwrap()
            .quiz(&QuizId::new("colors-quiz"))
            .unwrap()
            .clone()
    }

    #[test]
    fn walks_questions_and_reports_feedback() {
        let mut session = QuizSession::new(colors_quiz(), fixed_now()).unwrap();
        assert_eq!(session.progress().percent, 33);

        let feedback = session.submit_answer("Orange", fixed_now()).unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.explanation.as_deref(), Some("Red and yellow make orange!"));
        assert!(!feedback.is_last);

        assert_eq!(session.advance().unwrap(), Advance::Next(1));
        assert!(session.feedback().is_none());
        assert_eq!(
            session.current_question().unwrap().text(),
            "How many sides does a triangle have?"
        );
    }

    #[test]
    fn submit_is_rejected_while_feedback_is_pending() {
        let mut session = QuizSession::new(colors_quiz(), fixed_now()).unwrap();
        session.submit_answer("Purple", fixed_now()).unwrap();
        let err = session.submit_answer("Orange", fixed_now()).unwrap_err();
        assert_eq!(err, QuizSessionError::FeedbackPending);
        assert!(!session.previous());
    }

    #[test]
    fn two_of_three_scores_sixty_seven() {
        let start = fixed_now();
        let mut session = QuizSession::new(colors_quiz(), start).unwrap();
        session.submit_answer("Orange", start + Duration::seconds(4)).unwrap();
        session.advance().unwrap();
        session.submit_answer("4", start + Duration::seconds(9)).unwrap();
        session.advance().unwrap();
        let feedback = session
            .submit_answer("It's a circle!", start + Duration::seconds(15))
            .unwrap();
        assert!(feedback.is_last);
        assert_eq!(session.advance().unwrap(), Advance::ReadyToFinish);

        let result = session
            .finish(UserId::generate(), start + Duration::seconds(16))
            .unwrap();
        assert_eq!(result.correct_answers(), 2);
        assert_eq!(result.score(), 67);
        assert_eq!(result.time_spent(), Duration::seconds(16));
        assert_eq!(result.answers()[0].time_spent_ms, 4_000);
        assert_eq!(result.answers()[1].time_spent_ms, 5_000);
        assert!(session.is_finished());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn unanswered_questions_count_as_wrong() {
        let mut session = QuizSession::new(colors_quiz(), fixed_now()).unwrap();
        session.submit_answer("Orange", fixed_now()).unwrap();
        let result = session.finish(UserId::generate(), fixed_now()).unwrap();
        assert_eq!(result.total_questions(), 3);
        assert_eq!(result.correct_answers(), 1);
        assert_eq!(result.answers()[2].user_answer, "");
    }

    #[test]
    fn previous_allows_overwriting_an_answer() {
        let mut session = QuizSession::new(colors_quiz(), fixed_now()).unwrap();
        session.submit_answer("Blue", fixed_now()).unwrap();
        session.advance().unwrap();
        assert!(session.previous());
        assert_eq!(session.current_answer(), Some("Blue"));

        session.submit_answer("Orange", fixed_now()).unwrap();
        let result = session.finish(UserId::generate(), fixed_now()).unwrap();
        assert!(result.answers()[0].is_correct);
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn finish_twice_fails() {
        let mut session = QuizSession::new(colors_quiz(), fixed_now()).unwrap();
        session.finish(UserId::generate(), fixed_now()).unwrap();
        assert_eq!(
            session.finish(UserId::generate(), fixed_now()).unwrap_err(),
            QuizSessionError::Finished
        );
        assert_eq!(session.advance().unwrap_err(), QuizSessionError::Finished);
    }

    #[test]
    fn shuffled_options_keep_the_same_set() {
        let mut session = QuizSession::new(colors_quiz(), fixed_now()).unwrap();
        session.shuffle_options(&mut StdRng::seed_from_u64(7));
        let mut shown = session.current_options().to_vec();
        shown.sort();
        assert_eq!(shown, ["Blue", "Green", "Orange", "Purple"]);
    }
}
