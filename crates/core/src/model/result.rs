use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, QuizId, UserId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("a quiz result needs at least one question")]
    NoQuestions,

    #[error("correct answers ({correct}) exceed total questions ({total})")]
    TooManyCorrect { correct: u32, total: u32 },

    #[error("answer count ({answers}) does not match total questions ({total})")]
    AnswerCountMismatch { answers: usize, total: u32 },
}

//
// ─── SCORE ────────────────────────────────────────────────────────────────────
//

/// Percentage of correct answers, rounded half up.
///
/// Returns 0 when `total` is zero.
#[must_use]
pub fn percentage_score(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    let rounded = (correct * 200 + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}

//
// ─── ANSWER RECORD ────────────────────────────────────────────────────────────
//

/// One graded answer within an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: QuestionId,
    pub user_answer: String,
    pub is_correct: bool,
    pub time_spent_ms: u64,
}

impl QuizAnswer {
    #[must_use]
    pub fn new(question_id: QuestionId, user_answer: impl Into<String>, is_correct: bool) -> Self {
        Self {
            question_id,
            user_answer: user_answer.into(),
            is_correct,
            time_spent_ms: 0,
        }
    }
}

fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.num_milliseconds()).unwrap_or(0)
}

//
// ─── RESULT ───────────────────────────────────────────────────────────────────
//

/// Immutable record of one finished quiz attempt.
///
/// `score` is derived from the answer counts on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    quiz_id: QuizId,
    user_id: UserId,
    score: u32,
    total_questions: u32,
    correct_answers: u32,
    completed_at: DateTime<Utc>,
    time_spent_ms: u64,
    answers: Vec<QuizAnswer>,
}

impl QuizResult {
    /// Builds a result from graded answers, one per question.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::NoQuestions` if `answers` is empty.
    pub fn from_answers(
        quiz_id: QuizId,
        user_id: UserId,
        answers: Vec<QuizAnswer>,
        completed_at: DateTime<Utc>,
        time_spent: Duration,
    ) -> Result<Self, QuizResultError> {
        let total = u32::try_from(answers.len()).unwrap_or(u32::MAX);
        let correct = u32::try_from(answers.iter().filter(|a| a.is_correct).count())
            .unwrap_or(total);
        Self::new(quiz_id, user_id, total, correct, completed_at, time_spent, answers)
    }

    /// Builds a result from explicit counts.
    ///
    /// `answers` may be empty when per-question detail is unavailable; otherwise
    /// its length must equal `total_questions`.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError` when the counts are inconsistent.
    pub fn new(
        quiz_id: QuizId,
        user_id: UserId,
        total_questions: u32,
        correct_answers: u32,
        completed_at: DateTime<Utc>,
        time_spent: Duration,
        answers: Vec<QuizAnswer>,
    ) -> Result<Self, QuizResultError> {
        if total_questions == 0 {
            return Err(QuizResultError::NoQuestions);
        }
        if correct_answers > total_questions {
            return Err(QuizResultError::TooManyCorrect {
                correct: correct_answers,
                total: total_questions,
            });
        }
        if !answers.is_empty() && answers.len() != total_questions as usize {
            return Err(QuizResultError::AnswerCountMismatch {
                answers: answers.len(),
                total: total_questions,
            });
        }

        Ok(Self {
            quiz_id,
            user_id,
            score: percentage_score(correct_answers, total_questions),
            total_questions,
            correct_answers,
            completed_at,
            time_spent_ms: duration_to_millis(time_spent),
            answers,
        })
    }

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Percentage score in `0..=100`.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Wall-clock time between starting and finishing the attempt.
    #[must_use]
    pub fn time_spent(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.time_spent_ms).unwrap_or(i64::MAX))
    }

    #[must_use]
    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn two_of_three_scores_sixty_seven() {
        let result = QuizResult::new(
            QuizId::new("colors-quiz"),
            UserId::generate(),
            3,
            2,
            fixed_now(),
            Duration::seconds(42),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(result.score(), 67);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage_score(1, 8), 13);
        assert_eq!(percentage_score(1, 3), 33);
        assert_eq!(percentage_score(3, 3), 100);
        assert_eq!(percentage_score(0, 3), 0);
        assert_eq!(percentage_score(0, 0), 0);
    }

    #[test]
    fn rejects_inconsistent_counts() {
        let user = UserId::generate();
        let err = QuizResult::new(
            QuizId::new("q"),
            user,
            0,
            0,
            fixed_now(),
            Duration::zero(),
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, QuizResultError::NoQuestions);

        let err = QuizResult::new(
            QuizId::new("q"),
            user,
            2,
            3,
            fixed_now(),
            Duration::zero(),
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, QuizResultError::TooManyCorrect { correct: 3, total: 2 });

        let answers = vec![QuizAnswer::new(QuestionId::new("q1"), "Orange", true)];
        let err = QuizResult::new(
            QuizId::new("q"),
            user,
            2,
            1,
            fixed_now(),
            Duration::zero(),
            answers,
        )
        .unwrap_err();
        assert!(matches!(err, QuizResultError::AnswerCountMismatch { .. }));
    }

    #[test]
    fn from_answers_counts_correct_answers() {
        let answers = vec![
            QuizAnswer::new(QuestionId::new("q1"), "Orange", true),
            QuizAnswer::new(QuestionId::new("q2"), "4", false),
            QuizAnswer::new(QuestionId::new("q3"), "it's round", true),
        ];
        let result = QuizResult::from_answers(
            QuizId::new("colors-quiz"),
            UserId::generate(),
            answers,
            fixed_now(),
            Duration::seconds(30),
        )
        .unwrap();

        assert_eq!(result.total_questions(), 3);
        assert_eq!(result.correct_answers(), 2);
        assert_eq!(result.score(), 67);
        assert_eq!(result.answers().len(), 3);
    }
}
