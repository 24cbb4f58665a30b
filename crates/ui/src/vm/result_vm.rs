use kids_core::model::{BadgeDefinition, BadgeId, Quiz, QuizResult};

use super::progress_vm::BadgeVm;
use super::score_vm::{ScoreTier, trophy_icon};
use super::time_fmt::{format_completed_at, format_elapsed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRowVm {
    pub number: usize,
    pub question: String,
    /// `None` when the question was skipped.
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub quiz_id: String,
    pub title: String,
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub time_spent: String,
    pub completed_at: String,
    pub tier: ScoreTier,
    pub trophy: &'static str,
    pub rows: Vec<AnswerRowVm>,
    pub new_badges: Vec<BadgeVm>,
}

/// Build the result screen for `result`, listing `new_badges` in award order.
#[must_use]
pub fn map_result(
    quiz: &Quiz,
    result: &QuizResult,
    new_badges: &[BadgeId],
    definitions: &[BadgeDefinition],
) -> ResultVm {
    let rows = quiz
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = result
                .answers()
                .iter()
                .find(|answer| answer.question_id == *question.id());
            AnswerRowVm {
                number: index + 1,
                question: question.text().to_string(),
                user_answer: answer
                    .map(|answer| answer.user_answer.trim())
                    .filter(|text| !text.is_empty())
                    .map(str::to_string),
                correct_answer: question.correct_answer().to_string(),
                is_correct: answer.is_some_and(|answer| answer.is_correct),
            }
        })
        .collect();

    let new_badges = new_badges
        .iter()
        .filter_map(|id| definitions.iter().find(|definition| definition.id == *id))
        .map(|definition| BadgeVm {
            id: definition.id.clone(),
            name: definition.name,
            icon: definition.icon,
            description: definition.description,
            earned: true,
        })
        .collect();

    ResultVm {
        quiz_id: quiz.id().to_string(),
        title: quiz.title().to_string(),
        score: result.score(),
        correct_answers: result.correct_answers(),
        total_questions: result.total_questions(),
        time_spent: format_elapsed(result.time_spent()),
        completed_at: format_completed_at(result.completed_at()),
        tier: ScoreTier::for_score(result.score()),
        trophy: trophy_icon(result.score()),
        rows,
        new_badges,
    }
}
