use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::age::{AgeGroup, UnknownVariant};
use crate::model::ids::{QuestionId, QuizId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz {0} has no questions")]
    NoQuestions(QuizId),

    #[error("question {0} appears more than once")]
    DuplicateQuestion(QuestionId),

    #[error("question {0} has empty text")]
    EmptyQuestionText(QuestionId),

    #[error("question {0} has an empty correct answer")]
    EmptyCorrectAnswer(QuestionId),

    #[error("multiple-choice question {0} does not list its correct answer")]
    CorrectAnswerNotAnOption(QuestionId),
}

//
// ─── TAXONOMIES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Subject area a quiz belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizCategory {
    BasicLearning,
    Nature,
    Math,
    Science,
    Arts,
    Music,
}

impl QuizCategory {
    pub const ALL: [QuizCategory; 6] = [
        QuizCategory::BasicLearning,
        QuizCategory::Nature,
        QuizCategory::Math,
        QuizCategory::Science,
        QuizCategory::Arts,
        QuizCategory::Music,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            QuizCategory::BasicLearning => "basic-learning",
            QuizCategory::Nature => "nature",
            QuizCategory::Math => "math",
            QuizCategory::Science => "science",
            QuizCategory::Arts => "arts",
            QuizCategory::Music => "music",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            QuizCategory::BasicLearning => "Basic Learning",
            QuizCategory::Nature => "Nature",
            QuizCategory::Math => "Math",
            QuizCategory::Science => "Science",
            QuizCategory::Arts => "Arts & Crafts",
            QuizCategory::Music => "Music",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            QuizCategory::BasicLearning => "📚",
            QuizCategory::Nature => "🌿",
            QuizCategory::Math => "🔢",
            QuizCategory::Science => "🔬",
            QuizCategory::Arts => "🎨",
            QuizCategory::Music => "🎵",
        }
    }
}

impl fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuizCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizCategory::ALL
            .into_iter()
            .find(|category| category.id() == s.trim())
            .ok_or_else(|| UnknownVariant::new("quiz category", s))
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String> },
    Voice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    kind: QuestionKind,
    correct_answer: String,
    explanation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn multiple_choice<I, S>(
        id: impl Into<String>,
        text: impl Into<String>,
        options: I,
        correct_answer: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: QuestionId::new(id),
            text: text.into(),
            kind: QuestionKind::MultipleChoice {
                options: options.into_iter().map(Into::into).collect(),
            },
            correct_answer: correct_answer.into(),
            explanation: None,
        }
    }

    #[must_use]
    pub fn voice(
        id: impl Into<String>,
        text: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            text: text.into(),
            kind: QuestionKind::Voice,
            correct_answer: correct_answer.into(),
            explanation: None,
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    #[must_use]
    pub fn is_voice(&self) -> bool {
        matches!(self.kind, QuestionKind::Voice)
    }

    /// Options for multiple-choice questions; empty for voice questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => options,
            QuestionKind::Voice => &[],
        }
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    fn validate(&self) -> Result<(), QuizError> {
        if self.text.trim().is_empty() {
            return Err(QuizError::EmptyQuestionText(self.id.clone()));
        }
        if self.correct_answer.trim().is_empty() {
            return Err(QuizError::EmptyCorrectAnswer(self.id.clone()));
        }
        if let QuestionKind::MultipleChoice { options } = &self.kind {
            if !options.iter().any(|option| *option == self.correct_answer) {
                return Err(QuizError::CorrectAnswerNotAnOption(self.id.clone()));
            }
        }
        Ok(())
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Display metadata for a quiz, separate from its questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDetails {
    pub id: QuizId,
    pub title: String,
    pub category: QuizCategory,
    pub description: String,
    pub age_group: AgeGroup,
    pub difficulty: Difficulty,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    id: QuizId,
    title: String,
    category: QuizCategory,
    description: String,
    age_group: AgeGroup,
    difficulty: Difficulty,
    icon: String,
    questions: Vec<Question>,
}

impl Quiz {
    /// Builds a quiz from its details and ordered questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the title is blank, there are no questions,
    /// question ids repeat, or a question is malformed.
    pub fn new(details: QuizDetails, questions: Vec<Question>) -> Result<Self, QuizError> {
        if details.title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions(details.id));
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuizError::DuplicateQuestion(question.id().clone()));
            }
            question.validate()?;
        }

        Ok(Self {
            id: details.id,
            title: details.title,
            category: details.category,
            description: details.description,
            age_group: details.age_group,
            difficulty: details.difficulty,
            icon: details.icon,
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuizId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> QuizCategory {
        self.category
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn details(id: &str) -> QuizDetails {
        QuizDetails {
            id: QuizId::new(id),
            title: "Shapes".to_string(),
            category: QuizCategory::BasicLearning,
            description: "Shapes".to_string(),
            age_group: AgeGroup::Preschool,
            difficulty: Difficulty::Easy,
            icon: "🔺".to_string(),
        }
    }

    #[test]
    fn quiz_requires_questions() {
        let err = Quiz::new(details("empty"), Vec::new()).unwrap_err();
        assert_eq!(err, QuizError::NoQuestions(QuizId::new("empty")));
    }

    #[test]
    fn quiz_rejects_duplicate_question_ids() {
        let questions = vec![
            Question::voice("q1", "What shape is a ball?", "circle"),
            Question::voice("q1", "What shape is a box?", "square"),
        ];
        let err = Quiz::new(details("dupes"), questions).unwrap_err();
        assert_eq!(err, QuizError::DuplicateQuestion(QuestionId::new("q1")));
    }

    #[test]
    fn multiple_choice_must_offer_correct_answer() {
        let questions = vec![Question::multiple_choice(
            "q1",
            "How many sides does a triangle have?",
            ["2", "4"],
            "3",
        )];
        let err = Quiz::new(details("triangles"), questions).unwrap_err();
        assert!(matches!(err, QuizError::CorrectAnswerNotAnOption(_)));
    }

    #[test]
    fn voice_questions_have_no_options() {
        let question = Question::voice("q3", "What shape is a ball?", "circle")
            .with_explanation("A ball is round like a circle!");
        assert!(question.is_voice());
        assert!(question.options().is_empty());
        assert_eq!(question.explanation(), Some("A ball is round like a circle!"));
    }

    #[test]
    fn category_parses_from_id() {
        assert_eq!("arts".parse::<QuizCategory>().unwrap(), QuizCategory::Arts);
        assert_eq!(QuizCategory::Arts.name(), "Arts & Crafts");
        assert!("history".parse::<QuizCategory>().is_err());
    }
}
