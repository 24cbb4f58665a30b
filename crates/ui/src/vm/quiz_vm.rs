use kids_core::model::QuizId;
use services::{Advance, AnswerFeedback, QuizCompletion, QuizLoopService, QuizProgress, QuizSession};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    Feedback,
    /// Every question is answered but the result is not recorded yet.
    ReadyToFinish,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Completed(QuizCompletion),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    /// Picked on an earlier visit to this question.
    Chosen,
    Correct,
    Wrong,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOptionVm {
    pub letter: char,
    pub text: String,
    pub state: OptionState,
}

impl OptionState {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            OptionState::Idle => "option",
            OptionState::Chosen => "option chosen",
            OptionState::Correct => "option correct",
            OptionState::Wrong => "option wrong",
        }
    }
}

pub struct QuizVm {
    session: QuizSession,
    voice_answer: Option<String>,
    ready_to_finish: bool,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            voice_answer: None,
            ready_to_finish: false,
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        self.session.quiz().id()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.session.quiz().title()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.ready_to_finish {
            QuizPhase::ReadyToFinish
        } else if self.session.feedback().is_some() {
            QuizPhase::Feedback
        } else {
            QuizPhase::Answering
        }
    }

    #[must_use]
    pub fn question_text(&self) -> Option<&str> {
        self.session.current_question().map(|question| question.text())
    }

    #[must_use]
    pub fn is_voice_question(&self) -> bool {
        self.session
            .current_question()
            .is_some_and(|question| question.is_voice())
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        self.session.progress()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.number(), progress.total)
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.session.feedback()
    }

    #[must_use]
    pub fn voice_answer(&self) -> Option<&str> {
        self.voice_answer.as_deref()
    }

    pub fn set_voice_answer(&mut self, transcript: impl Into<String>) {
        self.voice_answer = Some(transcript.into());
    }

    pub fn clear_voice_answer(&mut self) {
        self.voice_answer = None;
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.phase() == QuizPhase::Answering && self.session.current_index() > 0
    }

    #[must_use]
    pub fn options(&self) -> Vec<AnswerOptionVm> {
        let feedback = self.session.feedback();
        let previous = self.session.current_answer();

        ('A'..='Z')
            .zip(self.session.current_options())
            .map(|(letter, text)| {
                let state = match feedback {
                    Some(feedback) if *text == feedback.correct_answer => OptionState::Correct,
                    Some(feedback) if *text == feedback.answer => OptionState::Wrong,
                    Some(_) => OptionState::Idle,
                    None if previous == Some(text.as_str()) => OptionState::Chosen,
                    None => OptionState::Idle,
                };
                AnswerOptionVm {
                    letter,
                    text: text.clone(),
                    state,
                }
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the question cannot take an answer.
    pub fn answer(
        &mut self,
        quiz_loop: &QuizLoopService,
        answer: &str,
    ) -> Result<AnswerFeedback, ViewError> {
        quiz_loop
            .submit_answer(&mut self.session, answer)
            .map_err(ViewError::from)
    }

    /// Leave the feedback screen: move on, or record the finished attempt.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NoProfile` when there is no profile to record the
    /// result for. The attempt stays open so it can be finished later.
    pub fn continue_quiz(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizOutcome, ViewError> {
        if !self.ready_to_finish {
            match quiz_loop.advance(&mut self.session)? {
                Advance::Next(_) => {
                    self.voice_answer = None;
                    return Ok(QuizOutcome::Continue);
                }
                Advance::ReadyToFinish => self.ready_to_finish = true,
            }
        }

        let completion = quiz_loop.complete(&mut self.session)?;
        Ok(QuizOutcome::Completed(completion))
    }

    pub fn previous(&mut self) -> bool {
        if self.session.previous() {
            self.voice_answer = None;
            return true;
        }
        false
    }
}

/// # Errors
///
/// Returns `ViewError::NotFound` for an unknown quiz id.
pub fn start_quiz(quiz_loop: &QuizLoopService, quiz_id: &str) -> Result<QuizVm, ViewError> {
    let session = quiz_loop.start_quiz(&QuizId::new(quiz_id))?;
    Ok(QuizVm::new(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kids_core::model::{Language, ProfileDraft};
    use kids_core::time::fixed_clock;
    use services::{AppServices, SpeechEngines};

    fn services() -> AppServices {
        AppServices::in_memory(fixed_clock(), Language::En, SpeechEngines::unsupported()).unwrap()
    }

    #[test]
    fn unknown_quiz_is_not_found() {
        let services = services();
        let err = start_quiz(&services.quiz_loop(), "history-quiz").err();
        assert_eq!(err, Some(ViewError::NotFound));
    }

    #[test]
    fn options_reflect_feedback() {
        let services = services();
        let quiz_loop = services.quiz_loop();
        let mut vm = start_quiz(&quiz_loop, "colors-quiz").unwrap();
        assert_eq!(vm.phase(), QuizPhase::Answering);
        assert_eq!(vm.progress_label(), "Question 1 of 3");

        let feedback = vm.answer(&quiz_loop, "Purple").unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(vm.phase(), QuizPhase::Feedback);

        let states: Vec<_> = vm.options().into_iter().map(|o| (o.letter, o.state)).collect();
        assert_eq!(
            states,
            [
                ('A', OptionState::Correct),
                ('B', OptionState::Wrong),
                ('C', OptionState::Idle),
                ('D', OptionState::Idle),
            ]
        );
        assert!(!vm.can_go_back());
    }

    #[test]
    fn going_back_shows_previous_choice() {
        let services = services();
        let quiz_loop = services.quiz_loop();
        let mut vm = start_quiz(&quiz_loop, "colors-quiz").unwrap();

        vm.answer(&quiz_loop, "Orange").unwrap();
        assert_eq!(vm.continue_quiz(&quiz_loop).unwrap(), QuizOutcome::Continue);
        assert!(vm.can_go_back());
        assert!(vm.previous());

        let chosen: Vec<_> = vm
            .options()
            .into_iter()
            .filter(|option| option.state == OptionState::Chosen)
            .map(|option| option.text)
            .collect();
        assert_eq!(chosen, ["Orange"]);
    }

    #[test]
    fn finishing_without_profile_keeps_attempt_open() {
        let services = services();
        let quiz_loop = services.quiz_loop();
        let mut vm = start_quiz(&quiz_loop, "colors-quiz").unwrap();

        for answer in ["Orange", "3"] {
            vm.answer(&quiz_loop, answer).unwrap();
            vm.continue_quiz(&quiz_loop).unwrap();
        }
        assert!(vm.is_voice_question());
        vm.set_voice_answer("It's a circle!");
        let transcript = vm.voice_answer().unwrap().to_string();
        vm.answer(&quiz_loop, &transcript).unwrap();

        assert_eq!(vm.continue_quiz(&quiz_loop), Err(ViewError::NoProfile));
        assert_eq!(vm.phase(), QuizPhase::ReadyToFinish);

        services
            .progress()
            .create_profile(ProfileDraft::new("Mia", 5, Language::En))
            .unwrap();
        let QuizOutcome::Completed(completion) = vm.continue_quiz(&quiz_loop).unwrap() else {
            panic!("expected a completed quiz");
        };
        assert_eq!(completion.result.score(), 100);
        let badges: Vec<_> = completion.new_badges.iter().map(|id| id.as_str()).collect();
        assert_eq!(badges, ["first-quiz", "high-scorer"]);
    }
}
