use kids_core::model::{BadgeId, Language, ProfileDraft, QuizId};
use kids_core::time::fixed_now;
use services::{Advance, AppServices, Clock, QuizLoopError, SpeechEngines};

fn services() -> AppServices {
    AppServices::in_memory(Clock::fixed(fixed_now()), Language::En, SpeechEngines::unsupported())
        .unwrap()
}

#[test]
fn colors_quiz_with_two_correct_answers_stores_sixty_seven() {
    let services = services();
    let progress = services.progress();
    progress
        .create_profile(ProfileDraft::new("Ava", 4, Language::En))
        .unwrap();

    let quiz_loop = services.quiz_loop();
    let quiz_id = QuizId::new("colors-quiz");
    let mut session = quiz_loop.start_quiz(&quiz_id).unwrap();

    for answer in ["Orange", "2", "it is round"] {
        quiz_loop.submit_answer(&mut session, answer).unwrap();
        quiz_loop.advance(&mut session).unwrap();
    }
    let completion = quiz_loop.complete(&mut session).unwrap();

    assert_eq!(completion.result.score(), 67);
    assert_eq!(completion.new_badges, [BadgeId::new("first-quiz")]);

    let snapshot = progress.snapshot().unwrap();
    assert_eq!(snapshot.counts.completed_quizzes, 1);
    assert_eq!(snapshot.counts.total_score, 67);
    assert_eq!(snapshot.current_quiz, Some(quiz_id.clone()));
    assert_eq!(progress.latest_result_for(&quiz_id).unwrap().unwrap().score(), 67);
}

#[test]
fn completing_without_profile_records_nothing() {
    let services = services();
    let quiz_loop = services.quiz_loop();
    let mut session = quiz_loop.start_quiz(&QuizId::new("animals-quiz")).unwrap();
    quiz_loop.submit_answer(&mut session, "moo").unwrap();

    let err = quiz_loop.complete(&mut session).unwrap_err();
    assert!(matches!(err, QuizLoopError::NoActiveUser));
    assert!(!session.is_finished());

    let snapshot = services.progress().snapshot().unwrap();
    assert!(snapshot.results.is_empty());
}

#[test]
fn unknown_quiz_is_not_found() {
    let err = services()
        .quiz_loop()
        .start_quiz(&QuizId::new("history-quiz"))
        .unwrap_err();
    assert!(matches!(err, QuizLoopError::NotFound(id) if id.as_str() == "history-quiz"));
}

#[test]
fn last_answer_reports_ready_to_finish() {
    let services = services();
    let quiz_loop = services.quiz_loop();
    let mut session = quiz_loop.start_quiz(&QuizId::new("numbers-quiz")).unwrap();

    quiz_loop.submit_answer(&mut session, "6").unwrap();
    assert_eq!(quiz_loop.advance(&mut session).unwrap(), Advance::Next(1));
    let feedback = quiz_loop.submit_answer(&mut session, "five fingers").unwrap();
    assert!(feedback.is_correct);
    assert_eq!(quiz_loop.advance(&mut session).unwrap(), Advance::Next(2));
    let feedback = quiz_loop.submit_answer(&mut session, "4").unwrap();
    assert!(feedback.is_last);
    assert_eq!(quiz_loop.advance(&mut session).unwrap(), Advance::ReadyToFinish);
}

#[test]
fn shuffled_sessions_grade_by_answer_text() {
    let services = services().with_shuffle_options(true);
    services
        .progress()
        .create_profile(ProfileDraft::new("Ava", 4, Language::En))
        .unwrap();
    let quiz_loop = services.quiz_loop();
    let mut session = quiz_loop.start_quiz(&QuizId::new("science-quiz")).unwrap();

    assert_eq!(session.current_options().len(), 4);
    for answer in ["Water and sunlight", "8", "the cheetah"] {
        quiz_loop.submit_answer(&mut session, answer).unwrap();
        quiz_loop.advance(&mut session).unwrap();
    }
    assert_eq!(quiz_loop.complete(&mut session).unwrap().result.score(), 100);
}
