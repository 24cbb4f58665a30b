use kids_core::model::QuizId;
use services::{Advance, AppServices, QuizCompletion};

use super::test_harness::{
    ViewKind, services_with_learner, setup_view_harness, setup_view_harness_with_services,
};

fn finish_colors_quiz(services: &AppServices) -> QuizCompletion {
    let quiz_loop = services.quiz_loop();
    let mut session = quiz_loop
        .start_quiz(&QuizId::new("colors-quiz"))
        .expect("start quiz");
    for answer in ["Orange", "3", "circle"] {
        quiz_loop
            .submit_answer(&mut session, answer)
            .expect("submit answer");
        if quiz_loop.advance(&mut session).expect("advance") == Advance::ReadyToFinish {
            break;
        }
    }
    quiz_loop.complete(&mut session).expect("complete quiz")
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_without_profile_invites_learner() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Create Profile"), "missing profile link in {html}");
    assert!(html.contains("Play Quizzes"), "missing quiz action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_greets_learner_with_progress() {
    let mut harness = setup_view_harness_with_services(ViewKind::Home, services_with_learner());
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Hi, Ava! 👋"), "missing greeting in {html}");
    assert!(html.contains("Badges earned: 0 of 5"), "missing badge count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quizzes_view_lists_catalog() {
    let mut harness = setup_view_harness(ViewKind::Quizzes);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Animal Friends"), "missing quiz card in {html}");
    assert!(html.contains("Little Scientists"), "missing quiz card in {html}");
    assert!(html.contains("Start Quiz"), "missing start link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn completed_quiz_card_shows_best_score() {
    let services = services_with_learner();
    finish_colors_quiz(&services);
    let mut harness = setup_view_harness_with_services(ViewKind::Quizzes, services);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Best: 100%"), "missing best score in {html}");
    assert!(html.contains("Play Again"), "missing replay link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz("colors-quiz"));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("Orange"), "missing option in {html}");
    assert!(html.contains("Listen"), "missing read aloud button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_result_falls_back_to_latest_result() {
    let services = services_with_learner();
    finish_colors_quiz(&services);
    let mut harness =
        setup_view_harness_with_services(ViewKind::QuizResult("colors-quiz"), services);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("3 out of 3 correct"), "missing score line in {html}");
    assert!(html.contains("Your answer:"), "missing breakdown in {html}");
    assert!(!html.contains("New Badge Earned"), "unexpected badges in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_result_shows_badges_from_fresh_completion() {
    let services = services_with_learner();
    let completion = finish_colors_quiz(&services);
    let mut harness =
        setup_view_harness_with_services(ViewKind::QuizResult("colors-quiz"), services);
    harness.ctx.stash_completion(completion);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("New Badge Earned"), "missing badge section in {html}");
    assert!(html.contains("First Quiz Complete"), "missing badge tile in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_result_without_attempt_is_not_found() {
    let mut harness = setup_view_harness(ViewKind::QuizResult("numbers-quiz"));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Quiz results not found"), "missing fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn videos_view_groups_by_category() {
    let mut harness = setup_view_harness(ViewKind::Videos);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Brain Dev"), "missing section in {html}");
    assert!(html.contains("Inventions"), "missing section in {html}");
    assert!(html.contains("Perfect Paper Airplane"), "missing video card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn video_player_shows_position_and_related_content() {
    let mut harness = setup_view_harness(ViewKind::VideoPlayer("paper-airplane"));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("0:00 / 4:00"), "missing position in {html}");
    assert!(html.contains("Test Your Knowledge"), "missing related quizzes in {html}");
    assert!(html.contains("Little Scientists"), "missing related quiz in {html}");
    assert!(html.contains("You Might Also Like"), "missing related videos in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_view_offers_profile_creation() {
    let mut harness = setup_view_harness(ViewKind::Settings);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Create Your Profile"), "missing form title in {html}");
    assert!(html.contains("Start Learning!"), "missing submit in {html}");
    assert!(html.contains("15 years old"), "missing age options in {html}");
    assert!(html.contains("Español"), "missing language options in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_view_edits_existing_profile() {
    let mut harness =
        setup_view_harness_with_services(ViewKind::Settings, services_with_learner());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Save Changes"), "missing save button in {html}");
    assert!(html.contains("Achievements"), "missing achievements in {html}");
    assert!(
        html.contains("Start completing quizzes and watching videos to earn badges!"),
        "missing empty badge hint in {html}"
    );
}
