use kids_core::model::{BadgeId, Language, ProfileDraft, QuizId, QuizResult, UserId, VideoId};
use kids_core::time::fixed_now;
use services::{AppServices, Clock, PlaybackEvent, SpeechEngines, VideoServiceError};

fn services_with_profile() -> AppServices {
    let services = AppServices::in_memory(
        Clock::fixed(fixed_now()),
        Language::En,
        SpeechEngines::unsupported(),
    )
    .unwrap();
    services
        .progress()
        .create_profile(ProfileDraft::new("Noah", 7, Language::En))
        .unwrap();
    services
}

fn result(correct: u32, total: u32) -> QuizResult {
    QuizResult::new(
        QuizId::new("numbers-quiz"),
        UserId::generate(),
        total,
        correct,
        fixed_now(),
        chrono::Duration::seconds(30),
        Vec::new(),
    )
    .unwrap()
}

#[test]
fn high_scorer_after_sixty_then_forty() {
    let services = services_with_profile();
    let progress = services.progress();

    let first = progress.record_quiz_result(result(3, 5)).unwrap();
    assert_eq!(first, [BadgeId::new("first-quiz")]);

    let second = progress.record_quiz_result(result(2, 5)).unwrap();
    assert_eq!(second, [BadgeId::new("high-scorer")]);
    assert_eq!(progress.counts().unwrap().total_score, 100);
}

#[test]
fn watching_a_video_to_the_threshold_marks_it_once() {
    let services = services_with_profile();
    let videos = services.videos();
    let video_id = VideoId::new("paper-airplane");

    let (video, mut playback) = videos.open(&video_id).unwrap();
    assert_eq!(video.duration_secs(), 240);
    playback.toggle();

    let mut marked = 0;
    loop {
        match playback.tick() {
            PlaybackEvent::ReachedWatchThreshold(position) => {
                assert_eq!(position, 192);
                if videos.mark_watched(&video_id).unwrap() {
                    marked += 1;
                }
            }
            PlaybackEvent::Ended | PlaybackEvent::Idle => break,
            PlaybackEvent::Advanced(_) => {}
        }
    }
    assert!(!videos.mark_watched(&video_id).unwrap());
    assert_eq!(marked, 1);

    let snapshot = services.progress().snapshot().unwrap();
    assert_eq!(snapshot.counts.completed_videos, 1);
    assert_eq!(snapshot.current_video, Some(video_id));
    // Watching alone does not evaluate badges.
    assert_eq!(snapshot.earned_badge_count(), 0);
}

#[test]
fn unknown_video_is_not_found() {
    let services = services_with_profile();
    let err = services.videos().open(&VideoId::new("missing")).unwrap_err();
    assert!(matches!(err, VideoServiceError::NotFound(_)));
}

#[test]
fn learning_star_needs_quizzes_and_videos() {
    let services = services_with_profile();
    let progress = services.progress();
    for id in ["colors-video", "animals-video", "numbers-video"] {
        progress.mark_video_watched(VideoId::new(id)).unwrap();
    }
    for _ in 0..4 {
        progress.record_quiz_result(result(0, 3)).unwrap();
    }
    assert!(!progress.earned_badges().unwrap().contains(&BadgeId::new("learning-star")));

    let awarded = progress.record_quiz_result(result(0, 3)).unwrap();
    assert_eq!(awarded, [BadgeId::new("learning-star")]);
}
