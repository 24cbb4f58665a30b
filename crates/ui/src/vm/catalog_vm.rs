use kids_core::model::{Quiz, QuizResult, UserProfile, Video, VideoCategory};

use super::time_fmt::format_time;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub category_label: &'static str,
    pub age_label: &'static str,
    pub difficulty_label: &'static str,
    pub question_count: usize,
    pub completed: bool,
    /// Best score across attempts; `None` before the first attempt.
    pub best_score: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoCardVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub duration_label: String,
    pub category_label: &'static str,
    pub category_icon: &'static str,
    pub age_label: &'static str,
    pub tags: Vec<String>,
    pub watched: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoSectionVm {
    pub category: VideoCategory,
    pub videos: Vec<VideoCardVm>,
}

#[must_use]
pub fn map_quiz_card(
    quiz: &Quiz,
    user: Option<&UserProfile>,
    results: &[QuizResult],
) -> QuizCardVm {
    let best_score = results
        .iter()
        .filter(|result| result.quiz_id() == quiz.id())
        .map(QuizResult::score)
        .max();

    QuizCardVm {
        id: quiz.id().to_string(),
        title: quiz.title().to_string(),
        description: quiz.description().to_string(),
        icon: quiz.icon().to_string(),
        category_label: quiz.category().name(),
        age_label: quiz.age_group().label(),
        difficulty_label: quiz.difficulty().label(),
        question_count: quiz.question_count(),
        completed: user.is_some_and(|user| user.completed_quizzes().contains(quiz.id())),
        best_score,
    }
}

#[must_use]
pub fn map_video_card(video: &Video, user: Option<&UserProfile>) -> VideoCardVm {
    VideoCardVm {
        id: video.id().to_string(),
        title: video.title().to_string(),
        description: video.description().to_string(),
        thumbnail_url: video.thumbnail_url().to_string(),
        duration_label: format_time(video.duration_secs()),
        category_label: video.category().name(),
        category_icon: video.category().icon(),
        age_label: video.age_group().label(),
        tags: video.tags().to_vec(),
        watched: user.is_some_and(|user| user.has_watched(video.id())),
    }
}

/// Group videos by category, keeping category order and catalog order within
/// each group. Empty groups are left out.
#[must_use]
pub fn group_videos_by_category<'a>(
    videos: impl IntoIterator<Item = &'a Video>,
    user: Option<&UserProfile>,
) -> Vec<VideoSectionVm> {
    let mut sections: Vec<VideoSectionVm> = VideoCategory::ALL
        .into_iter()
        .map(|category| VideoSectionVm {
            category,
            videos: Vec::new(),
        })
        .collect();

    for video in videos {
        if let Some(section) = sections
            .iter_mut()
            .find(|section| section.category == video.category())
        {
            section.videos.push(map_video_card(video, user));
        }
    }

    sections.retain(|section| !section.videos.is_empty());
    sections
}

/// "Showing N of M quizzes", plus the search text when there is one.
#[must_use]
pub fn filter_summary(shown: usize, total: usize, noun: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        format!("Showing {shown} of {total} {noun}")
    } else {
        format!("Showing {shown} of {total} {noun} for \"{query}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kids_core::model::{Language, ProfileDraft, QuizId, UserId, VideoId};
    use kids_core::time::fixed_now;
    use kids_core::{Catalog, ProgressStore, VideoFilter};

    fn learner() -> UserProfile {
        ProfileDraft::new("Mia", 5, Language::En)
            .validate()
            .unwrap()
            .assign_id(UserId::generate())
    }

    #[test]
    fn quiz_card_reports_best_score_and_completion() {
        let catalog = Catalog::builtin().unwrap();
        let quiz = catalog.quiz(&QuizId::new("colors-quiz")).unwrap();
        let mut store = ProgressStore::new();
        let user = learner();
        store.create_profile(user.clone());

        for correct in [1, 3, 2] {
            let result = QuizResult::new(
                quiz.id().clone(),
                user.id(),
                3,
                correct,
                fixed_now(),
                chrono::Duration::seconds(30),
                Vec::new(),
            )
            .unwrap();
            store.record_quiz_result(result);
        }

        let card = map_quiz_card(quiz, store.active_user(), store.results());
        assert_eq!(card.title, "Colors & Shapes");
        assert_eq!(card.question_count, 3);
        assert!(card.completed);
        assert_eq!(card.best_score, Some(100));

        let other = catalog.quiz(&QuizId::new("animals-quiz")).unwrap();
        let card = map_quiz_card(other, store.active_user(), store.results());
        assert!(!card.completed);
        assert_eq!(card.best_score, None);
    }

    #[test]
    fn video_card_formats_duration_and_watched_flag() {
        let catalog = Catalog::builtin().unwrap();
        let video = catalog.video(&VideoId::new("paper-airplane")).unwrap();
        let mut store = ProgressStore::new();
        store.create_profile(learner());
        store.mark_video_watched(video.id().clone());

        let card = map_video_card(video, store.active_user());
        assert_eq!(card.duration_label, "4:00");
        assert_eq!(card.category_label, "DIY");
        assert!(card.watched);
        assert!(!map_video_card(video, None).watched);
    }

    #[test]
    fn sections_follow_category_order_and_skip_empty_groups() {
        let catalog = Catalog::builtin().unwrap();
        let filter = VideoFilter {
            query: "paper".to_string(),
            ..VideoFilter::default()
        };

        let all = group_videos_by_category(catalog.videos(), None);
        let categories: Vec<_> = all.iter().map(|section| section.category).collect();
        assert_eq!(
            categories,
            [VideoCategory::BrainDev, VideoCategory::Diy, VideoCategory::Inventions]
        );

        let filtered = group_videos_by_category(catalog.filter_videos(&filter), None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].category, VideoCategory::Diy);
        assert_eq!(filtered[0].videos[0].id, "paper-airplane");
    }

    #[test]
    fn filter_summary_mentions_search_text() {
        assert_eq!(filter_summary(2, 4, "quizzes", ""), "Showing 2 of 4 quizzes");
        assert_eq!(
            filter_summary(1, 7, "videos", " slime "),
            "Showing 1 of 7 videos for \"slime\""
        );
    }
}
