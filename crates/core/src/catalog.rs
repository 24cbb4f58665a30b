use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use crate::model::{
    AgeGroup, BadgeDefinition, Difficulty, Question, Quiz, QuizCategory, QuizDetails, QuizError,
    QuizId, Video, VideoCategory, VideoDraft, VideoError, VideoId, badge_definitions,
};

/// Maximum number of suggestions shown under a video.
pub const RELATED_VIDEO_LIMIT: usize = 3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Video(#[from] VideoError),

    #[error("quiz id {0} is defined more than once")]
    DuplicateQuiz(QuizId),

    #[error("video id {0} is defined more than once")]
    DuplicateVideo(VideoId),
}

//
// ─── FILTERS ───────────────────────────────────────────────────────────────────
//

/// Quiz listing filter. Empty sets match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizFilter {
    pub age_groups: BTreeSet<AgeGroup>,
    pub categories: BTreeSet<QuizCategory>,
}

impl QuizFilter {
    #[must_use]
    pub fn matches(&self, quiz: &Quiz) -> bool {
        (self.age_groups.is_empty() || self.age_groups.contains(&quiz.age_group()))
            && (self.categories.is_empty() || self.categories.contains(&quiz.category()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.age_groups.is_empty() && self.categories.is_empty()
    }
}

/// Video listing filter. Empty sets and a blank query match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub age_groups: BTreeSet<AgeGroup>,
    pub categories: BTreeSet<VideoCategory>,
    pub query: String,
}

impl VideoFilter {
    #[must_use]
    pub fn matches(&self, video: &Video) -> bool {
        let query = self.query.trim().to_lowercase();
        (self.age_groups.is_empty() || self.age_groups.contains(&video.age_group()))
            && (self.categories.is_empty() || self.categories.contains(&video.category()))
            && video.matches_query(&query)
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only content: quizzes, videos and badge definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    quizzes: Vec<Quiz>,
    videos: Vec<Video>,
    badges: Vec<BadgeDefinition>,
}

impl Catalog {
    /// Builds a catalog from already validated content.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if quiz or video ids repeat.
    pub fn new(quizzes: Vec<Quiz>, videos: Vec<Video>) -> Result<Self, CatalogError> {
        let mut quiz_ids = HashSet::with_capacity(quizzes.len());
        for quiz in &quizzes {
            if !quiz_ids.insert(quiz.id()) {
                return Err(CatalogError::DuplicateQuiz(quiz.id().clone()));
            }
        }
        let mut video_ids = HashSet::with_capacity(videos.len());
        for video in &videos {
            if !video_ids.insert(video.id()) {
                return Err(CatalogError::DuplicateVideo(video.id().clone()));
            }
        }

        Ok(Self {
            quizzes,
            videos,
            badges: badge_definitions(),
        })
    }

    /// The bundled learning content.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if any bundled definition fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        let quizzes = builtin_quizzes()?;
        let videos = builtin_videos()
            .into_iter()
            .map(VideoDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(quizzes, videos)
    }

    #[must_use]
    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    #[must_use]
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    #[must_use]
    pub fn badges(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    #[must_use]
    pub fn quiz(&self, id: &QuizId) -> Option<&Quiz> {
        self.quizzes.iter().find(|quiz| quiz.id() == id)
    }

    #[must_use]
    pub fn video(&self, id: &VideoId) -> Option<&Video> {
        self.videos.iter().find(|video| video.id() == id)
    }

    pub fn filter_quizzes<'a>(&'a self, filter: &'a QuizFilter) -> impl Iterator<Item = &'a Quiz> {
        self.quizzes.iter().filter(move |quiz| filter.matches(quiz))
    }

    pub fn filter_videos<'a>(
        &'a self,
        filter: &'a VideoFilter,
    ) -> impl Iterator<Item = &'a Video> {
        self.videos.iter().filter(move |video| filter.matches(video))
    }

    pub fn videos_in_category(&self, category: VideoCategory) -> impl Iterator<Item = &Video> {
        self.videos
            .iter()
            .filter(move |video| video.category() == category)
    }

    /// Quizzes a video links to, in the video's order. Unknown ids are skipped.
    #[must_use]
    pub fn related_quizzes(&self, video: &Video) -> Vec<&Quiz> {
        video
            .related_quizzes()
            .iter()
            .filter_map(|id| self.quiz(id))
            .collect()
    }

    /// Other videos sharing category, age group or any tag, in catalog order.
    #[must_use]
    pub fn related_videos(&self, video: &Video) -> Vec<&Video> {
        self.videos
            .iter()
            .filter(|other| other.id() != video.id())
            .filter(|other| {
                other.category() == video.category()
                    || other.age_group() == video.age_group()
                    || other.shares_tag_with(video)
            })
            .take(RELATED_VIDEO_LIMIT)
            .collect()
    }
}

//
// ─── BUNDLED CONTENT ───────────────────────────────────────────────────────────
//

fn details(
    id: &str,
    title: &str,
    category: QuizCategory,
    description: &str,
    age_group: AgeGroup,
    difficulty: Difficulty,
    icon: &str,
) -> QuizDetails {
    QuizDetails {
        id: QuizId::new(id),
        title: title.to_string(),
        category,
        description: description.to_string(),
        age_group,
        difficulty,
        icon: icon.to_string(),
    }
}

fn builtin_quizzes() -> Result<Vec<Quiz>, QuizError> {
    Ok(vec![
        Quiz::new(
            details(
                "colors-quiz",
                "Colors & Shapes",
                QuizCategory::BasicLearning,
                "Learn about colors and basic shapes",
                AgeGroup::Preschool,
                Difficulty::Easy,
                "🎨",
            ),
            vec![
                Question::multiple_choice(
                    "q1",
                    "What color do you get when you mix red and yellow?",
                    ["Orange", "Purple", "Green", "Blue"],
                    "Orange",
                )
                .with_explanation("Red and yellow make orange!"),
                Question::multiple_choice(
                    "q2",
                    "How many sides does a triangle have?",
                    ["2", "3", "4", "5"],
                    "3",
                )
                .with_explanation("A triangle has 3 sides!"),
                Question::voice("q3", "What shape is a ball?", "circle")
                    .with_explanation("A ball is round like a circle!"),
            ],
        )?,
        Quiz::new(
            details(
                "animals-quiz",
                "Animal Friends",
                QuizCategory::Nature,
                "Learn about different animals",
                AgeGroup::Preschool,
                Difficulty::Easy,
                "🦁",
            ),
            vec![
                Question::voice("q1", "What sound does a cow make?", "moo")
                    .with_explanation("Cows say moo!"),
                Question::multiple_choice(
                    "q2",
                    "Which animal is known as the king of the jungle?",
                    ["Tiger", "Lion", "Elephant", "Monkey"],
                    "Lion",
                )
                .with_explanation("The lion is called the king of the jungle!"),
                Question::multiple_choice(
                    "q3",
                    "How many legs does a spider have?",
                    ["6", "8", "10", "4"],
                    "8",
                )
                .with_explanation("Spiders have 8 legs!"),
            ],
        )?,
        Quiz::new(
            details(
                "numbers-quiz",
                "Fun with Numbers",
                QuizCategory::Math,
                "Basic counting and numbers",
                AgeGroup::Preschool,
                Difficulty::Easy,
                "🔢",
            ),
            vec![
                Question::multiple_choice("q1", "What comes after 5?", ["4", "6", "7", "3"], "6")
                    .with_explanation("After 5 comes 6!"),
                Question::voice("q2", "How many fingers do you have on one hand?", "five")
                    .with_explanation("You have 5 fingers on one hand!"),
                Question::multiple_choice("q3", "What is 2 + 2?", ["3", "4", "5", "6"], "4")
                    .with_explanation("2 + 2 = 4!"),
            ],
        )?,
        Quiz::new(
            details(
                "science-quiz",
                "Little Scientists",
                QuizCategory::Science,
                "Fun science facts for kids",
                AgeGroup::School,
                Difficulty::Medium,
                "🔬",
            ),
            vec![
                Question::multiple_choice(
                    "q1",
                    "What do plants need to grow?",
                    ["Water and sunlight", "Only water", "Only sunlight", "Nothing"],
                    "Water and sunlight",
                )
                .with_explanation("Plants need water and sunlight to grow!"),
                Question::multiple_choice(
                    "q2",
                    "How many planets are in our solar system?",
                    ["7", "8", "9", "10"],
                    "8",
                )
                .with_explanation("There are 8 planets in our solar system!"),
                Question::voice("q3", "What is the fastest land animal?", "cheetah")
                    .with_explanation("The cheetah is the fastest land animal!"),
            ],
        )?,
    ])
}

fn youtube(id: &str) -> (String, String) {
    (
        format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"),
        format!("https://www.youtube.com/embed/{id}?autoplay=1&rel=0&modestbranding=1"),
    )
}

#[allow(clippy::too_many_arguments)]
fn video(
    id: &str,
    title: &str,
    description: &str,
    duration_secs: u32,
    category: VideoCategory,
    age_group: AgeGroup,
    youtube_id: &str,
    related_quiz: &str,
    tags: [&str; 3],
) -> VideoDraft {
    let (thumbnail_url, video_url) = youtube(youtube_id);
    VideoDraft {
        id: VideoId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        duration_secs,
        category,
        age_group,
        thumbnail_url,
        video_url,
        related_quizzes: vec![QuizId::new(related_quiz)],
        tags: tags.into_iter().map(str::to_string).collect(),
    }
}

fn builtin_videos() -> Vec<VideoDraft> {
    vec![
        video(
            "colors-video",
            "Learning Colors with Fun",
            "A colorful adventure learning about different colors",
            300,
            VideoCategory::BrainDev,
            AgeGroup::Preschool,
            "tkJDkZdtSjk",
            "colors-quiz",
            ["colors", "basic learning", "fun"],
        ),
        video(
            "animals-video",
            "Animal Safari Adventure",
            "Explore the wild and learn about amazing animals",
            420,
            VideoCategory::BrainDev,
            AgeGroup::Preschool,
            "hFZFjoX2cGg",
            "animals-quiz",
            ["animals", "nature", "safari"],
        ),
        video(
            "numbers-video",
            "Counting Fun with Numbers",
            "Learn to count from 1 to 10 with fun activities",
            360,
            VideoCategory::BrainDev,
            AgeGroup::Preschool,
            "DR-cfDsHCGA",
            "numbers-quiz",
            ["numbers", "counting", "math"],
        ),
        video(
            "diy-slime",
            "Make Your Own Slime",
            "Easy DIY slime recipe for kids",
            480,
            VideoCategory::Diy,
            AgeGroup::School,
            "1HVfHLULaZE",
            "science-quiz",
            ["DIY", "slime", "experiment"],
        ),
        video(
            "paper-airplane",
            "Perfect Paper Airplane",
            "Learn to fold the perfect paper airplane",
            240,
            VideoCategory::Diy,
            AgeGroup::School,
            "JV2aMbGtmZE",
            "science-quiz",
            ["DIY", "paper airplane", "craft"],
        ),
        video(
            "solar-system",
            "Journey Through Space",
            "Explore planets and learn about our solar system",
            600,
            VideoCategory::BrainDev,
            AgeGroup::School,
            "libKVRa01L8",
            "science-quiz",
            ["space", "planets", "science"],
        ),
        video(
            "inventions-video",
            "Amazing Kid Inventions",
            "Discover incredible inventions made by kids",
            540,
            VideoCategory::Inventions,
            AgeGroup::School,
            "J7S6FZA8FPo",
            "science-quiz",
            ["inventions", "creativity", "innovation"],
        ),
    ]
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn video_ids<'a>(videos: impl IntoIterator<Item = &'a Video>) -> Vec<&'a str> {
        videos.into_iter().map(|video| video.id().as_str()).collect()
    }

    #[test]
    fn builtin_content_is_complete() {
        let catalog = catalog();
        assert_eq!(catalog.quizzes().len(), 4);
        assert_eq!(catalog.videos().len(), 7);
        assert_eq!(catalog.badges().len(), 5);
        for quiz in catalog.quizzes() {
            assert_eq!(quiz.question_count(), 3);
            assert_eq!(quiz.questions().iter().filter(|q| q.is_voice()).count(), 1);
        }
    }

    #[test]
    fn lookups_by_id() {
        let catalog = catalog();
        let quiz = catalog.quiz(&QuizId::new("colors-quiz")).unwrap();
        assert_eq!(quiz.title(), "Colors & Shapes");
        assert!(catalog.quiz(&QuizId::new("history-quiz")).is_none());
        assert_eq!(
            catalog.video(&VideoId::new("solar-system")).unwrap().duration_secs(),
            600
        );
    }

    #[test]
    fn quiz_filter_uses_set_membership() {
        let catalog = catalog();
        let mut filter = QuizFilter::default();
        assert_eq!(catalog.filter_quizzes(&filter).count(), 4);

        filter.age_groups.insert(AgeGroup::School);
        let found: Vec<_> = catalog.filter_quizzes(&filter).map(Quiz::id).collect();
        assert_eq!(found, [&QuizId::new("science-quiz")]);

        filter.age_groups.clear();
        filter.categories.insert(QuizCategory::Math);
        filter.categories.insert(QuizCategory::Nature);
        assert_eq!(catalog.filter_quizzes(&filter).count(), 2);
    }

    #[test]
    fn video_search_matches_title_description_and_tags() {
        let catalog = catalog();
        let filter = VideoFilter {
            query: "  Planets ".to_string(),
            ..VideoFilter::default()
        };
        assert_eq!(video_ids(catalog.filter_videos(&filter)), ["solar-system"]);

        let filter = VideoFilter {
            categories: BTreeSet::from([VideoCategory::Diy]),
            query: "slime".to_string(),
            ..VideoFilter::default()
        };
        assert_eq!(video_ids(catalog.filter_videos(&filter)), ["diy-slime"]);
    }

    #[test]
    fn related_videos_exclude_self_and_cap_at_three() {
        let catalog = catalog();
        let video = catalog.video(&VideoId::new("paper-airplane")).unwrap();
        let related = catalog.related_videos(video);
        assert_eq!(related.len(), RELATED_VIDEO_LIMIT);
        assert!(related.iter().all(|other| other.id() != video.id()));
        assert_eq!(
            video_ids(related),
            ["diy-slime", "solar-system", "inventions-video"]
        );
    }

    #[test]
    fn related_quizzes_follow_video_links() {
        let catalog = catalog();
        let video = catalog.video(&VideoId::new("animals-video")).unwrap();
        let quizzes = catalog.related_quizzes(video);
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].title(), "Animal Friends");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let catalog = catalog();
        let mut quizzes = catalog.quizzes().to_vec();
        quizzes.push(quizzes[0].clone());
        let err = Catalog::new(quizzes, Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateQuiz(QuizId::new("colors-quiz")));
    }

    #[test]
    fn videos_in_category() {
        let catalog = catalog();
        assert_eq!(catalog.videos_in_category(VideoCategory::BrainDev).count(), 4);
        assert_eq!(catalog.videos_in_category(VideoCategory::Inventions).count(), 1);
    }
}
