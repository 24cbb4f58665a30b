mod age;
mod badge;
mod ids;
mod quiz;
mod result;
mod user;
mod video;

pub use age::{AgeGroup, Language, UnknownVariant};
pub use badge::{
    BadgeDefinition, BadgeRule, BadgeStatus, ProgressCounts, badge_definitions, satisfied_badges,
};
pub use ids::{BadgeId, ParseIdError, QuestionId, QuizId, UserId, VideoId};
pub use quiz::{Difficulty, Question, QuestionKind, Quiz, QuizCategory, QuizDetails, QuizError};
pub use result::{QuizAnswer, QuizResult, QuizResultError, percentage_score};
pub use user::{
    MAX_PROFILE_AGE, MIN_PROFILE_AGE, ProfileDraft, ProfileError, UserProfile, ValidatedProfile,
};
pub use video::{Video, VideoCategory, VideoDraft, VideoError, WATCHED_THRESHOLD_PERCENT};
