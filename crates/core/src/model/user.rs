use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::age::{AgeGroup, Language};
use crate::model::ids::{BadgeId, QuizId, UserId, VideoId};

/// Ages offered by the profile form.
pub const MIN_PROFILE_AGE: u8 = 1;
pub const MAX_PROFILE_AGE: u8 = 15;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("profile name cannot be empty")]
    EmptyName,

    #[error("age must be between 1 and 15, got {0}")]
    InvalidAge(u8),
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated profile input as collected by the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub age: u8,
    pub language: Language,
}

impl ProfileDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, age: u8, language: Language) -> Self {
        Self {
            name: name.into(),
            age,
            language,
        }
    }

    /// Validates the draft and derives the age bracket.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyName` for a blank name and
    /// `ProfileError::InvalidAge` when the age is outside the offered range.
    pub fn validate(self) -> Result<ValidatedProfile, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if !(MIN_PROFILE_AGE..=MAX_PROFILE_AGE).contains(&self.age) {
            return Err(ProfileError::InvalidAge(self.age));
        }

        Ok(ValidatedProfile {
            name: name.to_string(),
            age: self.age,
            age_group: AgeGroup::for_age(self.age),
            language: self.language,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProfile {
    name: String,
    age: u8,
    age_group: AgeGroup,
    language: Language,
}

impl ValidatedProfile {
    /// Turns the validated details into a fresh profile with no progress.
    #[must_use]
    pub fn assign_id(self, id: UserId) -> UserProfile {
        UserProfile {
            id,
            name: self.name,
            age: self.age,
            age_group: self.age_group,
            language: self.language,
            completed_quizzes: Vec::new(),
            completed_videos: Vec::new(),
            total_score: 0,
            badges: Vec::new(),
        }
    }
}

//
// ─── PROFILE ───────────────────────────────────────────────────────────────────
//

/// The active child's identity and accumulated progress.
///
/// Progress fields are only changed through [`crate::ProgressStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: String,
    age: u8,
    age_group: AgeGroup,
    language: Language,
    completed_quizzes: Vec<QuizId>,
    completed_videos: Vec<VideoId>,
    total_score: u32,
    badges: Vec<BadgeId>,
}

impl UserProfile {
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn age(&self) -> u8 {
        self.age
    }

    #[must_use]
    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Quiz ids in completion order; repeated attempts appear repeatedly.
    #[must_use]
    pub fn completed_quizzes(&self) -> &[QuizId] {
        &self.completed_quizzes
    }

    #[must_use]
    pub fn completed_videos(&self) -> &[VideoId] {
        &self.completed_videos
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    #[must_use]
    pub fn badges(&self) -> &[BadgeId] {
        &self.badges
    }

    #[must_use]
    pub fn has_badge(&self, id: &BadgeId) -> bool {
        self.badges.contains(id)
    }

    #[must_use]
    pub fn has_watched(&self, id: &VideoId) -> bool {
        self.completed_videos.contains(id)
    }

    /// Replaces identity details, keeping progress untouched.
    pub fn apply_details(&mut self, details: ValidatedProfile) {
        self.name = details.name;
        self.age = details.age;
        self.age_group = details.age_group;
        self.language = details.language;
    }

    pub(crate) fn push_completed_quiz(&mut self, quiz_id: QuizId, score: u32) {
        self.completed_quizzes.push(quiz_id);
        self.total_score = self.total_score.saturating_add(score);
    }

    pub(crate) fn insert_completed_video(&mut self, video_id: VideoId) -> bool {
        if self.completed_videos.contains(&video_id) {
            return false;
        }
        self.completed_videos.push(video_id);
        true
    }

    pub(crate) fn insert_badge(&mut self, badge_id: BadgeId) -> bool {
        if self.badges.contains(&badge_id) {
            return false;
        }
        self.badges.push(badge_id);
        true
    }
}
