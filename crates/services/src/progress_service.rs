use std::sync::{Arc, Mutex, MutexGuard};

use kids_core::ProgressStore;
use kids_core::model::{
    BadgeId, BadgeStatus, ProfileDraft, ProgressCounts, QuizId, QuizResult, UserId, UserProfile,
    VideoId,
};
use tracing::{debug, info};

use crate::error::ProgressError;

/// Point-in-time copy of learner progress for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub user: Option<UserProfile>,
    pub counts: ProgressCounts,
    pub badges: Vec<BadgeStatus>,
    pub results: Vec<QuizResult>,
    pub current_quiz: Option<QuizId>,
    pub current_video: Option<VideoId>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn earned_badge_count(&self) -> usize {
        self.badges.iter().filter(|status| status.earned).count()
    }
}

/// Shared owner of the progress store.
///
/// Every operation takes the lock once, so each mutation is atomic with
/// respect to readers.
#[derive(Debug, Clone, Default)]
pub struct ProgressService {
    state: Arc<Mutex<ProgressStore>>,
}

impl ProgressService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, ProgressStore>, ProgressError> {
        self.state
            .lock()
            .map_err(|e| ProgressError::Unavailable(e.to_string()))
    }

    //
    // ─── PROFILE ───────────────────────────────────────────────────────────────
    //

    /// Validate `draft` and make it the active profile.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Profile` if the draft is invalid.
    pub fn create_profile(&self, draft: ProfileDraft) -> Result<UserProfile, ProgressError> {
        let profile = draft.validate()?.assign_id(UserId::generate());
        self.state()?.create_profile(profile.clone());
        info!(
            user = %profile.id(),
            age_group = profile.age_group().id(),
            language = profile.language().code(),
            "profile created"
        );
        Ok(profile)
    }

    /// Apply edited name, age and language to the active profile.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::NoActiveUser` without a profile, or
    /// `ProgressError::Profile` if the draft is invalid.
    pub fn update_profile(&self, draft: ProfileDraft) -> Result<UserProfile, ProgressError> {
        let details = draft.validate()?;
        let mut state = self.state()?;
        if !state.update_profile(details) {
            return Err(ProgressError::NoActiveUser);
        }
        let profile = state
            .active_user()
            .cloned()
            .ok_or(ProgressError::NoActiveUser)?;
        info!(user = %profile.id(), "profile updated");
        Ok(profile)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn clear_profile(&self) -> Result<Option<UserProfile>, ProgressError> {
        let cleared = self.state()?.clear_profile();
        if let Some(profile) = &cleared {
            info!(user = %profile.id(), "profile cleared");
        }
        Ok(cleared)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn active_user(&self) -> Result<Option<UserProfile>, ProgressError> {
        Ok(self.state()?.active_user().cloned())
    }

    //
    // ─── PROGRESS ──────────────────────────────────────────────────────────────
    //

    /// Record a finished attempt and return the badges it unlocked.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn record_quiz_result(&self, result: QuizResult) -> Result<Vec<BadgeId>, ProgressError> {
        let quiz_id = result.quiz_id().clone();
        let score = result.score();
        let mut state = self.state()?;
        let awarded = state.record_quiz_result(result);
        info!(
            quiz = %quiz_id,
            score,
            total_score = state.total_score(),
            new_badges = awarded.len(),
            "quiz result recorded"
        );
        Ok(awarded)
    }

    /// Returns `true` the first time a video is marked for the active user.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn mark_video_watched(&self, video_id: VideoId) -> Result<bool, ProgressError> {
        let newly = self.state()?.mark_video_watched(video_id.clone());
        if newly {
            info!(video = %video_id, "video watched");
        } else {
            debug!(video = %video_id, "video already watched or no active profile");
        }
        Ok(newly)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn award_badge(&self, badge_id: BadgeId) -> Result<bool, ProgressError> {
        let newly = self.state()?.award_badge(badge_id.clone());
        if newly {
            info!(badge = %badge_id, "badge awarded");
        }
        Ok(newly)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn check_and_award_badges(&self) -> Result<Vec<BadgeId>, ProgressError> {
        Ok(self.state()?.check_and_award_badges())
    }

    //
    // ─── CURRENT CONTENT ───────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn set_current_quiz(&self, quiz_id: QuizId) -> Result<(), ProgressError> {
        self.state()?.set_current_quiz(quiz_id);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn clear_current_quiz(&self) -> Result<(), ProgressError> {
        self.state()?.clear_current_quiz();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn set_current_video(&self, video_id: VideoId) -> Result<(), ProgressError> {
        self.state()?.set_current_video(video_id);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn clear_current_video(&self) -> Result<(), ProgressError> {
        self.state()?.clear_current_video();
        Ok(())
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn snapshot(&self) -> Result<ProgressSnapshot, ProgressError> {
        let state = self.state()?;
        Ok(ProgressSnapshot {
            user: state.active_user().cloned(),
            counts: state.counts(),
            badges: state.badge_statuses(),
            results: state.results().to_vec(),
            current_quiz: state.current_quiz().cloned(),
            current_video: state.current_video().cloned(),
        })
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn counts(&self) -> Result<ProgressCounts, ProgressError> {
        Ok(self.state()?.counts())
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn earned_badges(&self) -> Result<Vec<BadgeId>, ProgressError> {
        Ok(self.state()?.earned_badges().to_vec())
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn latest_result_for(&self, quiz_id: &QuizId) -> Result<Option<QuizResult>, ProgressError> {
        Ok(self.state()?.latest_result_for(quiz_id).cloned())
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Unavailable` if the state lock is poisoned.
    pub fn best_score_for(&self, quiz_id: &QuizId) -> Result<Option<u32>, ProgressError> {
        Ok(self.state()?.best_score_for(quiz_id))
    }
}
