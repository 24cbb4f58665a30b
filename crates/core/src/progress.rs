use crate::model::{
    BadgeDefinition, BadgeId, BadgeStatus, ProgressCounts, QuizId, QuizResult, UserProfile,
    ValidatedProfile, VideoId, badge_definitions, satisfied_badges,
};

/// Learner state for one running application.
///
/// Holds the active profile, the quiz result history and the content the
/// learner is currently looking at. All mutations are synchronous; callers
/// that share the store wrap it in a lock.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    user: Option<UserProfile>,
    results: Vec<QuizResult>,
    current_quiz: Option<QuizId>,
    current_video: Option<VideoId>,
    badges: Vec<BadgeDefinition>,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: None,
            results: Vec::new(),
            current_quiz: None,
            current_video: None,
            badges: badge_definitions(),
        }
    }

    //
    // ─── PROFILE ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn active_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Makes `profile` the active user, replacing any previous one.
    pub fn create_profile(&mut self, profile: UserProfile) {
        self.user = Some(profile);
    }

    /// Applies edited details to the active user, keeping its progress.
    ///
    /// Returns `false` when no user is active.
    pub fn update_profile(&mut self, details: ValidatedProfile) -> bool {
        match self.user.as_mut() {
            Some(user) => {
                user.apply_details(details);
                true
            }
            None => false,
        }
    }

    /// Drops the active user. Result history is kept.
    pub fn clear_profile(&mut self) -> Option<UserProfile> {
        self.user.take()
    }

    //
    // ─── CURRENT CONTENT ───────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn current_quiz(&self) -> Option<&QuizId> {
        self.current_quiz.as_ref()
    }

    pub fn set_current_quiz(&mut self, quiz_id: QuizId) {
        self.current_quiz = Some(quiz_id);
    }

    pub fn clear_current_quiz(&mut self) {
        self.current_quiz = None;
    }

    #[must_use]
    pub fn current_video(&self) -> Option<&VideoId> {
        self.current_video.as_ref()
    }

    pub fn set_current_video(&mut self, video_id: VideoId) {
        self.current_video = Some(video_id);
    }

    pub fn clear_current_video(&mut self) {
        self.current_video = None;
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    /// Appends `result` to the history and credits the active user.
    ///
    /// Returns the badges newly earned by the evaluation that follows.
    pub fn record_quiz_result(&mut self, result: QuizResult) -> Vec<BadgeId> {
        if let Some(user) = self.user.as_mut() {
            user.push_completed_quiz(result.quiz_id().clone(), result.score());
        }
        self.results.push(result);
        self.check_and_award_badges()
    }

    /// Adds `video_id` to the active user's watched set.
    ///
    /// Returns `true` only the first time a video is marked.
    pub fn mark_video_watched(&mut self, video_id: VideoId) -> bool {
        self.user
            .as_mut()
            .is_some_and(|user| user.insert_completed_video(video_id))
    }

    /// Returns `true` if the badge was newly added to the active user.
    pub fn award_badge(&mut self, badge_id: BadgeId) -> bool {
        self.user
            .as_mut()
            .is_some_and(|user| user.insert_badge(badge_id))
    }

    /// Awards every badge whose threshold currently holds.
    ///
    /// Earned badges are never removed. Returns the newly awarded ids in
    /// table order.
    pub fn check_and_award_badges(&mut self) -> Vec<BadgeId> {
        let Some(user) = self.user.as_mut() else {
            return Vec::new();
        };
        let counts = ProgressCounts {
            completed_quizzes: user.completed_quizzes().len(),
            total_score: user.total_score(),
            completed_videos: user.completed_videos().len(),
        };

        satisfied_badges(&self.badges, counts)
            .into_iter()
            .filter(|badge_id| user.insert_badge(badge_id.clone()))
            .collect()
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn counts(&self) -> ProgressCounts {
        ProgressCounts {
            completed_quizzes: self.completed_quizzes().len(),
            total_score: self.total_score(),
            completed_videos: self.completed_videos().len(),
        }
    }

    #[must_use]
    pub fn completed_quizzes(&self) -> &[QuizId] {
        self.user.as_ref().map_or(&[][..], UserProfile::completed_quizzes)
    }

    #[must_use]
    pub fn completed_videos(&self) -> &[VideoId] {
        self.user.as_ref().map_or(&[][..], UserProfile::completed_videos)
    }

    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.user.as_ref().map_or(0, UserProfile::total_score)
    }

    #[must_use]
    pub fn earned_badges(&self) -> &[BadgeId] {
        self.user.as_ref().map_or(&[][..], UserProfile::badges)
    }

    /// Every badge definition paired with whether the active user holds it.
    #[must_use]
    pub fn badge_statuses(&self) -> Vec<BadgeStatus> {
        let earned = self.earned_badges();
        self.badges
            .iter()
            .map(|definition| BadgeStatus {
                earned: earned.contains(&definition.id),
                definition: definition.clone(),
            })
            .collect()
    }

    #[must_use]
    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    /// Results for one quiz, oldest first.
    pub fn results_for<'a, 'q>(
        &'a self,
        quiz_id: &'q QuizId,
    ) -> impl Iterator<Item = &'a QuizResult> + use<'a, 'q> {
        self.results
            .iter()
            .filter(move |result| result.quiz_id() == quiz_id)
    }

    #[must_use]
    pub fn latest_result_for(&self, quiz_id: &QuizId) -> Option<&QuizResult> {
        self.results.iter().rev().find(|result| result.quiz_id() == quiz_id)
    }

    #[must_use]
    pub fn best_score_for(&self, quiz_id: &QuizId) -> Option<u32> {
        self.results_for(quiz_id).map(QuizResult::score).max()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
