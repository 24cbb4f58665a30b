use kids_core::model::{
    AgeGroup, BadgeId, BadgeStatus, Language, ProfileDraft, ProfileError, UserProfile,
};
use services::{ProgressError, ProgressSnapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearnerVm {
    pub name: String,
    pub age: u8,
    pub age_group: AgeGroup,
    pub language_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeVm {
    pub id: BadgeId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub learner: Option<LearnerVm>,
    pub total_score: u32,
    pub completed_quizzes: usize,
    pub completed_videos: usize,
    pub badges: Vec<BadgeVm>,
}

impl ProgressVm {
    #[must_use]
    pub fn earned_badges(&self) -> impl Iterator<Item = &BadgeVm> {
        self.badges.iter().filter(|badge| badge.earned)
    }

    #[must_use]
    pub fn earned_count(&self) -> usize {
        self.earned_badges().count()
    }
}

impl From<&BadgeStatus> for BadgeVm {
    fn from(status: &BadgeStatus) -> Self {
        Self {
            id: status.definition.id.clone(),
            name: status.definition.name,
            icon: status.definition.icon,
            description: status.definition.description,
            earned: status.earned,
        }
    }
}

#[must_use]
pub fn map_progress(snapshot: &ProgressSnapshot) -> ProgressVm {
    ProgressVm {
        learner: snapshot.user.as_ref().map(|user| LearnerVm {
            name: user.name().to_string(),
            age: user.age(),
            age_group: user.age_group(),
            language_label: user.language().label(),
        }),
        total_score: snapshot.counts.total_score,
        completed_quizzes: snapshot.counts.completed_quizzes,
        completed_videos: snapshot.counts.completed_videos,
        badges: snapshot.badges.iter().map(BadgeVm::from).collect(),
    }
}

/// `"1 year old"` / `"7 years old"`.
#[must_use]
pub fn age_label(age: u8) -> String {
    if age == 1 {
        "1 year old".to_string()
    } else {
        format!("{age} years old")
    }
}

/// Editable copy of the profile form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileFormVm {
    pub name: String,
    pub age: u8,
    pub language: Language,
}

impl ProfileFormVm {
    /// Blank form for a new learner.
    #[must_use]
    pub fn blank(language: Language) -> Self {
        Self {
            name: String::new(),
            age: DEFAULT_FORM_AGE,
            language,
        }
    }

    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name().to_string(),
            age: profile.age(),
            language: profile.language(),
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
    }

    #[must_use]
    pub fn to_draft(&self) -> ProfileDraft {
        ProfileDraft::new(self.name.clone(), self.age, self.language)
    }
}

const DEFAULT_FORM_AGE: u8 = 7;

/// Child-friendly text for a failed profile save.
#[must_use]
pub fn profile_notice(err: &ProgressError) -> &'static str {
    match err {
        ProgressError::Profile(ProfileError::EmptyName) => "Please tell us your name!",
        ProgressError::Profile(ProfileError::InvalidAge(_)) => "Please pick an age from the list.",
        ProgressError::NoActiveUser => "Create a profile first.",
        _ => "We couldn't save your profile. Please try again.",
    }
}
