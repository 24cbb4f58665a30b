use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::model::age::{AgeGroup, UnknownVariant};
use crate::model::ids::{QuizId, VideoId};

/// Share of the nominal duration that counts as "watched", in percent.
pub const WATCHED_THRESHOLD_PERCENT: u32 = 80;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VideoError {
    #[error("video title cannot be empty")]
    EmptyTitle,

    #[error("video {0} must have a positive duration")]
    ZeroDuration(VideoId),

    #[error("invalid {field} url: {raw}")]
    InvalidUrl { field: &'static str, raw: String },
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoCategory {
    BrainDev,
    Diy,
    Inventions,
}

impl VideoCategory {
    pub const ALL: [VideoCategory; 3] = [
        VideoCategory::BrainDev,
        VideoCategory::Diy,
        VideoCategory::Inventions,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            VideoCategory::BrainDev => "brain-dev",
            VideoCategory::Diy => "diy",
            VideoCategory::Inventions => "inventions",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            VideoCategory::BrainDev => "Brain Dev",
            VideoCategory::Diy => "DIY",
            VideoCategory::Inventions => "Inventions",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            VideoCategory::BrainDev => "🧠",
            VideoCategory::Diy => "🔨",
            VideoCategory::Inventions => "💡",
        }
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VideoCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoCategory::ALL
            .into_iter()
            .find(|category| category.id() == s.trim())
            .ok_or_else(|| UnknownVariant::new("video category", s))
    }
}

//
// ─── VIDEO ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated video definition as written in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDraft {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub duration_secs: u32,
    pub category: VideoCategory,
    pub age_group: AgeGroup,
    pub thumbnail_url: String,
    pub video_url: String,
    pub related_quizzes: Vec<QuizId>,
    pub tags: Vec<String>,
}

impl VideoDraft {
    /// # Errors
    ///
    /// Returns `VideoError` for a blank title, zero duration, or unparsable URLs.
    pub fn validate(self) -> Result<Video, VideoError> {
        if self.title.trim().is_empty() {
            return Err(VideoError::EmptyTitle);
        }
        if self.duration_secs == 0 {
            return Err(VideoError::ZeroDuration(self.id));
        }
        let thumbnail_url = parse_url("thumbnail", &self.thumbnail_url)?;
        let video_url = parse_url("video", &self.video_url)?;

        Ok(Video {
            id: self.id,
            title: self.title,
            description: self.description,
            duration_secs: self.duration_secs,
            category: self.category,
            age_group: self.age_group,
            thumbnail_url,
            video_url,
            related_quizzes: self.related_quizzes,
            tags: self.tags,
        })
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, VideoError> {
    let url = Url::parse(raw).map_err(|_| VideoError::InvalidUrl {
        field,
        raw: raw.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(VideoError::InvalidUrl {
            field,
            raw: raw.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    id: VideoId,
    title: String,
    description: String,
    duration_secs: u32,
    category: VideoCategory,
    age_group: AgeGroup,
    thumbnail_url: Url,
    video_url: Url,
    related_quizzes: Vec<QuizId>,
    tags: Vec<String>,
}

impl Video {
    #[must_use]
    pub fn id(&self) -> &VideoId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn category(&self) -> VideoCategory {
        self.category
    }

    #[must_use]
    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> &Url {
        &self.thumbnail_url
    }

    /// Embed URL handed to the external player.
    #[must_use]
    pub fn video_url(&self) -> &Url {
        &self.video_url
    }

    #[must_use]
    pub fn related_quizzes(&self) -> &[QuizId] {
        &self.related_quizzes
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Playback position (seconds) at which the video counts as watched.
    #[must_use]
    pub fn watch_threshold_secs(&self) -> u32 {
        // ceil(duration * 80 / 100)
        let scaled = u64::from(self.duration_secs) * u64::from(WATCHED_THRESHOLD_PERCENT);
        u32::try_from(scaled.div_ceil(100)).unwrap_or(self.duration_secs)
    }

    #[must_use]
    pub fn is_watched_at(&self, position_secs: u32) -> bool {
        position_secs >= self.watch_threshold_secs()
    }

    #[must_use]
    pub fn shares_tag_with(&self, other: &Video) -> bool {
        self.tags.iter().any(|tag| other.tags.contains(tag))
    }

    /// Case-insensitive match against title, description and tags.
    ///
    /// `query` must already be lower-cased.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(query)
            || self.description.to_lowercase().contains(query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(duration_secs: u32) -> VideoDraft {
        VideoDraft {
            id: VideoId::new("paper-airplane"),
            title: "Perfect Paper Airplane".to_string(),
            description: "Learn to fold the perfect paper airplane".to_string(),
            duration_secs,
            category: VideoCategory::Diy,
            age_group: AgeGroup::School,
            thumbnail_url: "https://img.youtube.com/vi/JV2aMbGtmZE/maxresdefault.jpg".to_string(),
            video_url: "https://www.youtube.com/embed/JV2aMbGtmZE?autoplay=1".to_string(),
            related_quizzes: vec![QuizId::new("science-quiz")],
            tags: vec!["DIY".to_string(), "paper airplane".to_string()],
        }
    }

    #[test]
    fn watch_threshold_is_eighty_percent() {
        let video = draft(240).validate().unwrap();
        assert_eq!(video.watch_threshold_secs(), 192);
        assert!(!video.is_watched_at(191));
        assert!(video.is_watched_at(192));
    }

    #[test]
    fn watch_threshold_rounds_up_fractional_seconds() {
        let video = draft(7).validate().unwrap();
        // 5.6s rounds up to 6s.
        assert_eq!(video.watch_threshold_secs(), 6);
    }

    #[test]
    fn rejects_zero_duration_and_bad_urls() {
        assert!(matches!(
            draft(0).validate(),
            Err(VideoError::ZeroDuration(_))
        ));

        let mut bad = draft(60);
        bad.video_url = "javascript:alert(1)".to_string();
        assert!(matches!(
            bad.validate(),
            Err(VideoError::InvalidUrl { field: "video", .. })
        ));
    }

    #[test]
    fn query_matches_tags_case_insensitively() {
        let video = draft(240).validate().unwrap();
        assert!(video.matches_query("diy"));
        assert!(video.matches_query("fold"));
        assert!(!video.matches_query("slime"));
    }
}
