use kids_core::model::{Video, VideoId};
use services::{PlaybackEvent, VideoPlayback, VideoService};
use tracing::debug;

use super::time_fmt::format_time;
use crate::views::ViewError;

pub struct PlayerVm {
    video: Video,
    playback: VideoPlayback,
    show_suggestions: bool,
}

impl PlayerVm {
    #[must_use]
    pub fn new(video: Video, playback: VideoPlayback) -> Self {
        Self {
            video,
            playback,
            show_suggestions: false,
        }
    }

    #[must_use]
    pub fn video(&self) -> &Video {
        &self.video
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        self.playback.percent()
    }

    /// `"1:05 / 4:00"`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.playback.position_secs()),
            format_time(self.playback.duration_secs())
        )
    }

    #[must_use]
    pub fn has_reached_threshold(&self) -> bool {
        self.playback.has_reached_threshold()
    }

    /// Whether the "what next" suggestions should be shown.
    #[must_use]
    pub fn show_suggestions(&self) -> bool {
        self.show_suggestions
    }

    pub fn toggle(&mut self) -> bool {
        self.playback.toggle()
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    /// Advance one second; records the watch once the threshold is crossed.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the watch could not be recorded.
    pub fn tick(&mut self, videos: &VideoService) -> Result<PlaybackEvent, ViewError> {
        let event = self.playback.tick();
        if let PlaybackEvent::ReachedWatchThreshold(position) = event {
            let newly_watched = videos.mark_watched(self.video.id())?;
            debug!(video = %self.video.id(), position, newly_watched, "watch threshold reached");
            self.show_suggestions = true;
        }
        Ok(event)
    }
}

/// # Errors
///
/// Returns `ViewError::NotFound` for an unknown video id.
pub fn open_video(videos: &VideoService, video_id: &str) -> Result<PlayerVm, ViewError> {
    let (video, playback) = videos.open(&VideoId::new(video_id))?;
    Ok(PlayerVm::new(video, playback))
}
