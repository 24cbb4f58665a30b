use std::sync::Arc;

use kids_core::Catalog;
use kids_core::model::{Video, VideoId};
use tracing::debug;

use crate::error::VideoServiceError;
use crate::progress_service::ProgressService;

//
// ─── PLAYBACK ──────────────────────────────────────────────────────────────────
//

/// What a single playback tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Paused; the position did not move.
    Idle,
    /// Position advanced by one second.
    Advanced(u32),
    /// The watch threshold was crossed on this tick. Reported once.
    ReachedWatchThreshold(u32),
    /// Playback reached the end and stopped.
    Ended,
}

/// Simulated playback position for the embedded player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPlayback {
    duration_secs: u32,
    threshold_secs: u32,
    position_secs: u32,
    playing: bool,
    threshold_reported: bool,
}

impl VideoPlayback {
    #[must_use]
    pub fn new(video: &Video) -> Self {
        Self {
            duration_secs: video.duration_secs(),
            threshold_secs: video.watch_threshold_secs(),
            position_secs: 0,
            playing: false,
            threshold_reported: false,
        }
    }

    #[must_use]
    pub fn position_secs(&self) -> u32 {
        self.position_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the watch threshold has been reached in this playback.
    #[must_use]
    pub fn has_reached_threshold(&self) -> bool {
        self.threshold_reported
    }

    /// Elapsed share of the duration in percent, rounded down.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.duration_secs == 0 {
            return 0;
        }
        let scaled = u64::from(self.position_secs) * 100 / u64::from(self.duration_secs);
        u32::try_from(scaled).unwrap_or(100)
    }

    /// Flip between playing and paused. Returns the new playing state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance one second of simulated playback.
    pub fn tick(&mut self) -> PlaybackEvent {
        if !self.playing {
            return PlaybackEvent::Idle;
        }
        if self.position_secs >= self.duration_secs {
            self.position_secs = self.duration_secs;
            self.playing = false;
            return PlaybackEvent::Ended;
        }

        self.position_secs += 1;
        if !self.threshold_reported && self.position_secs >= self.threshold_secs {
            self.threshold_reported = true;
            return PlaybackEvent::ReachedWatchThreshold(self.position_secs);
        }
        PlaybackEvent::Advanced(self.position_secs)
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Opens catalog videos and records watch completion.
#[derive(Clone)]
pub struct VideoService {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressService>,
}

impl VideoService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, progress: Arc<ProgressService>) -> Self {
        Self { catalog, progress }
    }

    /// Look up a video, mark it current and return a fresh playback tracker.
    ///
    /// # Errors
    ///
    /// Returns `VideoServiceError::NotFound` for an unknown id.
    pub fn open(&self, video_id: &VideoId) -> Result<(Video, VideoPlayback), VideoServiceError> {
        let video = self
            .catalog
            .video(video_id)
            .cloned()
            .ok_or_else(|| VideoServiceError::NotFound(video_id.clone()))?;
        self.progress.set_current_video(video_id.clone())?;
        debug!(video = %video_id, "video opened");
        let playback = VideoPlayback::new(&video);
        Ok((video, playback))
    }

    /// Record a completed watch. Returns `true` the first time.
    ///
    /// # Errors
    ///
    /// Returns `VideoServiceError::Progress` if progress state is unavailable.
    pub fn mark_watched(&self, video_id: &VideoId) -> Result<bool, VideoServiceError> {
        Ok(self.progress.mark_video_watched(video_id.clone())?)
    }
}
