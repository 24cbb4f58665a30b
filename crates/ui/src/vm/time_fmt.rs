use chrono::{DateTime, Duration, Utc};

/// Clock-style `m:ss` label for a playback position or duration.
#[must_use]
pub fn format_time(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

/// Time spent on an attempt, rounded down to whole seconds.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = u32::try_from(elapsed.num_seconds().max(0)).unwrap_or(u32::MAX);
    format_time(seconds)
}

#[must_use]
pub fn format_completed_at(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %H:%M").to_string()
}
