//! Progress bar utilities for clip export.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for writing clips.
///
/// Returns a hidden bar when disabled or when there is nothing to write, so
/// callers can drive it unconditionally.
pub fn create_clip_progress(total_clips: usize, enabled: bool) -> ProgressBar {
    if !enabled || total_clips == 0 {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_clips as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} clips ({msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Format a duration in seconds as `h:mm:ss` or `m:ss`.
pub fn format_duration(seconds: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.max(0.0).round() as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
