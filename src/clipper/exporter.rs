//! Clip export.
//!
//! Turns detected clip intervals into padded sample ranges and output
//! files. Each clip is written independently: a failure on one clip is
//! logged and recorded, and the rest of the batch continues.

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{debug, warn};

use crate::Error;
use crate::audio::{SampleBuffer, ms_to_samples};
use crate::config::ExportConfig;

use super::{ClipInterval, SegmentWriter, clip_file_name};

/// Export decision for a single detected clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPlan {
    /// 0-based position in the detected clip list.
    pub index: usize,
    /// Detected clip boundaries before padding.
    pub clip: ClipInterval,
    /// First sample written (inclusive).
    pub padded_start: usize,
    /// Sample after the last one written (exclusive).
    pub padded_end: usize,
    /// Output file name (no directory).
    pub file_name: String,
}

impl ClipPlan {
    /// 1-based clip number.
    pub const fn ordinal(&self) -> usize {
        self.index + 1
    }

    /// Whether padding and clamping left nothing to write.
    pub const fn is_empty(&self) -> bool {
        self.padded_start >= self.padded_end
    }
}

/// A clip that was written to disk.
#[derive(Debug, Clone)]
pub struct WrittenClip {
    /// The plan that produced this file.
    pub plan: ClipPlan,
    /// Full path of the written file.
    pub path: PathBuf,
}

/// A clip that could not be written.
#[derive(Debug, Clone)]
pub struct FailedClip {
    /// The plan that failed.
    pub plan: ClipPlan,
    /// Error description.
    pub reason: String,
}

/// Outcome of exporting a batch of clips.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Clips written successfully, in clip order.
    pub written: Vec<WrittenClip>,
    /// Clips skipped because they had no length after padding.
    pub skipped: Vec<ClipPlan>,
    /// Clips whose write failed.
    pub failed: Vec<FailedClip>,
}

impl ExportReport {
    /// Total number of clips considered.
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failed.len()
    }
}

/// Compute padded ranges and file names for every detected clip.
///
/// Padding is `floor(padding_ms * sample_rate / 1000)` samples on each side,
/// clamped to `[0, buffer_len]`. Timestamp names always use the un-padded
/// boundaries.
pub fn plan_clips(
    clips: &[ClipInterval],
    buffer_len: usize,
    sample_rate: u32,
    config: &ExportConfig,
    extension: &str,
) -> Vec<ClipPlan> {
    let padding = ms_to_samples(config.padding_ms(), sample_rate);

    clips
        .iter()
        .enumerate()
        .map(|(index, &clip)| ClipPlan {
            index,
            clip,
            padded_start: clip.start.saturating_sub(padding),
            padded_end: clip.end.saturating_add(padding).min(buffer_len),
            file_name: clip_file_name(
                config.naming(),
                config.prefix(),
                index,
                clip,
                sample_rate,
                extension,
            ),
        })
        .collect()
}

/// Write every planned clip into `output_dir`.
///
/// The directory is created if it does not exist. Empty clips are skipped
/// and write failures are recorded; neither stops the batch.
///
/// # Errors
///
/// Returns an error only if the output directory cannot be created.
pub fn export_clips<W: SegmentWriter + ?Sized>(
    buffer: &SampleBuffer,
    plans: &[ClipPlan],
    output_dir: &Path,
    writer: &W,
    progress: &ProgressBar,
) -> Result<ExportReport, Error> {
    fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut report = ExportReport::default();

    for plan in plans {
        progress.set_message(plan.file_name.clone());

        match write_clip(buffer, plan, output_dir, writer) {
            Ok(path) => {
                debug!(
                    "Wrote clip {} ({}..{}) to {}",
                    plan.ordinal(),
                    plan.padded_start,
                    plan.padded_end,
                    path.display()
                );
                report.written.push(WrittenClip {
                    plan: plan.clone(),
                    path,
                });
            }
            Err(e @ Error::EmptyClip { .. }) => {
                warn!("Skipping file with no length: {e}");
                report.skipped.push(plan.clone());
            }
            Err(e) => {
                warn!("Failed to write clip {}: {e}", plan.ordinal());
                report.failed.push(FailedClip {
                    plan: plan.clone(),
                    reason: error_chain(&e),
                });
            }
        }

        progress.inc(1);
    }

    progress.finish_with_message("done");

    Ok(report)
}

/// Slice and write a single clip.
fn write_clip<W: SegmentWriter + ?Sized>(
    buffer: &SampleBuffer,
    plan: &ClipPlan,
    output_dir: &Path,
    writer: &W,
) -> Result<PathBuf, Error> {
    if plan.is_empty() || plan.padded_end > buffer.len() {
        return Err(Error::EmptyClip {
            ordinal: plan.ordinal(),
            start: plan.padded_start,
            end: plan.padded_end,
        });
    }

    let segment = &buffer.samples()[plan.padded_start..plan.padded_end];
    let path = output_dir.join(&plan.file_name);
    writer.write_segment(&path, segment, buffer.sample_rate())?;

    Ok(path)
}

/// Render an error and its sources on one line.
fn error_chain(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
