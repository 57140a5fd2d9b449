//! Single file splitting pipeline.

use crate::audio::{LoadedAudio, load_audio};
use crate::clipper::{
    ClipInterval, ExportReport, SegmentWriter, WavWriter, detect_clips, export_clips,
    output_extension, plan_clips,
};
use crate::config::{ExportConfig, ThresholdConfig};
use crate::error::Result;
use crate::output::progress;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Load a recording, logging what was found.
pub fn load_input(input_path: &Path) -> Result<LoadedAudio> {
    info!("Loading {}", input_path.display());
    let loaded = load_audio(input_path)?;
    info!(
        "Loaded {} ({}, {} Hz)",
        input_path.display(),
        progress::format_duration(loaded.buffer.duration_secs()),
        loaded.buffer.sample_rate()
    );
    Ok(loaded)
}

/// Run clip detection over a loaded recording.
pub fn scan(loaded: &LoadedAudio, thresholds: &ThresholdConfig) -> Vec<ClipInterval> {
    let start_time = Instant::now();
    debug!(
        "Scanning with amplitude threshold {} and silence threshold {} ms",
        thresholds.amplitude_threshold(),
        thresholds.silence_threshold_ms()
    );

    let clips = detect_clips(
        loaded.buffer.samples(),
        loaded.buffer.sample_rate(),
        thresholds,
    );

    debug!(
        "Scanned {} samples in {:.3}s",
        loaded.buffer.len(),
        start_time.elapsed().as_secs_f64()
    );
    clips
}

/// Pad, name and write detected clips.
///
/// `extension` is the output file extension, usually from
/// [`output_extension`].
pub fn write_clips<W: SegmentWriter + ?Sized>(
    loaded: &LoadedAudio,
    clips: &[ClipInterval],
    export: &ExportConfig,
    output_dir: &Path,
    writer: &W,
    extension: &str,
    progress_enabled: bool,
) -> Result<ExportReport> {
    let plans = plan_clips(
        clips,
        loaded.buffer.len(),
        loaded.buffer.sample_rate(),
        export,
        extension,
    );

    let pb = progress::create_clip_progress(plans.len(), progress_enabled);
    let report = export_clips(&loaded.buffer, &plans, output_dir, writer, &pb)?;

    info!(
        "Wrote {} of {} clips to {}",
        report.written.len(),
        report.total(),
        output_dir.display()
    );
    if !report.skipped.is_empty() {
        info!("{} clip(s) had no length and were skipped", report.skipped.len());
    }
    if !report.failed.is_empty() {
        warn!("{} clip(s) could not be written", report.failed.len());
    }

    Ok(report)
}

/// Result of splitting one file without prompts.
#[derive(Debug)]
pub struct SplitResult {
    /// The decoded input.
    pub loaded: LoadedAudio,
    /// What happened to each clip.
    pub report: ExportReport,
    /// Directory the clips were written to.
    pub output_dir: PathBuf,
    /// Wall-clock processing time in seconds.
    pub duration_secs: f64,
}

/// Load, scan and export a file in one pass.
pub fn split_file(
    input_path: &Path,
    thresholds: &ThresholdConfig,
    export: &ExportConfig,
    output_dir: &Path,
    progress_enabled: bool,
) -> Result<SplitResult> {
    let start_time = Instant::now();

    let loaded = load_input(input_path)?;
    let clips = scan(&loaded, thresholds);
    info!("Found {} clips", clips.len());

    let writer = WavWriter::new();
    let extension = output_extension(&writer, &loaded.extension);
    let report = write_clips(
        &loaded,
        &clips,
        export,
        output_dir,
        &writer,
        &extension,
        progress_enabled,
    )?;

    let duration_secs = start_time.elapsed().as_secs_f64();
    let realtime_factor = if duration_secs > 0.0 {
        loaded.buffer.duration_secs() / duration_secs
    } else {
        0.0
    };
    info!("Split complete in {duration_secs:.2}s ({realtime_factor:.1}x realtime)");

    Ok(SplitResult {
        loaded,
        report,
        output_dir: output_dir.to_path_buf(),
        duration_secs,
    })
}
