//! Run summaries.
//!
//! Human-readable lines for the terminal and a JSON document for
//! `--json` consumers.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::clipper::{ClipPlan, ExportReport};
use crate::config::NamingConvention;
use crate::error::{Error, Result};

/// JSON summary of one split run.
#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    /// Input recording.
    pub input: PathBuf,
    /// Sample rate of the input in Hz.
    pub sample_rate: u32,
    /// Input duration in seconds.
    pub duration_secs: f64,
    /// Wall-clock time spent loading, scanning and writing, in seconds.
    pub processing_secs: f64,
    /// Directory the clips were written to.
    pub output_dir: PathBuf,
    /// Number of clips detected.
    pub detected: usize,
    /// Clips written.
    pub clips: Vec<ClipEntry>,
    /// Clips skipped for having no length after padding.
    pub skipped: Vec<ClipEntry>,
    /// Clips that failed to write.
    pub failed: Vec<FailedEntry>,
}

/// One clip in the summary.
#[derive(Debug, Clone, Serialize)]
pub struct ClipEntry {
    /// 1-based clip number.
    pub clip: usize,
    /// Detected start sample (un-padded).
    pub start_sample: usize,
    /// Detected end sample (un-padded, exclusive).
    pub end_sample: usize,
    /// Detected start in seconds.
    pub start_time: f64,
    /// Detected end in seconds.
    pub end_time: f64,
    /// Written file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

/// A failed clip in the summary.
#[derive(Debug, Clone, Serialize)]
pub struct FailedEntry {
    /// Clip details.
    #[serde(flatten)]
    pub clip: ClipEntry,
    /// Why the write failed.
    pub error: String,
}

impl ClipEntry {
    #[allow(clippy::cast_precision_loss)]
    fn from_plan(plan: &ClipPlan, sample_rate: u32, output_file: Option<PathBuf>) -> Self {
        let rate = f64::from(sample_rate.max(1));
        Self {
            clip: plan.ordinal(),
            start_sample: plan.clip.start,
            end_sample: plan.clip.end,
            start_time: plan.clip.start as f64 / rate,
            end_time: plan.clip.end as f64 / rate,
            output_file,
        }
    }
}

impl SplitSummary {
    /// Build a summary from an export report.
    pub fn new(
        input: &Path,
        sample_rate: u32,
        duration_secs: f64,
        processing_secs: f64,
        output_dir: &Path,
        report: &ExportReport,
    ) -> Self {
        Self {
            input: input.to_path_buf(),
            sample_rate,
            duration_secs,
            processing_secs,
            output_dir: output_dir.to_path_buf(),
            detected: report.total(),
            clips: report
                .written
                .iter()
                .map(|w| ClipEntry::from_plan(&w.plan, sample_rate, Some(w.path.clone())))
                .collect(),
            skipped: report
                .skipped
                .iter()
                .map(|p| ClipEntry::from_plan(p, sample_rate, None))
                .collect(),
            failed: report
                .failed
                .iter()
                .map(|f| FailedEntry {
                    clip: ClipEntry::from_plan(&f.plan, sample_rate, None),
                    error: f.reason.clone(),
                })
                .collect(),
        }
    }

    /// Serialize as pretty JSON followed by a newline.
    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)
            .map_err(|e| Error::JsonSerialize { source: e })?;
        writeln!(out)?;
        Ok(())
    }
}

/// Describe where clips were written, e.g. `output/take_xx.wav`.
pub fn saved_files_pattern(
    output_dir: &Path,
    prefix: &str,
    naming: NamingConvention,
    extension: &str,
) -> PathBuf {
    output_dir.join(format!("{prefix}{}{extension}", naming.pattern_suffix()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipper::{ClipInterval, FailedClip, WrittenClip};

    fn plan(index: usize, start: usize, end: usize) -> ClipPlan {
        ClipPlan {
            index,
            clip: ClipInterval::new(start, end),
            padded_start: start,
            padded_end: end,
            file_name: format!("out_{}.wav", index + 1),
        }
    }

    #[test]
    fn test_summary_json_shape() {
        let report = ExportReport {
            written: vec![WrittenClip {
                plan: plan(0, 500, 1500),
                path: PathBuf::from("output/out_1.wav"),
            }],
            skipped: vec![],
            failed: vec![FailedClip {
                plan: plan(1, 2000, 3000),
                reason: "disk full".to_string(),
            }],
        };

        let summary = SplitSummary::new(
            Path::new("in.wav"),
            1000,
            4.0,
            0.25,
            Path::new("output"),
            &report,
        );
        let mut buf = Vec::new();
        summary.write_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["detected"], 2);
        assert_eq!(value["duration_secs"], 4.0);
        assert_eq!(value["processing_secs"], 0.25);
        assert_eq!(value["clips"][0]["clip"], 1);
        assert_eq!(value["clips"][0]["start_time"], 0.5);
        assert_eq!(value["clips"][0]["output_file"], "output/out_1.wav");
        assert_eq!(value["failed"][0]["clip"], 2);
        assert_eq!(value["failed"][0]["error"], "disk full");
        assert!(value["failed"][0].get("output_file").is_none());
    }

    #[test]
    fn test_saved_files_pattern() {
        let sequential =
            saved_files_pattern(Path::new("output"), "take", NamingConvention::Sequential, ".wav");
        assert_eq!(sequential, Path::new("output").join("take_xx.wav"));

        let timestamp =
            saved_files_pattern(Path::new("output"), "take", NamingConvention::Timestamp, ".wav");
        assert_eq!(timestamp, Path::new("output").join("take_x_x--x_x.wav"));
    }
}
