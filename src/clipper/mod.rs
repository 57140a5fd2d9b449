//! Silence-based clip detection and export.
//!
//! The detector scans a sample buffer for clips separated by silence, and
//! the exporter pads each clip, names it and writes it to disk.

mod detector;
mod exporter;
mod naming;
mod writer;

pub use detector::{ClipInterval, detect_clips};
pub use exporter::{
    ClipPlan, ExportReport, FailedClip, WrittenClip, export_clips, plan_clips,
};
pub use naming::{clip_file_name, seconds_label};
pub use writer::{SegmentWriter, WavWriter, output_extension};
