//! Output file naming.

use crate::config::NamingConvention;
use crate::constants::TIMESTAMP_DECIMALS;

use super::ClipInterval;

/// File name for the clip at `index` (0-based) in the detected list.
///
/// Sequential names use the 1-based ordinal. Timestamp names use the
/// un-padded clip boundaries in seconds.
pub fn clip_file_name(
    naming: NamingConvention,
    prefix: &str,
    index: usize,
    clip: ClipInterval,
    sample_rate: u32,
    extension: &str,
) -> String {
    match naming {
        NamingConvention::Sequential => format!("{prefix}_{}{extension}", index + 1),
        NamingConvention::Timestamp => {
            let start = seconds_label(clip.start, sample_rate);
            let end = seconds_label(clip.end, sample_rate);
            format!("{prefix}_{start}--{end}{extension}")
        }
    }
}

/// Format a sample index as seconds for use in a file name.
///
/// The value is rounded to two decimals (ties to even), trailing zeros
/// are dropped while keeping at least one fractional digit, and the
/// decimal point becomes an underscore: `1.234 s` → `1_23`, `2.5 s` →
/// `2_5`, `12 s` → `12_0`.
pub fn seconds_label(index: usize, sample_rate: u32) -> String {
    #[allow(clippy::cast_precision_loss)]
    let seconds = index as f64 / f64::from(sample_rate.max(1));

    let fixed = format!("{seconds:.TIMESTAMP_DECIMALS$}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };

    format!("{whole}_{fraction}")
}
