//! Clip file writing.
//!
//! Writes exported segments to disk. Only WAV output is supported; other
//! input formats are written back as WAV.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};
use tracing::warn;

use crate::Error;
use crate::constants::{FALLBACK_EXTENSION, OUTPUT_BITS_PER_SAMPLE, PCM16_SCALE, WAV_EXTENSIONS};

/// Persists one audio segment in the format implied by the path.
pub trait SegmentWriter {
    /// Whether this writer can produce files with `extension` (with dot).
    fn supports_extension(&self, extension: &str) -> bool;

    /// Write `samples` at `sample_rate` to `path`.
    fn write_segment(&self, path: &Path, samples: &[f32], sample_rate: u32)
    -> Result<(), Error>;
}

/// Writes mono 16-bit PCM WAV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavWriter;

impl WavWriter {
    /// Create a WAV writer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SegmentWriter for WavWriter {
    fn supports_extension(&self, extension: &str) -> bool {
        WAV_EXTENSIONS
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    fn write_segment(
        &self,
        path: &Path,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<(), Error> {
        write_wav_file(path, samples, sample_rate)
    }
}

/// Pick the extension for output files.
///
/// Keeps the input extension when `writer` can produce it, otherwise falls
/// back to `.wav`.
pub fn output_extension<W: SegmentWriter + ?Sized>(writer: &W, input_extension: &str) -> String {
    if writer.supports_extension(input_extension) {
        return input_extension.to_string();
    }

    warn!(
        "Cannot write '{}' files, clips will be saved as {FALLBACK_EXTENSION}",
        if input_extension.is_empty() {
            "<none>"
        } else {
            input_extension
        }
    );
    FALLBACK_EXTENSION.to_string()
}

/// Write samples to a WAV file.
fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: OUTPUT_BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let wav_error = |e| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = HoundWriter::create(path, spec).map_err(wav_error)?;

    for &sample in samples {
        writer.write_sample(to_pcm16(sample)).map_err(wav_error)?;
    }

    writer.finalize().map_err(wav_error)?;

    Ok(())
}

/// Scale a normalized sample back to 16-bit PCM.
///
/// Uses the same 2^15 divisor the decoder normalizes by, so 16-bit input
/// survives a decode and write unchanged.
#[allow(clippy::cast_possible_truncation)]
fn to_pcm16(sample: f32) -> i16 {
    (sample * PCM16_SCALE)
        .round()
        .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}
