//! In-memory sample storage.

/// Mono audio samples with their sample rate.
///
/// Samples are normalized to [-1.0, 1.0]. The buffer is read-only once
/// loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Wrap decoded samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// All samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

/// Convert a millisecond duration to a whole number of samples.
///
/// Computes `floor(ms * sample_rate / 1000)` without overflow.
pub fn ms_to_samples(ms: u32, sample_rate: u32) -> usize {
    let samples = u64::from(ms) * u64::from(sample_rate) / crate::constants::MS_PER_SECOND;
    usize::try_from(samples).unwrap_or(usize::MAX)
}
