//! Silence-gap clip detection.

use crate::audio::ms_to_samples;
use crate::config::ThresholdConfig;
use crate::constants::amplitude;

/// A detected clip as a half-open range of sample indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipInterval {
    /// First sample of the clip (inclusive).
    pub start: usize,
    /// Sample after the last one in the clip (exclusive).
    pub end: usize,
}

impl ClipInterval {
    /// Create a clip interval.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether the clip holds no samples.
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Scan samples for clips separated by silence.
///
/// A clip starts at the first sample whose `|amplitude| * 1000` reaches the
/// amplitude threshold. It ends at the sample where the contiguous run of
/// quieter samples grows one past the silence threshold (converted to
/// samples); that sample is the exclusive end. A clip still open when the
/// samples run out ends at `samples.len()`.
///
/// The result is strictly increasing and non-overlapping.
pub fn detect_clips(
    samples: &[f32],
    sample_rate: u32,
    config: &ThresholdConfig,
) -> Vec<ClipInterval> {
    let threshold = f32::from(config.amplitude_threshold());
    let silence_threshold_samples = ms_to_samples(config.silence_threshold_ms(), sample_rate);

    let mut clips = Vec::new();
    let mut open: Option<usize> = None;
    let mut silence_run = 0usize;

    for (i, &sample) in samples.iter().enumerate() {
        let level = sample.abs() * amplitude::SCALE;
        let silent = level < threshold;

        match open {
            None if !silent => {
                open = Some(i);
                silence_run = 0;
            }
            None => {}
            Some(start) if silent => {
                silence_run += 1;
                if silence_run > silence_threshold_samples {
                    clips.push(ClipInterval::new(start, i));
                    open = None;
                    silence_run = 0;
                }
            }
            Some(_) => silence_run = 0,
        }
    }

    // End of stream acts as a silence long enough to close any open clip.
    if let Some(start) = open {
        clips.push(ClipInterval::new(start, samples.len()));
    }

    clips
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Build samples from per-mille amplitudes.
    fn from_permille(levels: &[u16]) -> Vec<f32> {
        levels.iter().map(|&l| f32::from(l) / 1000.0).collect()
    }

    fn thresholds(amplitude: u16, silence_ms: u32) -> ThresholdConfig {
        ThresholdConfig::new(amplitude, silence_ms).unwrap()
    }

    /// Tiny deterministic generator so property checks need no extra crates.
    fn pseudo_random_samples(seed: u64, len: usize) -> Vec<f32> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
                let unit = ((state >> 40) as u32 as f32) / 16_777_216.0;
                // Mostly quiet with occasional bursts.
                if unit > 0.7 { unit - 0.7 } else { unit * 0.01 }
            })
            .collect()
    }

    fn assert_well_formed(clips: &[ClipInterval], len: usize) {
        for clip in clips {
            assert!(clip.start < clip.end, "{clip:?} is empty");
            assert!(clip.end <= len, "{clip:?} exceeds {len}");
        }
        for pair in clips.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{pair:?} overlap");
        }
    }

    #[test]
    fn test_second_clip_closes_after_long_silence() {
        let samples = from_permille(&[0, 0, 15, 20, 0, 0, 0, 18, 0, 0, 0, 0]);
        let clips = detect_clips(&samples, 1000, &thresholds(10, 2));

        // Silence runs of 3 samples (one past the 2-sample threshold) end
        // each clip at the third silent sample.
        assert_eq!(clips, vec![ClipInterval::new(2, 6), ClipInterval::new(7, 10)]);
    }

    #[test]
    fn test_open_clip_is_closed_at_end_of_buffer() {
        let samples = from_permille(&[0, 0, 15, 20, 0, 0, 0, 18, 0, 0]);
        let clips = detect_clips(&samples, 1000, &thresholds(10, 2));

        assert_eq!(clips, vec![ClipInterval::new(2, 6), ClipInterval::new(7, 10)]);
        assert_eq!(clips[1].end, samples.len());
    }

    #[test]
    fn test_all_silent_yields_nothing() {
        let samples = vec![0.001_f32; 500];
        assert!(detect_clips(&samples, 1000, &thresholds(10, 100)).is_empty());
    }

    #[test]
    fn test_empty_buffer_yields_nothing() {
        assert!(detect_clips(&[], 48000, &ThresholdConfig::default()).is_empty());
    }

    #[test]
    fn test_all_loud_yields_single_clip() {
        let samples = vec![0.5_f32; 300];
        let clips = detect_clips(&samples, 1000, &thresholds(10, 100));
        assert_eq!(clips, vec![ClipInterval::new(0, 300)]);
    }

    #[test]
    fn test_threshold_equality_counts_as_sound() {
        let samples = vec![0.0, -0.5, 0.0];
        let clips = detect_clips(&samples, 1000, &thresholds(500, 0));
        assert_eq!(clips, vec![ClipInterval::new(1, 2)]);
    }

    #[test]
    fn test_per_mille_sample_at_threshold_counts_as_sound() {
        // 0.01_f32 is slightly below 1/100 in binary but scales to exactly 10.
        let clips = detect_clips(&[0.01_f32; 3], 1000, &thresholds(10, 0));
        assert_eq!(clips, vec![ClipInterval::new(0, 3)]);

        for level in [30_u16, 70, 110, 290, 570] {
            let samples = from_permille(&[0, level, 0]);
            let clips = detect_clips(&samples, 1000, &thresholds(level, 0));
            assert_eq!(clips, vec![ClipInterval::new(1, 2)], "level {level}");
        }
    }

    #[test]
    fn test_zero_amplitude_threshold_keeps_everything() {
        let samples = vec![0.0_f32; 10];
        let clips = detect_clips(&samples, 1000, &thresholds(0, 0));
        assert_eq!(clips, vec![ClipInterval::new(0, 10)]);
    }

    #[test]
    fn test_zero_silence_threshold_closes_on_first_silent_sample() {
        let samples = from_permille(&[20, 0, 20, 20, 0]);
        let clips = detect_clips(&samples, 1000, &thresholds(10, 0));
        assert_eq!(clips, vec![ClipInterval::new(0, 1), ClipInterval::new(2, 4)]);
    }

    #[test]
    fn test_silence_run_must_be_contiguous() {
        // Two silent samples, a blip, two more: never exceeds 2.
        let samples = from_permille(&[50, 0, 0, 50, 0, 0, 50]);
        let clips = detect_clips(&samples, 1000, &thresholds(10, 2));
        assert_eq!(clips, vec![ClipInterval::new(0, 7)]);
    }

    #[test]
    fn test_silence_reaching_threshold_does_not_close() {
        // Exactly two silent samples at a two-sample threshold keep the clip open.
        let samples = from_permille(&[50, 0, 0, 50, 0, 0, 0]);
        let clips = detect_clips(&samples, 1000, &thresholds(10, 2));
        assert_eq!(clips, vec![ClipInterval::new(0, 6)]);
    }

    #[test]
    fn test_negative_samples_use_magnitude() {
        let samples = from_permille(&[0, 0, 0])
            .into_iter()
            .chain([-0.2_f32, -0.3])
            .collect::<Vec<_>>();
        let clips = detect_clips(&samples, 1000, &thresholds(100, 10));
        assert_eq!(clips, vec![ClipInterval::new(3, 5)]);
    }

    #[test]
    fn test_silence_threshold_scales_with_sample_rate() {
        // 1 ms at 8 kHz is 8 samples; a 5-sample gap must not split.
        let mut samples = vec![0.5_f32; 10];
        samples.extend(vec![0.0; 5]);
        samples.extend(vec![0.5; 10]);
        let clips = detect_clips(&samples, 8000, &thresholds(10, 1));
        assert_eq!(clips, vec![ClipInterval::new(0, 25)]);

        let clips = detect_clips(&samples, 1000, &thresholds(10, 1));
        assert_eq!(clips, vec![ClipInterval::new(0, 11), ClipInterval::new(15, 25)]);
    }

    #[test]
    fn test_detection_is_repeatable() {
        let samples = pseudo_random_samples(7, 5000);
        let config = thresholds(50, 3);
        assert_eq!(
            detect_clips(&samples, 1000, &config),
            detect_clips(&samples, 1000, &config)
        );
    }

    #[test]
    fn test_output_is_well_formed_across_inputs() {
        for seed in 0..20 {
            let samples = pseudo_random_samples(seed, 2000 + 137 * usize::try_from(seed).unwrap());
            for (amp, silence_ms) in [(0, 0), (10, 0), (50, 2), (300, 5), (1000, 1)] {
                let clips = detect_clips(&samples, 1000, &thresholds(amp, silence_ms));
                assert_well_formed(&clips, samples.len());
            }
        }
    }

    #[test]
    fn test_clip_interval_is_empty() {
        assert!(!ClipInterval::new(3, 10).is_empty());
        assert!(ClipInterval::new(4, 4).is_empty());
    }
}
