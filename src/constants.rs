//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "splitter";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default amplitude threshold (per-mille of full scale).
pub const DEFAULT_AMPLITUDE_THRESHOLD: u16 = 10;

/// Default minimum silence, in milliseconds, that ends a clip.
pub const DEFAULT_SILENCE_THRESHOLD_MS: u32 = 100;

/// Default padding added to each side of a clip, in milliseconds.
pub const DEFAULT_PADDING_MS: u32 = 0;

/// Default file name prefix for exported clips.
pub const DEFAULT_PREFIX: &str = "output";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Amplitude threshold bounds and scaling.
pub mod amplitude {
    /// Minimum valid threshold.
    pub const MIN: u16 = 0;
    /// Maximum valid threshold.
    pub const MAX: u16 = 1000;
    /// Factor applied to normalized sample magnitude before comparison.
    ///
    /// Applied in `f32` so a sample like `0.01_f32` lands exactly on its
    /// per-mille value.
    pub const SCALE: f32 = 1000.0;
}

/// Characters that may not appear in a clip prefix.
pub const DISALLOWED_PREFIX_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Milliseconds per second, used for ms-to-sample conversion.
pub const MS_PER_SECOND: u64 = 1000;

/// Decimal places kept in timestamp file names.
pub const TIMESTAMP_DECIMALS: usize = 2;

/// Extension used when the input format cannot be written back.
pub const FALLBACK_EXTENSION: &str = ".wav";

/// Extensions the WAV writer can produce (lowercase, with dot).
pub const WAV_EXTENSIONS: &[&str] = &[".wav", ".wave"];

/// Bits per sample for written clips.
pub const OUTPUT_BITS_PER_SAMPLE: u16 = 16;

/// Full-scale magnitude of 16-bit PCM, matching symphonia's normalization.
pub const PCM16_SCALE: f32 = 32768.0;
