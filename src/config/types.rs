//! Configuration type definitions.

use crate::config::validate::{ValidationError, check_amplitude_threshold, validate_prefix};
use crate::constants::{
    DEFAULT_AMPLITUDE_THRESHOLD, DEFAULT_OUTPUT_DIR, DEFAULT_PADDING_MS, DEFAULT_PREFIX,
    DEFAULT_SILENCE_THRESHOLD_MS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default split settings.
    #[serde(default)]
    pub defaults: Settings,
}

/// Split settings as they appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Amplitude threshold (0-1000).
    pub amplitude_threshold: u16,

    /// Minimum silence in milliseconds that ends a clip.
    pub silence_threshold_ms: u32,

    /// Padding added to each side of a clip in milliseconds.
    pub padding_ms: u32,

    /// File naming convention.
    pub naming: NamingConvention,

    /// File name prefix.
    pub prefix: String,

    /// Output directory for clips.
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            amplitude_threshold: DEFAULT_AMPLITUDE_THRESHOLD,
            silence_threshold_ms: DEFAULT_SILENCE_THRESHOLD_MS,
            padding_ms: DEFAULT_PADDING_MS,
            naming: NamingConvention::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Settings {
    /// Detection thresholds from these settings.
    pub fn threshold_config(&self) -> Result<ThresholdConfig, ValidationError> {
        ThresholdConfig::new(self.amplitude_threshold, self.silence_threshold_ms)
    }

    /// Export settings from these settings.
    pub fn export_config(&self) -> Result<ExportConfig, ValidationError> {
        ExportConfig::new(self.padding_ms, self.naming, &self.prefix)
    }
}

/// Thresholds driving silence detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    amplitude_threshold: u16,
    silence_threshold_ms: u32,
}

impl ThresholdConfig {
    /// Create detection thresholds.
    ///
    /// The amplitude threshold is a per-mille cutoff and must be within
    /// 0-1000; values outside are rejected rather than clamped.
    pub fn new(amplitude_threshold: u16, silence_threshold_ms: u32) -> Result<Self, ValidationError> {
        let amplitude_threshold = check_amplitude_threshold(u64::from(amplitude_threshold))?;
        Ok(Self {
            amplitude_threshold,
            silence_threshold_ms,
        })
    }

    /// Amplitude threshold compared against `|sample| * 1000`.
    pub const fn amplitude_threshold(&self) -> u16 {
        self.amplitude_threshold
    }

    /// Minimum silent duration in milliseconds.
    pub const fn silence_threshold_ms(&self) -> u32 {
        self.silence_threshold_ms
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            amplitude_threshold: DEFAULT_AMPLITUDE_THRESHOLD,
            silence_threshold_ms: DEFAULT_SILENCE_THRESHOLD_MS,
        }
    }
}

/// Settings controlling how clips are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    padding_ms: u32,
    naming: NamingConvention,
    prefix: String,
}

impl ExportConfig {
    /// Create export settings, rejecting prefixes with disallowed characters.
    pub fn new(
        padding_ms: u32,
        naming: NamingConvention,
        prefix: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            padding_ms,
            naming,
            prefix: validate_prefix(prefix)?,
        })
    }

    /// Padding in milliseconds.
    pub const fn padding_ms(&self) -> u32 {
        self.padding_ms
    }

    /// File naming convention.
    pub const fn naming(&self) -> NamingConvention {
        self.naming
    }

    /// File name prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            padding_ms: DEFAULT_PADDING_MS,
            naming: NamingConvention::default(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// How exported clip files are named.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    /// `{prefix}_{n}{ext}` with a 1-based clip number.
    #[default]
    Sequential,
    /// `{prefix}_{start}--{end}{ext}` with times in seconds.
    #[value(alias = "timestamps")]
    #[serde(alias = "timestamps")]
    Timestamp,
}

impl NamingConvention {
    /// Placeholder suffix shown when describing where files were saved.
    pub const fn pattern_suffix(self) -> &'static str {
        match self {
            Self::Sequential => "_xx",
            Self::Timestamp => "_x_x--x_x",
        }
    }
}

impl std::fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl std::str::FromStr for NamingConvention {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "sequential" => Ok(Self::Sequential),
            "2" | "timestamp" | "timestamps" => Ok(Self::Timestamp),
            _ => Err(ValidationError::UnknownNamingConvention {
                value: s.to_string(),
            }),
        }
    }
}
