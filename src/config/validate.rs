//! Setting validation.
//!
//! Pure parsers shared by the interactive prompts, clap value parsers and
//! the config file loader. Each accepts raw text and either returns the
//! typed value or a [`ValidationError`] describing why it was rejected.

use crate::config::{NamingConvention, Settings};
use crate::constants::{DISALLOWED_PREFIX_CHARS, amplitude};

/// Reason a setting was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Value is not a plain non-negative integer.
    #[error("{name} must be a non-negative integer, got '{value}'")]
    NotAnInteger {
        /// Setting name.
        name: &'static str,
        /// Rejected text.
        value: String,
    },

    /// Value is outside the accepted range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: u64,
        /// Minimum allowed value (inclusive).
        min: u64,
        /// Maximum allowed value (inclusive).
        max: u64,
    },

    /// Prefix contains a character that is not allowed in file names.
    #[error("prefix '{prefix}' contains disallowed character '{character}'")]
    InvalidPrefix {
        /// Rejected prefix.
        prefix: String,
        /// First offending character.
        character: char,
    },

    /// Naming convention is not recognized.
    #[error("unknown naming convention '{value}' (expected sequential or timestamp)")]
    UnknownNamingConvention {
        /// Rejected text.
        value: String,
    },
}

/// Parse a plain decimal integer.
///
/// Only ASCII digits are accepted: signs, whitespace inside the number and
/// decimal points are rejected.
fn parse_digits(s: &str, name: &'static str) -> Result<u64, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotAnInteger {
            name,
            value: s.to_string(),
        });
    }

    trimmed.parse().map_err(|_| ValidationError::OutOfRange {
        name,
        value: u64::MAX,
        min: 0,
        max: u64::from(u32::MAX),
    })
}

/// Check a value against an inclusive range.
fn check_range(value: u64, min: u64, max: u64, name: &'static str) -> Result<u64, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Validate an amplitude threshold already in numeric form.
#[allow(clippy::cast_possible_truncation)]
pub fn check_amplitude_threshold(value: u64) -> Result<u16, ValidationError> {
    let value = check_range(
        value,
        u64::from(amplitude::MIN),
        u64::from(amplitude::MAX),
        "amplitude threshold",
    )?;
    Ok(value as u16)
}

/// Parse and validate an amplitude threshold (0-1000).
pub fn parse_amplitude_threshold(s: &str) -> Result<u16, ValidationError> {
    check_amplitude_threshold(parse_digits(s, "amplitude threshold")?)
}

/// Parse a non-negative millisecond duration.
#[allow(clippy::cast_possible_truncation)]
pub fn parse_milliseconds(s: &str, name: &'static str) -> Result<u32, ValidationError> {
    let value = check_range(parse_digits(s, name)?, 0, u64::from(u32::MAX), name)?;
    Ok(value as u32)
}

/// Parse and validate a silence threshold in milliseconds.
pub fn parse_silence_threshold(s: &str) -> Result<u32, ValidationError> {
    parse_milliseconds(s, "silence threshold")
}

/// Parse and validate padding in milliseconds.
///
/// `n` and `no` (any case) mean no padding.
pub fn parse_padding(s: &str) -> Result<u32, ValidationError> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("n") || trimmed.eq_ignore_ascii_case("no") {
        return Ok(0);
    }
    parse_milliseconds(trimmed, "padding")
}

/// Validate a clip file name prefix.
pub fn validate_prefix(prefix: &str) -> Result<String, ValidationError> {
    match prefix.chars().find(|c| DISALLOWED_PREFIX_CHARS.contains(c)) {
        Some(character) => Err(ValidationError::InvalidPrefix {
            prefix: prefix.to_string(),
            character,
        }),
        None => Ok(prefix.to_string()),
    }
}

/// Parse a naming convention.
pub fn parse_naming_convention(s: &str) -> Result<NamingConvention, ValidationError> {
    s.parse()
}

/// Validate settings loaded from a config file.
pub fn validate_settings(settings: &Settings) -> Result<(), ValidationError> {
    check_amplitude_threshold(u64::from(settings.amplitude_threshold))?;
    validate_prefix(&settings.prefix)?;
    Ok(())
}
