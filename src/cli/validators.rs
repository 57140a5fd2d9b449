//! CLI argument validators.
//!
//! Thin clap adapters over the shared setting validators.

use crate::config;

/// Parse and validate an amplitude threshold (0-1000).
pub fn parse_amplitude_threshold(s: &str) -> Result<u16, String> {
    config::parse_amplitude_threshold(s).map_err(|e| e.to_string())
}

/// Parse and validate a silence threshold in milliseconds.
pub fn parse_silence_ms(s: &str) -> Result<u32, String> {
    config::parse_silence_threshold(s).map_err(|e| e.to_string())
}

/// Parse and validate padding in milliseconds.
pub fn parse_padding_ms(s: &str) -> Result<u32, String> {
    config::parse_padding(s).map_err(|e| e.to_string())
}

/// Validate a clip file name prefix.
pub fn parse_prefix(s: &str) -> Result<String, String> {
    config::validate_prefix(s).map_err(|e| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amplitude_threshold() {
        assert_eq!(parse_amplitude_threshold("250"), Ok(250));
        let err = parse_amplitude_threshold("2000").unwrap_err();
        assert!(err.contains("between 0 and 1000"));
    }

    #[test]
    fn test_parse_silence_ms() {
        assert_eq!(parse_silence_ms("100"), Ok(100));
        assert!(parse_silence_ms("-100").unwrap_err().contains("non-negative integer"));
    }

    #[test]
    fn test_parse_padding_ms() {
        assert_eq!(parse_padding_ms("no"), Ok(0));
        assert_eq!(parse_padding_ms("25"), Ok(25));
        assert!(parse_padding_ms("1.5").is_err());
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("take").unwrap(), "take");
        assert!(parse_prefix("take?").unwrap_err().contains("disallowed character"));
    }
}
