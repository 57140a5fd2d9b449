//! CLI argument definitions.

use crate::cli::validators::{
    parse_amplitude_threshold, parse_padding_ms, parse_prefix, parse_silence_ms,
};
use crate::config::{NamingConvention, Settings};
use clap::{Args, Parser};
use std::path::PathBuf;

/// Split an audio recording into clips at silence gaps.
#[derive(Debug, Parser)]
#[command(name = "splitter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Audio file to split (prompted for when omitted).
    pub input: Option<PathBuf>,

    /// Split options.
    #[command(flatten)]
    pub split: SplitArgs,
}

/// Options controlling detection and export.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct SplitArgs {
    /// Amplitude threshold (0-1000, per-mille of full scale).
    #[arg(short, long, value_parser = parse_amplitude_threshold, env = "SPLITTER_AMPLITUDE_THRESHOLD")]
    pub amplitude_threshold: Option<u16>,

    /// Minimum silence in milliseconds that ends a clip.
    #[arg(short, long, value_parser = parse_silence_ms, env = "SPLITTER_SILENCE_MS")]
    pub silence_ms: Option<u32>,

    /// Padding in milliseconds added to each side of a clip.
    #[arg(short, long, value_parser = parse_padding_ms, env = "SPLITTER_PADDING_MS")]
    pub padding_ms: Option<u32>,

    /// File naming convention.
    #[arg(short, long, value_enum, env = "SPLITTER_NAMING")]
    pub naming: Option<NamingConvention>,

    /// File name prefix for clips.
    #[arg(long, value_parser = parse_prefix, env = "SPLITTER_PREFIX")]
    pub prefix: Option<String>,

    /// Output directory (default: ./output).
    #[arg(short, long, env = "SPLITTER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Config file to use instead of the platform default.
    #[arg(long, env = "SPLITTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run without prompts, using flags, config and defaults.
    #[arg(short, long)]
    pub yes: bool,

    /// Print a JSON summary to stdout.
    #[arg(long, requires = "yes")]
    pub json: bool,

    /// Hide the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SplitArgs {
    /// Overlay command-line values on settings from the config file.
    pub fn resolve(&self, defaults: &Settings) -> Settings {
        Settings {
            amplitude_threshold: self
                .amplitude_threshold
                .unwrap_or(defaults.amplitude_threshold),
            silence_threshold_ms: self.silence_ms.unwrap_or(defaults.silence_threshold_ms),
            padding_ms: self.padding_ms.unwrap_or(defaults.padding_ms),
            naming: self.naming.unwrap_or(defaults.naming),
            prefix: self
                .prefix
                .clone()
                .unwrap_or_else(|| defaults.prefix.clone()),
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| defaults.output_dir.clone()),
        }
    }

    /// Whether the progress bar should be drawn.
    pub const fn progress_enabled(&self) -> bool {
        !self.quiet && !self.no_progress && !self.json
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_arguments() {
        let cli = Cli::try_parse_from(["splitter"]).unwrap();
        assert!(cli.input.is_none());
        assert!(!cli.split.yes);
    }

    #[test]
    fn test_cli_parse_single_input() {
        let cli = Cli::try_parse_from(["splitter", "take.wav"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("take.wav")));
    }

    #[test]
    fn test_cli_rejects_two_inputs() {
        assert!(Cli::try_parse_from(["splitter", "a.wav", "b.wav"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "splitter",
            "take.wav",
            "-a",
            "25",
            "-s",
            "250",
            "-p",
            "50",
            "--naming",
            "timestamp",
            "--prefix",
            "take",
            "-y",
        ])
        .unwrap();

        assert_eq!(cli.split.amplitude_threshold, Some(25));
        assert_eq!(cli.split.silence_ms, Some(250));
        assert_eq!(cli.split.padding_ms, Some(50));
        assert_eq!(cli.split.naming, Some(NamingConvention::Timestamp));
        assert_eq!(cli.split.prefix.as_deref(), Some("take"));
        assert!(cli.split.yes);
    }

    #[test]
    fn test_cli_rejects_invalid_values() {
        assert!(Cli::try_parse_from(["splitter", "x.wav", "-a", "1001"]).is_err());
        assert!(Cli::try_parse_from(["splitter", "x.wav", "-s", "-1"]).is_err());
        assert!(Cli::try_parse_from(["splitter", "x.wav", "--prefix", "a/b"]).is_err());
        assert!(Cli::try_parse_from(["splitter", "x.wav", "--naming", "random"]).is_err());
    }

    #[test]
    fn test_cli_json_requires_yes() {
        assert!(Cli::try_parse_from(["splitter", "x.wav", "--json"]).is_err());
        assert!(Cli::try_parse_from(["splitter", "x.wav", "--json", "-y"]).is_ok());
    }

    #[test]
    fn test_resolve_prefers_flags_over_config() {
        let cli = Cli::try_parse_from(["splitter", "x.wav", "-a", "40", "--prefix", "cli"]).unwrap();
        let defaults = Settings {
            amplitude_threshold: 5,
            silence_threshold_ms: 700,
            prefix: "config".to_string(),
            ..Settings::default()
        };

        let settings = cli.split.resolve(&defaults);
        assert_eq!(settings.amplitude_threshold, 40);
        assert_eq!(settings.silence_threshold_ms, 700);
        assert_eq!(settings.prefix, "cli");
        assert_eq!(settings.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_progress_disabled_by_json_or_quiet() {
        let cli = Cli::try_parse_from(["splitter", "x.wav", "-y", "--json"]).unwrap();
        assert!(!cli.split.progress_enabled());
        let cli = Cli::try_parse_from(["splitter", "x.wav", "-q"]).unwrap();
        assert!(!cli.split.progress_enabled());
        let cli = Cli::try_parse_from(["splitter", "x.wav"]).unwrap();
        assert!(cli.split.progress_enabled());
    }
}
