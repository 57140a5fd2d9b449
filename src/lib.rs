//! Splitter - split audio recordings into clips at silence gaps.
//!
//! A recording is decoded to mono samples, scanned for clips bounded by
//! silence, and each clip is written to its own file with optional padding.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;

use clap::Parser;
use cli::{Cli, SplitArgs};
use config::{Settings, load_config_file, load_default_config};
use output::SplitSummary;
use std::path::Path;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for splitter CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.split);

    let config = match &cli.split.config {
        Some(path) => load_config_file(path)?,
        None => load_default_config()?,
    };
    let settings = cli.split.resolve(&config.defaults);
    debug!("Resolved settings: {settings:?}");

    if cli.split.yes {
        let input = cli.input.as_deref().ok_or(Error::MissingInput)?;
        return run_batch(input, &settings, &cli.split);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut prompter = cli::prompt::Prompter::new(stdin.lock(), stdout.lock());

    let report = cli::session::run_interactive(
        &mut prompter,
        cli.input,
        &settings,
        cli.split.progress_enabled(),
    )?;
    if report.is_none() {
        info!("Quit without writing clips");
    }

    Ok(())
}

/// Split one file without prompts and report the result.
#[allow(clippy::print_stdout)]
fn run_batch(input: &Path, settings: &Settings, args: &SplitArgs) -> Result<()> {
    let thresholds = settings.threshold_config()?;
    let export = settings.export_config()?;

    let result = pipeline::split_file(
        input,
        &thresholds,
        &export,
        &settings.output_dir,
        args.progress_enabled(),
    )?;

    if args.json {
        let summary = SplitSummary::new(
            input,
            result.loaded.buffer.sample_rate(),
            result.loaded.buffer.duration_secs(),
            result.duration_secs,
            &result.output_dir,
            &result.report,
        );
        let stdout = std::io::stdout();
        summary.write_json(&mut stdout.lock())?;
        return Ok(());
    }

    // Human-readable: one written path per line
    for clip in &result.report.written {
        println!("{}", clip.path.display());
    }

    Ok(())
}

fn init_logging(args: &SplitArgs) {
    use tracing_subscriber::{EnvFilter, fmt};

    // Prompts share the terminal, so interactive runs only log warnings
    // unless asked for more.
    let base = if args.yes { "info" } else { "warn" };
    let filter_str = if args.quiet || args.json {
        "warn"
    } else {
        match args.verbose {
            0 => base,
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
