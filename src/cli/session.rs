//! Interactive split session.
//!
//! Walks the user through choosing thresholds, previewing the clip count,
//! and picking export options before anything is written.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::prompt::Prompter;
use crate::clipper::{ExportReport, WavWriter, output_extension};
use crate::config::{
    ExportConfig, Settings, ThresholdConfig, parse_amplitude_threshold,
    parse_naming_convention, parse_padding, parse_silence_threshold, validate_prefix,
};
use crate::error::Result;
use crate::output::saved_files_pattern;
use crate::pipeline::{load_input, scan, write_clips};

/// Run the interactive session.
///
/// Prompts for the input file when `input` is `None`. Returns `None` if the
/// user quits (empty file name or closed input) before clips are written.
pub fn run_interactive<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    input: Option<PathBuf>,
    settings: &Settings,
    progress_enabled: bool,
) -> Result<Option<ExportReport>> {
    let input = match input {
        Some(path) => path,
        None => match prompt_input_file(prompter)? {
            Some(path) => path,
            None => return Ok(None),
        },
    };

    let loaded = load_input(&input)?;
    prompter.say(format_args!("Loaded {} successfully.\n", input.display()))?;

    let mut amplitude_threshold = settings.amplitude_threshold;
    let mut silence_threshold_ms = settings.silence_threshold_ms;

    loop {
        let Some(silence) = prompter.ask(
            format_args!("Select Silence Threshold in milliseconds\nCurrent: {silence_threshold_ms}"),
            silence_threshold_ms,
            parse_silence_threshold,
        )?
        else {
            return Ok(None);
        };
        silence_threshold_ms = silence;

        let Some(amplitude) = prompter.ask(
            format_args!("Select Amplitude Threshold. (0 - 1000)\nCurrent: {amplitude_threshold}"),
            amplitude_threshold,
            parse_amplitude_threshold,
        )?
        else {
            return Ok(None);
        };
        amplitude_threshold = amplitude;

        let thresholds = ThresholdConfig::new(amplitude_threshold, silence_threshold_ms)?;
        prompter.say("Scanning file...")?;
        let clips = scan(&loaded, &thresholds);
        prompter.say(format_args!("\nFound {} clips.", clips.len()))?;

        match prompter.confirm("Continue - \"y\", Try Again - \"n\"", true)? {
            Some(true) => {
                let Some(export) = prompt_export_config(prompter, settings)? else {
                    return Ok(None);
                };

                let writer = WavWriter::new();
                let extension = output_extension(&writer, &loaded.extension);
                prompter.say("Writing files.")?;
                let report = write_clips(
                    &loaded,
                    &clips,
                    &export,
                    &settings.output_dir,
                    &writer,
                    &extension,
                    progress_enabled,
                )?;

                report_problems(prompter, &report)?;
                prompter.say("Done!")?;
                let pattern = saved_files_pattern(
                    &absolute_dir(&settings.output_dir),
                    export.prefix(),
                    export.naming(),
                    &extension,
                );
                prompter.say(format_args!("Files saved as {}", pattern.display()))?;
                return Ok(Some(report));
            }
            Some(false) => prompter.say("")?,
            None => return Ok(None),
        }
    }
}

/// Ask for an input file until an existing one is named.
fn prompt_input_file<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Option<PathBuf>> {
    loop {
        prompter.say("Input filename. Ctrl+C to quit.")?;
        let Some(answer) = prompter.read_answer()? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }

        let path = PathBuf::from(&answer);
        if path.exists() {
            return Ok(Some(path));
        }
        prompter.say(format_args!("Could not find file: {answer}\n"))?;
    }
}

/// Ask for naming convention, prefix and padding.
fn prompt_export_config<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    settings: &Settings,
) -> Result<Option<ExportConfig>> {
    let Some(naming) = prompter.ask(
        "Choose a naming convention:\n1: Sequential\n2: Timestamps\nChoose a number:",
        settings.naming,
        parse_naming_convention,
    )?
    else {
        return Ok(None);
    };

    let Some(prefix) = prompter.ask(
        format_args!("\nType File Prefix.\nCurrent: {}", settings.prefix),
        settings.prefix.clone(),
        validate_prefix,
    )?
    else {
        return Ok(None);
    };

    let Some(padding_ms) = prompter.ask(
        format_args!(
            "Add padding? Input in milliseconds\nCurrent: {}",
            settings.padding_ms
        ),
        settings.padding_ms,
        parse_padding,
    )?
    else {
        return Ok(None);
    };

    Ok(Some(ExportConfig::new(padding_ms, naming, &prefix)?))
}

/// Resolve `dir` against the working directory for display.
fn absolute_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| dir.to_path_buf(), |cwd| cwd.join(dir))
}

/// Tell the user about clips that were skipped or could not be written.
fn report_problems<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    report: &ExportReport,
) -> Result<()> {
    for plan in &report.skipped {
        prompter.say(format_args!(
            "Skipping file with no length: {}",
            plan.file_name
        ))?;
    }
    for failed in &report.failed {
        prompter.say(format_args!(
            "Could not write {}: {}",
            failed.plan.file_name, failed.reason
        ))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipper::{ClipInterval, ClipPlan, FailedClip, WrittenClip};
    use std::io::Cursor;

    fn plan(index: usize, start: usize, end: usize) -> ClipPlan {
        ClipPlan {
            index,
            clip: ClipInterval::new(start, end),
            padded_start: start,
            padded_end: end,
            file_name: format!("clip_{}.wav", index + 1),
        }
    }

    #[test]
    fn test_report_problems_lists_skips_and_failures() {
        let report = ExportReport {
            written: vec![WrittenClip {
                plan: plan(0, 0, 10),
                path: PathBuf::from("out/clip_1.wav"),
            }],
            skipped: vec![plan(1, 20, 20)],
            failed: vec![FailedClip {
                plan: plan(2, 30, 40),
                reason: "disk full".to_string(),
            }],
        };

        let mut prompter = Prompter::new(Cursor::new(Vec::<u8>::new()), Vec::<u8>::new());
        report_problems(&mut prompter, &report).unwrap();

        let out = String::from_utf8(prompter.into_inner().1).unwrap();
        assert_eq!(
            out,
            "Skipping file with no length: clip_2.wav\nCould not write clip_3.wav: disk full\n"
        );
    }

    #[test]
    fn test_report_problems_silent_when_all_written() {
        let report = ExportReport {
            written: vec![WrittenClip {
                plan: plan(0, 0, 10),
                path: PathBuf::from("out/clip_1.wav"),
            }],
            ..ExportReport::default()
        };

        let mut prompter = Prompter::new(Cursor::new(Vec::<u8>::new()), Vec::<u8>::new());
        report_problems(&mut prompter, &report).unwrap();
        assert!(prompter.into_inner().1.is_empty());
    }

    #[test]
    fn test_absolute_dir_keeps_absolute_paths() {
        let dir = std::env::temp_dir();
        assert_eq!(absolute_dir(&dir), dir);
        assert!(absolute_dir(Path::new("output")).is_absolute());
    }
}
