//! Line-oriented terminal prompts.
//!
//! Each prompt is a read-validate-reprompt loop over a pure parser from
//! [`crate::config`]. Reading from any [`BufRead`] and writing to any
//! [`Write`] keeps the prompts testable without a terminal.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::config::ValidationError;
use crate::error::Result;

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of text.
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one answer with surrounding whitespace removed.
    ///
    /// Returns `None` when the input is closed.
    pub fn read_answer(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer.
    ///
    /// An empty answer yields `default`. Rejected answers print the
    /// validation message and ask again. Returns `None` if input closes.
    pub fn ask<T>(
        &mut self,
        question: impl Display,
        default: T,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<Option<T>> {
        loop {
            self.say(&question)?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(default));
            }
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.say(e)?,
            }
        }
    }

    /// Ask a yes/no question. Empty means `default`.
    pub fn confirm(&mut self, question: impl Display, default: bool) -> Result<Option<bool>> {
        loop {
            self.say(&question)?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            match answer.to_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.say("Invalid response")?,
            }
        }
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
