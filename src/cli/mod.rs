//! CLI argument parsing and command handling.

mod args;
pub mod prompt;
pub mod session;
mod validators;

pub use args::{Cli, SplitArgs};
