//! Terminal and machine-readable output.

pub mod progress;
mod summary;

pub use summary::{ClipEntry, FailedEntry, SplitSummary, saved_files_pattern};
