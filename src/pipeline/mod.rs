//! Processing pipeline components.

mod processor;

pub use processor::{SplitResult, load_input, scan, split_file, write_clips};
