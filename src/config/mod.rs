//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, load_default_config};
pub use paths::{config_dir, config_file_path};
pub use types::{Config, ExportConfig, NamingConvention, Settings, ThresholdConfig};
pub use validate::{
    ValidationError, check_amplitude_threshold, parse_amplitude_threshold, parse_milliseconds,
    parse_naming_convention, parse_padding, parse_silence_threshold, validate_prefix,
    validate_settings,
};
