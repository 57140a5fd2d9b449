//! Audio loading.

mod buffer;
mod decode;

pub use buffer::{SampleBuffer, ms_to_samples};
pub use decode::{LoadedAudio, decode_audio_file, file_extension, load_audio};
