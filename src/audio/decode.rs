//! Audio decoding using symphonia.

use crate::audio::SampleBuffer;
use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::conv::IntoSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::{debug, warn};

/// A decoded recording and the extension of the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedAudio {
    /// Mono samples and sample rate.
    pub buffer: SampleBuffer,
    /// File extension including the leading dot (e.g. `.wav`), or empty.
    pub extension: String,
}

/// Load an audio file for splitting.
///
/// Fails with a load error if the file is missing or cannot be decoded.
pub fn load_audio(path: &Path) -> Result<LoadedAudio> {
    if !path.exists() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let buffer = decode_audio_file(path)?;
    Ok(LoadedAudio {
        buffer,
        extension: file_extension(path),
    })
}

/// Extension of `path` with its leading dot, or an empty string.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

/// Decode an audio file to mono f32 samples.
///
/// Supports WAV, FLAC, MP3, and AAC formats.
pub fn decode_audio_file(path: &Path) -> Result<SampleBuffer> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .filter(|&rate| rate > 0)
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => append_samples(&decoded, &mut samples),
            // A corrupt packet loses a few milliseconds; keep going.
            Err(symphonia::core::errors::Error::DecodeError(reason)) => {
                warn!("Skipping undecodable packet in {}: {reason}", path.display());
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        }
    }

    debug!(
        "Decoded {} samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        path.display()
    );

    Ok(SampleBuffer::new(samples, sample_rate))
}

/// Append decoded samples to the output buffer, converting to mono.
fn append_samples(buffer: &AudioBufferRef, output: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::U8(buf) => append_mono(buf, output),
        AudioBufferRef::U16(buf) => append_mono(buf, output),
        AudioBufferRef::U24(buf) => append_mono(buf, output),
        AudioBufferRef::U32(buf) => append_mono(buf, output),
        AudioBufferRef::S8(buf) => append_mono(buf, output),
        AudioBufferRef::S16(buf) => append_mono(buf, output),
        AudioBufferRef::S24(buf) => append_mono(buf, output),
        AudioBufferRef::S32(buf) => append_mono(buf, output),
        AudioBufferRef::F32(buf) => append_mono(buf, output),
        AudioBufferRef::F64(buf) => append_mono(buf, output),
    }
}

/// Mix every frame of `buf` down to one normalized f32 sample.
fn append_mono<S>(buf: &AudioBuffer<S>, output: &mut Vec<f32>)
where
    S: Sample + IntoSample<f32>,
{
    let channels = buf.spec().channels.count();
    if channels <= 1 {
        output.extend(buf.chan(0).iter().map(|&s| -> f32 { s.into_sample() }));
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / channels as f32;
    output.reserve(buf.frames());
    for i in 0..buf.frames() {
        let sum: f32 = (0..channels)
            .map(|ch| -> f32 { buf.chan(ch)[i].into_sample() })
            .sum();
        output.push(sum * scale);
    }
}
