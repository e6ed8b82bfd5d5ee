use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use hound::SampleFormat;
use thiserror::Error;

use super::AudioBuffer;

/// Errors raised while decoding a WAV recording from disk.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: hound::Error,
    },
    #[error("failed to read samples from {path}: {source}")]
    Sample {
        path: PathBuf,
        source: hound::Error,
    },
}

/// Decode a WAV file into a mono [`AudioBuffer`].
///
/// Integer and float formats are supported; multi-channel files are averaged
/// down to mono frame by frame.
pub fn decode_wav(path: &Path) -> Result<AudioBuffer, DecodeError> {
    let mut reader = hound::WavReader::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    let raw = match spec.sample_format {
        SampleFormat::Float => read_float_samples(&mut reader, path)?,
        SampleFormat::Int => read_int_samples(&mut reader, spec.bits_per_sample, path)?,
    };
    Ok(AudioBuffer::new(
        average_channels(raw, channels),
        spec.sample_rate,
    ))
}

fn read_float_samples(
    reader: &mut hound::WavReader<BufReader<File>>,
    path: &Path,
) -> Result<Vec<f32>, DecodeError> {
    reader
        .samples::<f32>()
        .map(|sample| {
            sample.map_err(|source| DecodeError::Sample {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

fn read_int_samples(
    reader: &mut hound::WavReader<BufReader<File>>,
    bits_per_sample: u16,
    path: &Path,
) -> Result<Vec<f32>, DecodeError> {
    let scale = (1i64 << bits_per_sample.saturating_sub(1)).max(1) as f32;
    reader
        .samples::<i32>()
        .map(|sample| {
            sample
                .map(|value| value as f32 / scale)
                .map_err(|source| DecodeError::Sample {
                    path: path.to_path_buf(),
                    source,
                })
        })
        .collect()
}

/// Average multi-channel frames down to mono samples.
fn average_channels(raw: Vec<f32>, channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return raw;
    }
    raw.chunks(channels)
        .map(|frame| frame.iter().copied().sum::<f32>() / channels as f32)
        .collect()
}
