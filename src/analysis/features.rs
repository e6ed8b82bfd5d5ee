use serde::{Deserialize, Serialize};

use super::fft::half_spectrum_magnitudes;
use super::pitch::estimate_pitch_hz;
use super::InsufficientDataError;
use crate::audio::AudioBuffer;

/// Number of equal-width spectral bands in the feature vector.
pub const BAND_COUNT: usize = 8;

/// Transform window cap; bounds spectral analysis cost on long recordings.
pub(crate) const FFT_WINDOW_MAX: usize = 2048;

/// Acoustic descriptors extracted from one captured recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    /// Estimated fundamental frequency in Hz, 0.0 when unvoiced.
    pub pitch_hz: f32,
    /// RMS level in [0, 1] for normalized input.
    pub loudness: f32,
    /// Amplitude-weighted mean frequency of the spectrum, in Hz.
    pub spectral_centroid_hz: f32,
    /// Fraction of adjacent sample pairs whose sign differs, in [0, 1].
    pub zero_crossing_rate: f32,
    /// Average magnitude per equal-width band of the lower half spectrum.
    pub band_energies: [f32; BAND_COUNT],
    /// Length of the recording the vector was extracted from.
    pub duration_seconds: f32,
}

/// Extract the acoustic feature vector from a captured recording.
///
/// Deterministic and side-effect free; the only failure mode is a buffer with
/// no samples or an unknown sample rate.
pub fn extract_features(buffer: AudioBuffer) -> Result<FeatureVector, InsufficientDataError> {
    if buffer.is_empty() || buffer.sample_rate() == 0 {
        return Err(InsufficientDataError {
            samples: buffer.len(),
            sample_rate: buffer.sample_rate(),
        });
    }
    let samples = buffer.samples();
    let sample_rate = buffer.sample_rate();
    let magnitudes = half_spectrum_magnitudes(samples, FFT_WINDOW_MAX);

    Ok(FeatureVector {
        pitch_hz: estimate_pitch_hz(samples, sample_rate),
        loudness: rms(samples),
        spectral_centroid_hz: spectral_centroid_hz(&magnitudes, sample_rate),
        zero_crossing_rate: zero_crossing_rate(samples),
        band_energies: band_energies(&magnitudes),
        duration_seconds: buffer.duration_seconds(),
    })
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0_f64;
    for &sample in samples {
        let sample = sanitize(sample) as f64;
        sum += sample * sample;
    }
    let mean = sum / samples.len() as f64;
    (mean.max(0.0).sqrt() as f32).clamp(0.0, 1.0)
}

fn zero_crossing_rate(samples: &[f32]) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mut crossings = 0u64;
    let mut prev = sanitize(samples[0]);
    for &sample in &samples[1..] {
        let current = sanitize(sample);
        let crossed = (prev >= 0.0 && current < 0.0) || (prev < 0.0 && current >= 0.0);
        if crossed && (prev != 0.0 || current != 0.0) {
            crossings += 1;
        }
        prev = current;
    }
    (crossings as f64 / (samples.len() - 1) as f64) as f32
}

/// Centroid over magnitude bins; the transform length is twice the bin count.
fn spectral_centroid_hz(magnitudes: &[f32], sample_rate: u32) -> f32 {
    if magnitudes.is_empty() {
        return 0.0;
    }
    let fft_len = magnitudes.len() * 2;
    let sr = sample_rate.max(1) as f64;
    let mut sum = 0.0_f64;
    let mut sum_freq = 0.0_f64;
    for (bin, &magnitude) in magnitudes.iter().enumerate() {
        let magnitude = magnitude.max(0.0) as f64;
        sum += magnitude;
        sum_freq += magnitude * (bin as f64 * sr / fft_len as f64);
    }
    if sum <= 0.0 {
        return 0.0;
    }
    (sum_freq / sum) as f32
}

fn band_energies(magnitudes: &[f32]) -> [f32; BAND_COUNT] {
    let mut bands = [0.0_f32; BAND_COUNT];
    if magnitudes.is_empty() {
        return bands;
    }
    let band_width = (magnitudes.len() as f32 / BAND_COUNT as f32).ceil().max(1.0) as usize;
    for (band, value) in bands.iter_mut().enumerate() {
        let start = band * band_width;
        if start >= magnitudes.len() {
            break;
        }
        let end = (start + band_width).min(magnitudes.len());
        let slice = &magnitudes[start..end];
        let sum: f64 = slice.iter().copied().map(|m| m.max(0.0) as f64).sum();
        *value = (sum / slice.len() as f64) as f32;
    }
    bands
}

fn sanitize(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
