//! Acoustic feature extraction from captured voice recordings.
//!
//! Pure signal processing: a completed [`crate::audio::AudioBuffer`] goes in,
//! a [`FeatureVector`] comes out. No I/O, no shared state; the transform
//! window is capped so extraction stays fast enough for interactive use even
//! on long recordings.

mod features;
mod fft;
mod pitch;

pub use features::{extract_features, FeatureVector, BAND_COUNT};

use thiserror::Error;

/// The captured buffer carries too little signal to analyze.
///
/// Fatal only to the one extraction call; the caller recovers by re-capturing.
#[derive(Debug, Error)]
#[error("audio buffer too short for analysis: {samples} samples at {sample_rate} Hz")]
pub struct InsufficientDataError {
    /// Number of samples in the rejected buffer.
    pub samples: usize,
    /// Sample rate of the rejected buffer.
    pub sample_rate: u32,
}
